//! Integration tests for the repository layer against a real database.
//!
//! Require `DATABASE_URL`; run with `cargo test -- --ignored`.

use catalog_core::comment::NewComment;
use catalog_core::product::{CreateProduct, NewImage, ProductFilter};
use catalog_core::types::new_entity_id;
use catalog_db::models::image::ImageRow;
use catalog_db::repositories::image_repo::MAX_ROWS_PER_INSERT;
use catalog_db::repositories::{CommentRepo, ImageRepo, ProductRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(title: &str, price: f64) -> CreateProduct {
    CreateProduct {
        title: Some(title.to_string()),
        description: Some(format!("{title} description")),
        price: Some(price),
        images: None,
    }
}

fn new_comment(product_id: &str, body: &str) -> NewComment {
    NewComment {
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        body: body.to_string(),
        product_id: product_id.to_string(),
    }
}

fn new_image(url: &str, main: bool) -> NewImage {
    NewImage {
        url: url.to_string(),
        main,
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn product_create_find_delete(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Lamp", 25.0))
        .await
        .unwrap();

    let row = ProductRepo::find_by_id(&pool, "p1").await.unwrap().unwrap();
    assert_eq!(row.title.as_deref(), Some("Lamp"));
    assert_eq!(row.price, Some(25.0));

    assert_eq!(ProductRepo::delete(&pool, "p1").await.unwrap(), 1);
    assert!(ProductRepo::find_by_id(&pool, "p1").await.unwrap().is_none());
    assert_eq!(ProductRepo::delete(&pool, "p1").await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn product_search_joins_criteria_with_or(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Desk lamp", 40.0))
        .await
        .unwrap();
    ProductRepo::create(&pool, "p2", &new_product("Chair", 5.0))
        .await
        .unwrap();
    ProductRepo::create(&pool, "p3", &new_product("Table", 500.0))
        .await
        .unwrap();

    let filter = ProductFilter {
        title: Some("lamp".into()),
        price_to: Some(10.0),
        ..Default::default()
    };
    let mut ids: Vec<_> = ProductRepo::search(&pool, &filter)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.product_id)
        .collect();
    ids.sort();
    assert_eq!(ids, ["p1", "p2"]);

    let shouted = ProductFilter {
        title: Some("LAMP".into()),
        ..Default::default()
    };
    let rows = ProductRepo::search(&pool, &shouted).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].product_id, "p1");

    let all = ProductRepo::search(&pool, &ProductFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn comment_duplicate_lookup_ignores_case(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Lamp", 1.0))
        .await
        .unwrap();
    CommentRepo::create(&pool, "c1", &new_comment("p1", "Nice"))
        .await
        .unwrap();

    let mut shouted = new_comment("p1", "NICE");
    shouted.email = "ANN@example.com".to_string();

    let found = CommentRepo::find_duplicate(&pool, &shouted).await.unwrap();
    assert_eq!(found.map(|c| c.comment_id).as_deref(), Some("c1"));

    // The unique index rejects the insert that the lookup would have caught.
    let err = CommentRepo::create(&pool, "c2", &shouted).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_comments_content"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn long_comment_bodies_fit_the_unique_index(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Lamp", 1.0))
        .await
        .unwrap();

    // Random ids compress poorly, so the body stays well above a btree row.
    let body: String = (0..300).map(|_| new_entity_id()).collect();
    assert!(body.len() > 10_000);

    CommentRepo::create(&pool, "c1", &new_comment("p1", &body))
        .await
        .unwrap();

    let found = CommentRepo::find_duplicate(&pool, &new_comment("p1", &body.to_uppercase()))
        .await
        .unwrap();
    assert!(found.is_some());

    let err = CommentRepo::create(&pool, "c2", &new_comment("p1", &body.to_uppercase()))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn comment_partial_update(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Lamp", 1.0))
        .await
        .unwrap();
    CommentRepo::create(&pool, "c1", &new_comment("p1", "Nice"))
        .await
        .unwrap();

    let affected = CommentRepo::update(&pool, "c1", &[("body", "Better"), ("email", "b@x.io")])
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let row = CommentRepo::find_by_id(&pool, "c1").await.unwrap().unwrap();
    assert_eq!(row.body, "Better");
    assert_eq!(row.email, "b@x.io");
    assert_eq!(row.name, "Ann");

    let affected = CommentRepo::update(&pool, "missing", &[("name", "x")])
        .await
        .unwrap();
    assert_eq!(affected, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn comment_delete_by_product(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Lamp", 1.0))
        .await
        .unwrap();
    ProductRepo::create(&pool, "p2", &new_product("Chair", 1.0))
        .await
        .unwrap();
    CommentRepo::create(&pool, "c1", &new_comment("p1", "a"))
        .await
        .unwrap();
    CommentRepo::create(&pool, "c2", &new_comment("p1", "b"))
        .await
        .unwrap();
    CommentRepo::create(&pool, "c3", &new_comment("p2", "c"))
        .await
        .unwrap();

    assert_eq!(CommentRepo::delete_by_product(&pool, "p1").await.unwrap(), 2);
    assert!(CommentRepo::list_by_product(&pool, "p1").await.unwrap().is_empty());
    assert_eq!(CommentRepo::list_all(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn comment_requires_existing_product(pool: PgPool) {
    let err = CommentRepo::create(&pool, "c1", &new_comment("ghost", "a"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn image_batch_insert_and_delete(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Lamp", 1.0))
        .await
        .unwrap();

    let rows = ImageRow::new_batch(
        "p1",
        &[
            new_image("https://cdn.test/1.png", false),
            new_image("https://cdn.test/2.png", true),
            new_image("https://cdn.test/3.png", false),
        ],
    );
    assert_eq!(ImageRepo::create_many(&pool, &rows).await.unwrap(), 3);

    let stored = ImageRepo::list_by_product(&pool, "p1").await.unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored.iter().filter(|i| i.main).count(), 1);

    let ids = vec![rows[0].image_id.clone(), "unknown".to_string()];
    assert_eq!(ImageRepo::delete_many(&pool, &ids).await.unwrap(), 1);

    assert_eq!(ImageRepo::delete_by_product(&pool, "p1").await.unwrap(), 2);
    assert!(ImageRepo::list_all(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn image_batch_larger_than_one_statement(pool: PgPool) {
    ProductRepo::create(&pool, "p1", &new_product("Lamp", 1.0))
        .await
        .unwrap();

    let images: Vec<NewImage> = (0..MAX_ROWS_PER_INSERT + 10)
        .map(|i| new_image(&format!("https://cdn.test/{i}.png"), false))
        .collect();
    let rows = ImageRow::new_batch("p1", &images);

    let inserted = ImageRepo::create_many(&pool, &rows).await.unwrap();
    assert_eq!(inserted as usize, rows.len());
    assert_eq!(
        ImageRepo::list_by_product(&pool, "p1").await.unwrap().len(),
        rows.len()
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn empty_image_batch_is_a_no_op(pool: PgPool) {
    assert_eq!(ImageRepo::create_many(&pool, &[]).await.unwrap(), 0);
}
