//! Handlers for products and product images.
//!
//! Read endpoints assemble products from three separate row sets: product
//! rows are mapped first, then enriched with comments and images.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::enrichment::{enhance_products_comments, enhance_products_images};
use catalog_core::error::CoreError;
use catalog_core::product::{AddImagesRequest, CreateProduct, Product, ProductFilter};
use catalog_core::types::{new_entity_id, EntityId};
use catalog_db::models::comment::CommentRow;
use catalog_db::models::image::ImageRow;
use catalog_db::models::map_rows;
use catalog_db::models::product::ProductRow;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reason returned when an image batch is missing or empty.
pub const EMPTY_IMAGES_MESSAGE: &str = "Images array is empty";

fn product_not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// Map all three row sets and attach comments, then images.
fn assemble(
    products: Vec<ProductRow>,
    comments: Vec<CommentRow>,
    images: Vec<ImageRow>,
) -> Vec<Product> {
    let products = enhance_products_comments(map_rows(products), map_rows(comments));
    enhance_products_images(products, map_rows(images))
}

/// Fetch every comment and image and attach them to `products`.
async fn enrich(state: &AppState, products: Vec<ProductRow>) -> AppResult<Vec<Product>> {
    let (comments, images) =
        tokio::try_join!(state.store.list_comments(), state.store.list_images())?;

    Ok(assemble(products, comments, images))
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let rows = state.store.list_products().await?;
    let products = enrich(&state, rows).await?;

    Ok(Json(products))
}

/// GET /api/products/search?title=&description=&priceFrom=&priceTo=
///
/// Criteria are OR-ed together. An empty result is a 404.
pub async fn search_products(
    State(state): State<AppState>,
    query: Result<Query<ProductFilter>, QueryRejection>,
) -> AppResult<Json<Vec<Product>>> {
    let Query(filter) = query?;
    let rows = state.store.search_products(&filter).await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("Products are not found".into()));
    }

    let products = enrich(&state, rows).await?;

    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Product>> {
    let row = state
        .store
        .find_product(&id)
        .await?
        .ok_or_else(|| product_not_found(id.clone()))?;

    let (comments, images) = tokio::try_join!(
        state.store.list_product_comments(&id),
        state.store.list_product_images(&id),
    )?;

    let mut product = Product::from(row);
    if !comments.is_empty() {
        product.comments = Some(map_rows(comments));
    }
    product.set_images(map_rows(images));

    Ok(Json(product))
}

/// POST /api/products
///
/// Inline images, when present, are inserted after the product row.
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<CreateProduct>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let id = new_entity_id();
    state.store.insert_product(&id, &input).await?;

    let image_count = match input.images.as_deref() {
        Some(images) if !images.is_empty() => {
            let rows = ImageRow::new_batch(&id, images);
            state.store.insert_images(&rows).await?
        }
        _ => 0,
    };

    tracing::info!(product_id = %id, images = image_count, "Product created");

    Ok((StatusCode::CREATED, format!("Product id:{id} has been added!")))
}

/// DELETE /api/products/{id}
///
/// Removes the product's images and comments before the product row itself.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<String> {
    if state.store.find_product(&id).await?.is_none() {
        return Err(product_not_found(id));
    }

    let images = state.store.delete_product_images(&id).await?;
    let comments = state.store.delete_product_comments(&id).await?;
    state.store.delete_product(&id).await?;

    tracing::info!(product_id = %id, images, comments, "Product deleted");

    Ok(format!("Product with id {id} deleted"))
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// POST /api/products/add-images
pub async fn add_images(
    State(state): State<AppState>,
    body: Result<Json<AddImagesRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    if input.images.is_empty() {
        return Err(AppError::BadRequest(EMPTY_IMAGES_MESSAGE.into()));
    }

    let rows = ImageRow::new_batch(&input.product_id, &input.images);
    let inserted = state.store.insert_images(&rows).await?;

    tracing::info!(product_id = %input.product_id, images = inserted, "Images added");

    Ok((
        StatusCode::CREATED,
        format!(
            "Images for a product id:{} have been added!",
            input.product_id
        ),
    ))
}

/// DELETE /api/products/remove-images
///
/// Body is a JSON array of image ids. Anything else counts as an empty list.
pub async fn remove_images(
    State(state): State<AppState>,
    body: Result<Json<Vec<EntityId>>, JsonRejection>,
) -> AppResult<String> {
    let ids = match body {
        Ok(Json(ids)) if !ids.is_empty() => ids,
        Ok(_) => return Err(AppError::BadRequest(EMPTY_IMAGES_MESSAGE.into())),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Image id list rejected");
            return Err(AppError::BadRequest(EMPTY_IMAGES_MESSAGE.into()));
        }
    };

    let removed = state.store.delete_images(&ids).await?;

    if removed == 0 {
        return Err(AppError::NotFound("No one image has been removed".into()));
    }

    tracing::info!(requested = ids.len(), removed, "Images removed");

    Ok("Images have been removed!".to_string())
}
