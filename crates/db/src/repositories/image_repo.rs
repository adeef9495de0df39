//! Repository for the `images` table.

use sqlx::PgPool;

use crate::models::image::ImageRow;

/// Column list for `images` queries.
const COLUMNS: &str = "image_id, url, product_id, main";

/// Number of bound values per inserted image row.
const INSERT_ARITY: usize = 4;

/// PostgreSQL caps a statement at 65535 bind parameters.
const MAX_BIND_PARAMS: usize = u16::MAX as usize;

/// Rows per `INSERT` statement so a chunk stays within [`MAX_BIND_PARAMS`].
pub const MAX_ROWS_PER_INSERT: usize = MAX_BIND_PARAMS / INSERT_ARITY;

/// Build a multi-row `INSERT INTO images` statement for `rows` rows.
fn bulk_insert_query(rows: usize) -> String {
    let mut query = format!("INSERT INTO images ({COLUMNS}) VALUES ");
    let mut param_idx = 1usize;

    for row in 0..rows {
        if row > 0 {
            query.push_str(", ");
        }
        query.push('(');
        for i in 0..INSERT_ARITY {
            if i > 0 {
                query.push_str(", ");
            }
            query.push_str(&format!("${param_idx}"));
            param_idx += 1;
        }
        query.push(')');
    }

    query
}

/// Provides CRUD operations for product images.
pub struct ImageRepo;

impl ImageRepo {
    /// List every image.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ImageRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images");
        sqlx::query_as::<_, ImageRow>(&query).fetch_all(pool).await
    }

    /// List the images of one product.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: &str,
    ) -> Result<Vec<ImageRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE product_id = $1");
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Batch insert image rows. Large batches are split into several
    /// statements inside one transaction. Returns rows inserted.
    pub async fn create_many(pool: &PgPool, rows: &[ImageRow]) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for chunk in rows.chunks(MAX_ROWS_PER_INSERT) {
            let query = bulk_insert_query(chunk.len());
            tracing::debug!(rows = chunk.len(), "Batch inserting images");

            let mut q = sqlx::query(&query);
            for row in chunk {
                q = q
                    .bind(&row.image_id)
                    .bind(&row.url)
                    .bind(&row.product_id)
                    .bind(row.main);
            }

            inserted += q.execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Delete the images with the given ids. Returns rows affected.
    pub async fn delete_many(pool: &PgPool, ids: &[String]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE image_id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all images of a product. Returns rows affected.
    pub async fn delete_by_product(pool: &PgPool, product_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE product_id = $1")
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
