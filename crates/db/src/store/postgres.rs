//! PostgreSQL-backed [`CatalogStore`], delegating to the repositories.

use async_trait::async_trait;
use catalog_core::comment::NewComment;
use catalog_core::product::{CreateProduct, ProductFilter};

use super::CatalogStore;
use crate::models::comment::CommentRow;
use crate::models::image::ImageRow;
use crate::models::product::ProductRow;
use crate::repositories::{CommentRepo, ImageRepo, ProductRepo};
use crate::DbPool;

/// Production store over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn list_comments(&self) -> Result<Vec<CommentRow>, sqlx::Error> {
        CommentRepo::list_all(&self.pool).await
    }

    async fn find_comment(&self, id: &str) -> Result<Option<CommentRow>, sqlx::Error> {
        CommentRepo::find_by_id(&self.pool, id).await
    }

    async fn list_product_comments(
        &self,
        product_id: &str,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        CommentRepo::list_by_product(&self.pool, product_id).await
    }

    async fn find_duplicate_comment(
        &self,
        comment: &NewComment,
    ) -> Result<Option<CommentRow>, sqlx::Error> {
        CommentRepo::find_duplicate(&self.pool, comment).await
    }

    async fn insert_comment(&self, id: &str, comment: &NewComment) -> Result<(), sqlx::Error> {
        CommentRepo::create(&self.pool, id, comment).await
    }

    async fn update_comment(
        &self,
        id: &str,
        updates: &[(&str, &str)],
    ) -> Result<u64, sqlx::Error> {
        CommentRepo::update(&self.pool, id, updates).await
    }

    async fn delete_comment(&self, id: &str) -> Result<u64, sqlx::Error> {
        CommentRepo::delete(&self.pool, id).await
    }

    async fn delete_product_comments(&self, product_id: &str) -> Result<u64, sqlx::Error> {
        CommentRepo::delete_by_product(&self.pool, product_id).await
    }

    async fn list_products(&self) -> Result<Vec<ProductRow>, sqlx::Error> {
        ProductRepo::list_all(&self.pool).await
    }

    async fn search_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        ProductRepo::search(&self.pool, filter).await
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>, sqlx::Error> {
        ProductRepo::find_by_id(&self.pool, id).await
    }

    async fn insert_product(&self, id: &str, product: &CreateProduct) -> Result<(), sqlx::Error> {
        ProductRepo::create(&self.pool, id, product).await
    }

    async fn delete_product(&self, id: &str) -> Result<u64, sqlx::Error> {
        ProductRepo::delete(&self.pool, id).await
    }

    async fn list_images(&self) -> Result<Vec<ImageRow>, sqlx::Error> {
        ImageRepo::list_all(&self.pool).await
    }

    async fn list_product_images(&self, product_id: &str) -> Result<Vec<ImageRow>, sqlx::Error> {
        ImageRepo::list_by_product(&self.pool, product_id).await
    }

    async fn insert_images(&self, rows: &[ImageRow]) -> Result<u64, sqlx::Error> {
        ImageRepo::create_many(&self.pool, rows).await
    }

    async fn delete_images(&self, ids: &[String]) -> Result<u64, sqlx::Error> {
        ImageRepo::delete_many(&self.pool, ids).await
    }

    async fn delete_product_images(&self, product_id: &str) -> Result<u64, sqlx::Error> {
        ImageRepo::delete_by_product(&self.pool, product_id).await
    }
}
