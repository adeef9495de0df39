//! The database collaborator handlers talk to.
//!
//! [`CatalogStore`] lists every statement the API issues. Handlers receive it
//! as `Arc<dyn CatalogStore>` through application state, so the backend is
//! pluggable: [`PgStore`] for production, [`MemoryStore`] for tests.

use async_trait::async_trait;
use catalog_core::comment::NewComment;
use catalog_core::product::{CreateProduct, ProductFilter};

use crate::models::comment::CommentRow;
use crate::models::image::ImageRow;
use crate::models::product::ProductRow;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence operations over products, comments and images.
///
/// Reads return row entities; mapping into domain objects is the caller's
/// job. Mutations return the number of affected rows where callers need it.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    // ── Comments ──

    async fn list_comments(&self) -> Result<Vec<CommentRow>, sqlx::Error>;
    async fn find_comment(&self, id: &str) -> Result<Option<CommentRow>, sqlx::Error>;
    async fn list_product_comments(&self, product_id: &str)
        -> Result<Vec<CommentRow>, sqlx::Error>;
    async fn find_duplicate_comment(
        &self,
        comment: &NewComment,
    ) -> Result<Option<CommentRow>, sqlx::Error>;
    async fn insert_comment(&self, id: &str, comment: &NewComment) -> Result<(), sqlx::Error>;
    /// Apply `(column, value)` updates to one comment.
    async fn update_comment(&self, id: &str, updates: &[(&str, &str)])
        -> Result<u64, sqlx::Error>;
    async fn delete_comment(&self, id: &str) -> Result<u64, sqlx::Error>;
    async fn delete_product_comments(&self, product_id: &str) -> Result<u64, sqlx::Error>;

    // ── Products ──

    async fn list_products(&self) -> Result<Vec<ProductRow>, sqlx::Error>;
    async fn search_products(&self, filter: &ProductFilter)
        -> Result<Vec<ProductRow>, sqlx::Error>;
    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>, sqlx::Error>;
    async fn insert_product(&self, id: &str, product: &CreateProduct) -> Result<(), sqlx::Error>;
    async fn delete_product(&self, id: &str) -> Result<u64, sqlx::Error>;

    // ── Images ──

    async fn list_images(&self) -> Result<Vec<ImageRow>, sqlx::Error>;
    async fn list_product_images(&self, product_id: &str) -> Result<Vec<ImageRow>, sqlx::Error>;
    async fn insert_images(&self, rows: &[ImageRow]) -> Result<u64, sqlx::Error>;
    async fn delete_images(&self, ids: &[String]) -> Result<u64, sqlx::Error>;
    async fn delete_product_images(&self, product_id: &str) -> Result<u64, sqlx::Error>;
}
