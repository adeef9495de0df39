//! In-process [`CatalogStore`] keeping rows in vectors.
//!
//! Mirrors the SQL semantics the handlers rely on (row order, case-insensitive
//! duplicate matching, `OR`-joined `ILIKE` search criteria). Foreign keys and unique
//! indexes are not enforced.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use catalog_core::comment::NewComment;
use catalog_core::product::{CreateProduct, ProductFilter};
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::models::comment::CommentRow;
use crate::models::image::ImageRow;
use crate::models::product::ProductRow;

#[derive(Default)]
struct Tables {
    products: Vec<ProductRow>,
    comments: Vec<CommentRow>,
    images: Vec<ImageRow>,
}

/// Memory-backed store. Can be switched into an unavailable state in which
/// every call fails, to exercise error paths.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }
}

fn matches_filter(row: &ProductRow, filter: &ProductFilter) -> bool {
    if filter.is_empty() {
        return true;
    }

    let contains = |field: &Option<String>, needle: &str| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
    };

    filter.title().is_some_and(|t| contains(&row.title, t))
        || filter.description().is_some_and(|d| contains(&row.description, d))
        || filter.price_range().is_some_and(|(from, to)| {
            row.price.is_some_and(|price| price > from && price < to)
        })
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check()
    }

    async fn list_comments(&self) -> Result<Vec<CommentRow>, sqlx::Error> {
        self.check()?;
        Ok(self.tables.read().await.comments.clone())
    }

    async fn find_comment(&self, id: &str) -> Result<Option<CommentRow>, sqlx::Error> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.comment_id == id).cloned())
    }

    async fn list_product_comments(
        &self,
        product_id: &str,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn find_duplicate_comment(
        &self,
        comment: &NewComment,
    ) -> Result<Option<CommentRow>, sqlx::Error> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .find(|c| {
                c.email.to_lowercase() == comment.email.to_lowercase()
                    && c.name.to_lowercase() == comment.name.to_lowercase()
                    && c.body.to_lowercase() == comment.body.to_lowercase()
                    && c.product_id == comment.product_id
            })
            .cloned())
    }

    async fn insert_comment(&self, id: &str, comment: &NewComment) -> Result<(), sqlx::Error> {
        self.check()?;
        self.tables.write().await.comments.push(CommentRow {
            comment_id: id.to_string(),
            email: comment.email.clone(),
            name: comment.name.clone(),
            body: comment.body.clone(),
            product_id: comment.product_id.clone(),
        });
        Ok(())
    }

    async fn update_comment(
        &self,
        id: &str,
        updates: &[(&str, &str)],
    ) -> Result<u64, sqlx::Error> {
        self.check()?;
        if updates.is_empty() {
            return Ok(0);
        }

        let mut tables = self.tables.write().await;
        let Some(row) = tables.comments.iter_mut().find(|c| c.comment_id == id) else {
            return Ok(0);
        };

        for (column, value) in updates {
            let target = match *column {
                "name" => &mut row.name,
                "body" => &mut row.body,
                "email" => &mut row.email,
                other => {
                    return Err(sqlx::Error::ColumnNotFound(other.to_string()));
                }
            };
            *target = value.to_string();
        }

        Ok(1)
    }

    async fn delete_comment(&self, id: &str) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.comment_id != id);
        Ok((before - tables.comments.len()) as u64)
    }

    async fn delete_product_comments(&self, product_id: &str) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.product_id != product_id);
        Ok((before - tables.comments.len()) as u64)
    }

    async fn list_products(&self) -> Result<Vec<ProductRow>, sqlx::Error> {
        self.check()?;
        Ok(self.tables.read().await.products.clone())
    }

    async fn search_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .filter(|row| matches_filter(row, filter))
            .cloned()
            .collect())
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>, sqlx::Error> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.product_id == id).cloned())
    }

    async fn insert_product(&self, id: &str, product: &CreateProduct) -> Result<(), sqlx::Error> {
        self.check()?;
        self.tables.write().await.products.push(ProductRow {
            product_id: id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
        });
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.product_id != id);
        Ok((before - tables.products.len()) as u64)
    }

    async fn list_images(&self) -> Result<Vec<ImageRow>, sqlx::Error> {
        self.check()?;
        Ok(self.tables.read().await.images.clone())
    }

    async fn list_product_images(&self, product_id: &str) -> Result<Vec<ImageRow>, sqlx::Error> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .images
            .iter()
            .filter(|i| i.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn insert_images(&self, rows: &[ImageRow]) -> Result<u64, sqlx::Error> {
        self.check()?;
        self.tables.write().await.images.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    async fn delete_images(&self, ids: &[String]) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.images.len();
        tables.images.retain(|i| !ids.contains(&i.image_id));
        Ok((before - tables.images.len()) as u64)
    }

    async fn delete_product_images(&self, product_id: &str) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.images.len();
        tables.images.retain(|i| i.product_id != product_id);
        Ok((before - tables.images.len()) as u64)
    }
}
