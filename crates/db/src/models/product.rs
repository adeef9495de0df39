//! Product row model.

use catalog_core::product::Product;
use catalog_core::types::EntityId;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductRow {
    pub product_id: EntityId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Relations start unset; the enrichment step fills them in.
impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.product_id,
            title: row.title,
            description: row.description,
            price: row.price,
            comments: None,
            images: None,
            thumbnail: None,
        }
    }
}
