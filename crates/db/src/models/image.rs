//! Image row model.

use catalog_core::product::{Image, NewImage};
use catalog_core::types::{new_entity_id, EntityId};
use sqlx::FromRow;

/// A row from the `images` table. Also used as the insert shape.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ImageRow {
    pub image_id: EntityId,
    pub url: String,
    pub product_id: EntityId,
    pub main: bool,
}

impl ImageRow {
    /// Build insertable rows for `product_id`, assigning each a new id.
    pub fn new_batch(product_id: &str, images: &[NewImage]) -> Vec<ImageRow> {
        images
            .iter()
            .map(|image| ImageRow {
                image_id: new_entity_id(),
                url: image.url.clone(),
                product_id: product_id.to_string(),
                main: image.main,
            })
            .collect()
    }
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Image {
            id: row.image_id,
            url: row.url,
            product_id: row.product_id,
            main: row.main,
        }
    }
}
