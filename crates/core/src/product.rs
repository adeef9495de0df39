//! Product and image domain types, request payloads, the search filter and
//! the thumbnail policy.

use serde::{Deserialize, Deserializer, Serialize};

use crate::comment::Comment;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lower price bound used when a search filter only sets `priceTo`.
pub const DEFAULT_PRICE_FROM: f64 = 0.0;

/// Upper price bound used when a search filter only sets `priceFrom`.
pub const DEFAULT_PRICE_TO: f64 = 999_999.0;

// ---------------------------------------------------------------------------
// Domain objects
// ---------------------------------------------------------------------------

/// A product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: EntityId,
    pub url: String,
    pub product_id: EntityId,
    pub main: bool,
}

/// A product enriched with its related comments and images.
///
/// `comments`, `images` and `thumbnail` stay `None` (and are omitted from
/// JSON) when the product has no related rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Image>,
}

impl Product {
    /// Attach a non-empty image list and derive the thumbnail from it.
    pub fn set_images(&mut self, images: Vec<Image>) {
        if images.is_empty() {
            return;
        }
        self.thumbnail = select_thumbnail(&images);
        self.images = Some(images);
    }
}

/// Pick the representative image: the last image flagged `main`, otherwise
/// the first image. `None` only for an empty slice.
pub fn select_thumbnail(images: &[Image]) -> Option<Image> {
    images
        .iter()
        .rev()
        .find(|image| image.main)
        .or_else(|| images.first())
        .cloned()
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// An image to be attached to a product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewImage {
    pub url: String,
    #[serde(default)]
    pub main: bool,
}

/// Body of `POST /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub images: Option<Vec<NewImage>>,
}

/// Body of `POST /products/add-images`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddImagesRequest {
    pub product_id: EntityId,
    #[serde(default)]
    pub images: Vec<NewImage>,
}

/// Query parameters of `GET /products/search`.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub price_from: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub price_to: Option<f64>,
}

/// A price as sent by a client: a JSON number or query-string text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

/// Parse an optional price, mapping blank text to `None`.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawPrice>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawPrice::Number(value)) => Ok(Some(value)),
        Some(RawPrice::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid price '{text}': {e}")))
        }
    }
}

impl ProductFilter {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// Exclusive price bounds, when either side of the range is set.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.price_from.is_none() && self.price_to.is_none() {
            return None;
        }
        Some((
            self.price_from.unwrap_or(DEFAULT_PRICE_FROM),
            self.price_to.unwrap_or(DEFAULT_PRICE_TO),
        ))
    }

    /// `true` when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.title().is_none() && self.description().is_none() && self.price_range().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
