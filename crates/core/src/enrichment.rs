//! Attaches separately fetched comments and images to products.
//!
//! Both functions group the related collection by `product_id`, preserving
//! the original row order inside every group, and only touch products that
//! have at least one related item. Products without related rows keep
//! `comments` / `images` / `thumbnail` unset.

use std::collections::HashMap;

use crate::comment::Comment;
use crate::product::{Image, Product};
use crate::types::EntityId;

/// Group items by product id, keeping insertion order within each group.
fn group_by_product<T>(
    items: Vec<T>,
    product_id: impl Fn(&T) -> &EntityId,
) -> HashMap<EntityId, Vec<T>> {
    let mut groups: HashMap<EntityId, Vec<T>> = HashMap::new();
    for item in items {
        groups
            .entry(product_id(&item).clone())
            .or_default()
            .push(item);
    }
    groups
}

/// Attach each product's comments.
pub fn enhance_products_comments(
    mut products: Vec<Product>,
    comments: Vec<Comment>,
) -> Vec<Product> {
    let mut by_product = group_by_product(comments, |c| &c.product_id);

    for product in &mut products {
        if let Some(list) = by_product.remove(&product.id) {
            product.comments = Some(list);
        }
    }

    products
}

/// Attach each product's images and derive its thumbnail.
///
/// The thumbnail is the last `main` image of the group, else the first one.
pub fn enhance_products_images(mut products: Vec<Product>, images: Vec<Image>) -> Vec<Product> {
    let mut by_product = group_by_product(images, |i| &i.product_id);

    for product in &mut products {
        if let Some(list) = by_product.remove(&product.id) {
            product.set_images(list);
        }
    }

    products
}
