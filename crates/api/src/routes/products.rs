//! Route definitions for products and their images.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Product routes mounted at `/products`.
///
/// Static segments take precedence over `/{id}`.
///
/// ```text
/// GET    /                  -> list_products
/// POST   /                  -> create_product
/// GET    /search            -> search_products
/// POST   /add-images        -> add_images
/// DELETE /remove-images     -> remove_images
/// GET    /{id}              -> get_product
/// DELETE /{id}              -> delete_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route("/search", get(products::search_products))
        .route("/add-images", post(products::add_images))
        .route("/remove-images", delete(products::remove_images))
        .route(
            "/{id}",
            get(products::get_product).delete(products::delete_product),
        )
}
