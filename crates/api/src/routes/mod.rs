pub mod comments;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /comments                   list, create, patch (update-or-create)
/// /comments/{id}              get, delete
///
/// /products                   list, create
/// /products/search            filtered list
/// /products/add-images        bulk add images (POST)
/// /products/remove-images     bulk remove images (DELETE)
/// /products/{id}              get, delete (cascades to images and comments)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/comments", comments::router())
        .nest("/products", products::router())
}
