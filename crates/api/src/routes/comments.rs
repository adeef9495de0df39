//! Route definitions for comments.

use axum::routing::get;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes mounted at `/comments`.
///
/// ```text
/// GET    /          -> list_comments
/// POST   /          -> create_comment
/// PATCH  /          -> patch_comment
/// GET    /{id}      -> get_comment
/// DELETE /{id}      -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(comments::list_comments)
                .post(comments::create_comment)
                .patch(comments::patch_comment),
        )
        .route(
            "/{id}",
            get(comments::get_comment).delete(comments::delete_comment),
        )
}
