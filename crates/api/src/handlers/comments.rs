//! Handlers for comments.
//!
//! Success bodies are JSON for reads and plain-text confirmations for
//! mutations. Errors use the `{ "error", "code" }` envelope of [`AppError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::comment::{validate_comment, Comment, CommentPatch, CommentPayload};
use catalog_core::error::CoreError;
use catalog_core::types::{new_entity_id, EntityId};
use catalog_db::models::map_rows;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reason returned when the same comment was already posted on the product.
pub const DUPLICATE_COMMENT_MESSAGE: &str = "Comment with the same fields already exists";

fn comment_not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comment",
        id,
    })
}

/// GET /api/comments
pub async fn list_comments(State(state): State<AppState>) -> AppResult<Json<Vec<Comment>>> {
    let rows = state.store.list_comments().await?;

    Ok(Json(map_rows(rows)))
}

/// GET /api/comments/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Comment>> {
    let row = state
        .store
        .find_comment(&id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    Ok(Json(row.into()))
}

/// POST /api/comments
///
/// Rejects incomplete payloads (400) and comments whose email, name and body
/// match an existing comment on the same product, ignoring case (422).
pub async fn create_comment(
    State(state): State<AppState>,
    body: Result<Json<CommentPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = body?;
    let comment = validate_comment(&payload)?;

    if state.store.find_duplicate_comment(&comment).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            DUPLICATE_COMMENT_MESSAGE.to_string(),
        )));
    }

    let id = new_entity_id();
    state.store.insert_comment(&id, &comment).await?;

    tracing::info!(comment_id = %id, product_id = %comment.product_id, "Comment created");

    Ok((StatusCode::CREATED, format!("Comment id:{id} has been added!")))
}

/// PATCH /api/comments
///
/// Updates whichever of `name`, `body`, `email` are present on the comment
/// identified by `id`. When nothing was updated, the payload is validated as
/// a full comment and inserted under a new id instead.
pub async fn patch_comment(
    State(state): State<AppState>,
    body: Result<Json<CommentPatch>, JsonRejection>,
) -> AppResult<Response> {
    let Json(patch) = body?;

    if let Some(id) = patch.id.as_deref() {
        let updates = patch.updates();
        if !updates.is_empty() {
            let affected = state.store.update_comment(id, &updates).await?;
            if affected == 1 {
                tracing::info!(comment_id = %id, fields = updates.len(), "Comment updated");
                return Ok(StatusCode::OK.into_response());
            }
        }
    }

    let comment = patch.validate()?;
    let id = new_entity_id();
    state.store.insert_comment(&id, &comment).await?;

    tracing::info!(comment_id = %id, product_id = %comment.product_id, "Comment created by patch");

    Ok((StatusCode::CREATED, Json(comment.with_id(id))).into_response())
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<String> {
    let deleted = state.store.delete_comment(&id).await?;

    if deleted == 0 {
        return Err(comment_not_found(id));
    }

    tracing::info!(comment_id = %id, "Comment deleted");

    Ok(format!("Comment with id {id} deleted"))
}
