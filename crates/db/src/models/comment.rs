//! Comment row model.

use catalog_core::comment::Comment;
use catalog_core::types::EntityId;
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CommentRow {
    pub comment_id: EntityId,
    pub email: String,
    pub name: String,
    pub body: String,
    pub product_id: EntityId,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.comment_id,
            name: row.name,
            email: row.email,
            body: row.body,
            product_id: row.product_id,
        }
    }
}
