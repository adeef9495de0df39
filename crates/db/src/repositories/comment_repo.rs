//! Repository for the `comments` table.

use catalog_core::comment::NewComment;
use sqlx::PgPool;

use crate::models::comment::CommentRow;

/// Column list for `comments` queries.
const COLUMNS: &str = "comment_id, email, name, body, product_id";

/// Build `UPDATE comments SET ...` for the given columns.
///
/// Placeholders follow the order of `columns`; the comment id is bound last.
/// Returns `None` when there is nothing to update.
pub fn comment_update_query(columns: &[&str]) -> Option<String> {
    if columns.is_empty() {
        return None;
    }

    let sets: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect();

    Some(format!(
        "UPDATE comments SET {} WHERE comment_id = ${}",
        sets.join(", "),
        columns.len() + 1
    ))
}

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// List every comment.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments");
        sqlx::query_as::<_, CommentRow>(&query).fetch_all(pool).await
    }

    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<CommentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE comment_id = $1");
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the comments of one product.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: &str,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE product_id = $1");
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Find a comment with the same email, name and body (case-insensitive)
    /// on the same product.
    pub async fn find_duplicate(
        pool: &PgPool,
        comment: &NewComment,
    ) -> Result<Option<CommentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments \
             WHERE LOWER(email) = LOWER($1) \
             AND LOWER(name) = LOWER($2) \
             AND LOWER(body) = LOWER($3) \
             AND product_id = $4 \
             LIMIT 1"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(&comment.email)
            .bind(&comment.name)
            .bind(&comment.body)
            .bind(&comment.product_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a comment under the given id.
    pub async fn create(pool: &PgPool, id: &str, comment: &NewComment) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO comments (comment_id, email, name, body, product_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&comment.email)
        .bind(&comment.name)
        .bind(&comment.body)
        .bind(&comment.product_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Update the given `(column, value)` pairs. Returns rows affected.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        updates: &[(&str, &str)],
    ) -> Result<u64, sqlx::Error> {
        let columns: Vec<&str> = updates.iter().map(|(column, _)| *column).collect();
        let Some(query) = comment_update_query(&columns) else {
            return Ok(0);
        };

        let mut q = sqlx::query(&query);
        for (_, value) in updates {
            q = q.bind(*value);
        }

        let result = q.bind(id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete a comment by ID. Returns rows affected.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all comments of a product. Returns rows affected.
    pub async fn delete_by_product(pool: &PgPool, product_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE product_id = $1")
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_query_numbers_placeholders_in_column_order() {
        assert_eq!(
            comment_update_query(&["name", "email"]).as_deref(),
            Some("UPDATE comments SET name = $1, email = $2 WHERE comment_id = $3")
        );
    }

    #[test]
    fn update_query_single_column() {
        assert_eq!(
            comment_update_query(&["body"]).as_deref(),
            Some("UPDATE comments SET body = $1 WHERE comment_id = $2")
        );
    }

    #[test]
    fn update_query_without_columns_is_none() {
        assert!(comment_update_query(&[]).is_none());
    }
}
