//! Repository for the `products` table, including the dynamic search query.

use catalog_core::product::{CreateProduct, ProductFilter};
use sqlx::PgPool;

use crate::models::product::ProductRow;

/// Column list for `products` queries.
const COLUMNS: &str = "product_id, title, description, price";

/// Typed bind value for the dynamically-built search query.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Price(f64),
}

/// Build the product search query and its bind values.
///
/// Predicates are appended in `title`, `description`, price-range order and
/// joined with `OR`. Text criteria match as case-insensitive substrings
/// (`ILIKE '%value%'`). An empty
/// filter yields a query without a `WHERE` clause.
pub fn products_filter_query(filter: &ProductFilter) -> (String, Vec<FilterValue>) {
    let mut predicates: Vec<String> = Vec::new();
    let mut values: Vec<FilterValue> = Vec::new();

    if let Some(title) = filter.title() {
        values.push(FilterValue::Text(format!("%{title}%")));
        predicates.push(format!("title ILIKE ${}", values.len()));
    }

    if let Some(description) = filter.description() {
        values.push(FilterValue::Text(format!("%{description}%")));
        predicates.push(format!("description ILIKE ${}", values.len()));
    }

    if let Some((from, to)) = filter.price_range() {
        values.push(FilterValue::Price(from));
        let lower = values.len();
        values.push(FilterValue::Price(to));
        predicates.push(format!("(price > ${lower} AND price < ${})", values.len()));
    }

    let mut query = format!("SELECT {COLUMNS} FROM products");
    if !predicates.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&predicates.join(" OR "));
    }

    (query, values)
}

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// List every product.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products");
        sqlx::query_as::<_, ProductRow>(&query).fetch_all(pool).await
    }

    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE product_id = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Products matching any of the filter's criteria.
    pub async fn search(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let (query, values) = products_filter_query(filter);
        tracing::debug!(%query, binds = values.len(), "Searching products");

        let mut q = sqlx::query_as::<_, ProductRow>(&query);
        for value in &values {
            q = match value {
                FilterValue::Text(v) => q.bind(v.as_str()),
                FilterValue::Price(v) => q.bind(*v),
            };
        }

        q.fetch_all(pool).await
    }

    /// Insert a product. Absent fields are stored as NULL.
    pub async fn create(pool: &PgPool, id: &str, input: &CreateProduct) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO products (product_id, title, description, price) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(input.title.as_deref())
        .bind(input.description.as_deref())
        .bind(input.price)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a product row. Dependent images and comments must be removed
    /// first. Returns the number of rows deleted.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
