//! Row entities and their mapping into `catalog_core` domain objects.
//!
//! Rows mirror the table layout (snake_case, flat). They never leave the
//! persistence/handler boundary; handlers convert them with [`map_rows`].

pub mod comment;
pub mod image;
pub mod product;

/// Map rows into domain objects, preserving order.
pub fn map_rows<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}
