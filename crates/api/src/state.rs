use std::sync::Arc;

use catalog_db::store::CatalogStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL in production).
    pub store: Arc<dyn CatalogStore>,
}
