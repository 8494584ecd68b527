use storefront_db::Stores;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub stores: Stores,
}
