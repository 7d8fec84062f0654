use crate::store::BlogStore;

/// Shared application state
///
/// Handlers hold nothing between requests; the store is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub store: BlogStore,
}
