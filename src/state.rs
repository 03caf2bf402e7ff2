use std::sync::Arc;

use crate::clients::{PlaceSearch, TokenVerifier, WalkTimeSource};
use crate::store::DataStore;

/// Shared application state: the store handle and the external
/// collaborators, constructed once at startup and injected everywhere.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub walk_times: Arc<dyn WalkTimeSource>,
    pub places: Arc<dyn PlaceSearch>,
}
