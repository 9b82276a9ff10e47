use std::sync::Arc;

use crate::data::{Catalog, Snapshot};
use crate::services::{Dashboard, Recommender};

/// Shared application state
///
/// The snapshot is read-only once loaded, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    pub fn new(catalog: Catalog, recommender: impl Recommender + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
            recommender: Arc::new(recommender),
        }
    }

    /// Views over the loaded snapshot
    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(&self.catalog, self.recommender.as_ref())
    }
}

impl From<Snapshot> for AppState {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot.catalog, snapshot.recommender)
    }
}
