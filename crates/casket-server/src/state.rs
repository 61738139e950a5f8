use std::sync::Arc;

use casket_store::{ObjectService, Storage};

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: ObjectService,
    pub max_object_size: usize,
}

impl AppState {
    pub fn new(storage: Arc<Storage>, max_object_size: usize) -> Self {
        Self {
            service: ObjectService::new(storage),
            max_object_size,
        }
    }
}
