use std::sync::Arc;

use crate::services::CocktailEngine;

/// Shared application state
///
/// The engine is read-only after startup, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CocktailEngine>,
}

impl AppState {
    pub fn new(engine: CocktailEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
