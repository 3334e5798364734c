use std::sync::Arc;

use crate::provider::FactCheckProvider;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub provider: Box<dyn FactCheckProvider>,
}

impl AppState {
    pub fn new(provider: Box<dyn FactCheckProvider>) -> Self {
        Self { provider }
    }
}
