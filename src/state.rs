//! Shared application state for all routes.

use crate::auth::Authorizer;
use crate::provider::RowProvider;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn RowProvider>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(provider: Arc<dyn RowProvider>, authorizer: Arc<dyn Authorizer>) -> Self {
        AppState { provider, authorizer }
    }
}
