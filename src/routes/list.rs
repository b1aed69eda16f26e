//! List routes. Every path under `/api` goes to one handler; the resolver picks the list.

use crate::handlers::list_endpoint;
use crate::state::AppState;
use axum::{routing::any, Router};

pub fn list_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/*path", any(list_endpoint))
        .with_state(state)
}
