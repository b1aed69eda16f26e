//! Rejects requests the configured `Authorizer` does not accept.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Proof that the request passed authorization. Extract it first so nothing else runs on failure.
#[derive(Clone, Copy, Debug)]
pub struct Authorized;

#[async_trait]
impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if state.authorizer.authorize(&parts.headers) {
            Ok(Authorized)
        } else {
            tracing::warn!(path = %parts.uri.path(), "unauthorized request");
            Err(AppError::Unauthorized)
        }
    }
}
