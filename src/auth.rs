//! Authorization check run before any list request is served.

use axum::http::{header, HeaderMap};

/// Header carrying the API key. `Authorization: Bearer <key>` is accepted as well.
pub const API_KEY_HEADER: &str = "x-api-key";

pub trait Authorizer: Send + Sync {
    fn authorize(&self, headers: &HeaderMap) -> bool;
}

/// Used when no API key is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _headers: &HeaderMap) -> bool {
        true
    }
}

#[derive(Clone, Debug)]
pub struct ApiKeyAuthorizer {
    key: String,
}

impl ApiKeyAuthorizer {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKeyAuthorizer { key: key.into() }
    }

    fn presented(headers: &HeaderMap) -> Option<&str> {
        if let Some(v) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
            return Some(v.trim());
        }
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
    }
}

impl Authorizer for ApiKeyAuthorizer {
    fn authorize(&self, headers: &HeaderMap) -> bool {
        Self::presented(headers).is_some_and(|k| k == self.key)
    }
}
