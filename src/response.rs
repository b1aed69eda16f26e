//! Response envelope helpers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// `{ "<key>": [items...] }` with the given status.
pub fn collection<T: Serialize>(status: StatusCode, key: &'static str, items: Vec<T>) -> Response {
    let body: BTreeMap<&'static str, Vec<T>> = BTreeMap::from([(key, items)]);
    (status, Json(body)).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
