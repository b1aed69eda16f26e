//! `/api/{groups,adlists,clients,domains...}` handler: resolves the list from the path and dispatches on the method.

use crate::error::AppError;
use crate::extractors::Authorized;
use crate::model::WriteMode;
use crate::resolver::{resolve, Resolved};
use crate::service::{ListService, WritePayload};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;

pub async fn list_endpoint(
    _auth: Authorized,
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Response, AppError> {
    let Resolved { list, argument, modifiable } = resolve(uri.path()).ok_or(AppError::NotFound)?;
    tracing::debug!(%method, path = %uri.path(), ?list, ?argument, "list request");
    let provider = state.provider.as_ref();

    let mode = match method {
        Method::GET => return ListService::read(provider, list, argument.as_deref(), StatusCode::OK).await,
        Method::POST => Some(WriteMode::Create),
        Method::PUT => Some(WriteMode::Replace),
        Method::DELETE => None,
        _ => return Err(AppError::NotFound),
    };
    if !modifiable {
        return Err(AppError::bad_request("Invalid request: Specify list to modify"));
    }
    let argument = argument.ok_or_else(|| AppError::bad_request("Invalid request: Specify item to modify"))?;

    match mode {
        Some(mode) => {
            let payload = WritePayload::from_body(&body)?;
            ListService::write(provider, list, &argument, &payload, mode).await
        }
        None => ListService::remove(provider, list, &argument).await,
    }
}
