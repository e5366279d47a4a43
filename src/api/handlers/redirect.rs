//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Errors
///
/// - 400 Bad Request when the code is blank or contains characters outside
///   `[A-Za-z0-9]` (such codes can never have been issued)
/// - 404 Not Found when the code is not mapped
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    if code.trim().is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Short code must be non-empty and alphanumeric",
            json!({ "code": code }),
        ));
    }

    let mapping = state.shortener_service.resolve_code(&code).await?;

    debug!(%code, "redirecting");
    Ok(Redirect::temporary(&mapping.long_url))
}
