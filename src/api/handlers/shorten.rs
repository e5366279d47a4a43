//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates or reuses a short link for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created` whether the mapping was just persisted or already existed -
/// shortening is idempotent and the caller receives the same code either way:
///
/// ```json
/// {
///   "short_code": "Abc123Xy",
///   "short_url": "https://sh.example.com/Abc123Xy"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request when the URL is empty or not an http/https/ftp URL
/// - 409 Conflict with code `collision_exhausted` when no unique code could
///   be found within the configured length ceiling
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let shortened = state.shortener_service.shorten_url(&payload.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: shortened.code,
            short_url: shortened.short_url,
        }),
    ))
}
