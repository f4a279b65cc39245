//! HTTP routes.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use armory_domain::CharacterSnapshot;

use crate::app::App;
use crate::use_cases::armory::FetchCharacterError;

/// Body returned when no API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str =
    "Armory API key is not configured. Set LOSTARK_API_KEY and restart the server.";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/characters/{name}/full", get(get_character_full))
}

async fn health() -> &'static str {
    "OK"
}

async fn get_character_full(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<CharacterSnapshot>, ApiError> {
    let snapshot = app
        .use_cases
        .armory
        .fetch_character
        .execute(&name, app.api_key())
        .await?;
    Ok(Json(snapshot))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    MissingCredential,
    /// Mandatory upstream failure, relayed byte for byte.
    Upstream { status: u16, body: Bytes },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::MissingCredential => {
                (StatusCode::INTERNAL_SERVER_ERROR, MISSING_API_KEY_MESSAGE).into_response()
            }
            ApiError::Upstream { status, body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, body).into_response()
            }
        }
    }
}

impl From<FetchCharacterError> for ApiError {
    fn from(e: FetchCharacterError) -> Self {
        match e {
            FetchCharacterError::MissingCredential => ApiError::MissingCredential,
            FetchCharacterError::InvalidName(e) => ApiError::BadRequest(e.to_string()),
            FetchCharacterError::Profile(failure) => ApiError::Upstream {
                status: failure.status,
                body: failure.body,
            },
        }
    }
}
