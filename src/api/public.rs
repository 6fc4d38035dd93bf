//! Public API types

use axum::response::{IntoResponse, Json, Response};
use http::StatusCode;
use serde_json::json;

use crate::core::Error;

// Errors

pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into an Axum compatible response. The request
/// pipeline's typed failures map to distinct statuses; an ambiguity
/// carries its candidate list so the client can ask the user.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        match self.0.downcast_ref::<Error>() {
            Some(Error::Parse(reason)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Could not interpret request: {}", reason),
            )
                .into_response(),
            Some(Error::Ambiguous { target, candidates }) => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "ambiguous_reference",
                    "target": target,
                    "candidates": candidates,
                })),
            )
                .into_response(),
            Some(Error::Auth(reason)) => (
                StatusCode::UNAUTHORIZED,
                format!("Authentication failed: {}", reason),
            )
                .into_response(),
            Some(Error::Remote(reason)) => (
                StatusCode::BAD_GATEWAY,
                format!("Calendar request failed: {}", reason),
            )
                .into_response(),
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something went wrong: {}", self.0),
            )
                .into_response(),
        }
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod calendar {
    pub use crate::api::routes::calendar::public::*;
}

pub mod edit {
    pub use crate::api::routes::edit::public::*;
}

pub mod schedule {
    pub use crate::api::routes::schedule::public::*;
}
