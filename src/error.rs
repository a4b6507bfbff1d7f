use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::MessageResponse;

/// Failures reported by a [`LinkStore`](crate::store::LinkStore) or the
/// [`LinkService`](crate::service::LinkService) on top of it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("short link not found")]
    NotFound,

    #[error("short id '{0}' is already taken")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Error type returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("stored URL is not a valid redirect target")]
    InvalidTarget,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "URL not found".to_owned())
            }
            ApiError::Store(_) | ApiError::InvalidTarget => {
                tracing::error!("Request failed: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_owned(),
                )
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
