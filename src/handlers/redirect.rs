use crate::{error::ApiError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// GET /:id
///
/// Look the id up in the store and answer with a 302 to the original URL.
/// The stored URL is not revalidated here.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let original_url = state.service.resolve(&id).await?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|e| {
        tracing::warn!("Short link '{}' has an unusable target: {:?}", id, e);
        ApiError::InvalidTarget
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
