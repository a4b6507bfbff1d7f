use crate::{
    error::ApiError,
    handlers::ApiJson,
    models::{LinkResponse, MessageResponse, ShortenRequest, UpdateRequest},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

// ── Handlers ───────────────────────────────────────────────────────────────

/// POST /api/shorten
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), ApiError> {
    let url = validate_url(&body.url)?;
    let link = state.service.insert(&url).await?;
    tracing::info!("Created short link '{}' -> {}", link.id, link.original_url);

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.config.base_url)),
    ))
}

/// GET /api/urls
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LinkResponse>>, ApiError> {
    let links = state.service.list_all().await?;
    let base_url = &state.config.base_url;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkResponse::from_link(link, base_url))
            .collect(),
    ))
}

/// GET /api/urls/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LinkResponse>, ApiError> {
    let link = state.service.get_by_id(&id).await?;
    Ok(Json(LinkResponse::from_link(link, &state.config.base_url)))
}

/// PUT /api/urls/:id
///
/// Responds with the stored record so clients can reconcile from it.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateRequest>,
) -> Result<Json<LinkResponse>, ApiError> {
    let url = validate_url(&body.new_url)?;
    let link = state.service.update_original_url(&id, &url).await?;
    tracing::info!("Updated short link '{}' -> {}", link.id, link.original_url);

    Ok(Json(LinkResponse::from_link(link, &state.config.base_url)))
}

/// DELETE /api/urls/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service.delete(&id).await?;
    tracing::info!("Deleted short link '{}'", id);

    Ok(Json(MessageResponse::new("URL deleted")))
}

// ── Private helpers ────────────────────────────────────────────────────────

/// Trim and require an absolute http(s) URL.
fn validate_url(raw: &str) -> Result<String, ApiError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ApiError::Validation("URL must not be empty.".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::Validation(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(url.to_owned())
}
