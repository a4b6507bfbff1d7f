use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link record from the `short_links` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortLink {
    pub id: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

/// The JSON shape returned by the management API and consumed by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// `base_url` must not have a trailing slash.
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        Self {
            short_url: format!("{}/{}", base_url, link.id),
            id: link.id,
            original_url: link.original_url,
            created_at: link.created_at,
        }
    }
}

// ── Request bodies ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub new_url: String,
}

/// Plain confirmation / error body: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
