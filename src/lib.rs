//! tinylink: a small URL shortener.
//!
//! The server side is an axum router over a [`LinkService`], which owns an
//! injected [`LinkStore`] and [`IdGenerator`]. The [`client`] and [`view`]
//! modules are the consumer side of the same JSON API.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod id;
pub mod models;
pub mod service;
pub mod store;
pub mod view;

use config::{AppConfig, StoreBackend};
use id::{IdGenerator, RandomIdGenerator};
use service::LinkService;
use store::{LinkStore, MemoryStore};

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub service: LinkService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(service: LinkService, config: AppConfig) -> Self {
        Self { service, config }
    }

    /// Open the configured backend and wire up the service.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn LinkStore> = match config.store_backend {
            StoreBackend::Sqlite => {
                let pool = db::connect(&config.database_url).await?;
                Arc::new(db::SqliteStore::new(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; links are lost on restart");
                Arc::new(MemoryStore::new())
            }
        };
        let ids: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator::new(config.id_length));

        Ok(Self::new(LinkService::new(store, ids), config))
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn app(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/shorten", post(handlers::api::shorten))
        .route("/urls", get(handlers::api::list))
        .route(
            "/urls/:id",
            get(handlers::api::get)
                .put(handlers::api::update)
                .delete(handlers::api::delete),
        );

    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .nest("/api", api_router)
        // Short-link redirect — must come LAST so /api/* takes priority
        .route("/:id", get(handlers::redirect::redirect))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
