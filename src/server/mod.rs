//! HTTP report server: route table, shared state and top-level error
//! mapping.

pub mod handlers;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::data_fetcher::api::LeagueClient;
use crate::data_fetcher::cache::DiskCache;
use crate::error::AppError;

/// Shared per-process state handed to every request handler. The
/// credentials live inside `config` and reach the league API only
/// through `client`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub client: LeagueClient,
    pub cache: DiskCache,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = LeagueClient::new(config.clone())?;
        let cache = DiskCache::new(config.cache_dir());
        Ok(Self {
            config,
            client,
            cache,
        })
    }
}

/// Anything that escapes a handler is an unexpected internal failure;
/// the caller gets a generic 500 and the details go to the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
            .into_response()
    }
}

/// Builds the report router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/box_scores",
            get(handlers::box_scores).post(handlers::box_scores_post),
        )
        .route("/teams", get(handlers::teams).post(handlers::teams_post))
        .route("/records", get(handlers::records))
        .route(
            "/head_to_head",
            get(handlers::head_to_head).post(handlers::head_to_head_post),
        )
        .route(
            "/draft_data",
            get(handlers::draft_data).post(handlers::draft_data_post),
        )
        .with_state(state)
}

/// Binds and serves the dashboard until the process is stopped.
pub async fn serve(config: Config, host: &str, port: u16) -> Result<(), AppError> {
    let state = Arc::new(AppState::new(config)?);
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::server_error(format!("Cannot bind {addr}: {e}")))?;
    info!("Report server listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::server_error(e.to_string()))
}
