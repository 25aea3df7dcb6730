//! HTTP/WebSocket server for the finance-education dashboard: email/password
//! auth with JWT sessions, quiz-score level assignment, AI learning-track
//! generation, and the live replay channel feeding the chart.

pub mod auth;
pub mod auth_routes;
pub mod config;
pub mod content_routes;
pub mod level_routes;
pub mod request_id;
pub mod user_routes;
pub mod ws_routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use learning_content::GeminiClient;
use market_data::ReplayDataset;
use user_store::UserStore;

use crate::config::ServerConfig;
use crate::ws_routes::SessionRegistry;

/// Shared application state. Every dependency is constructed explicitly at
/// startup and lives for the whole process; handlers receive it via
/// `State`, never through globals.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub dataset: Arc<ReplayDataset>,
    pub registry: Arc<SessionRegistry>,
    pub content: GeminiClient,
    pub config: Arc<ServerConfig>,
}

/// Standard envelope for data-carrying endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Error type for handlers using the `{"error": ...}` failure shape.
///
/// Unexpected internal failures are logged server-side and surface as a
/// generic 500; auth and validation failures carry their message through.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Unauthorized(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(auth_routes::routes())
        .merge(user_routes::routes())
        .merge(level_routes::routes())
        .merge(content_routes::routes())
        .merge(ws_routes::routes())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}


pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=info,tower_http=warn".into()),
        )
        .init();

    let config = Arc::new(ServerConfig::from_env()?);

    let store = UserStore::open(&config.database_url).await?;
    let dataset = Arc::new(ReplayDataset::load(&config.dataset_path)?);
    let registry = Arc::new(SessionRegistry::new());
    let content = GeminiClient::with_defaults()?;

    let state = AppState {
        store,
        dataset,
        registry,
        content,
        config: config.clone(),
    };

    let app = app_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
