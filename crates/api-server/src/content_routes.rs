//! Learning-track generation endpoint.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use learning_content::{ContentLanguage, FinanceTopic, LearningTrack};
use user_store::KnowledgeLevel;

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Parse a wire-name enum value, treating anything unrecognized as absent.
fn parse_enum<T: DeserializeOwned>(value: Option<String>) -> Option<T> {
    value.and_then(|s| serde_json::from_value(serde_json::Value::String(s)).ok())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/generate-learning", post(generate_learning))
}

/// Generate a tier-appropriate learning track. Generation failures are
/// absorbed into the default track, so this only fails on bad input.
async fn generate_learning(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<LearningTrack>>, AppError> {
    let level: KnowledgeLevel = parse_enum(req.level).ok_or_else(|| {
        AppError::Validation("Invalid or missing knowledge level".to_string())
    })?;
    let topic: Option<FinanceTopic> = parse_enum(req.topic);
    let language: Option<ContentLanguage> = parse_enum(req.language);

    let track = state.content.generate_track(level, topic, language).await;

    Ok(Json(ApiResponse::success(track)))
}
