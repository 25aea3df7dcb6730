//! Knowledge-level assignment from quiz scores.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{bearer_token, level_for_score, verify_token};
use crate::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct AssignLevelRequest {
    pub score: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/assign-level", post(assign_level))
}

/// Map the caller's quiz score onto a tier and store it on the account
/// named by the verified bearer token.
async fn assign_level(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AssignLevelRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let token =
        bearer_token(&headers).ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let claims = verify_token(&state.config.jwt_secret, token)
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    let level = level_for_score(req.score);
    state.store.update_level(&claims.email, level).await?;

    Ok(Json(json!({ "message": "Level updated successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sign_token;
    use crate::test_util::test_state;
    use axum::http::HeaderValue;
    use user_store::KnowledgeLevel;

    fn auth_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    async fn assign(state: &AppState, headers: HeaderMap, score: f64) -> Result<(), AppError> {
        assign_level(
            State(state.clone()),
            headers,
            Json(AssignLevelRequest { score }),
        )
        .await
        .map(|_| ())
    }

    #[tokio::test]
    async fn test_score_boundaries_map_to_tiers() {
        let state = test_state().await;
        let user = state.store.create_user("a@b.com", "hash").await.unwrap();
        let token = sign_token(&state.config.jwt_secret, &user.email, &user.password_hash).unwrap();

        for (score, expected) in [
            (2.9, KnowledgeLevel::Beginner),
            (3.5, KnowledgeLevel::Intermediate),
            (4.0, KnowledgeLevel::Advanced),
        ] {
            assign(&state, auth_headers(&token), score).await.unwrap();
            let stored = state.store.find_by_email("a@b.com").await.unwrap().unwrap();
            assert_eq!(stored.level, expected, "score {score}");
        }
    }

    #[tokio::test]
    async fn test_missing_authorization_is_unauthorized() {
        let state = test_state().await;
        let err = assign(&state, HeaderMap::new(), 3.0).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(m) if m == "Unauthorized"));
    }

    #[tokio::test]
    async fn test_bad_token_is_invalid() {
        let state = test_state().await;
        let err = assign(&state, auth_headers("bogus"), 3.0).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(m) if m == "Invalid token"));
    }

    #[tokio::test]
    async fn test_unknown_account_is_internal_error() {
        let state = test_state().await;
        let token = sign_token(&state.config.jwt_secret, "ghost@b.com", "hash").unwrap();
        let err = assign(&state, auth_headers(&token), 3.0).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
