//! Token validation / user lookup endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use user_store::PublicUser;

use crate::auth::verify_token;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
}

impl UserResponse {
    fn fail(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            token: None,
            user: None,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/get-user", post(get_user))
}

/// Verify a bearer token from the request body and return the matching
/// account with the password hash stripped.
async fn get_user(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> (StatusCode, Json<UserResponse>) {
    let token = match req.token.filter(|t| !t.is_empty()) {
        Some(token) => token,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(UserResponse::fail("Token is required")),
            );
        }
    };

    let claims = match verify_token(&state.config.jwt_secret, &token) {
        Ok(claims) => claims,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(UserResponse::fail("Invalid token")),
            );
        }
    };

    match state.store.find_by_email(&claims.email).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(UserResponse {
                success: true,
                message: "Token is valid".to_string(),
                token: Some(token),
                user: Some(PublicUser::from(user)),
            }),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(UserResponse::fail("User not found")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "User lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UserResponse::fail("An error occurred")),
            )
        }
    }
}
