//! Signup and login endpoints.
//!
//! Both issue a signed session token on success. Failures are ordinary
//! `{success, message}` responses with the appropriate status, never
//! exceptions past the boundary.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use user_store::StoreError;

use crate::auth::{hash_password, sign_token, verify_password};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResponse {
    fn ok(message: &str, token: String) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            token: Some(token),
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            token: None,
        }
    }
}

fn internal_error(err: impl std::fmt::Display) -> (StatusCode, Json<AuthResponse>) {
    tracing::error!(error = %err, "Auth request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AuthResponse::fail("An error occurred")),
    )
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::fail("Email and password are required")),
        );
    }

    let hash = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => return internal_error(e),
    };

    // The unique constraint is the source of truth; a concurrent signup
    // with the same email loses here, not at a pre-check.
    match state.store.create_user(email, &hash).await {
        Ok(_) => {}
        Err(StoreError::DuplicateEmail(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::fail("User already exists")),
            );
        }
        Err(e) => return internal_error(e),
    }

    match sign_token(&state.config.jwt_secret, email, &hash) {
        Ok(token) => (
            StatusCode::CREATED,
            Json(AuthResponse::ok("User registered successfully", token)),
        ),
        Err(e) => internal_error(e),
    }
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    let user = match state.store.find_by_email(req.email.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(AuthResponse::fail("User not found")),
            );
        }
        Err(e) => return internal_error(e),
    };

    match verify_password(&req.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(AuthResponse::fail("Invalid password")),
            );
        }
        Err(e) => return internal_error(e),
    }

    match sign_token(&state.config.jwt_secret, &user.email, &user.password_hash) {
        Ok(token) => (
            StatusCode::OK,
            Json(AuthResponse::ok("Login successful", token)),
        ),
        Err(e) => internal_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_token;
    use crate::test_util::test_state;

    fn creds(email: &str, password: &str) -> Json<CredentialsRequest> {
        Json(CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_signup_then_login_succeeds() {
        let state = test_state().await;

        let (status, body) = signup(State(state.clone()), creds("a@b.com", "pw123")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert_eq!(body.message, "User registered successfully");
        let token = body.token.clone().unwrap();
        let claims = verify_token(&state.config.jwt_secret, &token).unwrap();
        assert_eq!(claims.email, "a@b.com");

        let (status, body) = login(State(state), creds("a@b.com", "pw123")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.message, "Login successful");
        assert!(body.token.is_some());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_rejected() {
        let state = test_state().await;

        let (status, _) = signup(State(state.clone()), creds("a@b.com", "first")).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = signup(State(state.clone()), creds("a@b.com", "second")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.message, "User already exists");
        assert!(body.token.is_none());

        // The original account still logs in; it was not overwritten
        let (status, _) = login(State(state), creds("a@b.com", "first")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let state = test_state().await;
        let (status, body) = signup(State(state), creds("", "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_404() {
        let state = test_state().await;
        let (status, body) = login(State(state), creds("nobody@b.com", "pw")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "User not found");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401_without_token() {
        let state = test_state().await;
        signup(State(state.clone()), creds("a@b.com", "right")).await;

        let (status, body) = login(State(state), creds("a@b.com", "wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.success);
        assert_eq!(body.message, "Invalid password");
        assert!(body.token.is_none());
    }
}
