//! Credential and token helpers: bcrypt password hashing, JWT issuance and
//! verification, and the quiz-score → knowledge-tier mapping.

use axum::http::HeaderMap;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use user_store::KnowledgeLevel;

#[cfg(test)]
#[path = "auth_tests.rs"]
mod auth_tests;

/// Work factor for bcrypt hashing.
pub const BCRYPT_COST: u32 = 10;

/// Claims carried by a session token. The email is the identifying claim;
/// the stored bcrypt hash rides along. Tokens carry no expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub password: String,
    pub iat: i64,
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Sign a session token for the given account.
pub fn sign_token(
    secret: &str,
    email: &str,
    password_hash: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        email: email.to_string(),
        password: password_hash.to_string(),
        iat: Utc::now().timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and cryptographically verify a session token, returning its
/// claims. Tokens have no `exp` claim, so expiry checking is disabled.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

/// Map a quiz score onto the three ordered tiers. Fixed thresholds:
/// below 3 is Beginner, 3 up to (but not including) 4 is Intermediate,
/// 4 and above is Advanced.
pub fn level_for_score(score: f64) -> KnowledgeLevel {
    if score >= 4.0 {
        KnowledgeLevel::Advanced
    } else if score >= 3.0 {
        KnowledgeLevel::Intermediate
    } else {
        KnowledgeLevel::Beginner
    }
}
