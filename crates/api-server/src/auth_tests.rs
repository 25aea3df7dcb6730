#[cfg(test)]
mod tests {
    use super::super::*;
    use axum::http::{HeaderMap, HeaderValue};
    use user_store::KnowledgeLevel;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_sign_and_verify_round_trip() {
        let token = sign_token(SECRET, "a@b.com", "$2b$10$hash").unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.password, "$2b$10$hash");
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = sign_token(SECRET, "a@b.com", "hash").unwrap();
        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let token = sign_token(SECRET, "a@b.com", "hash").unwrap();
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);
        assert!(verify_token(SECRET, &tampered).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_token(SECRET, "not.a.jwt").is_err());
        assert!(verify_token(SECRET, "").is_err());
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for_score(0.0), KnowledgeLevel::Beginner);
        assert_eq!(level_for_score(2.9), KnowledgeLevel::Beginner);
        assert_eq!(level_for_score(3.0), KnowledgeLevel::Intermediate);
        assert_eq!(level_for_score(3.5), KnowledgeLevel::Intermediate);
        assert_eq!(level_for_score(3.999), KnowledgeLevel::Intermediate);
        assert_eq!(level_for_score(4.0), KnowledgeLevel::Advanced);
        assert_eq!(level_for_score(5.0), KnowledgeLevel::Advanced);
    }
}
