use serde::{Deserialize, Serialize};

/// Ordered knowledge tiers assigned from quiz performance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum KnowledgeLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl KnowledgeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeLevel::Beginner => "BEGINNER",
            KnowledgeLevel::Intermediate => "INTERMEDIATE",
            KnowledgeLevel::Advanced => "ADVANCED",
        }
    }
}

impl std::fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored account. Email is the unique key; accounts are created on
/// signup, mutated only by level assignment, never deleted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub level: KnowledgeLevel,
    pub created_at: String,
}

/// The account shape returned over the API: the password hash is stripped
/// before anything crosses the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub level: KnowledgeLevel,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            level: user.level,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(KnowledgeLevel::Beginner < KnowledgeLevel::Intermediate);
        assert!(KnowledgeLevel::Intermediate < KnowledgeLevel::Advanced);
    }

    #[test]
    fn test_level_serializes_uppercase() {
        let json = serde_json::to_string(&KnowledgeLevel::Intermediate).unwrap();
        assert_eq!(json, "\"INTERMEDIATE\"");
        let parsed: KnowledgeLevel = serde_json::from_str("\"ADVANCED\"").unwrap();
        assert_eq!(parsed, KnowledgeLevel::Advanced);
    }

    #[test]
    fn test_public_user_has_no_password_hash() {
        let user = User {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            level: KnowledgeLevel::Beginner,
            created_at: "2024-01-01 00:00:00".to_string(),
        };
        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@b.com");
    }
}
