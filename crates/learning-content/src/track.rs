use serde::{Deserialize, Serialize};
use user_store::KnowledgeLevel;

/// A generated multi-section educational unit with embedded quizzes.
/// Generated on demand and returned to the client; never persisted
/// server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningTrack {
    pub title: String,
    pub description: String,
    pub sections: Vec<LearningSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningSection {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<QuizQuestion>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "answerIndex")]
    pub answer_index: usize,
}

impl LearningTrack {
    /// The fixed default track returned whenever generation fails, so the
    /// user is never left with nothing.
    pub fn fallback(level: KnowledgeLevel) -> Self {
        Self {
            title: format!("Default {level} Finance Track"),
            description: "Sorry, we couldn't generate custom content at this time. \
                          Here's some default material."
                .to_string(),
            sections: vec![LearningSection {
                title: "Introduction to Finance".to_string(),
                content: "Finance is the study of money management and the process of \
                          acquiring needed funds."
                    .to_string(),
                quiz: Some(vec![QuizQuestion {
                    question: "What is finance primarily concerned with?".to_string(),
                    options: vec![
                        "Social media".to_string(),
                        "Money management".to_string(),
                        "Sports".to_string(),
                        "History".to_string(),
                    ],
                    answer_index: 1,
                }]),
            }],
        }
    }
}
