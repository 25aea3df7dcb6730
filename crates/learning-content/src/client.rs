use std::time::Duration;

use serde::{Deserialize, Serialize};
use user_store::KnowledgeLevel;

use crate::error::ContentError;
use crate::prompt::{build_prompt, temperature_for, ContentLanguage, FinanceTopic};
use crate::track::LearningTrack;

/// Output budget for one generation request.
const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Configuration for the generation service.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-001".to_string()),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client for the hosted generative model.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn with_defaults() -> Result<Self, ContentError> {
        Self::new(GeminiConfig::default())
    }

    /// Generate a learning track for the given tier.
    ///
    /// Failures are absorbed: any network, decode or parse problem yields
    /// the fixed default track so the caller always gets content. This is
    /// the only resilience mechanism; there are no retries.
    pub async fn generate_track(
        &self,
        level: KnowledgeLevel,
        topic: Option<FinanceTopic>,
        language: Option<ContentLanguage>,
    ) -> LearningTrack {
        let prompt = build_prompt(level, topic, language);
        match self.generate(&prompt, temperature_for(level)).await {
            Ok(text) => match extract_track(&text) {
                Ok(track) => track,
                Err(e) => {
                    tracing::warn!(%level, error = %e, "Unparseable generation response, using fallback track");
                    LearningTrack::fallback(level)
                }
            },
            Err(e) => {
                tracing::warn!(%level, error = %e, "Generation request failed, using fallback track");
                LearningTrack::fallback(level)
            }
        }
    }

    /// One raw completion call; returns the first candidate's text.
    async fn generate(&self, prompt: &str, temperature: f64) -> Result<String, ContentError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(ContentError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let result = response.json::<GenerateContentResponse>().await?;
        let text = result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}

/// Extract the first top-level JSON object from free-form model output and
/// parse it as a learning track. Models often wrap the object in prose or
/// code fences, so everything outside the outermost braces is dropped.
pub fn extract_track(text: &str) -> Result<LearningTrack, ContentError> {
    let start = text.find('{').ok_or(ContentError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ContentError::NoJsonObject)?;
    if end < start {
        return Err(ContentError::NoJsonObject);
    }
    Ok(serde_json::from_str(&text[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_JSON: &str = r#"{
        "title": "Stocks 101",
        "description": "The basics.",
        "sections": [
            {"title": "What is a stock?", "content": "A share of ownership.",
             "quiz": [{"question": "Q?", "options": ["a","b","c","d"], "answerIndex": 2}]}
        ]
    }"#;

    #[test]
    fn test_extract_track_plain_object() {
        let track = extract_track(TRACK_JSON).unwrap();
        assert_eq!(track.title, "Stocks 101");
        assert_eq!(track.sections[0].quiz.as_ref().unwrap()[0].answer_index, 2);
    }

    #[test]
    fn test_extract_track_strips_surrounding_prose() {
        let wrapped = format!("Sure! Here's your track:\n```json\n{TRACK_JSON}\n```\nEnjoy!");
        let track = extract_track(&wrapped).unwrap();
        assert_eq!(track.title, "Stocks 101");
    }

    #[test]
    fn test_extract_track_no_object() {
        let err = extract_track("no json here").unwrap_err();
        assert!(matches!(err, ContentError::NoJsonObject));
    }

    #[test]
    fn test_extract_track_malformed_object() {
        let err = extract_track("{\"title\": }").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back_to_default_track() {
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "test".to_string(),
            model: "test-model".to_string(),
            timeout: Duration::from_millis(250),
        })
        .unwrap();

        let track = client
            .generate_track(KnowledgeLevel::Intermediate, None, None)
            .await;

        assert_eq!(track, LearningTrack::fallback(KnowledgeLevel::Intermediate));
    }
}
