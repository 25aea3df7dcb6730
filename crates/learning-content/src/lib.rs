pub mod client;
pub mod error;
pub mod prompt;
pub mod track;

pub use client::{extract_track, GeminiClient, GeminiConfig};
pub use error::ContentError;
pub use prompt::{build_prompt, temperature_for, ContentLanguage, FinanceTopic};
pub use track::{LearningSection, LearningTrack, QuizQuestion};
