use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("No JSON object in model response")]
    NoJsonObject,

    #[error("Unparseable track payload: {0}")]
    Parse(#[from] serde_json::Error),
}
