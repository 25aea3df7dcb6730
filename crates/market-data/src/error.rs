use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
