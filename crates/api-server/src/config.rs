use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub dataset_path: PathBuf,
    pub replay_interval: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:finlearn.db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let dataset_path = std::env::var("DATASET_PATH")
            .unwrap_or_else(|_| "dataset/Data_INFY.NS.csv".to_string())
            .into();

        let replay_interval_ms = std::env::var("REPLAY_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .context("REPLAY_INTERVAL_MS must be an integer")?;

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            dataset_path,
            replay_interval: Duration::from_millis(replay_interval_ms),
        })
    }
}
