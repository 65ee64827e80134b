use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Bearer token for the inference endpoint. `None` disables AI names.
    pub inference_api_key: Option<String>,
    pub inference_url: String,
    pub inference_timeout: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("DATABASE_URL").ok(),
            env::var("HUGGINGFACE_API_KEY").ok(),
        )
    }

    pub fn from_vars(
        database_url: Option<String>,
        inference_api_key: Option<String>,
    ) -> AppResult<Self> {
        let database_url = database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("DATABASE_URL environment variable not set".to_string())
            })?;

        Ok(Self::new(database_url, inference_api_key))
    }

    pub fn new(database_url: impl Into<String>, inference_api_key: Option<String>) -> Self {
        Self {
            database_url: database_url.into(),
            inference_api_key: inference_api_key.filter(|key| !key.trim().is_empty()),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            inference_timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }
}
