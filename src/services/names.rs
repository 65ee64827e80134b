use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::utils::names::fallback_name;

pub const NAME_PROMPT: &str =
    "Generate one realistic Zambian full name (first and last name only):";

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference endpoint returned {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("empty response")]
    Empty,

    #[error("no full name in generated text {0:?}")]
    Unusable(String),
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
    do_sample: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 20,
            temperature: 0.9,
            top_p: 0.95,
            do_sample: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: String,
}

/// Produces `first last` passenger names, asking the hosted model when an API
/// key is available and falling back to the static lists otherwise.
pub struct NameGenerator {
    client: Client,
    api_key: Option<String>,
    url: String,
    timeout: Duration,
}

impl NameGenerator {
    pub fn new(config: &Config, use_ai: bool) -> Self {
        Self {
            client: Client::new(),
            api_key: config.inference_api_key.clone().filter(|_| use_ai),
            url: config.inference_url.clone(),
            timeout: config.inference_timeout,
        }
    }

    pub fn uses_inference(&self) -> bool {
        self.api_key.is_some()
    }

    /// Never fails: every inference error degrades to a fallback name.
    pub async fn generate(&self) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return fallback_name(&mut rand::thread_rng());
        };

        match self.request_name(api_key).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("AI name generation failed: {}, using fallback", e);
                fallback_name(&mut rand::thread_rng())
            }
        }
    }

    async fn request_name(&self, api_key: &str) -> Result<String, InferenceError> {
        let payload = InferenceRequest {
            inputs: NAME_PROMPT,
            parameters: GenerationParameters::default(),
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(InferenceError::Status(status));
        }

        let body = response.bytes().await?;
        let generations: Vec<Generation> = serde_json::from_slice(&body)?;
        let generated = generations
            .into_iter()
            .next()
            .ok_or(InferenceError::Empty)?
            .generated_text;

        extract_name(&generated, NAME_PROMPT).ok_or(InferenceError::Unusable(generated))
    }
}

/// Strip the echoed prompt, keep the first line and join its first two words.
pub fn extract_name(generated: &str, prompt: &str) -> Option<String> {
    let cleaned = generated.replace(prompt, "");
    let line = cleaned.trim().lines().next()?;

    let mut words = line.split_whitespace();
    let first = words.next()?;
    let last = words.next()?;
    Some(format!("{first} {last}"))
}
