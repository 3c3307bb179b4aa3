use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::{ChatRequest, ChatResponse, HealthResponse};

/// Transport problems and non-success responses stay distinguishable
/// here; both collapse into the same failed-send state upstream.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server responded with {status}")]
    Service { status: StatusCode },
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: clean_base(base_url),
            client: Client::new(),
        }
    }

    /// One chat completion per call. No retry; the caller resolves its
    /// placeholder from whatever comes back.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let url = format!("{}/api/v1/chat", self.base_url);
        let resp = self.client.post(url).json(request).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Service {
                status: resp.status(),
            });
        }
        Ok(resp.json::<ChatResponse>().await?)
    }

    /// Health probe. Ok(true) means reachable and answering; the caller
    /// treats everything else as offline.
    pub async fn health(&self) -> Result<bool, ApiError> {
        let url = format!("{}/api/v1/health", self.base_url);
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let health = resp.json::<HealthResponse>().await?;
        tracing::debug!(status = %health.status, ollama = %health.ollama_status, "health probe");
        Ok(true)
    }
}

fn clean_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
