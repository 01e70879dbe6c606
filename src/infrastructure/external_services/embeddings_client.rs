use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};
use crate::config::{EmbeddingProviderKind, EmbeddingSettings};

#[derive(Serialize)]
pub struct EmbeddingsRequest<'a> {
    pub model: &'a str,
    pub input: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,
    pub encoding_format: &'static str,
}

#[derive(Deserialize)]
pub struct EmbeddingsResponse {
    pub data: Vec<EmbeddingData>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Deserialize)]
pub struct EmbeddingData {
    #[serde(default)]
    pub index: usize,
    pub embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Sent as `dimensions` when set.
    pub dimensions: Option<usize>,
    /// Width of the vectors the store keeps.
    pub stored_dimensions: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl EmbeddingsClientConfig {
    pub fn from_settings(settings: &EmbeddingSettings) -> Result<Self, EmbeddingProviderError> {
        let api_key = settings.api_key.clone().ok_or_else(|| {
            EmbeddingProviderError::MissingCredentials(settings.provider.api_key_var().to_string())
        })?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.model.clone(),
            dimensions: settings.provider.requested_dimensions(settings.dimensions),
            stored_dimensions: settings.dimensions,
            max_retries: settings.max_retries,
            timeout_secs: settings.timeout_secs,
            backoff_factor: 1.5,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }
}

/// Client for OpenAI-compatible `/embeddings` endpoints (OpenAI, Upstage).
#[derive(Debug, Clone)]
pub struct EmbeddingsClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl EmbeddingsClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, EmbeddingProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingProviderError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmbeddingsClientConfig {
        &self.config
    }

    pub async fn get_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        let request = EmbeddingsRequest {
            model: &self.config.model,
            input: vec![text],
            dimensions: self.config.dimensions,
            encoding_format: "float",
        };

        let response = self.send_request(&request).await?;
        first_embedding(response)
    }

    async fn send_request(
        &self,
        request: &EmbeddingsRequest<'_>,
    ) -> Result<EmbeddingsResponse, EmbeddingProviderError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.execute_request(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempts <= self.config.max_retries => {
                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );
                    tracing::warn!(
                        error = %e,
                        attempt = attempts,
                        backoff_ms = backoff_time.as_millis() as u64,
                        "embedding request failed, retrying"
                    );

                    tokio::time::sleep(backoff_time).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_request(
        &self,
        request: &EmbeddingsRequest<'_>,
    ) -> Result<EmbeddingsResponse, EmbeddingProviderError> {
        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| EmbeddingProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingProviderError::InvalidResponse(e.to_string()))
    }
}

fn status_error(status: StatusCode, body: &str) -> EmbeddingProviderError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => EmbeddingProviderError::RateLimitExceeded,
        s if s.is_server_error() => EmbeddingProviderError::ServiceUnavailable,
        s => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| body.to_string());
            EmbeddingProviderError::ApiError {
                status: s.as_u16(),
                message,
            }
        }
    }
}

fn first_embedding(response: EmbeddingsResponse) -> Result<Vec<f32>, EmbeddingProviderError> {
    response
        .data
        .into_iter()
        .min_by_key(|d| d.index)
        .map(|d| d.embedding)
        .ok_or_else(|| EmbeddingProviderError::InvalidResponse("No embeddings returned".to_string()))
}

// Adapter to implement the EmbeddingProvider trait
pub struct HttpEmbeddingProvider {
    client: EmbeddingsClient,
    provider: EmbeddingProviderKind,
}

impl HttpEmbeddingProvider {
    pub fn new(client: EmbeddingsClient, provider: EmbeddingProviderKind) -> Self {
        Self { client, provider }
    }

    pub fn from_settings(settings: &EmbeddingSettings) -> Result<Self, EmbeddingProviderError> {
        let client = EmbeddingsClient::new(EmbeddingsClientConfig::from_settings(settings)?)?;
        Ok(Self::new(client, settings.provider))
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        self.client.get_embedding(text).await
    }

    fn model_info(&self) -> (String, Option<String>) {
        (self.client.config().model.clone(), Some(self.provider.to_string()))
    }

    fn embedding_dimension(&self) -> usize {
        self.client
            .config()
            .dimensions
            .unwrap_or(self.client.config().stored_dimensions)
    }
}
