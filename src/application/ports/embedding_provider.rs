use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(String),
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl EmbeddingProviderError {
    /// Failures worth another attempt: throttling, 5xx and transport errors.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EmbeddingProviderError::NetworkError(_)
                | EmbeddingProviderError::RateLimitExceeded
                | EmbeddingProviderError::ServiceUnavailable
        )
    }
}

/// Turns query text into an embedding vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError>;

    fn model_info(&self) -> (String, Option<String>);

    /// Length of the vectors this provider returns.
    fn embedding_dimension(&self) -> usize;
}
