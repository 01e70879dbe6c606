use std::sync::Arc;

use crate::application::ports::EmbeddingProvider;
use crate::config::HALF_PRECISION_DIMENSIONS;

/// What the dense retriever needs from the environment: the provider to embed
/// questions with and the dimensionality of the stored embeddings.
#[derive(Clone)]
pub struct RetrievalConfig {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    embedding_dimensions: usize,
}

impl RetrievalConfig {
    pub fn new(embedding_provider: Arc<dyn EmbeddingProvider>, embedding_dimensions: usize) -> Self {
        Self {
            embedding_provider,
            embedding_dimensions,
        }
    }

    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    pub fn embedding_dimensions(&self) -> usize {
        self.embedding_dimensions
    }

    /// Stored vectors are half precision and capped at 4000 components, so
    /// wider provider output has to be cut down before comparison.
    pub fn truncates_query(&self) -> bool {
        self.embedding_dimensions == HALF_PRECISION_DIMENSIONS
    }
}

impl std::fmt::Debug for RetrievalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalConfig")
            .field("model", &self.embedding_provider.model_info().0)
            .field("embedding_dimensions", &self.embedding_dimensions)
            .finish()
    }
}

/// Knobs shared by both retrievers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub top_k: usize,
    pub similarity_threshold: f64,
    pub min_results: usize,
}

impl SearchParams {
    pub const DEFAULT_TOP_K: usize = 20;
    pub const DEFAULT_MIN_RESULTS: usize = 5;

    /// Defaults for cosine similarity search.
    pub fn dense() -> Self {
        Self {
            top_k: Self::DEFAULT_TOP_K,
            similarity_threshold: 0.4,
            min_results: Self::DEFAULT_MIN_RESULTS,
        }
    }

    /// Defaults for trigram similarity search.
    pub fn sparse() -> Self {
        Self {
            top_k: Self::DEFAULT_TOP_K,
            similarity_threshold: 0.3,
            min_results: Self::DEFAULT_MIN_RESULTS,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_similarity_threshold(mut self, similarity_threshold: f64) -> Self {
        self.similarity_threshold = similarity_threshold;
        self
    }

    pub fn with_min_results(mut self, min_results: usize) -> Self {
        self.min_results = min_results;
        self
    }
}
