use pgvector::Vector;

use super::{RetrievalConfig, RetrievalError, SearchParams};
use crate::config::HALF_PRECISION_DIMENSIONS;
use crate::domain::entities::ScoredChunk;
use crate::domain::repositories::ChunkStore;

/// Ranks chunks by cosine similarity between the question embedding and each
/// chunk's stored embedding. Chunks without an embedding are never returned.
pub struct DenseRetriever<S> {
    store: S,
    config: RetrievalConfig,
}

impl<S: ChunkStore> DenseRetriever<S> {
    pub fn new(store: S, config: RetrievalConfig) -> Self {
        Self { store, config }
    }

    pub async fn search_default(
        &mut self,
        question: &str,
    ) -> Result<Vec<ScoredChunk>, RetrievalError> {
        self.search(question, SearchParams::dense()).await
    }

    /// Fetches the `top_k` nearest chunks and keeps those scoring at least
    /// `similarity_threshold`. When none qualify, the first `min_results` rows
    /// of the fetched window are returned instead; the store is not queried
    /// again, so the fallback never yields more than `top_k` rows.
    pub async fn search(
        &mut self,
        question: &str,
        params: SearchParams,
    ) -> Result<Vec<ScoredChunk>, RetrievalError> {
        let embedded = self
            .config
            .embedding_provider()
            .embed_query(question)
            .await?;
        let query_vector = self.prepare_query(embedded);

        let results = self
            .store
            .nearest_by_embedding(&query_vector, params.top_k)?;

        let filtered: Vec<ScoredChunk> = results
            .iter()
            .filter(|row| row.similarity() >= params.similarity_threshold)
            .cloned()
            .collect();

        let filtered = if filtered.is_empty() {
            tracing::debug!(
                threshold = params.similarity_threshold,
                fetched = results.len(),
                "no chunk reached the similarity threshold, falling back to top rows"
            );
            results.into_iter().take(params.min_results).collect()
        } else {
            filtered
        };

        tracing::info!(retriever = "dense", count = filtered.len(), "search results");

        Ok(filtered)
    }

    fn prepare_query(&self, mut embedded: Vec<f32>) -> Vector {
        if self.config.truncates_query() {
            embedded.truncate(HALF_PRECISION_DIMENSIONS);
        }
        Vector::from(embedded)
    }
}
