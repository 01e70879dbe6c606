use pgvector::Vector;

use crate::domain::entities::ScoredChunk;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Read access to stored chunks, ranked by similarity to a query.
///
/// Every method returns rows left-joined with their parent file and ordered by
/// similarity, highest first. Methods take `&mut self` because the backing
/// session handle (a database connection) requires exclusive access per query.
pub trait ChunkStore {
    /// The `limit` chunks with a non-null embedding closest to `query`, scored
    /// as `1 - cosine_distance(embedding, query)`.
    fn nearest_by_embedding(
        &mut self,
        query: &Vector,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError>;

    /// The `limit` chunks whose content is most similar to `text` by trigram
    /// similarity. When `min_similarity` is set, only rows scoring strictly
    /// above it are returned.
    fn most_similar_text(
        &mut self,
        text: &str,
        min_similarity: Option<f64>,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError>;
}

impl<S: ChunkStore + ?Sized> ChunkStore for &mut S {
    fn nearest_by_embedding(
        &mut self,
        query: &Vector,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        (**self).nearest_by_embedding(query, limit)
    }

    fn most_similar_text(
        &mut self,
        text: &str,
        min_similarity: Option<f64>,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        (**self).most_similar_text(text, min_similarity, limit)
    }
}
