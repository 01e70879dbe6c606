pub mod config;
pub mod dense_retriever;
pub mod formatter;
pub mod sparse_retriever;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{RetrievalConfig, SearchParams};
pub use dense_retriever::DenseRetriever;
pub use formatter::{DEFAULT_MAX_CONTENT_LENGTH, ResultsReport, format_results, format_summary};
pub use sparse_retriever::SparseRetriever;

use crate::application::ports::embedding_provider::EmbeddingProviderError;
use crate::domain::repositories::StoreError;

/// Failure of a single `search` call. Provider and store errors pass through
/// untouched; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingProviderError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
