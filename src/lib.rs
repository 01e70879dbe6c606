//! Chunk retrieval over a Postgres document store.
//!
//! Two retrievers share one result shape ([`ScoredChunk`]):
//!
//! - [`DenseRetriever`] embeds the question and ranks chunks by cosine
//!   similarity of their stored embeddings (`pgvector`).
//! - [`SparseRetriever`] ranks chunks by trigram similarity of their text
//!   (`pg_trgm`).
//!
//! Both read through the [`ChunkStore`] trait, implemented for a borrowed
//! Postgres connection ([`PgChunkStore`]) and for in-memory data
//! ([`InMemoryChunkStore`]).

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::ports::{EmbeddingProvider, EmbeddingProviderError};
pub use application::retrievers::{
    DEFAULT_MAX_CONTENT_LENGTH, DenseRetriever, ResultsReport, RetrievalConfig, RetrievalError,
    SearchParams, SparseRetriever, format_results, format_summary,
};
pub use config::Settings;
pub use domain::entities::{Document, File, ScoredChunk};
pub use domain::repositories::{ChunkStore, StoreError};
pub use infrastructure::{HttpEmbeddingProvider, InMemoryChunkStore, PgChunkStore, TableNames};
