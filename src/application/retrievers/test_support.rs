//! Doubles shared by the retriever tests.

use async_trait::async_trait;
use pgvector::Vector;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};
use crate::domain::entities::{ScoredChunk, ScoredChunkParts};
use crate::domain::repositories::{ChunkStore, StoreError};

pub const CHUNK_HASH: &str = "7c211433f02071597741e6ff5a8ea34789abbf43";

pub fn scored(content: &str, similarity: f64) -> ScoredChunk {
    ScoredChunk::new(
        ScoredChunkParts {
            content: content.to_string(),
            sha1: CHUNK_HASH.to_string(),
            ..Default::default()
        },
        similarity,
    )
}

pub fn similarities(rows: &[ScoredChunk]) -> Vec<f64> {
    rows.iter().map(ScoredChunk::similarity).collect()
}

pub struct FixedEmbeddingProvider {
    vector: Vec<f32>,
}

impl FixedEmbeddingProvider {
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }
}

#[async_trait]
impl EmbeddingProvider for FixedEmbeddingProvider {
    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        Ok(self.vector.clone())
    }

    fn model_info(&self) -> (String, Option<String>) {
        ("fixed".to_string(), None)
    }

    fn embedding_dimension(&self) -> usize {
        self.vector.len()
    }
}

pub struct FailingEmbeddingProvider;

#[async_trait]
impl EmbeddingProvider for FailingEmbeddingProvider {
    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        Err(EmbeddingProviderError::ServiceUnavailable)
    }

    fn model_info(&self) -> (String, Option<String>) {
        ("failing".to_string(), None)
    }

    fn embedding_dimension(&self) -> usize {
        0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Nearest { dimensions: usize, limit: usize },
    Text { min_similarity: Option<f64>, limit: usize },
}

/// Store whose rows carry preset similarities; records every query it serves.
#[derive(Default)]
pub struct ScriptedStore {
    rows: Vec<ScoredChunk>,
    pub calls: Vec<StoreCall>,
    pub fail: bool,
}

impl ScriptedStore {
    pub fn new(rows: Vec<ScoredChunk>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn ranked(&self, min_similarity: Option<f64>, limit: usize) -> Vec<ScoredChunk> {
        let mut rows: Vec<ScoredChunk> = self
            .rows
            .iter()
            .filter(|row| min_similarity.is_none_or(|min| row.similarity() > min))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.similarity().total_cmp(&a.similarity()));
        rows.truncate(limit);
        rows
    }
}

impl ChunkStore for ScriptedStore {
    fn nearest_by_embedding(
        &mut self,
        query: &Vector,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        self.calls.push(StoreCall::Nearest {
            dimensions: query.as_slice().len(),
            limit,
        });
        if self.fail {
            return Err(StoreError::Database(diesel::result::Error::BrokenTransactionManager));
        }
        Ok(self.ranked(None, limit))
    }

    fn most_similar_text(
        &mut self,
        _text: &str,
        min_similarity: Option<f64>,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        self.calls.push(StoreCall::Text {
            min_similarity,
            limit,
        });
        if self.fail {
            return Err(StoreError::Database(diesel::result::Error::BrokenTransactionManager));
        }
        Ok(self.ranked(min_similarity, limit))
    }
}
