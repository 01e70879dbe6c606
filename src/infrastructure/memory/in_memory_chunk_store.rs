use std::collections::HashMap;

use pgvector::Vector;
use uuid::Uuid;

use super::trigram;
use crate::domain::entities::{Document, File, ScoredChunk};
use crate::domain::repositories::{ChunkStore, StoreError};

/// [`ChunkStore`] holding files and documents in memory.
///
/// Scores follow the Postgres operators: `1 - cosine distance` for embeddings
/// and `pg_trgm` similarity for text. A zero vector scores 0 rather than NaN.
#[derive(Debug, Default)]
pub struct InMemoryChunkStore {
    dimensions: usize,
    files: HashMap<Uuid, File>,
    documents: Vec<Document>,
}

impl InMemoryChunkStore {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            ..Default::default()
        }
    }

    pub fn insert_file(&mut self, file: File) {
        self.files.insert(file.id(), file);
    }

    /// Rejects documents whose embedding does not have the store's
    /// dimensionality.
    pub fn insert_document(&mut self, document: Document) -> Result<(), StoreError> {
        if let Some(embedding) = document.embedding() {
            self.check_dimensions(embedding)?;
        }
        self.documents.push(document);
        Ok(())
    }

    /// Deleting a file removes its documents too.
    pub fn remove_file(&mut self, file_id: Uuid) -> Option<File> {
        let removed = self.files.remove(&file_id)?;
        self.documents.retain(|doc| !doc.belongs_to_file(file_id));
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn check_dimensions(&self, vector: &Vector) -> Result<(), StoreError> {
        let actual = vector.as_slice().len();
        if actual != self.dimensions {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimensions,
                actual,
            });
        }
        Ok(())
    }

    fn joined(&self, document: &Document, similarity: f64) -> ScoredChunk {
        let file = document.file_id().and_then(|id| self.files.get(&id));
        ScoredChunk::from_document(document, file, similarity)
    }

    /// Orders by similarity, highest first, keeping insertion order for ties.
    fn ranked(&self, mut scored: Vec<(&Document, f64)>, limit: usize) -> Vec<ScoredChunk> {
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
            .into_iter()
            .take(limit)
            .map(|(doc, similarity)| self.joined(doc, similarity))
            .collect()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b).sqrt()).clamp(-1.0, 1.0)
}

impl ChunkStore for InMemoryChunkStore {
    fn nearest_by_embedding(
        &mut self,
        query: &Vector,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        self.check_dimensions(query)?;
        let query = query.as_slice();

        let scored = self
            .documents
            .iter()
            .filter_map(|doc| {
                doc.embedding()
                    .map(|embedding| (doc, cosine_similarity(embedding.as_slice(), query)))
            })
            .collect();

        Ok(self.ranked(scored, limit))
    }

    fn most_similar_text(
        &mut self,
        text: &str,
        min_similarity: Option<f64>,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        let query = trigram::trigrams(text);
        let scored = self
            .documents
            .iter()
            .filter_map(|doc| {
                let score = f64::from(trigram::set_similarity(
                    &trigram::trigrams(doc.content()),
                    &query,
                ));
                match min_similarity {
                    Some(min) if score <= min => None,
                    _ => Some((doc, score)),
                }
            })
            .collect();

        Ok(self.ranked(scored, limit))
    }
}
