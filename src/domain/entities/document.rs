use chrono::{NaiveDateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ContentHash;

/// One retrievable chunk of text extracted from a [`super::File`].
///
/// A document may outlive its parent reference (`file_id` is nullable) and may
/// lack an embedding, in which case only lexical search can find it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: i64,
    file_id: Option<Uuid>,
    document_id: Option<Uuid>,
    content: String,
    sha1: ContentHash,
    chunk_index: Option<i32>,
    page_start: Option<i32>,
    page_end: Option<i32>,
    page_number: Option<i32>,
    token_count: Option<i32>,
    section_title: Option<String>,
    metadata: Option<serde_json::Value>,
    embedding: Option<Vector>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Document {
    pub fn new(id: i64, content: String, sha1: ContentHash) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id,
            file_id: None,
            document_id: Some(Uuid::new_v4()),
            content,
            sha1,
            chunk_index: None,
            page_start: None,
            page_end: None,
            page_number: None,
            token_count: None,
            section_title: None,
            metadata: None,
            embedding: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_file(mut self, file_id: Uuid) -> Self {
        self.file_id = Some(file_id);
        self
    }

    pub fn with_chunk_index(mut self, chunk_index: i32) -> Self {
        self.chunk_index = Some(chunk_index);
        self
    }

    pub fn with_pages(mut self, page_start: i32, page_end: i32) -> Self {
        self.page_start = Some(page_start);
        self.page_end = Some(page_end);
        self
    }

    pub fn with_page_number(mut self, page_number: i32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn with_token_count(mut self, token_count: i32) -> Self {
        self.token_count = Some(token_count);
        self
    }

    pub fn with_section_title(mut self, section_title: impl Into<String>) -> Self {
        self.section_title = Some(section_title.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_embedding(mut self, embedding: Vector) -> Self {
        self.embedding = Some(embedding);
        self
    }

    // Getters
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn file_id(&self) -> Option<Uuid> {
        self.file_id
    }

    pub fn document_id(&self) -> Option<Uuid> {
        self.document_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sha1(&self) -> &ContentHash {
        &self.sha1
    }

    pub fn chunk_index(&self) -> Option<i32> {
        self.chunk_index
    }

    pub fn page_start(&self) -> Option<i32> {
        self.page_start
    }

    pub fn page_end(&self) -> Option<i32> {
        self.page_end
    }

    pub fn page_number(&self) -> Option<i32> {
        self.page_number
    }

    pub fn token_count(&self) -> Option<i32> {
        self.token_count
    }

    pub fn section_title(&self) -> Option<&str> {
        self.section_title.as_deref()
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    pub fn embedding(&self) -> Option<&Vector> {
        self.embedding.as_ref()
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    pub fn belongs_to_file(&self, file_id: Uuid) -> bool {
        self.file_id == Some(file_id)
    }
}
