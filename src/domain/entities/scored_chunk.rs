use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Document, File};

/// A chunk joined with its parent file and the similarity it scored against a
/// query. Both retrievers return rows of this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    file_sha1: Option<String>,
    source: Option<String>,
    document_id: Option<Uuid>,
    content: String,
    sha1: String,
    chunk_index: Option<i32>,
    page_start: Option<i32>,
    page_end: Option<i32>,
    page_number: Option<i32>,
    token_count: Option<i32>,
    section_title: Option<String>,
    metadata: Option<serde_json::Value>,
    similarity: f64,
}

/// Column values of a joined chunk row, before it is wrapped in a [`ScoredChunk`].
#[derive(Debug, Clone, Default)]
pub struct ScoredChunkParts {
    pub file_sha1: Option<String>,
    pub source: Option<String>,
    pub document_id: Option<Uuid>,
    pub content: String,
    pub sha1: String,
    pub chunk_index: Option<i32>,
    pub page_start: Option<i32>,
    pub page_end: Option<i32>,
    pub page_number: Option<i32>,
    pub token_count: Option<i32>,
    pub section_title: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl ScoredChunk {
    pub fn new(parts: ScoredChunkParts, similarity: f64) -> Self {
        Self {
            file_sha1: parts.file_sha1,
            source: parts.source,
            document_id: parts.document_id,
            content: parts.content,
            sha1: parts.sha1,
            chunk_index: parts.chunk_index,
            page_start: parts.page_start,
            page_end: parts.page_end,
            page_number: parts.page_number,
            token_count: parts.token_count,
            section_title: parts.section_title,
            metadata: parts.metadata,
            similarity,
        }
    }

    /// Left-join semantics: file columns are `None` when `file` is absent.
    pub fn from_document(document: &Document, file: Option<&File>, similarity: f64) -> Self {
        Self::new(
            ScoredChunkParts {
                file_sha1: file.map(|f| f.file_sha1().as_str().to_string()),
                source: file.and_then(|f| f.source().map(str::to_string)),
                document_id: document.document_id(),
                content: document.content().to_string(),
                sha1: document.sha1().as_str().to_string(),
                chunk_index: document.chunk_index(),
                page_start: document.page_start(),
                page_end: document.page_end(),
                page_number: document.page_number(),
                token_count: document.token_count(),
                section_title: document.section_title().map(str::to_string),
                metadata: document.metadata().cloned(),
            },
            similarity,
        )
    }

    pub fn file_sha1(&self) -> Option<&str> {
        self.file_sha1.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn document_id(&self) -> Option<Uuid> {
        self.document_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sha1(&self) -> &str {
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

    pub fn similarity(&self) -> f64 {
        self.similarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ContentHash;

    const FILE_HASH: &str = "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed";
    const CHUNK_HASH: &str = "7c211433f02071597741e6ff5a8ea34789abbf43";

    #[test]
    fn test_from_document_with_parent_file() {
        let file = File::new(
            "/docs/guide.pdf".to_string(),
            ContentHash::new(FILE_HASH).unwrap(),
            Some("guide.pdf".to_string()),
        );
        let doc = Document::new(1, "Install the package".to_string(), ContentHash::new(CHUNK_HASH).unwrap())
            .with_file(file.id())
            .with_chunk_index(2)
            .with_page_number(9)
            .with_section_title("Setup");

        let row = ScoredChunk::from_document(&doc, Some(&file), 0.82);

        assert_eq!(row.file_sha1(), Some(FILE_HASH));
        assert_eq!(row.source(), Some("guide.pdf"));
        assert_eq!(row.document_id(), doc.document_id());
        assert_eq!(row.content(), "Install the package");
        assert_eq!(row.sha1(), CHUNK_HASH);
        assert_eq!(row.chunk_index(), Some(2));
        assert_eq!(row.page_number(), Some(9));
        assert_eq!(row.section_title(), Some("Setup"));
        assert_eq!(row.similarity(), 0.82);
    }

    #[test]
    fn test_from_document_without_parent_file() {
        let doc = Document::new(1, "Orphan".to_string(), ContentHash::new(CHUNK_HASH).unwrap());
        let row = ScoredChunk::from_document(&doc, None, 0.1);

        assert_eq!(row.file_sha1(), None);
        assert_eq!(row.source(), None);
        assert_eq!(row.content(), "Orphan");
    }

    #[test]
    fn test_serializes_named_fields() {
        let row = ScoredChunk::new(
            ScoredChunkParts {
                content: "text".to_string(),
                sha1: CHUNK_HASH.to_string(),
                ..Default::default()
            },
            0.5,
        );

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["content"], "text");
        assert_eq!(json["similarity"], 0.5);
        assert!(json["source"].is_null());
    }
}
