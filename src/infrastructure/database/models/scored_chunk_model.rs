use diesel::prelude::*;
use diesel::sql_types::{Double, Integer, Json, Nullable, Text};
use uuid::Uuid;

use crate::domain::entities::{ScoredChunk, ScoredChunkParts};

/// One row of the chunk/file join produced by the similarity queries.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ScoredChunkModel {
    #[diesel(sql_type = Nullable<Text>)]
    pub file_sha1: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub source: Option<String>,
    #[diesel(sql_type = Nullable<diesel::sql_types::Uuid>)]
    pub document_id: Option<Uuid>,
    #[diesel(sql_type = Text)]
    pub content: String,
    #[diesel(sql_type = Text)]
    pub sha1: String,
    #[diesel(sql_type = Nullable<Integer>)]
    pub chunk_index: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub page_start: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub page_end: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub page_number: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub token_count: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub section_title: Option<String>,
    #[diesel(sql_type = Nullable<Json>)]
    pub metadata: Option<serde_json::Value>,
    #[diesel(sql_type = Double)]
    pub similarity: f64,
}

impl From<ScoredChunkModel> for ScoredChunk {
    fn from(model: ScoredChunkModel) -> Self {
        ScoredChunk::new(
            ScoredChunkParts {
                file_sha1: model.file_sha1,
                source: model.source,
                document_id: model.document_id,
                content: model.content,
                sha1: model.sha1,
                chunk_index: model.chunk_index,
                page_start: model.page_start,
                page_end: model.page_end,
                page_number: model.page_number,
                token_count: model.token_count,
                section_title: model.section_title,
                metadata: model.metadata,
            },
            model.similarity,
        )
    }
}
