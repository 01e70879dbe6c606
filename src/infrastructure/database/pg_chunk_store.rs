use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use pgvector::Vector;

use super::models::ScoredChunkModel;
use super::tables::TableNames;
use crate::domain::entities::ScoredChunk;
use crate::domain::repositories::{ChunkStore, StoreError};

/// SQL text for the similarity queries against one pair of tables.
///
/// Table names depend on the embedding dimensionality, so they are spliced in;
/// every caller-provided value stays a bind parameter.
#[derive(Debug, Clone)]
pub struct ChunkQueries {
    tables: TableNames,
}

impl ChunkQueries {
    pub fn new(tables: TableNames) -> Self {
        Self { tables }
    }

    fn select_joined(&self, similarity: &str) -> String {
        format!(
            "SELECT f.file_sha1, f.source, d.document_id, d.content, d.sha1, d.chunk_index, \
             d.page_start, d.page_end, d.page_number, d.token_count, d.section_title, \
             d.metadata, CAST({similarity} AS double precision) AS similarity \
             FROM {documents} d LEFT OUTER JOIN {files} f ON d.file_id = f.id",
            documents = self.tables.documents(),
            files = self.tables.files(),
        )
    }

    /// Binds: `$1` query vector, `$2` limit.
    pub fn nearest_by_embedding(&self) -> String {
        let cast = self.tables.vector_column().sql_type();
        let similarity = format!("1 - (d.embedding <=> CAST($1 AS {cast}))");
        format!(
            "{} WHERE d.embedding IS NOT NULL ORDER BY similarity DESC LIMIT $2",
            self.select_joined(&similarity)
        )
    }

    /// Binds: `$1` text, `$2` threshold, `$3` limit.
    pub fn similar_text_above(&self) -> String {
        // real score widens to double precision against the double bind
        format!(
            "{} WHERE similarity(d.content, $1) > $2 \
             ORDER BY similarity DESC LIMIT $3",
            self.select_joined("similarity(d.content, $1)")
        )
    }

    /// Binds: `$1` text, `$2` limit.
    pub fn similar_text(&self) -> String {
        format!(
            "{} ORDER BY similarity DESC LIMIT $2",
            self.select_joined("similarity(d.content, $1)")
        )
    }
}

/// [`ChunkStore`] over a caller-owned Postgres connection. Requires the
/// `vector` and `pg_trgm` extensions.
pub struct PgChunkStore<'a> {
    conn: &'a mut PgConnection,
    queries: ChunkQueries,
}

impl<'a> PgChunkStore<'a> {
    pub fn new(conn: &'a mut PgConnection, tables: TableNames) -> Self {
        Self {
            conn,
            queries: ChunkQueries::new(tables),
        }
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl ChunkStore for PgChunkStore<'_> {
    fn nearest_by_embedding(
        &mut self,
        query: &Vector,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        let sql = self.queries.nearest_by_embedding();
        tracing::debug!(%sql, limit, "dense chunk query");

        let rows = diesel::sql_query(sql)
            .bind::<pgvector::sql_types::Vector, _>(query.clone())
            .bind::<BigInt, _>(sql_limit(limit))
            .load::<ScoredChunkModel>(self.conn)?;

        Ok(rows.into_iter().map(ScoredChunk::from).collect())
    }

    fn most_similar_text(
        &mut self,
        text: &str,
        min_similarity: Option<f64>,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        let rows = match min_similarity {
            Some(threshold) => {
                let sql = self.queries.similar_text_above();
                tracing::debug!(%sql, threshold, limit, "trigram chunk query");
                diesel::sql_query(sql)
                    .bind::<Text, _>(text)
                    .bind::<Double, _>(threshold)
                    .bind::<BigInt, _>(sql_limit(limit))
                    .load::<ScoredChunkModel>(self.conn)?
            }
            None => {
                let sql = self.queries.similar_text();
                tracing::debug!(%sql, limit, "trigram chunk query");
                diesel::sql_query(sql)
                    .bind::<Text, _>(text)
                    .bind::<BigInt, _>(sql_limit(limit))
                    .load::<ScoredChunkModel>(self.conn)?
            }
        };

        Ok(rows.into_iter().map(ScoredChunk::from).collect())
    }
}
