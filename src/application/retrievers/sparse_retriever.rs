use super::{RetrievalError, SearchParams};
use crate::domain::entities::ScoredChunk;
use crate::domain::repositories::ChunkStore;

/// Ranks chunks by trigram similarity between the question and each chunk's
/// text. No embedding is involved, so every chunk is a candidate.
pub struct SparseRetriever<S> {
    store: S,
}

impl<S: ChunkStore> SparseRetriever<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn search_default(&mut self, question: &str) -> Result<Vec<ScoredChunk>, RetrievalError> {
        self.search(question, SearchParams::sparse())
    }

    /// Fetches up to `top_k` chunks scoring strictly above
    /// `similarity_threshold`. If fewer than `min_results` come back, the store
    /// is queried again without the threshold for the best `min_results`
    /// chunks, regardless of `top_k`.
    pub fn search(
        &mut self,
        question: &str,
        params: SearchParams,
    ) -> Result<Vec<ScoredChunk>, RetrievalError> {
        let mut results = self.store.most_similar_text(
            question,
            Some(params.similarity_threshold),
            params.top_k,
        )?;

        if results.len() < params.min_results {
            tracing::debug!(
                threshold = params.similarity_threshold,
                matched = results.len(),
                min_results = params.min_results,
                "too few chunks above the similarity threshold, re-querying without it"
            );
            results = self
                .store
                .most_similar_text(question, None, params.min_results)?;
        }

        tracing::info!(retriever = "sparse", count = results.len(), "search results");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::retrievers::test_support::*;
    use crate::domain::entities::Document;
    use crate::domain::value_objects::ContentHash;
    use crate::infrastructure::memory::InMemoryChunkStore;

    fn doc(id: i64, content: &str) -> Document {
        Document::new(id, content.to_string(), ContentHash::new(CHUNK_HASH).unwrap())
    }

    #[test]
    fn test_requery_without_threshold() {
        let mut store = ScriptedStore::new(vec![scored("close", 0.35), scored("far", 0.1)]);
        let mut retriever = SparseRetriever::new(&mut store);

        let results = retriever.search_default("question").unwrap();

        assert_eq!(similarities(&results), vec![0.35, 0.1]);
        assert_eq!(
            store.calls,
            vec![
                StoreCall::Text {
                    min_similarity: Some(0.3),
                    limit: 20
                },
                StoreCall::Text {
                    min_similarity: None,
                    limit: 5
                },
            ]
        );
    }

    #[test]
    fn test_threshold_respected_when_enough_rows_qualify() {
        let rows = [0.9, 0.8, 0.7, 0.6, 0.5, 0.2, 0.1]
            .iter()
            .enumerate()
            .map(|(i, s)| scored(&format!("chunk {i}"), *s))
            .collect();
        let mut store = ScriptedStore::new(rows);
        let mut retriever = SparseRetriever::new(&mut store);

        let results = retriever.search_default("question").unwrap();

        assert_eq!(similarities(&results), vec![0.9, 0.8, 0.7, 0.6, 0.5]);
        assert_eq!(store.calls.len(), 1);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut store = ScriptedStore::new(vec![scored("edge", 0.3)]);
        let mut retriever = SparseRetriever::new(&mut store);

        let params = SearchParams::sparse().with_min_results(1);
        let results = retriever.search("question", params).unwrap();

        // 0.3 is not above the threshold, so the unfiltered re-query finds it
        assert_eq!(similarities(&results), vec![0.3]);
        assert_eq!(store.calls.len(), 2);
    }

    #[test]
    fn test_fallback_ignores_top_k() {
        let rows = (0..8).map(|i| scored("x", 0.2 - f64::from(i) * 0.01)).collect();
        let mut store = ScriptedStore::new(rows);
        let mut retriever = SparseRetriever::new(&mut store);

        let params = SearchParams::sparse().with_top_k(2).with_min_results(4);
        let results = retriever.search("question", params).unwrap();

        assert_eq!(results.len(), 4);
        assert!(results.windows(2).all(|w| w[0].similarity() >= w[1].similarity()));
    }

    #[test]
    fn test_fallback_bounded_by_total_chunks() {
        let mut store = ScriptedStore::new(vec![scored("a", 0.05), scored("b", 0.01)]);
        let mut retriever = SparseRetriever::new(&mut store);

        let results = retriever.search_default("question").unwrap();

        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_store_failure_aborts_search() {
        let mut store = ScriptedStore::failing();
        let mut retriever = SparseRetriever::new(&mut store);

        let result = retriever.search_default("question");

        assert!(matches!(result, Err(RetrievalError::Store(_))));
        assert_eq!(store.calls.len(), 1);
    }

    #[test]
    fn test_trigram_search_sees_unembedded_chunks() {
        let mut store = InMemoryChunkStore::new(2);
        store
            .insert_document(doc(1, "postgres vector search"))
            .unwrap();
        store
            .insert_document(doc(2, "banana milk"))
            .unwrap();
        store
            .insert_document(doc(3, "postgres trigram search"))
            .unwrap();
        let mut retriever = SparseRetriever::new(&mut store);

        let results = retriever.search_default("postgres search").unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].similarity() >= w[1].similarity()));
        assert_eq!(results[2].content(), "banana milk");
        assert_eq!(results[2].similarity(), 0.0);
    }
}
