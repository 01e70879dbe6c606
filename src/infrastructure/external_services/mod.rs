pub mod embeddings_client;

pub use embeddings_client::{EmbeddingsClient, EmbeddingsClientConfig, HttpEmbeddingProvider};
