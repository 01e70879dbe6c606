pub mod database;
pub mod external_services;
pub mod memory;

// Re-export commonly used items
pub use database::{PgChunkStore, TableNames, establish_connection};
pub use external_services::HttpEmbeddingProvider;
pub use memory::InMemoryChunkStore;
