pub mod in_memory_chunk_store;
pub mod trigram;

pub use in_memory_chunk_store::InMemoryChunkStore;
