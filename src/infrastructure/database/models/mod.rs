pub mod scored_chunk_model;

pub use scored_chunk_model::*;
