pub mod document;
pub mod file;
pub mod scored_chunk;

pub use document::Document;
pub use file::File;
pub use scored_chunk::{ScoredChunk, ScoredChunkParts};
