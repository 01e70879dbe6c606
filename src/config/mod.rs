pub mod settings;

pub use settings::{
    ConfigError, DatabaseSettings, EmbeddingProviderKind, EmbeddingSettings, Settings,
};

/// Dimensionality stored as `halfvec`; query vectors are truncated to it.
pub const HALF_PRECISION_DIMENSIONS: usize = 4000;

/// Dimensionality whose tables carry no `_{dimensions}` suffix.
pub const UNSUFFIXED_DIMENSIONS: usize = 2000;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
