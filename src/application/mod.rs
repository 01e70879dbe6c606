pub mod ports;
pub mod retrievers;

// Re-export commonly used items
pub use retrievers::*;
