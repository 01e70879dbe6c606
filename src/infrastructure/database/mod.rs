pub mod connection;
pub mod models;
pub mod pg_chunk_store;
pub mod tables;

pub use connection::{DatabaseError, establish_connection};
pub use pg_chunk_store::PgChunkStore;
pub use tables::{TableNames, VectorColumn};
