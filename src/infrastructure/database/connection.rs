use diesel::{Connection, PgConnection};

use crate::config::{ConfigError, DatabaseSettings};

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(#[from] diesel::result::ConnectionError),
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),
}

/// Opens a single connection. Its lifecycle belongs to the caller; retrievers
/// only borrow it.
pub fn establish_connection(settings: &DatabaseSettings) -> Result<PgConnection, DatabaseError> {
    let database_url = settings.connection_url()?;
    let conn = PgConnection::establish(&database_url)?;
    tracing::debug!(host = %settings.host, database = %settings.database, "connected to postgres");
    Ok(conn)
}
