/// Error type shared by the connection helpers.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The server did not answer the post-connect verification round trip.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
