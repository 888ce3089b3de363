#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("connection error: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),
    #[error("configuration error: {0}")]
    Config(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
