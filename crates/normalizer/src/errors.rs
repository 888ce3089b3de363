#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("{0}")]
    Shape(#[from] serde_json::Error),
    #[error("`{field}` holds {millis} ms, outside the representable time range")]
    TimestampOutOfRange { field: &'static str, millis: i64 },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
