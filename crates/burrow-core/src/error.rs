use thiserror::Error;

/// Result type for shortcode store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("short code already exists: {0}")]
    AlreadyExists(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("no free short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    /// The expiry instant would fall outside the representable time range.
    #[error("validity of {minutes} minutes is out of range")]
    InvalidValidity { minutes: u32 },
}
