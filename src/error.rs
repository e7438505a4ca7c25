use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A market-data or sentiment collaborator failed for one symbol.
    #[error("Collaborator error for {symbol}: {message}")]
    Collaborator { symbol: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Build a collaborator error for a symbol.
    pub fn collaborator(symbol: &str, message: impl Into<String>) -> Self {
        AppError::Collaborator {
            symbol: symbol.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
