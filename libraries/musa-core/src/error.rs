/// Core error types for Musa
use thiserror::Error;

/// Result type alias using `MusaError`
pub type Result<T> = std::result::Result<T, MusaError>;

/// Core error type for Musa
#[derive(Error, Debug)]
pub enum MusaError {
    /// Audio engine call failed (I/O, decode, device errors)
    #[error("Player error: {0}")]
    Player(String),

    /// Persisted document storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Tag reading failed
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MusaError {
    /// Create a player error
    pub fn player(msg: impl Into<String>) -> Self {
        Self::Player(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_constructors_format_messages() {
        assert_eq!(
            MusaError::player("device lost").to_string(),
            "Player error: device lost"
        );
        assert_eq!(
            MusaError::storage("disk full").to_string(),
            "Storage error: disk full"
        );
        assert_eq!(
            MusaError::invalid_input("empty name").to_string(),
            "Invalid input: empty name"
        );
    }
}
