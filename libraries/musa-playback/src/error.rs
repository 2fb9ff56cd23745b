//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Track list is empty
    #[error("Track list is empty")]
    EmptyTrackList,

    /// Track is not part of the current track list
    #[error("Track not in current list: {0}")]
    TrackNotInList(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Engine or document store call failed
    #[error(transparent)]
    External(#[from] musa_core::MusaError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
