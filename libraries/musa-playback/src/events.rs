//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are emitted
//! after a transition has been committed to state:
//! - State changes (play/pause, track loaded)
//! - Track changes
//! - Position updates (from the heartbeat or a seek)
//! - Playlist changes

use crate::types::PlayerStatus;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Play/pause flag or loaded track changed
    StateChanged {
        /// The new status
        status: PlayerStatus,
    },

    /// A track was loaded
    TrackChanged {
        /// Path of the new (current) track
        path: String,
        /// Path of the previous track (if any)
        previous_path: Option<String>,
    },

    /// Position re-read from the engine
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Duration of the loaded track, if known
        duration_ms: Option<u64>,
    },

    /// Track reached its end
    TrackFinished {
        /// Path of the finished track
        path: String,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Playback speed changed
    SpeedChanged {
        /// New rate multiplier
        speed: f32,
    },

    /// Repeat or shuffle toggled
    ModesChanged { repeat: bool, shuffle: bool },

    /// In-memory track list replaced or extended
    TrackListUpdated {
        /// New list length
        len: usize,
    },

    /// Active playlist switched
    PlaylistChanged { name: String },

    /// Known playlist names changed
    PlaylistsUpdated { names: Vec<String> },
}
