//! Core types for playback management

use musa_core::{Track, DEFAULT_PLAYLIST};
use serde::{Deserialize, Serialize};

/// Playback rate of a freshly loaded track
pub const NORMAL_SPEED: f32 = 1.0;

/// Coarse player status, derived from `(has track, is playing)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// No track loaded
    Idle,

    /// Track loaded, not playing
    Paused,

    /// Track loaded and playing
    Playing,
}

/// Direction for [`advance`](crate::PlaybackManager::advance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Following track (random when shuffle is on)
    Next,

    /// Preceding track (always sequential)
    Previous,
}

/// In-memory playback and playlist state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Loaded track (a copy of a `track_list` entry)
    pub current_track: Option<Track>,

    /// Ordered tracks of the active playlist; order defines next/previous
    pub track_list: Vec<Track>,

    pub is_playing: bool,

    /// Volume level (0-100)
    pub volume: u8,

    /// Playback rate multiplier (1.0 = normal)
    pub speed: f32,

    pub repeat: bool,
    pub shuffle: bool,

    /// Position of `current_track` in `track_list`
    pub current_index: usize,

    /// Elapsed playback position in milliseconds
    pub position_ms: u64,

    /// Playlist governing `track_list`
    pub active_playlist: String,

    /// Names of all persisted playlists
    pub playlists: Vec<String>,
}

impl PlaybackState {
    /// Initial state: no track, paused
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            current_track: None,
            track_list: Vec::new(),
            is_playing: false,
            volume: config.volume.min(100),
            speed: NORMAL_SPEED,
            repeat: config.repeat,
            shuffle: config.shuffle,
            current_index: 0,
            position_ms: 0,
            active_playlist: config.default_playlist.clone(),
            playlists: Vec::new(),
        }
    }

    pub fn status(&self) -> PlayerStatus {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlayerStatus::Idle,
            (Some(_), false) => PlayerStatus::Paused,
            (Some(_), true) => PlayerStatus::Playing,
        }
    }

    /// Index of `path` in the track list
    ///
    /// `hint` is checked first so that duplicate entries resolve to the
    /// occurrence the caller actually picked.
    pub fn index_of(&self, path: &str, hint: Option<usize>) -> Option<usize> {
        if let Some(index) = hint {
            if self.track_list.get(index).is_some_and(|t| t.path == path) {
                return Some(index);
            }
        }
        self.track_list.iter().position(|t| t.path == path)
    }

    /// Paths of the track list, in order
    pub fn track_paths(&self) -> Vec<String> {
        self.track_list.iter().map(|t| t.path.clone()).collect()
    }

    /// Duration of the loaded track, if known and non-zero
    pub fn current_duration(&self) -> Option<u64> {
        self.current_track
            .as_ref()
            .and_then(|t| t.duration)
            .filter(|d| *d > 0)
    }
}

/// Configuration for playback manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 100)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Playlist active until a persisted one is adopted (default: "all")
    #[serde(default = "default_playlist")]
    pub default_playlist: String,

    /// Position heartbeat period in milliseconds (default: 100)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Initial repeat flag (default: false)
    #[serde(default)]
    pub repeat: bool,

    /// Initial shuffle flag (default: false)
    #[serde(default)]
    pub shuffle: bool,
}

fn default_volume() -> u8 {
    100
}

fn default_playlist() -> String {
    DEFAULT_PLAYLIST.to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            default_playlist: default_playlist(),
            poll_interval_ms: default_poll_interval_ms(),
            repeat: false,
            shuffle: false,
        }
    }
}
