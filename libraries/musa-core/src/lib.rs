//! Musa Core
//!
//! Platform-agnostic core types, ports, and error handling for Musa.
//!
//! This crate provides the foundational building blocks shared by the
//! storage, metadata and playback crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `RawTrack`, `TrackTags`, `PlaylistDocument`
//! - **Ports**: `PlayerPort` (external audio engine), `DocumentStore` (persisted key-value document)
//! - **Error Handling**: Unified `MusaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use musa_core::types::{RawTrack, Track, TrackTags};
//!
//! let raw = RawTrack {
//!     path: "/music/album/song.mp3".to_string(),
//!     tags: TrackTags::default(),
//! };
//!
//! // No title tags: the file name becomes the title
//! let track = Track::from_raw(0, raw);
//! assert_eq!(track.title, "song.mp3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MusaError, Result};
pub use traits::{DocumentStore, PlayerPort};
pub use types::{
    merge_paths, tracks_from_raw, PlaylistDocument, RawTrack, Track, TrackTags,
    ACTIVE_PLAYLIST_KEY, DEFAULT_PLAYLIST, MUSICS_KEY,
};
