//! Musa Metadata
//!
//! Tag reading for the engine's `list-tracks` capability.
//!
//! This crate provides:
//! - Tag reading from audio files (title, artist, album, genre, duration, cover)
//! - Expansion of input paths (files and directories) into audio files
//!
//! # Example
//!
//! ```rust,no_run
//! use musa_metadata::TrackScanner;
//!
//! let scanner = TrackScanner::new();
//! let tracks = scanner.scan(&["/music".to_string()]);
//! for track in tracks {
//!     println!("{} -> {:?}", track.path, track.tags.title);
//! }
//! ```

mod error;
mod reader;
mod scanner;

pub use error::{MetadataError, Result};
pub use reader::LoftyTagReader;
pub use scanner::{is_audio_file, TrackScanner, AUDIO_EXTENSIONS};
