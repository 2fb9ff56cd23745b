//! Musa - Playback Management
//!
//! Playback and playlist state for the Musa player.
//!
//! This crate provides:
//! - Track selection, play/pause, seek and volume against an external engine
//! - Next/previous with repeat and shuffle
//! - Position polling with end-of-track handling
//! - Playlist persistence in a key-value document
//! - Panel visibility state for the player layout
//!
//! # Architecture
//!
//! `musa-playback` owns no audio output and no storage:
//! - The engine is reached through [`musa_core::PlayerPort`]
//! - Playlists are persisted through [`musa_core::DocumentStore`]
//! - The position heartbeat is a separate [`PositionTicker`] owned by the caller
//!
//! # Example
//!
//! ```rust,no_run
//! use musa_core::{DocumentStore, PlayerPort};
//! use musa_playback::{PlaybackConfig, PlaybackManager, PositionTicker};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     player: Arc<dyn PlayerPort>,
//! #     store: Arc<dyn DocumentStore>,
//! # ) -> musa_playback::Result<()> {
//! let manager = Arc::new(PlaybackManager::new(player, store, PlaybackConfig::default()));
//!
//! // Restore the last playlist and its tracks
//! manager.get_or_init_active_playlist().await?;
//! manager.refresh_playlist_names().await?;
//! manager.reload_active_playlist().await?;
//!
//! // Start at the first track and keep the position fresh
//! if let Some(first) = manager.snapshot().await.track_list.first().cloned() {
//!     manager.select_track(&first).await?;
//! }
//! let _ticker = PositionTicker::spawn_with_config(Arc::clone(&manager));
//! # Ok(())
//! # }
//! ```

mod error;
mod events;
mod layout;
mod manager;
mod playlists;
mod ticker;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use layout::LayoutState;
pub use manager::PlaybackManager;
pub use ticker::PositionTicker;
pub use types::{Direction, PlaybackConfig, PlaybackState, PlayerStatus, NORMAL_SPEED};
