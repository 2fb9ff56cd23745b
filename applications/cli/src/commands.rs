//! Playlist management commands

use crate::error::{CliError, Result};
use clap::Subcommand;
use musa_core::Track;
use musa_playback::PlaybackManager;
use std::io::Write;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List playlists (the active one is starred)
    Playlists,
    /// Create an empty playlist
    Create {
        /// Playlist name
        name: String,
    },
    /// Make a playlist active
    Switch {
        /// Playlist name
        name: String,
    },
    /// Show the tracks of the active playlist
    Show,
    /// Add files or directories to the active playlist
    Add {
        /// Files or directories (scanned recursively)
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Remove a track from the active playlist
    Remove {
        /// Path of the track, as listed by `show`
        path: String,
    },
    /// Re-read tags of the active playlist and rewrite it
    Reload,
}

/// Adopt the remembered playlist and load the known names
pub async fn prepare(manager: &PlaybackManager) -> Result<String> {
    let active = manager.get_or_init_active_playlist().await?;
    manager.refresh_playlist_names().await?;
    tracing::debug!(playlist = %active, "Active playlist");
    Ok(active)
}

/// Run one command, writing its report to `out`
pub async fn run(manager: &PlaybackManager, command: Command, out: &mut impl Write) -> Result<()> {
    prepare(manager).await?;

    match command {
        Command::Playlists => {
            let state = manager.snapshot().await;
            for name in &state.playlists {
                let marker = if *name == state.active_playlist { '*' } else { ' ' };
                writeln!(out, "{} {}", marker, name)?;
            }
        }
        Command::Create { name } => {
            if manager.create_playlist(&name).await? {
                writeln!(out, "Created playlist {}", name)?;
            } else {
                writeln!(out, "Playlist {} already exists", name)?;
            }
        }
        Command::Switch { name } => {
            manager.switch_active_playlist(&name).await?;
            manager.reload_active_playlist().await?;
            let state = manager.snapshot().await;
            writeln!(
                out,
                "Switched to {} ({} tracks)",
                state.active_playlist,
                state.track_list.len()
            )?;
        }
        Command::Show => {
            manager.reload_active_playlist().await?;
            let state = manager.snapshot().await;
            writeln!(out, "{}:", state.active_playlist)?;
            for track in &state.track_list {
                writeln!(out, "{}", format_track(track))?;
            }
        }
        Command::Add { paths } => {
            manager.reload_active_playlist().await?;
            let before = manager.snapshot().await.track_list.len();

            manager.fetch_and_persist(&paths).await?;

            let state = manager.snapshot().await;
            writeln!(
                out,
                "Added {} tracks to {}",
                state.track_list.len() - before,
                state.active_playlist
            )?;
        }
        Command::Remove { path } => {
            manager.reload_active_playlist().await?;
            let state = manager.snapshot().await;

            let Some(track) = state.track_list.iter().find(|t| t.path == path) else {
                return Err(CliError::UnknownTrack {
                    playlist: state.active_playlist,
                    path,
                });
            };

            manager.remove_track(track).await?;
            writeln!(out, "Removed {}", path)?;
        }
        Command::Reload => {
            manager.reload_active_playlist().await?;
            let state = manager.snapshot().await;
            writeln!(
                out,
                "Reloaded {} ({} tracks)",
                state.active_playlist,
                state.track_list.len()
            )?;
        }
    }

    Ok(())
}

/// One line per track: position, title, artist, duration, path
pub fn format_track(track: &Track) -> String {
    let mut line = format!("{:>3}. {}", track.id + 1, track.title);
    if let Some(artist) = &track.artist {
        line.push_str(" - ");
        line.push_str(artist);
    }
    if let Some(duration) = track.duration.filter(|d| *d > 0) {
        let seconds = duration / 1000;
        line.push_str(&format!(" [{}:{:02}]", seconds / 60, seconds % 60));
    }
    line.push_str("  ");
    line.push_str(&track.path);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use musa_core::{RawTrack, TrackTags};

    #[test]
    fn formats_known_fields() {
        let track = Track::from_raw(
            1,
            RawTrack {
                path: "/m/song.flac".to_string(),
                tags: TrackTags {
                    title: Some("Song".to_string()),
                    artist: Some("Band".to_string()),
                    duration_ms: Some(125_400),
                    ..TrackTags::default()
                },
            },
        );

        assert_eq!(format_track(&track), "  2. Song - Band [2:05]  /m/song.flac");
    }

    #[test]
    fn formats_untagged_track() {
        let track = Track::from_raw(0, RawTrack::untagged("/m/raw.wav"));
        assert_eq!(format_track(&track), "  1. raw.wav  /m/raw.wav");
    }
}
