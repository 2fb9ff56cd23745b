//! Playback manager - core orchestration
//!
//! Coordinates the track list, play/pause flag, volume, repeat/shuffle and
//! playback position with the audio engine and the playlist document.
//!
//! All state sits behind one async mutex that every operation holds for its
//! whole duration, engine calls included. Two operations on the same
//! manager therefore never interleave: a heartbeat poll that is waiting on
//! the engine cannot overwrite the position of a track selected meanwhile.
//!
//! Engine calls are awaited before state is committed, with one exception
//! kept from the player contract: `play`/`pause` flip `is_playing` first and
//! leave it flipped when the engine call fails. The error is still returned.

use std::sync::Arc;

use musa_core::{DocumentStore, PlayerPort, Track};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{broadcast, Mutex};

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    types::{Direction, PlaybackConfig, PlaybackState, PlayerStatus, NORMAL_SPEED},
};

/// Capacity of the event channel; slow subscribers lose the oldest events
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Mutable part of the manager, guarded by one lock
pub(crate) struct Inner {
    pub(crate) state: PlaybackState,
    rng: StdRng,
}

/// Playback and playlist state machine
///
/// Construct one per player at the application root and share it with
/// `Arc`. The engine and the document store are injected.
pub struct PlaybackManager {
    pub(crate) player: Arc<dyn PlayerPort>,
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) inner: Mutex<Inner>,
    events: broadcast::Sender<PlaybackEvent>,
    config: PlaybackConfig,
}

impl PlaybackManager {
    /// Create a new playback manager
    pub fn new(
        player: Arc<dyn PlayerPort>,
        store: Arc<dyn DocumentStore>,
        config: PlaybackConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            player,
            store,
            inner: Mutex::new(Inner {
                state: PlaybackState::new(&config),
                rng: StdRng::from_entropy(),
            }),
            events,
            config,
        }
    }

    /// Replace the random source used for shuffle
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.inner.get_mut().rng = rng;
        self
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Subscribe to playback events
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Copy of the current state
    ///
    /// Waits for any operation in flight, so the copy never shows a
    /// half-applied transition.
    pub async fn snapshot(&self) -> PlaybackState {
        self.inner.lock().await.state.clone()
    }

    pub async fn status(&self) -> PlayerStatus {
        self.inner.lock().await.state.status()
    }

    // ===== Track selection =====

    /// Load `track` and start playing it
    ///
    /// Selecting always starts playback. The track must be in the current
    /// track list; its `id` is used to tell duplicate entries apart.
    pub async fn select_track(&self, track: &Track) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let hint = Some(track.id);
        self.select_locked(&mut inner, track.clone(), hint).await
    }

    pub(crate) async fn select_locked(
        &self,
        inner: &mut Inner,
        track: Track,
        hint: Option<usize>,
    ) -> Result<()> {
        let state = &mut inner.state;
        let index = state
            .index_of(&track.path, hint)
            .ok_or_else(|| PlaybackError::TrackNotInList(track.path.clone()))?;

        self.player.load_track(&track.path).await?;
        self.player.set_volume(engine_volume(state.volume)).await?;
        if state.speed != NORMAL_SPEED {
            self.player.set_speed(state.speed).await?;
        }

        tracing::debug!(path = %track.path, index, "Track selected");

        let path = track.path.clone();
        let previous = state.current_track.replace(track);
        state.position_ms = 0;
        state.current_index = index;
        state.is_playing = true;

        self.emit(PlaybackEvent::TrackChanged {
            path,
            previous_path: previous.map(|t| t.path),
        });
        self.emit(PlaybackEvent::StateChanged {
            status: state.status(),
        });
        Ok(())
    }

    /// Move to the next or previous track and select it
    ///
    /// `Next` picks a uniformly random index when shuffle is on (the current
    /// track may be picked again). `Previous` is always sequential.
    pub async fn advance(&self, direction: Direction) -> Result<Track> {
        let mut inner = self.inner.lock().await;
        self.advance_locked(&mut inner, direction).await
    }

    /// Shorthand for `advance(Direction::Next)`
    pub async fn next(&self) -> Result<Track> {
        self.advance(Direction::Next).await
    }

    /// Shorthand for `advance(Direction::Previous)`
    pub async fn previous(&self) -> Result<Track> {
        self.advance(Direction::Previous).await
    }

    async fn advance_locked(&self, inner: &mut Inner, direction: Direction) -> Result<Track> {
        let len = inner.state.track_list.len();
        if len == 0 {
            return Err(PlaybackError::EmptyTrackList);
        }

        let current = inner.state.current_index;
        let index = match direction {
            Direction::Next if inner.state.shuffle => inner.rng.gen_range(0..len),
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current % len + len - 1) % len,
        };

        let track = inner.state.track_list[index].clone();
        self.select_locked(inner, track.clone(), Some(index)).await?;
        Ok(track)
    }

    // ===== Transport =====

    /// Resume playback
    pub async fn play(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.state.is_playing = true;
        self.emit(PlaybackEvent::StateChanged {
            status: inner.state.status(),
        });

        self.player.play().await?;
        Ok(())
    }

    /// Pause playback
    pub async fn pause(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.state.is_playing = false;
        self.emit(PlaybackEvent::StateChanged {
            status: inner.state.status(),
        });

        self.player.stop().await?;
        Ok(())
    }

    /// Seek the loaded track
    ///
    /// The position stored afterwards is the one the engine reports, which
    /// may differ from `target_ms` (engines snap to frame boundaries).
    pub async fn seek(&self, target_ms: u64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.state.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        self.player.seek(target_ms as f64 / 1000.0).await?;
        let elapsed = self.player.elapsed().await?;

        inner.state.position_ms = seconds_to_ms(elapsed);
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms: inner.state.position_ms,
            duration_ms: inner.state.current_duration(),
        });
        Ok(())
    }

    /// Set volume (0-100, larger values are clamped)
    pub async fn set_volume(&self, level: u8) -> Result<()> {
        let level = level.min(100);
        let mut inner = self.inner.lock().await;

        self.player.set_volume(engine_volume(level)).await?;

        inner.state.volume = level;
        self.emit(PlaybackEvent::VolumeChanged { level });
        Ok(())
    }

    /// Set playback speed (rate multiplier, must be positive)
    ///
    /// Loading a track resets the engine to normal speed; any other speed
    /// is re-applied on every selection.
    pub async fn set_speed(&self, speed: f32) -> Result<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(PlaybackError::InvalidOperation(format!(
                "invalid playback speed: {}",
                speed
            )));
        }
        let mut inner = self.inner.lock().await;

        self.player.set_speed(speed).await?;

        inner.state.speed = speed;
        self.emit(PlaybackEvent::SpeedChanged { speed });
        Ok(())
    }

    pub async fn toggle_repeat(&self) -> bool {
        let mut inner = self.inner.lock().await;
        inner.state.repeat = !inner.state.repeat;
        self.emit_modes(&inner.state);
        inner.state.repeat
    }

    pub async fn toggle_shuffle(&self) -> bool {
        let mut inner = self.inner.lock().await;
        inner.state.shuffle = !inner.state.shuffle;
        self.emit_modes(&inner.state);
        inner.state.shuffle
    }

    // ===== Position heartbeat =====

    /// Refresh the playback position
    ///
    /// Call periodically (see [`PositionTicker`](crate::PositionTicker)).
    /// Returns `true` while the loaded track is playing and its position
    /// was refreshed. When the position has reached the track duration the
    /// track is finished (repeat or advance) and `false` is returned.
    /// Tracks with an unknown duration are never polled.
    pub async fn poll_position(&self) -> Result<bool> {
        let mut inner = self.inner.lock().await;

        let Some(duration) = inner.state.current_duration() else {
            return Ok(false);
        };

        if inner.state.position_ms >= duration {
            if let Some(track) = &inner.state.current_track {
                self.emit(PlaybackEvent::TrackFinished {
                    path: track.path.clone(),
                });
            }
            self.finish_locked(&mut inner).await?;
            return Ok(false);
        }

        if !inner.state.is_playing {
            return Ok(false);
        }

        let elapsed = self.player.elapsed().await?;
        inner.state.position_ms = seconds_to_ms(elapsed);
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms: inner.state.position_ms,
            duration_ms: Some(duration),
        });
        Ok(true)
    }

    /// Handle the end of the loaded track
    ///
    /// With repeat on, the same track restarts from zero; otherwise the
    /// next track is selected.
    pub async fn on_track_finished(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.finish_locked(&mut inner).await
    }

    async fn finish_locked(&self, inner: &mut Inner) -> Result<()> {
        if inner.state.repeat {
            if let Some(track) = inner.state.current_track.clone() {
                let hint = Some(inner.state.current_index);
                return self.select_locked(inner, track, hint).await;
            }
        }

        self.advance_locked(inner, Direction::Next).await.map(|_| ())
    }

    // ===== Visualization =====

    /// Waveform of the loaded track
    pub async fn current_waveform(&self, points: usize) -> Result<Vec<f32>> {
        let path = {
            let inner = self.inner.lock().await;
            inner
                .state
                .current_track
                .as_ref()
                .map(|t| t.path.clone())
                .ok_or(PlaybackError::NoTrackLoaded)?
        };

        Ok(self.player.waveform(&path, points).await?)
    }

    // ===== Events =====

    pub(crate) fn emit(&self, event: PlaybackEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn emit_modes(&self, state: &PlaybackState) {
        self.emit(PlaybackEvent::ModesChanged {
            repeat: state.repeat,
            shuffle: state.shuffle,
        });
    }
}

/// 0-100 level to the engine's 0.0-1.0 range
fn engine_volume(level: u8) -> f32 {
    f32::from(level) / 100.0
}

/// Engine seconds to whole milliseconds (floor)
fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).floor().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_volume_scales_to_unit_range() {
        assert_eq!(engine_volume(0), 0.0);
        assert_eq!(engine_volume(60), 0.6);
        assert_eq!(engine_volume(100), 1.0);
    }

    #[test]
    fn seconds_are_floored_to_milliseconds() {
        assert_eq!(seconds_to_ms(1.2345), 1234);
        assert_eq!(seconds_to_ms(0.0), 0);
        assert_eq!(seconds_to_ms(-0.5), 0);
    }
}
