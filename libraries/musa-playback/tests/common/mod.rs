//! Shared fixtures for playback integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use musa_core::{MusaError, PlayerPort, RawTrack, Track, TrackTags};
use musa_playback::{PlaybackConfig, PlaybackManager};
use musa_storage::MemoryDocumentStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Duration reported for every track unless overridden
pub const DEFAULT_DURATION_MS: u64 = 180_000;

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListTracks(Vec<String>),
    Play,
    LoadTrack(String),
    Stop,
    SetVolume(f32),
    SetSpeed(f32),
    Seek(f64),
    Elapsed,
    Waveform(String, usize),
}

/// Scripted engine recording every call
///
/// `seek` lands on whole seconds, so the position read back after a seek
/// differs from the requested one the way real decoders snap to frames.
/// `load_track` and `elapsed` yield to the scheduler first, leaving room
/// for other tasks to run in between.
#[derive(Default)]
pub struct FakePlayer {
    calls: Mutex<Vec<Call>>,
    elapsed: Mutex<f64>,
    elapsed_on_load: Mutex<HashMap<String, f64>>,
    durations: Mutex<HashMap<String, Option<u64>>>,
    missing: Mutex<HashSet<String>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl FakePlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn set_elapsed(&self, seconds: f64) {
        *self.elapsed.lock().unwrap() = seconds;
    }

    /// Elapsed time reported right after `path` is loaded (default 0)
    pub fn set_elapsed_on_load(&self, path: &str, seconds: f64) {
        self.elapsed_on_load
            .lock()
            .unwrap()
            .insert(path.to_string(), seconds);
    }

    pub fn set_duration(&self, path: &str, duration_ms: Option<u64>) {
        self.durations
            .lock()
            .unwrap()
            .insert(path.to_string(), duration_ms);
    }

    /// Leave `path` out of `list_tracks` results (file deleted on disk)
    pub fn forget(&self, path: &str) {
        self.missing.lock().unwrap().insert(path.to_string());
    }

    /// Make every call to `operation` fail ("play", "stop", "load_track", ...)
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    fn record(&self, call: Call, operation: &'static str) -> musa_core::Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(MusaError::player(format!("{} failed", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl PlayerPort for FakePlayer {
    async fn list_tracks(&self, paths: &[String]) -> musa_core::Result<Vec<RawTrack>> {
        self.record(Call::ListTracks(paths.to_vec()), "list_tracks")?;

        let durations = self.durations.lock().unwrap();
        let missing = self.missing.lock().unwrap();
        Ok(paths
            .iter()
            .filter(|p| !missing.contains(*p))
            .map(|path| RawTrack {
                path: path.clone(),
                tags: TrackTags {
                    duration_ms: durations
                        .get(path)
                        .copied()
                        .unwrap_or(Some(DEFAULT_DURATION_MS)),
                    ..TrackTags::default()
                },
            })
            .collect())
    }

    async fn play(&self) -> musa_core::Result<()> {
        self.record(Call::Play, "play")
    }

    async fn load_track(&self, path: &str) -> musa_core::Result<()> {
        tokio::task::yield_now().await;
        self.record(Call::LoadTrack(path.to_string()), "load_track")?;
        let start = self
            .elapsed_on_load
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0.0);
        *self.elapsed.lock().unwrap() = start;
        Ok(())
    }

    async fn stop(&self) -> musa_core::Result<()> {
        self.record(Call::Stop, "stop")
    }

    async fn set_volume(&self, volume: f32) -> musa_core::Result<()> {
        self.record(Call::SetVolume(volume), "set_volume")
    }

    async fn set_speed(&self, speed: f32) -> musa_core::Result<()> {
        self.record(Call::SetSpeed(speed), "set_speed")
    }

    async fn seek(&self, seconds: f64) -> musa_core::Result<()> {
        self.record(Call::Seek(seconds), "seek")?;
        *self.elapsed.lock().unwrap() = seconds.floor();
        Ok(())
    }

    async fn elapsed(&self) -> musa_core::Result<f64> {
        tokio::task::yield_now().await;
        self.record(Call::Elapsed, "elapsed")?;
        Ok(*self.elapsed.lock().unwrap())
    }

    async fn waveform(&self, path: &str, points: usize) -> musa_core::Result<Vec<f32>> {
        self.record(Call::Waveform(path.to_string(), points), "waveform")?;
        Ok(vec![0.5; points])
    }
}

/// Manager wired to a fake engine and an in-memory document
pub struct Harness {
    pub manager: Arc<PlaybackManager>,
    pub player: Arc<FakePlayer>,
    pub store: Arc<MemoryDocumentStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryDocumentStore::new())
    }

    pub fn with_store(store: MemoryDocumentStore) -> Self {
        let player = FakePlayer::new();
        let store = Arc::new(store);
        let manager = PlaybackManager::new(player.clone(), store.clone(), PlaybackConfig::default())
            .with_rng(StdRng::seed_from_u64(7));

        Self {
            manager: Arc::new(manager),
            player,
            store,
        }
    }

    /// Put tracks for `paths` in memory (nothing persisted)
    pub async fn with_tracks(self, paths: &[&str]) -> Self {
        let tracks = self
            .manager
            .load_tracks_for_paths(&strings(paths))
            .await
            .unwrap();
        self.manager.replace_current_playlist(tracks).await;
        self.player.clear_calls();
        self
    }

    pub async fn track(&self, index: usize) -> Track {
        self.manager.snapshot().await.track_list[index].clone()
    }

    pub async fn current_path(&self) -> Option<String> {
        self.manager.snapshot().await.current_track.map(|t| t.path)
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
