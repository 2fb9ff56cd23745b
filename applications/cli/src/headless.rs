//! Player without audio output
//!
//! Reads tags from disk for `list_tracks`; every transport call fails.
//! Enough for playlist management from the command line.

use async_trait::async_trait;
use musa_core::{MusaError, PlayerPort, RawTrack, Result};
use musa_metadata::TrackScanner;

const NO_OUTPUT: &str = "no audio output attached";

#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryPlayer {
    scanner: TrackScanner,
}

impl LibraryPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerPort for LibraryPlayer {
    async fn list_tracks(&self, paths: &[String]) -> Result<Vec<RawTrack>> {
        Ok(self.scanner.scan_async(paths.to_vec()).await?)
    }

    async fn play(&self) -> Result<()> {
        Err(MusaError::player(NO_OUTPUT))
    }

    async fn load_track(&self, _path: &str) -> Result<()> {
        Err(MusaError::player(NO_OUTPUT))
    }

    async fn stop(&self) -> Result<()> {
        Err(MusaError::player(NO_OUTPUT))
    }

    async fn set_volume(&self, _volume: f32) -> Result<()> {
        Err(MusaError::player(NO_OUTPUT))
    }

    async fn set_speed(&self, _speed: f32) -> Result<()> {
        Err(MusaError::player(NO_OUTPUT))
    }

    async fn seek(&self, _seconds: f64) -> Result<()> {
        Err(MusaError::player(NO_OUTPUT))
    }

    async fn elapsed(&self) -> Result<f64> {
        Err(MusaError::player(NO_OUTPUT))
    }

    async fn waveform(&self, _path: &str, _points: usize) -> Result<Vec<f32>> {
        Err(MusaError::player(NO_OUTPUT))
    }
}
