/// Ports to the collaborators Musa does not own
use crate::error::Result;
use crate::types::RawTrack;
use async_trait::async_trait;

/// External audio engine
///
/// Every call may suspend and may fail. Implementations decide how the
/// engine is reached (in-process sink, IPC bridge, remote device); the
/// playback state machine only relies on the contract below.
#[async_trait]
pub trait PlayerPort: Send + Sync {
    /// Read tags for the given filesystem paths
    ///
    /// Returns one record per playable file. Tag fields are optional.
    async fn list_tracks(&self, paths: &[String]) -> Result<Vec<RawTrack>>;

    /// Resume the loaded track
    async fn play(&self) -> Result<()>;

    /// Load a new track; must precede `play` for a new track
    async fn load_track(&self, path: &str) -> Result<()>;

    /// Stop (pause) output
    async fn stop(&self) -> Result<()>;

    /// Set output volume
    ///
    /// # Arguments
    /// * `volume` - Linear volume in `[0.0, 1.0]`
    async fn set_volume(&self, volume: f32) -> Result<()>;

    /// Set playback speed of the loaded track
    ///
    /// # Arguments
    /// * `speed` - Rate multiplier, `1.0` is normal speed
    async fn set_speed(&self, speed: f32) -> Result<()>;

    /// Seek the loaded track
    ///
    /// # Arguments
    /// * `seconds` - Target position from start of track
    async fn seek(&self, seconds: f64) -> Result<()>;

    /// Elapsed playback time of the loaded track, in seconds
    async fn elapsed(&self) -> Result<f64>;

    /// Downsampled waveform of a file, for visualization
    async fn waveform(&self, path: &str, points: usize) -> Result<Vec<f32>>;
}

/// Persisted key-value document
///
/// One instance addresses one named document. `set` replaces the whole
/// value stored under the key; there is no partial update and no
/// concurrency control (last writer wins).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Get the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}
