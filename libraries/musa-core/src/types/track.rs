//! Track types
//!
//! `RawTrack` is what the audio engine reports for a file; `Track` is the
//! display form derived from it. Only `path` is stable across reloads:
//! `id` is the position in the list the track was loaded with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw tag fields reported for one file
///
/// Field names follow the tag record produced by the engine, including the
/// alternate `TrackTitle`/`TrackArtist` items read from the tag's item list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackTags {
    #[serde(default)]
    pub title: Option<String>,

    /// Alternate title item
    #[serde(rename = "TrackTitle", default)]
    pub track_title: Option<String>,

    #[serde(default)]
    pub artist: Option<String>,

    /// Alternate artist item
    #[serde(rename = "TrackArtist", default)]
    pub track_artist: Option<String>,

    #[serde(default)]
    pub album: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    /// Duration in milliseconds
    #[serde(default)]
    pub duration_ms: Option<u64>,

    /// Cover art as a data URL
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub year: Option<String>,

    #[serde(default)]
    pub track_number: Option<String>,

    #[serde(default)]
    pub total_tracks: Option<String>,

    #[serde(default)]
    pub disc_number: Option<String>,

    #[serde(default)]
    pub total_discs: Option<String>,

    #[serde(default)]
    pub composer: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    /// Every other tag item, keyed by item name (binary values elided)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub items: BTreeMap<String, String>,
}

/// A file as reported by the engine's tag reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrack {
    pub path: String,
    pub tags: TrackTags,
}

impl RawTrack {
    /// Create a record with no tags
    pub fn untagged(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tags: TrackTags::default(),
        }
    }
}

/// A playable track with derived display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Position in the list this track was loaded with (ephemeral)
    pub id: usize,

    /// Filesystem path; the only identity that survives a reload
    pub path: String,

    pub title: String,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub album: Option<String>,

    /// Duration in milliseconds, if known
    pub duration: Option<u64>,

    pub cover: Option<String>,

    /// Resolved playback URL (never resolved by this crate)
    pub url: Option<String>,
}

impl Track {
    /// Derive a track from a raw tag record
    ///
    /// Title falls back from `title` to `TrackTitle`, then to the final path
    /// segment, then to `"Music {index + 1}"`. Empty strings count as absent.
    pub fn from_raw(index: usize, raw: RawTrack) -> Self {
        let RawTrack { path, tags } = raw;

        let title = non_empty(tags.title)
            .or_else(|| non_empty(tags.track_title))
            .or_else(|| file_name(&path).map(str::to_string))
            .unwrap_or_else(|| format!("Music {}", index + 1));

        Self {
            id: index,
            title,
            artist: non_empty(tags.artist).or_else(|| non_empty(tags.track_artist)),
            genre: tags.genre,
            album: tags.album,
            duration: tags.duration_ms,
            cover: tags.cover,
            url: None,
            path,
        }
    }

    /// Whether both tracks refer to the same file
    pub fn same_path(&self, other: &Track) -> bool {
        self.path == other.path
    }
}

/// Derive display tracks from raw records, numbering them by position
pub fn tracks_from_raw(raw: Vec<RawTrack>) -> Vec<Track> {
    raw.into_iter()
        .enumerate()
        .map(|(index, raw)| Track::from_raw(index, raw))
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn file_name(path: &str) -> Option<&str> {
    path.rsplit(['/', '\\']).next().filter(|s| !s.is_empty())
}
