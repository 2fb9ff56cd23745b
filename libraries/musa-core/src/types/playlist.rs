//! Persisted playlist document
//!
//! The document store holds two keys: [`MUSICS_KEY`] maps playlist names to
//! ordered path lists, [`ACTIVE_PLAYLIST_KEY`] holds the name of the last
//! active playlist.

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Key of the playlist-name -> path-list mapping
pub const MUSICS_KEY: &str = "musics";

/// Key of the last active playlist name
pub const ACTIVE_PLAYLIST_KEY: &str = "playlist";

/// Playlist active on first start
pub const DEFAULT_PLAYLIST: &str = "all";

/// Playlist name -> ordered track paths
///
/// Stale paths (files that no longer exist) are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistDocument {
    playlists: BTreeMap<String, Vec<String>>,
}

impl PlaylistDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the stored value, defaulting to an empty document
    ///
    /// Entries stored as index-keyed objects (`{"0": "a", "1": "b"}`) are
    /// read back in index order. Entries of any other shape are dropped.
    pub fn from_value(value: Option<Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        let Value::Object(entries) = value else {
            tracing::warn!("Playlist document is not an object, starting empty");
            return Self::default();
        };

        let mut playlists = BTreeMap::new();
        for (name, entry) in entries {
            match decode_paths(entry) {
                Some(paths) => {
                    playlists.insert(name, paths);
                }
                None => {
                    tracing::warn!(playlist = %name, "Dropping malformed playlist entry");
                }
            }
        }

        Self { playlists }
    }

    /// Encode for storage
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.playlists
                .iter()
                .map(|(name, paths)| {
                    (
                        name.clone(),
                        Value::Array(paths.iter().cloned().map(Value::String).collect()),
                    )
                })
                .collect(),
        )
    }

    /// Paths stored for `name` (empty if the playlist does not exist)
    pub fn paths(&self, name: &str) -> &[String] {
        self.playlists.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a playlist entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.playlists.contains_key(name)
    }

    /// Replace the paths stored for `name`
    pub fn set_paths(&mut self, name: &str, paths: Vec<String>) {
        self.playlists.insert(name.to_string(), paths);
    }

    /// Insert an empty playlist unless one exists
    ///
    /// Returns `true` if the playlist was created.
    pub fn ensure_playlist(&mut self, name: &str) -> bool {
        if self.playlists.contains_key(name) {
            return false;
        }
        self.playlists.insert(name.to_string(), Vec::new());
        true
    }

    /// Playlist names in document order
    pub fn names(&self) -> Vec<String> {
        self.playlists.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

/// Ordered union of two path lists
///
/// Keeps `persisted` order, then appends paths from `current` not seen yet.
/// Duplicates within either list collapse to their first occurrence.
pub fn merge_paths(persisted: &[String], current: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(persisted.len() + current.len());
    persisted
        .iter()
        .chain(current)
        .filter(|path| seen.insert(*path))
        .cloned()
        .collect()
}

fn decode_paths(entry: Value) -> Option<Vec<String>> {
    match entry {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(path) => Some(path),
                _ => None,
            })
            .collect(),
        Value::Object(indexed) => {
            let mut items = indexed
                .into_iter()
                .map(|(index, item)| match (index.parse::<usize>(), item) {
                    (Ok(index), Value::String(path)) => Some((index, path)),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            items.sort_by_key(|(index, _)| *index);
            Some(items.into_iter().map(|(_, path)| path).collect())
        }
        _ => None,
    }
}
