//! Path expansion for tag reading
//!
//! Input paths may be files or directories. Directories are walked
//! recursively; only files with a known audio extension are read. Paths
//! that do not exist are skipped, so stale playlist entries never fail a
//! whole listing.

use crate::error::{MetadataError, Result};
use crate::reader::LoftyTagReader;
use musa_core::RawTrack;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as audio (compared case-insensitively)
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "wav", "ogg", "m4a", "aac", "wma", "opus", "aiff", "alac", "mpc",
];

/// Whether `path` has an audio extension
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expands paths and reads their tags
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackScanner {
    reader: LoftyTagReader,
}

impl TrackScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Audio files reachable from `paths`, in input order
    ///
    /// Directory contents are sorted by file name.
    pub fn expand(&self, paths: &[String]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for root in paths {
            let root = Path::new(root);

            if !root.exists() {
                tracing::warn!(path = %root.display(), "Skipping missing path");
                continue;
            }

            if root.is_dir() {
                files.extend(
                    WalkDir::new(root)
                        .follow_links(false)
                        .sort_by_file_name()
                        .into_iter()
                        .filter_map(std::result::Result::ok)
                        .filter(|e| e.file_type().is_file())
                        .map(walkdir::DirEntry::into_path)
                        .filter(|p| is_audio_file(p)),
                );
            } else if root.is_file() && is_audio_file(root) {
                files.push(root.to_path_buf());
            }
        }

        files
    }

    /// Tag records for every audio file reachable from `paths`
    pub fn scan(&self, paths: &[String]) -> Vec<RawTrack> {
        self.expand(paths)
            .iter()
            .map(|path| self.reader.read_or_untagged(path))
            .collect()
    }

    /// Run [`scan`](Self::scan) on the blocking thread pool
    pub async fn scan_async(&self, paths: Vec<String>) -> Result<Vec<RawTrack>> {
        let scanner = *self;
        tokio::task::spawn_blocking(move || scanner.scan(&paths))
            .await
            .map_err(|e| MetadataError::Task(e.to_string()))
    }
}
