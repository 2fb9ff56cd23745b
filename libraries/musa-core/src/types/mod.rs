//! Domain types for Musa

mod playlist;
mod track;

pub use playlist::{
    merge_paths, PlaylistDocument, ACTIVE_PLAYLIST_KEY, DEFAULT_PLAYLIST, MUSICS_KEY,
};
pub use track::{tracks_from_raw, RawTrack, Track, TrackTags};
