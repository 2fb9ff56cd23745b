//! Playlist persistence
//!
//! Playlists live in one document under [`MUSICS_KEY`]. Every operation
//! re-reads the whole document, changes one playlist, and writes the whole
//! document back. Nothing is cached between operations, and concurrent
//! writers from other processes are not detected (last writer wins).

use musa_core::{
    merge_paths, tracks_from_raw, PlaylistDocument, Track, ACTIVE_PLAYLIST_KEY, MUSICS_KEY,
};

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    manager::PlaybackManager,
    types::PlaybackState,
};

impl PlaybackManager {
    /// Read tags for `paths` and derive display tracks
    ///
    /// Does not touch state. Track ids are positions in the returned list.
    pub async fn load_tracks_for_paths(&self, paths: &[String]) -> Result<Vec<Track>> {
        let raw = self.player.list_tracks(paths).await?;
        Ok(tracks_from_raw(raw))
    }

    /// Replace the in-memory track list
    pub async fn replace_current_playlist(&self, tracks: Vec<Track>) {
        let mut inner = self.inner.lock().await;
        self.replace_tracks(&mut inner.state, tracks);
    }

    /// Append to the in-memory track list
    pub async fn append_to_current_playlist(&self, tracks: Vec<Track>) {
        let mut inner = self.inner.lock().await;
        let mut list = std::mem::take(&mut inner.state.track_list);
        list.extend(tracks);
        self.replace_tracks(&mut inner.state, list);
    }

    /// Remove every entry with the track's path and persist the result
    ///
    /// Remaining tracks are re-read from the engine rather than patched.
    pub async fn remove_track(&self, track: &Track) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let state = &mut inner.state;

        let remaining: Vec<String> = state
            .track_list
            .iter()
            .filter(|t| t.path != track.path)
            .map(|t| t.path.clone())
            .collect();

        let tracks = self.load_tracks_for_paths(&remaining).await?;
        self.replace_tracks(state, tracks);

        let mut doc = self.read_document().await?;
        doc.set_paths(&state.active_playlist, remaining);
        self.write_document(state, &doc).await?;

        tracing::debug!(path = %track.path, playlist = %state.active_playlist, "Track removed");
        Ok(())
    }

    /// Load `paths`, append them, and persist the active playlist
    ///
    /// The stored list becomes the ordered union of what was stored and
    /// what is now in memory.
    pub async fn fetch_and_persist(&self, paths: &[String]) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let state = &mut inner.state;

        let tracks = self.load_tracks_for_paths(paths).await?;
        let mut list = std::mem::take(&mut state.track_list);
        list.extend(tracks);
        self.replace_tracks(state, list);

        let mut doc = self.read_document().await?;
        let merged = merge_paths(doc.paths(&state.active_playlist), &state.track_paths());
        doc.set_paths(&state.active_playlist, merged);
        self.write_document(state, &doc).await
    }

    /// Replace the track list with the stored paths of the active playlist
    ///
    /// Re-persists the playlist afterwards, normalizing legacy entries.
    pub async fn reload_active_playlist(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let state = &mut inner.state;

        let mut doc = self.read_document().await?;
        let stored = doc.paths(&state.active_playlist).to_vec();

        let tracks = self.load_tracks_for_paths(&stored).await?;
        self.replace_tracks(state, tracks);

        let merged = merge_paths(&stored, &state.track_paths());
        doc.set_paths(&state.active_playlist, merged);
        self.write_document(state, &doc).await?;

        tracing::debug!(
            playlist = %state.active_playlist,
            tracks = state.track_list.len(),
            "Active playlist reloaded"
        );
        Ok(())
    }

    /// Make `name` the active playlist and remember it across restarts
    ///
    /// The track list is left alone; call
    /// [`reload_active_playlist`](Self::reload_active_playlist) to load it.
    pub async fn switch_active_playlist(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let mut inner = self.inner.lock().await;

        self.store
            .set(ACTIVE_PLAYLIST_KEY, serde_json::Value::String(name.to_string()))
            .await?;

        self.set_active(&mut inner.state, name);
        Ok(())
    }

    /// Adopt the remembered active playlist, if any
    ///
    /// Returns the active playlist name afterwards.
    pub async fn get_or_init_active_playlist(&self) -> Result<String> {
        let mut inner = self.inner.lock().await;

        let stored = match self.store.get(ACTIVE_PLAYLIST_KEY).await? {
            Some(serde_json::Value::String(name)) if !name.is_empty() => Some(name),
            Some(other) => {
                tracing::warn!(value = %other, "Ignoring malformed active playlist entry");
                None
            }
            None => None,
        };

        if let Some(name) = stored {
            if name != inner.state.active_playlist {
                self.set_active(&mut inner.state, &name);
            }
        }

        Ok(inner.state.active_playlist.clone())
    }

    /// Create an empty playlist unless one with that name exists
    ///
    /// Returns `true` if a playlist was created.
    pub async fn create_playlist(&self, name: &str) -> Result<bool> {
        validate_name(name)?;
        let mut inner = self.inner.lock().await;

        let mut doc = self.read_document().await?;
        let created = doc.ensure_playlist(name);
        if created {
            self.write_document(&mut inner.state, &doc).await?;
            tracing::debug!(playlist = name, "Playlist created");
        } else {
            self.set_playlist_names(&mut inner.state, doc.names());
        }

        Ok(created)
    }

    /// Reload the known playlist names from the document
    pub async fn refresh_playlist_names(&self) -> Result<Vec<String>> {
        let mut inner = self.inner.lock().await;
        let doc = self.read_document().await?;
        let names = doc.names();
        self.set_playlist_names(&mut inner.state, names.clone());
        Ok(names)
    }

    // ===== Helpers =====

    async fn read_document(&self) -> Result<PlaylistDocument> {
        let value = self.store.get(MUSICS_KEY).await?;
        Ok(PlaylistDocument::from_value(value))
    }

    /// Persist `doc` and make its keys the known playlist names
    async fn write_document(&self, state: &mut PlaybackState, doc: &PlaylistDocument) -> Result<()> {
        self.store.set(MUSICS_KEY, doc.to_value()).await?;
        self.set_playlist_names(state, doc.names());
        Ok(())
    }

    fn replace_tracks(&self, state: &mut PlaybackState, mut tracks: Vec<Track>) {
        for (index, track) in tracks.iter_mut().enumerate() {
            track.id = index;
        }
        state.track_list = tracks;

        // Keep the index pointing at the loaded track when it is still listed
        if let Some(current) = &state.current_track {
            if let Some(index) = state.index_of(&current.path, Some(state.current_index)) {
                state.current_index = index;
            }
        }

        self.emit(PlaybackEvent::TrackListUpdated {
            len: state.track_list.len(),
        });
    }

    fn set_active(&self, state: &mut PlaybackState, name: &str) {
        state.active_playlist = name.to_string();
        self.emit(PlaybackEvent::PlaylistChanged {
            name: name.to_string(),
        });
    }

    fn set_playlist_names(&self, state: &mut PlaybackState, names: Vec<String>) {
        if state.playlists != names {
            state.playlists = names.clone();
            self.emit(PlaybackEvent::PlaylistsUpdated { names });
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PlaybackError::InvalidOperation(
            "playlist name must not be empty".to_string(),
        ));
    }
    Ok(())
}
