//! Playlist persistence tests

mod common;

use common::{strings, Call, Harness};
use musa_core::{DocumentStore, ACTIVE_PLAYLIST_KEY, MUSICS_KEY};
use musa_playback::{PlaybackError, PlaybackEvent};
use musa_storage::MemoryDocumentStore;
use serde_json::{json, Value};

fn stored(entries: Value) -> Harness {
    Harness::with_store(MemoryDocumentStore::with_entries([(MUSICS_KEY, entries)]))
}

async fn musics(h: &Harness) -> Value {
    h.store.get(MUSICS_KEY).await.unwrap().unwrap_or(Value::Null)
}

async fn list_paths(h: &Harness) -> Vec<String> {
    h.manager.snapshot().await.track_paths()
}

#[tokio::test]
async fn reload_loads_stored_paths_in_order() {
    let h = stored(json!({"all": ["c", "a", "b"]}));

    h.manager.reload_active_playlist().await.unwrap();

    let state = h.manager.snapshot().await;
    assert_eq!(state.track_paths(), strings(&["c", "a", "b"]));
    assert_eq!(
        state.track_list.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(state.playlists, strings(&["all"]));
}

#[tokio::test]
async fn reload_of_missing_document_is_empty() {
    let h = Harness::new();

    h.manager.reload_active_playlist().await.unwrap();

    assert!(list_paths(&h).await.is_empty());
    assert_eq!(musics(&h).await, json!({"all": []}));
}

#[tokio::test]
async fn reload_keeps_stale_paths_in_storage() {
    let h = stored(json!({"all": ["a", "gone", "b"]}));
    h.player.forget("gone");

    h.manager.reload_active_playlist().await.unwrap();

    assert_eq!(list_paths(&h).await, strings(&["a", "b"]));
    assert_eq!(musics(&h).await, json!({"all": ["a", "gone", "b"]}));
}

#[tokio::test]
async fn reload_normalizes_index_keyed_entries() {
    let h = stored(json!({"all": {"1": "b", "0": "a"}}));

    h.manager.reload_active_playlist().await.unwrap();

    assert_eq!(list_paths(&h).await, strings(&["a", "b"]));
    assert_eq!(musics(&h).await, json!({"all": ["a", "b"]}));
}

#[tokio::test]
async fn remove_persists_remaining_paths() {
    let h = stored(json!({"all": ["a", "b", "c"], "rock": ["b"]}));
    h.manager.reload_active_playlist().await.unwrap();
    let b = h.track(1).await;

    h.manager.remove_track(&b).await.unwrap();

    assert_eq!(list_paths(&h).await, strings(&["a", "c"]));
    assert_eq!(musics(&h).await, json!({"all": ["a", "c"], "rock": ["b"]}));
    assert_eq!(
        h.manager.snapshot().await.playlists,
        strings(&["all", "rock"])
    );
}

#[tokio::test]
async fn remove_drops_every_entry_with_the_path() {
    let h = stored(json!({"all": ["a", "b", "a"]}));
    h.manager.reload_active_playlist().await.unwrap();
    let a = h.track(2).await;

    h.manager.remove_track(&a).await.unwrap();

    assert_eq!(list_paths(&h).await, strings(&["b"]));
    assert_eq!(musics(&h).await, json!({"all": ["b"]}));
}

#[tokio::test]
async fn remove_keeps_index_on_the_loaded_track() {
    let h = stored(json!({"all": ["a", "b", "c"]}));
    h.manager.reload_active_playlist().await.unwrap();
    h.manager.select_track(&h.track(2).await).await.unwrap();

    h.manager.remove_track(&h.track(0).await).await.unwrap();

    let state = h.manager.snapshot().await;
    assert_eq!(state.current_index, 1);
    assert_eq!(state.track_list[state.current_index].path, "c");
}

#[tokio::test]
async fn remove_rereads_remaining_tracks() {
    let h = stored(json!({"all": ["a", "b"]}));
    h.manager.reload_active_playlist().await.unwrap();
    h.player.clear_calls();

    h.manager.remove_track(&h.track(0).await).await.unwrap();

    assert_eq!(h.player.calls(), vec![Call::ListTracks(strings(&["b"]))]);
}

#[tokio::test]
async fn fetch_appends_and_persists_union() {
    let h = stored(json!({"all": ["a", "b"]}));
    h.manager.reload_active_playlist().await.unwrap();

    h.manager
        .fetch_and_persist(&strings(&["c", "a"]))
        .await
        .unwrap();

    assert_eq!(list_paths(&h).await, strings(&["a", "b", "c", "a"]));
    assert_eq!(musics(&h).await, json!({"all": ["a", "b", "c"]}));
}

#[tokio::test]
async fn fetch_keeps_stored_paths_missing_from_memory() {
    let h = stored(json!({"all": ["x", "y"]}));

    h.manager.fetch_and_persist(&strings(&["z"])).await.unwrap();

    assert_eq!(list_paths(&h).await, strings(&["z"]));
    assert_eq!(musics(&h).await, json!({"all": ["x", "y", "z"]}));
}

#[tokio::test]
async fn switch_persists_the_active_name_only() {
    let h = stored(json!({"all": ["a"], "rock": ["r"]}));
    h.manager.reload_active_playlist().await.unwrap();

    h.manager.switch_active_playlist("rock").await.unwrap();

    let state = h.manager.snapshot().await;
    assert_eq!(state.active_playlist, "rock");
    assert_eq!(state.track_paths(), strings(&["a"]));
    assert_eq!(
        h.store.get(ACTIVE_PLAYLIST_KEY).await.unwrap(),
        Some(json!("rock"))
    );

    h.manager.reload_active_playlist().await.unwrap();
    assert_eq!(list_paths(&h).await, strings(&["r"]));
}

#[tokio::test]
async fn switch_rejects_empty_name() {
    let h = Harness::new();

    let err = h.manager.switch_active_playlist("  ").await.unwrap_err();

    assert!(matches!(err, PlaybackError::InvalidOperation(_)));
    assert!(h.store.get(ACTIVE_PLAYLIST_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn get_or_init_adopts_the_remembered_playlist() {
    let h = Harness::with_store(MemoryDocumentStore::with_entries([(
        ACTIVE_PLAYLIST_KEY,
        json!("jazz"),
    )]));
    let mut events = h.manager.subscribe();

    assert_eq!(h.manager.get_or_init_active_playlist().await.unwrap(), "jazz");
    assert_eq!(h.manager.snapshot().await.active_playlist, "jazz");
    assert_eq!(
        events.try_recv().unwrap(),
        PlaybackEvent::PlaylistChanged {
            name: "jazz".to_string()
        }
    );
}

#[tokio::test]
async fn get_or_init_defaults_without_writing() {
    let h = Harness::new();

    assert_eq!(h.manager.get_or_init_active_playlist().await.unwrap(), "all");
    assert!(h.store.get(ACTIVE_PLAYLIST_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn get_or_init_ignores_malformed_entry() {
    let h = Harness::with_store(MemoryDocumentStore::with_entries([(
        ACTIVE_PLAYLIST_KEY,
        json!(17),
    )]));

    assert_eq!(h.manager.get_or_init_active_playlist().await.unwrap(), "all");
}

#[tokio::test]
async fn create_playlist_adds_an_empty_entry() {
    let h = stored(json!({"all": ["a"]}));
    let mut events = h.manager.subscribe();

    assert!(h.manager.create_playlist("chill").await.unwrap());

    assert_eq!(musics(&h).await, json!({"all": ["a"], "chill": []}));
    assert_eq!(
        events.try_recv().unwrap(),
        PlaybackEvent::PlaylistsUpdated {
            names: strings(&["all", "chill"])
        }
    );
}

#[tokio::test]
async fn create_playlist_never_overwrites() {
    let h = stored(json!({"all": ["a"], "chill": ["c"]}));

    assert!(!h.manager.create_playlist("chill").await.unwrap());

    assert_eq!(musics(&h).await, json!({"all": ["a"], "chill": ["c"]}));
    assert_eq!(
        h.manager.snapshot().await.playlists,
        strings(&["all", "chill"])
    );
}

#[tokio::test]
async fn refresh_reports_document_keys() {
    let h = stored(json!({"b": [], "a": ["x"]}));

    let names = h.manager.refresh_playlist_names().await.unwrap();

    assert_eq!(names, strings(&["a", "b"]));
    assert_eq!(h.manager.snapshot().await.playlists, names);
}

#[tokio::test]
async fn append_renumbers_ids() {
    let h = Harness::new().with_tracks(&["a", "b"]).await;
    let more = h
        .manager
        .load_tracks_for_paths(&strings(&["c"]))
        .await
        .unwrap();
    assert_eq!(more[0].id, 0);

    h.manager.append_to_current_playlist(more).await;

    assert_eq!(h.track(2).await.id, 2);
    assert_eq!(list_paths(&h).await, strings(&["a", "b", "c"]));
}
