//! Shared test doubles for engine integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use veatunes_client::{Album, AlbumWithSongs, ServerClientError, Song};
use veatunes_playback::{
    AudioSink, MemoryStore, MusicApi, PlaybackConfig, PlaybackError, PlaybackManager, SinkEvent,
    Track,
};

// ============================================================================
// Tracks
// ============================================================================

pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        artist: format!("Artist {}", id),
        album: "Test Album".to_string(),
        url: format!("https://music.test/stream/{}", id),
        cover_art: None,
        duration: 200,
        album_id: "al-1".to_string(),
        artist_id: format!("ar-{}", id),
        starred: false,
    }
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn ids(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

pub fn current_id(manager: &PlaybackManager) -> Option<String> {
    manager.current_track().map(|t| t.id.clone())
}

pub fn history_ids(manager: &PlaybackManager) -> Vec<String> {
    manager.history().iter().map(|t| t.id.clone()).collect()
}

// ============================================================================
// Fake server
// ============================================================================

/// In-memory music server recording scrobbles
#[derive(Default)]
pub struct FakeApi {
    pub scrobbled: Mutex<Vec<String>>,
    pub fail_scrobbles: bool,
    pub albums: HashMap<String, AlbumWithSongs>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_scrobbles() -> Self {
        Self {
            fail_scrobbles: true,
            ..Self::default()
        }
    }

    /// Register an album whose songs have the given ids
    pub fn with_album(mut self, album_id: &str, song_ids: &[&str]) -> Self {
        let songs = song_ids
            .iter()
            .map(|id| Song {
                id: (*id).to_string(),
                parent: Some(album_id.to_string()),
                title: format!("Song {}", id),
                album: format!("Album {}", album_id),
                artist: "Album Artist".to_string(),
                track: None,
                disc_number: None,
                year: None,
                genre: None,
                cover_art: Some(album_id.to_string()),
                duration: Some(210),
                bit_rate: None,
                suffix: None,
                content_type: None,
                play_count: None,
                album_id: album_id.to_string(),
                artist_id: "ar-album".to_string(),
                starred: None,
            })
            .collect::<Vec<_>>();

        let album = Album {
            id: album_id.to_string(),
            name: format!("Album {}", album_id),
            artist: "Album Artist".to_string(),
            artist_id: "ar-album".to_string(),
            cover_art: Some(album_id.to_string()),
            song_count: songs.len() as u32,
            duration: 210 * songs.len() as u32,
            year: None,
            genre: None,
            starred: None,
        };

        self.albums
            .insert(album_id.to_string(), AlbumWithSongs { album, songs });
        self
    }

    pub fn scrobbles(&self) -> Vec<String> {
        self.scrobbled.lock().unwrap().clone()
    }
}

#[async_trait]
impl MusicApi for FakeApi {
    fn stream_url(&self, song_id: &str) -> String {
        format!("https://music.test/rest/stream?id={}", song_id)
    }

    fn cover_art_url(&self, cover_art_id: &str, size: Option<u32>) -> String {
        match size {
            Some(size) => format!("https://music.test/rest/getCoverArt?id={}&size={}", cover_art_id, size),
            None => format!("https://music.test/rest/getCoverArt?id={}", cover_art_id),
        }
    }

    async fn scrobble(&self, song_id: &str) -> veatunes_client::Result<()> {
        self.scrobbled.lock().unwrap().push(song_id.to_string());
        if self.fail_scrobbles {
            return Err(ServerClientError::ServerUnreachable(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }

    async fn get_album(&self, album_id: &str) -> veatunes_client::Result<AlbumWithSongs> {
        self.albums
            .get(album_id)
            .cloned()
            .ok_or_else(|| ServerClientError::Api {
                code: 70,
                message: "Album not found".to_string(),
            })
    }
}

// ============================================================================
// Recording sink
// ============================================================================

#[derive(Debug, Default)]
pub struct SinkState {
    pub loaded: Vec<String>,
    pub playing: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub position: Duration,
    pub volume: f32,
    pub muted: bool,
    pub refuse_play: bool,
    pub events: VecDeque<SinkEvent>,
}

/// Sink double; clones share state so the test keeps a handle after the
/// manager takes ownership
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, SinkState> {
        self.state.lock().unwrap()
    }

    pub fn set_position(&self, position: Duration) {
        self.state().position = position;
    }

    pub fn refuse_play(&self, refuse: bool) {
        self.state().refuse_play = refuse;
    }

    pub fn push_event(&self, event: SinkEvent) {
        self.state().events.push_back(event);
    }

    pub fn last_loaded(&self) -> Option<String> {
        self.state().loaded.last().cloned()
    }
}

impl AudioSink for RecordingSink {
    fn load(&mut self, url: &str) {
        let mut state = self.state();
        state.loaded.push(url.to_string());
        state.position = Duration::ZERO;
        state.playing = false;
    }

    fn play(&mut self) -> veatunes_playback::Result<()> {
        let mut state = self.state();
        state.play_calls += 1;
        if state.refuse_play {
            return Err(PlaybackError::Sink("autoplay blocked".to_string()));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state();
        state.pause_calls += 1;
        state.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.state().position = position;
    }

    fn set_volume(&mut self, level: f32) {
        self.state().volume = level;
    }

    fn set_muted(&mut self, muted: bool) {
        self.state().muted = muted;
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn poll_event(&mut self) -> Option<SinkEvent> {
        self.state().events.pop_front()
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub manager: PlaybackManager,
    pub sink: RecordingSink,
    pub store: MemoryStore,
    pub api: Arc<FakeApi>,
}

pub fn seeded_config() -> PlaybackConfig {
    PlaybackConfig {
        rng_seed: Some(42),
        ..Default::default()
    }
}

pub fn harness() -> Harness {
    harness_with(seeded_config(), FakeApi::new(), MemoryStore::new())
}

pub fn harness_with(config: PlaybackConfig, api: FakeApi, store: MemoryStore) -> Harness {
    let sink = RecordingSink::new();
    let api = Arc::new(api);
    let manager = PlaybackManager::new(
        config,
        Some(api.clone() as Arc<dyn MusicApi>),
        Box::new(store.clone()),
        Box::new(sink.clone()),
    );

    Harness {
        manager,
        sink,
        store,
        api,
    }
}
