//! Veatunes - Playback Management
//!
//! Client-side playback and queue engine for Subsonic-compatible servers.
//!
//! This crate provides:
//! - Playable [`Track`] model built from server songs
//! - Ordered play queue (deduplicated by track id)
//! - Playback history backing "previous" (configurable size)
//! - Shuffle (Random + Smart) and repeat modes (Off, All, One)
//! - Audio sink binding (load, play/pause, seek, volume, mute)
//! - Fire-and-forget scrobbling
//! - Persistence of queue and current track
//!
//! # Architecture
//!
//! `veatunes-playback` does not produce sound and does not know where state
//! is stored. Collaborators are injected:
//! - [`MusicApi`]: stream/cover URLs, scrobbles, album lookup
//! - [`AudioSink`]: the single playback resource
//! - [`PlayerStore`]: durable queue and current track
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use veatunes_playback::{MemoryStore, NullSink, PlaybackConfig, PlaybackManager, Track};
//!
//! let mut manager = PlaybackManager::new(
//!     PlaybackConfig::default(),
//!     None,
//!     Box::new(MemoryStore::new()),
//!     Box::new(NullSink::new()),
//! );
//!
//! let track = Track {
//!     id: "tr-1".to_string(),
//!     name: "My Song".to_string(),
//!     artist: "Artist Name".to_string(),
//!     album: "Album Name".to_string(),
//!     url: "https://music.example/rest/stream?id=tr-1".to_string(),
//!     cover_art: None,
//!     duration: 180,
//!     album_id: "al-1".to_string(),
//!     artist_id: "ar-1".to_string(),
//!     starred: false,
//! };
//!
//! manager.play_track(track, true, false);
//! assert!(manager.is_playing());
//! assert_eq!(manager.queue().len(), 1);
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use veatunes_playback::{MemoryStore, NullSink, PlaybackConfig, PlaybackManager, RepeatMode};
//!
//! let mut manager = PlaybackManager::new(
//!     PlaybackConfig::default(),
//!     None,
//!     Box::new(MemoryStore::new()),
//!     Box::new(NullSink::new()),
//! );
//!
//! assert!(manager.toggle_shuffle());
//! assert_eq!(manager.toggle_repeat(), RepeatMode::All);
//! ```

mod api;
mod error;
mod events;
mod history;
mod manager;
mod notifier;
mod queue;
mod shuffle;
mod sink;
mod store;
mod track;
pub mod types;
mod volume;

// Public exports
pub use api::MusicApi;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use manager::{PlaybackManager, RESTART_THRESHOLD};
pub use sink::{AudioSink, NullSink, SinkEvent};
pub use store::{JsonFileStore, MemoryStore, PlayerStore, CURRENT_TRACK_FILE, QUEUE_FILE};
pub use track::{song_to_track, songs_to_tracks, Track};
pub use types::{PlaybackConfig, PlaybackState, RepeatMode, ShuffleStrategy};
