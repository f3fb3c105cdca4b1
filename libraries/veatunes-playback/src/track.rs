//! Playable track model
//!
//! A [`Track`] is a server [`Song`] with its stream and cover-art URLs
//! resolved. Tracks are values: changing a field produces a new track.

use crate::api::MusicApi;
use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use veatunes_client::Song;

/// Track information for queue management
///
/// Serialized in camelCase so persisted queues stay readable by other
/// Subsonic front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Song identifier on the server
    pub id: String,

    /// Track title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Signed, time-limited stream URL (opaque)
    pub url: String,

    /// Resolved cover-art URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,

    /// Length in seconds, 0 if unknown
    #[serde(default)]
    pub duration: u32,

    #[serde(default)]
    pub album_id: String,

    #[serde(default)]
    pub artist_id: String,

    #[serde(default)]
    pub starred: bool,
}

impl Track {
    /// Track length, `None` if the server did not report one
    pub fn length(&self) -> Option<Duration> {
        (self.duration > 0).then(|| Duration::from_secs(u64::from(self.duration)))
    }

    /// Copy of this track with a different starred flag
    #[must_use]
    pub fn with_starred(&self, starred: bool) -> Self {
        Self {
            starred,
            ..self.clone()
        }
    }
}

/// Convert a server song into a playable track.
///
/// Fails with [`PlaybackError::NotConfigured`] when no server is configured.
pub fn song_to_track(song: &Song, api: Option<&dyn MusicApi>, cover_size: u32) -> Result<Track> {
    let api = api.ok_or(PlaybackError::NotConfigured)?;

    Ok(Track {
        id: song.id.clone(),
        name: song.title.clone(),
        artist: song.artist.clone(),
        album: song.album.clone(),
        url: api.stream_url(&song.id),
        cover_art: song
            .cover_art
            .as_deref()
            .map(|cover| api.cover_art_url(cover, Some(cover_size))),
        duration: song.duration.unwrap_or(0),
        album_id: song.album_id.clone(),
        artist_id: song.artist_id.clone(),
        starred: song.starred.is_some(),
    })
}

/// Convert a batch of songs, preserving order.
pub fn songs_to_tracks(
    songs: &[Song],
    api: Option<&dyn MusicApi>,
    cover_size: u32,
) -> Result<Vec<Track>> {
    songs
        .iter()
        .map(|song| song_to_track(song, api, cover_size))
        .collect()
}
