//! Types for Subsonic API requests and responses.

use serde::{Deserialize, Serialize};

/// Client name reported to the server with every request (`c` parameter).
pub const CLIENT_NAME: &str = "veatunes";

/// Subsonic REST API version spoken by this client (`v` parameter).
pub const API_VERSION: &str = "1.16.0";

/// Configuration for connecting to a Subsonic server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    /// Account name
    pub username: String,
    /// Plain password; only its salted md5 ever leaves the process
    pub password: String,
}

impl ServerConfig {
    /// Create a new server config.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

// =============================================================================
// Library Types
// =============================================================================

/// A song (child) record as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub title: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub track: Option<u32>,
    #[serde(default)]
    pub disc_number: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
    /// Length in seconds
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub bit_rate: Option<u32>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub play_count: Option<u64>,
    #[serde(default)]
    pub album_id: String,
    #[serde(default)]
    pub artist_id: String,
    /// ISO timestamp of when the song was starred, absent if not starred
    #[serde(default)]
    pub starred: Option<String>,
}

/// Album (ID3) record as returned by `getAlbum`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub song_count: u32,
    /// Total length in seconds
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub starred: Option<String>,
}

/// An album together with its songs, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumWithSongs {
    pub album: Album,
    pub songs: Vec<Song>,
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Top-level JSON document: `{ "subsonic-response": { ... } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "subsonic-response")]
    pub response: ResponseBody,
}

/// Body of the envelope. Endpoint payloads sit beside `status`.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseBody {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

/// Error object inside a failed envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
}

/// `album` payload of `getAlbum`: album fields with an inline `song` array.
#[derive(Debug, Deserialize)]
pub(crate) struct AlbumPayload {
    #[serde(flatten)]
    pub album: Album,
    #[serde(default)]
    pub song: Vec<Song>,
}

impl From<AlbumPayload> for AlbumWithSongs {
    fn from(payload: AlbumPayload) -> Self {
        Self {
            album: payload.album,
            songs: payload.song,
        }
    }
}
