//! Music server seam used by the playback engine
//!
//! The engine only needs URL construction, scrobbling and album lookup.
//! Implemented for [`SubsonicClient`]; tests substitute fakes.

use async_trait::async_trait;
use veatunes_client::{AlbumWithSongs, Result, SubsonicClient};

/// Server operations consumed by [`PlaybackManager`](crate::PlaybackManager)
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// Signed streaming URL for a song (no request)
    fn stream_url(&self, song_id: &str) -> String;

    /// Signed cover-art URL (no request)
    fn cover_art_url(&self, cover_art_id: &str, size: Option<u32>) -> String;

    /// Register a play of `song_id`
    async fn scrobble(&self, song_id: &str) -> Result<()>;

    /// Fetch an album with its songs
    async fn get_album(&self, album_id: &str) -> Result<AlbumWithSongs>;
}

#[async_trait]
impl MusicApi for SubsonicClient {
    fn stream_url(&self, song_id: &str) -> String {
        SubsonicClient::stream_url(self, song_id)
    }

    fn cover_art_url(&self, cover_art_id: &str, size: Option<u32>) -> String {
        SubsonicClient::cover_art_url(self, cover_art_id, size)
    }

    async fn scrobble(&self, song_id: &str) -> Result<()> {
        SubsonicClient::scrobble(self, song_id, true).await
    }

    async fn get_album(&self, album_id: &str) -> Result<AlbumWithSongs> {
        SubsonicClient::get_album(self, album_id).await
    }
}
