//! Library lookups for Subsonic servers.

use crate::client::SubsonicClient;
use crate::error::{Result, ServerClientError};
use crate::types::{AlbumPayload, AlbumWithSongs};
use tracing::debug;

/// Library client borrowing a [`SubsonicClient`].
pub struct LibraryClient<'a> {
    client: &'a SubsonicClient,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(client: &'a SubsonicClient) -> Self {
        Self { client }
    }

    /// Get an album with its songs (`getAlbum`).
    pub async fn get_album(&self, album_id: &str) -> Result<AlbumWithSongs> {
        let mut body = self.client.request("getAlbum", &[("id", album_id)]).await?;

        let raw = body.remove("album").ok_or_else(|| {
            ServerClientError::ParseError("getAlbum response has no album".to_string())
        })?;
        let payload: AlbumPayload = serde_json::from_value(raw).map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse album response: {}", e))
        })?;

        let album = AlbumWithSongs::from(payload);
        debug!(
            album_id = %album.album.id,
            songs = album.songs.len(),
            "Fetched album"
        );

        Ok(album)
    }
}
