//! Veatunes Subsonic Client
//!
//! HTTP client library for Subsonic/OpenSubsonic-compatible servers
//! (Navidrome, Gonic, Airsonic).
//!
//! # Features
//!
//! - **Authentication**: salted token auth (`t = md5(password + salt)`) on every request
//! - **Media URLs**: stream and cover-art URLs built locally, no round trip
//! - **Library**: album lookup with its songs
//! - **Scrobbling**: "now playing" and play submissions
//!
//! # Example
//!
//! ```ignore
//! use veatunes_client::{ServerConfig, SubsonicClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::new("https://music.example.com", "alice", "secret");
//!     let client = SubsonicClient::new(config)?;
//!
//!     client.ping().await?;
//!
//!     let album = client.get_album("al-42").await?;
//!     println!("{} has {} songs", album.album.name, album.songs.len());
//!
//!     let url = client.stream_url(&album.songs[0].id);
//!     println!("stream: {url}");
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod library;
mod types;

pub use client::SubsonicClient;
pub use error::{Result, ServerClientError};
pub use types::{Album, AlbumWithSongs, ServerConfig, Song, API_VERSION, CLIENT_NAME};

pub use auth::AuthParams;
pub use library::LibraryClient;
