//! Main Subsonic client.

use crate::auth::AuthParams;
use crate::error::{Result, ServerClientError};
use crate::library::LibraryClient;
use crate::types::{AlbumWithSongs, Envelope, ServerConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::form_urlencoded;

/// Client for a Subsonic/OpenSubsonic server.
///
/// Stateless apart from the configuration: every request is signed with a
/// fresh salt, so the client can be shared freely (it is `Clone` and cheap).
///
/// # Example
///
/// ```ignore
/// use veatunes_client::{ServerConfig, SubsonicClient};
///
/// let client = SubsonicClient::new(ServerConfig::new("https://music.example.com", "alice", "pw"))?;
/// client.ping().await?;
/// let url = client.stream_url("song-1");
/// ```
#[derive(Debug, Clone)]
pub struct SubsonicClient {
    http: Client,
    config: ServerConfig,
}

impl SubsonicClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        if config.username.is_empty() {
            return Err(ServerClientError::MissingCredentials(
                "username is required".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Veatunes/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ServerConfig {
                url,
                username: config.username,
                password: config.password,
            },
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Get the configured username.
    pub fn username(&self) -> &str {
        &self.config.username
    }

    /// Check that the server is reachable and accepts our credentials.
    pub async fn ping(&self) -> Result<()> {
        let body = self.request("ping", &[]).await?;
        info!(
            url = %self.config.url,
            server_version = body.get("serverVersion").and_then(|v| v.as_str()).unwrap_or("unknown"),
            "Connected to server"
        );
        Ok(())
    }

    /// Get a library client for library lookups.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(self)
    }

    /// Fetch an album and its songs.
    pub async fn get_album(&self, album_id: &str) -> Result<AlbumWithSongs> {
        self.library().get_album(album_id).await
    }

    /// Register a play with the server.
    ///
    /// `submission = false` only updates "now playing".
    pub async fn scrobble(&self, song_id: &str, submission: bool) -> Result<()> {
        let time = chrono::Utc::now().timestamp_millis().to_string();
        self.request(
            "scrobble",
            &[
                ("id", song_id),
                ("submission", if submission { "true" } else { "false" }),
                ("time", time.as_str()),
            ],
        )
        .await?;

        debug!(song_id = %song_id, submission, "Scrobbled");
        Ok(())
    }

    /// Build a signed streaming URL for a song. No request is made.
    pub fn stream_url(&self, song_id: &str) -> String {
        self.signed_url("stream", &[("id", song_id)], false)
    }

    /// Build a signed cover-art URL. `size` is omitted when `None`.
    pub fn cover_art_url(&self, cover_art_id: &str, size: Option<u32>) -> String {
        match size {
            Some(size) => {
                let size = size.to_string();
                self.signed_url("getCoverArt", &[("id", cover_art_id), ("size", &size)], false)
            }
            None => self.signed_url("getCoverArt", &[("id", cover_art_id)], false),
        }
    }

    /// Perform a GET against `/rest/{endpoint}` and unwrap the envelope.
    ///
    /// Returns the payload fields that sit beside `status`.
    pub(crate) async fn request(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        let url = self.signed_url(endpoint, params, true);
        debug!(endpoint = %endpoint, "Sending Subsonic request");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ServerClientError::ServerUnreachable(e.to_string())
            } else {
                ServerClientError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(endpoint = %endpoint, status = %status, "Request failed");
            return Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let envelope: Envelope = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
        })?;
        let body = envelope.response;

        if body.status != "ok" {
            let (code, message) = body
                .error
                .map(|e| (e.code, e.message.unwrap_or_else(|| "Unknown error".into())))
                .unwrap_or((0, "Unknown error".into()));
            warn!(endpoint = %endpoint, code, message = %message, "Server rejected request");
            return Err(ServerClientError::Api { code, message });
        }

        debug!(
            endpoint = %endpoint,
            version = body.version.as_deref().unwrap_or("?"),
            "Request succeeded"
        );
        Ok(body.payload)
    }

    fn signed_url(&self, endpoint: &str, params: &[(&str, &str)], json: bool) -> String {
        let auth = AuthParams::generate(&self.config.username, &self.config.password);

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.extend_pairs(auth.query_pairs());
        if json {
            query.append_pair("f", "json");
        }
        query.extend_pairs(params.iter().copied());

        format!("{}/rest/{}?{}", self.config.url, endpoint, query.finish())
    }
}
