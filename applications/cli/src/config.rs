/// Command-line configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use veatunes_client::ServerConfig;
use veatunes_playback::{PlaybackConfig, ShuffleStrategy};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "veatunes.toml";

/// Environment variable prefix, e.g. `VEATUNES_SERVER__URL`
pub const ENV_PREFIX: &str = "VEATUNES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    #[serde(default = "default_history_size")]
    pub history_size: usize,

    #[serde(default = "default_cover_art_size")]
    pub cover_art_size: u32,

    #[serde(default)]
    pub shuffle_strategy: ShuffleStrategy,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `veatunes.toml` is read if
    /// present. Environment variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`load`](Self::load) with a caller-provided environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // VEATUNES_PLAYER__STATE_DIR -> player.state_dir
        settings = settings.add_source(
            env.prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Whether server credentials are present
    pub fn has_server(&self) -> bool {
        !self.server.url.is_empty()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.is_empty() {
            return Err(ConfigError::Invalid(
                "Server URL is required (set VEATUNES_SERVER__URL)".to_string(),
            ));
        }

        if self.server.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Username is required (set VEATUNES_SERVER__USERNAME)".to_string(),
            ));
        }

        if self.server.password.is_empty() {
            return Err(ConfigError::Invalid(
                "Password is required (set VEATUNES_SERVER__PASSWORD)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(
            self.server.url.clone(),
            self.server.username.clone(),
            self.server.password.clone(),
        )
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            history_size: self.player.history_size,
            cover_art_size: self.player.cover_art_size,
            shuffle_strategy: self.player.shuffle_strategy,
            ..Default::default()
        }
    }
}

// Default values
fn default_state_dir() -> PathBuf {
    PathBuf::from("./data/player")
}

fn default_history_size() -> usize {
    100
}

fn default_cover_art_size() -> u32 {
    300
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            history_size: default_history_size(),
            cover_art_size: default_cover_art_size(),
            shuffle_strategy: ShuffleStrategy::default(),
        }
    }
}
