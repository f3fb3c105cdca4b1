//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No current track
    Idle,

    /// Track loaded, not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: Off -> All -> One -> Off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// How the queue is reordered when shuffle is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleStrategy {
    /// Pure random shuffle
    #[default]
    Random,

    /// Spread artists apart (avoid back-to-back tracks by the same artist)
    Smart,
}

/// Configuration for playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Maximum history size (default: 100)
    pub history_size: usize,

    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Edge length in pixels requested for cover art (default: 300)
    pub cover_art_size: u32,

    /// Shuffle algorithm (default: Random)
    pub shuffle_strategy: ShuffleStrategy,

    /// Fixed RNG seed; `None` seeds from OS entropy
    pub rng_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: 100,
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
            cover_art_size: 300,
            shuffle_strategy: ShuffleStrategy::Random,
            rng_seed: None,
        }
    }
}
