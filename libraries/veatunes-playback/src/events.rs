//! Player events
//!
//! Emitted by [`PlaybackManager`](crate::PlaybackManager) after every state
//! transition. Front ends either drain the buffered list or subscribe to the
//! broadcast channel. Persistence is driven from the same emission points.

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// Queue changed (tracks added/removed/reordered)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Current track changed
    CurrentTrackChanged {
        /// ID of the new current track, `None` after a clear
        track_id: Option<String>,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Playing flag changed
    PlaybackStateChanged { is_playing: bool },

    ShuffleChanged { enabled: bool },

    RepeatChanged { mode: RepeatMode },

    /// Position reported by the audio sink
    PositionChanged { position_ms: u64 },

    /// The audio sink failed; playback has been stopped
    Error {
        /// Error message
        message: String,
    },
}

impl PlayerEvent {
    /// Whether the queue must be persisted after this event
    pub fn touches_queue(&self) -> bool {
        matches!(self, PlayerEvent::QueueChanged { .. })
    }

    /// Whether the current track must be persisted after this event
    pub fn touches_current_track(&self) -> bool {
        matches!(self, PlayerEvent::CurrentTrackChanged { .. })
    }
}
