//! Audio sink abstraction
//!
//! The single playback resource driven by the engine. The engine pushes
//! commands (`load`, `play`, `pause`, ...) and pulls events back with
//! [`AudioSink::poll_event`], so a sink never holds a reference into the
//! engine.

use crate::error::Result;
use std::time::Duration;

/// Events reported by an audio sink
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    /// Current media reached its end
    Ended,

    /// Playback position advanced
    TimeUpdate(Duration),

    /// Media failed to load or decode
    Error(String),
}

/// Platform-agnostic audio output
///
/// Implementors wrap whatever actually produces sound (a native player,
/// a browser element behind FFI, a test double).
pub trait AudioSink: Send {
    /// Load media from a URL, replacing the current one
    ///
    /// Does not start playback. Position resets to zero.
    fn load(&mut self, url: &str);

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback started
    /// * `Err(_)` - Playback was refused (nothing loaded, autoplay blocked, ...)
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    /// Seek to position in the loaded media
    fn seek(&mut self, position: Duration);

    /// Set output level, `0.0..=1.0`
    fn set_volume(&mut self, level: f32);

    fn set_muted(&mut self, muted: bool);

    /// Elapsed playback time of the loaded media
    fn position(&self) -> Duration;

    /// Next pending event, if any
    fn poll_event(&mut self) -> Option<SinkEvent>;
}

/// Headless sink: accepts every command and produces no sound
///
/// Used by the command-line front end, which only manipulates queue state.
#[derive(Debug, Default)]
pub struct NullSink {
    loaded: Option<String>,
    position: Duration,
    playing: bool,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the loaded media
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioSink for NullSink {
    fn load(&mut self, url: &str) {
        self.loaded = Some(url.to_string());
        self.position = Duration::ZERO;
        self.playing = false;
    }

    fn play(&mut self) -> Result<()> {
        self.playing = self.loaded.is_some();
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
    }

    fn set_volume(&mut self, _level: f32) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn position(&self) -> Duration {
        self.position
    }

    fn poll_event(&mut self) -> Option<SinkEvent> {
        None
    }
}
