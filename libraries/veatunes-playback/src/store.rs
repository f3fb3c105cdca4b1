//! Persistence adapter
//!
//! Queue and current track survive restarts through a [`PlayerStore`].
//! Stores never fail the caller: unreadable data is logged, discarded and
//! replaced by the default, and write failures are logged.
//!
//! The auto-play intent is not part of [`Track`], so it can never be
//! persisted; an `autoPlay` key written by older front ends is ignored on
//! load.

use crate::error::Result;
use crate::track::Track;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// File name of the persisted queue
pub const QUEUE_FILE: &str = "player-queue.json";

/// File name of the persisted current track
pub const CURRENT_TRACK_FILE: &str = "player-current-track.json";

/// Durable storage for player state
pub trait PlayerStore: Send {
    /// Persisted queue, empty if nothing (valid) is stored
    fn load_queue(&self) -> Vec<Track>;

    /// Persisted current track
    fn load_current_track(&self) -> Option<Track>;

    fn save_queue(&mut self, queue: &[Track]);

    /// Persist the current track; `None` erases it
    fn save_current_track(&mut self, track: Option<&Track>);
}

/// JSON files in a state directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn queue_path(&self) -> PathBuf {
        self.dir.join(QUEUE_FILE)
    }

    fn current_track_path(&self) -> PathBuf {
        self.dir.join(CURRENT_TRACK_FILE)
    }

    fn write<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Read and decode a JSON file, removing it if it cannot be decoded
fn read_or_discard<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read player state");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt player state");
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove corrupt player state");
            }
            None
        }
    }
}

impl PlayerStore for JsonFileStore {
    fn load_queue(&self) -> Vec<Track> {
        read_or_discard(&self.queue_path()).unwrap_or_default()
    }

    fn load_current_track(&self) -> Option<Track> {
        read_or_discard(&self.current_track_path())
    }

    fn save_queue(&mut self, queue: &[Track]) {
        let path = self.queue_path();
        match self.write(&path, queue) {
            Ok(()) => tracing::trace!(length = queue.len(), "Queue saved"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to save queue"),
        }
    }

    fn save_current_track(&mut self, track: Option<&Track>) {
        let path = self.current_track_path();
        let result = match track {
            Some(track) => self.write(&path, track),
            None => match std::fs::remove_file(&path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            },
        };

        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save current track");
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    queue: Vec<Track>,
    current_track: Option<Track>,
}

/// In-process store
///
/// Clones share the same state, so a handle kept outside the engine
/// observes what the engine saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a queue and current track
    pub fn with_state(queue: Vec<Track>, current_track: Option<Track>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                queue,
                current_track,
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut MemoryState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl PlayerStore for MemoryStore {
    fn load_queue(&self) -> Vec<Track> {
        self.with(|s| s.queue.clone())
    }

    fn load_current_track(&self) -> Option<Track> {
        self.with(|s| s.current_track.clone())
    }

    fn save_queue(&mut self, queue: &[Track]) {
        self.with(|s| s.queue = queue.to_vec());
    }

    fn save_current_track(&mut self, track: Option<&Track>) {
        self.with(|s| s.current_track = track.cloned());
    }
}
