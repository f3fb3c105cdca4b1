//! Scrobble notifier
//!
//! Fire-and-forget play registration. Each notification runs as a task on
//! the ambient tokio runtime; failures are logged and never reach the
//! caller.

use crate::api::MusicApi;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Submits scrobbles in the background
pub struct ScrobbleNotifier {
    api: Option<Arc<dyn MusicApi>>,
    in_flight: Vec<JoinHandle<()>>,
}

impl ScrobbleNotifier {
    pub fn new(api: Option<Arc<dyn MusicApi>>) -> Self {
        Self {
            api,
            in_flight: Vec::new(),
        }
    }

    /// Register a play of `track_id`
    ///
    /// Skipped (with a debug log) when no server is configured or no tokio
    /// runtime is running.
    pub fn notify(&mut self, track_id: &str) {
        let Some(api) = self.api.clone() else {
            tracing::debug!(track_id, "No server configured, scrobble skipped");
            return;
        };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::debug!(track_id, "No async runtime, scrobble skipped");
                return;
            }
        };

        self.in_flight.retain(|task| !task.is_finished());

        let track_id = track_id.to_string();
        self.in_flight.push(handle.spawn(async move {
            match api.scrobble(&track_id).await {
                Ok(()) => tracing::debug!(track_id = %track_id, "Scrobbled"),
                Err(e) => tracing::warn!(track_id = %track_id, error = %e, "Failed to scrobble track"),
            }
        }));
    }

    /// Number of scrobbles that have not completed yet
    pub fn pending(&self) -> usize {
        self.in_flight.iter().filter(|task| !task.is_finished()).count()
    }

    /// Wait for every in-flight scrobble to complete
    pub async fn settle(&mut self) {
        for task in self.in_flight.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Scrobble task failed");
            }
        }
    }
}

impl std::fmt::Debug for ScrobbleNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrobbleNotifier")
            .field("configured", &self.api.is_some())
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}
