//! Subcommands operating on the persisted player

use crate::config::CliConfig;
use anyhow::{bail, Context};
use clap::Subcommand;
use std::sync::Arc;
use veatunes_client::SubsonicClient;
use veatunes_playback::{JsonFileStore, MusicApi, NullSink, PlaybackManager};

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check the connection and credentials
    Ping,
    /// Show current track and queue
    Status,
    /// Replace the queue with an album and start it
    PlayAlbum {
        /// Album id
        id: String,
        /// Shuffle the album before playing
        #[arg(long)]
        shuffle: bool,
    },
    /// Add an album to the queue
    EnqueueAlbum {
        /// Album id
        id: String,
    },
    /// Skip to the next track
    Next,
    /// Restart the current track
    ///
    /// History is not kept between invocations, so this never steps back to
    /// an earlier track.
    Prev,
    /// Play the queue entry at a position (1-based, as shown by status)
    Jump { index: usize },
    /// Remove a track from the queue
    Remove { track_id: String },
    /// Clear queue and current track
    Clear,
}

/// Build a client when server settings are present
pub fn connect(config: &CliConfig) -> anyhow::Result<Option<SubsonicClient>> {
    if !config.has_server() {
        return Ok(None);
    }
    config.validate()?;

    let client = SubsonicClient::new(config.server_config())
        .context("Invalid server configuration")?;
    Ok(Some(client))
}

/// Restore the player from the configured state directory
///
/// Output goes to a [`NullSink`]; only queue state is manipulated.
pub fn open_player(config: &CliConfig, api: Option<Arc<dyn MusicApi>>) -> PlaybackManager {
    let store = JsonFileStore::new(&config.player.state_dir);
    tracing::debug!(state_dir = %store.dir().display(), "Opening player state");

    PlaybackManager::new(
        config.playback_config(),
        api,
        Box::new(store),
        Box::new(NullSink::new()),
    )
}

/// Apply a queue command to the player
///
/// `Ping` is handled by [`ping`] and is a no-op here.
pub async fn apply(command: &Command, manager: &mut PlaybackManager) -> anyhow::Result<()> {
    match command {
        Command::Ping | Command::Status => {}
        Command::PlayAlbum { id, shuffle } => {
            let result = if *shuffle {
                manager.shuffle_album(id).await
            } else {
                manager.play_album(id).await
            };
            result.with_context(|| format!("Failed to play album {}", id))?;
        }
        Command::EnqueueAlbum { id } => {
            let added = manager
                .add_album_to_queue(id)
                .await
                .with_context(|| format!("Failed to queue album {}", id))?;
            tracing::info!(album_id = %id, added, "Album queued");
        }
        Command::Next => manager.play_next(),
        Command::Prev => manager.play_prev(),
        Command::Jump { index } => {
            if *index == 0 {
                bail!("Queue positions start at 1");
            }
            manager.skip_to_track_in_queue(index - 1)?;
        }
        Command::Remove { track_id } => {
            if !manager.remove_track_from_queue(track_id) {
                tracing::warn!(track_id = %track_id, "Track not in queue");
            }
        }
        Command::Clear => manager.clear_queue(),
    }

    manager.settle_notifications().await;
    Ok(())
}

/// Check connection and credentials
pub async fn ping(config: &CliConfig) -> anyhow::Result<()> {
    let Some(client) = connect(config)? else {
        bail!("No server configured (set VEATUNES_SERVER__URL)");
    };

    client.ping().await?;
    tracing::info!(url = %client.url(), user = %client.username(), "Server reachable");
    Ok(())
}
