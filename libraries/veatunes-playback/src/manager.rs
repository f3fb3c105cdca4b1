//! Playback manager - core orchestration
//!
//! Owns current track, queue, history, shuffle and repeat, and drives the
//! audio sink after every transition. Every transition emits
//! [`PlayerEvent`]s; queue and current-track events are also written to
//! the [`PlayerStore`].

use crate::{
    api::MusicApi,
    error::{PlaybackError, Result},
    events::PlayerEvent,
    history::History,
    notifier::ScrobbleNotifier,
    queue::Queue,
    shuffle::shuffle_tracks,
    sink::{AudioSink, SinkEvent},
    store::PlayerStore,
    track::{songs_to_tracks, Track},
    types::{PlaybackConfig, PlaybackState, RepeatMode, ShuffleStrategy},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Elapsed time above which "previous" restarts the current track
pub const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Buffered events per broadcast subscriber
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Playback manager
///
/// Single-owner state machine: every operation takes `&mut self` and
/// leaves the sink consistent with the new state before returning.
/// Transitions never fail because of the sink; a refused `play()` only
/// clears the playing flag.
pub struct PlaybackManager {
    // State
    current_track: Option<Track>,
    auto_play: bool,
    is_playing: bool,

    // Queue and history
    queue: Queue,
    history: History,

    // Settings
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,
    shuffle_strategy: ShuffleStrategy,
    cover_art_size: u32,
    rng: StdRng,

    // Collaborators
    api: Option<Arc<dyn MusicApi>>,
    store: Box<dyn PlayerStore>,
    sink: Box<dyn AudioSink>,
    notifier: ScrobbleNotifier,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
    events_tx: broadcast::Sender<PlayerEvent>,
}

impl PlaybackManager {
    /// Create a playback manager, restoring queue and current track from
    /// `store`
    ///
    /// A restored current track is loaded into the sink but never starts
    /// playing on its own.
    pub fn new(
        config: PlaybackConfig,
        api: Option<Arc<dyn MusicApi>>,
        store: Box<dyn PlayerStore>,
        mut sink: Box<dyn AudioSink>,
    ) -> Self {
        let mut queue = Queue::new();
        queue.set(store.load_queue());
        let current_track = store.load_current_track();

        let volume = Volume::new(config.volume);
        sink.set_volume(volume.level());
        sink.set_muted(false);
        if let Some(track) = &current_track {
            sink.load(&track.url);
        }

        tracing::debug!(
            queue_length = queue.len(),
            current_track = ?current_track.as_ref().map(|t| t.id.as_str()),
            "Player state restored"
        );

        let rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            current_track,
            auto_play: false,
            is_playing: false,
            queue,
            history: History::new(config.history_size),
            volume,
            shuffle: config.shuffle,
            repeat: config.repeat,
            shuffle_strategy: config.shuffle_strategy,
            cover_art_size: config.cover_art_size,
            rng,
            notifier: ScrobbleNotifier::new(api.clone()),
            api,
            store,
            sink,
            pending_events: Vec::new(),
            events_tx,
        }
    }

    // ===== Playback Control =====

    /// Make `track` current
    ///
    /// With `start_from_queue` the outgoing track is pushed onto history and
    /// the queue is left alone. Without it the queue becomes `[track]` and
    /// history is cleared. A scrobble is always requested.
    pub fn play_track(&mut self, track: Track, auto_play: bool, start_from_queue: bool) {
        if start_from_queue {
            if let Some(outgoing) = &self.current_track {
                self.history.push(outgoing.clone());
            }
        } else {
            self.queue.set(vec![track.clone()]);
            self.history.clear();
            self.emit_queue_changed();
        }

        tracing::info!(track_id = %track.id, title = %track.name, auto_play, "Playing track");
        self.start_track(track, auto_play);
    }

    /// Advance to the next track
    ///
    /// No-op without a current track or with an empty queue. At the end of
    /// the queue, `RepeatMode::All` wraps to the first track and
    /// `RepeatMode::Off` stops playback, keeping the current track.
    pub fn play_next(&mut self) {
        let Some(current) = self.current_track.clone() else {
            return;
        };
        if self.queue.is_empty() {
            return;
        }

        if self.repeat == RepeatMode::One {
            self.play_track(current, true, true);
            return;
        }

        // A current track missing from the queue continues at its head
        let next_index = self.queue.position(&current.id).map_or(0, |i| i + 1);

        let next = match self.queue.get(next_index) {
            Some(track) => Some(track.clone()),
            None if self.repeat == RepeatMode::All => self.queue.first().cloned(),
            None => None,
        };

        match next {
            Some(track) => self.play_track(track, true, true),
            None => {
                tracing::debug!(track_id = %current.id, "End of queue");
                self.set_is_playing(false);
            }
        }
    }

    /// Go back
    ///
    /// If more than [`RESTART_THRESHOLD`] has elapsed, restarts the current
    /// track. Otherwise plays the most recent history entry; the outgoing
    /// track is not pushed, so history shrinks by one. With empty history
    /// the current track starts over.
    pub fn play_prev(&mut self) {
        let Some(current) = self.current_track.clone() else {
            return;
        };

        if self.sink.position() > RESTART_THRESHOLD {
            tracing::debug!(track_id = %current.id, "Restarting current track");
            self.sink.seek(Duration::ZERO);
            self.set_is_playing(true);
            return;
        }

        match self.history.pop() {
            Some(previous) => {
                tracing::info!(track_id = %previous.id, "Playing previous track");
                self.start_track(previous, true);
            }
            None => self.start_track(current, true),
        }
    }

    /// Play the queue entry at `index`
    ///
    /// # Errors
    /// [`PlaybackError::IndexOutOfBounds`] if `index >= queue length`;
    /// nothing changes in that case.
    pub fn skip_to_track_in_queue(&mut self, index: usize) -> Result<()> {
        let track = self
            .queue
            .get(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        self.play_track(track, true, true);
        Ok(())
    }

    /// Set the playing flag and drive the sink accordingly
    ///
    /// Ignored when asked to play with no current track.
    pub fn set_is_playing(&mut self, playing: bool) {
        if playing && self.current_track.is_none() {
            tracing::debug!("Nothing to play");
            return;
        }

        self.set_playing_flag(playing);
        if playing {
            self.start_sink();
        } else {
            self.sink.pause();
        }
    }

    /// Seek within the current track, clamped to `0..=duration`
    ///
    /// With an unknown duration, positions too large for a [`Duration`]
    /// saturate to [`Duration::MAX`].
    pub fn seek_to(&mut self, seconds: f64) {
        let Some(current) = &self.current_track else {
            return;
        };

        let mut seconds = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
        if current.duration > 0 {
            seconds = seconds.min(f64::from(current.duration));
        }
        let position = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX);
        self.sink.seek(position);
    }

    /// Set volume, clamped to `0.0..=1.0`; returns the applied level
    pub fn set_volume(&mut self, level: f32) -> f32 {
        let applied = self.volume.set_level(level);
        self.sink.set_volume(applied);
        applied
    }

    /// Toggle mute; returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.volume.toggle_mute();
        self.sink.set_muted(muted);
        muted
    }

    // ===== Queue Management =====

    /// Add a track to the queue
    ///
    /// Ids already queued are ignored. With shuffle on and a non-empty
    /// queue, the track lands at a uniformly random position.
    /// Returns `true` if the queue changed.
    pub fn add_to_queue(&mut self, track: Track) -> bool {
        let index = (self.shuffle && !self.queue.is_empty())
            .then(|| self.rng.gen_range(0..=self.queue.len()));

        let added = self.queue.add(track, index);
        if added {
            self.emit_queue_changed();
        }
        added
    }

    /// Add several tracks as one contiguous block
    ///
    /// Ids already queued are dropped. With shuffle on, the block goes in at
    /// one random position. Returns the number of tracks added.
    pub fn add_tracks_to_queue(&mut self, tracks: Vec<Track>) -> usize {
        if tracks.is_empty() {
            return 0;
        }

        let index = self
            .shuffle
            .then(|| self.rng.gen_range(0..=self.queue.len()));

        let added = self.queue.add_block(tracks, index);
        if added > 0 {
            self.emit_queue_changed();
        }
        added
    }

    /// Replace the queue with `tracks` and play the first one
    ///
    /// With shuffle on, the batch is shuffled first. History is cleared.
    pub fn play_tracks(&mut self, mut tracks: Vec<Track>) {
        if self.shuffle {
            shuffle_tracks(&mut tracks, self.shuffle_strategy, &mut self.rng);
        }
        let Some(first) = tracks.first().cloned() else {
            return;
        };

        self.queue.set(tracks);
        self.history.clear();
        self.emit_queue_changed();

        tracing::info!(track_id = %first.id, queue_length = self.queue.len(), "Playing batch");
        self.start_track(first, true);
    }

    /// Fetch an album and add its tracks to the queue
    ///
    /// # Errors
    /// Fails if no server is configured, the fetch fails or the album is
    /// empty. The queue is untouched on error.
    pub async fn add_album_to_queue(&mut self, album_id: &str) -> Result<usize> {
        let tracks = self.fetch_album_tracks(album_id).await?;
        Ok(self.add_tracks_to_queue(tracks))
    }

    /// Fetch an album and play it as the new queue
    ///
    /// # Errors
    /// Same as [`add_album_to_queue`](Self::add_album_to_queue).
    pub async fn play_album(&mut self, album_id: &str) -> Result<()> {
        let tracks = self.fetch_album_tracks(album_id).await?;
        self.play_tracks(tracks);
        Ok(())
    }

    /// Fetch an album, turn shuffle on and play it shuffled
    ///
    /// The existing queue is only replaced once the fetch succeeds, so a
    /// failure leaves queue and shuffle flag as they were.
    ///
    /// # Errors
    /// Same as [`add_album_to_queue`](Self::add_album_to_queue).
    pub async fn shuffle_album(&mut self, album_id: &str) -> Result<()> {
        let tracks = self.fetch_album_tracks(album_id).await?;

        // The queue is about to be replaced, so nothing is reordered here
        if !self.shuffle {
            self.shuffle = true;
            self.emit(PlayerEvent::ShuffleChanged { enabled: true });
        }
        self.play_tracks(tracks);
        Ok(())
    }

    /// Remove every queue entry with `track_id`
    ///
    /// Current track and history are not affected.
    pub fn remove_track_from_queue(&mut self, track_id: &str) -> bool {
        let removed = self.queue.remove(track_id);
        if removed {
            self.emit_queue_changed();
        }
        removed
    }

    /// Empty queue and history, drop the current track and stop
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.history.clear();
        self.auto_play = false;

        let previous_track_id = self.current_track.take().map(|t| t.id);
        self.set_playing_flag(false);
        self.sink.pause();

        self.emit_queue_changed();
        self.emit(PlayerEvent::CurrentTrackChanged {
            track_id: None,
            previous_track_id,
        });
        tracing::info!("Queue cleared");
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle; returns the new state
    ///
    /// Enabling moves the current track to the head of the queue and
    /// shuffles everything after it. Disabling keeps the current order.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;

        if self.shuffle && self.queue.len() > 1 {
            if let Some(current) = self.current_track.clone() {
                let strategy = self.shuffle_strategy;
                let rng = &mut self.rng;
                self.queue
                    .reorder_after(&current, |rest| shuffle_tracks(rest, strategy, rng));
                self.emit_queue_changed();
            }
        }

        self.emit(PlayerEvent::ShuffleChanged {
            enabled: self.shuffle,
        });
        self.shuffle
    }

    /// Cycle repeat Off -> All -> One -> Off; returns the new mode
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.emit(PlayerEvent::RepeatChanged { mode: self.repeat });
        self.repeat
    }

    // ===== Sink Events =====

    /// React to one event reported by the sink
    pub fn handle_sink_event(&mut self, event: SinkEvent) {
        match event {
            SinkEvent::Ended => {
                tracing::debug!("Track ended");
                self.play_next();
            }
            SinkEvent::TimeUpdate(position) => {
                let position_ms = u64::try_from(position.as_millis()).unwrap_or(u64::MAX);
                self.emit(PlayerEvent::PositionChanged { position_ms });
            }
            SinkEvent::Error(message) => {
                tracing::warn!(error = %message, "Audio sink error");
                self.set_playing_flag(false);
                self.emit(PlayerEvent::Error { message });
            }
        }
    }

    /// Drain and handle every event the sink has queued
    ///
    /// Returns the number of events handled.
    pub fn pump_sink_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.sink.poll_event() {
            self.handle_sink_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for in-flight scrobbles to complete
    pub async fn settle_notifications(&mut self) {
        self.notifier.settle().await;
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Queue in play order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// History, oldest first
    pub fn history(&self) -> Vec<&Track> {
        self.history.iter().collect()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Elapsed time reported by the sink
    pub fn position(&self) -> Duration {
        self.sink.position()
    }

    // ===== Events =====

    /// Take all buffered events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Receive events as they are emitted
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events_tx.subscribe()
    }

    // ===== Internal =====

    /// Make `track` current without touching queue or history
    fn start_track(&mut self, track: Track, auto_play: bool) {
        self.notifier.notify(&track.id);
        self.set_playing_flag(auto_play);

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());
        let track_id = track.id.clone();
        self.current_track = Some(track);
        self.auto_play = auto_play;

        self.emit(PlayerEvent::CurrentTrackChanged {
            track_id: Some(track_id),
            previous_track_id,
        });
        self.load_current_into_sink();
    }

    /// Load the current track and consume the auto-play intent
    fn load_current_into_sink(&mut self) {
        let Some(track) = &self.current_track else {
            return;
        };
        self.sink.load(&track.url);

        if std::mem::take(&mut self.auto_play) {
            self.start_sink();
        }
    }

    /// Ask the sink to play; a refusal clears the playing flag
    fn start_sink(&mut self) {
        if let Err(e) = self.sink.play() {
            tracing::warn!(error = %e, "Playback refused by audio sink");
            self.set_playing_flag(false);
        }
    }

    fn set_playing_flag(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit(PlayerEvent::PlaybackStateChanged {
                is_playing: playing,
            });
        }
    }

    async fn fetch_album_tracks(&self, album_id: &str) -> Result<Vec<Track>> {
        let api = self.api.clone().ok_or(PlaybackError::NotConfigured)?;

        let album = api.get_album(album_id).await?;
        if album.songs.is_empty() {
            return Err(PlaybackError::EmptyAlbum(album_id.to_string()));
        }

        tracing::debug!(album_id, songs = album.songs.len(), "Album fetched");
        songs_to_tracks(&album.songs, Some(api.as_ref()), self.cover_art_size)
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Record an event, persist what it touched and broadcast it
    fn emit(&mut self, event: PlayerEvent) {
        if event.touches_queue() {
            self.store.save_queue(self.queue.tracks());
        }
        if event.touches_current_track() {
            self.store.save_current_track(self.current_track.as_ref());
        }

        // Err only means nobody is subscribed
        let _ = self.events_tx.send(event.clone());
        self.pending_events.push(event);
    }
}

impl std::fmt::Debug for PlaybackManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackManager")
            .field("current_track", &self.current_track.as_ref().map(|t| &t.id))
            .field("queue_length", &self.queue.len())
            .field("history_length", &self.history.len())
            .field("is_playing", &self.is_playing)
            .field("shuffle", &self.shuffle)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}
