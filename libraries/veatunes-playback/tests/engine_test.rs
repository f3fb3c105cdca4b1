//! Playback engine integration tests
//!
//! Drives `PlaybackManager` through its public API with a recording sink,
//! an in-memory store and a fake server. Real-world flows: playing an
//! album, next/previous buttons, end of queue, reload.

mod common;

use common::*;
use std::time::Duration;
use veatunes_playback::{
    MemoryStore, PlaybackConfig, PlaybackError, PlaybackState, PlayerEvent, PlayerStore,
    RepeatMode, SinkEvent,
};

// ===== Queue Building =====

#[test]
fn add_to_queue_dedups_by_id() {
    let mut h = harness();

    assert!(h.manager.add_to_queue(track("A")));
    assert!(h.manager.add_to_queue(track("B")));
    h.manager.drain_events();

    // Same id again: no change, no event
    assert!(!h.manager.add_to_queue(track("A")));

    assert_eq!(ids(h.manager.queue()), vec!["A", "B"]);
    assert!(!h.manager.has_pending_events());
}

#[test]
fn add_to_queue_with_shuffle_inserts_somewhere() {
    let mut h = harness();
    h.manager.add_tracks_to_queue(tracks(&["A", "B", "C"]));
    h.manager.toggle_shuffle();

    assert!(h.manager.add_to_queue(track("D")));

    let mut queued = ids(h.manager.queue());
    assert_eq!(queued.len(), 4);
    queued.sort();
    assert_eq!(queued, vec!["A", "B", "C", "D"]);
}

#[test]
fn add_tracks_to_queue_skips_queued_ids() {
    let mut h = harness();
    h.manager.add_tracks_to_queue(tracks(&["A", "B"]));

    let added = h.manager.add_tracks_to_queue(tracks(&["B", "C", "D"]));

    assert_eq!(added, 2);
    assert_eq!(ids(h.manager.queue()), vec!["A", "B", "C", "D"]);
}

#[test]
fn add_tracks_to_queue_with_shuffle_keeps_block_contiguous() {
    let mut h = harness();
    h.manager.add_tracks_to_queue(tracks(&["A", "B", "C", "D"]));
    h.manager.toggle_shuffle();

    h.manager.add_tracks_to_queue(tracks(&["X", "Y", "Z"]));

    let queued = ids(h.manager.queue());
    let start = queued.iter().position(|id| id == "X").unwrap();
    assert_eq!(queued[start..start + 3], ["X", "Y", "Z"]);
    assert_eq!(queued.len(), 7);
}

#[test]
fn remove_current_track_from_queue_keeps_it_current() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));
    h.manager.play_next();

    assert!(h.manager.remove_track_from_queue("B"));

    assert_eq!(current_id(&h.manager).as_deref(), Some("B"));
    assert_eq!(history_ids(&h.manager), vec!["A"]);
    assert_eq!(ids(h.manager.queue()), vec!["A", "C"]);
}

// ===== Transitions =====

#[test]
fn direct_play_starts_new_context() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));
    h.manager.play_next();
    h.manager.play_next();
    assert_eq!(history_ids(&h.manager), vec!["A", "B"]);

    h.manager.play_track(track("T"), true, false);

    assert_eq!(ids(h.manager.queue()), vec!["T"]);
    assert!(h.manager.history().is_empty());
    assert_eq!(current_id(&h.manager).as_deref(), Some("T"));
    assert_eq!(h.sink.last_loaded().as_deref(), Some("https://music.test/stream/T"));
    assert!(h.sink.state().playing);
}

#[test]
fn next_walks_queue_and_records_history() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));

    h.manager.play_next();
    assert_eq!(current_id(&h.manager).as_deref(), Some("B"));
    assert_eq!(history_ids(&h.manager), vec!["A"]);

    h.manager.play_next();
    assert_eq!(current_id(&h.manager).as_deref(), Some("C"));
    assert_eq!(history_ids(&h.manager), vec!["A", "B"]);
}

#[test]
fn next_at_end_without_repeat_stops() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));
    h.manager.skip_to_track_in_queue(2).unwrap();
    assert!(h.manager.is_playing());

    h.manager.play_next();

    assert_eq!(current_id(&h.manager).as_deref(), Some("C"));
    assert!(!h.manager.is_playing());
    assert_eq!(h.manager.state(), PlaybackState::Paused);
    assert!(!h.sink.state().playing);
}

#[test]
fn next_at_end_with_repeat_all_wraps() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));
    h.manager.skip_to_track_in_queue(2).unwrap();
    assert_eq!(h.manager.toggle_repeat(), RepeatMode::All);

    h.manager.play_next();

    assert_eq!(current_id(&h.manager).as_deref(), Some("A"));
    assert!(h.manager.is_playing());
}

#[test]
fn next_with_repeat_one_reloads_same_track() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B"]));
    h.manager.toggle_repeat();
    h.manager.toggle_repeat();
    let loads_before = h.sink.state().loaded.len();

    h.manager.play_next();

    assert_eq!(current_id(&h.manager).as_deref(), Some("A"));
    assert_eq!(h.sink.state().loaded.len(), loads_before + 1);
}

#[test]
fn next_with_empty_queue_is_noop() {
    let mut h = harness();
    h.manager.play_track(track("A"), true, false);
    h.manager.remove_track_from_queue("A");
    h.manager.drain_events();

    h.manager.play_next();

    assert_eq!(current_id(&h.manager).as_deref(), Some("A"));
    assert!(!h.manager.has_pending_events());
}

#[test]
fn prev_after_three_seconds_restarts_current() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B"]));
    h.manager.play_next();
    h.sink.set_position(Duration::from_secs(12));

    h.manager.play_prev();

    assert_eq!(current_id(&h.manager).as_deref(), Some("B"));
    assert_eq!(history_ids(&h.manager), vec!["A"]);
    assert_eq!(h.manager.position(), Duration::ZERO);
    assert!(h.manager.is_playing());
}

#[test]
fn prev_within_three_seconds_pops_history() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));
    h.manager.play_next();
    h.manager.play_next();
    h.sink.set_position(Duration::from_secs(3));

    h.manager.play_prev();

    assert_eq!(current_id(&h.manager).as_deref(), Some("B"));
    assert_eq!(history_ids(&h.manager), vec!["A"]);
    assert!(h.manager.is_playing());
}

#[test]
fn prev_with_empty_history_replays_current() {
    let mut h = harness();
    h.manager.play_track(track("A"), true, false);
    h.sink.set_position(Duration::from_secs(1));
    let loads_before = h.sink.state().loaded.len();

    h.manager.play_prev();

    assert_eq!(current_id(&h.manager).as_deref(), Some("A"));
    assert!(h.manager.history().is_empty());
    assert_eq!(h.sink.state().loaded.len(), loads_before + 1);
}

#[test]
fn prev_without_current_track_is_noop() {
    let mut h = harness();
    h.manager.play_prev();
    assert_eq!(h.manager.state(), PlaybackState::Idle);
    assert!(h.sink.state().loaded.is_empty());
}

#[test]
fn skip_to_index_out_of_bounds_errors() {
    let mut h = harness();
    h.manager.add_tracks_to_queue(tracks(&["A", "B"]));

    let result = h.manager.skip_to_track_in_queue(5);

    assert!(matches!(result, Err(PlaybackError::IndexOutOfBounds(5))));
    assert!(h.manager.current_track().is_none());
}

#[test]
fn toggle_repeat_cycles() {
    let mut h = harness();
    let modes: Vec<RepeatMode> = (0..4).map(|_| h.manager.toggle_repeat()).collect();

    assert_eq!(
        modes,
        vec![
            RepeatMode::All,
            RepeatMode::One,
            RepeatMode::Off,
            RepeatMode::All
        ]
    );
}

#[test]
fn clear_queue_resets_everything() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));
    h.manager.play_next();

    h.manager.clear_queue();

    assert!(h.manager.queue().is_empty());
    assert!(h.manager.history().is_empty());
    assert!(h.manager.current_track().is_none());
    assert!(!h.manager.is_playing());
    assert_eq!(h.manager.state(), PlaybackState::Idle);
    assert!(!h.sink.state().playing);
}

// ===== Audio Sink Binding =====

#[test]
fn refused_autoplay_clears_playing_flag() {
    let mut h = harness();
    h.sink.refuse_play(true);

    h.manager.play_track(track("A"), true, false);

    assert_eq!(current_id(&h.manager).as_deref(), Some("A"));
    assert!(!h.manager.is_playing());

    let events = h.manager.drain_events();
    assert!(events.contains(&PlayerEvent::PlaybackStateChanged { is_playing: true }));
    assert_eq!(
        events.last(),
        Some(&PlayerEvent::PlaybackStateChanged { is_playing: false })
    );
}

#[test]
fn set_is_playing_drives_sink() {
    let mut h = harness();
    h.manager.play_track(track("A"), false, false);
    assert_eq!(h.sink.state().play_calls, 0);

    h.manager.set_is_playing(true);
    assert!(h.sink.state().playing);

    h.manager.set_is_playing(false);
    assert!(!h.sink.state().playing);
    assert_eq!(h.manager.state(), PlaybackState::Paused);
}

#[test]
fn ended_event_advances_queue() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B"]));
    h.sink.push_event(SinkEvent::TimeUpdate(Duration::from_secs(199)));
    h.sink.push_event(SinkEvent::Ended);

    let handled = h.manager.pump_sink_events();

    assert_eq!(handled, 2);
    assert_eq!(current_id(&h.manager).as_deref(), Some("B"));
    assert!(h
        .manager
        .drain_events()
        .contains(&PlayerEvent::PositionChanged {
            position_ms: 199_000
        }));
}

#[test]
fn volume_and_mute_reach_sink() {
    let mut h = harness();

    h.manager.set_volume(0.4);
    h.manager.toggle_mute();

    let state = h.sink.state();
    assert_eq!(state.volume, 0.4);
    assert!(state.muted);
}

#[test]
fn subscribers_see_transitions() {
    let mut h = harness();
    let mut rx = h.manager.subscribe();

    h.manager.play_track(track("A"), true, false);

    let mut received = Vec::new();
    while let Ok(event) = rx.try_recv() {
        received.push(event);
    }
    assert_eq!(received, h.manager.drain_events());
    assert!(received.contains(&PlayerEvent::CurrentTrackChanged {
        track_id: Some("A".to_string()),
        previous_track_id: None,
    }));
}

// ===== Persistence =====

#[test]
fn state_survives_restart_without_autoplay() {
    let store = MemoryStore::new();
    let mut first = harness_with(seeded_config(), FakeApi::new(), store.clone());
    first.manager.play_tracks(tracks(&["A", "B", "C"]));
    first.manager.play_next();
    drop(first);

    let restored = harness_with(seeded_config(), FakeApi::new(), store);

    assert_eq!(ids(restored.manager.queue()), vec!["A", "B", "C"]);
    assert_eq!(current_id(&restored.manager).as_deref(), Some("B"));
    assert!(!restored.manager.is_playing());
    assert_eq!(restored.manager.state(), PlaybackState::Paused);

    // Loaded, never played
    let sink = restored.sink.state();
    assert_eq!(sink.loaded, vec!["https://music.test/stream/B"]);
    assert_eq!(sink.play_calls, 0);
}

#[test]
fn clear_queue_erases_persisted_state() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B"]));
    h.manager.clear_queue();

    assert!(h.store.load_queue().is_empty());
    assert!(h.store.load_current_track().is_none());
}

#[test]
fn removing_updates_persisted_queue() {
    let mut h = harness();
    h.manager.add_tracks_to_queue(tracks(&["A", "B", "C"]));
    h.manager.remove_track_from_queue("B");

    assert_eq!(ids(&h.store.load_queue()), vec!["A", "C"]);
}

// ===== Scrobbling =====

#[tokio::test]
async fn every_started_track_is_scrobbled() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["A", "B", "C"]));
    h.manager.play_next();
    h.manager.skip_to_track_in_queue(2).unwrap();

    h.manager.settle_notifications().await;

    assert_eq!(h.api.scrobbles(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn scrobble_failures_do_not_interrupt_playback() {
    let mut h = harness_with(
        seeded_config(),
        FakeApi::failing_scrobbles(),
        MemoryStore::new(),
    );

    h.manager.play_track(track("A"), true, false);
    h.manager.settle_notifications().await;

    assert_eq!(h.api.scrobbles(), vec!["A"]);
    assert!(h.manager.is_playing());
    assert!(!h
        .manager
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlayerEvent::Error { .. })));
}

// ===== Albums =====

#[tokio::test]
async fn play_album_replaces_queue() {
    let api = FakeApi::new().with_album("al-9", &["s1", "s2", "s3"]);
    let mut h = harness_with(seeded_config(), api, MemoryStore::new());
    h.manager.play_track(track("old"), true, false);

    h.manager.play_album("al-9").await.unwrap();

    assert_eq!(ids(h.manager.queue()), vec!["s1", "s2", "s3"]);
    assert_eq!(current_id(&h.manager).as_deref(), Some("s1"));
    assert!(h.manager.history().is_empty());

    let first = &h.manager.queue()[0];
    assert_eq!(first.url, "https://music.test/rest/stream?id=s1");
    assert_eq!(
        first.cover_art.as_deref(),
        Some("https://music.test/rest/getCoverArt?id=al-9&size=300")
    );
    assert_eq!(first.duration, 210);
}

#[tokio::test]
async fn play_album_with_shuffle_keeps_every_song() {
    let api = FakeApi::new().with_album("al-9", &["s1", "s2", "s3", "s4", "s5"]);
    let config = PlaybackConfig {
        shuffle: true,
        ..seeded_config()
    };
    let mut h = harness_with(config, api, MemoryStore::new());

    h.manager.play_album("al-9").await.unwrap();

    let mut queued = ids(h.manager.queue());
    assert_eq!(current_id(&h.manager), Some(queued[0].clone()));
    queued.sort();
    assert_eq!(queued, vec!["s1", "s2", "s3", "s4", "s5"]);
}

#[tokio::test]
async fn shuffle_album_enables_shuffle_after_fetch() {
    let api = FakeApi::new().with_album("al-9", &["s1", "s2", "s3", "s4"]);
    let mut h = harness_with(seeded_config(), api, MemoryStore::new());
    h.manager.drain_events();

    h.manager.shuffle_album("al-9").await.unwrap();

    assert!(h.manager.shuffle());
    let mut queued = ids(h.manager.queue());
    assert_eq!(current_id(&h.manager), Some(queued[0].clone()));
    queued.sort();
    assert_eq!(queued, vec!["s1", "s2", "s3", "s4"]);

    let events = h.manager.drain_events();
    assert_eq!(events[0], PlayerEvent::ShuffleChanged { enabled: true });
}

#[tokio::test]
async fn failed_shuffle_album_leaves_queue_and_flag() {
    let mut h = harness();
    h.manager.play_tracks(tracks(&["t1", "t2", "t3", "t4", "t5", "t6"]));
    h.manager.skip_to_track_in_queue(3).unwrap();
    h.manager.drain_events();

    let result = h.manager.shuffle_album("missing").await;

    assert!(result.is_err());
    assert!(!h.manager.shuffle());
    assert_eq!(ids(h.manager.queue()), vec!["t1", "t2", "t3", "t4", "t5", "t6"]);
    assert_eq!(ids(&h.store.load_queue()), vec!["t1", "t2", "t3", "t4", "t5", "t6"]);
    assert_eq!(current_id(&h.manager).as_deref(), Some("t4"));
    assert!(!h.manager.has_pending_events());
}

#[tokio::test]
async fn add_album_to_queue_appends() {
    let api = FakeApi::new().with_album("al-9", &["s1", "s2"]);
    let mut h = harness_with(seeded_config(), api, MemoryStore::new());
    h.manager.play_track(track("A"), true, false);

    let added = h.manager.add_album_to_queue("al-9").await.unwrap();

    assert_eq!(added, 2);
    assert_eq!(ids(h.manager.queue()), vec!["A", "s1", "s2"]);
    assert_eq!(current_id(&h.manager).as_deref(), Some("A"));
}

#[tokio::test]
async fn missing_album_error_propagates() {
    let mut h = harness();
    h.manager.add_to_queue(track("A"));

    let result = h.manager.add_album_to_queue("nope").await;

    match result {
        Err(PlaybackError::Api(e)) => assert!(e.is_not_found()),
        other => panic!("expected not-found error, got {:?}", other),
    }
    assert_eq!(ids(h.manager.queue()), vec!["A"]);
}

#[tokio::test]
async fn empty_album_is_rejected() {
    let api = FakeApi::new().with_album("al-empty", &[]);
    let mut h = harness_with(seeded_config(), api, MemoryStore::new());

    let result = h.manager.play_album("al-empty").await;

    assert!(matches!(result, Err(PlaybackError::EmptyAlbum(id)) if id == "al-empty"));
    assert!(h.manager.current_track().is_none());
}
