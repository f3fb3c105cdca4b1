//! Plain-text rendering of player state

use std::fmt::Write;
use veatunes_playback::{PlaybackManager, PlaybackState, RepeatMode, Track};

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up
///
/// Negative input renders as `0:00`.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

fn track_line(track: &Track) -> String {
    format!(
        "{} - {} [{}]",
        track.name,
        track.artist,
        format_duration(i64::from(track.duration))
    )
}

fn repeat_label(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::Off => "off",
        RepeatMode::All => "all",
        RepeatMode::One => "one",
    }
}

/// Current track, modes and queue, one entry per line
///
/// Queue positions are 1-based; the current track is marked with `>`.
pub fn render_status(manager: &PlaybackManager) -> String {
    let mut out = String::new();

    match manager.current_track() {
        Some(track) => {
            let state = match manager.state() {
                PlaybackState::Playing => "playing",
                _ => "paused",
            };
            let _ = writeln!(out, "Now playing: {} ({})", track_line(track), state);
        }
        None => {
            let _ = writeln!(out, "Nothing playing");
        }
    }

    let _ = writeln!(
        out,
        "Shuffle: {}  Repeat: {}",
        if manager.shuffle() { "on" } else { "off" },
        repeat_label(manager.repeat())
    );

    let queue = manager.queue();
    if queue.is_empty() {
        let _ = writeln!(out, "Queue is empty");
        return out;
    }

    let current_id = manager.current_track().map(|t| t.id.as_str());
    let total: i64 = queue.iter().map(|t| i64::from(t.duration)).sum();
    let _ = writeln!(
        out,
        "Queue ({} tracks, {}):",
        queue.len(),
        format_duration(total)
    );
    for (i, track) in queue.iter().enumerate() {
        let marker = if Some(track.id.as_str()) == current_id {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(out, "{} {:>3}. {}", marker, i + 1, track_line(track));
    }

    out
}
