//! Play queue
//!
//! Ordered list of tracks, unique by id. The current track lives outside
//! the queue; the queue only knows positions and membership.

use crate::track::Track;

/// Ordered play queue, unique by track id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue contents
    ///
    /// The batch is taken as-is, duplicates included; callers assigning a
    /// whole album own its ordering.
    pub fn set(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// Append a track, or insert it at `index` (clamped to the tail)
    ///
    /// Returns `false` if a track with the same id is already queued.
    pub fn add(&mut self, track: Track, index: Option<usize>) -> bool {
        if self.contains(&track.id) {
            return false;
        }

        match index {
            Some(i) => self.tracks.insert(i.min(self.tracks.len()), track),
            None => self.tracks.push(track),
        }
        true
    }

    /// Insert a contiguous block of tracks at `index` (or the tail)
    ///
    /// Tracks whose id is already queued are dropped. Returns the number
    /// of tracks actually inserted.
    pub fn add_block(&mut self, tracks: Vec<Track>, index: Option<usize>) -> usize {
        let fresh: Vec<Track> = tracks
            .into_iter()
            .filter(|t| !self.contains(&t.id))
            .collect();
        let added = fresh.len();

        let at = index.map_or(self.tracks.len(), |i| i.min(self.tracks.len()));
        self.tracks.splice(at..at, fresh);
        added
    }

    /// Remove every track with the given id
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, track_id: &str) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != track_id);
        self.tracks.len() != before
    }

    /// Move the track with `current_id` to the head and apply `reorder` to
    /// the rest
    ///
    /// If the id is not queued, the given `current` track becomes the head.
    pub fn reorder_after(&mut self, current: &Track, reorder: impl FnOnce(&mut [Track])) {
        let mut rest: Vec<Track> = self
            .tracks
            .drain(..)
            .filter(|t| t.id != current.id)
            .collect();
        reorder(&mut rest);

        self.tracks.reserve(rest.len() + 1);
        self.tracks.push(current.clone());
        self.tracks.extend(rest);
    }

    /// Remove all tracks
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Position of a track id
    pub fn position(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.position(track_id).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    /// All queued tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
