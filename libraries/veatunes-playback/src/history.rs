//! Back-navigation stack
//!
//! Holds previously-current tracks in the order they were left. The top is
//! what "previous" returns to. Entries may repeat; the queue's uniqueness rule
//! does not apply here.

use crate::track::Track;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct History {
    /// Oldest at the front, most recent at the back
    entries: VecDeque<Track>,
    capacity: usize,
}

impl History {
    /// Stack holding at most `capacity` tracks; 0 disables history
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    /// Record a track that is being left, evicting the oldest when full
    pub fn push(&mut self, track: Track) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(track);
    }

    pub fn pop(&mut self) -> Option<Track> {
        self.entries.pop_back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Track {}", id),
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            url: format!("https://music.test/stream/{}", id),
            cover_art: None,
            duration: 180,
            album_id: "al-1".to_string(),
            artist_id: "ar-1".to_string(),
            starred: false,
        }
    }

    fn ids(history: &History) -> Vec<&str> {
        history.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn pops_in_reverse_order_of_leaving() {
        let mut history = History::new(10);
        for id in ["a", "b", "c"] {
            history.push(track(id));
        }

        assert_eq!(history.pop().map(|t| t.id), Some("c".to_string()));
        assert_eq!(history.pop().map(|t| t.id), Some("b".to_string()));
        assert_eq!(ids(&history), vec!["a"]);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut history = History::new(3);
        for id in ["1", "2", "3", "4", "5"] {
            history.push(track(id));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(ids(&history), vec!["3", "4", "5"]);
    }

    #[test]
    fn keeps_repeated_entries() {
        let mut history = History::new(5);
        history.push(track("x"));
        history.push(track("x"));

        assert_eq!(ids(&history), vec!["x", "x"]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut history = History::new(0);
        history.push(track("1"));

        assert!(history.is_empty());
        assert!(history.pop().is_none());
        assert_eq!(history.capacity(), 0);
    }

    #[test]
    fn clear_empties_stack() {
        let mut history = History::new(4);
        history.push(track("1"));
        history.push(track("2"));

        history.clear();
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }
}
