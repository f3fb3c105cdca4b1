//! Shuffle algorithms for queue randomization
//!
//! Implements both pure random (Fisher-Yates) and smart shuffle algorithms.
//! The caller owns the RNG so seeded managers shuffle reproducibly.

use crate::track::Track;
use crate::types::ShuffleStrategy;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, VecDeque};

/// Shuffle a slice of tracks in place with the given strategy
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &mut [Track], strategy: ShuffleStrategy, rng: &mut R) {
    match strategy {
        ShuffleStrategy::Random => shuffle_random(tracks, rng),
        ShuffleStrategy::Smart => shuffle_smart(tracks, rng),
    }
}

/// Pure random shuffle using Fisher-Yates algorithm
///
/// Each track has equal probability of appearing at any position.
fn shuffle_random<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}

/// Smart shuffle algorithm
///
/// 1. Group tracks by artist
/// 2. Randomize within each group and randomize the group order
/// 3. Round-robin through the groups so the same artist is spread out
fn shuffle_smart<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    if tracks.len() <= 2 {
        shuffle_random(tracks, rng);
        return;
    }

    let mut by_artist: HashMap<&str, Vec<Track>> = HashMap::new();
    for track in tracks.iter() {
        by_artist
            .entry(track.artist.as_str())
            .or_default()
            .push(track.clone());
    }

    // HashMap order is not seed-stable; sort before shuffling groups
    let mut groups: Vec<(&str, Vec<Track>)> = by_artist.into_iter().collect();
    groups.sort_by(|a, b| a.0.cmp(b.0));
    groups.shuffle(rng);

    let mut groups: Vec<VecDeque<Track>> = groups
        .into_iter()
        .map(|(_, mut artist_tracks)| {
            artist_tracks.shuffle(rng);
            VecDeque::from(artist_tracks)
        })
        .collect();

    let mut result = Vec::with_capacity(tracks.len());
    while result.len() < tracks.len() {
        for group in &mut groups {
            if let Some(track) = group.pop_front() {
                result.push(track);
            }
        }
    }

    for (slot, track) in tracks.iter_mut().zip(result) {
        *slot = track;
    }
}
