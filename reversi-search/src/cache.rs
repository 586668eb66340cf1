//! Transposition cache for values of already-searched positions.
//!
//! Entries are keyed by the position reached *after* a move together with the
//! depth that was left to search below it, so a shallow result is never reused
//! for a deeper search. The stored value is the score for the player who moved
//! into the position.

use crate::{Position, PositionKey};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub position: PositionKey,
    pub depth: u32,
}

impl CacheKey {
    pub fn new<P: Position>(position: &P, depth: u32) -> Self {
        Self {
            position: PositionKey::of(position),
            depth,
        }
    }
}

/// An unbounded map from searched positions to their values.
///
/// Not synchronized: concurrent searches need caches of their own.
#[derive(Clone, Debug, Default)]
pub struct TranspositionCache {
    scores: HashMap<CacheKey, i32>,
    hits: u64,
    misses: u64,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value, counting the hit or miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<i32> {
        let score = self.scores.get(key).copied();
        match score {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        score
    }

    pub fn put(&mut self, key: CacheKey, score: i32) {
        self.scores.insert(key, score);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Lookups that found a value since construction.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that found nothing since construction.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Forget every stored value. Counters are kept.
    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_board::Game;

    #[test]
    fn depth_is_part_of_the_key() {
        let game = Game::default();
        let mut cache = TranspositionCache::new();
        cache.put(CacheKey::new(&game, 3), 5);

        assert_eq!(cache.get(&CacheKey::new(&game, 3)), Some(5));
        assert_eq!(cache.get(&CacheKey::new(&game, 2)), None);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn put_overwrites() {
        let game = Game::default();
        let key = CacheKey::new(&game, 1);
        let mut cache = TranspositionCache::new();
        cache.put(key, 5);
        cache.put(key, -2);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key), Some(-2));
    }

    #[test]
    fn clear_keeps_counters() {
        let game = Game::default();
        let key = CacheKey::new(&game, 1);
        let mut cache = TranspositionCache::new();
        cache.put(key, 5);
        let _ = cache.get(&key);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.get(&key), None);
    }
}
