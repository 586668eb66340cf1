//! State shared by every node of one search.

use crate::cache::{CacheKey, TranspositionCache};
use crate::{OpeningBook, Position};
use reversi_board::Player;
use std::time::Instant;
use tracing::{debug, trace};

/// Counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, including terminal and horizon nodes.
    pub nodes: u64,
    pub cache_hits: u64,
    pub book_hits: u64,
    /// Whether the time budget cut the root loop short.
    pub timed_out: bool,
}

/// The cache, book and deadline a search consults, borrowed for its duration.
///
/// A bare context searches without any of them.
#[derive(Debug, Default)]
pub struct SearchContext<'a> {
    cache: Option<&'a mut TranspositionCache>,
    book: Option<&'a OpeningBook>,
    deadline: Option<(Instant, u32)>,
    stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse and extend `cache` while searching.
    pub fn with_cache(mut self, cache: &'a mut TranspositionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Take the scores of known openings from `book` instead of searching them.
    pub fn with_book(mut self, book: &'a OpeningBook) -> Self {
        self.book = Some(book);
        self
    }

    /// Stop examining root squares once `deadline` passes. `root_depth` is the
    /// depth the search starts from, which identifies the root loop.
    pub fn with_deadline(mut self, deadline: Instant, root_depth: u32) -> Self {
        self.deadline = Some((deadline, root_depth));
        self
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub(crate) fn visit(&mut self) {
        self.stats.nodes += 1;
    }

    /// Whether the loop over squares at `depth` must stop now. Only the root loop
    /// stops, and only after `searched_any` of its squares completed.
    pub(crate) fn should_stop(&mut self, depth: u32, searched_any: bool) -> bool {
        let deadline = match self.deadline {
            Some((deadline, root_depth)) if root_depth == depth && searched_any => deadline,
            _ => return false,
        };

        if Instant::now() < deadline {
            return false;
        }

        if !self.stats.timed_out {
            debug!(depth, "time budget spent, stopping root loop");
        }
        self.stats.timed_out = true;
        true
    }

    /// The book's score for the sequence that reached `child`, for `mover`.
    fn book_score<P: Position>(&mut self, child: &P, mover: Player) -> Option<i32> {
        let score = self.book?.score(child.moves(), mover)?;
        self.stats.book_hits += 1;
        trace!(moves = child.moves().len(), score, "opening book hit");
        Some(score)
    }

    /// The cached value of `child` searched `depth` deep, for the player who moved into it.
    pub(crate) fn cached_score<P: Position>(&mut self, child: &P, depth: u32) -> Option<i32> {
        let score = self.cache.as_mut()?.get(&CacheKey::new(child, depth))?;
        self.stats.cache_hits += 1;
        trace!(depth, score, "transposition cache hit");
        Some(score)
    }

    /// A value for the played child `child` that needs no search, for `mover`.
    /// The book takes precedence over the cache.
    pub(crate) fn known_score<P: Position>(
        &mut self,
        child: &P,
        mover: Player,
        depth: u32,
    ) -> Option<i32> {
        self.book_score(child, mover)
            .or_else(|| self.cached_score(child, depth))
    }

    /// Book hits so far. Taken before searching a child and handed back to [`Self::store`].
    #[inline]
    pub(crate) fn book_hits(&self) -> u64 {
        self.stats.book_hits
    }

    /// Remember the value of `child` searched `depth` deep, for the player who moved into it.
    ///
    /// Skipped when the book answered anywhere below `child` since `book_hits_before`:
    /// that value depends on the line that reached `child`, which the cache key ignores.
    pub(crate) fn store<P: Position>(
        &mut self,
        child: &P,
        depth: u32,
        score: i32,
        book_hits_before: u64,
    ) {
        if self.stats.book_hits != book_hits_before {
            trace!(depth, "subtree used the opening book, not caching");
            return;
        }
        if let Some(cache) = self.cache.as_mut() {
            cache.put(CacheKey::new(child, depth), score);
        }
    }
}
