//! A configurable search engine that owns its cache and opening book between moves.

use crate::alphabeta::{self, Roles, MAX_SCORE, MIN_SCORE};
use crate::{
    minimax, OpeningBook, Position, ScoredMove, SearchContext, SearchStats, TranspositionCache,
};
use derive_more::{Display, Error};
use reversi_board::IllegalMoveError;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// A non-terminal position with legal squares produced no candidate.
    #[display(fmt = "no best square found at depth {}", depth)]
    NoBestSquare { depth: u32 },
    #[display(fmt = "search attempted an illegal move: {}", source)]
    IllegalMove { source: IllegalMoveError },
}

impl From<IllegalMoveError> for SearchError {
    fn from(source: IllegalMoveError) -> Self {
        Self::IllegalMove { source }
    }
}

/// When the transposition cache is emptied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheMode {
    /// Search without a cache.
    Disabled,
    /// Start every search with an empty cache.
    PerSearch,
    /// Keep values across searches for the lifetime of the [`Searcher`].
    Persistent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search below the root.
    pub max_depth: u32,
    /// Use alpha-beta instead of plain minimax.
    pub pruning: bool,
    /// Values found through an opening book line are never cached: the cache
    /// does not know which line reached a position.
    pub cache: CacheMode,
    /// Stop examining root squares after this long. At least one root square is
    /// always searched to completion.
    pub time_budget: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::alpha_beta()
    }
}

impl SearchConfig {
    /// Plain minimax, 3 plies.
    pub const fn minimax() -> Self {
        Self {
            max_depth: 3,
            pruning: false,
            cache: CacheMode::Disabled,
            time_budget: None,
        }
    }

    /// Minimax with a fresh transposition cache for each search, 5 plies.
    pub const fn cached_minimax() -> Self {
        Self {
            max_depth: 5,
            pruning: false,
            cache: CacheMode::PerSearch,
            time_budget: None,
        }
    }

    /// Alpha-beta, 7 plies.
    pub const fn alpha_beta() -> Self {
        Self {
            max_depth: 7,
            pruning: true,
            cache: CacheMode::Disabled,
            time_budget: None,
        }
    }

    /// Alpha-beta, 4 plies, meant to run with an [`OpeningBook`] attached.
    pub const fn with_opening_book() -> Self {
        Self {
            max_depth: 4,
            pruning: true,
            cache: CacheMode::Disabled,
            time_budget: None,
        }
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }

    pub fn time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = Some(time_budget);
        self
    }
}

/// Chooses moves according to a [`SearchConfig`].
///
/// A searcher is single-threaded; run independent searchers to search in parallel.
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    config: SearchConfig,
    book: Option<OpeningBook>,
    cache: TranspositionCache,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Consult `book` for the value of known openings.
    pub fn with_opening_book(mut self, book: OpeningBook) -> Self {
        self.book = Some(book);
        self
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    /// Statistics of the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `board` for the player to move.
    pub fn search<P: Position>(&mut self, board: &P) -> Result<ScoredMove, SearchError> {
        let player = board.current_player();
        let depth = self.config.max_depth;
        let span = debug_span!("search", %player, depth, pruning = self.config.pruning);
        let _enter = span.enter();

        if self.config.cache == CacheMode::PerSearch {
            self.cache.clear();
        }

        let mut ctx = SearchContext::new();
        if self.config.cache != CacheMode::Disabled {
            ctx = ctx.with_cache(&mut self.cache);
        }
        if let Some(book) = &self.book {
            ctx = ctx.with_book(book);
        }
        if let Some(budget) = self.config.time_budget {
            ctx = ctx.with_deadline(Instant::now() + budget, depth);
        }

        let result = if self.config.pruning {
            let roles = Roles::for_player(player);
            alphabeta::best_move(&mut ctx, roles, board, depth, MIN_SCORE, MAX_SCORE)
        } else {
            minimax::best_move(&mut ctx, player, board, depth)
        };

        self.stats = ctx.stats();
        let result = result?;
        debug!(
            result = %result,
            nodes = self.stats.nodes,
            cache_hits = self.stats.cache_hits,
            book_hits = self.stats.book_hits,
            timed_out = self.stats.timed_out,
            "search finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_board::{Game, Player, Square};

    fn square(notation: &str) -> Square {
        notation.parse().unwrap()
    }

    #[test]
    fn presets() {
        assert_eq!(SearchConfig::minimax().max_depth, 3);
        assert_eq!(SearchConfig::cached_minimax().cache, CacheMode::PerSearch);
        assert!(SearchConfig::alpha_beta().pruning);
        assert_eq!(SearchConfig::with_opening_book().max_depth, 4);
        assert_eq!(SearchConfig::default(), SearchConfig::alpha_beta());
    }

    #[test]
    fn depth_zero_is_deterministic() {
        let mut searcher = Searcher::new(SearchConfig::alpha_beta().max_depth(0));
        for _ in 0..3 {
            let result = searcher.search(&Game::default()).unwrap();
            assert_eq!(result.square(), Some(square("E6")));
            assert_eq!(result.score_for(Player::Black), 3);
        }
    }

    #[test]
    fn per_search_cache_starts_empty() {
        let mut searcher = Searcher::new(SearchConfig::cached_minimax().max_depth(4));
        searcher.search(&Game::default()).unwrap();
        let first = searcher.stats();
        let entries = searcher.cache().len();

        searcher.search(&Game::default()).unwrap();
        assert_eq!(searcher.stats(), first);
        assert_eq!(searcher.cache().len(), entries);
        assert!(first.cache_hits > 0);
    }

    #[test]
    fn persistent_cache_is_reused() {
        let config = SearchConfig::minimax().max_depth(3).cache(CacheMode::Persistent);
        let mut searcher = Searcher::new(config);
        let first = searcher.search(&Game::default()).unwrap();
        let cold = searcher.stats();

        let second = searcher.search(&Game::default()).unwrap();
        let warm = searcher.stats();
        assert_eq!(first, second);
        // Every root child is already known.
        assert_eq!(warm.nodes, 1);
        assert_eq!(warm.cache_hits, 4);
        assert!(cold.nodes > warm.nodes);
    }

    #[test]
    fn disabled_cache_stays_empty() {
        let mut searcher = Searcher::new(SearchConfig::minimax());
        searcher.search(&Game::default()).unwrap();
        assert!(searcher.cache().is_empty());
        assert_eq!(searcher.stats().cache_hits, 0);
    }

    #[test]
    fn spent_budget_returns_the_first_root_square() {
        let config = SearchConfig::alpha_beta()
            .max_depth(2)
            .time_budget(Duration::from_secs(0));
        let mut searcher = Searcher::new(config);
        let result = searcher.search(&Game::default()).unwrap();

        assert_eq!(result.square(), Some(square("E6")));
        assert!(searcher.stats().timed_out);
    }

    #[test]
    fn error_conversion() {
        let illegal = IllegalMoveError::PassWithLegalMoves {
            player: Player::Black,
        };
        let error: SearchError = illegal.into();
        assert_eq!(error, SearchError::IllegalMove { source: illegal });
        assert!(error.to_string().contains("cannot pass"));
    }
}
