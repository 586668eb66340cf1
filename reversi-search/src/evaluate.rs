//! Static evaluation of positions.

use crate::{Position, ScoredMove, SearchError};
use reversi_board::Player;

/// Score `board` for `player`.
///
/// Unfinished games are scored by material: `player`'s squares minus the
/// opponent's. Finished games score the full board area for the winner and its
/// negation for everyone else, draws included, so any finished outcome
/// outweighs any material count.
pub fn score<P: Position>(player: Player, board: &P) -> i32 {
    if !board.is_complete() {
        return board.square_count(player) - board.square_count(player.opponent());
    }

    let area = board.size() * board.size();
    match board.winner() {
        Some(winner) if winner == player => area,
        _ => -area,
    }
}

/// The answer at the search horizon: evaluate the position after the first legal
/// square, or after passing when there is none.
pub(crate) fn horizon<P: Position>(player: Player, board: &P) -> Result<ScoredMove, SearchError> {
    match board.possible_squares().next() {
        Some(square) => {
            let next = board.play(square)?;
            Ok(ScoredMove::played(score(player, &next), player, square))
        }
        None => {
            let next = board.pass()?;
            Ok(ScoredMove::pass(score(player, &next), player))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_board::Game;

    #[test]
    fn material() {
        let game = Game::default();
        assert_eq!(score(Player::Black, &game), 0);

        let game = game.play("C4".parse().unwrap()).unwrap();
        assert_eq!(score(Player::Black, &game), 3);
        assert_eq!(score(Player::White, &game), -3);
    }

    #[test]
    fn decided_games_dominate() {
        let layout = format!("{}{}", "X".repeat(33), "O".repeat(31));
        let close_win = Game::from_layout(&layout, Player::Black).unwrap();

        assert_eq!(score(Player::Black, &close_win), 64);
        assert_eq!(score(Player::White, &close_win), -64);
    }

    #[test]
    fn draws_score_as_losses() {
        let layout = format!("{}{}", "X".repeat(32), "O".repeat(32));
        let draw = Game::from_layout(&layout, Player::White).unwrap();
        assert!(draw.winner().is_none());

        for &player in [Player::Black, Player::White].iter() {
            assert_eq!(score(player, &draw), -64);
            assert_eq!(score(player, &draw).abs(), 64);
        }
    }

    #[test]
    fn horizon_takes_the_first_square() {
        let result = horizon(Player::Black, &Game::default()).unwrap();
        assert_eq!(result.square(), Some("E6".parse().unwrap()));
        assert_eq!(result.score_for(Player::Black), 3);
    }

    #[test]
    fn horizon_passes_without_squares() {
        let layout = format!("OX{}", "-".repeat(62));
        let game = Game::from_layout(&layout, Player::Black).unwrap();
        let result = horizon(Player::Black, &game).unwrap();

        assert!(result.is_pass());
        assert_eq!(result.score_for(Player::Black), 0);
    }
}
