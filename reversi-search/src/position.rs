//! The board contract consumed by every search procedure.

use reversi_board::{
    Game, IllegalMoveError, Move, Player, Square, SquareList, SquareOwners, EDGE_LENGTH,
};

/// An immutable game position the search can walk.
///
/// `play` and `pass` must return new values and leave the receiver untouched:
/// transposition caching relies on positions being plain values.
pub trait Position: Sized {
    /// The player whose turn it is.
    fn current_player(&self) -> Player;

    /// The squares the current player may play, in a fixed iteration order.
    /// An empty list means the player must pass.
    fn possible_squares(&self) -> SquareList;

    /// Play `square` for the current player. Fails if the square is not legal.
    fn play(&self, square: Square) -> Result<Self, IllegalMoveError>;

    /// Pass the turn. Fails if the current player has a legal square.
    fn pass(&self) -> Result<Self, IllegalMoveError>;

    /// Whether neither player can move.
    fn is_complete(&self) -> bool;

    /// The winner of a complete game; None for draws and unfinished games.
    fn winner(&self) -> Option<Player>;

    /// The number of squares `player` owns.
    fn square_count(&self, player: Player) -> i32;

    /// Square ownership by color.
    fn square_owners(&self) -> SquareOwners;

    /// Every placement since the start of the game, in order.
    fn moves(&self) -> &[Move];

    /// The length of one edge of the board.
    fn size(&self) -> i32;
}

impl Position for Game {
    #[inline]
    fn current_player(&self) -> Player {
        self.active_player
    }

    #[inline]
    fn possible_squares(&self) -> SquareList {
        self.get_moves()
    }

    #[inline]
    fn play(&self, square: Square) -> Result<Self, IllegalMoveError> {
        Game::play(self, square)
    }

    #[inline]
    fn pass(&self) -> Result<Self, IllegalMoveError> {
        Game::pass(self)
    }

    #[inline]
    fn is_complete(&self) -> bool {
        self.is_finished()
    }

    #[inline]
    fn winner(&self) -> Option<Player> {
        Game::winner(self)
    }

    #[inline]
    fn square_count(&self, player: Player) -> i32 {
        i32::from(self.piece_count(player))
    }

    #[inline]
    fn square_owners(&self) -> SquareOwners {
        self.owners()
    }

    #[inline]
    fn moves(&self) -> &[Move] {
        self.history()
    }

    #[inline]
    fn size(&self) -> i32 {
        EDGE_LENGTH as i32
    }
}

/// Identifies a physical position regardless of the move order that reached it:
/// who owns every square, and whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub owners: SquareOwners,
    pub to_move: Player,
}

impl PositionKey {
    pub fn of<P: Position>(position: &P) -> Self {
        Self {
            owners: position.square_owners(),
            to_move: position.current_player(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_board::bitboard::Bitboard;

    fn play_all(notation: &[&str]) -> Game {
        notation.iter().fold(Game::default(), |game, square| {
            Position::play(&game, square.parse().unwrap()).unwrap()
        })
    }

    #[test]
    fn transpositions_share_a_key() {
        let first = play_all(&["C4", "C3", "D3"]);
        let second = play_all(&["D3", "C3", "C4"]);

        assert_ne!(first.moves(), second.moves());
        assert_eq!(PositionKey::of(&first), PositionKey::of(&second));
    }

    #[test]
    fn one_square_changes_the_key() {
        let game = play_all(&["C4", "C3", "D3"]);
        let key = PositionKey::of(&game);

        let d4: Bitboard = "D4".parse::<Square>().unwrap().into();
        let flipped = PositionKey {
            owners: SquareOwners {
                black: key.owners.black ^ d4,
                white: key.owners.white ^ d4,
            },
            to_move: key.to_move,
        };
        assert_ne!(key, flipped);
    }

    #[test]
    fn side_to_move_changes_the_key() {
        let game = play_all(&["C4", "C3", "D3"]);
        let key = PositionKey::of(&game);
        let other_side = PositionKey {
            to_move: !key.to_move,
            ..key
        };
        assert_ne!(key, other_side);
    }

    #[test]
    fn game_contract() {
        let game = Game::default();
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.possible_squares().len(), 4);
        assert_eq!(game.square_count(Player::White), 2);
        assert_eq!(game.size(), 8);
        assert!(!game.is_complete());
        assert!(Position::pass(&game).is_err());
    }
}
