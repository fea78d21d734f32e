/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use log::{debug, info};

use crate::{
    classify, legal_moves, parse_move_text, validate_move, Board, ChessError, Color, GameState,
    Move, MoveList, Result, Undo,
};

/// Number of half-moves without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: usize = 100;

/// How a finished game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkmate { winner } => write!(f, "checkmate, {} wins", winner.name()),
            Self::Stalemate => write!(f, "draw by stalemate"),
            Self::InsufficientMaterial => write!(f, "draw by insufficient material"),
            Self::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
            Self::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
        }
    }
}

/// Whether a [`Game`] is still being played.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum GameStatus {
    /// Play continues. The [`GameState`] is never terminal.
    InProgress(GameState),

    /// The game has ended.
    Finished(Outcome),
}

impl GameStatus {
    #[inline(always)]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress(state) => write!(f, "in progress ({state})"),
            Self::Finished(outcome) => write!(f, "{outcome}"),
        }
    }
}

/// A game of chess.
///
/// Wraps a [`Board`] with the moves played so far, so that moves can be taken back
/// and draws by repetition or the fifty-move rule can be detected.
///
/// # Example
/// ```
/// # use warden::{Game, GameStatus, Outcome, Color};
/// let mut game = Game::default();
/// for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     game.play_uci(mv).unwrap();
/// }
/// assert_eq!(game.status(), GameStatus::Finished(Outcome::Checkmate { winner: Color::Black }));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Game {
    /// The current position.
    board: Board,

    /// One record per move played, oldest first.
    history: Vec<Undo>,

    /// The position before each move in `history`.
    previous: Vec<Board>,
}

impl Game {
    /// Starts a new [`Game`] from the provided [`Board`].
    #[inline(always)]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
            previous: Vec::new(),
        }
    }

    /// Starts a new [`Game`] from the provided FEN string.
    #[inline(always)]
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::new(Board::from_fen(fen)?))
    }

    /// Fetch the current [`Board`] of this [`Game`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The undo records of every move played so far, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[Undo] {
        &self.history
    }

    /// Every move played so far, oldest first.
    #[inline(always)]
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(Undo::mv)
    }

    /// All legal moves for the side to move.
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.board, self.board.side_to_move())
    }

    /// Plays `mv`, if it is legal in the current position.
    ///
    /// `mv` must match the legal move exactly, including what it captures and its [`crate::MoveKind`].
    pub fn play(&mut self, mv: Move) -> Result<()> {
        let validated = validate_move(&self.board, mv.from(), mv.to(), mv.promotion())?;

        if validated != mv {
            return Err(ChessError::MalformedMove(format!(
                "{mv:?} does not describe the move on {}, which is {validated:?}",
                self.board
            )));
        }

        self.push(validated);
        Ok(())
    }

    /// Parses coordinate notation such as `e2e4` or `e7e8q`, then plays the move if it is legal.
    ///
    /// Returns the move that was played.
    ///
    /// # Example
    /// ```
    /// # use warden::{Game, IllegalMoveReason};
    /// let mut game = Game::default();
    /// let mv = game.play_uci("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    ///
    /// let err = game.play_uci("e4e5").unwrap_err();
    /// assert_eq!(err.reason(), Some(IllegalMoveReason::WrongSideToMove));
    /// ```
    pub fn play_uci(&mut self, text: &str) -> Result<Move> {
        let (from, to, promotion) = parse_move_text(text)?;
        let mv = validate_move(&self.board, from, to, promotion)?;

        self.push(mv);
        Ok(mv)
    }

    /// Applies an already-validated move and records it.
    fn push(&mut self, mv: Move) {
        self.previous.push(self.board.clone());
        self.history.push(self.board.make_move(mv));
        debug!("Played {mv}: {}", self.board);

        if let GameStatus::Finished(outcome) = self.status() {
            info!("Game over after {mv}: {outcome}");
        }
    }

    /// Takes back the most recent move, returning it. Returns `None` if no moves have been played.
    pub fn undo(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.previous.pop();
        self.board.unmake_move(undo);

        debug!("Took back {}", undo.mv());
        Some(undo.mv())
    }

    /// How many times the current position has occurred in this game, including now.
    ///
    /// Only positions since the last capture or pawn move are considered, as no earlier position can recur.
    pub fn repetitions(&self) -> usize {
        let reversible = self.board.halfmove().min(self.previous.len());

        // Skip the opponent's positions, since the side to move must match
        let earlier = self
            .previous
            .iter()
            .rev()
            .take(reversible)
            .skip(1)
            .step_by(2)
            .filter(|prev| prev.is_same_as(&self.board))
            .count();

        earlier + 1
    }

    /// Determines whether the game is over, and if so, how it ended.
    ///
    /// Checkmate, stalemate, and insufficient material are decided by [`classify`]
    /// and take precedence over the fifty-move rule, which takes precedence over repetition.
    pub fn status(&self) -> GameStatus {
        let state = classify(&self.board);

        let outcome = match state {
            GameState::Checkmate => Outcome::Checkmate {
                winner: self.board.side_to_move().opponent(),
            },
            GameState::Stalemate => Outcome::Stalemate,
            GameState::DrawInsufficientMaterial => Outcome::InsufficientMaterial,
            _ if self.board.halfmove() >= FIFTY_MOVE_LIMIT => Outcome::FiftyMoveRule,
            _ if self.repetitions() >= 3 => Outcome::ThreefoldRepetition,
            _ => return GameStatus::InProgress(state),
        };

        GameStatus::Finished(outcome)
    }
}

impl fmt::Display for Game {
    /// Displays the FEN string of the current position.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IllegalMoveReason, MoveKind, Piece, Square};

    #[test]
    fn test_undo_through_history() {
        let mut game = Game::default();
        for mv in ["e2e4", "d7d5", "e4d5", "d8d5"] {
            game.play_uci(mv).unwrap();
        }
        assert_eq!(game.history().len(), 4);
        assert_eq!(
            game.moves().map(|mv| mv.to_string()).collect::<Vec<_>>(),
            ["e2e4", "d7d5", "e4d5", "d8d5"]
        );

        assert_eq!(game.undo().map(|mv| mv.to_string()), Some(String::from("d8d5")));
        assert_eq!(game.board().piece_at(Square::D5), Some(Piece::WHITE_PAWN));

        while game.undo().is_some() {}
        assert_eq!(game.board(), &Board::default());
        assert_eq!(game.undo(), None);
    }

    #[test]
    fn test_fifty_move_rule() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
        assert_eq!(game.status(), GameStatus::InProgress(GameState::Normal));

        game.play_uci("a1a2").unwrap();
        assert_eq!(game.status(), GameStatus::Finished(Outcome::FiftyMoveRule));

        game.undo();
        game.play_uci("e1e2").unwrap();
        assert!(game.status().is_finished());
    }

    #[test]
    fn test_checkmate_beats_fifty_move_rule() {
        let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 99 80").unwrap();
        game.play_uci("a1a8").unwrap();
        assert_eq!(
            game.status(),
            GameStatus::Finished(Outcome::Checkmate {
                winner: Color::White
            })
        );
    }

    #[test]
    fn test_threefold_repetition() {
        let mut game = Game::default();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

        for mv in shuffle {
            game.play_uci(mv).unwrap();
        }
        assert_eq!(game.repetitions(), 2);
        assert!(!game.status().is_finished());

        for mv in shuffle {
            game.play_uci(mv).unwrap();
        }
        assert_eq!(game.repetitions(), 3);
        assert_eq!(
            game.status(),
            GameStatus::Finished(Outcome::ThreefoldRepetition)
        );
    }

    #[test]
    fn test_repetition_needs_same_rights() {
        // The Rook shuffle loses castling rights, so the first position never recurs
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        for _ in 0..3 {
            for mv in ["h1h2", "e8d8", "h2h1", "d8e8"] {
                game.play_uci(mv).unwrap();
            }
        }
        assert_eq!(game.repetitions(), 3);

        let start = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(!start.is_same_as(game.board()));
    }

    #[test]
    fn test_repetition_ignores_unusable_ep_square() {
        // The position after 1. e4 has an en passant target that no Black pawn can use,
        // so it recurs once the Knights have returned twice
        let mut game = Game::default();
        let moves = [
            "e2e4", "g8f6", "g1f3", "f6g8", "f3g1", "g8f6", "g1f3", "f6g8", "f3g1",
        ];
        for mv in moves {
            game.play_uci(mv).unwrap();
        }

        assert_eq!(game.repetitions(), 3);
        assert_eq!(
            game.status(),
            GameStatus::Finished(Outcome::ThreefoldRepetition)
        );
    }

    #[test]
    fn test_play_rejects_mislabelled_moves() {
        let mut game = Game::default();
        let wrong = Move::new(Square::E2, Square::E4, Piece::WHITE_PAWN, None, MoveKind::Normal);
        assert!(matches!(game.play(wrong), Err(ChessError::MalformedMove(_))));

        let right = Move::new(
            Square::E2,
            Square::E4,
            Piece::WHITE_PAWN,
            None,
            MoveKind::DoublePawnPush,
        );
        assert!(game.play(right).is_ok());
        assert!(game.history().len() == 1);
    }

    #[test]
    fn test_play_uci_errors() {
        let mut game = Game::default();
        assert!(matches!(game.play_uci("e2"), Err(ChessError::MalformedMove(_))));
        assert_eq!(
            game.play_uci("e1e2").unwrap_err().reason(),
            Some(IllegalMoveReason::DestinationOccupiedByOwnPiece)
        );
        assert!(game.history().is_empty());
    }
}
