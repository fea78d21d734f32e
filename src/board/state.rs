/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{is_in_check, legal_moves, Board, Color, PieceKind};

/// The state of a position, from the perspective of the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum GameState {
    /// Play continues and the side to move is not in check.
    Normal,

    /// The side to move is in check, but has a way out.
    Check,

    /// The side to move is in check and has no legal moves.
    Checkmate,

    /// The side to move is not in check, but has no legal moves.
    Stalemate,

    /// Neither side has the material to deliver checkmate.
    DrawInsufficientMaterial,
}

impl GameState {
    /// Returns `true` if the game cannot continue from this state.
    #[inline(always)]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Checkmate | Self::Stalemate | Self::DrawInsufficientMaterial
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "normal",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::DrawInsufficientMaterial => "draw by insufficient material",
        };

        write!(f, "{s}")
    }
}

/// Returns `true` if `color` has only a King, or a King and a single Bishop or Knight.
fn has_bare_minor_or_less(board: &Board, color: Color) -> bool {
    let mut others = board
        .pieces_of(color)
        .map(|(_, piece)| piece.kind())
        .filter(|kind| *kind != PieceKind::King);

    match (others.next(), others.next()) {
        (None, _) => true,
        (Some(kind), None) => kind.is_minor(),
        _ => false,
    }
}

/// Returns `true` if each side has only a King, or a King and a single Bishop or Knight.
///
/// # Example
/// ```
/// # use warden::{has_insufficient_material, Board};
/// let kk: Board = "8/4k3/8/8/3K4/8/8/8 w - - 0 1".parse().unwrap();
/// assert!(has_insufficient_material(&kk));
///
/// let kbkn: Board = "8/4k3/2n5/8/3K4/8/5B2/8 w - - 0 1".parse().unwrap();
/// assert!(has_insufficient_material(&kbkn));
///
/// let knnk: Board = "8/4k3/8/8/3K4/8/5NN1/8 w - - 0 1".parse().unwrap();
/// assert!(!has_insufficient_material(&knnk));
/// ```
pub fn has_insufficient_material(board: &Board) -> bool {
    Color::all()
        .into_iter()
        .all(|color| has_bare_minor_or_less(board, color))
}

/// Classifies `board` from the perspective of its side to move.
///
/// When more than one state applies, the first of the following wins:
/// [`GameState::Checkmate`], [`GameState::Stalemate`], [`GameState::DrawInsufficientMaterial`],
/// [`GameState::Check`], [`GameState::Normal`].
///
/// # Example
/// ```
/// # use warden::{classify, Board, GameState};
/// assert_eq!(classify(&Board::default()), GameState::Normal);
///
/// // Back-rank mate
/// let board: Board = "3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1".parse().unwrap();
/// assert_eq!(classify(&board), GameState::Checkmate);
/// ```
pub fn classify(board: &Board) -> GameState {
    let side = board.side_to_move();
    let in_check = is_in_check(board, side);
    let no_moves = legal_moves(board, side).is_empty();

    match (in_check, no_moves) {
        (true, true) => GameState::Checkmate,
        (false, true) => GameState::Stalemate,
        _ if has_insufficient_material(board) => GameState::DrawInsufficientMaterial,
        (true, false) => GameState::Check,
        (false, false) => GameState::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fen: &str) -> GameState {
        classify(&Board::from_fen(fen).unwrap())
    }

    #[test]
    fn test_states() {
        assert_eq!(state("4k3/8/8/8/8/8/8/4K2R b K - 0 1"), GameState::Normal);
        assert_eq!(state("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"), GameState::Check);
        assert_eq!(state("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1"), GameState::Stalemate);
        assert_eq!(state("k7/1Q6/1K6/8/8/8/8/8 b - - 0 1"), GameState::Checkmate);
        assert_eq!(
            state("8/8/4k3/8/8/3K4/8/8 w - - 0 1"),
            GameState::DrawInsufficientMaterial
        );
    }

    #[test]
    fn test_precedence() {
        // A lone King stalemated by a King and Bishop... is still a stalemate
        assert_eq!(state("k7/2K5/8/8/8/4B3/8/8 b - - 0 1"), GameState::Stalemate);

        // Check by a lone Knight is reported as a draw
        assert_eq!(
            state("4k3/8/3N4/8/8/8/8/4K3 b - - 0 1"),
            GameState::DrawInsufficientMaterial
        );
    }

    #[test]
    fn test_terminal() {
        assert!(GameState::Checkmate.is_terminal());
        assert!(GameState::Stalemate.is_terminal());
        assert!(GameState::DrawInsufficientMaterial.is_terminal());
        assert!(!GameState::Check.is_terminal());
        assert!(!GameState::Normal.is_terminal());
    }

    #[test]
    fn test_material() {
        let sufficient = [
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3RK3 w - - 0 1",
            "4k3/8/8/8/8/8/8/2BBK3 w - - 0 1",
        ];
        for fen in sufficient {
            assert!(!has_insufficient_material(&Board::from_fen(fen).unwrap()), "{fen}");
        }
    }
}
