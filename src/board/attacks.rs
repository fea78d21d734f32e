/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::iter;

use crate::{Board, Color, Piece, PieceKind, Square};

/// `(file, rank)` deltas of a Knight's jumps.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Rook directions.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Bishop directions.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// King steps, and Queen directions.
pub(crate) const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Directions a slider of `kind` travels in. Empty for non-sliders.
#[inline(always)]
pub(crate) const fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Bishop => &DIAGONALS,
        PieceKind::Rook => &ORTHOGONALS,
        PieceKind::Queen => &ALL_DIRECTIONS,
        _ => &[],
    }
}

/// Every square from `from` (exclusive) to the edge of the board in `direction`.
#[inline(always)]
pub(crate) fn ray(from: Square, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> {
    iter::successors(from.offset(df, dr), move |sq| sq.offset(df, dr))
}

/// The first occupied square from `from` (exclusive) in `direction`, if any.
#[inline(always)]
fn first_blocker(board: &Board, from: Square, direction: (i8, i8)) -> Option<Square> {
    ray(from, direction).find(|&sq| board.has(sq))
}

/// Squares at the given offsets from `square` that hold `piece`.
#[inline(always)]
fn leapers<'a>(
    board: &'a Board,
    square: Square,
    offsets: &'a [(i8, i8)],
    piece: Piece,
) -> impl Iterator<Item = Square> + 'a {
    offsets
        .iter()
        .filter_map(move |&(df, dr)| square.offset(df, dr))
        .filter(move |&sq| board.piece_at(sq) == Some(piece))
}

/// Lazily yields every square holding a piece of color `by` that attacks `square`.
fn attackers(board: &Board, square: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
    // A Pawn of `by` attacks diagonally forward, so look diagonally backward from `square`.
    let behind = -by.negation_multiplier();
    let pawn_offsets = [(-1, behind), (1, behind)];
    let pawns = pawn_offsets
        .into_iter()
        .filter_map(move |(df, dr)| square.offset(df, dr))
        .filter(move |&sq| board.piece_at(sq) == Some(Piece::new(by, PieceKind::Pawn)));

    let knights = leapers(
        board,
        square,
        &KNIGHT_OFFSETS,
        Piece::new(by, PieceKind::Knight),
    );

    let sliders = ORTHOGONALS
        .into_iter()
        .map(|dir| (dir, PieceKind::Rook))
        .chain(DIAGONALS.into_iter().map(|dir| (dir, PieceKind::Bishop)))
        .filter_map(move |(dir, kind)| {
            let sq = first_blocker(board, square, dir)?;
            let piece = board.piece_at(sq)?;
            let slides_here = piece.kind() == kind || piece.kind() == PieceKind::Queen;
            (piece.color() == by && slides_here).then_some(sq)
        });

    let king = leapers(
        board,
        square,
        &ALL_DIRECTIONS,
        Piece::new(by, PieceKind::King),
    );

    pawns.chain(knights).chain(sliders).chain(king)
}

/// Returns `true` if any piece of color `by` attacks `square`.
///
/// Attacks are geometric: the square may be empty, or hold a piece of either color.
///
/// # Example
/// ```
/// # use warden::{is_attacked, Board, Color, Square};
/// let board = Board::default();
/// assert!(is_attacked(&board, Square::F3, Color::White));
/// assert!(!is_attacked(&board, Square::E4, Color::White));
/// assert!(is_attacked(&board, Square::F6, Color::Black));
/// ```
#[inline(always)]
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    attackers(board, square, by).next().is_some()
}

/// Collects the squares of every piece of color `by` that attacks `square`.
///
/// # Example
/// ```
/// # use warden::{attackers_of, Board, Color, Square};
/// let board = Board::default();
/// assert_eq!(attackers_of(&board, Square::F3, Color::White), [Square::E2, Square::G2, Square::G1]);
/// ```
pub fn attackers_of(board: &Board, square: Square, by: Color) -> Vec<Square> {
    attackers(board, square, by).collect()
}

/// Returns `true` if `color`'s King is attacked.
///
/// # Panics
///
/// If `color` has no King on the board.
#[inline(always)]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    is_attacked(board, board.king_square(color), color.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_pawn_attacks_are_directional() {
        let b = board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        assert!(is_attacked(&b, Square::D5, Color::White));
        assert!(is_attacked(&b, Square::F5, Color::White));
        assert!(!is_attacked(&b, Square::E5, Color::White));
        assert!(!is_attacked(&b, Square::D3, Color::White));

        assert!(is_attacked(&b, Square::E4, Color::Black));
        assert!(is_attacked(&b, Square::C4, Color::Black));
        assert!(!is_attacked(&b, Square::D4, Color::Black));
    }

    #[test]
    fn test_sliders_stop_at_blockers() {
        let b = board("4k3/8/8/8/R2n3q/8/8/4K3 w - - 0 1");
        assert!(is_attacked(&b, Square::D4, Color::White));
        assert!(!is_attacked(&b, Square::E4, Color::White));
        assert!(is_attacked(&b, Square::E4, Color::Black));
        // The Queen on h4 reaches e1 along the diagonal
        assert!(is_in_check(&b, Color::White));
        assert!(!is_in_check(&b, Color::Black));
    }

    #[test]
    fn test_attackers_of() {
        let b = board("4k3/8/8/8/4p3/2N3N1/4Q3/4K3 b - - 0 1");
        let attackers = attackers_of(&b, Square::E4, Color::White);
        assert_eq!(attackers, [Square::G3, Square::C3, Square::E2]);
        assert!(attackers_of(&b, Square::E4, Color::Black).is_empty());
    }

    #[test]
    fn test_king_attacks() {
        let b = board("8/8/8/8/8/5k2/8/7K w - - 0 1");
        assert!(is_attacked(&b, Square::G2, Color::Black));
        assert!(is_attacked(&b, Square::G2, Color::White));
        assert!(!is_attacked(&b, Square::H3, Color::White));
    }

    #[test]
    fn test_ray() {
        let squares = ray(Square::F6, (1, 1)).collect::<Vec<_>>();
        assert_eq!(squares, [Square::G7, Square::H8]);
        assert_eq!(ray(Square::H8, (1, 0)).count(), 0);
    }
}
