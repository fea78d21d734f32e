/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Board, Color, Move, MoveKind, MoveList, Piece, PieceKind, Rank, Square};

use super::attacks::{ray, slider_directions, ALL_DIRECTIONS, KNIGHT_OFFSETS};

/// Generates every pseudo-legal move available to `color`.
///
/// Pseudo-legal moves obey how each piece moves, but may leave the mover's own King in check.
/// Castling is generated whenever the right is held and the squares between King and Rook are empty;
/// whether the King passes through an attacked square is left to the legality check.
/// En passant is only generated for the side to move, as the target expires after one move.
///
/// # Example
/// ```
/// # use warden::{pseudo_legal_moves, Board, Color};
/// let board = Board::default();
/// assert_eq!(pseudo_legal_moves(&board, Color::White).len(), 20);
/// assert_eq!(pseudo_legal_moves(&board, Color::Black).len(), 20);
/// ```
pub fn pseudo_legal_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::with_capacity(64);

    for (from, piece) in board.pieces_of(color) {
        generate_for_piece(board, from, piece, &mut moves);
    }

    moves
}

/// Generates the pseudo-legal moves of whatever piece stands on `from`.
///
/// Returns an empty list if `from` is empty.
pub fn pseudo_legal_moves_from(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();

    if let Some(piece) = board.piece_at(from) {
        generate_for_piece(board, from, piece, &mut moves);
    }

    moves
}

fn generate_for_piece(board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, from, piece, moves),
        PieceKind::Knight => leaper_moves(board, from, piece, &KNIGHT_OFFSETS, moves),
        PieceKind::King => {
            leaper_moves(board, from, piece, &ALL_DIRECTIONS, moves);
            castling_moves(board, from, piece, moves);
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_moves(board, from, piece, moves)
        }
    }
}

/// What `piece` finds on `to`: `Some(None)` if it may move there quietly,
/// `Some(Some(victim))` if it may capture there, and `None` if the square is off limits.
#[inline(always)]
fn target(board: &Board, piece: Piece, to: Square) -> Option<Option<Piece>> {
    match board.piece_at(to) {
        None => Some(None),
        Some(occupant) if occupant.color() != piece.color() && !occupant.is_king() => {
            Some(Some(occupant))
        }
        Some(_) => None,
    }
}

/// Pushes a Pawn move, expanding it into all four promotions if it lands on the last rank.
fn push_pawn_move(
    moves: &mut MoveList,
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
) {
    if to.rank() == Rank::eighth(piece.color()) {
        for promotion in PieceKind::promotions() {
            moves.push(Move::new(
                from,
                to,
                piece,
                captured,
                MoveKind::Promotion(promotion),
            ));
        }
    } else {
        moves.push(Move::new(from, to, piece, captured, MoveKind::Normal));
    }
}

fn pawn_moves(board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
    let color = piece.color();

    // Pushes
    if let Some(single) = from.forward_by(color, 1).filter(|&sq| !board.has(sq)) {
        push_pawn_move(moves, from, single, piece, None);

        if from.rank() == Rank::second(color) {
            if let Some(double) = single.forward_by(color, 1).filter(|&sq| !board.has(sq)) {
                moves.push(Move::new(
                    from,
                    double,
                    piece,
                    None,
                    MoveKind::DoublePawnPush,
                ));
            }
        }
    }

    // Captures
    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, color.negation_multiplier()) else {
            continue;
        };

        match board.piece_at(to) {
            Some(victim) => {
                if victim.color() != color && !victim.is_king() {
                    push_pawn_move(moves, from, to, piece, Some(victim));
                }
            }

            None if board.ep_square() == Some(to) && board.side_to_move() == color => {
                let victim = to
                    .backward_by(color, 1)
                    .and_then(|sq| board.piece_at(sq))
                    .filter(|victim| *victim == Piece::new(color.opponent(), PieceKind::Pawn));

                if victim.is_some() {
                    moves.push(Move::new(from, to, piece, victim, MoveKind::EnPassant));
                }
            }

            None => {}
        }
    }
}

fn leaper_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };

        if let Some(captured) = target(board, piece, to) {
            moves.push(Move::new(from, to, piece, captured, MoveKind::Normal));
        }
    }
}

fn slider_moves(board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
    for &direction in slider_directions(piece.kind()) {
        for to in ray(from, direction) {
            if let Some(captured) = target(board, piece, to) {
                moves.push(Move::new(from, to, piece, captured, MoveKind::Normal));
            }

            // Rays stop at the first piece, whether it could be captured or not
            if board.has(to) {
                break;
            }
        }
    }
}

fn castling_moves(board: &Board, from: Square, king: Piece, moves: &mut MoveList) {
    let color = king.color();
    if from != Square::king_start(color) {
        return;
    }

    let rights = board.castling_rights_for(color);
    let rook = Piece::new(color, PieceKind::Rook);

    let candidates = [
        (
            rights.short,
            Square::rook_short_start(color),
            Square::king_short_castle(color),
            MoveKind::CastleKingside,
        ),
        (
            rights.long,
            Square::rook_long_start(color),
            Square::king_long_castle(color),
            MoveKind::CastleQueenside,
        ),
    ];

    for (allowed, rook_square, to, kind) in candidates {
        let path_clear = from.between(rook_square).all(|sq| !board.has(sq));

        if allowed && board.piece_at(rook_square) == Some(rook) && path_clear {
            moves.push(Move::new(from, to, king, None, kind));
        }
    }
}
