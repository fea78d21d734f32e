/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, trace};

use crate::{
    is_attacked, is_in_check, pseudo_legal_moves, pseudo_legal_moves_from, Board, ChessError,
    Color, IllegalMoveReason, Move, MoveList, Piece, PieceKind, Rank, Result, Square,
};

/// Returns `true` if castling with `mv` does not start on, pass through, or land on an attacked square.
///
/// Always `true` for moves that are not castling.
fn castling_path_is_safe(board: &Board, mv: &Move) -> bool {
    if !mv.is_castle() {
        return true;
    }

    let enemy = mv.piece().color().opponent();
    let transit = mv.from().between(mv.to());

    [mv.from(), mv.to()]
        .into_iter()
        .chain(transit)
        .all(|square| !is_attacked(board, square, enemy))
}

/// Plays `mv` on a trial copy of `board` and checks that the mover's King is not left attacked.
fn keeps_king_safe(board: &Board, mv: Move) -> bool {
    let mut trial = board.clone_for_trial();
    trial.make_move(mv);
    !is_in_check(&trial, mv.piece().color())
}

/// A pseudo-legal move is legal if it does not castle through check and does not leave its King attacked.
#[inline(always)]
fn passes_legality(board: &Board, mv: &Move) -> bool {
    castling_path_is_safe(board, mv) && keeps_king_safe(board, *mv)
}

/// Generates every legal move available to `color`.
///
/// # Example
/// ```
/// # use warden::{legal_moves, Board, Color};
/// // Fool's mate: White has no way out
/// let board = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
/// assert!(legal_moves(&board, Color::White).is_empty());
/// ```
pub fn legal_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = pseudo_legal_moves(board, color);
    moves.retain(|mv| passes_legality(board, mv));
    moves
}

/// Generates the legal moves of whatever piece stands on `square`, regardless of whose turn it is.
pub fn legal_moves_from(board: &Board, square: Square) -> MoveList {
    let mut moves = pseudo_legal_moves_from(board, square);
    moves.retain(|mv| passes_legality(board, mv));
    moves
}

/// Returns `true` if the side to move may play `mv` on `board`.
///
/// # Example
/// ```
/// # use warden::{is_legal, Board, Move, MoveKind, Piece, Square};
/// let board = Board::default();
/// let e2e4 = Move::new(Square::E2, Square::E4, Piece::WHITE_PAWN, None, MoveKind::DoublePawnPush);
/// assert!(is_legal(&board, e2e4));
///
/// // Mislabelled moves are not legal
/// let e2e4 = Move::new(Square::E2, Square::E4, Piece::WHITE_PAWN, None, MoveKind::Normal);
/// assert!(!is_legal(&board, e2e4));
/// ```
pub fn is_legal(board: &Board, mv: Move) -> bool {
    mv.piece().color() == board.side_to_move()
        && pseudo_legal_moves_from(board, mv.from()).contains(&mv)
        && passes_legality(board, &mv)
}

/// Checks whether the side to move may move the piece on `from` to `to`, promoting to `promotion` if provided.
///
/// On success, returns the fully described [`Move`]. Otherwise, returns [`ChessError::IllegalMove`]
/// carrying the reason the move was rejected.
///
/// # Example
/// ```
/// # use warden::{validate_move, Board, IllegalMoveReason, MoveKind, Square};
/// let board = Board::default();
///
/// let mv = validate_move(&board, Square::G1, Square::F3, None).unwrap();
/// assert_eq!(mv.kind(), MoveKind::Normal);
///
/// let err = validate_move(&board, Square::E7, Square::E5, None).unwrap_err();
/// assert_eq!(err.reason(), Some(IllegalMoveReason::WrongSideToMove));
///
/// let err = validate_move(&board, Square::F1, Square::C4, None).unwrap_err();
/// assert_eq!(err.reason(), Some(IllegalMoveReason::PathBlocked));
/// ```
pub fn validate_move(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<Move> {
    let reject = |reason: IllegalMoveReason| {
        debug!("Rejected {from}{to} on {board}: {reason}");
        ChessError::illegal(from, to, reason)
    };

    let piece = board
        .piece_at(from)
        .ok_or_else(|| reject(IllegalMoveReason::NoPieceAtSource))?;

    if piece.color() != board.side_to_move() {
        return Err(reject(IllegalMoveReason::WrongSideToMove));
    }

    if from == to {
        return Err(reject(IllegalMoveReason::InvalidPieceMovement));
    }

    if let Some(occupant) = board.piece_at(to) {
        if occupant.color() == piece.color() {
            return Err(reject(IllegalMoveReason::DestinationOccupiedByOwnPiece));
        }
        if occupant.is_king() {
            return Err(reject(IllegalMoveReason::CapturesKing));
        }
    }

    if promotion.is_some_and(|kind| !kind.is_promotable()) {
        return Err(reject(IllegalMoveReason::InvalidPromotion));
    }

    let candidates = pseudo_legal_moves_from(board, from);
    let Some(mv) = candidates
        .iter()
        .copied()
        .find(|mv| mv.matches(from, to, promotion))
    else {
        return Err(reject(diagnose(board, from, to, piece, &candidates)));
    };

    if !castling_path_is_safe(board, &mv) {
        return Err(reject(IllegalMoveReason::CastlingPathAttacked));
    }

    if !keeps_king_safe(board, mv) {
        return Err(reject(IllegalMoveReason::LeavesOwnKingInCheck));
    }

    trace!("Validated {mv:?}");
    Ok(mv)
}

/// Works out why `piece` cannot reach `to` from `from`, given that no pseudo-legal move matched.
fn diagnose(
    board: &Board,
    from: Square,
    to: Square,
    piece: Piece,
    candidates: &[Move],
) -> IllegalMoveReason {
    use IllegalMoveReason::*;

    // The squares were right, so the promotion was missing or should not have been given
    if candidates.iter().any(|mv| mv.from() == from && mv.to() == to) {
        return InvalidPromotion;
    }

    let color = piece.color();
    let file_delta = to.file().index() as i8 - from.file().index() as i8;
    // Ranks are counted forward from the mover's perspective
    let rank_delta =
        (to.rank().index() as i8 - from.rank().index() as i8) * color.negation_multiplier();
    let path_blocked = from.between(to).any(|sq| board.has(sq));

    match piece.kind() {
        PieceKind::Pawn => match (file_delta.abs(), rank_delta) {
            // A diagonal step onto an empty square can only be en passant
            (1, 1) if !board.has(to) => InvalidEnPassantTiming,
            (0, 1) => PathBlocked,
            (0, 2) if from.rank() == Rank::second(color) => PathBlocked,
            _ => InvalidPieceMovement,
        },

        PieceKind::King => {
            let short = to == Square::king_short_castle(color);
            let long = to == Square::king_long_castle(color);

            if from == Square::king_start(color) && (short || long) {
                let rights = board.castling_rights_for(color);
                let (allowed, rook_square) = if short {
                    (rights.short, Square::rook_short_start(color))
                } else {
                    (rights.long, Square::rook_long_start(color))
                };

                let rook_home =
                    board.piece_at(rook_square) == Some(Piece::new(color, PieceKind::Rook));
                if !allowed || !rook_home {
                    CastlingRightsLost
                } else {
                    PathBlocked
                }
            } else {
                InvalidPieceMovement
            }
        }

        PieceKind::Knight => InvalidPieceMovement,

        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            let orthogonal = file_delta == 0 || rank_delta == 0;
            let diagonal = file_delta.abs() == rank_delta.abs();
            let aligned = match piece.kind() {
                PieceKind::Bishop => diagonal,
                PieceKind::Rook => orthogonal,
                _ => orthogonal || diagonal,
            };

            if aligned && path_blocked {
                PathBlocked
            } else {
                InvalidPieceMovement
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IllegalMoveReason::*;

    fn reason(fen: &str, from: Square, to: Square, promotion: Option<PieceKind>) -> IllegalMoveReason {
        let board = Board::from_fen(fen).unwrap();
        validate_move(&board, from, to, promotion)
            .unwrap_err()
            .reason()
            .unwrap()
    }

    #[test]
    fn test_startpos_has_twenty_legal_moves() {
        assert_eq!(legal_moves(&Board::default(), Color::White).len(), 20);
    }

    #[test]
    fn test_basic_rejections() {
        let fen = crate::FEN_STARTPOS;
        assert_eq!(reason(fen, Square::E4, Square::E5, None), NoPieceAtSource);
        assert_eq!(reason(fen, Square::E7, Square::E5, None), WrongSideToMove);
        assert_eq!(reason(fen, Square::A1, Square::A2, None), DestinationOccupiedByOwnPiece);
        assert_eq!(reason(fen, Square::A1, Square::A3, None), PathBlocked);
        assert_eq!(reason(fen, Square::B1, Square::B3, None), InvalidPieceMovement);
        assert_eq!(reason(fen, Square::E2, Square::E5, None), InvalidPieceMovement);
        assert_eq!(reason(fen, Square::E2, Square::E2, None), InvalidPieceMovement);
        assert_eq!(reason(fen, Square::E2, Square::D3, None), InvalidEnPassantTiming);
        assert_eq!(reason(fen, Square::E2, Square::E4, Some(PieceKind::Queen)), InvalidPromotion);
    }

    #[test]
    fn test_pinned_piece() {
        // The Knight on e2 shields its King from the Rook on e8
        let fen = "4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1";
        assert_eq!(reason(fen, Square::E2, Square::C3, None), LeavesOwnKingInCheck);

        let board = Board::from_fen(fen).unwrap();
        assert!(legal_moves_from(&board, Square::E2).is_empty());
    }

    #[test]
    fn test_blocked_pawn_push() {
        let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
        assert_eq!(reason(fen, Square::E2, Square::E3, None), PathBlocked);
        assert_eq!(reason(fen, Square::E2, Square::E4, None), PathBlocked);
    }

    #[test]
    fn test_king_capture_rejected() {
        let fen = "8/8/8/3k4/4P3/8/8/4K3 w - - 0 1";
        // Black is in check with White to move, which cannot be reached in play
        assert!(Board::from_fen(fen).is_err());

        let fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
        let mut board = Board::from_fen(fen).unwrap();
        board.place(Piece::BLACK_KING, Square::H5);
        board.remove(Square::E8);
        assert_eq!(
            validate_move(&board, Square::H1, Square::H5, None)
                .unwrap_err()
                .reason(),
            Some(CapturesKing)
        );
    }

    #[test]
    fn test_castling_rejections() {
        // A Bishop on a6 covers f1
        let fen = "4k3/8/b7/8/8/8/8/4K2R w K - 0 1";
        assert_eq!(reason(fen, Square::E1, Square::G1, None), CastlingPathAttacked);

        // Castling out of check
        let fen = "4k3/4r3/8/8/8/8/8/4K2R w K - 0 1";
        assert_eq!(reason(fen, Square::E1, Square::G1, None), CastlingPathAttacked);

        // Rights already lost
        let fen = "4k3/8/8/8/8/8/8/4K2R w - - 0 1";
        assert_eq!(reason(fen, Square::E1, Square::G1, None), CastlingRightsLost);

        // A piece in the way
        let fen = "4k3/8/8/8/8/8/8/R2QK3 w Q - 0 1";
        assert_eq!(reason(fen, Square::E1, Square::C1, None), PathBlocked);

        // The b-file square may be attacked, since the King never crosses it
        let board = Board::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        let mv = validate_move(&board, Square::E1, Square::C1, None).unwrap();
        assert_eq!(mv.kind(), crate::MoveKind::CastleQueenside);
    }

    #[test]
    fn test_promotion_rejections() {
        let fen = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(reason(fen, Square::B7, Square::B8, None), InvalidPromotion);
        assert_eq!(reason(fen, Square::B7, Square::B8, Some(PieceKind::King)), InvalidPromotion);
        assert_eq!(reason(fen, Square::B7, Square::B8, Some(PieceKind::Pawn)), InvalidPromotion);

        let board = Board::from_fen(fen).unwrap();
        let mv = validate_move(&board, Square::B7, Square::B8, Some(PieceKind::Knight)).unwrap();
        assert_eq!(mv.promotion(), Some(PieceKind::Knight));
    }

    #[test]
    fn test_is_legal_requires_side_to_move() {
        let board = Board::default();
        let black = legal_moves(&board, Color::Black);
        assert_eq!(black.len(), 20);
        assert!(black.iter().all(|mv| !is_legal(&board, *mv)));
        assert!(legal_moves(&board, Color::White)
            .iter()
            .all(|mv| is_legal(&board, *mv)));
    }
}
