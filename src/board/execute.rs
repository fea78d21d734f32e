/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Board, CastlingRights, Color, Move, MoveKind, Square};

/// Everything needed to take back a [`Move`]: the move itself, and the parts of the
/// [`Board`] that cannot be recomputed from it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Undo {
    mv: Move,
    side_to_move: Color,
    castling_rights: [CastlingRights; Color::COUNT],
    ep_square: Option<Square>,
    halfmove: usize,
    fullmove: usize,
}

impl Undo {
    /// The [`Move`] this record takes back.
    #[inline(always)]
    pub const fn mv(&self) -> Move {
        self.mv
    }
}

/// Returns the squares a Rook travels between when castling, if `kind` is castling.
#[inline(always)]
fn castling_rook_squares(kind: MoveKind, color: Color) -> Option<(Square, Square)> {
    match kind {
        MoveKind::CastleKingside => Some((
            Square::rook_short_start(color),
            Square::rook_short_castle(color),
        )),
        MoveKind::CastleQueenside => Some((
            Square::rook_long_start(color),
            Square::rook_long_castle(color),
        )),
        _ => None,
    }
}

/// Returns a copy of `board` with `mv` made on it.
///
/// # Example
/// ```
/// # use warden::{apply, validate_move, Board, Square};
/// let board = Board::default();
/// let e2e4 = validate_move(&board, Square::E2, Square::E4, None).unwrap();
/// let after = apply(&board, e2e4);
/// assert_eq!(after.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
/// assert_eq!(board, Board::default());
/// ```
#[inline(always)]
pub fn apply(board: &Board, mv: Move) -> Board {
    board.with_move_made(mv)
}

impl Board {
    /// Copies `self` and makes the provided move on the copy, returning it.
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = self.clone();
        copied.make_move(mv);
        copied
    }

    /// Applies the move, returning the record that [`Board::unmake_move`] needs to revert it.
    ///
    /// The move is trusted: this does not check that it is legal. Pass moves through
    /// [`crate::validate_move`] or take them from [`crate::legal_moves`].
    ///
    /// # Panics
    ///
    /// If the moving piece is not on the move's source square.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let undo = Undo {
            mv,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            halfmove: self.halfmove,
            fullmove: self.fullmove,
        };

        let (from, to, piece) = (mv.from(), mv.to(), mv.piece());
        let color = piece.color();

        if self.piece_at(from) != Some(piece) {
            panic!(
                "invariant violated: cannot play {mv:?} because {from} holds {:?} in {self}",
                self.piece_at(from)
            );
        }

        let capture_square = mv.capture_square();
        let occupant = self.piece_at(capture_square);
        if occupant != mv.captured() {
            panic!(
                "invariant violated: {mv:?} expects {:?} on {capture_square} but found {occupant:?} in {self}",
                mv.captured()
            );
        }

        // Clear the EP square from the last move
        self.ep_square = None;

        // Increment move counters
        self.halfmove += 1; // This is reset if a capture occurs or a pawn moves
        if color == Color::Black {
            self.fullmove += 1;
        }

        self.remove(from);

        if let Some(captured) = mv.captured() {
            self.remove(capture_square);

            // A Rook captured on its home square takes its castling right with it
            if captured.is_rook() {
                self.revoke_rook_right(captured.color(), capture_square);
            }

            self.halfmove = 0;
        }

        match mv.kind() {
            MoveKind::Promotion(promotion) => {
                self.place(piece.promoted(promotion), to);
            }

            MoveKind::DoublePawnPush => {
                self.place(piece, to);
                self.ep_square = from.forward_by(color, 1);
            }

            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                self.place(piece, to);
                if let Some((rook_from, rook_to)) = castling_rook_squares(mv.kind(), color) {
                    self.relocate(rook_from, rook_to);
                }
            }

            MoveKind::Normal | MoveKind::EnPassant => {
                self.place(piece, to);
            }
        }

        if piece.is_pawn() {
            self.halfmove = 0;
        }

        // A King that moves forfeits both rights, a Rook only its own side's
        if piece.is_king() {
            self.castling_rights[color] = CastlingRights::default();
        } else if piece.is_rook() {
            self.revoke_rook_right(color, from);
        }

        self.side_to_move = color.opponent();

        undo
    }

    /// Reverts the move recorded in `undo`, restoring this [`Board`] to exactly its prior state.
    ///
    /// `undo` must be the record returned by the most recent [`Board::make_move`] that has not yet been reverted.
    ///
    /// # Example
    /// ```
    /// # use warden::{legal_moves, Board, FEN_KIWIPETE};
    /// let mut board = Board::from_fen(FEN_KIWIPETE).unwrap();
    /// let original = board.clone();
    ///
    /// let moves = legal_moves(&board, board.side_to_move());
    /// for mv in moves {
    ///     let undo = board.make_move(mv);
    ///     board.unmake_move(undo);
    ///     assert_eq!(board, original);
    /// }
    /// ```
    pub fn unmake_move(&mut self, undo: Undo) {
        let mv = undo.mv;
        let color = mv.piece().color();

        if let Some((rook_from, rook_to)) = castling_rook_squares(mv.kind(), color) {
            self.relocate(rook_to, rook_from);
        }

        // Removing from the destination also discards a promoted piece
        self.remove(mv.to());
        self.place(mv.piece(), mv.from());

        if let Some(captured) = mv.captured() {
            self.place(captured, mv.capture_square());
        }

        self.side_to_move = undo.side_to_move;
        self.castling_rights = undo.castling_rights;
        self.ep_square = undo.ep_square;
        self.halfmove = undo.halfmove;
        self.fullmove = undo.fullmove;
    }

    /// Moves whatever stands on `from` over to `to`.
    ///
    /// # Panics
    ///
    /// If `from` is empty.
    fn relocate(&mut self, from: Square, to: Square) {
        match self.remove(from) {
            Some(piece) => {
                self.place(piece, to);
            }
            None => panic!("invariant violated: no piece on {from} to move to {to} in {self}"),
        }
    }

    /// Clears `color`'s castling right for the Rook that starts on `square`, if any.
    #[inline(always)]
    fn revoke_rook_right(&mut self, color: Color, square: Square) {
        if square == Square::rook_short_start(color) {
            self.castling_rights[color].short = false;
        } else if square == Square::rook_long_start(color) {
            self.castling_rights[color].long = false;
        }
    }
}
