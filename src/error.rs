/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use thiserror::Error;

use crate::Square;

/// Errors that can arise from malformed input or from attempting an illegal move.
///
/// Structurally unreachable states (such as a position without a King) are not represented here.
/// Those are bugs, and panic where they are detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("Illegal move {from}{to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: IllegalMoveReason,
    },

    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),

    #[error("Malformed position: {0}")]
    MalformedPosition(String),

    #[error("Malformed move: {0}")]
    MalformedMove(String),

    #[error("Malformed piece: {0:?} is not one of PNBRQK (or lowercase)")]
    MalformedPiece(char),
}

impl ChessError {
    /// Convenience constructor for [`ChessError::IllegalMove`].
    #[inline(always)]
    pub const fn illegal(from: Square, to: Square, reason: IllegalMoveReason) -> Self {
        Self::IllegalMove { from, to, reason }
    }

    /// If this is an [`ChessError::IllegalMove`], returns the reason the move was rejected.
    #[inline(always)]
    pub const fn reason(&self) -> Option<IllegalMoveReason> {
        match self {
            Self::IllegalMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Shorthand for results whose error is a [`ChessError`].
pub type Result<T, E = ChessError> = std::result::Result<T, E>;

/// Why a requested move was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum IllegalMoveReason {
    /// The piece on the source square belongs to the player who is not on move.
    WrongSideToMove,

    /// The source square is empty.
    NoPieceAtSource,

    /// The destination square holds a piece of the mover's own color.
    DestinationOccupiedByOwnPiece,

    /// A piece stands between the source and destination.
    PathBlocked,

    /// The move would leave (or put) the mover's King under attack.
    LeavesOwnKingInCheck,

    /// The King would castle out of, through, or into check.
    CastlingPathAttacked,

    /// A Pawn tried to capture en passant when no en passant target exists on that square.
    InvalidEnPassantTiming,

    /// The piece does not move that way.
    InvalidPieceMovement,

    /// The King or the relevant Rook has already moved (or the Rook was captured).
    CastlingRightsLost,

    /// A promotion was missing, unexpected, or named a piece that cannot be promoted to.
    InvalidPromotion,

    /// Kings are never captured.
    CapturesKing,
}

impl IllegalMoveReason {
    /// A short, human-readable description of this reason.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::WrongSideToMove => "it is not that side's turn to move",
            Self::NoPieceAtSource => "there is no piece on the source square",
            Self::DestinationOccupiedByOwnPiece => "the destination holds a friendly piece",
            Self::PathBlocked => "the path is blocked",
            Self::LeavesOwnKingInCheck => "the move leaves the King in check",
            Self::CastlingPathAttacked => "the King may not castle out of, through, or into check",
            Self::InvalidEnPassantTiming => "en passant is not available on that square",
            Self::InvalidPieceMovement => "the piece cannot move that way",
            Self::CastlingRightsLost => "castling rights on that side have been lost",
            Self::InvalidPromotion => "invalid promotion",
            Self::CapturesKing => "the King cannot be captured",
        }
    }
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChessError::illegal(Square::E1, Square::G1, IllegalMoveReason::CastlingPathAttacked);
        assert_eq!(
            err.to_string(),
            "Illegal move e1g1: the King may not castle out of, through, or into check"
        );
        assert_eq!(err.reason(), Some(IllegalMoveReason::CastlingPathAttacked));

        let err = ChessError::MalformedCoordinate(String::from("z9"));
        assert_eq!(err.to_string(), "Malformed coordinate: z9");
        assert_eq!(err.reason(), None);
    }
}
