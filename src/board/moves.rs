/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{ChessError, Piece, PieceKind, Result, Square};

/// A list of moves.
///
/// Positions built from arbitrary FEN strings can exceed the 218 moves a legal game allows,
/// so this grows on demand.
pub type MoveList = Vec<Move>;

/// Represents the different kinds of moves that can be made during a chess game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum MoveKind {
    /// A piece moves from one square to another, capturing whatever enemy piece stood there.
    Normal,

    /// A special case on a Pawn's first move, wherein it can advance two squares forward.
    DoublePawnPush,

    /// The King and the h-file Rook slide past each other.
    CastleKingside,

    /// The King and the a-file Rook slide past each other.
    CastleQueenside,

    /// A Pawn captures an enemy Pawn that just double-pushed past it.
    EnPassant,

    /// A Pawn reaches the last rank and becomes the contained [`PieceKind`].
    Promotion(PieceKind),
}

impl MoveKind {
    /// Returns `true` for either castling variant.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Self::CastleKingside | Self::CastleQueenside)
    }
}

impl fmt::Display for MoveKind {
    /// Displays a human-readable description for this [`MoveKind`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::DoublePawnPush => write!(f, "Pawn Double Push"),
            Self::CastleKingside => write!(f, "Short Castle"),
            Self::CastleQueenside => write!(f, "Long Castle"),
            Self::EnPassant => write!(f, "En Passant Capture"),
            Self::Promotion(kind) => write!(f, "Promotion ({})", kind.name()),
        }
    }
}

/// A move on a chess board.
///
/// Moves carry everything needed to apply and revert them: the moving [`Piece`],
/// whatever it captured, and the [`MoveKind`].
/// For castling, `to` is the King's destination. For en passant, the captured Pawn
/// stands one rank behind `to`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// Creates a new [`Move`].
    ///
    /// # Example
    /// ```
    /// # use warden::{Move, MoveKind, Piece, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4, Piece::WHITE_PAWN, None, MoveKind::DoublePawnPush);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    #[inline(always)]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        kind: MoveKind,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            kind,
        }
    }

    /// Fetches the source (or "from") part of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the destination (or "to") part of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The [`Piece`] being moved.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The [`Piece`] removed from the board by this move, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns `true` if this [`Move`] captures anything, including en passant.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.kind.is_castle()
    }

    /// If this [`Move`] is a promotion, returns the [`PieceKind`] being promoted to.
    ///
    /// # Example
    /// ```
    /// # use warden::{Move, MoveKind, Piece, PieceKind, Square};
    /// let b7c8b = Move::new(
    ///     Square::B7,
    ///     Square::C8,
    ///     Piece::WHITE_PAWN,
    ///     Some(Piece::BLACK_KNIGHT),
    ///     MoveKind::Promotion(PieceKind::Bishop),
    /// );
    /// assert_eq!(b7c8b.promotion(), Some(PieceKind::Bishop));
    /// assert_eq!(b7c8b.to_string(), "b7c8b");
    /// ```
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// The square holding the captured piece. Differs from `to` only for en passant.
    #[inline(always)]
    pub fn capture_square(&self) -> Square {
        if self.is_en_passant() {
            Square::new(self.to.file(), self.from.rank())
        } else {
            self.to
        }
    }

    /// Returns `true` if `from`, `to`, and `promotion` all match this [`Move`].
    #[inline(always)]
    pub fn matches(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
        self.from == from && self.to == to && self.promotion() == promotion
    }

    /// Converts this [`Move`] to coordinate notation, such as `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        match self.promotion() {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

/// Splits coordinate notation (`e2e4`, `e7e8q`, `e1g1`) into its source, destination, and optional promotion.
///
/// This only checks the text itself. Whether the move is legal is decided against a board.
///
/// # Example
/// ```
/// # use warden::{parse_move_text, PieceKind, Square};
/// let (from, to, promotion) = parse_move_text("e7e8q").unwrap();
/// assert_eq!((from, to, promotion), (Square::E7, Square::E8, Some(PieceKind::Queen)));
///
/// assert!(parse_move_text("e2").is_err());
/// assert!(parse_move_text("e7e8k").is_err());
/// ```
pub fn parse_move_text(text: &str) -> Result<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::MalformedMove(format!(
            "Move must be 4 or 5 characters of coordinate notation. Got {text:?}"
        )));
    }

    let from = Square::from_algebraic(&text[0..2])?;
    let to = Square::from_algebraic(&text[2..4])?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => {
            let kind = PieceKind::from_char(c).map_err(|_| {
                ChessError::MalformedMove(format!("Unknown promotion piece {c:?} in {text:?}"))
            })?;

            if !kind.is_promotable() {
                return Err(ChessError::MalformedMove(format!(
                    "Cannot promote to a {} in {text:?}",
                    kind.name()
                )));
            }

            Some(kind)
        }
    };

    Ok((from, to, promotion))
}

impl fmt::Display for Move {
    /// A [`Move`] is displayed in coordinate notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    /// Debug formatting displays the notation, the piece, and the kind of move.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.to_uci(), self.piece.name())?;
        if let Some(captured) = self.captured {
            write!(f, " takes {}", captured.name())?;
        }
        write!(f, ", {})", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_text() {
        assert_eq!(
            parse_move_text("e2e4").unwrap(),
            (Square::E2, Square::E4, None)
        );
        assert_eq!(
            parse_move_text(" a2a1N ").unwrap(),
            (Square::A2, Square::A1, Some(PieceKind::Knight))
        );

        assert!(matches!(
            parse_move_text("e2e4qq"),
            Err(ChessError::MalformedMove(_))
        ));
        assert!(matches!(
            parse_move_text("z2e4"),
            Err(ChessError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            parse_move_text("e7e8p"),
            Err(ChessError::MalformedMove(_))
        ));
        assert!(matches!(
            parse_move_text("e7e8x"),
            Err(ChessError::MalformedMove(_))
        ));
    }

    #[test]
    fn test_en_passant_capture_square() {
        let mv = Move::new(
            Square::E5,
            Square::D6,
            Piece::WHITE_PAWN,
            Some(Piece::BLACK_PAWN),
            MoveKind::EnPassant,
        );
        assert_eq!(mv.capture_square(), Square::D5);
        assert!(mv.is_capture());
        assert_eq!(
            format!("{mv:?}"),
            "e5d6 (white pawn takes black pawn, En Passant Capture)"
        );
    }
}
