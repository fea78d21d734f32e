/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Index, str::FromStr};

use crate::{is_in_check, legal_moves_from, ChessError, Color, File, Piece, PieceKind, Rank, Result, Square};

/// Represents the castling rights of a single player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights {
    /// Castling with the h-file ("kingside") Rook.
    pub short: bool,
    /// Castling with the a-file ("queenside") Rook.
    pub long: bool,
}

impl CastlingRights {
    #[inline(always)]
    pub const fn new(short: bool, long: bool) -> Self {
        Self { short, long }
    }

    /// Both rights, as at the start of a game.
    #[inline(always)]
    pub const fn both() -> Self {
        Self::new(true, true)
    }

    /// Returns `true` if either right remains.
    #[inline(always)]
    pub const fn any(&self) -> bool {
        self.short || self.long
    }
}

/// A full chess position: piece placement, side to move, castling rights,
/// en passant target, and the move counters.
///
/// A [`Board`] is a plain value. Cloning it yields an independent copy that
/// can be mutated freely, which is how trial moves are checked for legality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Which piece, if any, stands on each square.
    pub(crate) mailbox: [Option<Piece>; Square::COUNT],

    /// The [`Color`] of the current player.
    pub(crate) side_to_move: Color,

    /// Castling rights for each player.
    pub(crate) castling_rights: [CastlingRights; Color::COUNT],

    /// The square a Pawn passed over on the previous move, if it double-pushed.
    pub(crate) ep_square: Option<Square>,

    /// Used to enforce the fifty-move rule.
    ///
    /// - Incremented after each move.
    /// - Reset after a capture or a pawn moves.
    pub(crate) halfmove: usize,

    /// Number of moves since the beginning of the game.
    ///
    /// A fullmove is a complete turn by white and then by black.
    pub(crate) fullmove: usize,
}

impl Board {
    /// Creates a new, empty [`Board`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No en passant square available
    /// * Halfmove counter set to 0
    /// * Fullmove counter set to 1
    ///
    /// # Example
    /// ```
    /// # use warden::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [None; Square::COUNT],
            side_to_move: Color::White,
            castling_rights: [CastlingRights::new(false, false); Color::COUNT],
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Creates a [`Board`] with the standard starting layout.
    ///
    /// # Example
    /// ```
    /// # use warden::{Board, FEN_STARTPOS};
    /// assert_eq!(Board::starting_position().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn starting_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; File::COUNT] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::new();
        for color in Color::all() {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                board.place(
                    Piece::new(color, kind),
                    Square::new(file, Rank::first(color)),
                );
                board.place(
                    Piece::new(color, Pawn),
                    Square::new(file, Rank::second(color)),
                );
            }
        }
        board.castling_rights = [CastlingRights::both(); Color::COUNT];

        board
    }

    /// Creates a new [`Board`] from the provided FEN string.
    ///
    /// Missing trailing fields take their defaults (`w - - 0 1`).
    /// The resulting position is validated: see [`Board::validate`].
    ///
    /// # Example
    /// ```
    /// # use warden::{Board, Color, Square, FEN_KIWIPETE};
    /// let board = Board::from_fen(FEN_KIWIPETE).unwrap();
    /// assert_eq!(board.side_to_move(), Color::White);
    /// assert_eq!(board.to_fen(), FEN_KIWIPETE);
    ///
    /// // Black cannot have two Kings
    /// assert!(Board::from_fen("kk6/8/8/8/8/8/8/7K w - - 0 1").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();
        let mut split = fen.split_whitespace();

        let placements = split.next().ok_or(ChessError::MalformedPosition(String::from(
            "FEN string must have piece placements",
        )))?;
        board.parse_placements(placements)?;

        let active_color = split.next().unwrap_or("w");
        board.side_to_move = match active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => {
                return Err(ChessError::MalformedPosition(format!(
                    "Side to move must be 'w' or 'b'. Got {active_color:?}"
                )))
            }
        };

        let castling = split.next().unwrap_or("-");
        if castling != "-" {
            for c in castling.chars() {
                let rights = &mut board.castling_rights[Color::from_case(c)];
                match c {
                    'K' | 'k' => rights.short = true,
                    'Q' | 'q' => rights.long = true,
                    _ => {
                        return Err(ChessError::MalformedPosition(format!(
                            "Castling rights must be a subset of \"KQkq\" or \"-\". Got {castling:?}"
                        )))
                    }
                }
            }
        }

        let en_passant_target = split.next().unwrap_or("-");
        board.ep_square = match en_passant_target {
            "-" => None,
            square => Some(Square::from_algebraic(square)?),
        };

        let halfmove = split.next().unwrap_or("0");
        board.halfmove = halfmove.parse().map_err(|_| {
            ChessError::MalformedPosition(format!(
                "FEN string must have valid halfmove counter. Got {halfmove:?}"
            ))
        })?;

        let fullmove = split.next().unwrap_or("1");
        board.fullmove = match fullmove.parse() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(ChessError::MalformedPosition(format!(
                    "FEN string must have a positive fullmove counter. Got {fullmove:?}"
                )))
            }
        };

        if let Some(extra) = split.next() {
            return Err(ChessError::MalformedPosition(format!(
                "FEN string has unexpected trailing field {extra:?}"
            )));
        }

        board.validate()?;

        Ok(board)
    }

    /// Fills the mailbox from the placement field of a FEN string.
    fn parse_placements(&mut self, placements: &str) -> Result<()> {
        let ranks = placements.split('/').collect::<Vec<_>>();
        if ranks.len() != Rank::COUNT {
            return Err(ChessError::MalformedPosition(format!(
                "FEN placements must have 8 ranks. Got {}",
                ranks.len()
            )));
        }

        // FEN lists rank 8 first
        for (rank, placement) in Rank::iter().rev().zip(ranks) {
            let wrong_width = || {
                ChessError::MalformedPosition(format!(
                    "Rank {rank} must describe exactly 8 files. Got {placement:?}"
                ))
            };

            let mut file = 0;
            for c in placement.chars() {
                if let Some(empty) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    file += empty as u8;
                } else {
                    let piece = Piece::from_char(c)?;
                    let square = Square::new(File::new(file).map_err(|_| wrong_width())?, rank);
                    self.place(piece, square);
                    file += 1;
                }

                if file as usize > File::COUNT {
                    return Err(wrong_width());
                }
            }

            if file as usize != File::COUNT {
                return Err(wrong_width());
            }
        }

        Ok(())
    }

    /// Checks that this [`Board`] describes a position that can occur in a game:
    /// * Each side has exactly one King
    /// * No Pawns stand on the first or eighth rank
    /// * Castling rights are only held where the King and Rook are on their home squares
    /// * The en passant square, if any, lies behind a Pawn that just double-pushed
    /// * The side that just moved is not in check
    pub fn validate(&self) -> Result<()> {
        for color in Color::all() {
            let kings = self
                .pieces()
                .filter(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
                .count();

            if kings != 1 {
                return Err(ChessError::MalformedPosition(format!(
                    "{} must have exactly one King. Found {kings}",
                    color.name()
                )));
            }
        }

        if let Some((square, _)) = self
            .pieces()
            .find(|(sq, piece)| piece.is_pawn() && matches!(sq.rank(), Rank::ONE | Rank::EIGHT))
        {
            return Err(ChessError::MalformedPosition(format!(
                "Pawns cannot stand on the first or eighth rank. Found one on {square}"
            )));
        }

        for color in Color::all() {
            let rights = self.castling_rights[color];
            let king = Piece::new(color, PieceKind::King);
            let rook = Piece::new(color, PieceKind::Rook);
            let king_home = self.piece_at(Square::king_start(color)) == Some(king);

            let short_ok = !rights.short
                || (king_home && self.piece_at(Square::rook_short_start(color)) == Some(rook));
            let long_ok = !rights.long
                || (king_home && self.piece_at(Square::rook_long_start(color)) == Some(rook));

            if !short_ok || !long_ok {
                return Err(ChessError::MalformedPosition(format!(
                    "{} holds castling rights without its King and Rook on their home squares",
                    color.name()
                )));
            }
        }

        if let Some(ep) = self.ep_square {
            let mover = self.side_to_move.opponent();
            let pawn = ep.forward_by(mover, 1).and_then(|sq| self.piece_at(sq));

            if ep.rank() != Rank::third(mover) || pawn != Some(Piece::new(mover, PieceKind::Pawn)) {
                return Err(ChessError::MalformedPosition(format!(
                    "En passant square {ep} must be on rank {} behind a {} pawn",
                    Rank::third(mover),
                    mover.name()
                )));
            }
        }

        if is_in_check(self, self.side_to_move.opponent()) {
            return Err(ChessError::MalformedPosition(format!(
                "{} is in check but it is {}'s turn to move",
                self.side_to_move.opponent().name(),
                self.side_to_move.name()
            )));
        }

        Ok(())
    }

    /// Generates a FEN string of this [`Board`].
    ///
    /// # Example
    /// ```
    /// # use warden::Board;
    /// let board = Board::default();
    /// assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    /// ```
    pub fn to_fen(&self) -> String {
        format!("{self}")
    }

    /// Generates the placement field of this [`Board`]'s FEN string.
    pub fn placements_fen(&self) -> String {
        let mut placements = Vec::with_capacity(Rank::COUNT);

        for rank in Rank::iter().rev() {
            let mut placement = String::with_capacity(File::COUNT);
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        placement += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placement.push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placement += &empty_spaces.to_string();
            }
            placements.push(placement);
        }

        placements.join("/")
    }

    /// Returns the castling rights of this [`Board`] as they appear in a FEN string.
    pub fn castling_rights_fen(&self) -> String {
        let mut castling = String::with_capacity(4);

        for (color, short, long) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
            if self.castling_rights[color].short {
                castling.push(short);
            }
            if self.castling_rights[color].long {
                castling.push(long);
            }
        }

        // If no side can castle, use a hyphen
        if castling.is_empty() {
            castling = String::from("-");
        }
        castling
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Returns `true` if there is a piece on `square`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Places `piece` on `square`, returning whatever stood there before.
    ///
    /// # Example
    /// ```
    /// # use warden::{Board, Piece, Square};
    /// let mut board = Board::new();
    /// assert_eq!(board.place(Piece::WHITE_ROOK, Square::A1), None);
    /// assert_eq!(board.place(Piece::BLACK_KNIGHT, Square::A1), Some(Piece::WHITE_ROOK));
    /// assert_eq!(board.piece_at(Square::A1), Some(Piece::BLACK_KNIGHT));
    /// ```
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) -> Option<Piece> {
        self.mailbox[square].replace(piece)
    }

    /// Removes and returns the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square].take()
    }

    /// Obtains an independent copy of this [`Board`] for trying out a move.
    #[inline(always)]
    pub fn clone_for_trial(&self) -> Self {
        self.clone()
    }

    /// Returns the [`Square`] of `color`'s King, if it is on the board.
    #[inline(always)]
    pub fn try_king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::iter().find(|&square| self.piece_at(square) == Some(king))
    }

    /// Returns the [`Square`] of `color`'s King.
    ///
    /// # Panics
    ///
    /// If `color` has no King, which cannot happen in a position reached through legal play.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Square {
        match self.try_king_square(color) {
            Some(square) => square,
            None => panic!(
                "invariant violated: {} has no King on {}",
                color.name(),
                self.to_fen()
            ),
        }
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// If en passant can be performed, returns the en passant [`Square`].
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the [`CastlingRights`] of both players, indexable by [`Color`].
    #[inline(always)]
    pub const fn castling_rights(&self) -> &[CastlingRights; Color::COUNT] {
        &self.castling_rights
    }

    /// Returns the [`CastlingRights`] for `color`.
    #[inline(always)]
    pub const fn castling_rights_for(&self, color: Color) -> CastlingRights {
        self.castling_rights[color.index()]
    }

    /// Returns the half-move counter of the current position.
    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    /// Returns the full-move counter of the current position.
    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// An iterator over every occupied square and the [`Piece`] on it, from `a1` to `h8`.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// An iterator over every square holding a piece of `color`.
    #[inline(always)]
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// The en passant square, but only if the side to move has a legal en passant capture onto it.
    ///
    /// # Example
    /// ```
    /// # use warden::{Board, Square};
    /// // After 1. e4 there is a target, but no Black pawn can use it
    /// let board: Board = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse().unwrap();
    /// assert_eq!(board.ep_square(), Some(Square::E3));
    /// assert_eq!(board.capturable_ep_square(), None);
    ///
    /// let board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2".parse().unwrap();
    /// assert_eq!(board.capturable_ep_square(), Some(Square::D6));
    /// ```
    pub fn capturable_ep_square(&self) -> Option<Square> {
        let ep = self.ep_square?;
        let color = self.side_to_move;
        let pawn = Piece::new(color, PieceKind::Pawn);

        let can_capture = [-1, 1]
            .into_iter()
            .filter_map(|file_delta| ep.offset(file_delta, -color.negation_multiplier()))
            .filter(|&from| self.piece_at(from) == Some(pawn))
            .any(|from| legal_moves_from(self, from).iter().any(|mv| mv.is_en_passant()));

        can_capture.then_some(ep)
    }

    /// Two positions are the same for the purposes of repetition if they share the same piece layout,
    /// side to move, castling rights, and usable en passant capture. The move counters are ignored.
    ///
    /// An en passant square that no Pawn can capture onto does not distinguish positions.
    #[inline(always)]
    pub fn is_same_as(&self, other: &Self) -> bool {
        self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.mailbox == other.mailbox
            && self.capturable_ep_square() == other.capturable_ep_square()
    }
}

impl Default for Board {
    /// The standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::starting_position()
    }
}

impl FromStr for Board {
    type Err = ChessError;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl fmt::Display for Board {
    /// Display this board's FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placements = self.placements_fen();
        let active_color = self.side_to_move;
        let castling = self.castling_rights_fen();

        let en_passant_target = if let Some(square) = self.ep_square {
            square.to_string()
        } else {
            String::from("-")
        };

        let halfmove = self.halfmove;
        let fullmove = self.fullmove;

        write!(
            f,
            "{placements} {active_color} {castling} {en_passant_target} {halfmove} {fullmove}"
        )
    }
}

impl fmt::Debug for Board {
    /// Draws the board as a diagram, with the position's metadata alongside it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let piece_char = self
                    .piece_at(Square::new(file, rank))
                    .map(|p| p.char())
                    .unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            if rank == Rank::SEVEN {
                write!(f, "           FEN: {}", self.to_fen())?;
            } else if rank == Rank::SIX {
                write!(f, "          Side: {}", self.side_to_move.name())?;
            } else if rank == Rank::FIVE {
                write!(f, "      Castling: {}", self.castling_rights_fen())?;
            } else if rank == Rank::FOUR {
                let ep = self
                    .ep_square
                    .map(|t| t.to_algebraic())
                    .unwrap_or(String::from("-"));
                write!(f, "            EP: {ep}")?;
            } else if rank == Rank::THREE {
                write!(f, "     Half-move: {}", self.halfmove)?;
            } else if rank == Rank::TWO {
                write!(f, "     Full-move: {}", self.fullmove)?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FEN_KIWIPETE, FEN_STARTPOS};

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            FEN_STARTPOS,
            FEN_KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 17 42",
        ];

        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
            assert_eq!(Board::from_fen(&board.to_fen()).unwrap(), board);
        }
    }

    #[test]
    fn test_default_is_startpos() {
        assert_eq!(Board::default(), Board::from_fen(FEN_STARTPOS).unwrap());
        assert_eq!(Board::default().king_square(Color::Black), Square::E8);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn test_malformed_positions() {
        let bad = [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",                          // 7 ranks
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",                   // 9 files
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",                   // 7 files
            "4k3/8/8/8/8/8/8/8 w - - 0 1",                     // no white King
            "4k3/8/8/8/8/8/8/4KK2 w - - 0 1",                  // two white Kings
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1",                  // pawn on rank 8
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",                   // bad side
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1",                   // castling without a Rook
            "4k3/8/8/8/8/8/8/4K2R w X - 0 1",                  // unknown castling flag
            "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",                  // ep on the wrong rank
            "4k3/8/8/8/8/8/8/4K3 w - e6 0 1",                  // ep without a pawn
            "4k3/8/8/8/8/8/8/4K3 w - - x 1",                   // bad halfmove
            "4k3/8/8/8/8/8/8/4K3 w - - 0 0",                   // bad fullmove
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",             // trailing junk
            "4k3/4R3/8/8/8/8/8/4K3 w - - 0 1",                 // side not to move is in check
        ];

        for fen in bad {
            assert!(
                matches!(Board::from_fen(fen), Err(ChessError::MalformedPosition(_))),
                "{fen:?} should be rejected as a malformed position"
            );
        }

        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1"),
            Err(ChessError::MalformedPiece('X'))
        );
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
            Err(ChessError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new();
        board.place(Piece::WHITE_KING, Square::E1);
        board.place(Piece::BLACK_KING, Square::E8);
        board.place(Piece::WHITE_QUEEN, Square::D1);

        assert_eq!(board.pieces().count(), 3);
        assert_eq!(board.pieces_of(Color::White).count(), 2);
        assert_eq!(board.remove(Square::D1), Some(Piece::WHITE_QUEEN));
        assert_eq!(board.remove(Square::D1), None);
        assert_eq!(board[Square::E8], Some(Piece::BLACK_KING));
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_trial_copies_are_independent() {
        let board = Board::default();
        let mut trial = board.clone_for_trial();
        trial.remove(Square::E2);

        assert!(board.has(Square::E2));
        assert!(!trial.has(Square::E2));
        assert_ne!(board, trial);
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn test_missing_king_panics() {
        Board::new().king_square(Color::White);
    }

    #[test]
    fn test_same_position_ignores_clocks() {
        let a = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 12 30").unwrap();
        let c = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();

        assert!(a.is_same_as(&b));
        assert!(!a.is_same_as(&c));
    }

    #[test]
    fn test_same_position_ignores_unusable_ep_square() {
        let with_target =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        let without_target =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 4 3").unwrap();
        assert!(with_target.is_same_as(&without_target));

        // Here the d6 capture is available, so the target matters
        let usable = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let spent = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 3").unwrap();
        assert!(!usable.is_same_as(&spent));

        // A pinned Pawn cannot capture en passant, so the target is meaningless
        let pinned = Board::from_fen("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 2").unwrap();
        assert_eq!(pinned.capturable_ep_square(), None);
        let pinned_spent = Board::from_fen("4k3/8/8/K2pP2r/8/8/8/8 w - - 0 3").unwrap();
        assert!(pinned.is_same_as(&pinned_spent));
    }
}
