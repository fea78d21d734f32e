/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{ChessError, Color, Result};

/// Represents a single square on an `8x8` chess board.
///
/// Internally encoded as a single byte, using [Least Significant File Mapping](https://www.chessprogramming.org/Square_Mapping_Considerations#Deduction_on_Files_and_Ranks),
/// so `square = file + rank * 8`. The indices of each square on the board is given as follows:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const A3: Self = Self::new(File::A, Rank::THREE);
    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const A8: Self = Self::new(File::A, Rank::EIGHT);

    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const B3: Self = Self::new(File::B, Rank::THREE);
    pub const B4: Self = Self::new(File::B, Rank::FOUR);
    pub const B5: Self = Self::new(File::B, Rank::FIVE);
    pub const B6: Self = Self::new(File::B, Rank::SIX);
    pub const B7: Self = Self::new(File::B, Rank::SEVEN);
    pub const B8: Self = Self::new(File::B, Rank::EIGHT);

    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const C2: Self = Self::new(File::C, Rank::TWO);
    pub const C3: Self = Self::new(File::C, Rank::THREE);
    pub const C4: Self = Self::new(File::C, Rank::FOUR);
    pub const C5: Self = Self::new(File::C, Rank::FIVE);
    pub const C6: Self = Self::new(File::C, Rank::SIX);
    pub const C7: Self = Self::new(File::C, Rank::SEVEN);
    pub const C8: Self = Self::new(File::C, Rank::EIGHT);

    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const D3: Self = Self::new(File::D, Rank::THREE);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const D6: Self = Self::new(File::D, Rank::SIX);
    pub const D7: Self = Self::new(File::D, Rank::SEVEN);
    pub const D8: Self = Self::new(File::D, Rank::EIGHT);

    pub const E1: Self = Self::new(File::E, Rank::ONE);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);
    pub const E6: Self = Self::new(File::E, Rank::SIX);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);

    pub const F1: Self = Self::new(File::F, Rank::ONE);
    pub const F2: Self = Self::new(File::F, Rank::TWO);
    pub const F3: Self = Self::new(File::F, Rank::THREE);
    pub const F4: Self = Self::new(File::F, Rank::FOUR);
    pub const F5: Self = Self::new(File::F, Rank::FIVE);
    pub const F6: Self = Self::new(File::F, Rank::SIX);
    pub const F7: Self = Self::new(File::F, Rank::SEVEN);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);

    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const G2: Self = Self::new(File::G, Rank::TWO);
    pub const G3: Self = Self::new(File::G, Rank::THREE);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const G5: Self = Self::new(File::G, Rank::FIVE);
    pub const G6: Self = Self::new(File::G, Rank::SIX);
    pub const G7: Self = Self::new(File::G, Rank::SEVEN);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);

    pub const H1: Self = Self::new(File::H, Rank::ONE);
    pub const H2: Self = Self::new(File::H, Rank::TWO);
    pub const H3: Self = Self::new(File::H, Rank::THREE);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);
    pub const H5: Self = Self::new(File::H, Rank::FIVE);
    pub const H6: Self = Self::new(File::H, Rank::SIX);
    pub const H7: Self = Self::new(File::H, Rank::SEVEN);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Returns an iterator over all available squares, starting at `a1` and ending at `h8`.
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use warden::{Square, File, Rank};
    /// let c4 = Square::new(File::C, Rank::FOUR);
    /// assert_eq!(c4, Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Creates a new [`Square`] from the provided index value.
    ///
    /// The provided `index` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// assert_eq!(Square::from_index(26).unwrap(), Square::C4);
    /// assert!(Square::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            return Err(ChessError::MalformedCoordinate(format!(
                "Square index must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            )));
        }

        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from the provided index value, without error checking.
    ///
    /// # Panics
    ///
    /// If `index` is greater than `63` and debug assertions are enabled.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < 64, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Returns the square the King starts on for `color`.
    #[inline(always)]
    pub const fn king_start(color: Color) -> Self {
        Self::E1.rank_relative_to(color)
    }

    /// Returns the square the kingside ("short") Rook starts on for `color`.
    #[inline(always)]
    pub const fn rook_short_start(color: Color) -> Self {
        Self::H1.rank_relative_to(color)
    }

    /// Returns the square the queenside ("long") Rook starts on for `color`.
    #[inline(always)]
    pub const fn rook_long_start(color: Color) -> Self {
        Self::A1.rank_relative_to(color)
    }

    /// Returns the destination of the King after performing a short ("kingside") castle by the supplied [`Color`].
    ///
    /// # Example
    /// ```
    /// # use warden::{Color, Square};
    /// assert_eq!(Square::king_short_castle(Color::White), Square::G1);
    /// assert_eq!(Square::king_short_castle(Color::Black), Square::G8);
    /// ```
    #[inline(always)]
    pub const fn king_short_castle(color: Color) -> Self {
        Self::G1.rank_relative_to(color)
    }

    /// Returns the destination of the King after performing a long ("queenside") castle by the supplied [`Color`].
    ///
    /// # Example
    /// ```
    /// # use warden::{Color, Square};
    /// assert_eq!(Square::king_long_castle(Color::White), Square::C1);
    /// assert_eq!(Square::king_long_castle(Color::Black), Square::C8);
    /// ```
    #[inline(always)]
    pub const fn king_long_castle(color: Color) -> Self {
        Self::C1.rank_relative_to(color)
    }

    /// Returns the destination of the Rook after performing a short ("kingside") castle by the supplied [`Color`].
    #[inline(always)]
    pub const fn rook_short_castle(color: Color) -> Self {
        Self::F1.rank_relative_to(color)
    }

    /// Returns the destination of the Rook after performing a long ("queenside") castle by the supplied [`Color`].
    #[inline(always)]
    pub const fn rook_long_castle(color: Color) -> Self {
        Self::D1.rank_relative_to(color)
    }

    /// Flips the [`Rank`] of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// assert_eq!(Square::A1.flipped_rank(), Square::A8);
    /// assert_eq!(Square::C4.flipped_rank(), Square::C5);
    /// ```
    #[inline(always)]
    pub const fn flipped_rank(self) -> Self {
        Self(self.0 ^ 0b0011_1000)
    }

    /// If `color` is Black, flips the [`Rank`] of this [`Square`].
    /// If `color` is White, does nothing.
    #[inline(always)]
    pub const fn rank_relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => self.flipped_rank(),
        }
    }

    /// Fetches the [`File`] of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & 0b0000_0111) // Same as % 8
    }

    /// Fetches the [`Rank`] of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3) // Same as / 8
    }

    /// Fetches the inner index value of the [`Square`], casted to a [`usize`].
    ///
    /// Useful when using a [`Square`] to index into things.
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// assert_eq!(Square::C4.index(), 26);
    /// ```
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the number of files away `self` is from `other`.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().0.abs_diff(other.file().0)
    }

    /// Returns the number of ranks away `self` is from `other`.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().0.abs_diff(other.rank().0)
    }

    /// Creates a [`Square`] from algebraic notation, such as `"c4"`.
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// let c4 = Square::from_algebraic("c4");
    /// assert_eq!(c4.unwrap(), Square::C4);
    ///
    /// assert!(Square::from_algebraic("z0").is_err());
    /// assert!(Square::from_algebraic("a9").is_err());
    /// ```
    pub fn from_algebraic(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ChessError::MalformedCoordinate(format!(
                "Square must contain exactly 2 characters. Got {square:?}"
            )));
        };

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }

    /// Converts this [`Square`] to algebraic notation.
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// assert_eq!("c4", Square::C4.to_algebraic());
    /// ```
    #[inline(always)]
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Attempt to offset this [`Square`] by the file and rank offsets.
    ///
    /// If `self + offset` would leave the board, then `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::C4.offset(-1, -1), Some(Square::B3));
    /// assert_eq!(Square::A1.offset(-1, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file().offset(file_delta) else {
            return None;
        };

        let Some(rank) = self.rank().offset(rank_delta) else {
            return None;
        };

        Some(Self::new(file, rank))
    }

    /// Moves this [`Square`] `n` ranks "forward" from the perspective of `color`, if possible.
    ///
    /// # Example
    /// ```
    /// # use warden::{Square, Color};
    /// assert_eq!(Square::C4.forward_by(Color::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 1), Some(Square::C3));
    /// assert_eq!(Square::C8.forward_by(Color::White, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.negation_multiplier())
    }

    /// Moves this [`Square`] `n` ranks "backward" from the perspective of `color`, if possible.
    #[inline(always)]
    pub const fn backward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.opponent().negation_multiplier())
    }

    /// Returns an iterator over the squares strictly between `self` and `other`,
    /// if they share a rank, file, or diagonal. Otherwise the iterator is empty.
    ///
    /// # Example
    /// ```
    /// # use warden::Square;
    /// let between = Square::E1.between(Square::H1).collect::<Vec<_>>();
    /// assert_eq!(between, [Square::F1, Square::G1]);
    ///
    /// assert_eq!(Square::A1.between(Square::B3).count(), 0);
    /// ```
    pub fn between(self, other: Self) -> impl Iterator<Item = Self> {
        let files = other.file().0 as i8 - self.file().0 as i8;
        let ranks = other.rank().0 as i8 - self.rank().0 as i8;
        let aligned = files == 0 || ranks == 0 || files.abs() == ranks.abs();

        let steps = if aligned && self != other {
            files.abs().max(ranks.abs()) - 1
        } else {
            0
        };

        let (df, dr) = (files.signum(), ranks.signum());
        (1..=steps).filter_map(move |i| self.offset(df * i, dr * i))
    }
}

/// Converts a [`Square`] into its algebraic text, such as `"e4"`.
#[inline(always)]
pub fn coordinate_to_text(square: Square) -> String {
    square.to_algebraic()
}

/// Parses algebraic text, such as `"e4"`, into a [`Square`].
#[inline(always)]
pub fn text_to_coordinate(text: &str) -> Result<Square> {
    Square::from_algebraic(text)
}

impl FromStr for Square {
    type Err = ChessError;
    /// Wrapper for [`Square::from_algebraic`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = ChessError;
    /// Wrapper for [`Square::from_algebraic`].
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_algebraic(value)
    }
}

impl TryFrom<usize> for Square {
    type Error = ChessError;
    /// Wrapper for [`Square::from_index`].
    #[inline(always)]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// A [`Square`] can be used to index into an array of 64 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// A [`Square`] can be used to mutably index into an array of 64 elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    /// Calls [`Square::to_algebraic`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_algebraic().fmt(f)
    }
}

impl fmt::Debug for Square {
    /// Displays the algebraic name of the square alongside its internal index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_algebraic(), self.0)
    }
}

/// Represents one of eight ranks on a chess board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all ranks, from the first to the eighth.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Construct a new [`Rank`] from the provided value.
    #[inline(always)]
    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            return Err(ChessError::MalformedCoordinate(format!(
                "Rank must be between [{}, {}]. Got {rank}",
                Self::MIN,
                Self::MAX
            )));
        }

        Ok(Self(rank))
    }

    /// First rank relative to `color`.
    #[inline(always)]
    pub const fn first(color: Color) -> Self {
        [Self::ONE, Self::EIGHT][color.index()]
    }

    /// Rank a Pawn of `color` starts on.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        [Self::TWO, Self::SEVEN][color.index()]
    }

    /// Rank an en passant square lies on after `color` double-pushes.
    #[inline(always)]
    pub const fn third(color: Color) -> Self {
        [Self::THREE, Self::SIX][color.index()]
    }

    /// Rank a Pawn of `color` promotes on.
    #[inline(always)]
    pub const fn eighth(color: Color) -> Self {
        [Self::EIGHT, Self::ONE][color.index()]
    }

    /// Parses a rank digit `'1'..='8'`.
    pub fn from_char(rank: char) -> Result<Self> {
        match rank {
            '1'..='8' => Ok(Self(rank as u8 - b'1')),
            _ => Err(ChessError::MalformedCoordinate(format!(
                "Rank must be between [1, 8]. Got {rank:?}"
            ))),
        }
    }

    /// Obtain the inner value as a `usize`.
    ///
    /// Useful for indexing.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }

    /// Attempt to offset this [`Rank`] by the provided `delta`.
    ///
    /// If `self + delta` would exceed the bounds of this [`Rank`], then `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use warden::Rank;
    /// assert_eq!(Rank::FOUR.offset(1), Some(Rank::FIVE));
    /// assert_eq!(Rank::ONE.offset(-1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        match self.0.checked_add_signed(delta) {
            Some(bits) if bits <= Self::MAX => Some(Self(bits)),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

/// Represents one of eight files on a chess board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all files, from `a` to `h`.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Construct a new [`File`] from the provided value.
    #[inline(always)]
    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            return Err(ChessError::MalformedCoordinate(format!(
                "File must be between [{}, {}]. Got {file}",
                Self::MIN,
                Self::MAX
            )));
        }

        Ok(Self(file))
    }

    /// Parses a file letter `'a'..='h'` (case-insensitive).
    pub fn from_char(file: char) -> Result<Self> {
        match file.to_ascii_lowercase() {
            lower @ 'a'..='h' => Ok(Self(lower as u8 - b'a')),
            _ => Err(ChessError::MalformedCoordinate(format!(
                "File must be between [a, h]. Got {file:?}"
            ))),
        }
    }

    /// Obtain the inner value as a `usize`.
    ///
    /// Useful for indexing.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }

    /// Attempt to offset this [`File`] by the provided `delta`.
    ///
    /// If `self + delta` would exceed the bounds of this [`File`], then `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use warden::File;
    /// assert_eq!(File::C.offset(1), Some(File::D));
    /// assert_eq!(File::A.offset(-1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        match self.0.checked_add_signed(delta) {
            Some(bits) if bits <= Self::MAX => Some(Self(bits)),
            _ => None,
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // Test the four corners
        assert_eq!(Square::new(File::A, Rank::ONE).to_string(), "a1");
        assert_eq!(Square::new(File::H, Rank::ONE).to_string(), "h1");
        assert_eq!(Square::new(File::A, Rank::EIGHT).to_string(), "a8");
        assert_eq!(Square::new(File::H, Rank::EIGHT).to_string(), "h8");

        // And some arbitrary location near the middle
        assert_eq!(Square::new(File::D, Rank::FOUR).to_string(), "d4");
        assert_eq!(Square::E4.file(), File::E);
        assert_eq!(Square::E4.rank(), Rank::FOUR);
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Rank::from_char('1').unwrap(), Rank::ONE);
        assert_eq!(Rank::from_char('8').unwrap(), Rank::EIGHT);
        assert_eq!(File::from_char('a').unwrap(), File::A);
        assert_eq!(File::from_char('H').unwrap(), File::H);

        assert!(Rank::from_char('0').is_err());
        assert!(Rank::from_char('9').is_err());
        assert!(File::from_char('z').is_err());
        assert!(File::from_char('1').is_err());

        // Now test squares as a whole
        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert_eq!(Square::try_from(63usize).unwrap(), Square::H8);
        assert_eq!("d4".parse::<Square>().unwrap(), Square::D4);

        for bad in ["a", "1", "", "a10", "i1", "é4"] {
            assert!(
                matches!(
                    Square::try_from(bad),
                    Err(ChessError::MalformedCoordinate(_))
                ),
                "{bad:?} should not parse"
            );
        }
        assert!(Square::try_from(64usize).is_err());
    }

    #[test]
    fn test_text_round_trip() {
        for square in Square::iter() {
            let text = coordinate_to_text(square);
            assert_eq!(text_to_coordinate(&text).unwrap(), square);
        }
    }

    #[test]
    fn test_relative_squares() {
        assert_eq!(Square::king_start(Color::Black), Square::E8);
        assert_eq!(Square::rook_long_start(Color::Black), Square::A8);
        assert_eq!(Square::rook_short_castle(Color::Black), Square::F8);
        assert_eq!(Square::E2.backward_by(Color::Black, 2), Some(Square::E4));
        assert_eq!(Rank::third(Color::Black), Rank::SIX);
    }

    #[test]
    fn test_between() {
        let between = Square::A1.between(Square::E1).collect::<Vec<_>>();
        assert_eq!(between, [Square::B1, Square::C1, Square::D1]);

        let between = Square::H8.between(Square::E5).collect::<Vec<_>>();
        assert_eq!(between, [Square::G7, Square::F6]);

        assert_eq!(Square::E4.between(Square::E5).count(), 0);
        assert_eq!(Square::E4.between(Square::E4).count(), 0);
        assert_eq!(Square::B1.between(Square::C3).count(), 0);
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; 64];
        board[Square::D5] = u8::MAX;
        assert_eq!(board[35], u8::MAX);
    }
}
