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

use anyhow::{anyhow, Context};

use crate::{Color, RulesError, BOARD_SIZE};

/// Represents a single square on an `8x8` chess board.
///
/// A square is addressed by a `(file, rank)` pair, both of which are `[0, 8)`.
/// Rank `0` is the top row of the board, where Black's pieces start,
/// and rank `7` is the bottom row, where White's pieces start.
///
/// Internally encoded as `file + rank * 8`, so squares sort from the top-left
/// corner of the board to the bottom-right:
/// ```text
///         file
///     0  1  2  3  4  5  6  7
/// 0|  0  1  2  3  4  5  6  7
/// 1|  8  9 10 11 12 13 14 15
/// 2| 16 17 18 19 20 21 22 23
/// 3| 24 25 26 27 28 29 30 31
/// 4| 32 33 34 35 36 37 38 39
/// 5| 40 41 42 43 44 45 46 47
/// 6| 48 49 50 51 52 53 54 55
/// 7| 56 57 58 59 60 61 62 63
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    const FILE_MASK: u8 = 0b0000_0111;

    /// Returns an iterator over all available squares, starting at the top-left corner.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::new(0, 0));
    /// assert_eq!(iter.last().unwrap(), Square::new(7, 7));
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from a file and rank.
    ///
    /// # Panics
    ///
    /// If `file` or `rank` is not `[0, 8)`. Use [`Square::try_new`] for untrusted input.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// let sq = Square::new(4, 6);
    /// assert_eq!(sq.file(), 4);
    /// assert_eq!(sq.rank(), 6);
    /// ```
    #[inline(always)]
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(
            file < BOARD_SIZE && rank < BOARD_SIZE,
            "Square coordinates must be between [0, 8)"
        );
        Self(file + rank * BOARD_SIZE)
    }

    /// Creates a new [`Square`] from a pair of signed coordinates.
    ///
    /// Returns [`RulesError::InvalidSquare`] if either coordinate falls outside the board.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::try_new(2, 5).unwrap(), Square::new(2, 5));
    /// assert!(Square::try_new(8, 0).is_err());
    /// assert!(Square::try_new(0, -1).is_err());
    /// ```
    #[inline(always)]
    pub fn try_new(file: i8, rank: i8) -> Result<Self, RulesError> {
        if !Self::on_board(file, rank) {
            return Err(RulesError::InvalidSquare { file, rank });
        }

        Ok(Self::new(file as u8, rank as u8))
    }

    /// Returns `true` if both coordinates lie within `[0, 8)`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert!(Square::on_board(0, 7));
    /// assert!(!Square::on_board(-1, 3));
    /// assert!(!Square::on_board(3, 8));
    /// ```
    #[inline(always)]
    pub const fn on_board(file: i8, rank: i8) -> bool {
        0 <= file && file < BOARD_SIZE as i8 && 0 <= rank && rank < BOARD_SIZE as i8
    }

    /// Fetches the file (column) of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.0 & Self::FILE_MASK // Same as % 8
    }

    /// Fetches the rank (row) of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.0 >> 3 // Same as / 8
    }

    /// Fetches the file and rank of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::new(3, 1).parts(), (3, 1));
    /// ```
    #[inline(always)]
    pub const fn parts(&self) -> (u8, u8) {
        (self.file(), self.rank())
    }

    /// Returns the number of ranks away `self` is from `other`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::new(1, 1).distance_ranks(Square::new(1, 3)), 2);
    /// assert_eq!(Square::new(1, 3).distance_ranks(Square::new(6, 3)), 0);
    /// ```
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Attempt to offset this [`Square`] by the file and rank offsets.
    ///
    /// If the result would fall off of the board, then `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::new(2, 3).offset(1, 1), Some(Square::new(3, 4)));
    /// assert_eq!(Square::new(2, 3).offset(-1, -1), Some(Square::new(1, 2)));
    /// assert_eq!(Square::new(0, 0).offset(-1, 0), None);
    /// assert_eq!(Square::new(7, 7).offset(0, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;

        if Self::on_board(file, rank) {
            Some(Self::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Moves this [`Square`] `n` ranks towards `color`'s promotion rank, if possible.
    ///
    /// White advances towards rank `0`, Black advances towards rank `7`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Square};
    /// assert_eq!(Square::new(4, 6).forward_by(Color::White, 2), Some(Square::new(4, 4)));
    /// assert_eq!(Square::new(4, 1).forward_by(Color::Black, 1), Some(Square::new(4, 2)));
    /// assert_eq!(Square::new(4, 0).forward_by(Color::White, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: i8) -> Option<Self> {
        self.offset(0, n * color.forward())
    }

    /// Returns the square on the same rank as `self`, but on `file`.
    #[inline(always)]
    pub const fn with_file(&self, file: u8) -> Self {
        Self::new(file, self.rank())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Parses a pair of coordinates separated by whitespace or a comma, file first.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!("4 6".parse::<Square>().unwrap(), Square::new(4, 6));
    /// assert_eq!("(1, 7)".parse::<Square>().unwrap(), Square::new(1, 7));
    /// assert!("9 9".parse::<Square>().is_err());
    /// assert!("e4".parse::<Square>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut coords = trimmed
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|part| !part.is_empty());

        let mut next_coord = |name: &str| -> anyhow::Result<i8> {
            let part = coords
                .next()
                .ok_or(anyhow!("Square must contain a {name}. Got {s:?}"))?;
            part.parse::<i8>()
                .with_context(|| format!("Invalid {name} {part:?} in square {s:?}"))
        };

        let file = next_coord("file")?;
        let rank = next_coord("rank")?;

        if coords.next().is_some() {
            anyhow::bail!("Square must contain exactly two coordinates. Got {s:?}");
        }

        Ok(Self::try_new(file, rank)?)
    }
}

impl<T> Index<Square> for [[T; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
    type Output = T;
    /// A [`Square`] can be used to index into an 2D array of 8x8 elements, laid out as `[rank][file]`.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.rank() as usize][index.file() as usize]
    }
}

impl<T> IndexMut<Square> for [[T; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
    /// A [`Square`] can be used to mutably index into an 2D array of 8x8 elements, laid out as `[rank][file]`.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.rank() as usize][index.file() as usize]
    }
}

impl fmt::Display for Square {
    /// Displays the square as a `(file, rank)` coordinate pair.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    /// Displays the coordinate pair and also the internal decimal value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} [{}]", self.0)
    }
}
