/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use crate::{RulesError, Square};

/// Represents the color of a player or a piece.
///
/// White traditionally moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns the rank delta of a single step "forward" for this color.
    ///
    /// White starts at the bottom of the board (rank 7) and moves up, so its direction is negative.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Color;
    /// assert_eq!(Color::White.forward(), -1);
    /// assert_eq!(Color::Black.forward(), 1);
    /// ```
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// The rank on which this color's King and Rooks start.
    #[inline(always)]
    pub const fn back_rank(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// The rank on which this color's Pawns start.
    #[inline(always)]
    pub const fn pawn_rank(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The rank on which this color's Pawns are promoted.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Color;
    /// assert_eq!(Color::White.promotion_rank(), 0);
    /// assert_eq!(Color::Black.promotion_rank(), 7);
    /// ```
    #[inline(always)]
    pub const fn promotion_rank(&self) -> u8 {
        self.opponent().back_rank()
    }

    /// Creates a [`Color`] based on the ASCII case of the provided character, with uppercase being White and lowercase being Black.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Color;
    /// assert_eq!(Color::from_case('k'), Color::Black);
    /// assert_eq!(Color::from_case('Q'), Color::White);
    /// ```
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_lowercase() {
            Self::Black
        } else {
            Self::White
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use arbiter::Color;
    /// assert_eq!(Color::White.name(), "White");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Creates a new [`PieceKind`] from its letter, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use arbiter::PieceKind;
    /// assert_eq!(PieceKind::from_char('N').unwrap(), PieceKind::Knight);
    /// assert_eq!(PieceKind::from_char('q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Converts this [`PieceKind`] to its letter. Will always be lowercase.
    ///
    /// # Example
    /// ```
    /// # use arbiter::PieceKind;
    /// assert_eq!(PieceKind::Knight.char(), 'n');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    /// Accepts either a single letter (`"q"`) or a full name (`"Queen"`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }

        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or(anyhow::anyhow!("Invalid str for PieceKind: Got {s:?}"))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kinds that a Pawn may be promoted to.
///
/// Any other [`PieceKind`] is rejected with [`RulesError::InvalidPromotionChoice`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PromotionKind {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotionKind {
    /// Number of promotion choices.
    pub const COUNT: usize = 4;

    /// An array of all 4 [`PromotionKind`]s, in the order: `Knight`, `Bishop`, `Rook`, `Queen`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Knight, Self::Bishop, Self::Rook, Self::Queen]
    }

    /// The [`PieceKind`] that a promoted Pawn becomes.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        match self {
            Self::Knight => PieceKind::Knight,
            Self::Bishop => PieceKind::Bishop,
            Self::Rook => PieceKind::Rook,
            Self::Queen => PieceKind::Queen,
        }
    }
}

impl TryFrom<PieceKind> for PromotionKind {
    type Error = RulesError;
    /// # Example
    /// ```
    /// # use arbiter::{PieceKind, PromotionKind};
    /// assert_eq!(PromotionKind::try_from(PieceKind::Rook).unwrap(), PromotionKind::Rook);
    /// assert!(PromotionKind::try_from(PieceKind::King).is_err());
    /// ```
    fn try_from(kind: PieceKind) -> Result<Self, Self::Error> {
        match kind {
            PieceKind::Knight => Ok(Self::Knight),
            PieceKind::Bishop => Ok(Self::Bishop),
            PieceKind::Rook => Ok(Self::Rook),
            PieceKind::Queen => Ok(Self::Queen),
            PieceKind::Pawn | PieceKind::King => Err(RulesError::InvalidPromotionChoice {
                choice: kind.name().to_string(),
            }),
        }
    }
}

impl FromStr for PromotionKind {
    type Err = RulesError;
    /// # Example
    /// ```
    /// # use arbiter::PromotionKind;
    /// assert_eq!("Queen".parse::<PromotionKind>().unwrap(), PromotionKind::Queen);
    /// assert_eq!("n".parse::<PromotionKind>().unwrap(), PromotionKind::Knight);
    /// assert!("king".parse::<PromotionKind>().is_err());
    /// assert!("dragon".parse::<PromotionKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = s
            .parse::<PieceKind>()
            .map_err(|_| RulesError::InvalidPromotionChoice {
                choice: s.trim().to_string(),
            })?;

        Self::try_from(kind)
    }
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

/// Represents a chess piece on the game board.
///
/// Pieces know where they stand and whether they have ever moved,
/// which is what Pawn double-steps and castling depend on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    has_moved: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Piece, PieceKind, Square};
    /// let knight = Piece::new(Color::White, PieceKind::Knight, Square::new(1, 7));
    /// assert_eq!(knight.char(), 'N');
    /// assert!(!knight.has_moved());
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    /// Creates a new [`Piece`] from its letter, where uppercase is White and lowercase is Black.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Piece, PieceKind, Square};
    /// let rook = Piece::from_char('r', Square::new(0, 0)).unwrap();
    /// assert_eq!(rook.color(), Color::Black);
    /// assert_eq!(rook.kind(), PieceKind::Rook);
    /// ```
    #[inline(always)]
    pub fn from_char(piece: char, square: Square) -> Result<Self> {
        let kind = PieceKind::from_char(piece)?;
        Ok(Self::new(Color::from_case(piece), kind, square))
    }

    /// Returns a copy of this [`Piece`] marked as having moved.
    #[inline(always)]
    pub const fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`Square`] this [`Piece`] stands on.
    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns `true` once this [`Piece`] has been relocated by any move.
    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns `true` if this [`Piece`] is a Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this [`Piece`] is a Rook.
    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// Returns `true` if this [`Piece`] is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Converts this [`Piece`] into its display letter: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }

    /// Fetches a human-readable name for this [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Piece, PieceKind, Square};
    /// let queen = Piece::new(Color::Black, PieceKind::Queen, Square::new(3, 0));
    /// assert_eq!(queen.name(), "Black queen");
    /// ```
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color.name(), self.kind.name())
    }

    /// Moves this [`Piece`] to `to`, marking it as moved.
    #[inline(always)]
    pub(crate) fn relocate(&mut self, to: Square) {
        self.square = to;
        self.has_moved = true;
    }

    /// Replaces this Pawn with a piece of the `promotion` kind, consuming `self` and returning the promoted [`Piece`].
    ///
    /// The promoted piece keeps its color and square, and counts as having moved.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Piece, PieceKind, PromotionKind, Square};
    /// let pawn = Piece::new(Color::White, PieceKind::Pawn, Square::new(0, 0));
    /// let queen = pawn.promoted(PromotionKind::Queen);
    /// assert_eq!(queen.kind(), PieceKind::Queen);
    /// assert_eq!(queen.color(), Color::White);
    /// assert!(queen.has_moved());
    /// ```
    #[inline(always)]
    pub const fn promoted(self, promotion: PromotionKind) -> Self {
        Self {
            kind: promotion.kind(),
            color: self.color,
            square: self.square,
            has_moved: true,
        }
    }
}

impl fmt::Display for Piece {
    /// A [`Piece`] displays as its letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}
