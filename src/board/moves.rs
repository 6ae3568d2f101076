/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::Square;

/// An alias for a list of moves available to a single piece.
pub type MoveList = Vec<Move>;

/// The side of the board towards which a King castles.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum CastleSide {
    /// Towards file `0`. Also known as "long" castling.
    Queenside,

    /// Towards file `7`. Also known as "short" castling.
    Kingside,
}

impl CastleSide {
    /// Both sides, Queenside first.
    #[inline(always)]
    pub const fn all() -> [Self; 2] {
        [Self::Queenside, Self::Kingside]
    }

    /// The file the King lands on after castling.
    ///
    /// # Example
    /// ```
    /// # use arbiter::CastleSide;
    /// assert_eq!(CastleSide::Queenside.king_file(), 2);
    /// assert_eq!(CastleSide::Kingside.king_file(), 6);
    /// ```
    #[inline(always)]
    pub const fn king_file(&self) -> u8 {
        match self {
            Self::Queenside => 2,
            Self::Kingside => 6,
        }
    }

    /// The file the Rook lands on after castling.
    #[inline(always)]
    pub const fn rook_file(&self) -> u8 {
        match self {
            Self::Queenside => 3,
            Self::Kingside => 5,
        }
    }

    /// The file the Rook must start on to castle on this side.
    #[inline(always)]
    pub const fn rook_home_file(&self) -> u8 {
        match self {
            Self::Queenside => 0,
            Self::Kingside => 7,
        }
    }

    /// Fetches a human-readable name for this [`CastleSide`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Queenside => "queenside",
            Self::Kingside => "kingside",
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single candidate action for a piece.
///
/// The moving piece is not part of a [`Move`]; it is identified by the square it is moved from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Move {
    /// Relocate to `to`, capturing whatever stands there.
    ///
    /// This covers quiet moves, captures, Pawn double-steps, and Pawn moves onto the promotion rank.
    Normal { to: Square },

    /// A Pawn moves diagonally onto `to`, removing the enemy Pawn that stands on `captured`.
    EnPassant { to: Square, captured: Square },

    /// The King and one of its Rooks slide past each other.
    Castle { side: CastleSide },
}

impl Move {
    /// The square the moving piece lands on, if it is known without consulting the board.
    ///
    /// Castling yields `None`, since its destination depends on the King's rank.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{CastleSide, Move, Square};
    /// let to = Square::new(4, 4);
    /// assert_eq!(Move::Normal { to }.target(), Some(to));
    /// assert_eq!(Move::Castle { side: CastleSide::Kingside }.target(), None);
    /// ```
    #[inline(always)]
    pub const fn target(&self) -> Option<Square> {
        match self {
            Self::Normal { to } | Self::EnPassant { to, .. } => Some(*to),
            Self::Castle { .. } => None,
        }
    }

    /// Returns `true` if this move is castling.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Self::Castle { .. })
    }

    /// Returns `true` if this move is an en passant capture.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self, Self::EnPassant { .. })
    }
}

impl fmt::Display for Move {
    /// # Example
    /// ```
    /// # use arbiter::{CastleSide, Move, Square};
    /// let ep = Move::EnPassant { to: Square::new(1, 2), captured: Square::new(1, 3) };
    /// assert_eq!(ep.to_string(), "en passant to (1, 2), capturing on (1, 3)");
    /// assert_eq!(Move::Castle { side: CastleSide::Queenside }.to_string(), "castle queenside");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal { to } => write!(f, "to {to}"),
            Self::EnPassant { to, captured } => {
                write!(f, "en passant to {to}, capturing on {captured}")
            }
            Self::Castle { side } => write!(f, "castle {side}"),
        }
    }
}

/// What happened after a move was applied to a [`crate::Position`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// The move is complete.
    Moved,

    /// A Pawn reached its promotion rank on `square` and must be promoted with [`crate::Position::promote`].
    PromotionPending { square: Square },
}

impl MoveOutcome {
    /// Returns the square of the Pawn awaiting promotion, if any.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{MoveOutcome, Square};
    /// assert_eq!(MoveOutcome::Moved.pending_promotion(), None);
    ///
    /// let square = Square::new(2, 0);
    /// assert_eq!(MoveOutcome::PromotionPending { square }.pending_promotion(), Some(square));
    /// ```
    #[inline(always)]
    pub const fn pending_promotion(&self) -> Option<Square> {
        match self {
            Self::Moved => None,
            Self::PromotionPending { square } => Some(*square),
        }
    }
}
