/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use thiserror::Error;

use crate::{Move, Square};

/// Why a [`Square`] could not be selected for moving.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SelectionFault {
    /// There is no piece on the square.
    Empty,

    /// The piece on the square belongs to the player who is not on move.
    WrongColor,

    /// The piece exists, but every candidate move would leave its King in check.
    NoLegalMoves,
}

impl fmt::Display for SelectionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "there is no piece there",
            Self::WrongColor => "that piece belongs to the other player",
            Self::NoLegalMoves => "that piece has no legal moves",
        };

        write!(f, "{s}")
    }
}

/// Every way an interaction with the rules engine can be rejected.
///
/// None of these are fatal. A caller that receives one should ask for new input and try again.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum RulesError {
    /// Coordinates outside of `[0, 8)`.
    #[error("invalid square ({file}, {rank}): coordinates must be between [0, 8)")]
    InvalidSquare { file: i8, rank: i8 },

    /// The square cannot be moved from.
    #[error("cannot select {square}: {reason}")]
    IllegalSelection {
        square: Square,
        reason: SelectionFault,
    },

    /// The move is not one of the legal moves of the piece on `from`.
    #[error("{mv} is not a legal move for the piece on {from}")]
    IllegalMoveChoice { from: Square, mv: Move },

    /// A Pawn may only become a Knight, Bishop, Rook, or Queen.
    #[error("cannot promote to {choice:?}: choose a knight, bishop, rook, or queen")]
    InvalidPromotionChoice { choice: String },

    /// The move promotes a Pawn, but no promotion was provided.
    #[error("the pawn reaching {square} must be promoted")]
    PromotionRequired { square: Square },

    /// There is no Pawn on its final rank at `square`.
    #[error("there is no pawn awaiting promotion on {square}")]
    NothingToPromote { square: Square },
}
