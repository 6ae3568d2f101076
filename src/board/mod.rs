/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Turn-taking and game-end detection.
mod game;

/// Check detection, the legality filter, and applying moves.
mod legality;

/// Pseudo-legal move generation for every kind of piece, and castling evaluation.
mod movegen;

/// Enums for the different kinds of moves a piece can make.
mod moves;

/// Node counting over the tree of legal moves.
mod perft;

/// Colors, piece kinds, and the pieces themselves.
mod piece;

/// The board state and its text representations.
mod position;

/// A single square on the board.
mod square;

pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
