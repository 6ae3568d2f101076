/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// All board-related code: pieces, positions, move generation, and the rules that govern them.
mod board;

/// Command-line options for the interactive binary.
mod cli;

/// Every way the rules can reject an action.
mod error;

/// Misc constants describing the board layout.
mod utils;

pub use board::*;
pub use cli::*;
pub use error::*;
pub use utils::*;
