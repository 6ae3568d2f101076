/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::PieceKind;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: u8 = 8;

/// The standard starting position, in the row format accepted by [`crate::Position::from_rows`].
///
/// The first row is rank `0` (Black's back rank); the last row is rank `7` (White's back rank).
pub const LAYOUT_STARTPOS: &str = "\
r n b q k b n r
p p p p p p p p
- - - - - - - -
- - - - - - - -
- - - - - - - -
- - - - - - - -
P P P P P P P P
R N B Q K B N R
";

/// Order of the pieces along either back rank, starting at file `0`.
pub const BACK_RANK: [PieceKind; BOARD_SIZE as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// File on which both Kings start.
pub const KING_FILE: u8 = 4;
