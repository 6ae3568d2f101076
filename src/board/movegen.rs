/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    CastleSide, Color, Move, MoveList, Piece, PieceKind, Position, Square, BOARD_SIZE, KING_FILE,
};

/// Deltas for the movement of the Queen, which double as the King's neighbours.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// File deltas of a Pawn's diagonal captures.
const PAWN_CAPTURE_FILES: [i8; 2] = [-1, 1];

/// Which sides a King may currently castle towards.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights {
    pub queenside: bool,
    pub kingside: bool,
}

impl CastlingRights {
    /// Creates a new [`CastlingRights`].
    #[inline(always)]
    pub const fn new(queenside: bool, kingside: bool) -> Self {
        Self {
            queenside,
            kingside,
        }
    }

    /// Fetches the right for the provided side.
    #[inline(always)]
    pub const fn get(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::Queenside => self.queenside,
            CastleSide::Kingside => self.kingside,
        }
    }

    /// Revokes the right for the provided side.
    #[inline(always)]
    fn revoke(&mut self, side: CastleSide) {
        match side {
            CastleSide::Queenside => self.queenside = false,
            CastleSide::Kingside => self.kingside = false,
        }
    }

    /// Returns `true` if castling is possible on either side.
    #[inline(always)]
    pub const fn any(&self) -> bool {
        self.queenside || self.kingside
    }
}

impl Piece {
    /// Generates every move this piece could make in `position`, ignoring whether its own King is left in check.
    ///
    /// If `castling` is `false`, a King will not consider castling.
    /// That is how attacks are computed, since castling can never capture anything.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Move, Position, Square};
    /// let pos = Position::new();
    /// let knight = pos.piece_at(Square::new(1, 7)).unwrap();
    /// let moves = knight.pseudo_moves(&pos, true);
    /// assert_eq!(moves.len(), 2);
    /// assert!(moves.contains(&Move::Normal { to: Square::new(2, 5) }));
    /// assert!(moves.contains(&Move::Normal { to: Square::new(0, 5) }));
    /// ```
    pub fn pseudo_moves(&self, position: &Position, castling: bool) -> MoveList {
        match self.kind() {
            PieceKind::Pawn => self.pawn_moves(position),
            PieceKind::Knight => self.leaper_moves(position, &KNIGHT_DELTAS),
            PieceKind::Bishop => self.slider_moves(position, &BISHOP_DELTAS),
            PieceKind::Rook => self.slider_moves(position, &ROOK_DELTAS),
            PieceKind::Queen => self.slider_moves(position, &QUEEN_DELTAS),
            PieceKind::King => {
                let mut moves = self.leaper_moves(position, &QUEEN_DELTAS);

                if castling {
                    let rights = self.can_castle(position);
                    moves.extend(
                        CastleSide::all()
                            .into_iter()
                            .filter(|side| rights.get(*side))
                            .map(|side| Move::Castle { side }),
                    );
                }

                moves
            }
        }
    }

    /// Computes which sides this piece may castle towards in `position`.
    ///
    /// Only an unmoved King on its starting square can castle. On each side, the Rook must be unmoved
    /// on its starting square, the squares between them must be empty, and no enemy piece may reach
    /// the King's square or any square the King and Rook cross.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{CastlingRights, Position, Square};
    /// let pos = Position::new();
    /// let king = pos.piece_at(Square::new(4, 7)).unwrap();
    /// assert_eq!(king.can_castle(&pos), CastlingRights::new(false, false));
    /// ```
    pub fn can_castle(&self, position: &Position) -> CastlingRights {
        let home = Square::new(KING_FILE, self.color().back_rank());
        if !self.is_king() || self.has_moved() || self.square() != home {
            return CastlingRights::default();
        }

        let mut rights = CastlingRights::new(true, true);
        let king = self.square();

        for side in CastleSide::all() {
            let rook_square = king.with_file(side.rook_home_file());
            let rook_ready = position.piece_at(rook_square).is_some_and(|rook| {
                rook.is_rook() && rook.color() == self.color() && !rook.has_moved()
            });

            if !rook_ready {
                rights.revoke(side);
                continue;
            }

            let (lo, hi) = files_between(king.file(), side.rook_home_file());
            if (lo..hi).any(|file| position.has(king.with_file(file))) {
                rights.revoke(side);
            }
        }

        // Skip the attack scan when both sides are already revoked
        if rights.any() {
            let covered = position
                .destinations(self.color().opponent())
                .collect::<Vec<_>>();

            for side in CastleSide::all() {
                if rights.get(side) && castling_path(king, side).any(|sq| covered.contains(&sq)) {
                    rights.revoke(side);
                }
            }
        }

        rights
    }

    /// Moves for pieces that jump a fixed distance, landing on empty or enemy squares.
    fn leaper_moves(&self, position: &Position, deltas: &[(i8, i8)]) -> MoveList {
        deltas
            .iter()
            .filter_map(|&(df, dr)| self.square().offset(df, dr))
            .filter(|&to| position.color_at(to) != Some(self.color()))
            .map(|to| Move::Normal { to })
            .collect()
    }

    /// Moves for pieces that slide along rays until they are blocked.
    fn slider_moves(&self, position: &Position, deltas: &[(i8, i8)]) -> MoveList {
        let mut moves = MoveList::new();

        for &(df, dr) in deltas {
            let mut to = self.square();

            for _ in 1..BOARD_SIZE {
                let Some(next) = to.offset(df, dr) else {
                    break;
                };
                to = next;

                match position.color_at(to) {
                    None => moves.push(Move::Normal { to }),
                    Some(color) => {
                        if color != self.color() {
                            moves.push(Move::Normal { to });
                        }
                        break;
                    }
                }
            }
        }

        moves
    }

    /// Pawn pushes, captures, and en passant.
    fn pawn_moves(&self, position: &Position) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.color();
        let from = self.square();

        let Some(single) = from.forward_by(color, 1) else {
            return moves;
        };

        if !position.has(single) {
            moves.push(Move::Normal { to: single });

            if !self.has_moved() {
                if let Some(double) = from.forward_by(color, 2) {
                    if !position.has(double) {
                        moves.push(Move::Normal { to: double });
                    }
                }
            }
        }

        for df in PAWN_CAPTURE_FILES {
            if let Some(to) = single.offset(df, 0) {
                if position.color_at(to) == Some(color.opponent()) {
                    moves.push(Move::Normal { to });
                }
            }
        }

        if let Some(captured) = self.en_passant_victim(position) {
            if let Some(to) = captured.forward_by(color, 1) {
                if !position.has(to) {
                    moves.push(Move::EnPassant { to, captured });
                }
            }
        }

        moves
    }

    /// The square of an enemy Pawn that just advanced two ranks to stand beside this Pawn.
    fn en_passant_victim(&self, position: &Position) -> Option<Square> {
        let last = position.last_move()?;
        if !last.is_pawn_double_step() {
            return None;
        }

        let victim = last.to();
        let beside = victim.rank() == self.square().rank()
            && victim.file().abs_diff(self.square().file()) == 1;
        let is_enemy_pawn = position
            .piece_at(victim)
            .is_some_and(|p| p.is_pawn() && p.color() != self.color());

        (beside && is_enemy_pawn).then_some(victim)
    }
}

impl Position {
    /// Every square that a piece of `color` could move to, castling excluded.
    ///
    /// A square reachable by several pieces is yielded once per piece.
    pub fn destinations(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces_of(color).flat_map(move |piece| {
            piece
                .pseudo_moves(self, false)
                .into_iter()
                .filter_map(|mv| mv.target())
        })
    }
}

/// The files strictly between a King and a Rook, as a half-open range.
#[inline(always)]
fn files_between(king_file: u8, rook_file: u8) -> (u8, u8) {
    if king_file < rook_file {
        (king_file + 1, rook_file)
    } else {
        (rook_file + 1, king_file)
    }
}

/// The King's square, plus every square the King and Rook cross or land on when castling towards `side`.
fn castling_path(king: Square, side: CastleSide) -> impl Iterator<Item = Square> {
    let (lo, hi) = match side {
        CastleSide::Queenside => (
            side.rook_home_file() + 1,
            king.file().max(side.rook_file()),
        ),
        CastleSide::Kingside => (
            king.file().min(side.rook_file()),
            side.rook_home_file() - 1,
        ),
    };

    (lo..=hi).map(move |file| king.with_file(file))
}
