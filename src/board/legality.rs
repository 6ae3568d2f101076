/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::{debug, trace};

use crate::{
    Color, LastMove, Move, MoveList, MoveOutcome, Mover, PieceKind, Position, PromotionKind,
    RulesError, SelectionFault, Square,
};

impl Position {
    /// Returns `true` if the King of `color` could be captured by any enemy piece.
    ///
    /// If `color` has no King on the board, it can never be in check.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Position};
    /// let pos = Position::new();
    /// assert!(!pos.in_check(Color::White));
    /// assert!(!Position::empty().in_check(Color::Black));
    /// ```
    pub fn in_check(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            return false;
        };

        self.destinations(color.opponent()).any(|to| to == king)
    }

    /// Generates every legal move for the piece on `square`.
    ///
    /// Each candidate is tried on a copy of this position, and dropped if it leaves the mover's King in check.
    ///
    /// Returns [`RulesError::IllegalSelection`] if `square` is empty.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Position, Square};
    /// let pos = Position::new();
    /// assert_eq!(pos.legal_moves(Square::new(4, 6)).unwrap().len(), 2);
    /// assert!(pos.legal_moves(Square::new(4, 4)).is_err());
    /// ```
    pub fn legal_moves(&self, square: Square) -> Result<MoveList, RulesError> {
        let piece = self.piece_at(square).ok_or(RulesError::IllegalSelection {
            square,
            reason: SelectionFault::Empty,
        })?;
        let color = piece.color();

        let mut legal = MoveList::new();
        for mv in piece.pseudo_moves(self, true) {
            if self.with_move_made(square, mv)?.in_check(color) {
                trace!("Rejected {mv} for {} on {square}: king left in check", piece.name());
            } else {
                legal.push(mv);
            }
        }

        Ok(legal)
    }

    /// Generates the legal moves of every piece of `color`, skipping pieces that cannot move.
    ///
    /// Entries are ordered by square.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Position};
    /// let moves = Position::new().legal_moves_for(Color::White);
    /// // 8 Pawns and 2 Knights can move
    /// assert_eq!(moves.len(), 10);
    /// assert_eq!(moves.iter().map(|(_, m)| m.len()).sum::<usize>(), 20);
    /// ```
    pub fn legal_moves_for(&self, color: Color) -> Vec<(Square, MoveList)> {
        self.pieces_of(color)
            .filter_map(|piece| {
                let square = piece.square();
                let moves = self.legal_moves(square).ok()?;
                (!moves.is_empty()).then_some((square, moves))
            })
            .collect()
    }

    /// Returns a copy of this position with `mv` applied to the piece on `from`.
    #[inline(always)]
    pub fn with_move_made(&self, from: Square, mv: Move) -> Result<Self, RulesError> {
        let mut copied = self.clone();
        copied.make_move(from, mv)?;
        Ok(copied)
    }

    /// Returns `true` if applying `mv` to the piece on `from` would place a Pawn on its promotion rank.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Move, Position, Square};
    /// let pos: Position = "\n\n\n\n\n\n- - - - - - - p\n\n".parse().unwrap();
    /// let from = Square::new(7, 6);
    /// assert!(pos.is_promotion_move(from, Move::Normal { to: Square::new(7, 7) }));
    /// ```
    pub fn is_promotion_move(&self, from: Square, mv: Move) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };

        match mv {
            Move::Normal { to } => piece.is_pawn() && to.rank() == piece.color().promotion_rank(),
            Move::EnPassant { .. } | Move::Castle { .. } => false,
        }
    }

    /// Applies `mv` to the piece on `from`, capturing anything in the way.
    ///
    /// The move is *not* checked for legality; that is the job of [`Position::legal_moves`].
    /// If a Pawn lands on its promotion rank, [`MoveOutcome::PromotionPending`] is returned
    /// and the Pawn should be promoted with [`Position::promote`].
    ///
    /// Returns [`RulesError::IllegalSelection`] if `from` is empty, or [`RulesError::IllegalMoveChoice`]
    /// if a castle has no friendly Rook on its home square. Nothing changes in either case.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Move, MoveOutcome, Position, Square};
    /// let mut pos = Position::new();
    /// let from = Square::new(4, 6);
    /// let to = Square::new(4, 4);
    /// assert_eq!(pos.make_move(from, Move::Normal { to }).unwrap(), MoveOutcome::Moved);
    /// assert!(!pos.has(from));
    /// assert!(pos.piece_at(to).unwrap().has_moved());
    /// ```
    pub fn make_move(&mut self, from: Square, mv: Move) -> Result<MoveOutcome, RulesError> {
        let mut piece = self.take(from).ok_or(RulesError::IllegalSelection {
            square: from,
            reason: SelectionFault::Empty,
        })?;

        let outcome = match mv {
            Move::Normal { to } => {
                piece.relocate(to);
                self.place(piece);
                self.set_last_move(LastMove::new(Mover::Piece(piece.kind()), from, to));

                if piece.is_pawn() && to.rank() == piece.color().promotion_rank() {
                    MoveOutcome::PromotionPending { square: to }
                } else {
                    MoveOutcome::Moved
                }
            }

            Move::EnPassant { to, captured } => {
                self.take(captured);
                piece.relocate(to);
                self.place(piece);
                self.set_last_move(LastMove::new(Mover::Piece(piece.kind()), from, to));
                MoveOutcome::Moved
            }

            Move::Castle { side } => {
                let king_to = from.with_file(side.king_file());
                let rook_home = from.with_file(side.rook_home_file());
                let mut rook = match self.take(rook_home) {
                    Some(rook) if rook.is_rook() && rook.color() == piece.color() => rook,
                    other => {
                        // Put everything back where it was
                        if let Some(other) = other {
                            self.place(other);
                        }
                        self.place(piece);
                        return Err(RulesError::IllegalMoveChoice { from, mv });
                    }
                };

                rook.relocate(from.with_file(side.rook_file()));
                self.place(rook);
                piece.relocate(king_to);
                self.place(piece);
                self.set_last_move(LastMove::new(Mover::Castle, from, king_to));
                MoveOutcome::Moved
            }
        };

        trace!("{} on {from}: {mv}", piece.name());
        Ok(outcome)
    }

    /// Promotes the Pawn on `square` to a piece of `kind`.
    ///
    /// The choice is validated before anything changes: only a Knight, Bishop, Rook, or Queen is accepted
    /// ([`RulesError::InvalidPromotionChoice`]), and `square` must hold a Pawn on its promotion rank
    /// ([`RulesError::NothingToPromote`]).
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Position, PieceKind, Square};
    /// let mut pos: Position = "P\n\n\n\n\n\n\n\n".parse().unwrap();
    /// let square = Square::new(0, 0);
    ///
    /// assert!(pos.promote(square, PieceKind::King).is_err());
    /// assert_eq!(pos.piece_at(square).unwrap().kind(), PieceKind::Pawn);
    ///
    /// pos.promote(square, PieceKind::Queen).unwrap();
    /// let queen = pos.piece_at(square).unwrap();
    /// assert_eq!(queen.kind(), PieceKind::Queen);
    /// assert!(queen.has_moved());
    /// ```
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), RulesError> {
        let choice = PromotionKind::try_from(kind)?;

        let pawn = self
            .piece_at(square)
            .filter(|p| p.is_pawn() && square.rank() == p.color().promotion_rank())
            .copied()
            .ok_or(RulesError::NothingToPromote { square })?;

        self.place(pawn.promoted(choice));
        if let Some(last) = self.last_move_mut() {
            if last.to() == square {
                last.set_kind(choice.kind());
            }
        }

        debug!("{} on {square} promoted to {choice}", pawn.color());
        Ok(())
    }
}
