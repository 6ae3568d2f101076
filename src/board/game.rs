/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use tracing::{debug, info};

use crate::{Color, Move, MoveList, Position, PromotionKind, RulesError, SelectionFault, Square};

/// The state of a game from the perspective of the player about to move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum GameStatus {
    /// The game continues and nobody is in check.
    Ongoing,

    /// The game continues, but the provided color is in check.
    Check(Color),

    /// The player to move is in check and has no legal moves.
    Checkmate { winner: Color },

    /// The player to move is not in check, but has no legal moves.
    Stalemate,
}

impl GameStatus {
    /// Returns `true` if the game has ended.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Checkmate { .. } | Self::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    /// # Example
    /// ```
    /// # use arbiter::{Color, GameStatus};
    /// let mate = GameStatus::Checkmate { winner: Color::Black };
    /// assert_eq!(mate.to_string(), "Checkmate. Black wins.");
    /// assert_eq!(GameStatus::Stalemate.to_string(), "Stalemate. No one wins.");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "Ongoing."),
            Self::Check(color) => write!(f, "{color} is in check."),
            Self::Checkmate { winner } => write!(f, "Checkmate. {winner} wins."),
            Self::Stalemate => write!(f, "Stalemate. No one wins."),
        }
    }
}

impl Position {
    /// Returns `true` if any piece of `color` has at least one legal move.
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces_of(color).any(|piece| {
            self.legal_moves(piece.square())
                .is_ok_and(|moves| !moves.is_empty())
        })
    }

    /// Returns `true` if `color` is in check and cannot escape it.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Position};
    /// // Fool's mate
    /// let pos: Position = "
    /// r n b - k b n r
    /// p p p p - p p p
    /// - - - - p
    /// - - - - - - - -
    /// - - - - - - P q
    /// - - - - - P
    /// P P P P P - - P
    /// R N B Q K B N R"
    ///     .trim_start()
    ///     .parse()
    ///     .unwrap();
    /// assert!(pos.is_checkmate(Color::White));
    /// assert!(!pos.is_checkmate(Color::Black));
    /// ```
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && !self.has_legal_moves(color)
    }

    /// Returns `true` if `color` is stalemated: not in check, but without a legal move.
    ///
    /// Stalemate is the only kind of draw recognized.
    pub fn is_draw(&self, color: Color) -> bool {
        !self.in_check(color) && !self.has_legal_moves(color)
    }

    /// Evaluates the state of the game when it is `side_to_move`'s turn.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, GameStatus, Position};
    /// assert_eq!(Position::new().status(Color::White), GameStatus::Ongoing);
    /// ```
    pub fn status(&self, side_to_move: Color) -> GameStatus {
        let in_check = self.in_check(side_to_move);

        match (in_check, self.has_legal_moves(side_to_move)) {
            (false, true) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check(side_to_move),
            (true, false) => GameStatus::Checkmate {
                winner: side_to_move.opponent(),
            },
            (false, false) => GameStatus::Stalemate,
        }
    }
}

/// A two-player game: a [`Position`] plus whose turn it is.
///
/// Unlike [`Position::make_move`], a [`Game`] only accepts legal moves made by the side to move.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    position: Position,
    side_to_move: Color,
}

impl Game {
    /// Creates a new [`Game`] from the standard starting position, with White to move.
    #[inline(always)]
    pub fn new() -> Self {
        Self::from_position(Position::new(), Color::White)
    }

    /// Creates a new [`Game`] from an arbitrary position.
    #[inline(always)]
    pub const fn from_position(position: Position, side_to_move: Color) -> Self {
        Self {
            position,
            side_to_move,
        }
    }

    /// The current position.
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The color whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The state of the game for the side to move.
    #[inline(always)]
    pub fn status(&self) -> GameStatus {
        self.position.status(self.side_to_move)
    }

    /// Selects the piece on `square`, returning its legal moves.
    ///
    /// Fails with [`RulesError::IllegalSelection`] if the square is empty,
    /// holds an enemy piece, or holds a piece that cannot move.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Game, Square};
    /// let game = Game::new();
    /// assert_eq!(game.select(Square::new(6, 7)).unwrap().len(), 2);
    /// assert!(game.select(Square::new(6, 0)).is_err()); // Black's knight
    /// assert!(game.select(Square::new(0, 7)).is_err()); // Rook is boxed in
    /// ```
    pub fn select(&self, square: Square) -> Result<MoveList, RulesError> {
        let fault = |reason| RulesError::IllegalSelection { square, reason };

        let piece = self
            .position
            .piece_at(square)
            .ok_or(fault(SelectionFault::Empty))?;

        if piece.color() != self.side_to_move {
            return Err(fault(SelectionFault::WrongColor));
        }

        let moves = self.position.legal_moves(square)?;
        if moves.is_empty() {
            return Err(fault(SelectionFault::NoLegalMoves));
        }

        Ok(moves)
    }

    /// Returns `true` if `mv` would bring the Pawn on `from` to its promotion rank,
    /// meaning [`Game::play`] needs a [`PromotionKind`].
    #[inline(always)]
    pub fn needs_promotion(&self, from: Square, mv: Move) -> bool {
        self.position.is_promotion_move(from, mv)
    }

    /// Plays `mv` with the piece on `from`, then hands the turn to the other player.
    ///
    /// `mv` must be one of the moves returned by [`Game::select`], otherwise [`RulesError::IllegalMoveChoice`] is returned.
    /// If the move promotes a Pawn, `promotion` must be provided, otherwise [`RulesError::PromotionRequired`]
    /// is returned. On any error, the game is left untouched.
    ///
    /// Returns the state of the game for the player who moves next.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Game, GameStatus, Move, Square};
    /// let mut game = Game::new();
    /// let status = game
    ///     .play(Square::new(4, 6), Move::Normal { to: Square::new(4, 4) }, None)
    ///     .unwrap();
    /// assert_eq!(status, GameStatus::Ongoing);
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// ```
    pub fn play(
        &mut self,
        from: Square,
        mv: Move,
        promotion: Option<PromotionKind>,
    ) -> Result<GameStatus, RulesError> {
        if !self.select(from)?.contains(&mv) {
            return Err(RulesError::IllegalMoveChoice { from, mv });
        }

        if let Move::Normal { to } = mv {
            if promotion.is_none() && self.needs_promotion(from, mv) {
                return Err(RulesError::PromotionRequired { square: to });
            }
        }

        let outcome = self.position.make_move(from, mv)?;
        debug!("{} played {mv} from {from}", self.side_to_move);

        if let (Some(square), Some(choice)) = (outcome.pending_promotion(), promotion) {
            self.position.promote(square, choice.kind())?;
        }

        self.side_to_move = self.side_to_move.opponent();

        let status = self.status();
        if status.is_over() {
            info!("Game over: {status}");
        }

        Ok(status)
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{PieceKind, LAYOUT_STARTPOS};

    #[test]
    fn test_status_variants() {
        // Black King boxed in by a White Queen, with the White King guarding it
        let mate: Position = "k\nQ\n- K\n\n\n\n\n\n".parse().unwrap();
        assert_eq!(
            mate.status(Color::Black),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );

        let stalemate: Position = "k\n- - Q\n- K\n\n\n\n\n\n".parse().unwrap();
        assert_eq!(stalemate.status(Color::Black), GameStatus::Stalemate);

        let check: Position = "k - - - - - - Q\n\n\n\n\n\n\n- - - - K\n".parse().unwrap();
        assert_eq!(check.status(Color::Black), GameStatus::Check(Color::Black));
    }

    #[test]
    fn test_select_reports_faults() {
        let game = Game::new();
        let reason = |square| match game.select(square) {
            Err(RulesError::IllegalSelection { reason, .. }) => Some(reason),
            _ => None,
        };

        assert_eq!(reason(Square::new(4, 4)), Some(SelectionFault::Empty));
        assert_eq!(reason(Square::new(4, 1)), Some(SelectionFault::WrongColor));
        assert_eq!(reason(Square::new(3, 7)), Some(SelectionFault::NoLegalMoves));
        assert_eq!(reason(Square::new(4, 6)), None);
    }

    #[test]
    fn test_play_rejects_moves_not_in_selection() {
        let mut game = Game::new();
        let before = game.clone();
        let mv = Move::Normal {
            to: Square::new(4, 3),
        };

        assert_eq!(
            game.play(Square::new(4, 6), mv, None),
            Err(RulesError::IllegalMoveChoice {
                from: Square::new(4, 6),
                mv
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_play_requires_promotion_choice() {
        let position: Position = "- - - - - - - k\nP\n\n\n\n\n\n- - - - K\n".parse().unwrap();
        let mut game = Game::from_position(position, Color::White);
        let before = game.clone();

        let from = Square::new(0, 1);
        let mv = Move::Normal {
            to: Square::new(0, 0),
        };
        assert!(game.needs_promotion(from, mv));

        assert_eq!(
            game.play(from, mv, None),
            Err(RulesError::PromotionRequired {
                square: Square::new(0, 0)
            })
        );
        assert_eq!(game, before);

        game.play(from, mv, Some(PromotionKind::Rook)).unwrap();
        let rook = game.position().piece_at(Square::new(0, 0)).unwrap();
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert_eq!(rook.color(), Color::White);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::from_position(LAYOUT_STARTPOS.parse().unwrap(), Color::Black);
        game.play(
            Square::new(4, 1),
            Move::Normal {
                to: Square::new(4, 3),
            },
            None,
        )
        .unwrap();

        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.select(Square::new(4, 3)).is_err());
        assert!(game.select(Square::new(4, 6)).is_ok());
    }
}
