/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter::{
    CastleSide, CastlingRights, Color, Game, Move, MoveOutcome, Piece, PieceKind, Position,
    PromotionKind, RulesError, Square,
};

fn fixture(layout: &str) -> Position {
    Position::from_rows(layout).unwrap()
}

/// A handful of positions a few plies into a game, for property checks.
fn sample_positions() -> Vec<(Position, Color)> {
    let mut samples = vec![
        (Position::new(), Color::White),
        (fixture(include_str!("fixtures/castling.txt")), Color::White),
        (fixture(include_str!("fixtures/castling.txt")), Color::Black),
        (fixture(include_str!("fixtures/endgame_perft.txt")), Color::White),
        (fixture(include_str!("fixtures/promotion_perft.txt")), Color::Black),
    ];

    // Walk the first legal move for a few plies from the opening
    let mut pos = Position::new();
    let mut color = Color::White;
    for _ in 0..6 {
        let moves = pos.legal_moves_for(color);
        let (from, list) = moves.last().unwrap();
        pos.make_move(*from, list[0]).unwrap();
        color = color.opponent();
        samples.push((pos.clone(), color));
    }

    samples
}

#[cfg(test)]
mod piece_moves {
    use super::*;

    #[test]
    fn test_knight_on_opening() {
        let pos = Position::new();
        let moves = pos.legal_moves(Square::new(1, 7)).unwrap();
        assert_eq!(
            moves,
            [
                Move::Normal {
                    to: Square::new(2, 5)
                },
                Move::Normal {
                    to: Square::new(0, 5)
                },
            ]
        );
    }

    #[test]
    fn test_bishop_on_opening() {
        let pos = Position::new();
        assert!(pos.legal_moves(Square::new(2, 7)).unwrap().is_empty());
    }

    #[test]
    fn test_rook_on_cleared_file() {
        let mut pos = Position::new();
        pos.take(Square::new(4, 7));
        pos.take(Square::new(4, 6));
        pos.place(Piece::new(Color::White, PieceKind::Rook, Square::new(4, 7)));
        pos.place(Piece::new(Color::White, PieceKind::Pawn, Square::new(4, 2)).moved());

        let moves = pos.legal_moves(Square::new(4, 7)).unwrap();
        let targets = moves.iter().filter_map(Move::target).collect::<Vec<_>>();
        assert_eq!(
            targets,
            [
                Square::new(4, 6),
                Square::new(4, 5),
                Square::new(4, 4),
                Square::new(4, 3)
            ]
        );
    }

    #[test]
    fn test_en_passant_after_double_step() {
        let mut game = Game::from_position(
            fixture(include_str!("fixtures/en_passant.txt")),
            Color::Black,
        );
        game.play(
            Square::new(1, 1),
            Move::Normal {
                to: Square::new(1, 3),
            },
            None,
        )
        .unwrap();

        let moves = game.select(Square::new(0, 3)).unwrap();
        assert!(moves.contains(&Move::Normal {
            to: Square::new(0, 2)
        }));
        assert!(moves.contains(&Move::EnPassant {
            to: Square::new(1, 2),
            captured: Square::new(1, 3)
        }));
    }

    #[test]
    fn test_en_passant_unavailable_after_single_steps() {
        let mut game = Game::from_position(
            fixture(include_str!("fixtures/en_passant.txt")),
            Color::Black,
        );
        let step = |to| Move::Normal { to };

        game.play(Square::new(1, 1), step(Square::new(1, 2)), None)
            .unwrap();
        game.play(Square::new(4, 7), step(Square::new(4, 6)), None)
            .unwrap();
        game.play(Square::new(1, 2), step(Square::new(1, 3)), None)
            .unwrap();

        let moves = game.select(Square::new(0, 3)).unwrap();
        assert!(moves.iter().all(|mv| !mv.is_en_passant()));
    }
}

#[cfg(test)]
mod castling {
    use super::*;

    #[test]
    fn test_opening_king_cannot_castle() {
        let pos = Position::new();
        let king = pos.piece_at(Square::new(4, 7)).unwrap();
        assert_eq!(king.can_castle(&pos), CastlingRights::new(false, false));
    }

    #[test]
    fn test_cleared_back_rank_allows_castling() {
        let pos = fixture(include_str!("fixtures/castling.txt"));

        for color in Color::all() {
            let king = pos.piece_at(pos.king_square(color).unwrap()).unwrap();
            assert_eq!(king.can_castle(&pos), CastlingRights::new(true, true));
        }
    }

    #[test]
    fn test_castling_through_attacked_square() {
        let pos = fixture(include_str!("fixtures/castling_attacked.txt"));
        let king = pos.piece_at(Square::new(4, 7)).unwrap();
        assert_eq!(king.can_castle(&pos), CastlingRights::new(true, false));

        let moves = pos.legal_moves(Square::new(4, 7)).unwrap();
        assert!(moves.contains(&Move::Castle {
            side: CastleSide::Queenside
        }));
        assert!(!moves.contains(&Move::Castle {
            side: CastleSide::Kingside
        }));
    }

    #[test]
    fn test_queenside_attack_on_far_file() {
        // The Black Rook covers file 1, which only the White Rook crosses
        let pos = fixture(include_str!("fixtures/castling_queenside_attacked.txt"));
        let king = pos.piece_at(Square::new(4, 7)).unwrap();
        assert_eq!(king.can_castle(&pos), CastlingRights::new(false, true));

        let moves = pos.legal_moves(Square::new(4, 7)).unwrap();
        assert!(!moves.contains(&Move::Castle {
            side: CastleSide::Queenside
        }));
        assert!(moves.contains(&Move::Castle {
            side: CastleSide::Kingside
        }));
    }

    #[test]
    fn test_queenside_blocker() {
        let mut pos = fixture(include_str!("fixtures/castling.txt"));
        pos.place(Piece::new(Color::White, PieceKind::Knight, Square::new(1, 7)));
        pos.place(Piece::new(Color::Black, PieceKind::Bishop, Square::new(3, 0)));

        for color in Color::all() {
            let king = pos.piece_at(pos.king_square(color).unwrap()).unwrap();
            assert_eq!(king.can_castle(&pos), CastlingRights::new(false, true));
        }
    }

    #[test]
    fn test_black_queenside_attacked() {
        let mut pos = fixture(include_str!("fixtures/castling.txt"));
        // Covers files 1 and 3 of Black's back rank
        pos.place(Piece::new(Color::White, PieceKind::Knight, Square::new(2, 2)));

        let king = pos.piece_at(Square::new(4, 0)).unwrap();
        assert_eq!(king.can_castle(&pos), CastlingRights::new(false, true));

        let king = pos.piece_at(Square::new(4, 7)).unwrap();
        assert_eq!(king.can_castle(&pos), CastlingRights::new(true, true));
    }

    #[test]
    fn test_queenside_castle_moves_king_and_rook() {
        let mut pos = fixture(include_str!("fixtures/castling.txt"));
        pos.make_move(
            Square::new(4, 7),
            Move::Castle {
                side: CastleSide::Queenside,
            },
        )
        .unwrap();

        let king = pos.piece_at(Square::new(2, 7)).unwrap();
        let rook = pos.piece_at(Square::new(3, 7)).unwrap();
        assert!(king.is_king() && king.has_moved());
        assert!(rook.is_rook() && rook.has_moved());
        assert!(!pos.has(Square::new(0, 7)));
        assert!(!pos.has(Square::new(4, 7)));
        assert_eq!(pos.to_string().lines().last(), Some("- - K R - - - R"));
    }

    #[test]
    fn test_black_castles_both_sides() {
        let castling = fixture(include_str!("fixtures/castling.txt"));
        let king = Square::new(4, 0);

        let mut game = Game::from_position(castling.clone(), Color::Black);
        let moves = game.select(king).unwrap();
        for side in CastleSide::all() {
            assert!(moves.contains(&Move::Castle { side }));
        }

        game.play(
            king,
            Move::Castle {
                side: CastleSide::Queenside,
            },
            None,
        )
        .unwrap();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(
            game.position().to_string().lines().next(),
            Some("- - k r - - - r")
        );

        let mut game = Game::from_position(castling, Color::Black);
        game.play(
            king,
            Move::Castle {
                side: CastleSide::Kingside,
            },
            None,
        )
        .unwrap();
        assert_eq!(
            game.position().to_string().lines().next(),
            Some("r - - - - r k -")
        );
    }

    #[test]
    fn test_cannot_castle_out_of_check() {
        let mut pos = fixture(include_str!("fixtures/castling_attacked.txt"));
        // Slide the Black Rook onto the King's file
        pos.make_move(
            Square::new(5, 2),
            Move::Normal {
                to: Square::new(4, 2),
            },
        )
        .unwrap();
        pos.take(Square::new(4, 6));

        assert!(pos.in_check(Color::White));
        let king = pos.piece_at(Square::new(4, 7)).unwrap();
        assert_eq!(king.can_castle(&pos), CastlingRights::new(false, false));
    }

    #[test]
    fn test_moved_rook_forfeits_its_side() {
        let mut game = Game::from_position(
            fixture(include_str!("fixtures/castling.txt")),
            Color::White,
        );
        let step = |to| Move::Normal { to };

        game.play(Square::new(7, 7), step(Square::new(6, 7)), None)
            .unwrap();
        game.play(Square::new(0, 1), step(Square::new(0, 2)), None)
            .unwrap();
        game.play(Square::new(6, 7), step(Square::new(7, 7)), None)
            .unwrap();
        game.play(Square::new(0, 2), step(Square::new(0, 3)), None)
            .unwrap();

        // The Rook is home again, but has moved
        let pos = game.position();
        let king = pos.piece_at(Square::new(4, 7)).unwrap();
        assert_eq!(king.can_castle(pos), CastlingRights::new(true, false));
    }
}

#[cfg(test)]
mod promotion {
    use super::*;

    #[test]
    fn test_promote_to_queen() {
        let mut pos = fixture(include_str!("fixtures/promotion.txt"));
        let from = Square::new(0, 1);
        let to = Square::new(0, 0);

        let outcome = pos.make_move(from, Move::Normal { to }).unwrap();
        assert_eq!(outcome, MoveOutcome::PromotionPending { square: to });

        pos.promote(to, "Queen".parse::<PieceKind>().unwrap())
            .unwrap();
        let queen = pos.piece_at(to).unwrap();
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert_eq!(queen.color(), Color::White);
        assert_eq!(queen.square(), to);
        assert!(queen.has_moved());
    }

    #[test]
    fn test_invalid_promotion_choices_leave_position_untouched() {
        let mut pos = fixture(include_str!("fixtures/promotion.txt"));
        let to = Square::new(0, 0);
        pos.make_move(Square::new(0, 1), Move::Normal { to })
            .unwrap();
        let before = pos.clone();

        for kind in [PieceKind::Pawn, PieceKind::King] {
            assert!(matches!(
                pos.promote(to, kind),
                Err(RulesError::InvalidPromotionChoice { .. })
            ));
            assert_eq!(pos, before);
        }

        assert!("Dragon".parse::<PromotionKind>().is_err());
    }
}

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn test_legal_moves_land_on_the_board() {
        for (pos, color) in sample_positions() {
            for (from, moves) in pos.legal_moves_for(color) {
                for mv in moves {
                    let after = pos.with_move_made(from, mv).unwrap();
                    assert!(after.pieces().all(|p| Square::on_board(
                        p.square().file() as i8,
                        p.square().rank() as i8
                    )));
                    if let Some(to) = mv.target() {
                        assert!(after.has(to));
                    }
                }
            }
        }
    }

    #[test]
    fn test_legal_moves_never_leave_mover_in_check() {
        for (pos, color) in sample_positions() {
            for (from, moves) in pos.legal_moves_for(color) {
                for mv in moves {
                    let after = pos.with_move_made(from, mv).unwrap();
                    assert!(
                        !after.in_check(color),
                        "{mv} from {from} leaves {color} in check:\n{after}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_moves_are_deterministic() {
        for (pos, color) in sample_positions() {
            assert_eq!(pos.legal_moves_for(color), pos.clone().legal_moves_for(color));

            for (from, moves) in pos.legal_moves_for(color) {
                for mv in moves {
                    let mut a = pos.clone();
                    let mut b = pos.clone();
                    assert_eq!(a.make_move(from, mv), b.make_move(from, mv));
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_every_moved_piece_is_marked_moved() {
        for (pos, color) in sample_positions() {
            for (from, moves) in pos.legal_moves_for(color) {
                for mv in moves {
                    let after = pos.with_move_made(from, mv).unwrap();
                    let last = after.last_move().unwrap();
                    assert!(after.piece_at(last.to()).unwrap().has_moved());
                }
            }
        }
    }
}
