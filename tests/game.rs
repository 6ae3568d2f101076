/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter::{
    Color, Game, GameStatus, Move, Position, PromotionKind, RulesError, SelectionFault, Square,
};

fn play(game: &mut Game, from: (u8, u8), to: (u8, u8)) -> GameStatus {
    let mv = Move::Normal {
        to: Square::new(to.0, to.1),
    };
    game.play(Square::new(from.0, from.1), mv, None).unwrap()
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();

    assert_eq!(play(&mut game, (5, 6), (5, 5)), GameStatus::Ongoing);
    assert_eq!(play(&mut game, (4, 1), (4, 3)), GameStatus::Ongoing);
    assert_eq!(play(&mut game, (6, 6), (6, 4)), GameStatus::Ongoing);
    assert_eq!(
        play(&mut game, (3, 0), (7, 4)),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );

    assert!(game.status().is_over());
    assert_eq!(game.side_to_move(), Color::White);
    assert!(game.position().is_checkmate(Color::White));
}

#[test]
fn test_players_alternate_turns() {
    let mut game = Game::new();
    assert_eq!(game.side_to_move(), Color::White);

    // Black cannot move first
    assert_eq!(
        game.select(Square::new(4, 1)),
        Err(RulesError::IllegalSelection {
            square: Square::new(4, 1),
            reason: SelectionFault::WrongColor
        })
    );

    play(&mut game, (4, 6), (4, 4));
    assert_eq!(game.side_to_move(), Color::Black);

    // White cannot move twice in a row
    let err = game
        .play(
            Square::new(4, 4),
            Move::Normal {
                to: Square::new(4, 3),
            },
            None,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RulesError::IllegalSelection {
            reason: SelectionFault::WrongColor,
            ..
        }
    ));
}

#[test]
fn test_check_is_reported() {
    let mut game = Game::new();
    play(&mut game, (4, 6), (4, 4));
    play(&mut game, (5, 1), (5, 2));
    let status = play(&mut game, (3, 7), (7, 3));
    assert_eq!(status, GameStatus::Check(Color::Black));

    // Only moves that answer the check are offered
    assert!(game.select(Square::new(0, 1)).is_err());
    assert!(game.select(Square::new(6, 1)).is_ok());
}

#[test]
fn test_promotion_through_game() {
    let position: Position = include_str!("fixtures/promotion.txt").parse().unwrap();
    let mut game = Game::from_position(position, Color::White);
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
    assert_eq!(game.side_to_move(), Color::White);

    let choice = "q".parse::<PromotionKind>().unwrap();
    game.play(from, mv, Some(choice)).unwrap();
    let queen = game.position().piece_at(Square::new(0, 0)).unwrap();
    assert_eq!(queen.char(), 'Q');
    assert!(queen.has_moved());
}

#[test]
fn test_invalid_square_input() {
    assert_eq!(
        Square::try_new(8, 0),
        Err(RulesError::InvalidSquare { file: 8, rank: 0 })
    );
    assert!("4 9".parse::<Square>().is_err());
    assert_eq!("4,6".parse::<Square>().unwrap(), Square::new(4, 6));
}
