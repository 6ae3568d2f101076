/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter::{perft, splitperft, Color, Position};

fn test_perft_layout_nodes(depth: usize, layout: &str, color: Color, expected: u64) {
    let position = Position::from_rows(layout).unwrap();
    let res = perft(&position, color, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed on\n{position}");
}

#[cfg(test)]
mod startpos_perft {
    use super::*;
    use arbiter::LAYOUT_STARTPOS;

    #[test]
    fn test_startpos_perft_1() {
        test_perft_layout_nodes(1, LAYOUT_STARTPOS, Color::White, 20);
    }

    #[test]
    fn test_startpos_perft_2() {
        test_perft_layout_nodes(2, LAYOUT_STARTPOS, Color::White, 400);
    }

    #[test]
    fn test_startpos_perft_3() {
        test_perft_layout_nodes(3, LAYOUT_STARTPOS, Color::White, 8902);
    }

    #[test]
    fn test_startpos_perft_is_symmetric() {
        // Black moving first from the mirrored start sees the same tree
        test_perft_layout_nodes(2, LAYOUT_STARTPOS, Color::Black, 400);
    }

    #[test]
    fn test_startpos_splitperft() {
        let (split, total) = splitperft(&Position::new(), Color::White, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(total, 8902);
        assert_eq!(split.iter().map(|(_, _, nodes)| nodes).sum::<u64>(), total);
    }
}

/// https://www.chessprogramming.net/perfect-perft/
#[cfg(test)]
mod promotion_perft {
    use super::*;

    const LAYOUT: &str = include_str!("fixtures/promotion_perft.txt");

    #[test]
    fn test_promotion_perft_1() {
        test_perft_layout_nodes(1, LAYOUT, Color::Black, 24);
    }

    #[test]
    fn test_promotion_perft_2() {
        test_perft_layout_nodes(2, LAYOUT, Color::Black, 496);
    }

    #[test]
    fn test_promotion_perft_3() {
        test_perft_layout_nodes(3, LAYOUT, Color::Black, 9483);
    }
}

/// Position 3 from https://www.chessprogramming.org/Perft_Results
#[cfg(test)]
mod endgame_perft {
    use super::*;

    const LAYOUT: &str = include_str!("fixtures/endgame_perft.txt");

    #[test]
    fn test_endgame_perft_1() {
        test_perft_layout_nodes(1, LAYOUT, Color::White, 14);
    }

    #[test]
    fn test_endgame_perft_2() {
        test_perft_layout_nodes(2, LAYOUT, Color::White, 191);
    }

    #[test]
    fn test_endgame_perft_3() {
        test_perft_layout_nodes(3, LAYOUT, Color::White, 2812);
    }

    #[test]
    fn test_endgame_perft_4() {
        test_perft_layout_nodes(4, LAYOUT, Color::White, 43238);
    }
}
