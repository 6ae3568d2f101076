/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Move, Position, PromotionKind, Square};

/// Number of leaf nodes a single move counts for: promotions branch once per [`PromotionKind`].
#[inline(always)]
fn branches(position: &Position, from: Square, mv: Move) -> u64 {
    if position.is_promotion_move(from, mv) {
        PromotionKind::COUNT as u64
    } else {
        1
    }
}

/// Every position reachable by `color` in one move, promotions expanded.
fn children(position: &Position, color: Color) -> Vec<(Square, Move, Position)> {
    let mut children = Vec::new();

    for (from, moves) in position.legal_moves_for(color) {
        for mv in moves {
            let mut child = position.clone();
            // `legal_moves_for` only yields occupied squares
            let Ok(outcome) = child.make_move(from, mv) else {
                continue;
            };

            let Some(square) = outcome.pending_promotion() else {
                children.push((from, mv, child));
                continue;
            };

            for promotion in PromotionKind::all() {
                let mut promoted = child.clone();
                if promoted.promote(square, promotion.kind()).is_ok() {
                    children.push((from, mv, promoted));
                }
            }
        }
    }

    children
}

/// Perform a perft at the specified depth, counting the number of positions (nodes) reachable by alternating moves,
/// starting with `color`.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// A move that promotes a Pawn counts once per [`PromotionKind`].
///
/// # Example
/// ```
/// # use arbiter::{perft, Color, Position};
/// let pos = Position::new();
/// assert_eq!(perft(&pos, Color::White, 1), 20);
/// assert_eq!(perft(&pos, Color::White, 2), 400);
/// ```
pub fn perft(position: &Position, color: Color, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if depth == 1 {
        return position
            .legal_moves_for(color)
            .into_iter()
            .flat_map(|(from, moves)| moves.into_iter().map(move |mv| (from, mv)))
            .map(|(from, mv)| branches(position, from, mv))
            .sum();
    }

    children(position, color)
        .iter()
        .fold(0, |nodes, (_, _, child)| {
            nodes + perft(child, color.opponent(), depth - 1)
        })
}

/// Perform a splitperft at the specified depth, returning the number of nodes reachable after each move
/// available at the root, alongside the total.
///
/// Promotions are reported once per [`PromotionKind`], so the same `(square, move)` pair may appear several times.
///
/// # Example
/// ```
/// # use arbiter::{splitperft, Color, Position};
/// let (split, total) = splitperft(&Position::new(), Color::White, 2);
/// assert_eq!(split.len(), 20);
/// assert!(split.iter().all(|(_, _, nodes)| *nodes == 20));
/// assert_eq!(total, 400);
/// ```
pub fn splitperft(position: &Position, color: Color, depth: usize) -> (Vec<(Square, Move, u64)>, u64) {
    if depth == 0 {
        return (Vec::new(), 1);
    }

    let split = children(position, color)
        .into_iter()
        .map(|(from, mv, child)| (from, mv, perft(&child, color.opponent(), depth - 1)))
        .collect::<Vec<_>>();

    let total = split.iter().map(|(_, _, nodes)| nodes).sum();
    (split, total)
}
