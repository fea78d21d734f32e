/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{legal_moves, Board, Move};

/// Perform a perft at the specified depth, counting the leaf nodes of the legal move tree.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
///
/// # Example
/// ```
/// # use warden::{perft, Board};
/// let board = Board::default();
/// assert_eq!(perft(&board, 0), 1);
/// assert_eq!(perft(&board, 1), 20);
/// assert_eq!(perft(&board, 2), 400);
/// ```
pub fn perft(board: &Board, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, board.side_to_move());

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if depth == 1 {
        return moves.len() as u64;
    }

    // Each child is searched on a scratch copy, then reverted
    let mut scratch = board.clone();
    moves.into_iter().fold(0, |nodes, mv| {
        let undo = scratch.make_move(mv);
        let new_nodes = perft(&scratch, depth - 1);
        scratch.unmake_move(undo);

        nodes + new_nodes
    })
}

/// Perform a splitperft at the specified depth, returning the number of nodes reachable after
/// each move available at the root.
///
/// The counts sum to [`perft`] at the same depth.
/// At depth 0 there is nothing to split, so the result is empty.
pub fn splitperft(board: &Board, depth: usize) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    legal_moves(board, board.side_to_move())
        .into_iter()
        .map(|mv| (mv, perft(&board.with_move_made(mv), depth - 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_KIWIPETE;

    #[test]
    fn test_splitperft_sums_to_perft() {
        let board = Board::from_fen(FEN_KIWIPETE).unwrap();
        let split = splitperft(&board, 2);

        assert_eq!(split.len(), 48);
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 2039);
        assert!(splitperft(&board, 0).is_empty());
    }

    #[test]
    fn test_perft_leaves_board_untouched() {
        let board = Board::from_fen(FEN_KIWIPETE).unwrap();
        let copy = board.clone();
        perft(&board, 2);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_perft_of_terminal_position() {
        // Checkmated: no children at any depth
        let board = Board::from_fen("k7/1Q6/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(perft(&board, 1), 0);
        assert_eq!(perft(&board, 3), 0);
    }
}
