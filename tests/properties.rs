/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use warden::{
    classify, is_in_check, is_legal, legal_moves, pseudo_legal_moves, Board, GameState,
    FEN_KIWIPETE, FEN_STARTPOS,
};

/// Positions whose move trees cover castling, en passant, promotions, checks, and mates.
const POSITIONS: &[(&str, usize)] = &[
    (FEN_STARTPOS, 3),
    (FEN_KIWIPETE, 2),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
    ("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1", 2),
    ("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 2),
    ("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 3),
    ("K1k5/8/P7/8/8/8/8/8 w - - 0 1", 5),
];

/// Calls `visit` on every position reachable from `board` within `depth` moves, `board` included.
fn walk(board: &mut Board, depth: usize, visit: &mut impl FnMut(&Board)) {
    visit(board);

    if depth == 0 {
        return;
    }

    for mv in legal_moves(board, board.side_to_move()) {
        let undo = board.make_move(mv);
        walk(board, depth - 1, visit);
        board.unmake_move(undo);
    }
}

fn for_each_position(mut visit: impl FnMut(&Board)) {
    for &(fen, depth) in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        walk(&mut board, depth, &mut visit);
        assert_eq!(board.to_fen(), Board::from_fen(fen).unwrap().to_fen());
    }
}

#[test]
fn make_then_unmake_restores_the_board() {
    for_each_position(|board| {
        let mut scratch = board.clone();
        for mv in legal_moves(board, board.side_to_move()) {
            let undo = scratch.make_move(mv);
            scratch.unmake_move(undo);
            assert_eq!(&scratch, board, "{mv:?} did not revert on {board}");
        }
    });
}

#[test]
fn legal_moves_never_leave_the_king_in_check() {
    for_each_position(|board| {
        let mover = board.side_to_move();
        for mv in legal_moves(board, mover) {
            let after = board.with_move_made(mv);
            assert!(!is_in_check(&after, mover), "{mv:?} exposes the King on {board}");
            assert_eq!(after.side_to_move(), mover.opponent());
        }
    });
}

#[test]
fn legal_moves_are_pseudo_legal_and_legal() {
    for_each_position(|board| {
        let mover = board.side_to_move();
        let pseudo = pseudo_legal_moves(board, mover);
        for mv in legal_moves(board, mover) {
            assert!(pseudo.contains(&mv), "{mv:?} is not pseudo-legal on {board}");
            assert!(is_legal(board, mv), "{mv:?} is not legal on {board}");
        }
    });
}

#[test]
fn classification_matches_check_and_mobility() {
    for_each_position(|board| {
        let mover = board.side_to_move();
        let in_check = is_in_check(board, mover);
        let no_moves = legal_moves(board, mover).is_empty();
        let state = classify(board);

        assert_eq!(state == GameState::Checkmate, in_check && no_moves, "{board}");
        assert_eq!(state == GameState::Stalemate, !in_check && no_moves, "{board}");
        if state == GameState::Check {
            assert!(in_check && !no_moves, "{board}");
        }
    });
}

#[test]
fn fen_round_trips_through_every_position() {
    for_each_position(|board| {
        let fen = board.to_fen();
        let parsed = Board::from_fen(&fen).unwrap();
        assert_eq!(&parsed, board, "{fen}");
        assert_eq!(parsed.to_fen(), fen);
    });
}
