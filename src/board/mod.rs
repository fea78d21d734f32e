/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Detecting which pieces attack a square.
mod attacks;

/// Applying and reverting moves.
mod execute;

/// A game in progress, with history and draw detection.
mod game;

/// Pseudo-legal move generation.
mod movegen;

/// Moves and coordinate move notation.
mod moves;

/// Perft node counting.
mod perft;

/// Pieces, their kinds, and their colors.
mod piece;

/// The board itself, and its FEN encoding.
mod position;

/// Squares, files, and ranks.
mod square;

/// Classifying positions as checkmate, stalemate, and so on.
mod state;

/// Misc constants.
mod utils;

/// Legality checks and diagnosis of illegal moves.
mod validate;

pub use attacks::*;
pub use execute::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use state::*;
pub use utils::*;
pub use validate::*;
