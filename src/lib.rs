/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Chess rules: board representation, legal move generation, reversible move
//! application, and game state classification.

/// The board, its pieces, and the rules of how they move.
mod board;

/// Command-line interface for inspecting positions.
mod cli;

/// Errors produced when parsing positions or validating moves.
mod error;

pub use board::*;
pub use cli::*;
pub use error::*;
