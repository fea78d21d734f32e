/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use crate::{
    attackers_of, classify, legal_moves_from, perft, splitperft, Color, Game, Square,
    FEN_STARTPOS,
};

/// Inspect chess positions: legal moves, attacks, game state, and perft counts.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// The position to start from, as a FEN string.
    #[arg(short, long, default_value = FEN_STARTPOS)]
    pub fen: String,

    /// Moves to play, in coordinate notation, before running the command, such as `"e2e4 e7e5"`.
    #[arg(short, long, value_delimiter = ' ')]
    pub moves: Vec<String>,

    /// If set, debug logs will be printed to stderr.
    #[arg(short, long, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// A query to run against the position.
#[derive(Debug, Clone, Subcommand)]
#[command(rename_all = "lower")]
pub enum Command {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Generate and print a FEN string for the current position.
    Fen,

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, moves will be sorted in alphabetical order.
        ///
        /// By default, moves are generated in no particular order.
        #[arg(short, long, default_value = "false")]
        sort: bool,

        /// If set, moves will be printed using their debug formatter, which displays what kind of move it is (quiet, en passant, etc.).
        #[arg(short, long, default_value = "false")]
        debug: bool,
    },

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Print whether the side to move is in check, checkmated, stalemated, and so on.
    Classify,

    /// List the pieces of each side that attack the provided square.
    Attacks { square: Square },
}

impl Cli {
    /// Sets up the requested position, then runs the command on it.
    pub fn run(self) -> Result<()> {
        let mut game = Game::from_fen(&self.fen)
            .with_context(|| format!("Failed to set up position {:?}", self.fen))?;

        for mv in &self.moves {
            game.play_uci(mv)
                .with_context(|| format!("Failed to play {mv:?} on {game}"))?;
        }

        self.command.execute(&game);
        Ok(())
    }
}

impl Command {
    /// Runs this command on the current position of `game`, printing the result to stdout.
    pub fn execute(&self, game: &Game) {
        let board = game.board();

        match *self {
            Self::Display => {
                println!("{board:?}");
                println!("Status: {}", game.status());
            }

            Self::Fen => println!("{board}"),

            Self::Moves {
                square,
                sort,
                debug,
            } => {
                let mut moves = match square {
                    Some(square) => legal_moves_from(board, square),
                    None => game.legal_moves(),
                };

                if sort {
                    moves.sort_by_key(|mv| mv.to_string());
                }

                if moves.is_empty() {
                    println!("(none)");
                } else if debug {
                    for mv in moves {
                        println!("{mv:?}");
                    }
                } else {
                    let moves_string = moves
                        .into_iter()
                        .map(|mv| mv.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("{moves_string}");
                }
            }

            Self::Perft { depth } => {
                let now = Instant::now();
                let nodes = perft(board, depth);
                info!("Perft({depth}) took {:?}", now.elapsed());

                println!("{nodes}");
            }

            Self::Splitperft { depth } => {
                let now = Instant::now();
                let split = splitperft(board, depth);
                info!("Splitperft({depth}) took {:?}", now.elapsed());

                let mut total = 0;
                for (mv, nodes) in split {
                    println!("{mv}\t{nodes}");
                    total += nodes;
                }
                println!("\n{total}");
            }

            Self::Classify => {
                println!("{}", classify(board));
                println!("Status: {}", game.status());
            }

            Self::Attacks { square } => {
                for color in Color::all() {
                    let attackers = attackers_of(board, square, color);
                    let attackers_string = if attackers.is_empty() {
                        String::from("(none)")
                    } else {
                        attackers
                            .into_iter()
                            .map(|sq| sq.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    };
                    println!("{}: {attackers_string}", color.name());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["warden", "--moves", "e2e4 e7e5", "moves", "e1", "-s"])
            .unwrap();
        assert_eq!(cli.fen, FEN_STARTPOS);
        assert_eq!(cli.moves, ["e2e4", "e7e5"]);
        assert!(matches!(
            cli.command,
            Command::Moves {
                square: Some(Square::E1),
                sort: true,
                debug: false
            }
        ));

        let cli = Cli::try_parse_from(["warden", "-d", "attacks", "e4"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::Attacks { square: Square::E4 }));
    }

    #[test]
    fn test_rejects_bad_square() {
        assert!(Cli::try_parse_from(["warden", "attacks", "z9"]).is_err());
    }

    #[test]
    fn test_run_reports_illegal_moves() {
        let cli = Cli::try_parse_from(["warden", "--moves", "e2e5", "fen"]).unwrap();
        let err = cli.run().unwrap_err();
        assert!(format!("{err:#}").contains("e2e5"));

        let cli = Cli::try_parse_from(["warden", "--fen", "not a fen", "fen"]).unwrap();
        assert!(cli.run().is_err());
    }
}
