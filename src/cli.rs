/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{builder::PossibleValue, Parser, Subcommand, ValueEnum};

use crate::{Color, Game, Position, PromotionKind};

/// Play a game of chess between two players at the terminal.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Start from a layout file instead of the standard position.
    ///
    /// The file holds 8 rows of space-separated piece letters, rank 0 (Black's back rank) first.
    /// Uppercase letters are White, lowercase are Black, and `-` or `.` mark empty squares.
    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    /// If set, Black makes the first move.
    #[arg(short, long, default_value = "false")]
    pub black_first: bool,

    /// Promote Pawns to this kind automatically, instead of asking.
    #[arg(short, long)]
    pub promotion: Option<PromotionKind>,

    /// Log filter, such as `debug` or `arbiter=trace`. Overridden by `RUST_LOG`.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Things to do instead of playing a game.
#[derive(Debug, Clone, Subcommand)]
#[command(rename_all = "lower")]
pub enum Command {
    /// Performs a split perft on the starting position at the supplied depth, printing the node count of every move.
    #[command(alias = "splitperft")]
    Perft { depth: usize },
}

impl Cli {
    /// The color that moves first.
    #[inline(always)]
    pub const fn first_mover(&self) -> Color {
        if self.black_first {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Builds the game to start from, reading the layout file if one was provided.
    pub fn starting_game(&self) -> Result<Game> {
        let position = match &self.layout {
            Some(path) => {
                let rows = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read layout file {}", path.display()))?;
                Position::from_rows(&rows)
                    .with_context(|| format!("Invalid layout in {}", path.display()))?
            }
            None => Position::new(),
        };

        Ok(Game::from_position(position, self.first_mover()))
    }
}

impl ValueEnum for PromotionKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            PromotionKind::Knight,
            PromotionKind::Bishop,
            PromotionKind::Rook,
            PromotionKind::Queen,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Every kind accepts its name, capitalized or not, and its letter
        let value = match self {
            PromotionKind::Knight => PossibleValue::new("knight").aliases(["Knight", "n"]),
            PromotionKind::Bishop => PossibleValue::new("bishop").aliases(["Bishop", "b"]),
            PromotionKind::Rook => PossibleValue::new("rook").aliases(["Rook", "r"]),
            PromotionKind::Queen => PossibleValue::new("queen").aliases(["Queen", "q"]),
        };

        Some(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["arbiter"]).unwrap();
        assert!(cli.layout.is_none());
        assert_eq!(cli.first_mover(), Color::White);
        assert_eq!(cli.promotion, None);
        assert_eq!(cli.log_level, "warn");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_options() {
        let cli =
            Cli::try_parse_from(["arbiter", "--black-first", "--promotion", "q", "perft", "3"])
                .unwrap();
        assert_eq!(cli.first_mover(), Color::Black);
        assert_eq!(cli.promotion, Some(PromotionKind::Queen));
        assert!(matches!(cli.command, Some(Command::Perft { depth: 3 })));

        let cli = Cli::try_parse_from(["arbiter", "-p", "knight"]).unwrap();
        assert_eq!(cli.promotion, Some(PromotionKind::Knight));

        assert!(Cli::try_parse_from(["arbiter", "--promotion", "king"]).is_err());
    }

    #[test]
    fn test_missing_layout_file() {
        let cli = Cli::try_parse_from(["arbiter", "--layout", "/nonexistent/layout.txt"]).unwrap();
        assert!(cli.starting_game().is_err());
    }
}
