/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, BufRead, Write};

use anyhow::Result;
use arbiter::{
    splitperft, Cli, Color, Command, Game, GameStatus, Position, PromotionKind, Square, BOARD_SIZE,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // `RUST_LOG` takes priority over the command line
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let game = cli.starting_game()?;

    match cli.command {
        Some(Command::Perft { depth }) => {
            let (split, total) = splitperft(game.position(), game.side_to_move(), depth);
            for (from, mv, nodes) in split {
                println!("{from} {mv}\t{nodes}");
            }
            println!("\n{total}");
            Ok(())
        }
        None => play(game, cli.promotion),
    }
}

/// Runs the turn loop until the game ends or input runs out.
fn play(mut game: Game, auto_promotion: Option<PromotionKind>) -> Result<()> {
    let mut input = io::stdin().lock().lines();

    loop {
        println!("\n{}\n", render(game.position()));

        match game.status() {
            status @ (GameStatus::Checkmate { .. } | GameStatus::Stalemate) => {
                println!("{status}");
                return Ok(());
            }
            GameStatus::Check(color) => println!("{color} is in check."),
            GameStatus::Ongoing => {}
        }

        let side = game.side_to_move();
        let Some(line) = prompt(&mut input, &format!("{side}, select a piece (file rank): "))?
        else {
            return Ok(());
        };

        let from = match line.parse::<Square>() {
            Ok(square) => square,
            Err(e) => {
                println!("{e:#}");
                continue;
            }
        };

        let moves = match game.select(from) {
            Ok(moves) => moves,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        for (i, mv) in moves.iter().enumerate() {
            println!("  [{i}] {mv}");
        }

        let Some(line) = prompt(&mut input, "Choose a move: ")? else {
            return Ok(());
        };
        let Some(&mv) = line.trim().parse::<usize>().ok().and_then(|i| moves.get(i)) else {
            println!("{:?} is not one of the listed moves", line.trim());
            continue;
        };

        let promotion = if game.needs_promotion(from, mv) {
            match auto_promotion {
                Some(kind) => Some(kind),
                None => match ask_promotion(&mut input)? {
                    Some(kind) => Some(kind),
                    None => return Ok(()),
                },
            }
        } else {
            None
        };

        if let Err(e) = game.play(from, mv, promotion) {
            println!("{e}");
        }
    }
}

/// Asks for a promotion kind until a valid one is entered. Returns `None` once input runs out.
fn ask_promotion(
    input: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<PromotionKind>> {
    loop {
        let Some(line) = prompt(input, "Promote to (knight, bishop, rook, queen): ")? else {
            return Ok(None);
        };

        match line.parse::<PromotionKind>() {
            Ok(kind) => return Ok(Some(kind)),
            Err(e) => println!("{e}"),
        }
    }
}

/// Prints `message` and reads the next line of input.
fn prompt(
    input: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    Ok(input.next().transpose()?)
}

/// Draws the board with its coordinates along the edges.
fn render(position: &Position) -> String {
    let mut board = String::new();

    for (rank, row) in position.snapshot().iter().enumerate() {
        board += &format!("{rank}|");
        for cell in row {
            let symbol = match cell {
                Some((kind, Color::White)) => kind.char().to_ascii_uppercase(),
                Some((kind, Color::Black)) => kind.char(),
                None => '.',
            };
            board += &format!(" {symbol}");
        }
        board += "\n";
    }

    board += " +";
    board += &"--".repeat(BOARD_SIZE as usize);
    board += "\n  ";
    for file in 0..BOARD_SIZE {
        board += &format!(" {file}");
    }

    board
}

