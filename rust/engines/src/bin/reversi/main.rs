//! Play Reversi against the lookahead opponent in the terminal.
//!
//! The human plays X (Black) and moves first; the computer plays O (White).
//! Set `RUST_LOG=debug` to see every candidate move's value on stderr.

mod input;
mod render;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use reversi::Board;
use reversi_engines::{LookaheadConfig, LookaheadEvaluator, Session, TurnOutcome, DEFAULT_DEPTH};
use tracing_subscriber::EnvFilter;

use crate::input::PromptInput;
use crate::render::{render_board, render_result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plies the computer looks ahead (3 to 5)
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Side length of the board (even, at least 4)
    #[arg(short, long, default_value_t = reversi::DEFAULT_SIZE)]
    size: usize,

    /// Seed for the computer's tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Expand the lookahead tree on the current thread only
    #[arg(long)]
    sequential: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match play(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn play(args: &Args) -> Result<()> {
    let mut config = LookaheadConfig::new(args.depth)?;
    if args.sequential {
        config = config.sequential();
    }
    let evaluator = match args.seed {
        Some(seed) => LookaheadEvaluator::with_seed(config, seed)?,
        None => LookaheadEvaluator::new(config)?,
    };
    let board = Board::with_size(args.size)?;
    tracing::info!(
        depth = evaluator.config().depth,
        parallel = evaluator.config().parallel,
        size = board.size(),
        "starting match"
    );

    let mut session = Session::new(board, evaluator);
    let computer = session.computer();
    println!("{}", render_board(session.board()));

    let stdin = io::stdin();
    let mut input = PromptInput::new(stdin.lock(), io::stdout());
    let tally = session.run(&mut input, |board, outcome| match outcome {
        TurnOutcome::Played {
            player,
            coord,
            captured,
        } => {
            if *player == computer {
                println!(
                    "Computer ({}) plays {}, capturing {}",
                    player.symbol(),
                    coord,
                    captured
                );
            }
            println!("{}", render_board(board));
        }
        TurnOutcome::Passed(player) => {
            println!("Player {} has no legal move and passes", player.symbol());
        }
        TurnOutcome::GameOver => println!("Game over"),
        TurnOutcome::Quit => {}
    })?;
    input.finish().context("failed to read the player's move")?;

    if session.is_over() {
        println!("{}", render_result(&tally));
    } else {
        println!("Input closed, leaving the game");
    }
    Ok(())
}
