//! Drag-and-drop board demo.
//!
//! Replays a scripted set of drag gestures between draggable sources and
//! drop targets, logging every hover decision and delivered payload:
//! - targets accept by wire type, list of wire types, or a constant
//! - rejected hovers never light up the target, but drops still deliver
//! - malformed structured bodies are isolated per type
//!
//! Run with the built-in board, or point it at your own:
//!   cargo run -p draganddrop-demo-board
//!   cargo run -p draganddrop-demo-board -- --board demos/board/board.toml -v

mod board;
mod replay;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "board", about = "Replay drag gestures across a board of drop targets")]
struct Args {
    /// Board description (TOML). Defaults to the built-in board.
    #[arg(long, env = "BOARD_FILE")]
    board: Option<PathBuf>,

    /// Also log core decisions.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut filter = EnvFilter::from_default_env().add_directive("board=info".parse()?);
    if args.verbose {
        filter = filter.add_directive("draganddrop_core=debug".parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut board = board::Board::load(args.board.as_deref())?;
    tracing::info!(
        "Loaded board with {} sources, {} targets, {} gestures",
        board.sources.len(),
        board.targets.len(),
        board.gestures.len()
    );

    let gestures = std::mem::take(&mut board.gestures);
    let mut replay = replay::Replay::new(board);

    for (i, gesture) in gestures.iter().enumerate() {
        tracing::info!("Gesture {}", i + 1);
        if !replay.run(gesture)? {
            tracing::info!("Gesture {} never started", i + 1);
        }
    }

    for name in replay.hovered() {
        tracing::warn!("Target {} still shows its hover class", name);
    }

    for (name, received) in replay.received() {
        println!("{name}: {} drop(s)", received.len());
        for value in received {
            println!("  {}", serde_json::to_string_pretty(value)?);
        }
    }

    Ok(())
}
