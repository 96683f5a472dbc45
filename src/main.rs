use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config as LogConfig, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use arcade_snake::game::GameConfig;
use arcade_snake::leaderboard::Leaderboard;
use arcade_snake::modes::HumanMode;

/// The TUI owns the terminal, so diagnostics go to a file instead
const LOG_FILE: &str = "arcade_snake.log";

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Classic grid snake with a persistent leaderboard")]
struct Cli {
    /// Player name recorded on the leaderboard (may be empty)
    #[arg(long, default_value = "")]
    name: String,

    /// Play field width in pixels
    #[arg(long, default_value_t = 600)]
    canvas_width: u32,

    /// Play field height in pixels
    #[arg(long, default_value_t = 400)]
    canvas_height: u32,

    /// Cell size in pixels
    #[arg(long, default_value_t = 10)]
    cell_size: u32,

    /// Milliseconds between game ticks
    #[arg(long, default_value_t = 40)]
    tick_ms: u64,

    /// Leaderboard file
    #[arg(long, default_value = "leaderboard.json")]
    scores: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(LOG_FILE).with_context(|| format!("Failed to create {}", LOG_FILE))?,
    )
    .context("Failed to initialize logger")?;

    let mut config = GameConfig::new(cli.canvas_width, cli.canvas_height, cli.cell_size);
    config.tick_interval_ms = cli.tick_ms;

    let leaderboard = Leaderboard::open(&cli.scores);
    info!(
        "starting on a {}x{} grid, leaderboard at {:?} with {} entries",
        config.grid_cols(),
        config.grid_rows(),
        leaderboard.path(),
        leaderboard.entries().len()
    );

    let mut mode = HumanMode::new(config, leaderboard, cli.name);
    mode.run().await
}
