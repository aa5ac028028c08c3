use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use torus_snake::driver::GameDriver;
use torus_snake::game::SimConfig;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around grid, in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "40")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "30")]
    height: usize,

    /// Starting snake length
    #[arg(long, default_value = "3")]
    snake_length: usize,

    /// RNG seed for reproducible runs (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per simulation tick
    #[arg(long, default_value = "100")]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SimConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        initial_snake_length: cli.snake_length,
        seed: cli.seed,
    };

    let mut driver = GameDriver::new(config, Duration::from_millis(cli.tick_ms))?;
    driver.run().await
}
