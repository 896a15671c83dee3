//! Headless autoplay runner (default binary).
//!
//! Plays one game with a fixed direction-priority policy and prints the final
//! board. Reads `tile-merge.toml` from the working directory when present.
//! Set `RUST_LOG=debug` to trace every phase of every turn.

use std::path::Path;

use anyhow::{bail, Result};
use env_logger::Env;
use log::info;

use tile_merge::engine::{Game, GameConfig};
use tile_merge::types::Direction;

const CONFIG_PATH: &str = "tile-merge.toml";

/// Directions tried each turn, most preferred first
const POLICY: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = GameConfig::load_or_default(Path::new(CONFIG_PATH))?;
    let mut game = Game::from_config(config)?;

    let mut turns = 0u32;
    while !game.is_game_over() {
        let mut moved = false;
        for dir in POLICY {
            if game.submit(dir)?.moved() {
                moved = true;
                break;
            }
        }
        if !moved {
            bail!("no direction moved but the game is not over");
        }
        turns += 1;
    }

    info!(
        "finished after {} turns: score {}, max tile {}",
        turns,
        game.score(),
        game.board().max_tile()
    );
    print!("{}", game.board());
    println!("score: {}", game.score());
    Ok(())
}
