//! Headless simulation driver.
//!
//! Runs a seeded session under a synthetic 60 Hz clock with a simple input
//! pattern and prints a JSON summary line, for smoke-testing balance and
//! reproducing runs: `simulate [seed] [max_ticks]`.

use serde_json::json;

use shrimp_jump::config::Config;
use shrimp_jump::sim::{self, Direction, GameState};

const TICK_MS: u64 = 16;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let max_ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(36_000);

    let config = match Config::new(400.0, 800.0) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let mut state = GameState::new(config, seed, 0);
    state.confirm(0);
    log::info!("running seed {seed} for up to {max_ticks} ticks");

    let mut ticks_run = 0u64;
    for i in 0..max_ticks {
        // Sweep left, right, idle so the run covers some ground
        let phase = (i / 30) % 3;
        state.set_input(Direction::Left, phase == 1);
        state.set_input(Direction::Right, phase == 2);

        sim::tick(&mut state, i * TICK_MS);
        ticks_run = i + 1;
        if state.game_over() {
            break;
        }
    }

    let summary = json!({
        "seed": seed,
        "ticks": ticks_run,
        "score": state.score(),
        "gameOver": state.game_over(),
        "platforms": state.platforms.len(),
        "pickups": state.pickups.len(),
    });
    println!("{summary}");
}
