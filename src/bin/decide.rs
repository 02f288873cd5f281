//! Decision CLI
//!
//! Reads a `GameState` snapshot from a JSON file and prints the recommended
//! action as JSON.
//!
//! Usage: `decide <state.json> [config.json]`
//!
//! Set `RUST_LOG=debug` to see the engines' reasoning.

use std::fs;
use std::process;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use holdem_advisor::{Advisor, EngineConfig, GameState, HandRanges};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <state.json> [config.json]", args[0]);
        process::exit(2);
    }

    let config = match args.get(2) {
        Some(path) => EngineConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }),
        None => EngineConfig::default(),
    };

    let state: GameState = match fs::read_to_string(&args[1]) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            eprintln!("Error parsing game state: {}", e);
            process::exit(1);
        }),
        Err(e) => {
            eprintln!("Error reading {}: {}", args[1], e);
            process::exit(1);
        }
    };

    // Postflop, opponents' ranges come from the preflop log.
    let mut ranges = HandRanges::new();
    if !state.board.is_empty() {
        ranges.replay_preflop(&state.actions, &state.stats);
    }

    let mut rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let advisor = Advisor::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        process::exit(1);
    });

    let start = Instant::now();
    let decision = advisor.decide(&state, &ranges, &mut rng).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let elapsed = start.elapsed();

    match serde_json::to_string_pretty(&decision) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing decision: {}", e);
            process::exit(1);
        }
    }
    eprintln!("{} ({:.1}ms)", decision, elapsed.as_secs_f64() * 1000.0);
}
