//! Autopilot Benchmark Tool
//!
//! Plays seeded games to completion in parallel and summarizes how they ended.
//!
//! Usage:
//!   cargo run --release --bin bench -- <games> [first_seed]
//!
//! Output:
//!   - Wins, game overs and unfinished games
//!   - Average and best final length
//!   - Share of moves per decision method
//!   - Wall clock time per game

use rayon::prelude::*;
use std::env;
use std::time::Instant;

use autopilot_snake::config::Config;
use autopilot_snake::game::{Game, GameStats};
use autopilot_snake::types::GameStatus;

#[derive(Debug, Clone)]
struct GameResult {
    seed: u64,
    status: GameStatus,
    length: usize,
    stats: GameStats,
    millis: u128,
}

fn play(config: &Config, seed: u64) -> GameResult {
    let started = Instant::now();
    let mut game = Game::with_seed(config.clone(), seed);
    let status = game.run_to_completion(config.timing.max_ticks);
    GameResult {
        seed,
        status,
        length: game.snake_length(),
        stats: game.stats(),
        millis: started.elapsed().as_millis(),
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <games> [first_seed]", args[0]);
        eprintln!("Example: {} 32 1000", args[0]);
        std::process::exit(1);
    }

    let games: u64 = match args[1].parse() {
        Ok(n) if n > 0 => n,
        _ => {
            eprintln!("Invalid game count: {}", args[1]);
            std::process::exit(1);
        }
    };
    let first_seed: u64 = match args.get(2).map(|s| s.parse()) {
        None => 0,
        Some(Ok(seed)) => seed,
        Some(Err(_)) => {
            eprintln!("Invalid seed: {}", args[2]);
            std::process::exit(1);
        }
    };

    let config = Config::load_or_default();
    let grid = config.board.build_grid();

    println!("============================================================");
    println!("Autopilot Benchmark");
    println!("============================================================");
    println!();
    println!(
        "Games: {} (seeds {}..{}), board {}x{}, {} threads",
        games,
        first_seed,
        first_seed + games,
        grid.width(),
        grid.height(),
        rayon::current_num_threads()
    );
    println!();

    let started = Instant::now();
    let mut results: Vec<GameResult> = (first_seed..first_seed + games)
        .into_par_iter()
        .map(|seed| play(&config, seed))
        .collect();
    results.sort_by_key(|r| r.seed);

    for result in &results {
        println!(
            "  seed {:>6}: {:<9} length {:>4} in {:>6} ticks ({} ms)",
            result.seed,
            format!("{:?}", result.status),
            result.length,
            result.stats.ticks,
            result.millis
        );
    }

    let wins = results.iter().filter(|r| r.status == GameStatus::Win).count();
    let losses = results.iter().filter(|r| r.status == GameStatus::GameOver).count();
    let unfinished = results.len() - wins - losses;
    let total_length: usize = results.iter().map(|r| r.length).sum();
    let best_length = results.iter().map(|r| r.length).max().unwrap_or(0);

    let mut totals = GameStats::default();
    for result in &results {
        totals.ticks += result.stats.ticks;
        totals.food_eaten += result.stats.food_eaten;
        totals.food_path += result.stats.food_path;
        totals.recursive_coil += result.stats.recursive_coil;
        totals.fallback_coil += result.stats.fallback_coil;
    }

    println!();
    println!("============================================================");
    println!("Summary");
    println!("============================================================");
    println!("Wins:            {}", wins);
    println!("Game overs:      {}", losses);
    println!("Unfinished:      {}", unfinished);
    println!("Average length:  {:.1}", total_length as f64 / results.len() as f64);
    println!("Best length:     {}", best_length);
    println!("Food path:       {:.1}%", percent(totals.food_path, totals.ticks));
    println!("Recursive coil:  {:.1}%", percent(totals.recursive_coil, totals.ticks));
    println!("Fallback coil:   {:.1}%", percent(totals.fallback_coil, totals.ticks));
    println!(
        "Total time:      {:.2}s ({:.1} ms/game)",
        started.elapsed().as_secs_f64(),
        started.elapsed().as_millis() as f64 / results.len() as f64
    );
}
