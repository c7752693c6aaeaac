use log::{error, info};
use std::env;
use std::time::{Duration, Instant};

use autopilot_snake::config::Config;
use autopilot_snake::game::{Game, GameStats};
use autopilot_snake::trace_logger::{TraceEntry, TraceLogger};
use autopilot_snake::types::GameStatus;

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting snake autopilot...");

    // Optional config path as the first argument, Autopilot.toml otherwise
    let config = match env::args().nth(1) {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Config::load_or_default(),
    };

    match run(config).await {
        Ok((status, stats, length)) => {
            println!("============================================================");
            println!("Result:          {:?}", status);
            println!("Ticks:           {}", stats.ticks);
            println!("Final length:    {}", length);
            println!("Food eaten:      {}", stats.food_eaten);
            println!("Food path moves: {}", stats.food_path);
            println!("Recursive coil:  {}", stats.recursive_coil);
            println!("Fallback coil:   {}", stats.fallback_coil);
            println!("============================================================");
        }
        Err(e) => {
            error!("Driver stopped: {}", e);
            std::process::exit(1);
        }
    }
}

/// Plays one game tick by tick, throttled to the configured cycle time
async fn run(config: Config) -> Result<(GameStatus, GameStats, usize), String> {
    let cycle_time = Duration::from_millis(config.timing.cycle_time_ms);
    let max_ticks = config.timing.max_ticks;
    let trace = TraceLogger::new(config.debug.enabled, &config.debug.log_file_path).await;

    let mut game = Game::new(config);

    while !game.status().is_terminal() && game.tick_count() < max_ticks {
        let started = Instant::now();
        let head = game.head();

        // Decision cycles are CPU-bound, keep them off the async workers
        let (returned, report) = tokio::task::spawn_blocking(move || {
            let report = game.tick();
            (game, report)
        })
        .await
        .map_err(|e| format!("tick task failed: {}", e))?;
        game = returned;

        if let (Some(decision), Some(head)) = (report.decision, head) {
            info!(
                "Tick {}: {} via {} (length {})",
                report.tick,
                decision.direction.as_str(),
                decision.method.as_str(),
                game.snake_length()
            );
            if trace.is_enabled() {
                let entry = TraceEntry::from_decision(
                    report.tick,
                    head,
                    report.food,
                    game.snake_length(),
                    decision,
                );
                // Spawned writes are dropped at runtime shutdown, the last one is awaited
                let last = report.status.is_terminal() || game.tick_count() >= max_ticks;
                if last {
                    trace.log_now(entry).await;
                } else {
                    trace.log(entry);
                }
            }
        }

        let elapsed = started.elapsed();
        let pause = cycle_time.saturating_sub(elapsed).max(Duration::from_millis(1));
        tokio::time::sleep(pause).await;
    }

    if !game.status().is_terminal() {
        info!("Stopped after {} ticks without finishing", max_ticks);
    }

    Ok((game.status(), game.stats(), game.snake_length()))
}
