//! Squava Arena - engine vs engine matches between two search budgets
//!
//! Engines swap colours every game so neither side keeps the first-move
//! advantage. Each finished game is appended to a CSV file.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use squava::logging::setup_logging;
use squava::mcts::SearchConfig;
use squava::play::{play_game, MovePicker, RandomPlayer, UctPlayer};
use squava::recording::CsvWriter;

#[derive(Parser, Debug)]
#[command(
    name = "squava-arena",
    about = "Run engine vs engine Squava matches and record the results"
)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 20)]
    games: usize,

    /// Iterations per move for engine A
    #[arg(long, default_value_t = 5000)]
    iterations_a: usize,

    /// Iterations per move for engine B (0 = uniformly random player)
    #[arg(long, default_value_t = 500)]
    iterations_b: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output CSV file for results
    #[arg(short, long, default_value = "data/arena_results.csv")]
    output: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Default)]
struct Tally {
    wins_a: usize,
    wins_b: usize,
    draws: usize,
}

fn engine(name: &str, iterations: usize, seed: u64) -> Box<dyn MovePicker> {
    if iterations == 0 {
        return Box::new(RandomPlayer::new(name, seed));
    }
    Box::new(UctPlayer::new(
        name,
        SearchConfig {
            iterations,
            seed: Some(seed),
            ..SearchConfig::default()
        },
    ))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let _logger = setup_logging(&args.log_level, None)?;

    if args.iterations_a == 0 {
        return Err("engine A needs a positive iteration count".into());
    }

    let name_a = format!("A-uct-{}", args.iterations_a);
    let name_b = if args.iterations_b == 0 {
        "B-random".to_string()
    } else {
        format!("B-uct-{}", args.iterations_b)
    };

    log::info!("⚔️  Squava Arena: {} vs {}", name_a, name_b);
    log::info!("   Games: {}, Seed: {}", args.games, args.seed);

    let mut writer = CsvWriter::new(&args.output)?;
    let mut tally = Tally::default();

    for game_idx in 0..args.games {
        let seed = args.seed.wrapping_add(2 * game_idx as u64);
        let mut a = engine(&name_a, args.iterations_a, seed);
        let mut b = engine(&name_b, args.iterations_b, seed.wrapping_add(1));

        let record = if game_idx % 2 == 0 {
            play_game(a.as_mut(), b.as_mut(), "arena")?
        } else {
            play_game(b.as_mut(), a.as_mut(), "arena")?
        };
        writer.write_game(&record)?;

        match record.winner().map(|p| p.name.as_str()) {
            Some(name) if name == name_a => tally.wins_a += 1,
            Some(_) => tally.wins_b += 1,
            None => tally.draws += 1,
        }

        log::info!(
            "Game {}/{}: {} ({} moves)",
            game_idx + 1,
            args.games,
            record
                .outcome
                .map(|o| o.to_string())
                .unwrap_or_else(|| "unfinished".to_string()),
            record.moves.len()
        );
    }

    println!("\n{}", "=".repeat(50));
    println!("RESULTS");
    println!("{}", "=".repeat(50));
    println!("  {}: {} wins", name_a, tally.wins_a);
    println!("  {}: {} wins", name_b, tally.wins_b);
    println!("  Draws: {}", tally.draws);
    println!("  Results appended to {}", writer.path().display());

    Ok(())
}
