use clap::Parser;
use std::error::Error;
use std::io;
use std::path::PathBuf;

use squava::game::{Board, Mark};
use squava::logging::setup_logging;
use squava::mcts::SearchConfig;
use squava::play::{format_move, play_game_with, HumanPlayer, UctPlayer};
use squava::recording::GameRecord;

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum GameMode {
    /// Human against the engine
    Play,
    /// Engine against engine with two budgets
    SelfPlay,
}

#[derive(Parser, Debug)]
#[command(name = "squava", about = "Play Squava against a UCT Monte Carlo Tree Search engine")]
struct Config {
    /// Game mode
    #[arg(long, value_enum, default_value = "play")]
    mode: GameMode,

    /// UCT iterations per engine move (overrides the config file)
    #[arg(short = 'i', long)]
    iterations: Option<usize>,

    /// Iterations for the second engine in self-play
    #[arg(long, default_value_t = 1000)]
    opponent_iterations: usize,

    /// Time limit per engine move in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Let the human play X and move first
    #[arg(long, default_value_t = false)]
    human_first: bool,

    /// RNG seed for reproducible engine play
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// JSON search config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the finished game as JSON to this path
    #[arg(long)]
    record: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Directory for log files (stderr when omitted)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Config {
    fn search_config(&self) -> Result<SearchConfig, Box<dyn Error>> {
        let mut search = match &self.config {
            Some(path) => SearchConfig::from_json_file(path)?,
            None => SearchConfig::default(),
        };
        if let Some(iterations) = self.iterations {
            search.iterations = iterations;
        }
        if self.time_limit_ms.is_some() {
            search.max_duration_ms = self.time_limit_ms;
        }
        if self.seed.is_some() {
            search.seed = self.seed;
        }
        search.validate()?;
        Ok(search)
    }
}

fn print_move(board: &Board, mover: Mark, cell: usize) {
    println!("Player {} chose {}\n", mover, format_move(cell));
    print!("{}", board);
}

fn print_result(record: &GameRecord) {
    match (record.outcome, record.winner()) {
        (Some(outcome), Some(winner)) => println!("{}: {} wins!", outcome, winner.name),
        (Some(outcome), None) => println!("{}: nobody wins!", outcome),
        (None, _) => println!("game unfinished"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    let _logger = setup_logging(&config.log_level, config.log_dir.as_deref())?;

    let search = config.search_config()?;
    log::info!("search config: {:?}", search);

    let record = match config.mode {
        GameMode::Play => {
            let mut engine = UctPlayer::new("uct", search);
            let mut human = HumanPlayer::new("human", io::stdin().lock(), io::stdout());
            print!("{}", Board::new());

            if config.human_first {
                play_game_with(&mut human, &mut engine, "human_vs_uct", print_move)?
            } else {
                play_game_with(&mut engine, &mut human, "human_vs_uct", print_move)?
            }
        }
        GameMode::SelfPlay => {
            let opponent = SearchConfig {
                iterations: config.opponent_iterations,
                seed: search.seed.map(|s| s.wrapping_add(1)),
                ..search.clone()
            };
            opponent.validate()?;

            let mut first = UctPlayer::new(format!("uct-{}", search.iterations), search);
            let mut second = UctPlayer::new(format!("uct-{}", opponent.iterations), opponent);
            play_game_with(&mut first, &mut second, "self_play", print_move)?
        }
    };

    print_result(&record);

    if let Some(path) = &config.record {
        record.save_json(path)?;
        log::info!("game record written to {}", path.display());
    }

    Ok(())
}
