//! Players and the game loop.
//!
//! The driver owns the authoritative board. Each turn it asks the player of
//! the side to move for a cell, applies it, and stops when the game is over.

use crate::game::{Board, Mark, BOARD_SIDE, CELL_COUNT};
use crate::mcts::algorithm::search_with_config;
use crate::mcts::config::SearchConfig;
use crate::mcts::search_result::SearchReport;
use crate::recording::game_record::{GameRecord, PlayerType};
use crate::{Result, SquavaError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};

/// Anything that can pick a move for the side to move.
pub trait MovePicker {
    fn name(&self) -> &str;

    fn player_type(&self) -> PlayerType;

    fn choose_move(&mut self, board: &Board) -> Result<usize>;

    /// Score the picker attached to its last move, if any.
    fn last_evaluation(&self) -> Option<f64> {
        None
    }
}

/// Parses `row col` (e.g. `2 3` or `2,3`) or a bare cell index.
pub fn parse_move(input: &str) -> Result<usize> {
    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    let number = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| SquavaError::InvalidInput(format!("{:?} is not a number", s)))
    };

    match parts.as_slice() {
        [row, col] => {
            let (row, col) = (number(*row)?, number(*col)?);
            if row >= BOARD_SIDE || col >= BOARD_SIDE {
                return Err(SquavaError::InvalidInput(format!(
                    "row and column must be between 0 and {}",
                    BOARD_SIDE - 1
                )));
            }
            Ok(row * BOARD_SIDE + col)
        }
        [cell] => {
            let cell = number(*cell)?;
            if cell >= CELL_COUNT {
                return Err(SquavaError::InvalidInput(format!(
                    "cell must be between 0 and {}",
                    CELL_COUNT - 1
                )));
            }
            Ok(cell)
        }
        _ => Err(SquavaError::InvalidInput(
            "enter a move as `row col`".to_string(),
        )),
    }
}

/// `row col` notation for a cell index.
pub fn format_move(cell: usize) -> String {
    format!("{} {}", cell / BOARD_SIDE, cell % BOARD_SIDE)
}

pub struct UctPlayer {
    name: String,
    config: SearchConfig,
    rng: StdRng,
    last_report: Option<SearchReport<usize>>,
}

impl UctPlayer {
    pub fn new(name: impl Into<String>, config: SearchConfig) -> Self {
        let rng = config.make_rng();
        Self {
            name: name.into(),
            config,
            rng,
            last_report: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn last_report(&self) -> Option<&SearchReport<usize>> {
        self.last_report.as_ref()
    }
}

impl MovePicker for UctPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn player_type(&self) -> PlayerType {
        PlayerType::Uct
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let report = search_with_config(board, &self.config, &mut self.rng)?;
        let cell = report.best_move;
        self.last_report = Some(report);
        Ok(cell)
    }

    fn last_evaluation(&self) -> Option<f64> {
        self.last_report.as_ref().map(|r| r.best_mean_score)
    }
}

/// Uniformly random legal moves.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MovePicker for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn player_type(&self) -> PlayerType {
        PlayerType::Random
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(SquavaError::GameOver);
        }
        Ok(moves[self.rng.random_range(0..moves.len())])
    }
}

/// Reads moves from `input`, prompting on `output`. Bad input is reported
/// and asked again; running out of input is an error.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> MovePicker for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn player_type(&self) -> PlayerType {
        PlayerType::Human
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(SquavaError::GameOver);
        }

        loop {
            write!(self.output, "Enter move for {} (row col): ", board.to_move())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SquavaError::InvalidInput("input closed".to_string()));
            }

            match parse_move(&line) {
                Ok(cell) if legal.contains(&cell) => return Ok(cell),
                Ok(cell) => writeln!(self.output, "{} is already taken", format_move(cell))?,
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

/// Plays a full game from the empty board. `x` moves first.
pub fn play_game(
    x: &mut dyn MovePicker,
    o: &mut dyn MovePicker,
    game_mode: &str,
) -> Result<GameRecord> {
    play_game_with(x, o, game_mode, |_, _, _| {})
}

/// [`play_game`], calling `on_move(board, mover, cell)` after every move.
pub fn play_game_with<F>(
    x: &mut dyn MovePicker,
    o: &mut dyn MovePicker,
    game_mode: &str,
    mut on_move: F,
) -> Result<GameRecord>
where
    F: FnMut(&Board, Mark, usize),
{
    let game_id = format!(
        "{}-{}",
        game_mode,
        chrono::Utc::now().format("%Y%m%d%H%M%S%3f")
    );
    let mut record = GameRecord::new(game_id, game_mode.to_string());
    record.add_player(x.name().to_string(), x.player_type(), Mark::X);
    record.add_player(o.name().to_string(), o.player_type(), Mark::O);

    let mut board = Board::new();
    while !board.is_terminal() {
        let mover = board.to_move();
        let player: &mut dyn MovePicker = match mover {
            Mark::X => &mut *x,
            Mark::O => &mut *o,
        };

        let cell = player.choose_move(&board)?;
        board.apply_move(cell)?;
        record.record_move(mover, cell, player.last_evaluation());
        log::info!(
            "{} ({}) plays {} [cell {}]",
            player.name(),
            mover,
            format_move(cell),
            cell
        );
        on_move(&board, mover, cell);
    }

    record.finalize(&board);
    if let Some(outcome) = record.outcome {
        log::info!(
            "game {} over after {} moves: {}",
            record.game_id,
            record.moves.len(),
            outcome
        );
    }
    Ok(record)
}
