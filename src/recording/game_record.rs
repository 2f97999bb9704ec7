//! Game record data structures.
//!
//! A record captures who played which mark, every move in order and how the
//! game ended. Records are saved as JSON by the `squava` binary.

use crate::game::{Board, Mark, Outcome};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Type of player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    Human,
    Uct,
    Random,
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerType::Human => write!(f, "Human"),
            PlayerType::Uct => write!(f, "UCT"),
            PlayerType::Random => write!(f, "Random"),
        }
    }
}

/// Record of a single player in the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub player_type: PlayerType,
    pub mark: Mark,
}

/// Record of a single move in the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Ply number, starting at 0
    pub turn: usize,
    pub mark: Mark,
    /// Cell index 0-24
    pub cell: usize,
    /// Engine's mean score for the move, if an engine chose it
    pub evaluation: Option<f64>,
}

/// Complete record of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    /// Game start, seconds since the Unix epoch
    pub timestamp: i64,
    /// Game mode (e.g. "human_vs_uct", "self_play")
    pub game_mode: String,
    pub players: Vec<PlayerRecord>,
    pub moves: Vec<MoveRecord>,
    /// Set by `finalize`
    pub outcome: Option<Outcome>,
    /// Final position in `Board`'s text layout
    pub final_board: String,
}

impl GameRecord {
    pub fn new(game_id: String, game_mode: String) -> Self {
        Self {
            game_id,
            timestamp: chrono::Utc::now().timestamp(),
            game_mode,
            players: Vec::new(),
            moves: Vec::new(),
            outcome: None,
            final_board: String::new(),
        }
    }

    pub fn add_player(&mut self, name: String, player_type: PlayerType, mark: Mark) {
        self.players.push(PlayerRecord {
            name,
            player_type,
            mark,
        });
    }

    pub fn record_move(&mut self, mark: Mark, cell: usize, evaluation: Option<f64>) {
        self.moves.push(MoveRecord {
            turn: self.moves.len(),
            mark,
            cell,
            evaluation,
        });
    }

    pub fn finalize(&mut self, board: &Board) {
        self.outcome = board.outcome();
        self.final_board = board.to_string();
    }

    pub fn winner(&self) -> Option<&PlayerRecord> {
        let mark = self.outcome?.winner()?;
        self.players.iter().find(|p| p.mark == mark)
    }

    /// Rebuilds the final position from the move list.
    pub fn replay(&self) -> Result<Board> {
        let cells: Vec<usize> = self.moves.iter().map(|m| m.cell).collect();
        Board::from_moves(&cells)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
