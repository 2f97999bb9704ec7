use crate::game::game_state::GameState;
use crate::game::lines::{find_completed_loss, find_completed_win};
use crate::game::mark::{Cell, Mark};
use crate::{Result, SquavaError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BOARD_SIDE: usize = 5;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The mark completed four in a row.
    Win(Mark),
    /// The mark completed three in a row without a four.
    Loss(Mark),
    /// The board filled up with no line for either side.
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            Outcome::Loss(mark) => Some(mark.opponent()),
            Outcome::Draw => None,
        }
    }

    /// 1.0 for a win, 0.0 for a loss, 0.5 for a draw.
    pub fn score_for(self, viewpoint: Mark) -> f64 {
        match self.winner() {
            Some(mark) if mark == viewpoint => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(mark) => write!(f, "{} wins with four in a row", mark),
            Outcome::Loss(mark) => write!(f, "{} loses with three in a row", mark),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// A Squava position: 25 cells, row-major, plus the mark that moved last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    last_mover: Mark,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board. `O` counts as the last mover so that `X` opens.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            last_mover: Mark::O,
        }
    }

    /// Replays `moves` from the empty board.
    pub fn from_moves(moves: &[usize]) -> Result<Self> {
        let mut board = Self::new();
        for &mv in moves {
            board.apply_move(mv)?;
        }
        Ok(board)
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn last_mover(&self) -> Mark {
        self.last_mover
    }

    pub fn to_move(&self) -> Mark {
        self.last_mover.opponent()
    }

    pub fn mark_count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Occupied(mark))
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Terminal classification. Four in a row is checked before three in a
    /// row, so a move completing both counts as a win.
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(mark) = find_completed_win(&self.cells) {
            return Some(Outcome::Win(mark));
        }
        if let Some(mark) = find_completed_loss(&self.cells) {
            return Some(Outcome::Loss(mark));
        }
        self.is_full().then_some(Outcome::Draw)
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Empty cells in ascending order, or nothing once the game is over.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.is_empty().then_some(i))
            .collect()
    }

    /// Places the mark of the player to move on `index`.
    pub fn apply_move(&mut self, index: usize) -> Result<()> {
        let cell = self.cell(index).ok_or(SquavaError::CellOutOfRange(index))?;
        if self.is_terminal() {
            return Err(SquavaError::GameOver);
        }
        if !cell.is_empty() {
            return Err(SquavaError::CellOccupied(index));
        }

        let mover = self.to_move();
        self.cells[index] = Cell::Occupied(mover);
        self.last_mover = mover;
        Ok(())
    }

    /// Score of the finished game for `viewpoint`: 1.0 win, 0.0 loss, 0.5 draw.
    ///
    /// # Panics
    /// Panics if the game is not over. A state reported terminal always
    /// carries a line or a full board, so reaching the panic means terminal
    /// detection and scoring disagree.
    pub fn result(&self, viewpoint: Mark) -> f64 {
        match self.outcome() {
            Some(outcome) => outcome.score_for(viewpoint),
            None => panic!("result() requested for an unfinished game:\n{}", self),
        }
    }
}

impl GameState for Board {
    type Move = usize;
    type Player = Mark;

    fn player_just_moved(&self) -> Mark {
        self.last_mover
    }

    fn legal_moves(&self) -> Vec<usize> {
        Board::legal_moves(self)
    }

    fn apply_move(&mut self, mv: usize) -> Result<()> {
        Board::apply_move(self, mv)
    }

    fn result(&self, viewpoint: Mark) -> f64 {
        Board::result(self, viewpoint)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIDE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        for (row, cells) in self.cells.chunks(BOARD_SIDE).enumerate() {
            write!(f, "{} ", row)?;
            for cell in cells {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses 25 cells written as `X`, `O` and `_` (or `.`). Whitespace and
/// digits are skipped, so the `Display` output parses back.
impl FromStr for Board {
    type Err = SquavaError;

    fn from_str(s: &str) -> Result<Self> {
        let mut cells = [Cell::Empty; CELL_COUNT];
        let mut filled = 0;

        for ch in s.chars().filter(|c| !c.is_whitespace() && !c.is_ascii_digit()) {
            let cell = match ch {
                'X' | 'x' => Cell::Occupied(Mark::X),
                'O' | 'o' => Cell::Occupied(Mark::O),
                '_' | '.' => Cell::Empty,
                other => {
                    return Err(SquavaError::InvalidBoard(format!(
                        "unexpected character {:?}",
                        other
                    )))
                }
            };
            if filled == CELL_COUNT {
                return Err(SquavaError::InvalidBoard(format!(
                    "more than {} cells",
                    CELL_COUNT
                )));
            }
            cells[filled] = cell;
            filled += 1;
        }

        if filled != CELL_COUNT {
            return Err(SquavaError::InvalidBoard(format!(
                "expected {} cells, found {}",
                CELL_COUNT, filled
            )));
        }

        let mut board = Board {
            cells,
            last_mover: Mark::O,
        };
        let xs = board.mark_count(Mark::X);
        let os = board.mark_count(Mark::O);
        board.last_mover = if xs == os {
            Mark::O
        } else if xs == os + 1 {
            Mark::X
        } else {
            return Err(SquavaError::InvalidBoard(format!(
                "{} X marks and {} O marks cannot arise from alternating play",
                xs, os
            )));
        };
        Ok(board)
    }
}
