pub mod board;
pub mod game_state;
pub mod lines;
pub mod mark;

pub use board::{Board, Outcome, BOARD_SIDE, CELL_COUNT};
pub use game_state::GameState;
pub use mark::{Cell, Mark};
