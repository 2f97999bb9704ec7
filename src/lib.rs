//! # Squava Game Library
//!
//! Rule engine and Monte Carlo Tree Search player for Squava, a 5x5
//! connection game: four of your marks in a row wins, three in a row loses.
//!
//! ## Features
//!
//! - **Game Engine**: board state, legal moves, terminal detection and scoring
//! - **AI Engine**: UCT Monte Carlo Tree Search written against the [`GameState`] trait
//! - **Driver**: human, random and UCT players plus a game loop
//! - **Recording**: JSON game records and CSV arena results
//!
//! ## Usage
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use squava::{game::Board, mcts::algorithm::search};
//!
//! let board = Board::new();
//! let mut rng = StdRng::seed_from_u64(7);
//! let mv = search(&board, 200, &mut rng).unwrap();
//! assert!(board.legal_moves().contains(&mv));
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Monte Carlo Tree Search AI engine
pub mod mcts;

/// Players and the game loop
pub mod play;

/// Game records and result files
pub mod recording;

/// Logger setup shared by the binaries
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::{Board, Cell, GameState, Mark, Outcome};
pub use mcts::{SearchConfig, SearchReport};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Squava library
#[derive(Debug, thiserror::Error)]
pub enum SquavaError {
    #[error("cell {0} is outside the 5x5 board")]
    CellOutOfRange(usize),

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("move is not an untried move of this node")]
    MoveNotUntried,

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid move input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SquavaError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
