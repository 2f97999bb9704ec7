//! Game recording module.
//!
//! # Components
//!
//! - `game_record`: Data structures for game records (JSON)
//! - `csv_writer`: CSV output for arena results

pub mod csv_writer;
pub mod game_record;

pub use csv_writer::{load_arena_rows, ArenaRow, CsvWriter};
pub use game_record::{GameRecord, MoveRecord, PlayerRecord, PlayerType};
