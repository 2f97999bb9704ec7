//! CSV writer for arena results.
//!
//! One row per finished game, appended to a single file. The header is
//! written only when the file is created.
//! Format: timestamp,game_id,x_player,o_player,moves,outcome,winner

use crate::game::Mark;
use crate::recording::game_record::GameRecord;
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// One CSV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaRow {
    pub timestamp: String,
    pub game_id: String,
    pub x_player: String,
    pub o_player: String,
    pub moves: usize,
    pub outcome: String,
    /// Name of the winning player, empty on a draw
    pub winner: String,
}

impl ArenaRow {
    pub fn from_record(record: &GameRecord) -> Self {
        let name_for = |mark: Mark| {
            record
                .players
                .iter()
                .find(|p| p.mark == mark)
                .map(|p| p.name.clone())
                .unwrap_or_default()
        };

        Self {
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            game_id: record.game_id.clone(),
            x_player: name_for(Mark::X),
            o_player: name_for(Mark::O),
            moves: record.moves.len(),
            outcome: record
                .outcome
                .map(|o| o.to_string())
                .unwrap_or_else(|| "unfinished".to_string()),
            winner: record.winner().map(|p| p.name.clone()).unwrap_or_default(),
        }
    }
}

pub struct CsvWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvWriter {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file_exists = path.exists() && fs::metadata(&path)?.len() > 0;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(!file_exists)
            .from_writer(file);

        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_game(&mut self, record: &GameRecord) -> Result<()> {
        self.writer.serialize(ArenaRow::from_record(record))?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn load_arena_rows<P: AsRef<Path>>(path: P) -> Result<Vec<ArenaRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
