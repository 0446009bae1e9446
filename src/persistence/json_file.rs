// src/persistence/json_file.rs
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::Path;

use crate::domain::{Player, RepositoryError, Team};

/// On-disk snapshot of the tournament roster: every team with its ledger
/// totals and every player with any assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

pub fn read_roster<P: AsRef<Path>>(path: P) -> Result<Roster, RepositoryError> {
    let file = File::open(path).map_err(|e| RepositoryError::Io(format!("failed to open roster: {}", e)))?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader)
        .map_err(|e| RepositoryError::Serialization(format!("failed to parse roster: {}", e)))
}

pub fn write_roster<P: AsRef<Path>>(path: P, roster: &Roster) -> Result<(), RepositoryError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| RepositoryError::Io(format!("failed to open roster for writing: {}", e)))?;

    let json = serde_json::to_string_pretty(roster)
        .map_err(|e| RepositoryError::Serialization(format!("failed to serialize roster: {}", e)))?;

    file.write_all(json.as_bytes())
        .map_err(|e| RepositoryError::Io(format!("failed to write roster: {}", e)))?;

    Ok(())
}
