//! Flat-text scoreboard
//!
//! Successful landings are appended to a plain text file, one record per
//! line as `<name> <bounces> <seconds>`. The file is opened, touched and
//! closed inside each operation; there is no long-lived handle.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// One recorded landing. Never mutated after being written.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    /// Entry name, a single whitespace-free token
    pub name: String,
    /// Bounce count; stored as a real but semantically an integer
    pub bounces: f64,
    /// Elapsed descent time in seconds
    pub seconds: f64,
}

/// Handle to the scoreboard file path.
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file if needed. Each entry is
    /// preceded by a line separator.
    pub fn append(&self, record: &ScoreRecord) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        write!(
            file,
            "\n{} {} {}",
            record.name, record.bounces, record.seconds
        )?;
        log::info!("recorded landing for {} in {}", record.name, self.path.display());
        Ok(())
    }

    /// Load every record in file order.
    pub fn load_all(&self) -> io::Result<Vec<ScoreRecord>> {
        let mut text = String::new();
        File::open(&self.path)?.read_to_string(&mut text)?;
        Ok(parse_records(&text))
    }
}

/// Whitespace-token parse of (name, bounces, seconds) triples.
///
/// Reading stops at the first triple that is incomplete or fails to
/// parse, leaving the rest of the input unconsumed; anything already
/// parsed is kept.
fn parse_records(text: &str) -> Vec<ScoreRecord> {
    let mut records = Vec::new();
    let mut tokens = text.split_whitespace();
    while let Some(name) = tokens.next() {
        let bounces = tokens.next().and_then(|t| t.parse::<f64>().ok());
        let seconds = tokens.next().and_then(|t| t.parse::<f64>().ok());
        match (bounces, seconds) {
            (Some(bounces), Some(seconds)) => records.push(ScoreRecord {
                name: name.to_string(),
                bounces,
                seconds,
            }),
            _ => {
                log::warn!(
                    "scoreboard parse stopped after {} records (malformed entry at {:?})",
                    records.len(),
                    name
                );
                break;
            }
        }
    }
    records
}

/// Order records for display: elapsed seconds ascending, stable.
///
/// The historical implementation sorted by bounces and then stably
/// re-sorted the result by time, which is observably identical to this
/// single time sort.
pub fn sort_for_display(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
}
