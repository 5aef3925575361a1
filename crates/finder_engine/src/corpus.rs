//! Loading the processed team corpus.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::entities::Team;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load the corpus from a processed-data JSON file.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<Team>, CorpusError> {
    let file = File::open(path)?;
    load_corpus_from_reader(BufReader::new(file))
}

/// Load the corpus from any reader producing the processed-data JSON array.
pub fn load_corpus_from_reader(reader: impl Read) -> Result<Vec<Team>, CorpusError> {
    let teams: Vec<Team> = serde_json::from_reader(reader)?;
    log::debug!("loaded {} teams", teams.len());
    Ok(teams)
}
