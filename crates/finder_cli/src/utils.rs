use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use finder_engine::{load_corpus, Lexicon, Team};

use crate::vocab;

pub fn load_corpus_file(path: &Path) -> Result<Vec<Team>> {
    load_corpus(path).with_context(|| format!("loading corpus from {}", path.display()))
}

/// Best-effort vocabulary load: a missing or unreadable file only narrows
/// the lexicon, it never stops a query.
pub fn load_vocab_file(path: Option<&PathBuf>, what: &str) -> Vec<String> {
    let Some(path) = path else {
        return Vec::new();
    };
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let names = vocab::extract_names(&text);
            log::info!("{} vocabulary: {} names from {}", what, names.len(), path.display());
            names
        }
        Err(err) => {
            log::warn!(
                "could not read {} vocabulary {}: {}",
                what,
                path.display(),
                err
            );
            Vec::new()
        }
    }
}

pub fn build_lexicon(
    corpus: &[Team],
    items: Option<&PathBuf>,
    moves: Option<&PathBuf>,
) -> Lexicon {
    let extra_items = load_vocab_file(items, "item");
    let extra_moves = load_vocab_file(moves, "move");
    Lexicon::build(corpus, &extra_items, &extra_moves)
}
