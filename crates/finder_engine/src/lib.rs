//! finder_engine - instruction understanding and team scoring over a fixed
//! corpus of pre-built competitive team compositions.
//!
//! A free-text query ("a team with Landorus-Therian holding Choice Scarf,
//! tera steel") is parsed against a corpus-derived lexicon into a typed
//! constraint set, every team is scored against it, and the tying best teams
//! come back as display-safe projections. Everything after the one-time
//! corpus load is synchronous, lock-free, and read-only.

/// Fixed vocabularies: types, roles, size and weight classes
pub mod core_data;

/// Corpus loading
pub mod corpus;

/// Team and roster records
pub mod entities;

/// Corpus-derived entity-name index
pub mod lexicon;

/// Longest-match name scanning
pub mod matcher;

/// Instruction parsing into constraints
pub mod parser;

/// Corpus-wide ranking and result projection
pub mod ranker;

/// Per-team scoring
pub mod scorer;

/// Closest-name suggestions
pub mod suggest;

// Re-export commonly used types
pub use core_data::{MeasureKind, Role, Type};
pub use corpus::{load_corpus, load_corpus_from_reader, CorpusError};
pub use entities::{PokemonSlot, Team};
pub use lexicon::Lexicon;
pub use parser::{parse, Constraint, ParsedQuery, PokemonMention};
pub use ranker::{rank, rank_parsed, Ranking, TeamSummary};
pub use scorer::{evaluate, score, TeamEvaluation};
pub use suggest::closest_pokemon_name;
