//! The immutable entity-name index built once from the corpus.
//!
//! The corpus is authoritative for Pokémon identity; supplementary item and
//! move vocabularies only add names the corpus does not already carry. After
//! construction the lexicon is read-only and safe to share across any number
//! of parse/score/rank calls.

use std::collections::{BTreeSet, HashMap};

use crate::entities::Team;
use crate::matcher::{NameHit, NameTrie};

#[derive(Debug, Default)]
pub struct Lexicon {
    trie: NameTrie,
    pokemon_names: BTreeSet<String>,
    canonical: HashMap<String, String>,
    /// Items keep corpus encounter order; segment classification takes the
    /// first item that matches.
    items: Vec<String>,
    moves: BTreeSet<String>,
    abilities: BTreeSet<String>,
}

impl Lexicon {
    /// Build from the corpus alone.
    pub fn from_corpus(corpus: &[Team]) -> Self {
        Self::build(corpus, &[], &[])
    }

    /// Build from the corpus plus supplementary item/move vocabularies.
    /// Deterministic and idempotent for identical inputs; supplementary names
    /// are a union, never a replacement.
    pub fn build(corpus: &[Team], extra_items: &[String], extra_moves: &[String]) -> Self {
        let mut pokemon_names = BTreeSet::new();
        let mut canonical: HashMap<String, String> = HashMap::new();
        let mut items = Vec::new();
        let mut seen_items = BTreeSet::new();
        let mut moves = BTreeSet::new();
        let mut abilities = BTreeSet::new();

        for team in corpus {
            for slot in team.roster() {
                let normalized = slot.normalized_name();
                if normalized.is_empty() {
                    continue;
                }
                // First canonical spelling encountered wins.
                canonical
                    .entry(normalized.clone())
                    .or_insert_with(|| slot.canonical_name().to_string());
                pokemon_names.insert(normalized);

                if let Some(ability) = slot.ability.as_deref() {
                    let ability = ability.trim().to_lowercase();
                    if !ability.is_empty() {
                        abilities.insert(ability);
                    }
                }
                if let Some(item) = slot.item.as_deref() {
                    let item = item.trim().to_lowercase();
                    if !item.is_empty() && seen_items.insert(item.clone()) {
                        items.push(item);
                    }
                }
                for mv in &slot.moves {
                    let mv = mv.name().trim().to_lowercase();
                    if !mv.is_empty() {
                        moves.insert(mv);
                    }
                }
            }
        }

        for item in extra_items {
            let item = item.trim().to_lowercase();
            if !item.is_empty() && seen_items.insert(item.clone()) {
                items.push(item);
            }
        }
        for mv in extra_moves {
            let mv = mv.trim().to_lowercase();
            if !mv.is_empty() {
                moves.insert(mv);
            }
        }

        let mut trie = NameTrie::new();
        for name in &pokemon_names {
            trie.insert(name);
        }
        log::debug!(
            "lexicon: {} pokemon, {} items, {} moves, {} abilities",
            pokemon_names.len(),
            items.len(),
            moves.len(),
            abilities.len()
        );

        Lexicon {
            trie,
            pokemon_names,
            canonical,
            items,
            moves,
            abilities,
        }
    }

    /// All longest-match name occurrences in a lowercase text.
    pub fn scan_names(&self, lowered: &str) -> Vec<NameHit> {
        self.trie.scan(lowered)
    }

    /// Canonical display form of a normalized-lowercase name.
    pub fn canonical_of(&self, normalized: &str) -> Option<&str> {
        self.canonical.get(normalized).map(String::as_str)
    }

    pub fn is_pokemon(&self, name: &str) -> bool {
        self.pokemon_names.contains(name)
    }

    pub fn is_item(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    pub fn is_move(&self, name: &str) -> bool {
        self.moves.contains(name)
    }

    pub fn is_ability(&self, name: &str) -> bool {
        self.abilities.contains(name)
    }

    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_names.iter().map(String::as_str)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn moves(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(String::as_str)
    }

    pub fn abilities(&self) -> impl Iterator<Item = &str> {
        self.abilities.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon_names.is_empty()
            && self.items.is_empty()
            && self.moves.is_empty()
            && self.abilities.is_empty()
    }
}
