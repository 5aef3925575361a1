//! Closest-name lookup for "did you mean" suggestions.
//!
//! The query is never rewritten; callers decide what to do with a
//! suggestion. Distance is plain Levenshtein with a small cutoff, and common
//! filler words are never matched against the name list.

use crate::lexicon::Lexicon;

/// Words that never get a suggestion (fillers and query keywords).
const IGNORED_WORDS: &[&str] = &[
    "a", "an", "the", "and", "with", "holding", "team", "i", "want", "like",
    "need", "looking", "for", "that", "has", "have", "had", "my", "can", "give", "me",
    "your", "our", "their", "this", "these", "those", "some", "any", "about",
    "all", "every", "each", "which", "what", "when", "where", "why", "find",
    "how", "many", "much", "more", "less", "most", "least", "only", "show",
    "just", "also", "too", "very", "really", "quite", "somewhat", "tera",
    "rather", "type", "types", "move", "moves", "ability", "abilities", "item", "items",
    "of", "in", "out", "on", "off", "up", "down", "at", "by", "via", "per",
    "as", "is", "are", "was", "were", "be", "been", "being", "it", "its",
    "no", "not", "nor", "or", "but", "so", "if", "then", "than",
];

/// Edit distance between two phrases, compared trimmed and lower-cased.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.trim().to_lowercase().chars().collect();
    let b: Vec<char> = b.trim().to_lowercase().chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            current[j] = (prev[j] + 1)
                .min(current[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

/// Closest known Pokémon name to an input phrase, as its canonical spelling.
/// Returns nothing for filler words, out-of-range lengths, names that are
/// already known, or anything further than two edits away.
pub fn closest_pokemon_name<'a>(lexicon: &'a Lexicon, phrase: &str) -> Option<&'a str> {
    let input = phrase.trim().to_lowercase();
    let input_chars = input.chars().count();
    if input_chars < 2 || input_chars > 30 || IGNORED_WORDS.contains(&input.as_str()) {
        return None;
    }
    if lexicon.is_pokemon(&input) {
        return None;
    }

    let mut best: Option<(&str, usize)> = None;
    for name in lexicon.pokemon_names() {
        let min_distance = best.map_or(3, |(_, d)| d);
        // Cheap length pruning before computing the full distance.
        if name.chars().count().abs_diff(input_chars) > min_distance + 1 {
            continue;
        }
        let distance = levenshtein(&input, name);
        if distance < min_distance {
            best = Some((name, distance));
        }
    }
    best.map(|(name, _)| lexicon.canonical_of(name).unwrap_or(name))
}
