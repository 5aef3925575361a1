//! Longest-match scanning for known names inside free text.
//!
//! Mentions are found with a prefix trie built once from the lexicon: at
//! every word start the deepest terminal with a valid end boundary wins, so
//! "landorus-therian" always beats "landorus" without any per-name scanning.

use std::collections::HashMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: bool,
}

/// Prefix trie over lowercase entity names.
#[derive(Debug, Default)]
pub struct NameTrie {
    root: TrieNode,
}

/// One raw occurrence of a known name: byte offsets into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameHit {
    pub start: usize,
    pub end: usize,
}

impl NameTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a lowercase name.
    pub fn insert(&mut self, name: &str) {
        let mut node = &mut self.root;
        for ch in name.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
    }

    /// All longest matches in `text` (expected lowercase), one per word start.
    pub fn scan(&self, text: &str) -> Vec<NameHit> {
        let mut hits = Vec::new();
        let mut prev: Option<char> = None;
        for (start, ch) in text.char_indices() {
            let word_start = prev.map_or(true, |p| p.is_whitespace() || p == '(');
            if word_start {
                if let Some(end) = self.longest_match_at(text, start) {
                    hits.push(NameHit { start, end });
                }
            }
            prev = Some(ch);
        }
        hits
    }

    fn longest_match_at(&self, text: &str, start: usize) -> Option<usize> {
        let mut node = &self.root;
        let mut best = None;
        for (offset, ch) in text[start..].char_indices() {
            match node.children.get(&ch) {
                Some(next) => {
                    node = next;
                    let end = start + offset + ch.len_utf8();
                    if node.terminal && valid_match_end(text, end) {
                        best = Some(end);
                    }
                }
                None => break,
            }
        }
        best
    }
}

/// A match may end at the end of text, before whitespace or closing
/// punctuation, before a possessive `'s` or a trailing hyphen, or before an
/// optional gender marker.
fn valid_match_end(text: &str, end: usize) -> bool {
    let rest = &text[end..];
    let Some(next) = rest.chars().next() else {
        return true;
    };
    if next.is_whitespace() || matches!(next, ')' | ',' | '.' | '-') {
        return true;
    }
    if rest.starts_with("'s") {
        return true;
    }
    leading_gender_marker(rest).is_some()
}

/// Byte length of an optional leading `(m)`/`(f)` marker (with any leading
/// whitespace), if present.
pub fn leading_gender_marker(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let head = trimmed.get(..3)?;
    if head.eq_ignore_ascii_case("(m)") || head.eq_ignore_ascii_case("(f)") {
        Some(text.len() - trimmed.len() + 3)
    } else {
        None
    }
}

/// Byte ranges of whole-word occurrences of `needle` in `haystack`.
/// Both sides of a hit must be a non-alphanumeric character or the text edge,
/// so "ice" never fires inside "choice" but "steel" still fires in
/// "steel-type".
pub fn find_word_ranges(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .filter(|(start, _)| {
            let before_ok = haystack[..*start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            let after_ok = haystack[start + needle.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            before_ok && after_ok
        })
        .map(|(start, _)| (start, start + needle.len()))
        .collect()
}

pub fn contains_word(haystack: &str, needle: &str) -> bool {
    !find_word_ranges(haystack, needle).is_empty()
}

/// Half-open span overlap.
pub fn spans_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie(names: &[&str]) -> NameTrie {
        let mut trie = NameTrie::new();
        for name in names {
            trie.insert(name);
        }
        trie
    }

    #[test]
    fn test_longest_match_wins() {
        let trie = trie(&["landorus", "landorus-therian"]);
        let hits = trie.scan("a team with landorus-therian tera flying");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], NameHit { start: 12, end: 28 });
    }

    #[test]
    fn test_word_boundaries() {
        let trie = trie(&["mew"]);
        // "mewtwo" must not produce a "mew" hit.
        assert!(trie.scan("a team with mewtwo").is_empty());
        assert_eq!(trie.scan("a team with mew").len(), 1);
        assert_eq!(trie.scan("mew, please").len(), 1);
        assert_eq!(trie.scan("(mew)").len(), 1);
    }

    #[test]
    fn test_possessive_and_hyphen_tails() {
        let trie = trie(&["garchomp"]);
        assert_eq!(trie.scan("garchomp's item").len(), 1);
        assert_eq!(trie.scan("garchomp-led team").len(), 1);
    }

    #[test]
    fn test_gender_marker_tolerated() {
        let trie = trie(&["indeedee"]);
        let hits = trie.scan("indeedee (f) with psychic seed");
        assert_eq!(hits.len(), 1);
        // The marker is not part of the mention span.
        assert_eq!(hits[0].end, "indeedee".len());
    }

    #[test]
    fn test_find_word_ranges() {
        assert_eq!(find_word_ranges("a choice scarf", "ice"), vec![]);
        assert_eq!(find_word_ranges("an ice type", "ice"), vec![(3, 6)]);
        assert_eq!(find_word_ranges("steel-type core", "steel"), vec![(0, 5)]);
        assert_eq!(
            find_word_ranges("u-turn and u-turn", "u-turn"),
            vec![(0, 6), (11, 17)]
        );
    }

    #[test]
    fn test_spans_overlap() {
        assert!(spans_overlap((0, 5), (4, 8)));
        assert!(!spans_overlap((0, 5), (5, 8)));
    }
}
