//! Extraction of entity names from Showdown-style data blobs.
//!
//! The supplementary vocabularies are JavaScript data files of the form
//! `exports.BattleItems = { itemid: { name: "Item Name", ... }, ... };`.
//! Only the declared names matter here; everything else is ignored.

use regex::Regex;

/// Lowercased, deduplicated `name:"…"` declarations from a data blob.
pub fn extract_names(text: &str) -> Vec<String> {
    let pattern = Regex::new(r#"name:\s*"([^"]+)""#).expect("name pattern is valid");
    let mut names: Vec<String> = pattern
        .captures_iter(text)
        .map(|captures| captures[1].to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_declared_names() {
        let blob = r#"exports.BattleItems = {
            choicescarf: {name: "Choice Scarf", spritenum: 69},
            rockyhelmet: {name:"Rocky Helmet", fling: {basePower: 60}},
        };"#;
        assert_eq!(
            extract_names(blob),
            vec!["choice scarf".to_string(), "rocky helmet".to_string()]
        );
    }

    #[test]
    fn test_empty_blob_yields_nothing() {
        assert!(extract_names("var nothing = 1;").is_empty());
    }
}
