//! Corpus records: teams and roster slots as loaded from the processed data.
//!
//! The corpus is an already-deserialized sequence of teams; nothing here is
//! mutated after loading. Field names follow the processed JSON, including
//! the hyphenated stat keys.

use serde::Deserialize;

/// One pre-built team composition. Identity is the source filename.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub filename: String,
    /// Roster entries can be `null` in malformed data; they are skipped
    /// everywhere via [`Team::roster`].
    #[serde(default)]
    pub pokemons: Vec<Option<PokemonSlot>>,
}

impl Team {
    /// The valid roster slots, in order.
    pub fn roster(&self) -> impl Iterator<Item = &PokemonSlot> {
        self.pokemons.iter().filter_map(|slot| slot.as_ref())
    }

    /// Human-readable team name derived from the filename stem.
    pub fn display_name(&self) -> String {
        let stem = self
            .filename
            .split('.')
            .next()
            .unwrap_or(self.filename.as_str());
        stem.replace('_', " ")
    }
}

/// One roster member with the fields the scorer reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PokemonSlot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub tera_type: Option<String>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Height in decimetres.
    #[serde(default)]
    pub height: Option<u32>,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub stats: BaseStats,
    #[serde(default)]
    pub sprites: Option<Sprites>,
}

impl PokemonSlot {
    /// Lowercase comparison key: display name minus any gender marker.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Case-preserving display form with any gender marker stripped.
    pub fn canonical_name(&self) -> &str {
        strip_gender_marker(&self.name)
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.item
            .as_deref()
            .map_or(false, |i| i.trim().to_lowercase() == item)
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.ability
            .as_deref()
            .map_or(false, |a| a.trim().to_lowercase() == ability)
    }

    pub fn has_tera(&self, tera: &str) -> bool {
        self.tera_type
            .as_deref()
            .map_or(false, |t| t.trim().to_lowercase() == tera)
    }

    pub fn has_move(&self, mv: &str) -> bool {
        self.moves.iter().any(|m| m.name().trim().to_lowercase() == mv)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types
            .iter()
            .any(|t| t.trim().to_lowercase() == type_name)
    }
}

/// A learned move. The corpus stores detailed move objects, but older dumps
/// carry bare name strings; both shapes deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MoveSlot {
    Detailed {
        #[serde(default)]
        name: String,
        #[serde(default, rename = "type")]
        type_name: Option<String>,
    },
    Bare(String),
}

impl MoveSlot {
    pub fn name(&self) -> &str {
        match self {
            MoveSlot::Detailed { name, .. } => name,
            MoveSlot::Bare(name) => name,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            MoveSlot::Detailed { type_name, .. } => type_name.as_deref(),
            MoveSlot::Bare(_) => None,
        }
    }
}

/// Base stat spread. Missing stats default to 0 and simply fail thresholds.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BaseStats {
    #[serde(default)]
    pub hp: u16,
    #[serde(default)]
    pub attack: u16,
    #[serde(default)]
    pub defense: u16,
    #[serde(default, rename = "special-attack")]
    pub special_attack: u16,
    #[serde(default, rename = "special-defense")]
    pub special_defense: u16,
    #[serde(default)]
    pub speed: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
}

/// Strip a trailing `(M)`/`(F)` gender marker, case-insensitively.
pub fn strip_gender_marker(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.len() >= 3 {
        if let Some(tail) = trimmed.get(trimmed.len() - 3..) {
            if tail.eq_ignore_ascii_case("(m)") || tail.eq_ignore_ascii_case("(f)") {
                return trimmed[..trimmed.len() - 3].trim_end();
            }
        }
    }
    trimmed
}

/// Lowercase comparison key for a display name.
pub fn normalize_name(name: &str) -> String {
    strip_gender_marker(name).to_lowercase()
}
