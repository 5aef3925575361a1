//! Fixed vocabularies: elemental types, role keywords, size and weight classes.

use crate::entities::BaseStats;

/// Height at or below which a roster member counts as "small" (decimetres).
pub const SMALL_MAX_DM: u32 = 5;
/// Height at or above which a roster member counts as "tall" (decimetres).
pub const TALL_MIN_DM: u32 = 20;
/// Weight at or below which a roster member counts as "light" (hectograms).
pub const LIGHT_MAX_HG: u32 = 100;
/// Weight at or above which a roster member counts as "heavy" (hectograms).
pub const HEAVY_MIN_HG: u32 = 2000;

/// The 19 recognized elemental/Tera types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
    Stellar,
}

impl Type {
    pub const ALL: [Type; 19] = [
        Type::Normal,
        Type::Fighting,
        Type::Flying,
        Type::Poison,
        Type::Ground,
        Type::Rock,
        Type::Bug,
        Type::Ghost,
        Type::Steel,
        Type::Fire,
        Type::Water,
        Type::Grass,
        Type::Electric,
        Type::Psychic,
        Type::Ice,
        Type::Dragon,
        Type::Dark,
        Type::Fairy,
        Type::Stellar,
    ];

    pub fn from_str(s: &str) -> Option<Type> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Type::Normal,
            "fighting" => Type::Fighting,
            "flying" => Type::Flying,
            "poison" => Type::Poison,
            "ground" => Type::Ground,
            "rock" => Type::Rock,
            "bug" => Type::Bug,
            "ghost" => Type::Ghost,
            "steel" => Type::Steel,
            "fire" => Type::Fire,
            "water" => Type::Water,
            "grass" => Type::Grass,
            "electric" => Type::Electric,
            "psychic" => Type::Psychic,
            "ice" => Type::Ice,
            "dragon" => Type::Dragon,
            "dark" => Type::Dark,
            "fairy" => Type::Fairy,
            "stellar" => Type::Stellar,
            _ => return None,
        };
        Some(ty)
    }

    /// Lowercase name as it appears in queries and corpus data.
    pub fn name(self) -> &'static str {
        match self {
            Type::Normal => "normal",
            Type::Fighting => "fighting",
            Type::Flying => "flying",
            Type::Poison => "poison",
            Type::Ground => "ground",
            Type::Rock => "rock",
            Type::Bug => "bug",
            Type::Ghost => "ghost",
            Type::Steel => "steel",
            Type::Fire => "fire",
            Type::Water => "water",
            Type::Grass => "grass",
            Type::Electric => "electric",
            Type::Psychic => "psychic",
            Type::Ice => "ice",
            Type::Dragon => "dragon",
            Type::Dark => "dark",
            Type::Fairy => "fairy",
            Type::Stellar => "stellar",
        }
    }
}

/// Requested team roles, each backed by a base-stat threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Attacker,
    SpecialAttacker,
    Defensive,
    SpeciallyDefensive,
    Speedy,
    Bulky,
    Wall,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Attacker,
        Role::SpecialAttacker,
        Role::Defensive,
        Role::SpeciallyDefensive,
        Role::Speedy,
        Role::Bulky,
        Role::Wall,
    ];

    /// Whole-word phrases that request this role in an instruction.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Role::Attacker => &["strong attacker", "physical attacker", "attacker"],
            Role::SpecialAttacker => &["special attacker", "special attack"],
            Role::Defensive => &["physical defense", "defensive", "defense"],
            Role::SpeciallyDefensive => &["specially defensive", "special defense"],
            Role::Speedy => &["speedy", "fast", "speed"],
            Role::Bulky => &["bulky", "bulk"],
            Role::Wall => &["wall"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Attacker => "attacker",
            Role::SpecialAttacker => "special attacker",
            Role::Defensive => "defensive",
            Role::SpeciallyDefensive => "specially defensive",
            Role::Speedy => "speedy",
            Role::Bulky => "bulky",
            Role::Wall => "wall",
        }
    }

    /// Whether a base-stat spread is good enough to fill this role.
    pub fn satisfied_by(self, stats: &BaseStats) -> bool {
        match self {
            Role::Attacker => stats.attack >= 110,
            Role::SpecialAttacker => stats.special_attack >= 110,
            Role::Defensive => stats.defense >= 100,
            Role::SpeciallyDefensive => stats.special_defense >= 100,
            Role::Speedy => stats.speed >= 100,
            Role::Bulky => stats.hp >= 100,
            Role::Wall => stats.defense >= 110 || stats.special_defense >= 110,
        }
    }
}

/// Size and weight classes for `<N> small|tall|light|heavy` requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureKind {
    Small,
    Tall,
    Light,
    Heavy,
}

impl MeasureKind {
    pub fn from_keyword(word: &str) -> Option<MeasureKind> {
        let kind = match word {
            "small" => MeasureKind::Small,
            "tall" => MeasureKind::Tall,
            "light" => MeasureKind::Light,
            "heavy" => MeasureKind::Heavy,
            _ => return None,
        };
        Some(kind)
    }

    /// Size classes read the height field, weight classes the weight field.
    pub fn is_size(self) -> bool {
        matches!(self, MeasureKind::Small | MeasureKind::Tall)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            MeasureKind::Small => "small",
            MeasureKind::Tall => "tall",
            MeasureKind::Light => "light",
            MeasureKind::Heavy => "heavy",
        }
    }

    /// Whether a roster member with the given measurements qualifies.
    /// A missing measurement never qualifies.
    pub fn admits(self, height: Option<u32>, weight: Option<u32>) -> bool {
        match self {
            MeasureKind::Small => height.map_or(false, |h| h <= SMALL_MAX_DM),
            MeasureKind::Tall => height.map_or(false, |h| h >= TALL_MIN_DM),
            MeasureKind::Light => weight.map_or(false, |w| w <= LIGHT_MAX_HG),
            MeasureKind::Heavy => weight.map_or(false, |w| w >= HEAVY_MIN_HG),
        }
    }
}
