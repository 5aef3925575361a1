//! Shared fixture builders for the integration tests.

use finder_engine::entities::{BaseStats, MoveSlot, PokemonSlot, Team};

pub fn team(filename: &str, slots: Vec<PokemonSlot>) -> Team {
    Team {
        filename: filename.to_string(),
        pokemons: slots.into_iter().map(Some).collect(),
    }
}

/// Builder for roster slots; only the fields a test cares about get set.
pub struct SlotBuilder {
    slot: PokemonSlot,
}

pub fn pokemon(name: &str) -> SlotBuilder {
    SlotBuilder {
        slot: PokemonSlot {
            name: name.to_string(),
            ..Default::default()
        },
    }
}

impl SlotBuilder {
    pub fn item(mut self, item: &str) -> Self {
        self.slot.item = Some(item.to_string());
        self
    }

    pub fn ability(mut self, ability: &str) -> Self {
        self.slot.ability = Some(ability.to_string());
        self
    }

    pub fn tera(mut self, tera: &str) -> Self {
        self.slot.tera_type = Some(tera.to_string());
        self
    }

    pub fn moves(mut self, moves: &[&str]) -> Self {
        self.slot.moves = moves
            .iter()
            .map(|m| MoveSlot::Detailed {
                name: m.to_string(),
                type_name: None,
            })
            .collect();
        self
    }

    pub fn types(mut self, types: &[&str]) -> Self {
        self.slot.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn height(mut self, decimetres: u32) -> Self {
        self.slot.height = Some(decimetres);
        self
    }

    pub fn weight(mut self, hectograms: u32) -> Self {
        self.slot.weight = Some(hectograms);
        self
    }

    pub fn stats(mut self, hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> Self {
        self.slot.stats = BaseStats {
            hp,
            attack: atk,
            defense: def,
            special_attack: spa,
            special_defense: spd,
            speed: spe,
        };
        self
    }

    pub fn build(self) -> PokemonSlot {
        self.slot
    }
}
