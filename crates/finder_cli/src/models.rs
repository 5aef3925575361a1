use serde::Serialize;

#[derive(Serialize, Default, Clone)]
pub struct CorpusReport {
    pub teams: usize,
    pub pokemon: usize,
    pub items: usize,
    pub moves: usize,
    pub abilities: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub most_used: Vec<PokemonUsage>,
}

#[derive(Serialize, Clone)]
pub struct PokemonUsage {
    pub name: String,
    pub slots: u32,
}
