use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::models::{CorpusReport, PokemonUsage};
use crate::utils;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the processed corpus JSON
    #[arg(short, long, default_value = "data/processed_data.json")]
    pub data: PathBuf,

    /// Showdown items data file widening the item vocabulary
    #[arg(long)]
    pub items: Option<PathBuf>,

    /// Showdown moves data file widening the move vocabulary
    #[arg(long)]
    pub moves: Option<PathBuf>,

    /// How many most-used Pokémon to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let corpus = utils::load_corpus_file(&args.data)?;
    let lexicon = utils::build_lexicon(&corpus, args.items.as_ref(), args.moves.as_ref());

    // Roster slots per normalized name across the whole corpus.
    let mut usage: HashMap<String, u32> = HashMap::new();
    for team in &corpus {
        for slot in team.roster() {
            let normalized = slot.normalized_name();
            if !normalized.is_empty() {
                *usage.entry(normalized).or_insert(0) += 1;
            }
        }
    }
    let mut most_used: Vec<PokemonUsage> = usage
        .into_iter()
        .map(|(normalized, count)| PokemonUsage {
            name: lexicon
                .canonical_of(&normalized)
                .unwrap_or(normalized.as_str())
                .to_string(),
            slots: count,
        })
        .collect();
    most_used.sort_by(|a, b| b.slots.cmp(&a.slots).then(a.name.cmp(&b.name)));
    most_used.truncate(args.top);

    let report = CorpusReport {
        teams: corpus.len(),
        pokemon: lexicon.pokemon_names().count(),
        items: lexicon.items().count(),
        moves: lexicon.moves().count(),
        abilities: lexicon.abilities().count(),
        most_used,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== Corpus Summary ===");
    println!("Teams:     {}", report.teams);
    println!("Pokémon:   {}", report.pokemon);
    println!("Items:     {}", report.items);
    println!("Moves:     {}", report.moves);
    println!("Abilities: {}", report.abilities);
    if !report.most_used.is_empty() {
        println!("\nMost used:");
        for usage in &report.most_used {
            println!("  {:<24} {} slots", usage.name, usage.slots);
        }
    }
    println!("======================");
    Ok(())
}
