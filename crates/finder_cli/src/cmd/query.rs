use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use finder_engine::{parse, rank_parsed, suggest, TeamSummary};

use crate::utils;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Free-text instruction, e.g. "a team with Garchomp holding Rocky Helmet"
    pub instruction: String,

    /// Path to the processed corpus JSON
    #[arg(short, long, default_value = "data/processed_data.json")]
    pub data: PathBuf,

    /// Showdown items data file widening the item vocabulary
    #[arg(long)]
    pub items: Option<PathBuf>,

    /// Showdown moves data file widening the move vocabulary
    #[arg(long)]
    pub moves: Option<PathBuf>,

    /// Print results as JSON instead of Poképaste text
    #[arg(long)]
    pub json: bool,

    /// Print the parsed constraints before the results
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn execute(args: QueryArgs) -> Result<()> {
    let corpus = utils::load_corpus_file(&args.data)?;
    let lexicon = utils::build_lexicon(&corpus, args.items.as_ref(), args.moves.as_ref());

    let query = parse(&args.instruction, &lexicon);
    if args.verbose {
        if query.is_empty() {
            eprintln!("(no constraints recognized)");
        }
        for constraint in &query.constraints {
            eprintln!("constraint: {}", constraint);
        }
    }

    let ranking = rank_parsed(&query, &corpus);

    if ranking.low_confidence {
        println!("No strong matches; showing a best-effort team.");
        for word in args.instruction.split_whitespace() {
            if let Some(suggestion) = suggest::closest_pokemon_name(&lexicon, word) {
                println!("Did you mean \"{}\"?", suggestion);
                break;
            }
        }
        println!();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranking.results)?);
    } else {
        for (i, team) in ranking.results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("=== {} ===", team.name);
            println!("{}", render_pokepaste(team));
        }
    }

    if !ranking.unmet.is_empty() {
        println!("\nNot satisfied by any scoring team:");
        for criterion in &ranking.unmet {
            println!("  - {}", criterion);
        }
    }
    Ok(())
}

/// Poképaste export format: `Name @ Item`, ability, Tera type, move lines.
pub fn render_pokepaste(team: &TeamSummary) -> String {
    let mut blocks = Vec::new();
    for p in &team.pokemons {
        let mut block = String::new();
        if p.item != "None" {
            block.push_str(&format!("{} @ {}\n", p.name, p.item));
        } else {
            block.push_str(&format!("{}\n", p.name));
        }
        block.push_str(&format!("Ability: {}\n", p.ability));
        if p.tera_type != "None" {
            block.push_str(&format!("Tera Type: {}\n", p.tera_type));
        }
        for mv in &p.moves {
            block.push_str(&format!("- {}\n", mv.name));
        }
        blocks.push(block.trim_end().to_string());
    }
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use finder_engine::{rank, Lexicon};

    #[test]
    fn test_pokepaste_rendering() {
        let json = r#"[{
            "filename": "demo_team.txt",
            "pokemons": [{
                "name": "Garchomp",
                "item": "Rocky Helmet",
                "ability": "Rough Skin",
                "tera_type": "steel",
                "moves": [{"name": "Earthquake", "type": "ground"}, {"name": "Protect", "type": "normal"}]
            }]
        }]"#;
        let corpus = finder_engine::load_corpus_from_reader(json.as_bytes()).unwrap();
        let lexicon = Lexicon::from_corpus(&corpus);
        let ranking = rank("Garchomp", &lexicon, &corpus);

        let paste = render_pokepaste(&ranking.results[0]);
        assert_eq!(
            paste,
            "Garchomp @ Rocky Helmet\nAbility: Rough Skin\nTera Type: steel\n- Earthquake\n- Protect"
        );
    }
}
