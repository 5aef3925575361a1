//! Ranking every corpus team against a query and projecting the winners.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;

use crate::core_data::Type;
use crate::entities::{PokemonSlot, Team};
use crate::lexicon::Lexicon;
use crate::parser::{parse, Constraint, ParsedQuery};
use crate::scorer::{evaluate, TeamEvaluation};

/// Display projections keep at most this many moves per roster member.
pub const MAX_DISPLAY_MOVES: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct MoveSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PokemonSummary {
    pub name: String,
    pub ability: String,
    pub item: String,
    pub tera_type: String,
    pub sprite: String,
    pub moves: Vec<MoveSummary>,
}

/// Display-safe projection of one team.
#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub filename: String,
    pub name: String,
    pub pokemons: Vec<PokemonSummary>,
}

/// The outcome of ranking: the tying best teams, whether the match is a
/// low-confidence fallback, and the requested criteria no scoring team met.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub results: Vec<TeamSummary>,
    pub low_confidence: bool,
    pub unmet: Vec<String>,
}

/// Parse an instruction and rank the whole corpus against it.
pub fn rank(instruction: &str, lexicon: &Lexicon, corpus: &[Team]) -> Ranking {
    let query = parse(instruction, lexicon);
    rank_parsed(&query, corpus)
}

/// Rank the corpus against an already-parsed query. One team's scoring fault
/// never affects the batch: it is caught here and scored as 0.
pub fn rank_parsed(query: &ParsedQuery, corpus: &[Team]) -> Ranking {
    let evaluations: Vec<TeamEvaluation> = corpus
        .iter()
        .enumerate()
        .map(|(index, team)| {
            catch_unwind(AssertUnwindSafe(|| evaluate(query, team))).unwrap_or_else(|_| {
                log::warn!(
                    "scoring team {} ({}) failed; counting it as no match",
                    index,
                    team.filename
                );
                TeamEvaluation::zero(query)
            })
        })
        .collect();

    let max_score = evaluations.iter().map(|e| e.score).max().unwrap_or(0);

    if max_score == 0 {
        // No constraint matched anywhere. Fall back to the first team rather
        // than returning nothing, flagged low-confidence.
        return Ranking {
            results: corpus.first().map(summarize).into_iter().collect(),
            low_confidence: true,
            unmet: unmet_constraints(query, &[]),
        };
    }

    let mut met_any = vec![false; query.constraints.len()];
    for evaluation in evaluations.iter().filter(|e| e.score > 0) {
        for (seen, met) in met_any.iter_mut().zip(&evaluation.met) {
            *seen |= met;
        }
    }

    let results = corpus
        .iter()
        .zip(&evaluations)
        .filter(|(_, e)| e.score == max_score)
        .map(|(team, _)| summarize(team))
        .collect();

    Ranking {
        results,
        low_confidence: false,
        unmet: unmet_constraints(query, &met_any),
    }
}

/// Requested criteria that no positively scoring team satisfied. Negations
/// are exclusions, not criteria, and are not reported.
fn unmet_constraints(query: &ParsedQuery, met_any: &[bool]) -> Vec<String> {
    query
        .constraints
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            !matches!(c, Constraint::Negation { .. })
                && !met_any.get(*i).copied().unwrap_or(false)
        })
        .map(|(_, c)| c.to_string())
        .collect()
}

/// Project a team to its display-safe shape.
pub fn summarize(team: &Team) -> TeamSummary {
    let filename = if team.filename.trim().is_empty() {
        "unknown".to_string()
    } else {
        team.filename.clone()
    };
    let name = {
        let display = team.display_name();
        if display.trim().is_empty() {
            "Unknown".to_string()
        } else {
            display
        }
    };
    TeamSummary {
        filename,
        name,
        pokemons: team
            .roster()
            .filter(|slot| !slot.name.trim().is_empty())
            .map(summarize_slot)
            .collect(),
    }
}

fn summarize_slot(slot: &PokemonSlot) -> PokemonSummary {
    let tera_type = match slot.tera_type.as_deref() {
        Some(t) if Type::from_str(t).is_some() => t.to_string(),
        _ => "None".to_string(),
    };
    let moves = slot
        .moves
        .iter()
        .take(MAX_DISPLAY_MOVES)
        .filter(|m| {
            let name = m.name().trim();
            !name.is_empty() && name != "-"
        })
        .map(|m| MoveSummary {
            name: m.name().to_string(),
            type_name: m
                .type_name()
                .map(|t| t.to_lowercase())
                .unwrap_or_else(|| "unknown".to_string()),
        })
        .collect();

    PokemonSummary {
        name: slot.name.clone(),
        ability: display_or_none(slot.ability.as_deref()),
        item: display_or_none(slot.item.as_deref()),
        tera_type,
        sprite: slot
            .sprites
            .as_ref()
            .and_then(|s| s.front_default.clone())
            .unwrap_or_default(),
        moves,
    }
}

fn display_or_none(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MoveSlot, Team};

    fn team_with(filename: &str, name: &str) -> Team {
        let slot = PokemonSlot {
            name: name.to_string(),
            ..Default::default()
        };
        Team {
            filename: filename.to_string(),
            pokemons: vec![Some(slot)],
        }
    }

    #[test]
    fn test_fallback_on_empty_query() {
        let corpus = vec![
            team_with("first_team.txt", "Garchomp"),
            team_with("second_team.txt", "Pikachu"),
        ];
        let lexicon = Lexicon::from_corpus(&corpus);
        let ranking = rank("nothing recognizable here", &lexicon, &corpus);
        assert!(ranking.low_confidence);
        assert_eq!(ranking.results.len(), 1);
        assert_eq!(ranking.results[0].filename, "first_team.txt");
    }

    #[test]
    fn test_empty_corpus_yields_no_results() {
        let lexicon = Lexicon::from_corpus(&[]);
        let ranking = rank("anything", &lexicon, &[]);
        assert!(ranking.low_confidence);
        assert!(ranking.results.is_empty());
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let corpus = vec![
            team_with("a.txt", "Pikachu"),
            team_with("b.txt", "Garchomp"),
            team_with("c.txt", "Garchomp"),
        ];
        let lexicon = Lexicon::from_corpus(&corpus);
        let ranking = rank("a team with Garchomp", &lexicon, &corpus);
        assert!(!ranking.low_confidence);
        let files: Vec<_> = ranking.results.iter().map(|t| t.filename.as_str()).collect();
        assert_eq!(files, vec!["b.txt", "c.txt"]);
    }

    #[test]
    fn test_summary_defaults_and_move_cap() {
        let slot = PokemonSlot {
            name: "Garchomp".to_string(),
            tera_type: Some("NotAType".to_string()),
            moves: vec![
                MoveSlot::Bare("Earthquake".to_string()),
                MoveSlot::Bare("Protect".to_string()),
                MoveSlot::Bare("-".to_string()),
                MoveSlot::Bare("Swords Dance".to_string()),
                MoveSlot::Bare("Dragon Claw".to_string()),
            ],
            ..Default::default()
        };
        let team = Team {
            filename: "my_cool_team.txt".to_string(),
            pokemons: vec![Some(slot), None],
        };
        let summary = summarize(&team);
        assert_eq!(summary.name, "my cool team");
        assert_eq!(summary.pokemons.len(), 1);
        let p = &summary.pokemons[0];
        assert_eq!(p.ability, "None");
        assert_eq!(p.item, "None");
        assert_eq!(p.tera_type, "None");
        // Only the first four entries are considered, placeholders dropped.
        assert_eq!(p.moves.len(), 3);
        assert_eq!(p.moves[0].type_name, "unknown");
    }

    #[test]
    fn test_unmet_reporting() {
        let corpus = vec![team_with("a.txt", "Garchomp")];
        let lexicon = Lexicon::from_corpus(&corpus);
        let ranking = rank("a team with Garchomp holding choice specs", &lexicon, &corpus);
        assert!(!ranking.low_confidence);
        // "choice specs" is not in the lexicon at all here, so the only
        // constraint is the Pokémon itself, which is met.
        assert!(ranking.unmet.is_empty());
    }
}
