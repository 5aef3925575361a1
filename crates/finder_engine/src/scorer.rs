//! Additive scoring of one team against a parsed query.
//!
//! Pure functions over immutable data: no I/O, no locks, no fatal paths.
//! Missing roster fields are simply non-matching.

use crate::entities::{PokemonSlot, Team};
use crate::parser::{Constraint, NegationKind, ParsedQuery};

pub const POINTS_POKEMON: u32 = 100;
pub const POINTS_POKEMON_ITEM: u32 = 50;
pub const POINTS_POKEMON_TERA: u32 = 50;
pub const POINTS_POKEMON_ABILITY: u32 = 50;
pub const POINTS_POKEMON_MOVE: u32 = 25;
pub const POINTS_MEASURE: u32 = 40;
pub const POINTS_GENERAL_MOVE: u32 = 15;
pub const POINTS_GENERAL_ABILITY: u32 = 15;
pub const POINTS_TYPE_ROLE: u32 = 20;
pub const POINTS_GENERAL_TYPE: u32 = 5;
pub const POINTS_GENERAL_ROLE: u32 = 10;

/// Score plus which constraints this team satisfied, index-aligned with
/// `query.constraints`.
#[derive(Debug, Clone)]
pub struct TeamEvaluation {
    pub score: u32,
    pub met: Vec<bool>,
}

impl TeamEvaluation {
    pub fn zero(query: &ParsedQuery) -> Self {
        TeamEvaluation {
            score: 0,
            met: vec![false; query.constraints.len()],
        }
    }
}

/// Non-negative match score for one team.
pub fn score(query: &ParsedQuery, team: &Team) -> u32 {
    evaluate(query, team).score
}

/// Score a team and record per-constraint satisfaction. A violated negation
/// disqualifies the team outright: it scores 0 and can never win.
pub fn evaluate(query: &ParsedQuery, team: &Team) -> TeamEvaluation {
    let mut evaluation = TeamEvaluation::zero(query);

    for constraint in &query.constraints {
        if let Constraint::Negation { kind, term } = constraint {
            if negation_violated(team, *kind, term) {
                return evaluation;
            }
        }
    }

    for (i, constraint) in query.constraints.iter().enumerate() {
        let points = constraint_points(constraint, team);
        if points > 0 {
            evaluation.score += points;
            evaluation.met[i] = true;
        }
    }
    evaluation
}

/// One constraint's contribution: points times matching roster slots, except
/// size/weight requests, which are satisfied-or-not against their threshold.
fn constraint_points(constraint: &Constraint, team: &Team) -> u32 {
    match constraint {
        Constraint::Pokemon { normalized, .. } => {
            POINTS_POKEMON * count_slots(team, |s| s.normalized_name() == *normalized)
        }
        Constraint::PokemonItem { pokemon, item } => {
            POINTS_POKEMON_ITEM
                * count_slots(team, |s| s.normalized_name() == *pokemon && s.has_item(item))
        }
        Constraint::PokemonTera { pokemon, tera } => {
            POINTS_POKEMON_TERA
                * count_slots(team, |s| {
                    s.normalized_name() == *pokemon && s.has_tera(tera.name())
                })
        }
        Constraint::PokemonAbility { pokemon, ability } => {
            POINTS_POKEMON_ABILITY
                * count_slots(team, |s| {
                    s.normalized_name() == *pokemon && s.has_ability(ability)
                })
        }
        Constraint::PokemonMove { pokemon, mv } => {
            POINTS_POKEMON_MOVE
                * count_slots(team, |s| s.normalized_name() == *pokemon && s.has_move(mv))
        }
        Constraint::Measure { kind, min_count } => {
            let qualifying = count_slots(team, |s| kind.admits(s.height, s.weight));
            if qualifying as usize >= *min_count {
                POINTS_MEASURE
            } else {
                0
            }
        }
        Constraint::GeneralMove(mv) => {
            POINTS_GENERAL_MOVE * count_slots(team, |s| s.has_move(mv))
        }
        Constraint::GeneralAbility(ability) => {
            POINTS_GENERAL_ABILITY * count_slots(team, |s| s.has_ability(ability))
        }
        Constraint::TypeRole { type_, role } => {
            POINTS_TYPE_ROLE
                * count_slots(team, |s| {
                    s.has_type(type_.name()) && role.satisfied_by(&s.stats)
                })
        }
        Constraint::GeneralType(ty) => {
            POINTS_GENERAL_TYPE * count_slots(team, |s| s.has_type(ty.name()))
        }
        Constraint::GeneralRole(role) => {
            POINTS_GENERAL_ROLE * count_slots(team, |s| role.satisfied_by(&s.stats))
        }
        Constraint::Negation { .. } => 0,
    }
}

fn count_slots(team: &Team, pred: impl Fn(&PokemonSlot) -> bool) -> u32 {
    team.roster().filter(|slot| pred(slot)).count() as u32
}

fn negation_violated(team: &Team, kind: NegationKind, term: &str) -> bool {
    match kind {
        NegationKind::Pokemon => team.roster().any(|s| s.normalized_name() == term),
        NegationKind::Item => team.roster().any(|s| s.has_item(term)),
        NegationKind::Ability => team.roster().any(|s| s.has_ability(term)),
        NegationKind::Move => team.roster().any(|s| s.has_move(term)),
        NegationKind::Type => team
            .roster()
            .any(|s| s.has_type(term) || s.has_tera(term)),
        NegationKind::Unknown => team.roster().any(|s| {
            s.normalized_name() == term
                || s.has_item(term)
                || s.has_ability(term)
                || s.has_move(term)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::{MeasureKind, Role, Type};
    use crate::entities::{BaseStats, MoveSlot, PokemonSlot, Team};

    fn team(slots: Vec<PokemonSlot>) -> Team {
        Team {
            filename: "team.txt".to_string(),
            pokemons: slots.into_iter().map(Some).collect(),
        }
    }

    fn garchomp() -> PokemonSlot {
        PokemonSlot {
            name: "Garchomp".to_string(),
            item: Some("Rocky Helmet".to_string()),
            ability: Some("Rough Skin".to_string()),
            tera_type: Some("Steel".to_string()),
            moves: vec![
                MoveSlot::Bare("Earthquake".to_string()),
                MoveSlot::Bare("Protect".to_string()),
            ],
            types: vec!["dragon".to_string(), "ground".to_string()],
            height: Some(19),
            weight: Some(950),
            stats: BaseStats {
                hp: 108,
                attack: 130,
                defense: 95,
                special_attack: 80,
                special_defense: 85,
                speed: 102,
            },
            ..Default::default()
        }
    }

    fn query(constraints: Vec<Constraint>) -> ParsedQuery {
        ParsedQuery { constraints }
    }

    #[test]
    fn test_bound_constraint_points() {
        let team = team(vec![garchomp()]);
        let q = query(vec![
            Constraint::Pokemon {
                canonical: "Garchomp".to_string(),
                normalized: "garchomp".to_string(),
            },
            Constraint::PokemonItem {
                pokemon: "garchomp".to_string(),
                item: "rocky helmet".to_string(),
            },
            Constraint::PokemonTera {
                pokemon: "garchomp".to_string(),
                tera: Type::Steel,
            },
            Constraint::PokemonAbility {
                pokemon: "garchomp".to_string(),
                ability: "rough skin".to_string(),
            },
            Constraint::PokemonMove {
                pokemon: "garchomp".to_string(),
                mv: "earthquake".to_string(),
            },
        ]);
        assert_eq!(score(&q, &team), 100 + 50 + 50 + 50 + 25);
    }

    #[test]
    fn test_wrong_holder_scores_only_presence() {
        let mut other = garchomp();
        other.item = Some("Leftovers".to_string());
        let team = team(vec![other]);
        let q = query(vec![
            Constraint::Pokemon {
                canonical: "Garchomp".to_string(),
                normalized: "garchomp".to_string(),
            },
            Constraint::PokemonItem {
                pokemon: "garchomp".to_string(),
                item: "rocky helmet".to_string(),
            },
        ]);
        assert_eq!(score(&q, &team), 100);
    }

    #[test]
    fn test_measure_threshold() {
        let tall = |name: &str| PokemonSlot {
            name: name.to_string(),
            height: Some(22),
            ..Default::default()
        };
        let three_tall = team(vec![tall("A"), tall("B"), tall("C")]);
        let two_tall = team(vec![tall("A"), tall("B"), garchomp()]);

        let q = query(vec![Constraint::Measure {
            kind: MeasureKind::Tall,
            min_count: 3,
        }]);
        assert_eq!(score(&q, &three_tall), 40);
        assert_eq!(score(&q, &two_tall), 0);
    }

    #[test]
    fn test_general_constraints() {
        let team = team(vec![garchomp()]);
        let q = query(vec![
            Constraint::GeneralMove("protect".to_string()),
            Constraint::GeneralAbility("rough skin".to_string()),
            Constraint::GeneralType(Type::Dragon),
            Constraint::GeneralRole(Role::Attacker),
            Constraint::TypeRole {
                type_: Type::Dragon,
                role: Role::Speedy,
            },
        ]);
        assert_eq!(score(&q, &team), 15 + 15 + 5 + 10 + 20);
    }

    #[test]
    fn test_points_per_matching_slot() {
        let team = team(vec![garchomp(), garchomp()]);
        let q = query(vec![Constraint::GeneralMove("protect".to_string())]);
        assert_eq!(score(&q, &team), 30);
    }

    #[test]
    fn test_violated_negation_zeroes_the_team() {
        let team = team(vec![garchomp()]);
        let q = query(vec![
            Constraint::Pokemon {
                canonical: "Garchomp".to_string(),
                normalized: "garchomp".to_string(),
            },
            Constraint::Negation {
                kind: NegationKind::Item,
                term: "rocky helmet".to_string(),
            },
        ]);
        let evaluation = evaluate(&q, &team);
        assert_eq!(evaluation.score, 0);
        assert!(evaluation.met.iter().all(|m| !m));
    }

    #[test]
    fn test_unviolated_negation_is_inert() {
        let team = team(vec![garchomp()]);
        let q = query(vec![
            Constraint::Pokemon {
                canonical: "Garchomp".to_string(),
                normalized: "garchomp".to_string(),
            },
            Constraint::Negation {
                kind: NegationKind::Item,
                term: "choice scarf".to_string(),
            },
        ]);
        assert_eq!(score(&q, &team), 100);
    }

    #[test]
    fn test_sparse_roster_never_faults() {
        let bare = PokemonSlot {
            name: "Ditto".to_string(),
            ..Default::default()
        };
        let team = Team {
            filename: String::new(),
            pokemons: vec![None, Some(bare)],
        };
        let q = query(vec![
            Constraint::PokemonItem {
                pokemon: "ditto".to_string(),
                item: "choice scarf".to_string(),
            },
            Constraint::Measure {
                kind: MeasureKind::Heavy,
                min_count: 1,
            },
            Constraint::GeneralRole(Role::Wall),
        ]);
        assert_eq!(score(&q, &team), 0);
    }
}
