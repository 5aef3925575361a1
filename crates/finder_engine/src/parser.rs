//! Instruction parsing: free text plus a lexicon into a typed constraint set.
//!
//! The pipeline order is load-bearing. Negation phrases are claimed first so
//! a negated name never counts as a positive mention; mentions are claimed
//! before items/abilities/moves so anything attributed to a specific Pokémon
//! is excluded from the general constraint sweep.

use std::fmt;

use crate::core_data::{MeasureKind, Role, Type};
use crate::lexicon::Lexicon;
use crate::matcher::{
    contains_word, find_word_ranges, leading_gender_marker, spans_overlap,
};

/// One occurrence of a known Pokémon name inside the query text.
/// Offsets index the lower-cased copy of the instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonMention {
    pub canonical: String,
    pub normalized: String,
    pub start: usize,
    pub end: usize,
}

/// What kind of entity a negated term resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegationKind {
    Pokemon,
    Item,
    Ability,
    Move,
    Type,
    Unknown,
}

/// A single parsed requirement. The scorer matches on this exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// A Pokémon requested by name. `normalized` is the comparison key,
    /// `canonical` the display spelling.
    Pokemon { canonical: String, normalized: String },
    PokemonItem { pokemon: String, item: String },
    PokemonAbility { pokemon: String, ability: String },
    PokemonMove { pokemon: String, mv: String },
    PokemonTera { pokemon: String, tera: Type },
    GeneralMove(String),
    GeneralAbility(String),
    GeneralType(Type),
    GeneralRole(Role),
    TypeRole { type_: Type, role: Role },
    /// `<N> small|tall|light|heavy` request.
    Measure { kind: MeasureKind, min_count: usize },
    /// `without <term>` and friends; a team carrying the term is disqualified.
    Negation { kind: NegationKind, term: String },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Pokemon { canonical, .. } => write!(f, "Pokémon: {}", canonical),
            Constraint::PokemonItem { pokemon, item } => {
                write!(f, "Pokémon/Item: {} holding {}", pokemon, item)
            }
            Constraint::PokemonAbility { pokemon, ability } => {
                write!(f, "Pokémon/Ability: {} with {}", pokemon, ability)
            }
            Constraint::PokemonMove { pokemon, mv } => {
                write!(f, "Pokémon/Move: {} with {}", pokemon, mv)
            }
            Constraint::PokemonTera { pokemon, tera } => {
                write!(f, "Pokémon/Tera: {} tera {}", pokemon, tera.name())
            }
            Constraint::GeneralMove(mv) => write!(f, "Move: {}", mv),
            Constraint::GeneralAbility(ability) => write!(f, "Ability: {}", ability),
            Constraint::GeneralType(ty) => write!(f, "Type: {}", ty.name()),
            Constraint::GeneralRole(role) => write!(f, "Role: {}", role.label()),
            Constraint::TypeRole { type_, role } => {
                write!(f, "Type/Role: {} {}", role.label(), type_.name())
            }
            Constraint::Measure { kind, min_count } => {
                let label = if kind.is_size() { "Size" } else { "Weight" };
                write!(f, "{}: {} {} Pokémon", label, min_count, kind.keyword())
            }
            Constraint::Negation { term, .. } => write!(f, "Without: {}", term),
        }
    }
}

/// The structured result of parsing one instruction. An instruction with no
/// recognized entities parses to an empty constraint list; that is a valid
/// result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub constraints: Vec<Constraint>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Canonical names of the bare Pokémon requests, in mention order.
    pub fn pokemon_names(&self) -> Vec<&str> {
        self.constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::Pokemon { canonical, .. } => Some(canonical.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push_unique(&mut self, constraint: Constraint) {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
    }
}

/// Parse one instruction against a lexicon. Pure: identical inputs produce
/// structurally identical queries.
pub fn parse(text: &str, lexicon: &Lexicon) -> ParsedQuery {
    let lowered = text.to_lowercase();
    let mut query = ParsedQuery::default();

    let negation_spans = extract_negations(&lowered, lexicon, &mut query);
    let mentions = collect_mentions(&lowered, lexicon, &negation_spans, &mut query);
    let mention_spans: Vec<(usize, usize)> =
        mentions.iter().map(|m| (m.start, m.end)).collect();

    // Spans claimed by Tera bindings; a bound type word is not a general type.
    let mut tera_spans = Vec::new();
    process_mention_windows(&lowered, &mentions, lexicon, &mut query, &mut tera_spans);
    extract_global_teras(&lowered, &mentions, &mut query, &mut tera_spans);
    extract_measures(&lowered, &mut query);
    extract_general_entities(&lowered, &mention_spans, &negation_spans, lexicon, &mut query);
    extract_roles_and_types(
        &lowered,
        &mention_spans,
        &negation_spans,
        &tera_spans,
        &mut query,
    );

    query
}

// ============================================================================
// Negations
// ============================================================================

const NEGATION_KEYWORDS: [&str; 3] = ["not including", "without", "no"];

/// Words that end a negated term capture.
const NEGATION_STOP_WORDS: [&str; 7] =
    ["and", "or", "with", "without", "no", "not", "including"];

fn extract_negations(
    lowered: &str,
    lexicon: &Lexicon,
    query: &mut ParsedQuery,
) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    for keyword in NEGATION_KEYWORDS {
        for (kw_start, kw_end) in find_word_ranges(lowered, keyword) {
            let Some(tokens) = negated_term_tokens(lowered, kw_end) else {
                continue;
            };
            let capture_end = tokens.last().map(|t| t.1).unwrap_or(kw_end);
            // Classify the longest known suffix-trimmed term; fall back to
            // the full capture as an unknown.
            let mut resolved = None;
            for k in (1..=tokens.len()).rev() {
                let term = &lowered[tokens[0].0..tokens[k - 1].1];
                if let Some(kind) = classify_negated_term(lexicon, term) {
                    resolved = Some((kind, term.to_string()));
                    break;
                }
            }
            let (kind, term) = resolved.unwrap_or_else(|| {
                (
                    NegationKind::Unknown,
                    lowered[tokens[0].0..capture_end].to_string(),
                )
            });
            query.push_unique(Constraint::Negation { kind, term });
            spans.push((kw_start, capture_end));
        }
    }
    spans
}

/// Token spans of the term following a negation keyword: consecutive
/// alphanumeric runs joined only by spaces or hyphens, stopping at a stop
/// word or other punctuation.
fn negated_term_tokens(lowered: &str, from: usize) -> Option<Vec<(usize, usize)>> {
    let mut tokens = Vec::new();
    let mut cursor = from;
    loop {
        let rest = &lowered[cursor..];
        // A term continues only across space/hyphen gaps; any other
        // character (or a stop word) ends the capture.
        let gap_len = rest
            .char_indices()
            .find(|(_, c)| !(c.is_whitespace() || *c == '-'))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let word_start = cursor + gap_len;
        let word = &lowered[word_start..];
        let word_len = word
            .char_indices()
            .find(|(_, c)| !c.is_alphanumeric())
            .map(|(i, _)| i)
            .unwrap_or(word.len());
        if word_len == 0 {
            break;
        }
        let token = &lowered[word_start..word_start + word_len];
        if NEGATION_STOP_WORDS.contains(&token) {
            break;
        }
        tokens.push((word_start, word_start + word_len));
        cursor = word_start + word_len;
    }
    if tokens.is_empty() {
        None
    } else {
        Some(tokens)
    }
}

fn classify_negated_term(lexicon: &Lexicon, term: &str) -> Option<NegationKind> {
    if lexicon.is_pokemon(term) {
        Some(NegationKind::Pokemon)
    } else if lexicon.is_item(term) {
        Some(NegationKind::Item)
    } else if lexicon.is_ability(term) {
        Some(NegationKind::Ability)
    } else if lexicon.is_move(term) {
        Some(NegationKind::Move)
    } else if Type::from_str(term).is_some() {
        Some(NegationKind::Type)
    } else {
        None
    }
}

// ============================================================================
// Mentions
// ============================================================================

/// Scan for name hits, then resolve overlaps: sorted by start (longer first
/// on ties), a hit survives only if its span is free and its name is new.
fn collect_mentions(
    lowered: &str,
    lexicon: &Lexicon,
    negation_spans: &[(usize, usize)],
    query: &mut ParsedQuery,
) -> Vec<PokemonMention> {
    let mut hits = lexicon.scan_names(lowered);
    hits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<PokemonMention> = Vec::new();
    for hit in hits {
        let span = (hit.start, hit.end);
        if negation_spans.iter().any(|&n| spans_overlap(span, n)) {
            continue;
        }
        let normalized = &lowered[hit.start..hit.end];
        if kept.iter().any(|m| m.normalized == normalized) {
            continue;
        }
        if kept
            .iter()
            .any(|m| spans_overlap((m.start, m.end), span))
        {
            continue;
        }
        let canonical = lexicon
            .canonical_of(normalized)
            .unwrap_or(normalized)
            .to_string();
        kept.push(PokemonMention {
            canonical,
            normalized: normalized.to_string(),
            start: hit.start,
            end: hit.end,
        });
    }

    for mention in &kept {
        query.push_unique(Constraint::Pokemon {
            canonical: mention.canonical.clone(),
            normalized: mention.normalized.clone(),
        });
    }
    kept
}

// ============================================================================
// Per-mention clause windows
// ============================================================================

/// Classifies one `with`/`holding` segment for a mention. Returns true when
/// the segment is claimed exclusively, which short-circuits the chain.
type SegmentClassifier =
    fn(&Lexicon, &[PokemonMention], &PokemonMention, &str, &mut ParsedQuery) -> bool;

/// Binding priority for a segment. Moves come last and never short-circuit,
/// so one segment can still yield several moves.
const SEGMENT_CLASSIFIERS: [SegmentClassifier; 3] =
    [classify_item, classify_ability, classify_move];

fn process_mention_windows(
    lowered: &str,
    mentions: &[PokemonMention],
    lexicon: &Lexicon,
    query: &mut ParsedQuery,
    tera_spans: &mut Vec<(usize, usize)>,
) {
    for (i, mention) in mentions.iter().enumerate() {
        let window_end = mentions
            .get(i + 1)
            .map_or(lowered.len(), |next| next.start);
        let window = &lowered[mention.end..window_end];

        extract_clause(window, mention.end, mention, mentions, lexicon, query, tera_spans);
        bind_leading_tera(window, mention.end, mention, query, tera_spans);
    }
}

fn extract_clause(
    window: &str,
    window_base: usize,
    mention: &PokemonMention,
    kept: &[PokemonMention],
    lexicon: &Lexicon,
    query: &mut ParsedQuery,
    tera_spans: &mut Vec<(usize, usize)>,
) {
    // Earliest clause keyword in the window opens the segment list.
    let mut first: Option<(usize, usize)> = None;
    for keyword in ["with", "holding"] {
        if let Some(&(start, end)) = find_word_ranges(window, keyword).first() {
            if first.map_or(true, |(s, _)| start < s) {
                first = Some((start, end));
            }
        }
    }
    let Some((_, keyword_end)) = first else { return };

    let remainder = &window[keyword_end..];
    let remainder_base = window_base + keyword_end;
    for (offset, segment) in split_segments(remainder) {
        if segment.trim().is_empty() {
            continue;
        }
        if bind_leading_tera(segment, remainder_base + offset, mention, query, tera_spans) {
            continue;
        }
        for classify in SEGMENT_CLASSIFIERS {
            if classify(lexicon, kept, mention, segment, query) {
                break;
            }
        }
    }
}

/// Split on commas and the word "and", keeping segment offsets.
fn split_segments(text: &str) -> Vec<(usize, &str)> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    loop {
        let comma = text[cursor..]
            .find(',')
            .map(|i| (cursor + i, cursor + i + 1));
        let and = find_word_ranges(&text[cursor..], "and")
            .first()
            .map(|&(s, e)| (cursor + s, cursor + e));
        let next = match (comma, and) {
            (Some(c), Some(a)) => Some(if c.0 < a.0 { c } else { a }),
            (c, a) => c.or(a),
        };
        match next {
            Some((split_start, split_end)) => {
                segments.push((cursor, &text[cursor..split_start]));
                cursor = split_end;
            }
            None => {
                segments.push((cursor, &text[cursor..]));
                return segments;
            }
        }
    }
}

/// A candidate whose text sits inside a kept Pokémon name is never an
/// item/ability/move hit ("therian" must not fire as a move).
fn shadowed_by_name(kept: &[PokemonMention], candidate: &str) -> bool {
    kept.iter().any(|m| m.normalized.contains(candidate))
}

fn classify_item(
    lexicon: &Lexicon,
    kept: &[PokemonMention],
    mention: &PokemonMention,
    segment: &str,
    query: &mut ParsedQuery,
) -> bool {
    for item in lexicon.items() {
        if contains_word(segment, item) && !shadowed_by_name(kept, item) {
            query.push_unique(Constraint::PokemonItem {
                pokemon: mention.normalized.clone(),
                item: item.to_string(),
            });
            return true;
        }
    }
    false
}

fn classify_ability(
    lexicon: &Lexicon,
    kept: &[PokemonMention],
    mention: &PokemonMention,
    segment: &str,
    query: &mut ParsedQuery,
) -> bool {
    for ability in lexicon.abilities() {
        if contains_word(segment, ability) && !shadowed_by_name(kept, ability) {
            query.push_unique(Constraint::PokemonAbility {
                pokemon: mention.normalized.clone(),
                ability: ability.to_string(),
            });
            return true;
        }
    }
    false
}

fn classify_move(
    lexicon: &Lexicon,
    kept: &[PokemonMention],
    mention: &PokemonMention,
    segment: &str,
    query: &mut ParsedQuery,
) -> bool {
    for mv in lexicon.moves() {
        if contains_word(segment, mv) && !shadowed_by_name(kept, mv) {
            query.push_unique(Constraint::PokemonMove {
                pokemon: mention.normalized.clone(),
                mv: mv.to_string(),
            });
        }
    }
    // Moves never claim a segment exclusively.
    false
}

// ============================================================================
// Tera bindings
// ============================================================================

/// Bind `tera <type>` at the start of a fragment to a mention. Records the
/// type word's span so it is not re-counted as a standalone type.
fn bind_leading_tera(
    fragment: &str,
    base: usize,
    mention: &PokemonMention,
    query: &mut ParsedQuery,
    tera_spans: &mut Vec<(usize, usize)>,
) -> bool {
    let trimmed = fragment.trim_start();
    let lead = fragment.len() - trimmed.len();
    let Some(rest) = trimmed.strip_prefix("tera") else {
        return false;
    };
    if !rest.chars().next().map_or(false, char::is_whitespace) {
        return false;
    }
    let after = rest.trim_start();
    let gap = rest.len() - after.len();
    let word_end = after
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(after.len());
    let Some(tera) = Type::from_str(&after[..word_end]) else {
        return false;
    };
    query.push_unique(Constraint::PokemonTera {
        pokemon: mention.normalized.clone(),
        tera,
    });
    let start = base + lead + "tera".len() + gap;
    tera_spans.push((start, start + word_end));
    true
}

/// Whole-text rebinding pass: `<name>(gender marker?) tera <type>` catches
/// phrasing the clause window misses. Duplicates are absorbed by the
/// constraint dedup.
fn extract_global_teras(
    lowered: &str,
    mentions: &[PokemonMention],
    query: &mut ParsedQuery,
    tera_spans: &mut Vec<(usize, usize)>,
) {
    for mention in mentions {
        for (_, name_end) in find_word_ranges(lowered, &mention.normalized) {
            let mut pos = name_end;
            if let Some(marker) = leading_gender_marker(&lowered[pos..]) {
                pos += marker;
            }
            bind_leading_tera(&lowered[pos..], pos, mention, query, tera_spans);
        }
    }
}

// ============================================================================
// Size/weight requests
// ============================================================================

fn extract_measures(lowered: &str, query: &mut ParsedQuery) {
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    for pair in tokens.windows(2) {
        let Ok(count) = pair[0].parse::<usize>() else {
            continue;
        };
        if count == 0 {
            continue;
        }
        if let Some(kind) = MeasureKind::from_keyword(pair[1]) {
            query.push_unique(Constraint::Measure {
                kind,
                min_count: count,
            });
        }
    }
}

// ============================================================================
// General sweep: moves, abilities, roles, types
// ============================================================================

fn any_free_occurrence(lowered: &str, word: &str, excluded: &[(usize, usize)]) -> bool {
    find_word_ranges(lowered, word)
        .into_iter()
        .any(|range| !excluded.iter().any(|&span| spans_overlap(range, span)))
}

fn extract_general_entities(
    lowered: &str,
    mention_spans: &[(usize, usize)],
    negation_spans: &[(usize, usize)],
    lexicon: &Lexicon,
    query: &mut ParsedQuery,
) {
    let excluded: Vec<(usize, usize)> = mention_spans
        .iter()
        .chain(negation_spans)
        .copied()
        .collect();

    for mv in lexicon.moves() {
        let bound = query
            .constraints
            .iter()
            .any(|c| matches!(c, Constraint::PokemonMove { mv: bound, .. } if bound == mv));
        if !bound && any_free_occurrence(lowered, mv, &excluded) {
            query.push_unique(Constraint::GeneralMove(mv.to_string()));
        }
    }
    for ability in lexicon.abilities() {
        let bound = query.constraints.iter().any(
            |c| matches!(c, Constraint::PokemonAbility { ability: bound, .. } if bound == ability),
        );
        if !bound && any_free_occurrence(lowered, ability, &excluded) {
            query.push_unique(Constraint::GeneralAbility(ability.to_string()));
        }
    }
}

fn extract_roles_and_types(
    lowered: &str,
    mention_spans: &[(usize, usize)],
    negation_spans: &[(usize, usize)],
    tera_spans: &[(usize, usize)],
    query: &mut ParsedQuery,
) {
    let mut roles = Vec::new();
    for role in Role::ALL {
        let found = role
            .keywords()
            .iter()
            .any(|kw| any_free_occurrence(lowered, kw, negation_spans));
        if found {
            roles.push(role);
        }
    }

    let type_excluded: Vec<(usize, usize)> = mention_spans
        .iter()
        .chain(negation_spans)
        .chain(tera_spans)
        .copied()
        .collect();
    let mut types = Vec::new();
    for ty in Type::ALL {
        if any_free_occurrence(lowered, ty.name(), &type_excluded) {
            types.push(ty);
        }
    }

    for role in &roles {
        query.push_unique(Constraint::GeneralRole(*role));
    }
    if roles.is_empty() {
        for ty in types {
            query.push_unique(Constraint::GeneralType(ty));
        }
    } else {
        // A type that pairs with a role is consumed by the pairing.
        for ty in &types {
            for role in &roles {
                query.push_unique(Constraint::TypeRole {
                    type_: *ty,
                    role: *role,
                });
            }
        }
    }
}
