//! Context-sensitive completion for the filter input.
//!
//! Pure ranking, no state: given the fragment being typed, the committed
//! tokens, and the host's [`Catalog`], produce dropdown candidates. Matching
//! is three-tier against the lower-cased query: prefix beats substring beats
//! in-order subsequence, anything below that is excluded, and ties keep
//! catalog order. Each candidate list is ranked and truncated separately so
//! one giant registry cannot flood the dropdown.
//!
//! Key suggestions are two-stage: the dropdown shows a template like
//! `-kind:<kind>` but applying it inserts just `-kind:`, which becomes the
//! new draft and immediately re-suggests concrete values.

use indexmap::IndexSet;
use serde::Serialize;

use crate::catalog::{Catalog, EntityRef};
use crate::key::{AXES, Axis, CONTROL_KEYS, ControlKey, Sign};
use crate::quote::{quote_always, quote_value};

/// How many entries one candidate list contributes.
pub const SUGGESTION_WINDOW: usize = 10;

/// How many direct entity matches a bare fragment surfaces.
const ENTITY_MATCH_LIMIT: usize = 3;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Text shown in the dropdown.
    pub token: String,
    /// One-line human description.
    pub description: String,
    /// Inserted instead of `token` when the two differ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_token: Option<String>,
}

impl Suggestion {
    fn new(token: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            description: description.into(),
            apply_token: None,
        }
    }

    fn applying(mut self, apply: impl Into<String>) -> Self {
        self.apply_token = Some(apply.into());
        self
    }

    /// Text the editor inserts when this suggestion is picked.
    pub fn insert_text(&self) -> &str {
        self.apply_token.as_deref().unwrap_or(&self.token)
    }
}

/// Match quality, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    Prefix,
    Substring,
    Subsequence,
}

/// Ranks a candidate against an already lower-cased query. `None` means
/// the candidate is excluded.
fn rank_match(candidate: &str, query_lc: &str) -> Option<MatchRank> {
    if query_lc.is_empty() {
        return Some(MatchRank::Prefix);
    }
    let candidate = candidate.to_lowercase();
    if candidate.starts_with(query_lc) {
        Some(MatchRank::Prefix)
    } else if candidate.contains(query_lc) {
        Some(MatchRank::Substring)
    } else if is_subsequence(&candidate, query_lc) {
        Some(MatchRank::Subsequence)
    } else {
        None
    }
}

/// True when every query char appears in the candidate, in order.
fn is_subsequence(candidate: &str, query: &str) -> bool {
    let mut candidate = candidate.chars();
    query.chars().all(|q| candidate.any(|c| c == q))
}

/// Drops non-matches, keeps list order within a tier, truncates to the
/// window. Relies on the sort being stable.
fn rank_list(candidates: Vec<(Option<MatchRank>, Suggestion)>) -> Vec<Suggestion> {
    let mut ranked: Vec<(MatchRank, Suggestion)> = candidates
        .into_iter()
        .filter_map(|(rank, suggestion)| rank.map(|rank| (rank, suggestion)))
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.truncate(SUGGESTION_WINDOW);
    ranked.into_iter().map(|(_, suggestion)| suggestion).collect()
}

/// Completion candidates for the fragment being typed.
///
/// `existing_tokens` are the committed chips; they are never suggested
/// again, and duplicates within the result are dropped (first wins).
///
/// # Examples
///
/// ```
/// use filament_filter::{Catalog, suggest};
///
/// let catalog = Catalog::from_json(r#"{"kinds": [{"id": "poll"}]}"#).unwrap();
/// let suggestions = suggest("-k", &[], &catalog);
/// assert_eq!(suggestions[0].token, "-kind:<kind>");
/// assert_eq!(suggestions[0].insert_text(), "-kind:");
/// ```
pub fn suggest(fragment: &str, existing_tokens: &[String], catalog: &Catalog) -> Vec<Suggestion> {
    let fragment = fragment.trim();
    let (sign, rest) = Sign::split(fragment);

    let list = match rest.split_once(':') {
        Some((key, partial)) => value_suggestions(sign, key, partial, catalog),
        None => match (sign, rest.is_empty()) {
            (None, true) => root_suggestions(),
            (Some(sign), _) => axis_key_suggestions(sign, rest),
            (None, false) => {
                let mut list = key_suggestions(rest);
                list.extend(entity_matches(rest, catalog));
                list
            }
        },
    };

    dedup(list, existing_tokens)
}

/// The fixed menu shown on an empty fragment.
fn root_suggestions() -> Vec<Suggestion> {
    let mut list = vec![
        Suggestion::new("+", "start an include filter"),
        Suggestion::new("-", "start an exclude filter"),
        Suggestion::new("focus:", "focus the graph on one node"),
    ];
    for control in CONTROL_KEYS {
        for (token, description) in control_values(control) {
            list.push(Suggestion::new(token, description));
        }
    }
    list
}

/// Axis-key templates for a signed fragment, ranked against the typed key.
fn axis_key_suggestions(sign: Sign, query: &str) -> Vec<Suggestion> {
    let query_lc = query.to_lowercase();
    let candidates = AXES
        .iter()
        .map(|axis| {
            let suggestion = Suggestion::new(
                format!("{}{}:<{}>", sign.as_char(), axis.key(), axis.placeholder()),
                format!("{} by {}", sign.verb(), axis.noun()),
            )
            .applying(format!("{}{}:", sign.as_char(), axis.key()));
            (rank_match(axis.key(), &query_lc), suggestion)
        })
        .collect();
    rank_list(candidates)
}

/// Axis and control keys for an unsigned fragment.
fn key_suggestions(query: &str) -> Vec<Suggestion> {
    let query_lc = query.to_lowercase();
    let mut list = axis_key_suggestions(Sign::Include, query);
    let controls = CONTROL_KEYS
        .iter()
        .map(|control| {
            let suggestion =
                Suggestion::new(format!("{}:", control.key()), control_blurb(*control));
            (rank_match(control.key(), &query_lc), suggestion)
        })
        .collect();
    list.extend(rank_list(controls));
    list
}

/// Direct entity shortcuts for a bare fragment: pick a node by name and
/// jump straight to focusing or including it.
fn entity_matches(query: &str, catalog: &Catalog) -> Vec<Suggestion> {
    let query_lc = query.to_lowercase();
    let mut ranked: Vec<(MatchRank, &EntityRef)> = catalog
        .entities
        .iter()
        .filter_map(|entity| entity_rank(entity, &query_lc).map(|rank| (rank, entity)))
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.truncate(ENTITY_MATCH_LIMIT);

    let mut list = Vec::with_capacity(ranked.len() * 3);
    for (_, entity) in ranked {
        let name = display_name(entity);
        list.push(Suggestion::new(
            format!("focus:{}", quote_value(&entity.id)),
            format!("focus on {name}"),
        ));
        list.push(Suggestion::new(
            format!("+node:{}", quote_always(&entity.id)),
            format!("include node {name}"),
        ));
        list.push(Suggestion::new(
            format!("-node:{}", quote_always(&entity.id)),
            format!("exclude node {name}"),
        ));
    }
    list
}

fn entity_rank(entity: &EntityRef, query_lc: &str) -> Option<MatchRank> {
    let haystacks = [
        Some(entity.id.as_str()),
        Some(entity.label.as_str()),
        entity.search_text.as_deref(),
    ];
    haystacks
        .into_iter()
        .flatten()
        .filter_map(|text| rank_match(text, query_lc))
        .min()
}

fn display_name(entity: &EntityRef) -> &str {
    if entity.label.is_empty() {
        &entity.id
    } else {
        &entity.label
    }
}

/// Value-stage suggestions once the fragment contains a colon. Mirrors the
/// parser's dispatch: signed fragments try the axes first, unsigned ones
/// the control keys, so `+source:` completes locations while `source:`
/// completes the toggle.
fn value_suggestions(
    sign: Option<Sign>,
    key: &str,
    partial: &str,
    catalog: &Catalog,
) -> Vec<Suggestion> {
    // A half-typed quote must not defeat matching.
    let partial = partial.strip_prefix('"').unwrap_or(partial);
    let partial = partial.strip_suffix('"').unwrap_or(partial);

    let key_lc = key.to_lowercase();
    let axis = Axis::from_key(&key_lc);
    let control = ControlKey::from_key(&key_lc);

    match sign {
        Some(sign) => {
            if let Some(axis) = axis {
                return axis_value_suggestions(axis, sign, partial, catalog);
            }
            if let Some(control) = control {
                return control_value_suggestions(control, partial, catalog);
            }
        }
        None => {
            if let Some(control) = control {
                return control_value_suggestions(control, partial, catalog);
            }
            if let Some(axis) = axis {
                return axis_value_suggestions(axis, Sign::Include, partial, catalog);
            }
        }
    }
    // Unknown key: fall back to the key lists, ranked against what was
    // typed before the colon.
    key_suggestions(key)
}

/// Registry completions for one axis. Emitted tokens are fully qualified
/// and always quoted, so they commit as-is no matter what the id contains.
fn axis_value_suggestions(
    axis: Axis,
    sign: Sign,
    partial: &str,
    catalog: &Catalog,
) -> Vec<Suggestion> {
    let partial_lc = partial.to_lowercase();
    let match_labels = matches!(axis, Axis::Crate | Axis::Process | Axis::Kind);
    let candidates = catalog
        .axis_rows(axis)
        .into_iter()
        .map(|(id, label)| {
            let rank = if match_labels {
                [Some(id), label]
                    .into_iter()
                    .flatten()
                    .filter_map(|text| rank_match(text, &partial_lc))
                    .min()
            } else {
                rank_match(id, &partial_lc)
            };
            let description = match label {
                Some(label) if label != id => label.to_string(),
                _ => format!("{} this {}", sign.verb(), axis.noun()),
            };
            let token = format!("{}{}:{}", sign.as_char(), axis.key(), quote_always(id));
            (rank, Suggestion::new(token, description))
        })
        .collect();
    rank_list(candidates)
}

fn control_value_suggestions(
    control: ControlKey,
    partial: &str,
    catalog: &Catalog,
) -> Vec<Suggestion> {
    if control == ControlKey::Focus {
        return focus_suggestions(partial, catalog);
    }
    let partial_lc = partial.to_lowercase();
    let candidates = control_values(control)
        .into_iter()
        .map(|(token, description)| {
            let value = token.split_once(':').map(|(_, value)| value).unwrap_or(token);
            (
                rank_match(value, &partial_lc),
                Suggestion::new(token, description),
            )
        })
        .collect();
    rank_list(candidates)
}

/// Focus completions rank rich entities when the host supplied them and
/// fall back to plain node ids otherwise.
fn focus_suggestions(partial: &str, catalog: &Catalog) -> Vec<Suggestion> {
    let partial_lc = partial.to_lowercase();
    if catalog.entities.is_empty() {
        let candidates = catalog
            .node_ids
            .iter()
            .map(|id| {
                (
                    rank_match(id, &partial_lc),
                    Suggestion::new(
                        format!("focus:{}", quote_value(id)),
                        "focus on this node",
                    ),
                )
            })
            .collect();
        return rank_list(candidates);
    }
    let candidates = catalog
        .entities
        .iter()
        .map(|entity| {
            (
                entity_rank(entity, &partial_lc),
                Suggestion::new(
                    format!("focus:{}", quote_value(&entity.id)),
                    format!("focus on {}", display_name(entity)),
                ),
            )
        })
        .collect();
    rank_list(candidates)
}

/// Concrete value tokens for one control key, dropdown order. Focus has no
/// fixed values; it completes from the catalog instead.
fn control_values(control: ControlKey) -> Vec<(&'static str, &'static str)> {
    match control {
        ControlKey::Loners => vec![
            ("loners:on", "show unconnected nodes"),
            ("loners:off", "hide unconnected nodes"),
        ],
        ControlKey::Source => vec![
            ("source:on", "show source locations"),
            ("source:off", "hide source locations"),
        ],
        ControlKey::ColorBy => vec![
            ("colorBy:process", "color nodes by process"),
            ("colorBy:crate", "color nodes by crate"),
        ],
        ControlKey::GroupBy => vec![
            ("groupBy:process", "group nodes by process"),
            ("groupBy:crate", "group nodes by crate"),
            ("groupBy:none", "disable grouping"),
        ],
        ControlKey::LabelBy => vec![
            ("labelBy:process", "label nodes by process"),
            ("labelBy:crate", "label nodes by crate"),
            ("labelBy:location", "label nodes by source location"),
        ],
        ControlKey::Focus => Vec::new(),
    }
}

fn control_blurb(control: ControlKey) -> &'static str {
    match control {
        ControlKey::Loners => "toggle unconnected nodes",
        ControlKey::Source => "toggle source locations",
        ControlKey::ColorBy => "choose node coloring",
        ControlKey::GroupBy => "choose node grouping",
        ControlKey::LabelBy => "choose node labels",
        ControlKey::Focus => "focus the graph on one node",
    }
}

/// Drops suggestions whose token is already committed or already listed.
fn dedup(list: Vec<Suggestion>, existing_tokens: &[String]) -> Vec<Suggestion> {
    let mut seen: IndexSet<String> = existing_tokens.iter().cloned().collect();
    let mut out = Vec::with_capacity(list.len());
    for suggestion in list {
        if seen.insert(suggestion.token.clone()) {
            out.push(suggestion);
        }
    }
    out
}
