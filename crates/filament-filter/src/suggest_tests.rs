use crate::catalog::{Catalog, LabelEntry};
use crate::parser::parse;
use crate::suggest::{SUGGESTION_WINDOW, suggest};

fn catalog() -> Catalog {
    Catalog::from_json(
        r#"{
            "nodeIds": ["node-1", "node-2", "tick-3"],
            "locations": ["src/main.rs:12", "src/lib.rs:40"],
            "crates": [
                {"id": "tokio", "label": "Tokio runtime"},
                {"id": "my-app", "label": "Application"},
                {"id": "hyper", "label": ""}
            ],
            "processes": [
                {"id": "p1", "label": "gateway"},
                {"id": "p2", "label": "worker"}
            ],
            "kinds": [
                {"id": "poll", "label": "Task poll"},
                {"id": "timer tick", "label": "Timer"},
                {"id": "rpc", "label": ""}
            ],
            "modules": [
                {"id": "app::net", "label": "net"},
                {"id": "app::db", "label": ""}
            ],
            "entities": [
                {"id": "node-1", "label": "accept loop", "searchText": "listener tcp"},
                {"id": "node-2", "label": "db writer"},
                {"id": "tick-3", "label": "ticker"}
            ]
        }"#,
    )
    .unwrap()
}

fn snapshot(fragment: &str, existing: &[&str]) -> String {
    let existing: Vec<String> = existing.iter().map(|token| token.to_string()).collect();
    let mut out = String::new();
    for suggestion in suggest(fragment, &existing, &catalog()) {
        match &suggestion.apply_token {
            Some(apply) => out.push_str(&format!(
                "{} -> {} ({})\n",
                suggestion.token, apply, suggestion.description,
            )),
            None => out.push_str(&format!(
                "{} ({})\n",
                suggestion.token, suggestion.description,
            )),
        }
    }
    out
}

#[test]
fn empty_fragment_shows_the_root_menu() {
    insta::assert_snapshot!(snapshot("", &[]), @r"
    + (start an include filter)
    - (start an exclude filter)
    focus: (focus the graph on one node)
    loners:on (show unconnected nodes)
    loners:off (hide unconnected nodes)
    source:on (show source locations)
    source:off (hide source locations)
    colorBy:process (color nodes by process)
    colorBy:crate (color nodes by crate)
    groupBy:process (group nodes by process)
    groupBy:crate (group nodes by crate)
    groupBy:none (disable grouping)
    labelBy:process (label nodes by process)
    labelBy:crate (label nodes by crate)
    labelBy:location (label nodes by source location)
    ");
}

#[test]
fn bare_sign_lists_every_axis() {
    insta::assert_snapshot!(snapshot("+", &[]), @r"
    +node:<id> -> +node: (include by node id)
    +location:<src> -> +location: (include by source location)
    +crate:<crate> -> +crate: (include by crate)
    +process:<process> -> +process: (include by process)
    +kind:<kind> -> +kind: (include by kind)
    +module:<module> -> +module: (include by module path)
    ");
}

#[test]
fn signed_fragment_narrows_axis_keys() {
    insta::assert_snapshot!(snapshot("-k", &[]), @r"
    -kind:<kind> -> -kind: (exclude by kind)
    ");
}

#[test]
fn unsigned_fragment_mixes_keys_and_entities() {
    insta::assert_snapshot!(snapshot("lo", &[]), @r#"
    +location:<src> -> +location: (include by source location)
    loners: (toggle unconnected nodes)
    colorBy: (choose node coloring)
    focus:node-1 (focus on accept loop)
    +node:"node-1" (include node accept loop)
    -node:"node-1" (exclude node accept loop)
    "#);
}

#[test]
fn axis_values_complete_from_the_catalog() {
    insta::assert_snapshot!(snapshot("+crate:", &[]), @r#"
    +crate:"tokio" (Tokio runtime)
    +crate:"my-app" (Application)
    +crate:"hyper" (include this crate)
    "#);
}

#[test]
fn axis_values_match_on_labels_too() {
    insta::assert_snapshot!(snapshot("-kind:timer", &[]), @r#"
    -kind:"timer tick" (Timer)
    "#);
}

#[test]
fn subsequence_rescues_terse_fragments() {
    let catalog = Catalog::from_json(r#"{"locations": ["src/main.rs:12"]}"#).unwrap();
    let got = suggest("-location:smr1", &[], &catalog);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].token, r#"-location:"src/main.rs:12""#);
    assert!(got[0].apply_token.is_none());
}

#[test]
fn ranks_order_prefix_substring_subsequence() {
    let kinds = ["pxoxlxl", "io-poll", "polling"]
        .map(|id| LabelEntry::new(id, ""))
        .to_vec();
    let catalog = Catalog {
        kinds,
        ..Catalog::default()
    };
    let tokens: Vec<String> = suggest("+kind:poll", &[], &catalog)
        .into_iter()
        .map(|s| s.token)
        .collect();
    assert_eq!(
        tokens,
        vec![
            r#"+kind:"polling""#,
            r#"+kind:"io-poll""#,
            r#"+kind:"pxoxlxl""#,
        ],
    );
}

#[test]
fn window_caps_each_list() {
    let crates = (1..=15)
        .map(|i| LabelEntry::new(format!("c{i:02}"), ""))
        .collect();
    let catalog = Catalog {
        crates,
        ..Catalog::default()
    };
    let got = suggest("+crate:", &[], &catalog);
    assert_eq!(got.len(), SUGGESTION_WINDOW);
    assert_eq!(got[0].token, r#"+crate:"c01""#);
    assert_eq!(got[9].token, r#"+crate:"c10""#);
}

#[test]
fn toggle_and_choice_values_complete() {
    insta::assert_snapshot!(snapshot("loners:o", &[]), @r"
    loners:on (show unconnected nodes)
    loners:off (hide unconnected nodes)
    ");
    insta::assert_snapshot!(snapshot("groupBy:n", &[]), @r"
    groupBy:none (disable grouping)
    ");
}

#[test]
fn focus_ranks_rich_entities() {
    insta::assert_snapshot!(snapshot("focus:ti", &[]), @r"
    focus:tick-3 (focus on ticker)
    ");
}

#[test]
fn focus_falls_back_to_plain_node_ids() {
    let catalog = Catalog::from_json(r#"{"nodeIds": ["node-1", "node-2"]}"#).unwrap();
    let got = suggest("focus:node-2", &[], &catalog);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].token, "focus:node-2");
    assert_eq!(got[0].description, "focus on this node");
}

#[test]
fn unknown_key_falls_back_to_key_lists() {
    insta::assert_snapshot!(snapshot("colr:x", &[]), @r"
    colorBy: (choose node coloring)
    ");
}

#[test]
fn committed_tokens_are_never_resuggested() {
    insta::assert_snapshot!(snapshot("+crate:", &[r#"+crate:"tokio""#]), @r#"
    +crate:"my-app" (Application)
    +crate:"hyper" (include this crate)
    "#);
}

#[test]
fn no_duplicate_tokens_in_one_result() {
    for fragment in ["", "+", "lo", "+crate:", "focus:"] {
        let got = suggest(fragment, &[], &catalog());
        let mut tokens: Vec<&str> = got.iter().map(|s| s.token.as_str()).collect();
        let before = tokens.len();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), before, "duplicates for fragment {fragment:?}");
    }
}

#[test]
fn half_typed_quotes_do_not_defeat_matching() {
    let got = suggest("+crate:\"tok", &[], &catalog());
    assert_eq!(got[0].token, r#"+crate:"tokio""#);
}

#[test]
fn hopeless_fragments_suggest_nothing() {
    assert!(suggest("+zzz", &[], &catalog()).is_empty());
    assert!(suggest("-crate:zzz", &[], &catalog()).is_empty());
}

#[test]
fn key_stage_then_value_stage_commits_a_valid_token() {
    let catalog = catalog();

    // Stage one: a terse signed fragment resolves to a key template.
    let first = suggest("-k", &[], &catalog);
    assert_eq!(first[0].token, "-kind:<kind>");
    assert_eq!(first[0].insert_text(), "-kind:");

    // Stage two: the applied key becomes the new fragment and yields
    // concrete, committable tokens.
    let second = suggest(first[0].insert_text(), &[], &catalog);
    assert!(!second.is_empty());
    assert!(second.iter().all(|s| s.apply_token.is_none()));

    let committed = parse(&second[0].token);
    assert!(committed.is_valid());
    assert!(committed.exclude_kinds.contains("poll"));
}

#[test]
fn suggestions_serialize_camel_case() {
    let first = suggest("-k", &[], &catalog()).remove(0);
    let value = serde_json::to_value(&first).unwrap();
    assert_eq!(value["token"], serde_json::json!("-kind:<kind>"));
    assert_eq!(value["applyToken"], serde_json::json!("-kind:"));

    let concrete = suggest("+crate:tok", &[], &catalog()).remove(0);
    let value = serde_json::to_value(&concrete).unwrap();
    assert!(value.as_object().unwrap().get("applyToken").is_none());
}
