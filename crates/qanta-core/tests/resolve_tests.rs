//! End-to-end resolution properties over the default rule set

use pretty_assertions::assert_eq;
use qanta_core::{
    default_expansion_rules, default_match_rules, EngineConfig, LookupTier, MappingEngine,
    MatchRule, ReferenceIndex, RuleSet,
};
use std::collections::{BTreeSet, HashMap, HashSet};

fn titles() -> HashSet<String> {
    [
        "Albert Einstein",
        "Plato",
        "Soviet Union",
        "Mercury (planet)",
        "Mercury",
        "Hamlet",
        "Beyoncé",
        "Ender's Game",
        "Isaac Newton",
        "The Beatles",
        "Battle_of_Hastings",
        "Knights Templar",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn redirects() -> HashMap<String, String> {
    [
        ("USSR", "Soviet Union"),
        ("mercury", "Mercury (planet)"),
        ("Beatles", "The Beatles"),
        ("Atlantis", "Nowhere"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

fn answers() -> BTreeSet<String> {
    [
        "albert einstein (accept einstein)",
        "Plato or Socrates",
        "USSR",
        "Mercury",
        "{Hamlet}",
        "Beyonce",
        "Ender\u{2019}s Game",
        "Sir Isaac Newton",
        "ANSWER: Hamlet",
        "Battle of Hastings",
        "\"{Knights Templars}\"",
        "something else entirely",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn index() -> ReferenceIndex {
    ReferenceIndex::build(&titles(), &redirects())
}

#[test]
fn test_default_rules_resolve_fixture() {
    let res = MappingEngine::new().resolve(&index(), &answers()).unwrap();

    let expected = [
        ("albert einstein (accept einstein)", "Albert Einstein"),
        ("Plato or Socrates", "Plato"),
        ("USSR", "Soviet Union"),
        ("Mercury", "Mercury"),
        ("{Hamlet}", "Hamlet"),
        ("Beyonce", "Beyoncé"),
        ("Ender\u{2019}s Game", "Ender's Game"),
        ("Sir Isaac Newton", "Isaac Newton"),
        ("ANSWER: Hamlet", "Hamlet"),
        ("Battle of Hastings", "Battle_of_Hastings"),
        ("\"{Knights Templars}\"", "Knights Templar"),
    ];
    for (answer, title) in expected {
        assert_eq!(
            res.answer_map.get(answer).map(String::as_str),
            Some(title),
            "answer {answer:?}"
        );
    }

    assert_eq!(res.unbound_answers(), vec!["something else entirely"]);
    assert_eq!(res.report.redirects_dropped, 1);
}

#[test]
fn test_priority_exact_title_over_lower_redirect() {
    let res = MappingEngine::new().resolve(&index(), &answers()).unwrap();
    assert_eq!(res.answer_map["Mercury"], "Mercury");
    assert_eq!(res.provenance["Mercury"].tier, LookupTier::ExactTitle);
}

#[test]
fn test_resolution_is_idempotent() {
    let engine = MappingEngine::new();
    let first = engine.resolve(&index(), &answers()).unwrap();
    let second = engine.resolve(&index(), &answers()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unresolved_set_shrinks_monotonically() {
    let res = MappingEngine::new().resolve(&index(), &answers()).unwrap();
    let remaining: Vec<usize> = res.report.passes.iter().map(|p| p.remaining).collect();
    assert!(remaining.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(
        res.answer_map.len() + res.unmapped.len(),
        res.report.initial_unmapped
    );
    for answer in res.answer_map.keys() {
        assert!(!res.unmapped.contains(answer));
    }
}

#[test]
fn test_later_rules_never_overwrite() {
    // A later rule that would map everything to one title must not touch
    // answers an earlier rule already resolved.
    fn to_plato(_: &str) -> Option<String> {
        Some("Plato".to_string())
    }

    let mut matching = default_match_rules();
    matching.push(MatchRule::new("everything is plato", to_plato));
    let rules = RuleSet::new(default_expansion_rules(), matching).unwrap();

    let baseline = MappingEngine::new().resolve(&index(), &answers()).unwrap();
    let res = MappingEngine::with_rules(rules)
        .resolve(&index(), &answers())
        .unwrap();

    for (answer, title) in &baseline.answer_map {
        assert_eq!(&res.answer_map[answer], title);
        assert_eq!(res.provenance[answer], baseline.provenance[answer]);
    }
    assert_eq!(res.answer_map["something else entirely"], "Plato");
    assert!(res.unmapped.is_empty());
}

#[test]
fn test_underscore_fallback_can_be_disabled() {
    let config = EngineConfig {
        underscore_fallback: false,
        ..Default::default()
    };
    let res = MappingEngine::new()
        .config(config)
        .resolve(&index(), &answers())
        .unwrap();
    assert!(res.unmapped.contains("Battle of Hastings"));
}

#[test]
fn test_transliterated_titles_resolve_through_folded_tier() {
    let titles: HashSet<String> = ["Ħal Saflieni Hypogeum", "Москва"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let index = ReferenceIndex::build(&titles, &HashMap::new());
    let answers: BTreeSet<String> = ["Hal Saflieni Hypogeum", "moskva"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let res = MappingEngine::new().resolve(&index, &answers).unwrap();
    assert_eq!(res.answer_map["Hal Saflieni Hypogeum"], "Ħal Saflieni Hypogeum");
    assert_eq!(
        res.provenance["Hal Saflieni Hypogeum"].tier,
        LookupTier::FoldedTitle
    );
    assert_eq!(res.answer_map["moskva"], "Москва");
    assert_eq!(res.provenance["moskva"].tier, LookupTier::LowerFoldedTitle);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_pass_matches_sequential() {
    let sequential = MappingEngine::new()
        .config(EngineConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        })
        .resolve(&index(), &answers())
        .unwrap();
    let parallel = MappingEngine::new()
        .config(EngineConfig {
            parallel_threshold: 0,
            ..Default::default()
        })
        .resolve(&index(), &answers())
        .unwrap();
    assert_eq!(sequential, parallel);
}
