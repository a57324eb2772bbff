//! File I/O tests for inputs and outputs

use pretty_assertions::assert_eq;
use qanta::io::{
    read_questions, read_redirects, read_titles, write_answer_map, write_reconciliation,
    MATCH_REPORT_FILE,
};
use qanta_core::{reconcile, NoAnnotations, Question, ReconcileConfig};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_read_titles_text_and_json() {
    let dir = TempDir::new().unwrap();

    let text = dir.path().join("titles.txt");
    fs::write(&text, "Plato\nAlbert Einstein\n\nSoviet Union\n").unwrap();
    let titles = read_titles(&text).unwrap();
    assert_eq!(titles.len(), 3);
    assert!(titles.contains("Albert Einstein"));

    let json = dir.path().join("titles.json");
    fs::write(&json, r#"["Plato", "Kant"]"#).unwrap();
    let titles = read_titles(&json).unwrap();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains("Kant"));
}

#[test]
fn test_read_redirects_csv_and_json() {
    let dir = TempDir::new().unwrap();

    let csv = dir.path().join("redirects.csv");
    fs::write(&csv, "USSR,Soviet Union\n\"Einstein, A.\",Albert Einstein\n").unwrap();
    let redirects = read_redirects(&csv).unwrap();
    assert_eq!(redirects["Einstein, A."], "Albert Einstein");

    let json = dir.path().join("redirects.json");
    fs::write(&json, r#"{"USSR": "Soviet Union"}"#).unwrap();
    let redirects = read_redirects(&json).unwrap();
    assert_eq!(redirects["USSR"], "Soviet Union");
}

#[test]
fn test_read_questions_keeps_extra_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("questions.json");
    fs::write(
        &path,
        r#"{"questions": [
            {"qanta_id": 1, "text": "Name this philosopher", "answer": "Plato",
             "fold": "guesstrain", "qdb_id": 12, "proto_id": null,
             "tournament": "ACF Regionals", "year": 2010}
        ]}"#,
    )
    .unwrap();

    let questions = read_questions(&path).unwrap();
    assert_eq!(questions.len(), 1);
    let q = &questions[0];
    assert_eq!(q.qdb_id, Some(12));
    assert_eq!(q.page, None);
    assert_eq!(q.extra["tournament"], "ACF Regionals");
    assert_eq!(q.extra["year"], 2010);
}

#[test]
fn test_write_answer_map_sorts_unbound() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let answer_map = BTreeMap::from([("USSR".to_string(), "Soviet Union".to_string())]);
    let unbound = vec!["zeta".to_string(), "alpha".to_string()];
    let (map_path, unbound_path) = write_answer_map(&answer_map, &unbound, &out).unwrap();

    let map = read_json(&map_path);
    assert_eq!(map["answer_map"]["USSR"], "Soviet Union");

    let unbound = read_json(&unbound_path);
    assert_eq!(unbound["unbound_answers"], serde_json::json!(["alpha", "zeta"]));
}

#[test]
fn test_write_reconciliation() {
    let dir = TempDir::new().unwrap();
    let questions = vec![
        Question::new(1, "a", "Plato", "guesstrain"),
        Question::new(2, "b", "Nobody", "guesstrain"),
    ];
    let answer_map = BTreeMap::from([("Plato".to_string(), "Plato".to_string())]);
    let output = reconcile(
        questions,
        &answer_map,
        &NoAnnotations,
        &ReconcileConfig::default(),
    );

    let (report_path, mapped_path) = write_reconciliation(&output, dir.path()).unwrap();
    assert!(report_path.ends_with(MATCH_REPORT_FILE));

    let report = read_json(&report_path);
    assert_eq!(report["match_report"]["1"]["result"], "automatic");
    assert_eq!(report["match_report"]["2"]["result"], "none");
    assert_eq!(report["train_unmatched"][0]["qanta_id"], 2);
    assert_eq!(report["test_unmatched"], serde_json::json!([]));
    assert!(report.get("mapped").is_none());

    let mapped = read_json(&mapped_path);
    assert_eq!(mapped["questions"][0]["page"], "Plato");
}

#[test]
fn test_output_path_must_be_directory() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("not_a_dir");
    fs::write(&file, "").unwrap();
    let result = write_answer_map(&BTreeMap::new(), &[], &file);
    assert!(matches!(result, Err(qanta::Error::Config(_))));
}
