//! Reading resolution inputs and writing its outputs.

use crate::error::{Error, Result};
use crate::tracing::prefix;
use qanta_core::{Question, ReconcileOutput};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use crate::redirects::parse_redirects;

pub const ANSWER_MAP_FILE: &str = "answer_map.json";
pub const UNBOUND_ANSWERS_FILE: &str = "unbound_answers.json";
pub const MATCH_REPORT_FILE: &str = "match_report.json";
pub const MAPPED_QUESTIONS_FILE: &str = "mapped_questions.json";

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Read the canonical title set.
///
/// `.json` files hold an array of strings; anything else is one title per
/// line, blank lines ignored.
pub fn read_titles(path: impl AsRef<Path>) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let titles: HashSet<String> = if is_json(path) {
        serde_json::from_str(&contents)?
    } else {
        contents
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };
    info!("{} read {} titles from {}", prefix::IO, titles.len(), path.display());
    Ok(titles)
}

/// Read the raw redirect map: a JSON object for `.json`, CSV otherwise
pub fn read_redirects(path: impl AsRef<Path>) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let redirects: HashMap<String, String> = if is_json(path) {
        serde_json::from_str(&contents)?
    } else {
        parse_redirects(&contents)?
    };
    info!(
        "{} read {} redirects from {}",
        prefix::IO,
        redirects.len(),
        path.display()
    );
    Ok(redirects)
}

#[derive(Debug, Serialize, Deserialize)]
struct QuestionsDocument {
    questions: Vec<Question>,
}

/// Read questions from a `{"questions": [...]}` document
pub fn read_questions(path: impl AsRef<Path>) -> Result<Vec<Question>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let doc: QuestionsDocument = serde_json::from_str(&contents)?;
    info!(
        "{} read {} questions from {}",
        prefix::IO,
        doc.questions.len(),
        path.display()
    );
    Ok(doc.questions)
}

#[derive(Serialize)]
struct AnswerMapDocument<'a> {
    answer_map: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct UnboundDocument<'a> {
    unbound_answers: &'a [String],
}

#[derive(Serialize)]
struct MappedQuestionsDocument<'a> {
    questions: &'a [Question],
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Config(format!(
            "output path {} is not a directory",
            dir.display()
        )));
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    debug!("{} wrote {}", prefix::IO, path.display());
    Ok(())
}

/// Write `answer_map.json` and `unbound_answers.json` into `dir`.
///
/// Unbound answers are written sorted. Returns the two paths.
pub fn write_answer_map(
    answer_map: &BTreeMap<String, String>,
    unbound_answers: &[String],
    dir: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    ensure_dir(dir)?;

    let mut unbound = unbound_answers.to_vec();
    unbound.sort();

    let map_path = dir.join(ANSWER_MAP_FILE);
    let unbound_path = dir.join(UNBOUND_ANSWERS_FILE);
    write_json(&map_path, &AnswerMapDocument { answer_map })?;
    write_json(
        &unbound_path,
        &UnboundDocument {
            unbound_answers: &unbound,
        },
    )?;
    Ok((map_path, unbound_path))
}

/// Write `match_report.json` and `mapped_questions.json` into `dir`
pub fn write_reconciliation(
    output: &ReconcileOutput,
    dir: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    ensure_dir(dir)?;

    let report_path = dir.join(MATCH_REPORT_FILE);
    let mapped_path = dir.join(MAPPED_QUESTIONS_FILE);
    write_json(&report_path, output)?;
    write_json(
        &mapped_path,
        &MappedQuestionsDocument {
            questions: &output.mapped,
        },
    )?;
    Ok((report_path, mapped_path))
}
