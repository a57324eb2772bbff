//! File-backed manual page assignments.
//!
//! A JSON document with four sections, consulted in order:
//!
//! ```json
//! {
//!   "qdb_ids":     { "1234": "Page" },
//!   "proto_ids":   { "5476992dea23cca90550b622": "Page" },
//!   "unambiguous": { "answer text": "Page" },
//!   "ambiguous":   { "answer text": [ { "page": "Page", "words": ["w1", "w2"] } ] }
//! }
//! ```
//!
//! Ambiguous answers are settled by the question text: an entry applies when
//! all of its words occur in the text.

use crate::error::Result;
use qanta_core::{Annotation, PageAssigner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Error code: no ambiguous entry matched the question text
pub const AMBIGUOUS_NO_MATCH: &str = "ambiguous_no_match";
/// Error code: several ambiguous entries matched the question text
pub const AMBIGUOUS_MULTIPLE_MATCHES: &str = "ambiguous_multiple_matches";

/// One candidate page for an ambiguous answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousEntry {
    pub page: String,
    /// Words that must all appear in the question text
    pub words: Vec<String>,
}

impl AmbiguousEntry {
    fn matches(&self, text_lower: &str) -> bool {
        self.words
            .iter()
            .all(|w| text_lower.contains(&w.to_lowercase()))
    }
}

/// Manual answer mapping loaded from disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedMapping {
    #[serde(default)]
    pub qdb_ids: HashMap<i64, String>,
    #[serde(default)]
    pub proto_ids: HashMap<String, String>,
    #[serde(default)]
    pub unambiguous: HashMap<String, String>,
    #[serde(default)]
    pub ambiguous: HashMap<String, Vec<AmbiguousEntry>>,
}

impl AnnotatedMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total number of entries across all sections
    pub fn len(&self) -> usize {
        self.qdb_ids.len() + self.proto_ids.len() + self.unambiguous.len() + self.ambiguous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn assign_ambiguous(entries: &[AmbiguousEntry], question_text: &str) -> Annotation {
        let text_lower = question_text.to_lowercase();
        let mut matching = entries.iter().filter(|e| e.matches(&text_lower));
        match (matching.next(), matching.next()) {
            (Some(entry), None) => Annotation::page(entry.page.clone()),
            (None, _) => Annotation::error(AMBIGUOUS_NO_MATCH),
            (Some(_), Some(_)) => Annotation::error(AMBIGUOUS_MULTIPLE_MATCHES),
        }
    }
}

impl PageAssigner for AnnotatedMapping {
    fn maybe_assign(
        &self,
        answer: &str,
        question_text: &str,
        qdb_id: Option<i64>,
        proto_id: Option<&str>,
    ) -> Annotation {
        if let Some(page) = qdb_id.and_then(|id| self.qdb_ids.get(&id)) {
            return Annotation::page(page.clone());
        }
        if let Some(page) = proto_id.and_then(|id| self.proto_ids.get(id)) {
            return Annotation::page(page.clone());
        }
        if let Some(page) = self.unambiguous.get(answer) {
            return Annotation::page(page.clone());
        }
        match self.ambiguous.get(answer) {
            Some(entries) => Self::assign_ambiguous(entries, question_text),
            None => Annotation::default(),
        }
    }
}
