//! Reconciliation types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A quiz bowl question as supplied by the dataset.
///
/// Only the fields reconciliation reads are typed; everything else rides
/// along in `extra` so records round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub qanta_id: i64,
    pub text: String,
    pub answer: String,
    #[serde(default)]
    pub page: Option<String>,
    pub fold: String,
    #[serde(default)]
    pub proto_id: Option<String>,
    #[serde(default)]
    pub qdb_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    pub fn new(
        qanta_id: i64,
        text: impl Into<String>,
        answer: impl Into<String>,
        fold: impl Into<String>,
    ) -> Self {
        Self {
            qanta_id,
            text: text.into(),
            answer: answer.into(),
            page: None,
            fold: fold.into(),
            proto_id: None,
            qdb_id: None,
            extra: Map::new(),
        }
    }

    pub fn proto_id(mut self, proto_id: impl Into<String>) -> Self {
        self.proto_id = Some(proto_id.into());
        self
    }

    pub fn qdb_id(mut self, qdb_id: i64) -> Self {
        self.qdb_id = Some(qdb_id);
        self
    }
}

/// Result of a manual annotation lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub page: Option<String>,
    /// Error code reported by the annotation source, kept verbatim
    pub error: Option<String>,
}

impl Annotation {
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>) -> Self {
        Self {
            page: None,
            error: Some(code.into()),
        }
    }
}

/// Manual page assignment capability.
///
/// Keyed on question-level fields, not just the answer text, so it is
/// queried once per question.
pub trait PageAssigner {
    fn maybe_assign(
        &self,
        answer: &str,
        question_text: &str,
        qdb_id: Option<i64>,
        proto_id: Option<&str>,
    ) -> Annotation;
}

impl<T: PageAssigner + ?Sized> PageAssigner for &T {
    fn maybe_assign(
        &self,
        answer: &str,
        question_text: &str,
        qdb_id: Option<i64>,
        proto_id: Option<&str>,
    ) -> Annotation {
        (**self).maybe_assign(answer, question_text, qdb_id, proto_id)
    }
}

/// Annotation source with no entries
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnnotations;

impl PageAssigner for NoAnnotations {
    fn maybe_assign(&self, _: &str, _: &str, _: Option<i64>, _: Option<&str>) -> Annotation {
        Annotation::default()
    }
}

/// How a question's page was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "annotated")]
    Annotated,
    #[serde(rename = "automatic")]
    Automatic,
    #[serde(rename = "annotated+automatic")]
    AnnotatedAutomatic,
    #[serde(rename = "disagree")]
    Disagree,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Annotated => write!(f, "annotated"),
            Self::Automatic => write!(f, "automatic"),
            Self::AnnotatedAutomatic => write!(f, "annotated+automatic"),
            Self::Disagree => write!(f, "disagree"),
        }
    }
}

/// Per-question audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub result: MatchResult,
    pub annotated_error: Option<String>,
    /// Automatic lookups never fail partially; always `None`
    pub automatic_error: Option<String>,
    pub annotated_page: Option<String>,
    pub automatic_page: Option<String>,
}

impl MatchRecord {
    /// Page assigned to the question, manual winning on conflict
    pub fn assigned_page(&self) -> Option<&str> {
        match self.result {
            MatchResult::None => None,
            MatchResult::Automatic => self.automatic_page.as_deref(),
            MatchResult::Annotated | MatchResult::AnnotatedAutomatic | MatchResult::Disagree => {
                self.annotated_page.as_deref()
            }
        }
    }
}

/// Reconciliation configuration
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Folds routed to `train_unmatched`; every other fold is test
    pub train_folds: Vec<String>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            train_folds: vec!["guesstrain".to_string(), "buzztrain".to_string()],
        }
    }
}

impl ReconcileConfig {
    pub fn is_train_fold(&self, fold: &str) -> bool {
        self.train_folds.iter().any(|f| f == fold)
    }
}

/// Output of reconciliation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutput {
    /// Questions that received a page
    #[serde(skip)]
    pub mapped: Vec<Question>,
    pub train_unmatched: Vec<Question>,
    pub test_unmatched: Vec<Question>,
    pub match_report: BTreeMap<i64, MatchRecord>,
}

impl ReconcileOutput {
    /// Number of questions per outcome
    pub fn counts(&self) -> BTreeMap<MatchResult, usize> {
        let mut counts = BTreeMap::new();
        for record in self.match_report.values() {
            *counts.entry(record.result).or_insert(0) += 1;
        }
        counts
    }
}
