//! Reconciliation of automatic and manual page assignments.
//!
//! Runs per question: the manual source keys on question-level ids, so two
//! questions sharing an answer string can still end up on different pages.
//!
//! | annotated | automatic | result                | page      |
//! |-----------|-----------|-----------------------|-----------|
//! | -         | -         | `none`                | unchanged |
//! | yes       | -         | `annotated`           | annotated |
//! | -         | yes       | `automatic`           | automatic |
//! | equal     | equal     | `annotated+automatic` | shared    |
//! | differ    | differ    | `disagree`            | annotated |

mod types;

pub use types::{
    Annotation, MatchRecord, MatchResult, NoAnnotations, PageAssigner, Question, ReconcileConfig,
    ReconcileOutput,
};

use std::collections::{BTreeMap, BTreeSet};

/// Classify one question from its two candidate pages
pub fn classify(annotated: Option<&str>, automatic: Option<&str>) -> MatchResult {
    match (annotated, automatic) {
        (None, None) => MatchResult::None,
        (Some(_), None) => MatchResult::Annotated,
        (None, Some(_)) => MatchResult::Automatic,
        (Some(a), Some(b)) if a == b => MatchResult::AnnotatedAutomatic,
        (Some(_), Some(_)) => MatchResult::Disagree,
    }
}

/// Merge `answer_map` with manual annotations, question by question.
///
/// Every question gets exactly one audit record. Questions that receive a
/// page land in `mapped`; the rest are split into train/test by fold.
pub fn reconcile<P>(
    questions: Vec<Question>,
    answer_map: &BTreeMap<String, String>,
    assigner: &P,
    config: &ReconcileConfig,
) -> ReconcileOutput
where
    P: PageAssigner + ?Sized,
{
    let mut output = ReconcileOutput::default();

    for mut question in questions {
        let annotation = assigner.maybe_assign(
            &question.answer,
            &question.text,
            question.qdb_id,
            question.proto_id.as_deref(),
        );
        let automatic_page = answer_map.get(&question.answer).cloned();

        let record = MatchRecord {
            result: classify(annotation.page.as_deref(), automatic_page.as_deref()),
            annotated_error: annotation.error,
            automatic_error: None,
            annotated_page: annotation.page,
            automatic_page,
        };

        // Unmatched questions keep whatever page they arrived with
        let assigned = record.assigned_page().map(str::to_string);
        output.match_report.insert(question.qanta_id, record);

        if let Some(page) = assigned {
            question.page = Some(page);
            output.mapped.push(question);
        } else if config.is_train_fold(&question.fold) {
            output.train_unmatched.push(question);
        } else {
            output.test_unmatched.push(question);
        }
    }

    output
}

/// Distinct answer strings across `questions`
pub fn distinct_answers(questions: &[Question]) -> BTreeSet<String> {
    questions.iter().map(|q| q.answer.clone()).collect()
}

/// Questions indexed by answer string, preserving input order per answer
pub fn group_by_answer(questions: &[Question]) -> BTreeMap<&str, Vec<&Question>> {
    let mut groups: BTreeMap<&str, Vec<&Question>> = BTreeMap::new();
    for question in questions {
        groups.entry(question.answer.as_str()).or_default().push(question);
    }
    groups
}
