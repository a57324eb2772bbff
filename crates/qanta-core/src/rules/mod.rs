//! Normalization rule set.
//!
//! Two ordered lists of named, pure functions:
//!
//! - **Expansion rules** widen one answer into extra candidates
//!   (`&str -> Vec<String>`). They are applied independently, never chained.
//! - **Match rules** reformat a candidate right before lookup
//!   (`&str -> Option<String>`). Each one drives a full lookup pass; a `None`
//!   output is a rule defect and aborts the run.
//!
//! # Default rules
//!
//! Expansion: `or`, `the`, `prompt`, `apostrophe`, `parens`, `unicode`, `sir`,
//! `answer`, `optional-text`.
//!
//! Match: `exact match`, `braces`, `quotes`, `parens`, `braces+quotes`,
//! `braces+plural`, `quotes+braces+plural`.

mod expansion;
mod lemma;
mod matching;

pub use expansion::{
    answer_label_strip, apostrophe, optional_text_strip, or_split, parens_strip, prompt_extract,
    sir_strip, the_toggle, unicode_fold,
};
pub use lemma::singularize;
pub use matching::{collapse_whitespace, remove_braces, remove_parens, remove_quotes};

use crate::error::{ResolveError, ResolveResult};
use std::collections::HashSet;

/// A named expansion rule
#[derive(Debug, Clone, Copy)]
pub struct ExpansionRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Vec<String>,
}

impl ExpansionRule {
    pub const fn new(name: &'static str, apply: fn(&str) -> Vec<String>) -> Self {
        Self { name, apply }
    }
}

/// A named match rule
#[derive(Debug, Clone, Copy)]
pub struct MatchRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<String>,
}

impl MatchRule {
    pub const fn new(name: &'static str, apply: fn(&str) -> Option<String>) -> Self {
        Self { name, apply }
    }
}

/// Expansion rules in their fixed order
pub fn default_expansion_rules() -> Vec<ExpansionRule> {
    vec![
        ExpansionRule::new("or", or_split),
        ExpansionRule::new("the", the_toggle),
        ExpansionRule::new("prompt", prompt_extract),
        ExpansionRule::new("apostrophe", apostrophe),
        ExpansionRule::new("parens", parens_strip),
        ExpansionRule::new("unicode", unicode_fold),
        ExpansionRule::new("sir", sir_strip),
        ExpansionRule::new("answer", answer_label_strip),
        ExpansionRule::new("optional-text", optional_text_strip),
    ]
}

/// Match rules in their fixed order
pub fn default_match_rules() -> Vec<MatchRule> {
    vec![
        MatchRule::new("exact match", matching::identity),
        MatchRule::new("braces", matching::braces),
        MatchRule::new("quotes", matching::quotes),
        MatchRule::new("parens", matching::parens),
        MatchRule::new("braces+quotes", matching::braces_quotes),
        MatchRule::new("braces+plural", matching::braces_plural),
        MatchRule::new("quotes+braces+plural", matching::braces_quotes_plural),
    ]
}

/// Validated, ordered rule set
#[derive(Debug, Clone)]
pub struct RuleSet {
    expansion: Vec<ExpansionRule>,
    matching: Vec<MatchRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            expansion: default_expansion_rules(),
            matching: default_match_rules(),
        }
    }
}

impl RuleSet {
    /// Build a rule set, rejecting duplicate names and an empty match list
    pub fn new(expansion: Vec<ExpansionRule>, matching: Vec<MatchRule>) -> ResolveResult<Self> {
        if matching.is_empty() {
            return Err(ResolveError::EmptyRuleSet);
        }
        check_unique("expansion", expansion.iter().map(|r| r.name))?;
        check_unique("match", matching.iter().map(|r| r.name))?;
        Ok(Self {
            expansion,
            matching,
        })
    }

    pub fn expansion_rules(&self) -> &[ExpansionRule] {
        &self.expansion
    }

    pub fn match_rules(&self) -> &[MatchRule] {
        &self.matching
    }
}

fn check_unique<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> ResolveResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ResolveError::DuplicateRule {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
