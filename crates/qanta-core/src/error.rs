//! Resolution error types

use thiserror::Error;

/// Errors that abort a resolution run.
///
/// Rules are total functions over strings; any of these means the rule set
/// itself was built wrong, so the run stops instead of skipping input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A match rule produced no formatted string for a candidate
    #[error("match rule '{rule}' produced no output for candidate {input:?}")]
    InvalidRuleOutput { rule: String, input: String },

    /// Two rules of the same kind share a name
    #[error("duplicate {kind} rule: {name}")]
    DuplicateRule { kind: &'static str, name: String },

    /// No match rules were supplied
    #[error("rule set has no match rules")]
    EmptyRuleSet,
}

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;
