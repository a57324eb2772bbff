//! QANTA Answer Resolution Engine
//!
//! Maps noisy free-text quiz bowl answers onto canonical page titles drawn
//! from a reference title set and a redirect map, then reconciles those
//! automatic matches with a manually curated mapping, question by question.
//!
//! Everything here is a deterministic, in-memory computation: no I/O, no
//! logging. Progress comes back as data (`MappingReport`).
//!
//! # Features
//!
//! - `parallel` - Evaluate candidates of a match-rule pass in parallel via rayon
//! - `wasm` - WASM-compatible build (excludes native-only features)
//!
//! # Example
//!
//! ```rust
//! use qanta_core::{MappingEngine, ReferenceIndex};
//! use std::collections::{HashMap, HashSet};
//!
//! let titles: HashSet<String> = ["Soviet Union".to_string()].into();
//! let redirects: HashMap<String, String> =
//!     [("USSR".to_string(), "Soviet Union".to_string())].into();
//! let index = ReferenceIndex::build(&titles, &redirects);
//!
//! let answers: HashSet<String> = ["USSR".to_string()].into();
//! let resolution = MappingEngine::new().resolve(&index, &answers).unwrap();
//! assert_eq!(resolution.answer_map["USSR"], "Soviet Union");
//! ```

pub mod engine;
pub mod error;
pub mod fold;
pub mod index;
pub mod reconcile;
pub mod rules;

// Re-export main types at crate root
pub use engine::{
    resolve, EngineConfig, ExpansionStat, MappingEngine, MappingReport, PassStat, Provenance,
    Resolution,
};
pub use error::{ResolveError, ResolveResult};
pub use index::{IndexStats, LookupTier, ReferenceIndex};
pub use reconcile::{
    classify, distinct_answers, group_by_answer, reconcile, Annotation, MatchRecord, MatchResult,
    NoAnnotations, PageAssigner, Question, ReconcileConfig, ReconcileOutput,
};
pub use rules::{default_expansion_rules, default_match_rules, ExpansionRule, MatchRule, RuleSet};
