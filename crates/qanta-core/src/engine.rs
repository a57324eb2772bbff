//! MappingEngine - drives expansion → match → lookup over the answer population

use crate::error::{ResolveError, ResolveResult};
use crate::index::{LookupTier, ReferenceIndex};
use crate::rules::{collapse_whitespace, ExpansionRule, MatchRule, RuleSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
use rayon::prelude::*;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Retry each lookup with spaces replaced by underscores
    pub underscore_fallback: bool,
    /// Minimum unresolved population before a pass runs in parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            underscore_fallback: true,
            parallel_threshold: 1000,
        }
    }
}

/// Why an answer resolved the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Match rule whose pass produced the hit
    pub rule: String,
    pub tier: LookupTier,
    /// Formatted candidate that hit
    pub candidate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionStat {
    pub rule: String,
    pub candidates_added: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStat {
    pub rule: String,
    /// Answers mapped during this pass
    pub mapped: usize,
    /// Answers still unresolved after this pass
    pub remaining: usize,
}

/// Progress and counts for one resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingReport {
    pub initial_unmapped: usize,
    pub redirects_dropped: usize,
    pub expansions: Vec<ExpansionStat>,
    pub passes: Vec<PassStat>,
    pub total_mapped: usize,
}

/// Output of a resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub answer_map: BTreeMap<String, String>,
    pub unmapped: BTreeSet<String>,
    pub provenance: BTreeMap<String, Provenance>,
    pub report: MappingReport,
}

impl Resolution {
    /// Residual unresolved answers, sorted
    pub fn unbound_answers(&self) -> Vec<String> {
        self.unmapped.iter().cloned().collect()
    }
}

/// One answer's successful lookup within a pass
struct Hit {
    answer: String,
    title: String,
    provenance: Provenance,
}

/// Candidate sets keyed by original answer, seed first then rule order
type Candidates = BTreeMap<String, Vec<String>>;

/// Rule-driven answer resolution engine.
///
/// The engine holds only rules and configuration; each `resolve` call is a
/// pure function of the index and the answer population.
#[derive(Debug, Clone, Default)]
pub struct MappingEngine {
    rules: RuleSet,
    config: EngineConfig,
}

impl MappingEngine {
    /// Engine with the default rule set and configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            config: EngineConfig::default(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Resolve every answer in `answers` against `index`.
    ///
    /// Answers are copied on entry; the caller's set is never touched. An
    /// answer mapped by one pass is excluded from every later pass, so a
    /// mapping is never overwritten.
    pub fn resolve<'a, A>(&self, index: &ReferenceIndex, answers: A) -> ResolveResult<Resolution>
    where
        A: IntoIterator<Item = &'a String>,
    {
        let mut unresolved: BTreeSet<String> = answers.into_iter().cloned().collect();
        let mut report = MappingReport {
            initial_unmapped: unresolved.len(),
            redirects_dropped: index.stats().redirects_dropped,
            ..Default::default()
        };

        let candidates = self.expand(&unresolved, &mut report);

        let mut answer_map = BTreeMap::new();
        let mut provenance = BTreeMap::new();

        for rule in self.rules.match_rules() {
            let before = unresolved.len();
            let hits = self.run_pass(rule, index, &unresolved, &candidates)?;

            // Barrier: every hit of this pass lands before the next pass starts
            for hit in hits {
                unresolved.remove(&hit.answer);
                provenance.insert(hit.answer.clone(), hit.provenance);
                answer_map.insert(hit.answer, hit.title);
            }

            report.passes.push(PassStat {
                rule: rule.name.to_string(),
                mapped: before - unresolved.len(),
                remaining: unresolved.len(),
            });
        }

        report.total_mapped = answer_map.len();

        Ok(Resolution {
            answer_map,
            unmapped: unresolved,
            provenance,
            report,
        })
    }

    /// Seed each answer's candidates with itself, then add every expansion
    fn expand(&self, unresolved: &BTreeSet<String>, report: &mut MappingReport) -> Candidates {
        let mut candidates: Candidates = unresolved
            .iter()
            .map(|answer| (answer.clone(), vec![answer.clone()]))
            .collect();

        for rule in self.rules.expansion_rules() {
            let added = apply_expansion(rule, &mut candidates);
            report.expansions.push(ExpansionStat {
                rule: rule.name.to_string(),
                candidates_added: added,
            });
        }

        candidates
    }

    /// One match-rule pass over the unresolved answers - parallel on native
    #[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
    fn run_pass(
        &self,
        rule: &MatchRule,
        index: &ReferenceIndex,
        unresolved: &BTreeSet<String>,
        candidates: &Candidates,
    ) -> ResolveResult<Vec<Hit>> {
        if unresolved.len() >= self.config.parallel_threshold {
            let pending: Vec<&String> = unresolved.iter().collect();
            let hits: Vec<Option<Hit>> = pending
                .par_iter()
                .map(|answer| self.match_answer(rule, index, answer, &candidates[*answer]))
                .collect::<ResolveResult<_>>()?;
            Ok(hits.into_iter().flatten().collect())
        } else {
            self.run_pass_sequential(rule, index, unresolved, candidates)
        }
    }

    /// One match-rule pass over the unresolved answers
    #[cfg(any(target_arch = "wasm32", not(feature = "parallel")))]
    fn run_pass(
        &self,
        rule: &MatchRule,
        index: &ReferenceIndex,
        unresolved: &BTreeSet<String>,
        candidates: &Candidates,
    ) -> ResolveResult<Vec<Hit>> {
        self.run_pass_sequential(rule, index, unresolved, candidates)
    }

    fn run_pass_sequential(
        &self,
        rule: &MatchRule,
        index: &ReferenceIndex,
        unresolved: &BTreeSet<String>,
        candidates: &Candidates,
    ) -> ResolveResult<Vec<Hit>> {
        let mut hits = Vec::new();
        for answer in unresolved {
            if let Some(hit) = self.match_answer(rule, index, answer, &candidates[answer])? {
                hits.push(hit);
            }
        }
        Ok(hits)
    }

    /// Format each candidate with `rule` and look it up; first hit wins
    fn match_answer(
        &self,
        rule: &MatchRule,
        index: &ReferenceIndex,
        answer: &str,
        expansions: &[String],
    ) -> ResolveResult<Option<Hit>> {
        for candidate in expansions {
            let formatted = (rule.apply)(candidate).ok_or_else(|| {
                ResolveError::InvalidRuleOutput {
                    rule: rule.name.to_string(),
                    input: candidate.clone(),
                }
            })?;
            let formatted = collapse_whitespace(&formatted);
            if formatted.is_empty() {
                continue;
            }

            if let Some((tier, title)) = index.lookup(&formatted, self.config.underscore_fallback) {
                return Ok(Some(Hit {
                    answer: answer.to_string(),
                    title: title.to_string(),
                    provenance: Provenance {
                        rule: rule.name.to_string(),
                        tier,
                        candidate: formatted,
                    },
                }));
            }
        }
        Ok(None)
    }
}

/// Add a rule's trimmed outputs to every answer's candidate set.
/// Returns how many new candidates were added.
fn apply_expansion(rule: &ExpansionRule, candidates: &mut Candidates) -> usize {
    let mut added = 0;
    for (answer, expansions) in candidates.iter_mut() {
        for candidate in (rule.apply)(answer) {
            let candidate = candidate.trim();
            if !expansions.iter().any(|c| c == candidate) {
                expansions.push(candidate.to_string());
                added += 1;
            }
        }
    }
    added
}

/// Resolve `unmapped` using explicit rule lists and raw reference inputs.
///
/// Builds the reference index, validates the rules, and runs the engine with
/// the default configuration.
pub fn resolve<'a, T, R, A>(
    expansion_rules: &[ExpansionRule],
    match_rules: &[MatchRule],
    titles: T,
    redirects: R,
    unmapped: A,
) -> ResolveResult<Resolution>
where
    T: IntoIterator<Item = &'a String>,
    R: IntoIterator<Item = (&'a String, &'a String)>,
    A: IntoIterator<Item = &'a String>,
{
    let rules = RuleSet::new(expansion_rules.to_vec(), match_rules.to_vec())?;
    let index = ReferenceIndex::build(titles, redirects);
    MappingEngine::with_rules(rules).resolve(&index, unmapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{default_expansion_rules, default_match_rules};
    use pretty_assertions::assert_eq;
    use std::collections::{HashMap, HashSet};

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn map(items: &[(&str, &str)]) -> HashMap<String, String> {
        items
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn run(titles: &[&str], redirects: &[(&str, &str)], answers: &[&str]) -> Resolution {
        resolve(
            &default_expansion_rules(),
            &default_match_rules(),
            &set(titles),
            &map(redirects),
            &set(answers),
        )
        .unwrap()
    }

    #[test]
    fn test_prompt_clause_resolves_through_lower_tier() {
        let res = run(
            &["Albert Einstein"],
            &[],
            &["albert einstein (accept einstein)"],
        );
        assert_eq!(
            res.answer_map.get("albert einstein (accept einstein)"),
            Some(&"Albert Einstein".to_string())
        );
        assert_eq!(
            res.provenance["albert einstein (accept einstein)"].tier,
            LookupTier::LowerTitle
        );
        assert!(res.unmapped.is_empty());
    }

    #[test]
    fn test_or_split_picks_known_alternative() {
        let res = run(&["Plato"], &[], &["Plato or Socrates"]);
        assert_eq!(res.answer_map["Plato or Socrates"], "Plato");
    }

    #[test]
    fn test_exact_redirect() {
        let res = run(&["Soviet Union"], &[("USSR", "Soviet Union")], &["USSR"]);
        assert_eq!(res.answer_map["USSR"], "Soviet Union");
        assert_eq!(res.provenance["USSR"].tier, LookupTier::ExactRedirect);
        assert_eq!(res.provenance["USSR"].rule, "exact match");
    }

    #[test]
    fn test_unresolvable_answers_are_sorted() {
        let res = run(&["Plato"], &[], &["zzz", "Plato", "aaa"]);
        assert_eq!(res.unbound_answers(), vec!["aaa", "zzz"]);
        assert_eq!(res.report.total_mapped, 1);
    }

    #[test]
    fn test_later_pass_resolves_braced_answer() {
        let res = run(&["Hamlet"], &[], &["{Hamlet}"]);
        assert_eq!(res.answer_map["{Hamlet}"], "Hamlet");
        assert_eq!(res.provenance["{Hamlet}"].rule, "braces");
        assert_eq!(res.report.passes[0].mapped, 0);
        assert_eq!(res.report.passes[1].mapped, 1);
    }

    #[test]
    fn test_plural_pass() {
        let res = run(&["Ent"], &[], &["{Ents}"]);
        assert_eq!(res.answer_map["{Ents}"], "Ent");
        assert_eq!(res.provenance["{Ents}"].rule, "braces+plural");
    }

    #[test]
    fn test_first_candidate_hit_wins() {
        // Seed "Plato or Socrates" misses; or-split adds "Plato" before "Socrates"
        let res = run(&["Plato", "Socrates"], &[], &["Plato or Socrates"]);
        assert_eq!(res.answer_map["Plato or Socrates"], "Plato");
    }

    #[test]
    fn test_pass_counts_are_monotonic() {
        let res = run(
            &["Hamlet", "Plato", "Ent"],
            &[],
            &["Plato", "{Hamlet}", "{Ents}", "nothing at all"],
        );
        let mut previous = res.report.initial_unmapped;
        for pass in &res.report.passes {
            assert!(pass.remaining <= previous);
            assert_eq!(previous - pass.remaining, pass.mapped);
            previous = pass.remaining;
        }
        assert_eq!(previous, 1);
        assert_eq!(res.report.passes.len(), 7);
    }

    #[test]
    fn test_invalid_rule_output_aborts() {
        fn broken(_: &str) -> Option<String> {
            None
        }
        let err = resolve(
            &[],
            &[MatchRule::new("broken", broken)],
            &set(&["Plato"]),
            &map(&[]),
            &set(&["Plato"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidRuleOutput {
                rule: "broken".to_string(),
                input: "Plato".to_string()
            }
        );
    }

    #[test]
    fn test_caller_set_untouched() {
        let answers = set(&["Plato"]);
        let index = ReferenceIndex::build(&set(&["Plato"]), &map(&[]));
        let res = MappingEngine::new().resolve(&index, &answers).unwrap();
        assert_eq!(res.answer_map.len(), 1);
        assert_eq!(answers, set(&["Plato"]));
    }

    #[test]
    fn test_expansion_stats_recorded() {
        let res = run(&[], &[], &["Beyoncé"]);
        let unicode = res
            .report
            .expansions
            .iter()
            .find(|s| s.rule == "unicode")
            .unwrap();
        assert_eq!(unicode.candidates_added, 1);
        assert_eq!(res.report.expansions.len(), 9);
    }

    #[test]
    fn test_dropped_redirects_reported() {
        let res = run(&["Paris"], &[("Lutetia", "Paris"), ("X", "Nowhere")], &[]);
        assert_eq!(res.report.redirects_dropped, 1);
        assert_eq!(res.report.initial_unmapped, 0);
    }
}
