//! End-to-end run: load inputs, resolve answers, reconcile, write reports.

use qanta::io::{read_questions, read_redirects, read_titles, write_answer_map, write_reconciliation};
use qanta::tracing::prefix;
use qanta::{AnnotatedMapping, Result};
use qanta_core::{
    distinct_answers, reconcile, EngineConfig, MappingEngine, MappingReport, MatchResult,
    ReconcileConfig, ReferenceIndex,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Paths for one run
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub titles: PathBuf,
    pub redirects: PathBuf,
    pub questions: PathBuf,
    pub annotations: Option<PathBuf>,
    pub output_dir: PathBuf,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub mapping: MappingReport,
    pub outcomes: BTreeMap<MatchResult, usize>,
    pub unbound_answers: usize,
}

pub struct Pipeline {
    engine: MappingEngine,
    reconcile: ReconcileConfig,
}

impl Pipeline {
    pub fn new(engine: EngineConfig, reconcile: ReconcileConfig) -> Self {
        Self {
            engine: MappingEngine::new().config(engine),
            reconcile,
        }
    }

    pub fn run(&self, inputs: &PipelineInputs) -> Result<PipelineSummary> {
        let questions = read_questions(&inputs.questions)?;
        let titles = read_titles(&inputs.titles)?;
        let redirects = read_redirects(&inputs.redirects)?;
        let annotations = match &inputs.annotations {
            Some(path) => AnnotatedMapping::load(path)?,
            None => {
                warn!("{} no annotation file given, using automatic matches only", prefix::RECONCILE);
                AnnotatedMapping::new()
            }
        };

        let index = ReferenceIndex::build(&titles, &redirects);
        let stats = index.stats();
        info!("{} reference index: {}", prefix::MAP, stats);

        let answers = distinct_answers(&questions);
        info!("{} {} unmapped answers, starting answer mapping", prefix::MAP, answers.len());

        let resolution = self.engine.resolve(&index, &answers)?;
        log_mapping(&resolution.report);

        let unbound = resolution.unbound_answers();
        let (map_path, unbound_path) =
            write_answer_map(&resolution.answer_map, &unbound, &inputs.output_dir)?;
        info!(
            "{} wrote {} and {}",
            prefix::IO,
            map_path.display(),
            unbound_path.display()
        );

        let output = reconcile(questions, &resolution.answer_map, &annotations, &self.reconcile);
        let outcomes = output.counts();
        for (result, count) in &outcomes {
            info!("{} {}: {}", prefix::RECONCILE, result, count);
        }
        info!(
            "{} {} train and {} test questions unmatched",
            prefix::RECONCILE,
            output.train_unmatched.len(),
            output.test_unmatched.len()
        );

        let (report_path, mapped_path) = write_reconciliation(&output, &inputs.output_dir)?;
        info!(
            "{} wrote {} and {}",
            prefix::IO,
            report_path.display(),
            mapped_path.display()
        );

        Ok(PipelineSummary {
            mapping: resolution.report,
            outcomes,
            unbound_answers: unbound.len(),
        })
    }
}

fn log_mapping(report: &MappingReport) {
    for stat in &report.expansions {
        info!(
            "{} expansion rule {}: {} candidates added",
            prefix::MAP,
            stat.rule,
            stat.candidates_added
        );
    }
    for pass in &report.passes {
        info!(
            "{} rule {}: {} answers mapped, {} remain",
            prefix::MAP,
            pass.rule,
            pass.mapped,
            pass.remaining
        );
    }
    info!(
        "{} answer mapping complete: {} unmapped remain, {} mappings found",
        prefix::MAP,
        report.initial_unmapped - report.total_mapped,
        report.total_mapped
    );
}
