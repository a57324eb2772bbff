use clap::Parser;
use qanta_core::{EngineConfig, MatchResult, ReconcileConfig};
use std::path::PathBuf;
use tracing::{error, info};

mod pipeline;

use pipeline::{Pipeline, PipelineInputs};

#[derive(Parser, Debug)]
#[command(name = "qanta-map")]
#[command(about = "Map quiz bowl answers onto canonical page titles")]
#[command(version)]
struct Args {
    /// Canonical title set (one per line, or a JSON array)
    #[arg(long)]
    titles: PathBuf,

    /// Redirect map (source,target CSV, or a JSON object)
    #[arg(long)]
    redirects: PathBuf,

    /// Questions document ({"questions": [...]})
    #[arg(long)]
    questions: PathBuf,

    /// Manual annotation mapping; without it only automatic matches apply
    #[arg(long)]
    annotations: Option<PathBuf>,

    /// Directory receiving the answer map and reports
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Folds whose unmatched questions count as training (repeatable)
    #[arg(long = "train-fold")]
    train_folds: Vec<String>,

    /// Do not retry lookups with spaces replaced by underscores
    #[arg(long)]
    no_underscore_fallback: bool,

    /// Log level (debug, info, warn, error); RUST_LOG overrides
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            underscore_fallback: !self.no_underscore_fallback,
            ..Default::default()
        }
    }

    fn reconcile_config(&self) -> ReconcileConfig {
        if self.train_folds.is_empty() {
            ReconcileConfig::default()
        } else {
            ReconcileConfig {
                train_folds: self.train_folds.clone(),
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    qanta::tracing::init_with_filter(&args.log_level);

    info!("qanta-map {}", env!("CARGO_PKG_VERSION"));

    let inputs = PipelineInputs {
        titles: args.titles.clone(),
        redirects: args.redirects.clone(),
        questions: args.questions.clone(),
        annotations: args.annotations.clone(),
        output_dir: args.output_dir.clone(),
    };
    let pipeline = Pipeline::new(args.engine_config(), args.reconcile_config());

    match pipeline.run(&inputs) {
        Ok(summary) => {
            let disagreements = summary
                .outcomes
                .get(&MatchResult::Disagree)
                .copied()
                .unwrap_or(0);
            info!(
                "done: {} answers mapped, {} unbound, {} manual/automatic disagreements",
                summary.mapping.total_mapped, summary.unbound_answers, disagreements
            );
        }
        Err(e) => {
            error!("answer mapping failed: {}", e);
            std::process::exit(1);
        }
    }
}
