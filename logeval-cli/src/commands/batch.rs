//! Batch command implementation

use crate::config::CliConfig;
use crate::input::{find_ground_truth, find_prediction, list_subdirs, load_external, LabelReader};
use crate::output::{OutputFormatter, RunStore, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use logeval_core::{BatchEvaluator, BatchSummary, EvaluationJob, EvaluatorConfig, JobOutcome};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Arguments for the batch command
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Root holding one ground-truth directory per dataset
    #[arg(long = "datasets", value_name = "DIR", required = true)]
    pub datasets_root: PathBuf,

    /// Root holding `<method>/<dataset>/` parser outputs
    #[arg(long = "predictions", value_name = "DIR", required = true)]
    pub predictions_root: PathBuf,

    /// Methods to evaluate (default: every directory under --predictions)
    #[arg(short, long = "method", value_name = "NAME", value_delimiter = ',')]
    pub methods: Vec<String>,

    /// Datasets to evaluate (default: every directory under --datasets)
    #[arg(short, long = "dataset", value_name = "NAME", value_delimiter = ',')]
    pub datasets: Vec<String>,

    /// Where run directories are created (default: output.results_dir from the config)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Merge precomputed results from a JSON file or the newest JSON in a directory
    #[arg(long, value_name = "PATH")]
    pub include: Option<PathBuf>,

    /// Method name for included results that do not carry one
    #[arg(long, value_name = "NAME", default_value = "External")]
    pub include_as: String,

    /// Only compute GA and PA
    #[arg(long)]
    pub strict: bool,

    /// Evaluate pairs one after another
    #[arg(long)]
    pub sequential: bool,
}

/// Position of a pair in the final output
enum Slot {
    /// Loaded; its outcome comes from the evaluator in job order
    Pending,
    /// Failed before evaluation
    Done(JobOutcome),
}

/// Labels and the file they came from, or why they could not be read
type LoadedLabels = std::result::Result<(PathBuf, Vec<String>), String>;

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self, config: &CliConfig, quiet: bool) -> Result<()> {
        self.configure_threads(config);

        let methods = self.selected(&self.methods, &self.predictions_root)?;
        let datasets = self.selected(&self.datasets, &self.datasets_root)?;
        log::info!(
            "Evaluating {} methods on {} datasets",
            methods.len(),
            datasets.len()
        );

        let reader = LabelReader::new(config.columns.label_candidates.clone());
        let mut progress = ProgressReporter::new(quiet);
        progress.init_jobs((methods.len() * datasets.len()) as u64);

        let truths = self.load_truths(&reader, &datasets);
        let mut slots = Vec::new();
        let mut jobs = Vec::new();

        for method in &methods {
            let method_dir = self.predictions_root.join(method);
            if !method_dir.is_dir() {
                log::warn!("Skipping {method}: {} not found", method_dir.display());
                for dataset in &datasets {
                    progress.job_loaded(method, dataset);
                }
                continue;
            }

            for dataset in &datasets {
                let Some(truth) = truths.get(dataset) else {
                    progress.job_loaded(method, dataset);
                    continue;
                };
                let pred_dir = method_dir.join(dataset);
                if !pred_dir.is_dir() {
                    log::warn!("Skipping {method}/{dataset}: no output directory");
                    progress.job_loaded(method, dataset);
                    continue;
                }

                let loaded = truth.clone().and_then(|truth| {
                    load_prediction(&reader, &pred_dir)
                        .map(|pred| (truth, pred))
                        .map_err(|e| format!("{e:#}"))
                });
                match loaded {
                    Ok(((gt_file, truth), (pred_file, pred))) => {
                        jobs.push(
                            EvaluationJob::new(method, dataset, truth, pred).with_sources(
                                gt_file.display().to_string(),
                                pred_file.display().to_string(),
                            ),
                        );
                        slots.push(Slot::Pending);
                    }
                    Err(error) => {
                        log::warn!("{method}/{dataset}: {error}");
                        slots.push(Slot::Done(JobOutcome::failed(method, dataset, error)));
                    }
                }
                progress.job_loaded(method, dataset);
            }
        }
        progress.finish();

        let evaluator =
            BatchEvaluator::new(self.evaluator_config(config)).parallel(self.parallel(config));
        progress.init_evaluation(jobs.len() as u64);
        let evaluated = evaluator.run_with_progress(&jobs, |outcome| {
            progress.job_evaluated(&outcome.method, &outcome.dataset)
        });
        progress.finish();

        let mut evaluated = evaluated.into_iter();
        let mut outcomes: Vec<JobOutcome> = slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Pending => evaluated.next(),
                Slot::Done(outcome) => Some(outcome),
            })
            .collect();

        if let Some(include) = &self.include {
            match load_external(include, &self.include_as, &datasets) {
                Ok(external) => outcomes.extend(external),
                Err(e) => log::warn!("Ignoring {}: {e:#}", include.display()),
            }
        }

        if outcomes.is_empty() {
            log::warn!("Nothing to evaluate");
            return Ok(());
        }

        let mut formatter = TextFormatter::stdout();
        for outcome in &outcomes {
            formatter.format_outcome(outcome)?;
        }
        formatter.finish()?;

        let summary = BatchSummary::from_outcomes(&outcomes);
        println!("{} succeeded, {} failed", summary.succeeded, summary.failed);

        let results_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.results_dir.clone());
        let files = RunStore::new(results_dir)
            .pretty_json(config.output.pretty_json)
            .save(&outcomes, &summary)?;
        println!("[write] {}", files.json.display());
        println!("[write] {}", files.csv.display());

        Ok(())
    }

    fn selected(&self, given: &[String], root: &Path) -> Result<Vec<String>> {
        if given.is_empty() {
            list_subdirs(root)
        } else {
            Ok(given.to_vec())
        }
    }

    /// Ground truth is read once per dataset and shared by every method
    fn load_truths(
        &self,
        reader: &LabelReader,
        datasets: &[String],
    ) -> BTreeMap<String, LoadedLabels> {
        let mut truths = BTreeMap::new();
        for dataset in datasets {
            let dir = self.datasets_root.join(dataset);
            if !dir.is_dir() {
                log::warn!("Skipping dataset {dataset}: {} not found", dir.display());
                continue;
            }
            let labels = find_ground_truth(&dir)
                .and_then(|path| reader.read_path(&path).map(|labels| (path, labels)))
                .map_err(|e| format!("{e:#}"));
            truths.insert(dataset.clone(), labels);
        }
        truths
    }

    fn evaluator_config(&self, config: &CliConfig) -> EvaluatorConfig {
        if self.strict {
            EvaluatorConfig::strict_only()
        } else {
            config.evaluator_config()
        }
    }

    fn parallel(&self, config: &CliConfig) -> bool {
        !self.sequential && config.performance.parallel
    }

    fn configure_threads(&self, config: &CliConfig) {
        let threads = config.performance.effective_threads();
        if threads == 0 {
            log::debug!("Using all {} CPUs", num_cpus::get());
            return;
        }

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            log::warn!("Could not configure {threads} worker threads: {e}");
        }
    }
}

fn load_prediction(reader: &LabelReader, pred_dir: &Path) -> Result<(PathBuf, Vec<String>)> {
    let path = find_prediction(pred_dir)?;
    let labels = reader
        .read_path(&path)
        .with_context(|| format!("Failed to load prediction {}", path.display()))?;
    Ok((path, labels))
}
