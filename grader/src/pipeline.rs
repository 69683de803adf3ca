//! The three phases of a grading run, in order: extract, grade, record.

use anyhow::Context;
use code_manager::coordinator::{BatchReport, grade_all};
use code_manager::manager::manager::GradingManager;
use util::config::AppConfig;
use util::registry::SubmissionRegistry;

use crate::cli::Inputs;
use crate::extractor::{EntryOutcome, ExtractOptions, extract_all};
use crate::gradebook::{Gradebook, generate_gradebook};

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub outcomes: Vec<EntryOutcome>,
    pub registry: SubmissionRegistry,
    pub batch: BatchReport,
    pub gradebook: Gradebook,
}

/// Runs the whole batch with one worker per available CPU.
pub async fn run(inputs: &Inputs, config: &AppConfig) -> anyhow::Result<RunSummary> {
    let manager = GradingManager::with_available_parallelism(config.execution_config());
    run_with(inputs, config, &manager).await
}

pub async fn run_with(
    inputs: &Inputs,
    config: &AppConfig,
    manager: &GradingManager,
) -> anyhow::Result<RunSummary> {
    println!("Submission:  {}", inputs.submission.display());
    println!();

    let extraction = extract_all(&inputs.submission, &ExtractOptions::from_config(config))
        .context("failed to extract submissions")?;
    tracing::info!(
        extracted = extraction.count_extracted(),
        entries = extraction.outcomes.len(),
        "Extraction finished"
    );
    let outcomes = extraction.outcomes;
    let mut registry = extraction.registry;

    println!("2) Grading Assignments");
    let batch = grade_all(manager, &mut registry).await;
    println!();
    println!(
        "\tCompleted grading in {:.2} seconds.",
        batch.elapsed.as_secs_f64()
    );
    println!();

    println!("3) Generating Gradebook");
    let gradebook = generate_gradebook(&inputs.template, &registry, &config.output_dir)
        .with_context(|| format!("failed to generate gradebook from {}", inputs.template.display()))?;
    println!("\tAssignment Name: '{}'", gradebook.assignment.name);
    println!("\tAssignment ID:\t {}", gradebook.assignment.id);
    println!("\tGradebook File:\t {}", gradebook.path.display());
    println!();

    Ok(RunSummary {
        outcomes,
        registry,
        batch,
        gradebook,
    })
}
