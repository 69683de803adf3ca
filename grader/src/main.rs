use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use grader::cli::Args;
use grader::logging::init_logging;
use grader::pipeline;
use util::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let inputs = match args.resolve() {
        Ok(inputs) => inputs,
        Err(err) => {
            println!("{err}");
            return ExitCode::from(1);
        }
    };

    let config = AppConfig::global().clone();
    let _log_guard = init_logging(&config);

    tracing::info!(
        submission = %inputs.submission.display(),
        template = %inputs.template.display(),
        "Starting grading run"
    );

    match pipeline::run(&inputs, &config).await {
        Ok(summary) => {
            tracing::info!(
                graded = summary.batch.grades.len(),
                gradebook = %summary.gradebook.path.display(),
                "Grading run complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Grading run failed");
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
