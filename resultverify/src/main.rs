mod args;
mod mapped;
mod verifier;

use args::Args;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use verifier::Verifier;

fn run(args: &Args) -> anyhow::Result<bool> {
    let verifier = Verifier::new(args)?;
    let summary = verifier.verify()?;
    println!(
        "verified {} files, {} failed",
        summary.verified() + summary.failed().len(),
        summary.failed().len()
    );
    for file in summary.failed() {
        eprintln!("failed: {file}");
    }
    Ok(summary.is_success())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
