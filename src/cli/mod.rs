// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, built on clap.
// All work is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — normalises a dataset directory into splits
//   2. `inspect` — shows what one file normalises into
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PrepareArgs};

use qa_dataset_prep::domain::collection::Split;

#[derive(Parser, Debug)]
#[command(
    name = "qa-dataset-prep",
    version,
    about = "Normalise QA datasets into shuffled train/validation/test splits for binary classification."
)]
pub struct Cli {
    /// The subcommand to run (prepare or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use qa_dataset_prep::application::prepare_use_case::PrepareUseCase;

    tracing::info!("Preparing dataset in: {}", args.dataset_dir.display());

    let outcome = PrepareUseCase::new(args.into()).execute()?;

    println!("{:<12}{:>8}{:>8}{:>8}{:>9}", "split", "total", "true", "false", "unknown");
    for split in Split::ALL {
        let s = outcome.summary(split);
        println!(
            "{:<12}{:>8}{:>8}{:>8}{:>9}",
            split.as_str(),
            s.total,
            s.positive,
            s.negative,
            s.unknown
        );
    }
    if outcome.carved > 0 {
        println!("\n{} validation record(s) carved from train.", outcome.carved);
    }
    if outcome.skipped > 0 {
        println!("{} record(s) skipped during extraction.", outcome.skipped);
    }
    for path in &outcome.exported {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use qa_dataset_prep::application::inspect_use_case::InspectUseCase;

    let result = InspectUseCase::new(args.into()).execute()?;
    let r      = &result.report;

    println!("file:     {}", r.path.display());
    println!("format:   {} ({} mode → {})", r.format, r.mode, r.destination);
    println!("loaded:   {}", r.loaded);
    println!("skipped:  {}", r.skipped);
    println!(
        "labels:   {} true / {} false / {} unknown",
        result.summary.positive,
        result.summary.negative,
        result.summary.unknown
    );

    for (i, ex) in result.preview.iter().enumerate() {
        println!("\n[{}] Q: {}", i + 1, ex.question);
        println!("    T: {}", ex.text);
        println!("    label: {:?}", ex.label);
    }
    Ok(())
}
