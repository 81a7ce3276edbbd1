use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use sdw_core::{PlanError, BASE_CONFIGURATION, PLANS_ROOT_ENV};
use sdw_plans::{
    run_generation, write_report, BackupStatus, RunOptions, RunSummary, VariantStatus,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sdw-variants",
    about = "Add 18 S/D/W U-Net variants to nnU-Net v2 plans (based on 3d_fullres)"
)]
struct Cli {
    /// Dataset ID (e.g. 5 for Dataset005_XXX).
    #[arg(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    dataset_id: u32,
    /// nnU-Net preprocessed root holding the Dataset folders.
    #[arg(long, env = PLANS_ROOT_ENV, value_name = "DIR")]
    plans_root: Option<PathBuf>,
    /// Report the variants that would be added without writing anything.
    #[arg(long)]
    dry_run: bool,
    /// Write the generation report as JSON to this path.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let info = err.info();
            error!(code = %info.code, hint = ?info.hint, context = ?info.context, "{err}");
            println!("{}", error_line(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PlanError> {
    let options = RunOptions {
        plans_root: cli.plans_root.clone(),
        dataset_id: cli.dataset_id,
        dry_run: cli.dry_run,
    };
    let summary = run_generation(&options)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_summary(&mut out, &summary, cli.dry_run)
        .map_err(|err| PlanError::io("stdout", Path::new("<stdout>"), &err))?;

    if let Some(path) = &cli.report {
        write_report(path, &summary.report)?;
    }
    Ok(())
}

fn error_line(err: &PlanError) -> String {
    format!("Error: {}", err.info().message)
}

fn print_summary(out: &mut impl Write, summary: &RunSummary, dry_run: bool) -> io::Result<()> {
    let report = &summary.report;
    writeln!(
        out,
        "Adding S/D/W variants to {} based on {BASE_CONFIGURATION}...",
        report.dataset
    )?;
    for outcome in &report.outcomes {
        match outcome.status {
            VariantStatus::Added => writeln!(out, "Added {}", outcome.name)?,
            VariantStatus::Skipped => writeln!(out, "Skipping {} (already exists)", outcome.name)?,
        }
    }

    match &summary.backup {
        Some(BackupStatus::Created { path }) => {
            writeln!(out, "Backup created: {}", path.display())?
        }
        Some(BackupStatus::Failed { reason, .. }) => {
            writeln!(out, "Warning: failed to create backup: {reason}")?
        }
        None => {}
    }

    if report.added == 0 {
        writeln!(out, "No new configurations added (all already exist)")?;
    } else if dry_run {
        writeln!(
            out,
            "\nDry run: {} configurations would be added to {}",
            report.added,
            report.plans_path.display()
        )?;
    } else {
        writeln!(
            out,
            "\nSuccessfully added {} configurations to {}",
            report.added,
            report.plans_path.display()
        )?;
    }
    writeln!(out, "Total configurations now: {}", report.total_configurations)
}
