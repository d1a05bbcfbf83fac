mod parser;
mod series;
mod snapshot;
mod store;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use snapshot::Snapshot;

#[derive(Parser)]
#[command(
    name = "petition_tracker",
    about = "Track petition.parliament.uk signature counts from saved page snapshots"
)]
struct Cli {
    /// JSON file holding the signature time series (created if missing)
    data_file: Option<PathBuf>,
    /// Saved petition pages to append, in chronological order
    snapshots: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let Some(data_file) = cli.data_file else {
        // Bare invocation asks for the usage text; no file is touched.
        Cli::command().print_long_help()?;
        return Ok(());
    };

    run(&data_file, &cli.snapshots)
}

fn run(data_file: &Path, snapshots: &[PathBuf]) -> Result<()> {
    let mut data = store::load(data_file)
        .with_context(|| format!("failed to load data file {}", data_file.display()))?;
    info!(
        "Loaded {} records from {} (last count {})",
        data.len(),
        data_file.display(),
        series::last_count(&data)
    );

    let pb = ProgressBar::new(snapshots.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );

    // Extraction is independent per file; deltas are not. The fold below
    // stays a sequential pass in the order the files were given.
    let extracted: Vec<_> = snapshots
        .par_iter()
        .map(|path| {
            let snap = Snapshot::load(path)?;
            let pair = parser::process_snapshot(&snap)?;
            pb.inc(1);
            Ok(pair)
        })
        .collect::<Result<_>>()?;
    pb.finish_and_clear();

    let appended = extracted.len();
    series::extend(&mut data, extracted);
    store::save(data_file, &data)
        .with_context(|| format!("failed to write data file {}", data_file.display()))?;

    println!(
        "Appended {} records to {} ({} total, latest count {})",
        appended,
        data_file.display(),
        data.len(),
        series::last_count(&data)
    );
    Ok(())
}
