use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use proceedings::archive::strip_directory;

#[derive(Parser, Debug)]
#[command(name = "strip_media")]
#[command(about = "Delete media files from every zip archive in a folder")]
struct Args {
    /// Input directory
    #[arg(short, long, default_value = "./")]
    indir: PathBuf,

    /// Directory where cleaned archives are saved
    #[arg(short, long, default_value = "./out")]
    outdir: PathBuf,

    /// Entry name suffix to remove
    #[arg(long, default_value = ".mp4")]
    suffix: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let reports = strip_directory(&args.indir, &args.outdir, &args.suffix)
        .with_context(|| format!("Failed to process {}", args.indir.display()))?;

    let failed: Vec<_> = reports.iter().filter(|r| r.outcome.is_err()).collect();
    info!(
        "Cleaned {} of {} archive(s) into {}",
        reports.len() - failed.len(),
        reports.len(),
        args.outdir.display()
    );

    if !failed.is_empty() {
        for report in &failed {
            warn!("not cleaned: {}", report.archive.display());
        }
        anyhow::bail!("{} archive(s) could not be cleaned", failed.len());
    }
    Ok(())
}
