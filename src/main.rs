use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use proceedings::config::{Config, DEFAULT_CONFIG_FILE};
use proceedings::{build_proceedings, CommandPageCounter, PageCounter, PdfPageCounter, ProceedingsLayout};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageCounterKind {
    /// Parse the PDF in process
    Pdf,
    /// Ask the `pdfinfo` tool
    Pdfinfo,
}

#[derive(Parser, Debug)]
#[command(name = "proceedings")]
#[command(about = "Assign citation keys, write the proceedings bibliography and rename paper files")]
struct Args {
    /// Input directory containing the metadata store, PDFs and supplementary files
    #[arg(short, long, default_value = "./")]
    indir: PathBuf,

    /// Directory receiving the renamed files
    #[arg(short, long, default_value = "./out")]
    outdir: PathBuf,

    /// Conference configuration file
    #[arg(short, long, env = "PROCEEDINGS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Bibliography output path (default: <indir>/<conference>.bib)
    #[arg(long)]
    bib: Option<PathBuf>,

    /// How PDF page counts are obtained
    #[arg(long, value_enum, default_value = "pdf")]
    page_counter: PageCounterKind,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    info!("Using config for {}", config.conference.name);

    let mut layout = ProceedingsLayout::new(&config.conference.name, args.indir.clone(), args.outdir.clone());
    if let Some(bib) = args.bib {
        layout = layout.with_bib_path(bib);
    }

    let pages: Box<dyn PageCounter> = match args.page_counter {
        PageCounterKind::Pdf => Box::new(PdfPageCounter),
        PageCounterKind::Pdfinfo => Box::new(CommandPageCounter::default()),
    };

    let summary = build_proceedings(&config, &layout, pages.as_ref())
        .context("Bibliography run aborted")?;

    info!(
        "Done: {} papers, {} pages, bibliography at {}",
        summary.entries.len(),
        summary.last_page(),
        layout.bib_path.display()
    );
    Ok(())
}
