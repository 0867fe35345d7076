use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use proceedings::config::{Config, DEFAULT_CONFIG_FILE};
use proceedings::platform::{download_submissions, DownloadOptions, OpenReviewClient};

#[derive(Parser, Debug)]
#[command(name = "fetch_submissions")]
#[command(about = "Download metadata, paper PDFs and supplementary material from OpenReview")]
struct Args {
    /// Directory where data should be saved
    #[arg(short, long, default_value = "./")]
    outdir: PathBuf,

    /// Conference configuration file
    #[arg(short, long, env = "PROCEEDINGS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Download paper PDFs
    #[arg(long)]
    get_pdfs: bool,

    /// Download supplementary material
    #[arg(long)]
    get_supplementary: bool,

    /// Download publication agreements
    #[arg(long)]
    get_agreement: bool,

    /// Download poster spotlight videos
    #[arg(long)]
    get_spotlight: bool,

    /// API base URL (default: platform.baseurl from the config)
    #[arg(long)]
    baseurl: Option<String>,

    /// Defaults to guest access
    #[arg(long, env = "OPENREVIEW_USERNAME", default_value = "")]
    username: String,

    #[arg(long, env = "OPENREVIEW_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    if config.platform.invitation.is_empty() {
        anyhow::bail!("platform.invitation must be set in {}", args.config.display());
    }

    let baseurl = args.baseurl.as_deref().unwrap_or(&config.platform.baseurl);
    let mut client = OpenReviewClient::new(baseurl).context("Failed to build HTTP client")?;
    if !args.username.is_empty() {
        client
            .login(&args.username, &args.password)
            .context("Failed to log in")?;
    }

    let options = DownloadOptions {
        conference: config.conference.name.clone(),
        invitation: config.platform.invitation.clone(),
        accepted_venues: config.platform.accepted_venues.clone(),
        poster_venues: config.platform.poster_venues.clone(),
        get_pdfs: args.get_pdfs,
        get_supplementary: args.get_supplementary,
        get_agreement: args.get_agreement,
        get_spotlight: args.get_spotlight,
    };

    let summary = download_submissions(&client, &options, &args.outdir)
        .context("Download aborted")?;

    info!(
        "Saved {} submissions to {} ({} pdfs, {} supplementary, {} agreements, {} spotlights, {} missing)",
        summary.submissions,
        summary.conference_dir.display(),
        summary.pdfs,
        summary.supplementary,
        summary.agreements,
        summary.spotlights,
        summary.missing
    );
    Ok(())
}
