use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{ForumMetadata, ReviewPlatform};
use crate::error::Result;
use crate::utils::metadata_file_name;

/// What the downloader fetches besides the metadata store
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub conference: String,
    pub invitation: String,
    /// Venue strings to keep; empty keeps every submission
    pub accepted_venues: Vec<String>,
    /// Venues whose papers have spotlight videos; empty means all
    pub poster_venues: Vec<String>,
    pub get_pdfs: bool,
    pub get_supplementary: bool,
    pub get_agreement: bool,
    pub get_spotlight: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub conference_dir: PathBuf,
    pub submissions: usize,
    pub pdfs: usize,
    pub supplementary: usize,
    pub agreements: usize,
    pub spotlights: usize,
    /// Attachments the platform did not have
    pub missing: usize,
}

/// Keep one note per forum: position of the first arrival, content of the last.
fn dedup_by_forum(notes: Vec<ForumMetadata>) -> Vec<ForumMetadata> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ForumMetadata> = Vec::new();

    for note in notes {
        match index.get(&note.forum) {
            Some(&i) => unique[i] = note,
            None => {
                index.insert(note.forum.clone(), unique.len());
                unique.push(note);
            }
        }
    }
    unique
}

fn venue_in(note: &ForumMetadata, venues: &[String]) -> bool {
    venues.is_empty() || note.venue().map_or(false, |v| venues.iter().any(|a| a == v))
}

/// Fetch submissions from `platform` into `<outdir>/<conference>/`.
///
/// Writes `<conference>__metadata.jsonl`, then the requested files.
/// Missing attachments are logged and skipped; any other failure aborts.
pub fn download_submissions(
    platform: &dyn ReviewPlatform,
    options: &DownloadOptions,
    outdir: &Path,
) -> Result<DownloadSummary> {
    let notes = dedup_by_forum(platform.fetch_metadata(&options.invitation)?);
    let metadata: Vec<ForumMetadata> = notes
        .into_iter()
        .filter(|note| venue_in(note, &options.accepted_venues))
        .collect();

    let conference_dir = outdir.join(&options.conference);
    fs::create_dir_all(&conference_dir)?;

    let mut summary = DownloadSummary {
        conference_dir: conference_dir.clone(),
        submissions: metadata.len(),
        ..Default::default()
    };

    info!("writing metadata to file...");
    let store_path = conference_dir.join(metadata_file_name(&options.conference));
    let mut store = BufWriter::new(File::create(&store_path)?);
    for (k, note) in metadata.iter().enumerate() {
        info!(
            "{}\t{}\t{}\thttps://openreview.net/forum?id={}",
            k,
            note.title().unwrap_or(""),
            note.venue().unwrap_or(""),
            note.forum
        );
        serde_json::to_writer(&mut store, note).map_err(std::io::Error::from)?;
        store.write_all(b"\n")?;
    }
    store.flush()?;

    if options.get_pdfs {
        for note in &metadata {
            let path = conference_dir.join(format!("{}.pdf", note.forum));
            info!("downloading {}", path.display());
            fs::write(&path, platform.fetch_pdf(&note.forum)?)?;
            summary.pdfs += 1;
        }
    }

    if options.get_supplementary {
        for note in &metadata {
            let path = conference_dir.join(format!("{}_supp.zip", note.forum));
            if save_attachment(platform, &note.forum, "supplementary_material", &path)? {
                summary.supplementary += 1;
            } else {
                summary.missing += 1;
            }
        }
    }

    if options.get_agreement {
        for note in &metadata {
            let path = conference_dir.join(format!("{}_agreement.pdf", note.forum));
            if save_attachment(platform, &note.forum, "publication_agreement", &path)? {
                summary.agreements += 1;
            } else {
                summary.missing += 1;
            }
        }
    }

    if options.get_spotlight {
        for note in metadata.iter().filter(|n| venue_in(n, &options.poster_venues)) {
            let path = conference_dir.join(format!("{}_spotlight.mp4", note.forum));
            if save_attachment(platform, &note.forum, "poster_spotlight_video", &path)? {
                summary.spotlights += 1;
            } else {
                summary.missing += 1;
            }
        }
    }

    Ok(summary)
}

/// Returns `false` when the forum has no such attachment
fn save_attachment(
    platform: &dyn ReviewPlatform,
    forum_id: &str,
    field: &str,
    path: &Path,
) -> Result<bool> {
    match platform.fetch_attachment(forum_id, field)? {
        Some(bytes) => {
            info!("downloading {}", path.display());
            fs::write(path, bytes)?;
            Ok(true)
        }
        None => {
            warn!("{} not found", path.display());
            Ok(false)
        }
    }
}
