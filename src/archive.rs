//! Media stripping for supplementary archives.
//!
//! Each archive in a directory is rewritten without the entries whose name
//! ends in the media suffix. Retained entries are copied raw, so their
//! compressed bytes (and therefore their content) are unchanged.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zip::result::ZipError;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Entry counts for one cleaned archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripOutcome {
    pub kept: usize,
    pub removed: usize,
}

/// Result for one archive of a directory run
#[derive(Debug)]
pub struct ArchiveReport {
    pub archive: PathBuf,
    pub outcome: Result<StripOutcome>,
}

/// Copy `src` to `dst`, dropping every entry whose name ends with `suffix`.
pub fn strip_archive(src: &Path, dst: &Path, suffix: &str) -> Result<StripOutcome> {
    let read_err = |source| Error::ArchiveRead {
        path: src.to_path_buf(),
        source,
    };
    let write_err = |source| Error::ArchiveWrite {
        path: dst.to_path_buf(),
        source,
    };

    let file = File::open(src).map_err(|e| read_err(ZipError::Io(e)))?;
    let mut archive = ZipArchive::new(file).map_err(read_err)?;
    let mut writer = ZipWriter::new(File::create(dst).map_err(|e| write_err(ZipError::Io(e)))?);
    let mut outcome = StripOutcome { kept: 0, removed: 0 };

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(read_err)?;
        if entry.name().ends_with(suffix) {
            outcome.removed += 1;
            continue;
        }
        writer.raw_copy_file(entry).map_err(write_err)?;
        outcome.kept += 1;
    }

    writer.finish().map_err(write_err)?;
    Ok(outcome)
}

/// Clean every `.zip` in `indir` into `outdir`, in file-name order.
///
/// A broken archive is reported and skipped; the rest of the batch continues.
pub fn strip_directory(indir: &Path, outdir: &Path, suffix: &str) -> Result<Vec<ArchiveReport>> {
    fs::create_dir_all(outdir)?;
    if fs::canonicalize(indir)? == fs::canonicalize(outdir)? {
        return Err(Error::Config(
            "output directory must differ from input directory".to_string(),
        ));
    }

    let mut archives: Vec<PathBuf> = fs::read_dir(indir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Cannot list entry in {}: {}", indir.display(), e);
                None
            }
        })
        .filter(|path| path.is_file() && path.extension().map_or(false, |e| e == "zip"))
        .collect();
    archives.sort();

    let mut reports = Vec::with_capacity(archives.len());
    for archive in archives {
        let Some(file_name) = archive.file_name() else {
            continue;
        };
        let dst = outdir.join(file_name);
        info!("{}", archive.display());

        let outcome = strip_archive(&archive, &dst, suffix);
        match &outcome {
            Ok(o) => info!("kept {} entries, removed {} {} entries", o.kept, o.removed, suffix),
            Err(e) => {
                warn!("Skipping {}: {}", archive.display(), e);
                // Drop the partial output so only clean archives remain.
                let _ = fs::remove_file(&dst);
            }
        }
        reports.push(ArchiveReport { archive, outcome });
    }

    Ok(reports)
}
