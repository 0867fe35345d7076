use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::models::SubmissionRecord;

/// Destination paths written for one paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub pdf: PathBuf,
    pub supplementary: Option<PathBuf>,
}

/// Reject supplementary references that are not zip archives
pub fn check_supplementary(record: &SubmissionRecord) -> Result<()> {
    match &record.supplementary_material {
        Some(reference) if !reference.ends_with(".zip") => Err(Error::UnsupportedSupplementaryFormat {
            forum_id: record.forum_id.clone(),
            reference: reference.clone(),
        }),
        _ => Ok(()),
    }
}

fn copy_file(record: &SubmissionRecord, from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|source| Error::Copy {
        forum_id: record.forum_id.clone(),
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Copy `<forum>.pdf` to `<identifier>.pdf` and, when declared,
/// `<forum>_supp.zip` to `<identifier>-supp.zip`.
///
/// The supplementary reference is validated before anything is copied.
pub fn relocate_files(
    record: &SubmissionRecord,
    identifier: &str,
    indir: &Path,
    outdir: &Path,
) -> Result<Relocation> {
    check_supplementary(record)?;

    let pdf_name = record.pdf_file_name();
    let new_pdf = outdir.join(format!("{}.pdf", identifier));
    info!("rename pdf: {} -> {}", pdf_name, new_pdf.display());
    copy_file(record, &indir.join(&pdf_name), &new_pdf)?;

    let supplementary = if record.supplementary_material.is_some() {
        let supp_name = record.supplementary_file_name();
        let new_supp = outdir.join(format!("{}-supp.zip", identifier));
        info!("rename supp: {} -> {}", supp_name, new_supp.display());
        copy_file(record, &indir.join(&supp_name), &new_supp)?;
        Some(new_supp)
    } else {
        None
    };

    Ok(Relocation {
        pdf: new_pdf,
        supplementary,
    })
}
