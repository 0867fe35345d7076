//! Bibliography pipeline: metadata store → citation keys → sections →
//! entries + relocated files.
//!
//! Every error is fatal for the run. Page numbers are cumulative, so a paper
//! cannot be skipped without shifting every later range.

pub mod bibtex;
pub mod identifiers;
pub mod relocate;
pub mod sections;

pub use bibtex::*;
pub use identifiers::*;
pub use relocate::*;
pub use sections::*;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Config, ProceedingsInfo};
use crate::error::{Error, Result};
use crate::models::read_metadata_store;
use crate::pages::PageCounter;
use crate::utils::{bibliography_file_name, metadata_file_name};

/// First page of the proceedings
pub const FIRST_PAGE: u32 = 1;

/// Where the pipeline reads and writes
#[derive(Debug, Clone)]
pub struct ProceedingsLayout {
    /// Holds the metadata store, `<forum>.pdf` and `<forum>_supp.zip`
    pub indir: PathBuf,
    /// Receives `<identifier>.pdf` and `<identifier>-supp.zip`
    pub outdir: PathBuf,
    pub metadata_path: PathBuf,
    pub bib_path: PathBuf,
}

impl ProceedingsLayout {
    /// Default layout: store and bibliography both live in `indir`
    pub fn new(conference: &str, indir: impl Into<PathBuf>, outdir: impl Into<PathBuf>) -> Self {
        let indir = indir.into();
        ProceedingsLayout {
            metadata_path: indir.join(metadata_file_name(conference)),
            bib_path: indir.join(bibliography_file_name(conference)),
            outdir: outdir.into(),
            indir,
        }
    }

    pub fn with_bib_path(mut self, bib_path: impl Into<PathBuf>) -> Self {
        self.bib_path = bib_path.into();
        self
    }
}

/// What a completed run produced
#[derive(Debug, Default)]
pub struct BibliographySummary {
    pub entries: Vec<BibEntry>,
    pub relocations: Vec<Relocation>,
}

impl BibliographySummary {
    /// Last page number used, or 0 when nothing was written
    pub fn last_page(&self) -> u32 {
        self.entries.last().map(|e| e.page_end).unwrap_or(0)
    }
}

/// Write header and entries for `papers` into `out`, relocating each
/// paper's files as it goes.
pub fn write_bibliography<W: Write>(
    out: &mut W,
    info: &ProceedingsInfo,
    papers: &SectionSplit,
    indir: &Path,
    outdir: &Path,
    pages: &dyn PageCounter,
) -> Result<BibliographySummary> {
    out.write_all(render_proceedings_header(info)?.as_bytes())?;

    let mut summary = BibliographySummary::default();
    let mut page_start = FIRST_PAGE;

    for paper in papers.in_order() {
        let pdf = indir.join(paper.record.pdf_file_name());
        let (entry, next_page) = build_entry(paper, &pdf, page_start, pages)?;
        let relocation = relocate_files(&paper.record, &paper.identifier, indir, outdir)?;

        out.write_all(entry.text().as_bytes())?;
        info!(
            "{} [{}] pages {}",
            entry.identifier,
            entry.section,
            entry.page_range()
        );

        page_start = next_page;
        summary.entries.push(entry);
        summary.relocations.push(relocation);
    }

    Ok(summary)
}

/// Run the whole bibliography job described by `config` and `layout`.
pub fn build_proceedings(
    config: &Config,
    layout: &ProceedingsLayout,
    pages: &dyn PageCounter,
) -> Result<BibliographySummary> {
    let records = read_metadata_store(&layout.metadata_path)?;

    let scheme = IdentifierScheme {
        suffix: config.identifier_suffix(),
        ascii_keys: config.conference.ascii_keys,
    };
    let identifiers = assign_identifiers(&records, &scheme)?;
    let papers = split_sections(records, identifiers, &config.oral_forum_ids());

    fs::create_dir_all(&layout.outdir)?;
    let mut out = BufWriter::new(
        File::create(&layout.bib_path).map_err(Error::file_access(&layout.bib_path))?,
    );
    let summary = write_bibliography(
        &mut out,
        &config.proceedings,
        &papers,
        &layout.indir,
        &layout.outdir,
        pages,
    )?;
    out.flush()?;

    info!(
        "Wrote {} entries ({} pages) to {}",
        summary.entries.len(),
        summary.last_page(),
        layout.bib_path.display()
    );
    Ok(summary)
}
