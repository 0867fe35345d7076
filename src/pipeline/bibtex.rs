//! BibTeX rendering for the proceedings header and per-paper entries.

use std::path::Path;

use askama::Template;
use chrono::NaiveDate;

use crate::config::ProceedingsInfo;
use crate::error::{Error, Result};
use crate::models::Section;
use crate::pages::PageCounter;
use crate::pipeline::sections::Paper;
use crate::utils::bibtex_name_list;

#[derive(Template)]
#[template(
    source = "@Proceedings{<< key >>,\n\tbooktitle = {<< booktitle >>},\n\tname = {<< name >>},\n\tshortname = {<< shortname >>},\n\teditor = {<< editors >>},\n\tvolume = {<< volume >>},\n\tyear = {<< year >>},\n\tstart = {<< start >>},\n\tend = {<< end >>},\n\tconference_url = {<< conference_url >>},\n\taddress = {<< address >>},\n\tconference_number={<< conference_number >>},\n}\n\n",
    ext = "txt",
    syntax = "bibtex",
    escape = "none"
)]
struct ProceedingsTemplate<'a> {
    key: &'a str,
    booktitle: &'a str,
    name: &'a str,
    shortname: &'a str,
    editors: String,
    volume: &'a str,
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
    conference_url: &'a str,
    address: &'a str,
    conference_number: u32,
}

#[derive(Template)]
#[template(
    source = "@InProceedings{<< identifier >>,\n\ttitle = {<< title >>},\n\tsection = {<< section >>},\n\tauthor = {<< authors >>},\n\tpages = {<< page_start >>-<< page_end >>},\n\topenreview = {<< forum_id >>},\n\tabstract = {<< abstract_text >>}\n}\n\n",
    ext = "txt",
    syntax = "bibtex",
    escape = "none"
)]
struct InProceedingsTemplate<'a> {
    identifier: &'a str,
    title: &'a str,
    section: Section,
    authors: String,
    page_start: u32,
    page_end: u32,
    forum_id: &'a str,
    abstract_text: &'a str,
}

/// Render the `@Proceedings` block that opens the bibliography
pub fn render_proceedings_header(info: &ProceedingsInfo) -> Result<String> {
    let template = ProceedingsTemplate {
        key: &info.key,
        booktitle: &info.booktitle,
        name: &info.name,
        shortname: &info.shortname,
        editors: bibtex_name_list(&info.editors),
        volume: &info.volume,
        year: info.year,
        start: info.start,
        end: info.end,
        conference_url: &info.conference_url,
        address: &info.address,
        conference_number: info.conference_number,
    };
    Ok(template.render()?)
}

/// One rendered `@InProceedings` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    pub identifier: String,
    pub section: Section,
    pub page_start: u32,
    pub page_end: u32,
    text: String,
}

impl BibEntry {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page_range(&self) -> String {
        format!("{}-{}", self.page_start, self.page_end)
    }
}

/// Render the entry for `paper` starting at `page_start`.
///
/// Returns the entry and the first page of the next paper.
pub fn build_entry(
    paper: &Paper,
    pdf: &Path,
    page_start: u32,
    pages: &dyn PageCounter,
) -> Result<(BibEntry, u32)> {
    let paper_length = pages.page_count_of(pdf)?;
    if paper_length == 0 {
        return Err(Error::PageCountUnavailable {
            path: pdf.to_path_buf(),
            reason: "page count is zero".to_string(),
        });
    }
    let page_end = page_start + paper_length - 1;

    let template = InProceedingsTemplate {
        identifier: &paper.identifier,
        title: &paper.record.title,
        section: paper.section,
        authors: bibtex_name_list(&paper.record.authors),
        page_start,
        page_end,
        forum_id: &paper.record.forum_id,
        abstract_text: &paper.record.abstract_text,
    };

    let entry = BibEntry {
        identifier: paper.identifier.clone(),
        section: paper.section,
        page_start,
        page_end,
        text: template.render()?,
    };
    Ok((entry, page_start + paper_length))
}
