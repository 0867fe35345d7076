//! PDF page counting.
//!
//! The bibliography only needs one number per paper, so page counting sits
//! behind a single-method trait. `PdfPageCounter` parses the file in process;
//! `CommandPageCounter` asks `pdfinfo`.

use std::path::Path;
use std::process::Command;

use lopdf::Document;
use tracing::debug;

use crate::error::{Error, Result};

pub trait PageCounter {
    /// Number of pages in the PDF at `pdf`
    fn page_count_of(&self, pdf: &Path) -> Result<u32>;
}

fn unavailable(pdf: &Path, reason: impl Into<String>) -> Error {
    Error::PageCountUnavailable {
        path: pdf.to_path_buf(),
        reason: reason.into(),
    }
}

/// Counts pages by loading the document with lopdf
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfPageCounter;

impl PageCounter for PdfPageCounter {
    fn page_count_of(&self, pdf: &Path) -> Result<u32> {
        let document = Document::load(pdf).map_err(|e| unavailable(pdf, e.to_string()))?;
        let count = document.get_pages().len();
        debug!("{} has {} pages", pdf.display(), count);

        match u32::try_from(count) {
            Ok(0) => Err(unavailable(pdf, "document has no pages")),
            Ok(n) => Ok(n),
            Err(_) => Err(unavailable(pdf, format!("page count {} out of range", count))),
        }
    }
}

/// Runs `pdfinfo <file>` and reads its `Pages:` line
#[derive(Debug, Clone)]
pub struct CommandPageCounter {
    program: String,
}

impl CommandPageCounter {
    pub fn new(program: impl Into<String>) -> Self {
        CommandPageCounter {
            program: program.into(),
        }
    }
}

impl Default for CommandPageCounter {
    fn default() -> Self {
        CommandPageCounter::new("pdfinfo")
    }
}

impl PageCounter for CommandPageCounter {
    fn page_count_of(&self, pdf: &Path) -> Result<u32> {
        let output = Command::new(&self.program)
            .arg(pdf)
            .output()
            .map_err(|e| unavailable(pdf, format!("cannot run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(unavailable(
                pdf,
                format!("{} exited with {}", self.program, output.status),
            ));
        }

        match parse_pdfinfo_pages(&String::from_utf8_lossy(&output.stdout)) {
            Some(0) | None => Err(unavailable(pdf, "no positive page count in pdfinfo output")),
            Some(n) => Ok(n),
        }
    }
}

/// Extract the value of the `Pages:` line from pdfinfo output
pub fn parse_pdfinfo_pages(output: &str) -> Option<u32> {
    output.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("Pages:")?;
        rest.trim().parse::<u32>().ok()
    })
}
