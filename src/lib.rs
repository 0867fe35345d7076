pub mod archive;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod pipeline;
pub mod platform;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, ProceedingsInfo};
pub use error::{Error, Result};
pub use models::{read_metadata_store, Section, SubmissionRecord};
pub use pages::{CommandPageCounter, PageCounter, PdfPageCounter};
pub use pipeline::{build_proceedings, BibliographySummary, ProceedingsLayout};
pub use utils::{bibtex_name_list, normalize_name, split_name};
