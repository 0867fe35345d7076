#![allow(dead_code)]

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use lopdf::{dictionary, Document, Object};
use serde_json::json;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use proceedings::{Config, PageCounter, Result};

/// Page counts keyed by PDF file stem (the forum id)
pub struct CannedPageCounter(pub HashMap<String, u32>);

impl CannedPageCounter {
    pub fn new(counts: &[(&str, u32)]) -> Self {
        CannedPageCounter(counts.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }
}

impl PageCounter for CannedPageCounter {
    fn page_count_of(&self, pdf: &Path) -> Result<u32> {
        let stem = pdf
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.0
            .get(&stem)
            .copied()
            .ok_or_else(|| proceedings::Error::PageCountUnavailable {
                path: pdf.to_path_buf(),
                reason: "no canned count".to_string(),
            })
    }
}

/// Write a minimal PDF with `pages` blank pages
pub fn write_pdf(path: &Path, pages: u32) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            })
            .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("Failed to write test PDF");
}

/// Write a zip archive with the given (name, bytes) entries; names ending
/// in `/` become directory entries
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(bytes).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// All entries of a zip archive as (name, bytes), in archive order
pub fn read_zip(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            (entry.name().to_string(), bytes)
        })
        .collect()
}

/// One metadata-store line in the downloader's format
pub fn metadata_line(forum: &str, title: &str, authors: &[&str], supplementary: Option<&str>) -> String {
    let mut content = json!({
        "title": title,
        "abstract": format!("Abstract of {}", title),
        "authors": authors,
    });
    if let Some(supp) = supplementary {
        content["supplementary_material"] = json!(supp);
    }
    json!({ "forum": forum, "submission_content": content }).to_string()
}

pub fn write_metadata_store(path: &Path, lines: &[String]) {
    let mut file = File::create(path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

/// Config for a small test conference with the given oral forum ids
pub fn test_config(oral_forum_ids: &[&str]) -> Config {
    let orals = oral_forum_ids
        .iter()
        .map(|id| format!("\"{}\"", id))
        .collect::<Vec<_>>()
        .join(", ");
    Config::from_toml_str(&format!(
        r#"
[conference]
name = "testconf"
year_suffix = "23"
oral_forum_ids = [{orals}]

[proceedings]
key = "TC-2023"
booktitle = "Proceedings of the Test Conference"
name = "Test Conference"
shortname = "TC"
editors = ["Ada Lovelace"]
year = 2023
start = "2023-11-06"
end = "2023-11-09"
conference_url = "https://example.org/"
address = "Nowhere"
conference_number = 1
"#
    ))
    .expect("test config must parse")
}
