use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};

/// One accepted submission, validated at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub forum_id: String,
    pub title: String,
    pub abstract_text: String,
    /// Author names in "First Last" form, in paper order
    pub authors: Vec<String>,
    /// Declared supplementary material reference; empty strings load as `None`
    pub supplementary_material: Option<String>,
}

/// Content values come either bare or wrapped as `{"value": ...}`,
/// depending on the platform API generation that produced the store.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentField<T> {
    Plain(T),
    Wrapped { value: T },
}

impl<T> ContentField<T> {
    fn into_inner(self) -> T {
        match self {
            ContentField::Plain(v) => v,
            ContentField::Wrapped { value } => value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawContent {
    title: Option<ContentField<String>>,
    #[serde(rename = "abstract")]
    abstract_text: Option<ContentField<String>>,
    authors: Option<ContentField<Vec<String>>>,
    supplementary_material: Option<ContentField<String>>,
}

/// Line layout of the metadata store
#[derive(Debug, Deserialize)]
struct RawSubmission {
    forum: Option<String>,
    submission_content: Option<RawContent>,
}

impl SubmissionRecord {
    /// Parse and validate one metadata-store line.
    ///
    /// `location` is used in diagnostics (e.g. `"line 12"`).
    pub fn from_json_line(line: &str, location: &str) -> Result<Self> {
        let raw: RawSubmission = serde_json::from_str(line)
            .map_err(|e| Error::malformed(location, format!("invalid JSON: {}", e)))?;

        let forum_id = raw
            .forum
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| Error::malformed(location, "missing forum id"))?;
        let location = format!("{} (forum {})", location, forum_id);

        let content = raw
            .submission_content
            .ok_or_else(|| Error::malformed(&location, "missing submission_content"))?;

        let title = content
            .title
            .map(ContentField::into_inner)
            .ok_or_else(|| Error::malformed(&location, "missing title"))?;
        let abstract_text = content
            .abstract_text
            .map(ContentField::into_inner)
            .ok_or_else(|| Error::malformed(&location, "missing abstract"))?;
        let authors = content
            .authors
            .map(ContentField::into_inner)
            .unwrap_or_default();

        if authors.is_empty() {
            return Err(Error::malformed(&location, "no authors"));
        }
        if authors.iter().any(|a| a.trim().is_empty()) {
            return Err(Error::malformed(&location, "blank author name"));
        }

        let supplementary_material = content
            .supplementary_material
            .map(ContentField::into_inner)
            .filter(|s| !s.is_empty());

        Ok(SubmissionRecord {
            forum_id,
            title,
            abstract_text,
            authors,
            supplementary_material,
        })
    }

    /// File name of the submission PDF inside the input directory
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.forum_id)
    }

    /// File name of the downloaded supplementary archive inside the input directory
    pub fn supplementary_file_name(&self) -> String {
        format!("{}_supp.zip", self.forum_id)
    }
}

/// Read the newline-delimited metadata store, preserving line order.
///
/// Blank lines are skipped; any malformed line aborts the load.
pub fn read_metadata_store(path: &Path) -> Result<Vec<SubmissionRecord>> {
    let reader = BufReader::new(File::open(path).map_err(Error::file_access(path))?);
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let location = format!("{}:{}", path.display(), idx + 1);
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(Error::malformed(&location, "invalid UTF-8"));
            }
            Err(e) => return Err(Error::file_access(path)(e)),
        };
        if line.trim().is_empty() {
            continue;
        }
        records.push(SubmissionRecord::from_json_line(&line, &location)?);
    }

    info!("Total number of papers: {}", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_content() {
        let line = r#"{"forum": "X1", "submission_content": {"title": "T", "abstract": "A", "authors": ["Jane Doe", "John Roe"], "supplementary_material": "/attachment/x.zip", "venue": "CoRL 2023 Oral"}}"#;
        let record = SubmissionRecord::from_json_line(line, "line 1").unwrap();
        assert_eq!(record.forum_id, "X1");
        assert_eq!(record.title, "T");
        assert_eq!(record.abstract_text, "A");
        assert_eq!(record.authors, vec!["Jane Doe", "John Roe"]);
        assert_eq!(record.supplementary_material.as_deref(), Some("/attachment/x.zip"));
    }

    #[test]
    fn test_parse_wrapped_content() {
        let plain = r#"{"forum": "X1", "submission_content": {"title": "T", "abstract": "A", "authors": ["Jane Doe"]}}"#;
        let wrapped = r#"{"forum": "X1", "submission_content": {"title": {"value": "T"}, "abstract": {"value": "A"}, "authors": {"value": ["Jane Doe"]}}}"#;
        assert_eq!(
            SubmissionRecord::from_json_line(plain, "line 1").unwrap(),
            SubmissionRecord::from_json_line(wrapped, "line 1").unwrap()
        );
    }

    #[test]
    fn test_empty_supplementary_is_absent() {
        let line = r#"{"forum": "X1", "submission_content": {"title": "T", "abstract": "A", "authors": ["Jane Doe"], "supplementary_material": ""}}"#;
        let record = SubmissionRecord::from_json_line(line, "line 1").unwrap();
        assert_eq!(record.supplementary_material, None);
    }

    #[test]
    fn test_missing_authors_rejected() {
        let line = r#"{"forum": "X1", "submission_content": {"title": "T", "abstract": "A", "authors": []}}"#;
        let err = SubmissionRecord::from_json_line(line, "line 7").unwrap_err();
        match err {
            Error::MalformedRecord { location, reason } => {
                assert!(location.contains("line 7"));
                assert!(location.contains("X1"));
                assert_eq!(reason, "no authors");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_title_and_bad_json_rejected() {
        let no_title = r#"{"forum": "X1", "submission_content": {"abstract": "A", "authors": ["Jane Doe"]}}"#;
        assert!(matches!(
            SubmissionRecord::from_json_line(no_title, "line 1"),
            Err(Error::MalformedRecord { .. })
        ));
        assert!(matches!(
            SubmissionRecord::from_json_line("{not json", "line 2"),
            Err(Error::MalformedRecord { .. })
        ));
        assert!(matches!(
            SubmissionRecord::from_json_line(r#"{"submission_content": {}}"#, "line 3"),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_line_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf__metadata.jsonl");
        std::fs::write(&path, b"\xff\xfe\n").unwrap();

        match read_metadata_store(&path).unwrap_err() {
            Error::MalformedRecord { location, reason } => {
                assert!(location.ends_with(":1"), "{location}");
                assert_eq!(reason, "invalid UTF-8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_reports_its_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf__metadata.jsonl");
        let mut bytes = br#"{"forum": "X1", "submission_content": {"title": "T", "abstract": "A", "authors": ["Jane Doe"]}}"#.to_vec();
        bytes.extend_from_slice(b"\n\n\xc3\x28\n");
        std::fs::write(&path, bytes).unwrap();

        match read_metadata_store(&path).unwrap_err() {
            Error::MalformedRecord { location, .. } => assert!(location.ends_with(":3"), "{location}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_store_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent__metadata.jsonl");

        let err = read_metadata_store(&path).unwrap_err();

        assert!(err.to_string().contains("absent__metadata.jsonl"));
        assert!(matches!(err, Error::FileAccess { .. }));
    }

    #[test]
    fn test_file_names() {
        let line = r#"{"forum": "abc", "submission_content": {"title": "T", "abstract": "A", "authors": ["Jane Doe"]}}"#;
        let record = SubmissionRecord::from_json_line(line, "line 1").unwrap();
        assert_eq!(record.pdf_file_name(), "abc.pdf");
        assert_eq!(record.supplementary_file_name(), "abc_supp.zip");
    }
}
