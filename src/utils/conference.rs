/// Conference naming utilities
///
/// Conference names are short lowercase slugs such as `corl23`. They prefix
/// every artifact the tools read or write.

/// Two-digit year suffix used in citation keys
///
/// # Examples
/// ```
/// use proceedings::utils::year_suffix;
///
/// assert_eq!(year_suffix(2023), "23");
/// assert_eq!(year_suffix(2005), "05");
/// ```
pub fn year_suffix(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

/// Metadata store file name for a conference (e.g. `corl23__metadata.jsonl`)
pub fn metadata_file_name(conference: &str) -> String {
    format!("{}__metadata.jsonl", conference)
}

/// Bibliography file name for a conference (e.g. `corl23.bib`)
pub fn bibliography_file_name(conference: &str) -> String {
    format!("{}.bib", conference)
}

/// Validate a conference slug: non-empty, ASCII alphanumerics, `-` or `_`.
///
/// # Examples
/// ```
/// use proceedings::utils::is_valid_conference_name;
///
/// assert!(is_valid_conference_name("corl23"));
/// assert!(!is_valid_conference_name("corl/23"));
/// assert!(!is_valid_conference_name(""));
/// ```
pub fn is_valid_conference_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
