//! Author name utilities for citation keys and BibTeX author fields.
//!
//! Names arrive from the review platform as free text in "First Last" order.
//! The family name is taken to be the last whitespace-separated token; the
//! remaining tokens form the given name.

use unicode_normalization::UnicodeNormalization;

/// Normalize a name: strip accents, lowercase, collapse whitespace.
///
/// # Examples
///
/// ```
/// use proceedings::utils::normalize_name;
///
/// assert_eq!(normalize_name("José García"), "jose garcia");
/// assert_eq!(normalize_name("Müller"), "muller");
/// assert_eq!(normalize_name("  Alice   Bob  "), "alice bob");
/// ```
pub fn normalize_name(name: &str) -> String {
    let replaced = replace_special_chars(name);

    replaced
        // NFD splits "é" into "e" + combining acute accent
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Letters that are distinct graphemes rather than accented forms,
/// so NFD leaves them alone.
fn replace_special_chars(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Ł' => 'L',
            'ł' => 'l',
            'Ø' => 'O',
            'ø' => 'o',
            'Æ' => 'A',
            'æ' => 'a',
            'Å' => 'A',
            'å' => 'a',
            'ß' => 's',
            'Ð' => 'D',
            'ð' => 'd',
            'Þ' => 'T',
            'þ' => 't',
            'Đ' => 'D',
            'đ' => 'd',
            'İ' => 'I',
            'ı' => 'i',
            'Ğ' => 'G',
            'ğ' => 'g',
            'Ş' => 'S',
            'ş' => 's',
            _ => c,
        })
        .collect()
}

/// Normalize and drop punctuation, keeping letters, digits and spaces.
///
/// # Examples
///
/// ```
/// use proceedings::utils::normalize_name_loose;
///
/// assert_eq!(normalize_name_loose("O'Brien"), "obrien");
/// assert_eq!(normalize_name_loose("Jean-Pierre"), "jeanpierre");
/// ```
pub fn normalize_name_loose(name: &str) -> String {
    normalize_name(name)
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

/// Split a "First Last" name into (given_name, family_name).
///
/// The family name is the last token. Single-token names have no given name.
///
/// # Examples
///
/// ```
/// use proceedings::utils::split_name;
///
/// assert_eq!(split_name("Jane Doe"), (Some("Jane".into()), Some("Doe".into())));
/// assert_eq!(split_name("Ludwig van Beethoven"), (Some("Ludwig van".into()), Some("Beethoven".into())));
/// assert_eq!(split_name("Plato"), (None, Some("Plato".into())));
/// ```
pub fn split_name(full_name: &str) -> (Option<String>, Option<String>) {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    match parts.split_last() {
        None => (None, None),
        Some((family, [])) => (None, Some(family.to_string())),
        Some((family, given)) => (Some(given.join(" ")), Some(family.to_string())),
    }
}

/// Family name of a "First Last" name, if any.
pub fn family_name(full_name: &str) -> Option<&str> {
    full_name.split_whitespace().last()
}

/// Render one name as BibTeX "Last, First".
///
/// # Examples
///
/// ```
/// use proceedings::utils::bibtex_name;
///
/// assert_eq!(bibtex_name("Marc Toussaint"), "Toussaint, Marc");
/// assert_eq!(bibtex_name("Plato"), "Plato");
/// ```
pub fn bibtex_name(full_name: &str) -> String {
    match split_name(full_name) {
        (Some(given), Some(family)) => format!("{}, {}", family, given),
        (None, Some(family)) => family,
        _ => String::new(),
    }
}

/// Render a name list as "Last, First and Last, First and ...".
///
/// # Examples
///
/// ```
/// use proceedings::utils::bibtex_name_list;
///
/// let names = vec!["Jie Tan".to_string(), "Marc Toussaint".to_string()];
/// assert_eq!(bibtex_name_list(&names), "Tan, Jie and Toussaint, Marc");
/// ```
pub fn bibtex_name_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|n| bibtex_name(n.as_ref()))
        .collect::<Vec<_>>()
        .join(" and ")
}
