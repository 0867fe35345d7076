//! Citation key assignment.
//!
//! A key is the lowercased family name of the first author followed by the
//! year suffix (`smith23`). When a candidate repeats, the first paper keeps
//! the bare key and later papers get `a`, `b`, ... in arrival order.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::{Error, Result};
use crate::models::SubmissionRecord;
use crate::utils::{family_name, normalize_name_loose};

/// How candidate keys are derived from a record
#[derive(Debug, Clone)]
pub struct IdentifierScheme {
    pub suffix: String,
    /// Fold diacritics and drop punctuation from the family name
    pub ascii_keys: bool,
}

impl IdentifierScheme {
    pub fn new(suffix: impl Into<String>) -> Self {
        IdentifierScheme {
            suffix: suffix.into(),
            ascii_keys: false,
        }
    }

    /// Bare candidate key for a record, before collision handling
    pub fn candidate(&self, record: &SubmissionRecord) -> Result<String> {
        let first_author = record.authors.first().ok_or_else(|| {
            Error::malformed(format!("forum {}", record.forum_id), "no authors")
        })?;
        let family = family_name(first_author).ok_or_else(|| {
            Error::malformed(format!("forum {}", record.forum_id), "blank first author")
        })?;

        let stem = if self.ascii_keys {
            normalize_name_loose(family).replace(' ', "")
        } else {
            family.to_lowercase()
        };
        if stem.is_empty() {
            return Err(Error::malformed(
                format!("forum {}", record.forum_id),
                format!("first author '{}' yields an empty key", first_author),
            ));
        }

        let key = format!("{}{}", stem, self.suffix);
        // Keys become file names in the output directory.
        if key.chars().any(std::path::is_separator) {
            return Err(Error::malformed(
                format!("forum {}", record.forum_id),
                format!("citation key '{}' contains a path separator", key),
            ));
        }
        Ok(key)
    }
}

/// Collision bookkeeping for one run
#[derive(Debug, Default)]
pub struct IdentifierAssigner {
    /// Every key handed out so far, bare or suffixed
    taken: HashSet<String>,
    /// Number of suffixes issued per bare candidate
    collisions: HashMap<String, u32>,
}

impl IdentifierAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next key; must be called in metadata-store order.
    pub fn assign(&mut self, scheme: &IdentifierScheme, record: &SubmissionRecord) -> Result<String> {
        let candidate = scheme.candidate(record)?;
        if self.taken.insert(candidate.clone()) {
            return Ok(candidate);
        }

        let count = self.collisions.entry(candidate.clone()).or_insert(0);
        loop {
            *count += 1;
            let identifier = format!("{}{}", candidate, collision_letters(*count));
            // A suffixed key can clash with another paper's bare key; skip it.
            if self.taken.insert(identifier.clone()) {
                warn!(
                    "conflict found: {} ({}) assigned {}",
                    candidate, record.title, identifier
                );
                return Ok(identifier);
            }
        }
    }
}

/// Assign keys to records in order; output is index-aligned with the input.
pub fn assign_identifiers(
    records: &[SubmissionRecord],
    scheme: &IdentifierScheme,
) -> Result<Vec<String>> {
    let mut assigner = IdentifierAssigner::new();
    records
        .iter()
        .map(|record| assigner.assign(scheme, record))
        .collect()
}

/// 1 → "a", 26 → "z", 27 → "aa", 28 → "ab", ...
fn collision_letters(mut n: u32) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}
