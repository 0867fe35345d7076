use std::collections::HashSet;

use tracing::info;

use crate::models::{Section, SubmissionRecord};

/// A record with its citation key and section
#[derive(Debug, Clone)]
pub struct Paper {
    pub record: SubmissionRecord,
    pub identifier: String,
    pub section: Section,
}

/// Papers partitioned by section, each side in metadata-store order
#[derive(Debug, Default)]
pub struct SectionSplit {
    pub oral: Vec<Paper>,
    pub poster: Vec<Paper>,
}

impl SectionSplit {
    /// Bibliography order: every oral paper, then every poster paper
    pub fn in_order(&self) -> impl Iterator<Item = &Paper> {
        self.oral.iter().chain(self.poster.iter())
    }
}

/// Split records by exact forum-id membership in the oral allow-list.
///
/// `identifiers` must be index-aligned with `records`.
pub fn split_sections(
    records: Vec<SubmissionRecord>,
    identifiers: Vec<String>,
    oral_forum_ids: &HashSet<String>,
) -> SectionSplit {
    let mut split = SectionSplit::default();

    for (record, identifier) in records.into_iter().zip(identifiers) {
        if oral_forum_ids.contains(&record.forum_id) {
            split.oral.push(Paper {
                record,
                identifier,
                section: Section::Oral,
            });
        } else {
            split.poster.push(Paper {
                record,
                identifier,
                section: Section::Poster,
            });
        }
    }

    info!(
        "num orals: {}, num posters: {}",
        split.oral.len(),
        split.poster.len()
    );
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(forum: &str) -> SubmissionRecord {
        SubmissionRecord {
            forum_id: forum.to_string(),
            title: String::new(),
            abstract_text: String::new(),
            authors: vec!["Jane Doe".to_string()],
            supplementary_material: None,
        }
    }

    #[test]
    fn test_split_preserves_relative_order() {
        let records = vec![record("P1"), record("O1"), record("P2"), record("O2")];
        let ids = vec!["p1".into(), "o1".into(), "p2".into(), "o2".into()];
        let orals: HashSet<String> = ["O1", "O2"].iter().map(|s| s.to_string()).collect();

        let split = split_sections(records, ids, &orals);

        let oral: Vec<_> = split.oral.iter().map(|p| p.identifier.as_str()).collect();
        let poster: Vec<_> = split.poster.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(oral, vec!["o1", "o2"]);
        assert_eq!(poster, vec!["p1", "p2"]);
        assert!(split.oral.iter().all(|p| p.section == Section::Oral));
        assert!(split.poster.iter().all(|p| p.section == Section::Poster));

        let ordered: Vec<_> = split.in_order().map(|p| p.record.forum_id.as_str()).collect();
        assert_eq!(ordered, vec!["O1", "O2", "P1", "P2"]);
    }

    #[test]
    fn test_membership_is_exact() {
        let orals: HashSet<String> = ["o1".to_string()].into_iter().collect();
        let split = split_sections(vec![record("O1")], vec!["x".into()], &orals);
        assert!(split.oral.is_empty());
        assert_eq!(split.poster.len(), 1);
    }
}
