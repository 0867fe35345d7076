use std::fmt;

/// Presentation section of an accepted paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Oral,
    Poster,
}

impl Section {
    /// Label written into the bibliography `section` field
    pub fn label(&self) -> &'static str {
        match self {
            Section::Oral => "Oral",
            Section::Poster => "Poster",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
