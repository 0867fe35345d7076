//! Configuration file (`proceedings.toml`) loading and validation.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::utils::{is_valid_conference_name, year_suffix};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "proceedings.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub conference: ConferenceConfig,
    pub proceedings: ProceedingsInfo,
    #[serde(default)]
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceConfig {
    /// Short slug prefixing all artifacts, e.g. `corl23`
    pub name: String,
    /// Overrides the suffix derived from `proceedings.year`
    pub year_suffix: Option<String>,
    /// Fold diacritics and punctuation out of citation keys
    #[serde(default)]
    pub ascii_keys: bool,
    /// Forum ids presented in the oral section
    #[serde(default)]
    pub oral_forum_ids: Vec<String>,
}

/// Header block of the bibliography
#[derive(Debug, Clone, Deserialize)]
pub struct ProceedingsInfo {
    pub key: String,
    pub booktitle: String,
    pub name: String,
    pub shortname: String,
    /// Editor names in "First Last" form
    #[serde(default)]
    pub editors: Vec<String>,
    #[serde(default)]
    pub volume: String,
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub conference_url: String,
    #[serde(default)]
    pub address: String,
    pub conference_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_baseurl")]
    pub baseurl: String,
    #[serde(default)]
    pub invitation: String,
    /// Venue strings of accepted papers; empty keeps every submission
    #[serde(default)]
    pub accepted_venues: Vec<String>,
    /// Venue strings whose papers have a poster spotlight video
    #[serde(default)]
    pub poster_venues: Vec<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        PlatformConfig {
            baseurl: default_baseurl(),
            invitation: String::new(),
            accepted_venues: Vec::new(),
            poster_venues: Vec::new(),
        }
    }
}

fn default_baseurl() -> String {
    "https://api.openreview.net".to_string()
}

impl Config {
    /// Load and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !is_valid_conference_name(&self.conference.name) {
            return Err(Error::Config(format!(
                "invalid conference name '{}'",
                self.conference.name
            )));
        }
        if self.proceedings.end < self.proceedings.start {
            return Err(Error::Config(format!(
                "proceedings end {} precedes start {}",
                self.proceedings.end, self.proceedings.start
            )));
        }
        Ok(())
    }

    /// Suffix appended to surnames in citation keys
    pub fn identifier_suffix(&self) -> String {
        self.conference
            .year_suffix
            .clone()
            .unwrap_or_else(|| year_suffix(self.proceedings.year))
    }

    pub fn oral_forum_ids(&self) -> HashSet<String> {
        self.conference.oral_forum_ids.iter().cloned().collect()
    }
}
