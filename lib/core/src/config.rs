use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Similarity strategy used to rank entries against a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Damerau-Levenshtein similarity ratio
    #[serde(alias = "DLD")]
    EditDistance,
    /// Longest common subsequence length
    #[default]
    #[serde(alias = "LCS")]
    Subsequence,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::EditDistance => write!(f, "EditDistance"),
            Strategy::Subsequence => write!(f, "Subsequence"),
        }
    }
}

/// Suggestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub strategy: Strategy,
    /// Insert the snippet instead of the bare name when one is available
    pub snippet_preferred: bool,
    pub max_suggestions: usize,
    /// Fall back to the entry name as preview when it has no examples
    pub always_show_examples: bool,
    /// Only trigger inside `$...$` / `$$...$$`
    pub auto_enabling: bool,
    /// Trigger everywhere
    pub force_enabling: bool,
    /// Markdown document holding the user overrides
    pub override_file: PathBuf,
    pub debug: bool,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Subsequence,
            snippet_preferred: true,
            max_suggestions: 5,
            always_show_examples: true,
            auto_enabling: true,
            force_enabling: false,
            override_file: PathBuf::from("symbols.md"),
            debug: false,
        }
    }
}

impl SuggestConfig {
    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: SuggestConfig = serde_json::from_str(&data)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// `max_suggestions` is the default list size and must be at least 1;
    /// an explicit search limit of 0 is still valid and yields nothing.
    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(Error::InvalidConfig(
                "max_suggestions must be at least 1".to_string(),
            ));
        }
        if self.override_file.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "override_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
