//! File-name filter applied during discovery.

use std::fmt;

use regex_lite::Regex;

use crate::error::{Result, TetherError};

/// Selects which derived source files take part in a run.
#[derive(Clone, Default)]
pub enum NameFilter {
    /// Every source file.
    #[default]
    All,
    /// Files whose name matches the regular expression.
    Pattern(Regex),
}

impl NameFilter {
    /// Build a filter from an optional command-line pattern.
    ///
    /// A missing or empty pattern selects everything. An invalid regular expression is a
    /// configuration error.
    pub fn parse(pattern: Option<&str>) -> Result<Self> {
        match pattern.map(str::trim) {
            None | Some("") => Ok(NameFilter::All),
            Some(pattern) => Regex::new(pattern)
                .map(NameFilter::Pattern)
                .map_err(|e| TetherError::Config(format!("Invalid file pattern '{}': {}", pattern, e))),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Pattern(re) => re.is_match(file_name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, NameFilter::All)
    }
}

impl fmt::Debug for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFilter::All => write!(f, "All"),
            NameFilter::Pattern(re) => write!(f, "Pattern({:?})", re.as_str()),
        }
    }
}
