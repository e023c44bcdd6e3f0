use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::TargetDir;
use crate::model::Language;

/// Output directory per target language.
///
/// A language without a directory, or with an empty one, is not generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsConfig {
    #[serde(default = "default_python_dir", skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,

    /// Python 2 output is off unless a directory is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python2: Option<PathBuf>,

    #[serde(default = "default_php_dir", skip_serializing_if = "Option::is_none")]
    pub php: Option<PathBuf>,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            python: default_python_dir(),
            python2: None,
            php: default_php_dir(),
        }
    }
}

impl TargetsConfig {
    /// Configured targets in generation order.
    pub fn enabled(&self) -> Vec<TargetDir> {
        [
            (Language::Python, &self.python),
            (Language::Python2, &self.python2),
            (Language::Php, &self.php),
        ]
        .into_iter()
        .filter_map(|(language, dir)| {
            dir.as_ref()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(|dir| TargetDir {
                    language,
                    dir: dir.clone(),
                })
        })
        .collect()
    }
}

fn default_python_dir() -> Option<PathBuf> {
    Some(PathBuf::from("./python/ccxtpro/"))
}

fn default_php_dir() -> Option<PathBuf> {
    Some(PathBuf::from("./php/"))
}
