mod fixtures;
mod targets;

pub use fixtures::FixtureConfig;
pub use targets::TargetsConfig;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TetherError};
use crate::filter::NameFilter;
use crate::model::Language;

/// Root configuration for tether.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TetherConfig {
    /// Hand-written source tree.
    #[serde(default)]
    pub source: SourceConfig,

    /// Output directory per target language.
    #[serde(default)]
    pub targets: TargetsConfig,

    /// Order-book test fixture paths.
    #[serde(default)]
    pub fixtures: FixtureConfig,

    /// Ambient declaration file.
    #[serde(default)]
    pub declarations: DeclarationConfig,
}

impl TetherConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TetherError::Config(format!("Failed to read config file: {}", e)))?;

        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration file");
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| TetherError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Render the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TetherError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Freeze the parts of the configuration a single run reads.
    pub fn generation_options(&self, filter: NameFilter) -> GenerationOptions {
        GenerationOptions {
            source_dir: self.source.dir.clone(),
            targets: self.targets.enabled(),
            filter,
        }
    }
}

/// Source tree settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory scanned for derived class files.
    #[serde(default = "default_source_dir")]
    pub dir: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: default_source_dir(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("./js/")
}

/// Ambient declaration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationConfig {
    /// TypeScript declaration file rewritten after every run.
    #[serde(default = "default_declaration_file")]
    pub file: PathBuf,
}

impl Default for DeclarationConfig {
    fn default() -> Self {
        Self {
            file: default_declaration_file(),
        }
    }
}

fn default_declaration_file() -> PathBuf {
    PathBuf::from("./ccxt.pro.d.ts")
}

/// An output directory bound to its language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir {
    pub language: Language,
    pub dir: PathBuf,
}

/// Options fixed for the duration of one run.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub source_dir: PathBuf,
    pub targets: Vec<TargetDir>,
    pub filter: NameFilter,
}

/// Substitute `${VAR}` references with environment variable values.
fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env var pattern"));

    let mut result = content.to_string();
    for cap in ENV_VAR.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TetherConfig::default();
        assert_eq!(config.source.dir, PathBuf::from("./js/"));
        assert_eq!(config.declarations.file, PathBuf::from("./ccxt.pro.d.ts"));

        let languages: Vec<_> = config.targets.enabled().iter().map(|t| t.language).collect();
        assert_eq!(languages, vec![Language::Python, Language::Php]);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = TetherConfig::parse_toml("").unwrap();
        assert_eq!(config.targets.php, Some(PathBuf::from("./php/")));
        assert!(config.targets.python2.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [source]
            dir = "src/js"

            [targets]
            python = "out/py"
            python2 = "out/py2"
            php = "out/php"

            [fixtures]
            order_book = "src/test/ob.js"

            [declarations]
            file = "types/index.d.ts"
        "#;

        let config = TetherConfig::parse_toml(toml).unwrap();
        assert_eq!(config.source.dir, PathBuf::from("src/js"));
        assert_eq!(config.targets.enabled().len(), 3);
        assert_eq!(config.fixtures.order_book, PathBuf::from("src/test/ob.js"));
        assert_eq!(
            config.fixtures.python_output,
            PathBuf::from("./python/test/test_order_book.py")
        );
        assert_eq!(config.declarations.file, PathBuf::from("types/index.d.ts"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TETHER_TEST_SOURCE_DIR", "/tmp/tether-js");

        let toml = r#"
            [source]
            dir = "${TETHER_TEST_SOURCE_DIR}"
        "#;

        let config = TetherConfig::parse_toml(toml).unwrap();
        assert_eq!(config.source.dir, PathBuf::from("/tmp/tether-js"));

        std::env::remove_var("TETHER_TEST_SOURCE_DIR");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TetherConfig::parse_toml("[source\ndir = 1").unwrap_err();
        assert!(matches!(err, TetherError::Config(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let rendered = TetherConfig::default().to_toml_string().unwrap();
        let parsed = TetherConfig::parse_toml(&rendered).unwrap();
        assert_eq!(parsed.source.dir, PathBuf::from("./js/"));
        assert_eq!(parsed.targets.python, Some(PathBuf::from("./python/ccxtpro/")));
    }

    #[test]
    fn test_generation_options_follow_targets() {
        let mut config = TetherConfig::default();
        config.targets.php = None;

        let options = config.generation_options(NameFilter::All);
        assert_eq!(options.targets.len(), 1);
        assert_eq!(options.targets[0].language, Language::Python);
        assert!(options.filter.is_all());
    }
}
