use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tether_codegen::{Outcome, RuleEngine, Transpiler};
use tether_core::{NameFilter, TetherConfig};

use super::DEFAULT_CONFIG_FILE;

/// Transpile derived classes into every target language.
#[derive(Parser)]
pub struct TranspileCommand {
    /// Only transpile source files whose name matches this regular expression.
    pub pattern: Option<String>,

    /// Configuration file (defaults to tether.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source directory to scan (overrides config).
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Python output directory (overrides config).
    #[arg(long)]
    pub python: Option<PathBuf>,

    /// Python 2 output directory (enables Python 2 output).
    #[arg(long)]
    pub python2: Option<PathBuf>,

    /// PHP output directory (overrides config).
    #[arg(long)]
    pub php: Option<PathBuf>,

    /// TypeScript declaration file (overrides config).
    #[arg(long)]
    pub declarations: Option<PathBuf>,

    /// Log every phase and file instead of showing a spinner.
    #[arg(short, long)]
    pub verbose: bool,
}

impl TranspileCommand {
    /// Execute the transpile command.
    pub fn execute(self) -> Result<()> {
        let log_level = if self.verbose { "debug" } else { "warn" };
        tracing_subscriber::fmt()
            .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()))
            .with_target(false)
            .init();

        let config = self.load_config()?;
        let filter = NameFilter::parse(self.pattern.as_deref())?;

        // Log lines and the spinner would interleave on stderr.
        let pb = if self.verbose {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Transpiling...");

        let transpiler = Transpiler::from_config(RuleEngine::new(), &config, filter);
        let outcome = transpiler.run();
        pb.finish_and_clear();

        let outcome = outcome.context("Transpilation failed")?;

        println!();
        match outcome {
            Outcome::NothingToDo => {
                println!("  {} 0 files transpiled.", style("⚠").yellow());
            }
            Outcome::Transpiled { classes } => {
                let languages: Vec<String> = transpiler
                    .options()
                    .targets
                    .iter()
                    .map(|t| t.language.to_string())
                    .collect();
                println!(
                    "  {} Transpiled {} classes to {}",
                    style("✓").green(),
                    style(classes.len()).cyan(),
                    languages.join(", ")
                );
                println!(
                    "  {} Declarations: {}",
                    style("✓").green(),
                    style(config.declarations.file.display()).cyan()
                );
            }
        }
        println!();

        Ok(())
    }

    /// Load the configuration file, if any, and apply command-line overrides.
    fn load_config(&self) -> Result<TetherConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Configuration file not found: {}", path.display());
                }
                TetherConfig::from_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TetherConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TetherConfig::default(),
        };

        if let Some(source) = &self.source {
            config.source.dir = source.clone();
        }
        if let Some(python) = &self.python {
            config.targets.python = Some(python.clone());
        }
        if let Some(python2) = &self.python2 {
            config.targets.python2 = Some(python2.clone());
        }
        if let Some(php) = &self.php {
            config.targets.php = Some(php.clone());
        }
        if let Some(declarations) = &self.declarations {
            config.declarations.file = declarations.clone();
        }

        tracing::debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn command() -> TranspileCommand {
        TranspileCommand {
            pattern: None,
            config: None,
            source: None,
            python: None,
            python2: None,
            php: None,
            declarations: None,
            verbose: false,
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        std::fs::write(&file, "[source]\ndir = \"from-file\"\n\n[targets]\nphp = \"php-from-file\"\n").unwrap();

        let cmd = TranspileCommand {
            config: Some(file),
            php: Some(PathBuf::from("php-from-cli")),
            python2: Some(PathBuf::from("py2")),
            ..command()
        };
        let config = cmd.load_config().unwrap();

        assert_eq!(config.source.dir, PathBuf::from("from-file"));
        assert_eq!(config.targets.php, Some(PathBuf::from("php-from-cli")));
        assert_eq!(config.targets.python2, Some(PathBuf::from("py2")));
        assert_eq!(config.targets.enabled().len(), 3);
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempdir().unwrap();
        let cmd = TranspileCommand {
            config: Some(dir.path().join("missing.toml")),
            ..command()
        };
        assert!(cmd.load_config().is_err());
    }
}
