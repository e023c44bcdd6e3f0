use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tether_core::TetherConfig;

use super::DEFAULT_CONFIG_FILE;

/// Write a default configuration file.
#[derive(Parser)]
pub struct InitCommand {
    /// Where to write the configuration.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists. Use --force to overwrite it.",
                self.output.display()
            );
        }

        let content = TetherConfig::default().to_toml_string()?;
        std::fs::write(&self.output, content)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!(
            "{} Wrote {}",
            style("✓").green(),
            style(self.output.display()).cyan()
        );
        Ok(())
    }
}
