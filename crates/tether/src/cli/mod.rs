mod init;
mod transpile;

pub use init::InitCommand;
pub use transpile::TranspileCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tether.toml";

/// tether - keep generated Python, PHP and TypeScript in step with the JavaScript source
#[derive(Parser)]
#[command(name = "tether")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Transpile derived classes, the order-book test and the declarations.
    Transpile(TranspileCommand),

    /// Write a default configuration file.
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Transpile(cmd) => cmd.execute(),
            Commands::Init(cmd) => cmd.execute(),
        }
    }
}
