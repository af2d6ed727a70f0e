//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::markdown::DecoratorConfig;

/// Command line configuration for newtab.
#[derive(Debug, Clone, Parser)]
#[command(name = "newtab", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only modify external links
    #[arg(long)]
    pub external_only: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if input path is given but does not exist.
    pub fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input
            && !input.exists()
        {
            bail!("Input file does not exist: {}", input.display());
        }

        Ok(())
    }

    /// Returns link decoration settings for this run.
    pub fn decorator_config(&self) -> DecoratorConfig {
        DecoratorConfig::new(self.external_only)
    }
}
