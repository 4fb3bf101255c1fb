//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Print (or write) the generated source lists. Default when no
//!   command is given.
//! - `check`: Verify a previously generated file is up to date
//! - `init`: Write a default `.srclistrc.json`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DivergencePolicy;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// aws-lc-sys directory holding builder/cc_builder (overrides config file)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Config file to use instead of searching for .srclistrc.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail when a platform file has no sources block or malformed quoting
    #[arg(long, global = true)]
    pub strict: bool,

    /// How to handle compiled sources that differ between platforms
    #[arg(long, value_enum, global = true)]
    pub divergence: Option<DivergencePolicy>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Default, Args)]
pub struct GenerateCommand {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Previously generated file to compare against
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate source lists from the cc_builder platform files
    Generate(GenerateCommand),
    /// Check that a generated file matches the current cc_builder files
    Check(CheckCommand),
    /// Initialize a new .srclistrc.json configuration file
    Init,
}
