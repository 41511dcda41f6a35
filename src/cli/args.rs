//! Command-line arguments and subcommands for the `crosswalk` binary.
//!
//! Declared with `clap`'s derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::profile::TargetLanguage;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "crosswalk",
    version,
    about = "Translates Java sources to C++ or C#, keeping comments and layout."
)]
pub struct CrosswalkArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate files or directories of `.java` files into an output directory.
    Translate {
        /// Java files, or directories searched recursively for `.java` files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long, short, value_enum)]
        target: TargetLanguage,
        /// Directory receiving one file per top-level type.
        #[arg(long, short)]
        out: PathBuf,
        /// YAML or JSON file overriding the target's default profile.
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Print the translation of a single file to stdout.
    Show {
        #[arg(required = true)]
        file: PathBuf,
        #[arg(long, short, value_enum)]
        target: TargetLanguage,
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Translate without writing anything; report failures.
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long, short, value_enum)]
        target: TargetLanguage,
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Dump the parsed AST of a file as JSON.
    Ast {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print the default profile of a target as YAML.
    Profile {
        #[arg(long, short, value_enum)]
        target: TargetLanguage,
    },
}
