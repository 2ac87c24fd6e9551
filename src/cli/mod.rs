//! CLI command definitions for configr
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod get;
pub mod list;

use clap::{Parser, Subcommand};
use get::GetArgs;
use list::ListArgs;
use std::path::PathBuf;

/// Load cascading configuration scripts and inspect the result
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Script to load; repeat to cascade (later files override earlier ones).
    /// Without any, the default project/user/CONFIGR_FILE scripts are used.
    #[arg(short, long = "config", value_name = "FILE", global = true)]
    pub configs: Vec<PathBuf>,

    /// Resolve ambiguous anonymous lookups to the first registered value
    #[arg(long, global = true)]
    pub first_match: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the scripts and report success or the first failure
    Check,

    /// List every registered entry
    List(ListArgs),

    /// Print one value of a built-in type
    Get(GetArgs),
}
