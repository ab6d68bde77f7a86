//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use versioned_idl::core::INTERFACES_MANIFEST;

/// vidl - Build-graph generation for versioned interface libraries
#[derive(Parser)]
#[command(name = "vidl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate every module for the declared interfaces
    Plan(PlanArgs),

    /// Show the versions of each interface
    Versions(VersionsArgs),

    /// Resolve the imports of one interface version
    Resolve(ResolveArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Interfaces manifest
    #[arg(default_value = INTERFACES_MANIFEST)]
    pub manifest: PathBuf,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of parallel jobs
    #[arg(short, long, env = "VIDL_JOBS")]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct VersionsArgs {
    /// Interfaces manifest
    #[arg(default_value = INTERFACES_MANIFEST)]
    pub manifest: PathBuf,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Interfaces manifest
    pub manifest: PathBuf,

    /// Interface name
    pub interface: String,

    /// Version to resolve for (defaults to the in-development version)
    pub version: Option<String>,
}
