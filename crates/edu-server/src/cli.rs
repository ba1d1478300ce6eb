use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use edu_core::enums::DocumentKind;

/// Top-level CLI parser for the `edushare` binary.
#[derive(Debug, Parser)]
#[command(name = "edushare", version, about = "edushare - educational resources API")]
pub struct Cli {
    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./edushare.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Load documents from a JSON array file into a collection
    Import(ImportArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Serve(ServeArgs::default())
    }
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Override `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Override `server.port`
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Target collection: paper, syllabus, study-material
    #[arg(short, long)]
    pub kind: DocumentKind,

    /// JSON file holding an array of documents
    pub file: PathBuf,
}
