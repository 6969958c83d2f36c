//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// ewgen - generates a runtime dynamic-loading wrangler shim from C headers
#[derive(Parser)]
#[command(name = "ewgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// C headers to process, in order (defaults to the configured list)
    pub headers: Vec<PathBuf>,

    /// Configuration file (defaults to ./ewgen.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Template for the generated declarations header
    #[arg(long)]
    pub header_template: Option<PathBuf>,

    /// Template for the generated definitions source
    #[arg(long)]
    pub source_template: Option<PathBuf>,

    /// Destination of the generated declarations header
    #[arg(long)]
    pub header_out: Option<PathBuf>,

    /// Destination of the generated definitions source
    #[arg(long)]
    pub source_out: Option<PathBuf>,

    /// Macro constant gate: keep `#define <PREFIX>...` lines
    #[arg(long)]
    pub define_prefix: Option<String>,

    /// Print the extracted declaration model as JSON instead of generating
    #[arg(long)]
    pub dump_model: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
