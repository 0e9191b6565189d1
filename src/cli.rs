//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Interface Poisoning Index analyzer
#[derive(Parser, Debug)]
#[command(name = "ipi-engine")]
#[command(about = "Ranks interfaces by abstraction overhead that buys no substitutability")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a Java project directory
    Scan(ScanArgs),
    /// Score a JSON fact sheet produced by an external parser
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Project root to scan
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Include directories whose path contains "test"
    #[arg(long)]
    pub include_tests: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Fact sheet (JSON)
    #[arg(value_name = "FACTS")]
    pub facts: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options shared by every analysis command
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Also write the JSON summary to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to ipi.toml in the scanned root)
    #[arg(short, long, value_name = "FILE", env = "IPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Limit the ranked table to the top N interfaces
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// SIR weight
    #[arg(long)]
    pub alpha: Option<f64>,

    /// (1 - UUR) weight
    #[arg(long)]
    pub beta: Option<f64>,

    /// UMR weight
    #[arg(long)]
    pub gamma: Option<f64>,

    /// NCD weight
    #[arg(long)]
    pub delta: Option<f64>,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON summary document
    Json,
    /// TOON (Token-Oriented Object Notation) summary document
    Toon,
}
