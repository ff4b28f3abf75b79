use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-consensus",
    version,
    about = "Consensus significance ranking and ROC benchmarks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Background(BackgroundArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Benchmark config (JSON)")]
    pub config: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Number of threads (0 = auto); overrides the config")]
    pub threads: Option<usize>,

    #[arg(long, default_value_t = false, help = "Embed ROC curves in consensus.json")]
    pub json: bool,

    #[arg(long, default_value_t = false, help = "Also write raw pools to pools.tsv")]
    pub tsv: bool,
}

#[derive(Debug, Args)]
pub struct BackgroundArgs {
    #[arg(long, num_args = 1.., required = true, help = "GMT signature library (repeatable)")]
    pub gmt: Vec<PathBuf>,

    #[arg(long, help = "Output counts JSON")]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Benchmark config (JSON)")]
    pub config: PathBuf,
}
