use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "xdiff",
    about = "Policy-aware structural XML diff",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two XML documents and classify the differences
    Diff(DiffArgs),
    /// Print the policy key of a structural path
    Normalize(NormalizeArgs),
    /// Validate a ruleset file and list its rules
    CheckPolicy(CheckPolicyArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Ruleset file; disables discovery by root tag
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Directory searched for `<root>.json`
    #[arg(long)]
    pub policy_dir: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Skip classification
    #[arg(long)]
    pub no_policy: bool,
    #[arg(long)]
    pub suppress_positional_after_move: bool,
    /// Exit non-zero when any record is classified `error`
    #[arg(long)]
    pub fail_on_error: bool,
    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct NormalizeArgs {
    pub path: String,
}

#[derive(Args)]
pub struct CheckPolicyArgs {
    pub file: PathBuf,
}
