use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "icoolgen - Build ICOOL for001.dat input decks from typed TOML problem definitions.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a problem definition and write its for001.dat deck.
    Generate(GenerateArgs),
    /// Browse the model catalogs of the modeled parameter families.
    Models(ModelsArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the problem definition in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output file, or a directory that receives for001.dat.
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = ".",
        conflicts_with = "stdout"
    )]
    pub output: PathBuf,

    /// Print the deck to standard output instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the `models` subcommand.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Family to list (e.g. SOL, ACCEL, MATERIAL). Lists all families when omitted.
    #[arg(value_name = "FAMILY")]
    pub family: Option<String>,

    /// Model of the family whose parameter table to show (e.g. bz).
    #[arg(value_name = "MODEL", requires = "family")]
    pub model: Option<String>,
}
