//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;
use vaultprobe_core::ExtractorKind;

#[derive(Parser)]
#[command(name = "vaultprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a vault archive and diagnose credential count mismatches
    Diagnose(DiagnoseArgs),
    /// Diagnose an already-extracted vault directory
    Inspect(InspectArgs),
    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct DiagnoseArgs {
    /// Path to the vault archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Passphrase for an encrypted archive
    #[arg(
        value_name = "PASSPHRASE",
        env = "VAULTPROBE_PASSPHRASE",
        hide_env_values = true
    )]
    pub passphrase: Option<String>,

    /// Abort extraction after this many seconds
    #[arg(long, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Extraction backend
    #[arg(long, value_enum, default_value_t = ExtractorArg::Auto)]
    pub extractor: ExtractorArg,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Root of the extracted vault
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Name of the directory holding one subdirectory per credential
    #[arg(long, default_value = "credentials")]
    pub records_dir: String,
}

/// Extraction backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExtractorArg {
    /// Installed 7z binary if present, otherwise the built-in decoder
    Auto,
    /// Built-in decoder
    Native,
    /// Installed 7z binary
    Command,
}

impl From<ExtractorArg> for ExtractorKind {
    fn from(arg: ExtractorArg) -> Self {
        match arg {
            ExtractorArg::Auto => Self::Auto,
            ExtractorArg::Native => Self::Native,
            ExtractorArg::Command => Self::Command,
        }
    }
}

/// Parse a timeout given in (possibly fractional) seconds
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty timeout".to_string());
    }

    let secs = s
        .parse::<f64>()
        .map_err(|_| format!("invalid timeout: {s}"))?;
    if secs <= 0.0 {
        return Err(format!("timeout must be positive: {s}"));
    }

    Duration::try_from_secs_f64(secs).map_err(|_| format!("timeout out of range: {s}"))
}
