//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use extdoctor_core::DiagnosisConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "extdoctor")]
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
    /// Diagnose extension or add-on ZIP archives for install issues
    Diagnose(DiagnoseArgs),
    /// Show the parsed blender_manifest.toml of an archive
    Manifest(ManifestArgs),
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct DiagnoseArgs {
    /// Archives to diagnose
    #[arg(value_name = "ARCHIVE", required = true)]
    pub archives: Vec<PathBuf>,

    /// Blender version to check manifest compatibility against (e.g. 4.2.0)
    #[arg(long, short = 'b', value_name = "VERSION", env = "EXTDOCTOR_BLENDER_VERSION")]
    pub blender_version: Option<String>,

    /// Fail on warnings as well as errors
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(clap::Args)]
pub struct ManifestArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::Args)]
pub struct LimitArgs {
    /// Maximum number of entries an archive may list
    #[arg(long, default_value = "65535")]
    pub max_entries: usize,

    /// Maximum manifest size in bytes
    #[arg(long, value_parser = parse_byte_size)]
    pub max_manifest_size: Option<u64>,
}

impl LimitArgs {
    /// Builds the inspection limits, keeping defaults for unset values.
    pub fn to_config(&self) -> DiagnosisConfig {
        let mut config = DiagnosisConfig {
            max_entry_count: self.max_entries,
            ..DiagnosisConfig::default()
        };
        if let Some(size) = self.max_manifest_size {
            config.max_manifest_size = size;
        }
        config
    }
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
