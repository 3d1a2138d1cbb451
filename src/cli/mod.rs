//! CLI interface using clap.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::application::OutputFormat;
use crate::domain::OutputConfig;

/// Export Telegram folder contents to file.
///
/// Writes the channels, groups and users of every folder as JSON or as a text
/// report. Message content is never read.
#[derive(Parser, Debug)]
#[command(name = "tgfolder-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Export to JSON format (default file from config: tgf-list.json).
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with = "text",
        required_unless_present_any = ["text", "clear_session"]
    )]
    pub json: Option<Option<PathBuf>>,

    /// Export to text format (default file from config: tgf-list.txt).
    #[arg(short, long, value_name = "FILE")]
    pub text: Option<Option<PathBuf>>,

    /// Clear saved Telegram session and exit.
    #[arg(long)]
    pub clear_session: bool,

    /// Account snapshot to export from (overrides config and TGF_SNAPSHOT).
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Config file path.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved output request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub path: PathBuf,
}

impl Cli {
    /// Output format and file, falling back to the configured default names.
    ///
    /// Returns `None` when neither `--json` nor `--text` was given.
    #[must_use]
    pub fn output_target(&self, defaults: &OutputConfig) -> Option<OutputTarget> {
        let pick = |flag: &Option<PathBuf>, default: &Path, format| OutputTarget {
            format,
            path: flag.clone().unwrap_or_else(|| default.to_path_buf()),
        };

        match (&self.json, &self.text) {
            (Some(json), _) => Some(pick(json, defaults.json_file.as_path(), OutputFormat::Json)),
            (None, Some(text)) => Some(pick(text, defaults.text_file.as_path(), OutputFormat::Text)),
            (None, None) => None,
        }
    }
}
