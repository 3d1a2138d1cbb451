//! Telegram Folder Export - dump folder contents without reading messages.
//!
//! Reads the account's folders from a snapshot, resolves the channels,
//! groups and users each folder contains, and writes them as JSON or as a
//! text report.
//!
//!   tgfolder-export --json                # Write tgf-list.json
//!   tgfolder-export -t report.txt         # Write a text report
//!   tgfolder-export -s account.json -j    # Use a specific snapshot
//!   tgfolder-export --clear-session       # Drop the saved session

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::error::Error as _;
use std::io::Write;

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    export_all_folders, format_folders_json, format_folders_text, format_stats, OutputFormat,
};
use cli::{Cli, OutputTarget};
use domain::{AppConfig, AppError};
use infrastructure::{load_config, ClearOutcome, SessionFile, SnapshotSource};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), error_chain(&e));
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: &Cli) -> domain::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(snapshot) = &cli.snapshot {
        config.source.snapshot.clone_from(snapshot);
    }

    let session = SessionFile::new(config.session_path(), config.session.ttl_days);

    if cli.clear_session {
        return cmd_clear_session(&session);
    }

    let target = cli.output_target(&config.output).ok_or_else(|| AppError::Config {
        message: "One of -j/--json or -t/--text is required".into(),
    })?;

    cmd_export(&config, &session, &target)
}

/// Clear session command.
fn cmd_clear_session(session: &SessionFile) -> domain::Result<()> {
    match session.clear()? {
        ClearOutcome::NotFound => println!("No session found to clear."),
        ClearOutcome::Cleared => {
            println!("Cleared session: {}", session.path().display());
            println!("{} Session cleared successfully.", "✓".green().bold());
        }
    }
    Ok(())
}

/// Export all folders to the requested file.
fn cmd_export(config: &AppConfig, session: &SessionFile, target: &OutputTarget) -> domain::Result<()> {
    session.ensure_dir()?;
    session.cleanup_if_expired()?;

    let source = SnapshotSource::open(&config.source.snapshot)?;
    let (records, stats) = export_all_folders(&source)?;

    let content = match target.format {
        OutputFormat::Json => format_folders_json(&records).map_err(AppError::json_parse)?,
        OutputFormat::Text => format_folders_text(&records, Utc::now()),
    };

    let path = &target.path;
    tracing::info!("Writing {:?} output to {}", target.format, path.display());

    let mut file = std::fs::File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {}", path.display()), e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| AppError::io("Failed to write file", e))?;

    println!(
        "{} Exported {} folders to {}",
        "✓".green().bold(),
        stats.folder_count,
        path.display()
    );
    println!();
    println!("{}", format_stats(&stats));

    Ok(())
}

/// Error message followed by its sources.
fn error_chain(err: &AppError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
