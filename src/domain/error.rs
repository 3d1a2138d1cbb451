//! Domain-level error types for tgfolder-export.
//!
//! Every error here is fatal for the run. A peer the account cannot see is
//! not an error at all; see [`crate::domain::Lookup::AccessDenied`].

use std::path::PathBuf;
use thiserror::Error;

use super::models::PeerRef;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// JSON parsing or serialization failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Snapshot contents are structurally valid JSON but make no sense.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// The remote source has no entity for a referenced peer.
    #[error("Peer not found: {peer}")]
    PeerNotFound { peer: PeerRef },

    /// Any other failure reported by the remote source.
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// A fatal error raised while exporting a specific folder.
    #[error("{}", folder_context(folder, peer.as_ref()))]
    Folder {
        folder: String,
        peer: Option<PeerRef>,
        #[source]
        source: Box<AppError>,
    },

    /// Snapshot file does not exist.
    #[error("Snapshot not found at: {path}")]
    SnapshotNotFound { path: PathBuf },
}

fn folder_context(folder: &str, peer: Option<&PeerRef>) -> String {
    match peer {
        Some(peer) => format!("Export of folder '{folder}' failed at peer {peer}"),
        None => format!("Export of folder '{folder}' failed"),
    }
}

impl AppError {
    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Attach folder (and optionally peer) context to a fatal error.
    #[must_use]
    pub fn in_folder(self, folder: &str, peer: Option<PeerRef>) -> Self {
        Self::Folder {
            folder: folder.to_string(),
            peer,
            source: Box::new(self),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
