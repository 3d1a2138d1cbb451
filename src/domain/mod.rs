//! Domain layer - core business types.
//!
//! This layer contains pure domain models, configuration types, the remote
//! source port and error types, without any IO.

pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use config::{AppConfig, OutputConfig};
pub use error::{AppError, Result};
pub use models::{
    EntityKind, ExportStats, Folder, FolderExportRecord, Lookup, PeerKind, PeerRef, RemoteEntity,
    Resolution, ResolvedEntity,
};
pub use source::RemoteSource;
