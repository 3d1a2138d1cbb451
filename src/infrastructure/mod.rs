//! Infrastructure layer - external adapters (snapshot, filesystem, config).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod session;
pub mod snapshot;

pub use config::load_config;
pub use session::{ClearOutcome, SessionFile};
pub use snapshot::SnapshotSource;
