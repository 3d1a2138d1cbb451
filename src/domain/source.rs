//! Port to the remote account that owns the folders.

use super::error::Result;
use super::models::{Folder, Lookup, PeerRef};

/// Read-only view of a messaging account.
///
/// Authentication and connection handling belong to the implementor.
pub trait RemoteSource {
    /// Lists the account's user-defined folders in the order the platform
    /// returns them.
    ///
    /// # Errors
    /// Returns error if the folder list cannot be fetched.
    fn list_folders(&self) -> Result<Vec<Folder>>;

    /// Fetches the entity behind a peer reference.
    ///
    /// A peer the account may not see is reported as
    /// [`Lookup::AccessDenied`], never as an error.
    ///
    /// # Errors
    /// Returns error on any other remote failure.
    fn lookup(&self, peer: &PeerRef) -> Result<Lookup>;
}
