//! Entity resolution on top of a [`RemoteSource`].

use crate::domain::{Lookup, PeerRef, RemoteSource, Resolution, Result};

use super::classifier::to_resolved;

/// Resolves peer references to display entities.
pub struct EntityResolver<'a, S: RemoteSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: RemoteSource + ?Sized> EntityResolver<'a, S> {
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolves one peer.
    ///
    /// # Errors
    /// Returns error on any remote failure other than access denial.
    pub fn resolve(&self, peer: &PeerRef) -> Result<Resolution> {
        match self.source.lookup(peer)? {
            Lookup::Found(entity) => Ok(Resolution::Resolved(to_resolved(&entity))),
            Lookup::AccessDenied => Ok(Resolution::AccessDenied),
        }
    }
}
