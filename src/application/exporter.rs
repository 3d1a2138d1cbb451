//! Folder export service.
//!
//! Walks the account's folders in order and resolves the effective peers of
//! each one. Inaccessible peers are skipped and counted; every other failure
//! aborts the run with folder/peer context attached.

use std::collections::HashSet;

use crate::domain::{
    ExportStats, Folder, FolderExportRecord, PeerRef, RemoteSource, Resolution, Result,
};

use super::resolver::EntityResolver;

/// Included peers minus excluded peers, keeping the include order.
#[must_use]
pub fn effective_peers(folder: &Folder) -> Vec<PeerRef> {
    let excluded: HashSet<&PeerRef> = folder.excluded_peers.iter().collect();
    folder
        .included_peers
        .iter()
        .filter(|peer| !excluded.contains(peer))
        .copied()
        .collect()
}

/// Exports folders one at a time, accumulating run statistics.
pub struct FolderExporter<'a, S: RemoteSource + ?Sized> {
    resolver: EntityResolver<'a, S>,
    stats: ExportStats,
}

impl<'a, S: RemoteSource + ?Sized> FolderExporter<'a, S> {
    pub const fn new(source: &'a S) -> Self {
        Self {
            resolver: EntityResolver::new(source),
            stats: ExportStats {
                folder_count: 0,
                exported_peers: 0,
                excluded_peers: 0,
                inaccessible_peers: 0,
            },
        }
    }

    /// Exports a single folder.
    ///
    /// # Errors
    /// Returns error if a peer fails to resolve for any reason other than
    /// access denial.
    pub fn export_folder(&mut self, folder: &Folder) -> Result<FolderExportRecord> {
        let effective = effective_peers(folder);
        let excluded = folder.included_peers.len() - effective.len();
        if excluded > 0 {
            tracing::debug!(folder = %folder.title, excluded, "Dropped excluded peers");
        }

        let mut peers = Vec::with_capacity(effective.len());
        for peer in effective {
            match self
                .resolver
                .resolve(&peer)
                .map_err(|e| e.in_folder(&folder.title, Some(peer)))?
            {
                Resolution::Resolved(entity) => peers.push(entity),
                Resolution::AccessDenied => {
                    tracing::warn!(folder = %folder.title, %peer, "Peer is inaccessible, skipping");
                    self.stats.inaccessible_peers += 1;
                }
            }
        }

        self.stats.folder_count += 1;
        self.stats.excluded_peers += excluded;
        self.stats.exported_peers += peers.len();

        Ok(FolderExportRecord {
            id: folder.id,
            title: folder.title.clone(),
            peers,
        })
    }

    /// Statistics accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> &ExportStats {
        &self.stats
    }

    #[must_use]
    pub fn into_stats(self) -> ExportStats {
        self.stats
    }
}

/// Exports every folder of the account.
///
/// # Errors
/// Returns error if the folder list cannot be fetched or a folder export
/// fails fatally.
pub fn export_all_folders<S: RemoteSource + ?Sized>(
    source: &S,
) -> Result<(Vec<FolderExportRecord>, ExportStats)> {
    let folders = source.list_folders()?;
    tracing::info!("Found {} folders", folders.len());

    let mut exporter = FolderExporter::new(source);
    let mut records = Vec::with_capacity(folders.len());

    for folder in &folders {
        tracing::info!(id = folder.id, "Processing folder {}", folder.title);
        records.push(exporter.export_folder(folder)?);
        tracing::debug!(
            inaccessible = exporter.stats().inaccessible_peers,
            "Finished folder {}",
            folder.title
        );
    }

    let stats = exporter.into_stats();
    tracing::info!(
        "Exported {} folders with {} peers ({} inaccessible)",
        stats.folder_count,
        stats.exported_peers,
        stats.inaccessible_peers
    );

    Ok((records, stats))
}
