//! Domain models for Telegram folder exports.
//!
//! Folders and peer references come from the remote source untouched; resolved
//! entities and export records are what ends up in the output file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of remote object a peer reference points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerKind {
    /// A user account (including bots).
    User,
    /// A basic group.
    Chat,
    /// A broadcast channel or a supergroup.
    Channel,
}

impl fmt::Display for PeerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Chat => write!(f, "chat"),
            Self::Channel => write!(f, "channel"),
        }
    }
}

/// Opaque reference to a remote entity.
///
/// Two references are equal when they denote the same entity id and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerRef {
    pub kind: PeerKind,
    pub id: i64,
}

impl PeerRef {
    #[must_use]
    pub const fn new(kind: PeerKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for PeerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A user-defined folder with its include/exclude rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: i32,
    pub title: String,
    /// Included peers, in the order the remote source lists them.
    pub included_peers: Vec<PeerRef>,
    pub excluded_peers: Vec<PeerRef>,
}

/// Raw attributes of a remote entity, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteEntity {
    pub id: i64,
    pub is_user: bool,
    /// Set on broadcast channels.
    pub broadcast: bool,
    /// Set on supergroups.
    pub megagroup: bool,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

/// Outcome of looking a peer up on the remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(RemoteEntity),
    /// The current account may not see this peer (e.g. a private channel it left).
    AccessDenied,
}

/// Semantic classification of a resolved entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Channel,
    Group,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel => write!(f, "channel"),
            Self::Group => write!(f, "group"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A peer turned into display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: i64,
    /// Serialized as an explicit `null` when absent.
    pub username: Option<String>,
    #[serde(rename = "name")]
    pub display_name: String,
}

/// Outcome of resolving a peer to display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedEntity),
    AccessDenied,
}

/// One exported folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderExportRecord {
    pub id: i32,
    pub title: String,
    pub peers: Vec<ResolvedEntity>,
}

impl FolderExportRecord {
    /// Peers of the given kind, in export order.
    pub fn peers_of(&self, kind: EntityKind) -> impl Iterator<Item = &ResolvedEntity> {
        self.peers.iter().filter(move |p| p.kind == kind)
    }
}

/// Summary statistics for one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Number of folders exported.
    pub folder_count: usize,
    /// Peers written to the output.
    pub exported_peers: usize,
    /// Included peers dropped because the folder also excludes them.
    pub excluded_peers: usize,
    /// Peers skipped because the account may not see them.
    pub inaccessible_peers: usize,
}
