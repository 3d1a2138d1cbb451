//! JSON account snapshot reader.
//!
//! A snapshot holds the result of `messages.getDialogFilters` together with
//! the chats and users those filters reference, using the platform's own
//! constructor names in the `_` field:
//!
//! ```json
//! {
//!   "self_user_id": 1000,
//!   "filters": [{"_": "DialogFilterDefault"}, {"_": "DialogFilter", "id": 2, "title": "Work",
//!                "include_peers": [{"_": "InputPeerChannel", "channel_id": 111}],
//!                "exclude_peers": []}],
//!   "chats": [{"_": "Channel", "id": 111, "title": "News", "broadcast": true}],
//!   "users": []
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{
    AppError, Folder, Lookup, PeerKind, PeerRef, RemoteEntity, RemoteSource, Result,
};

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    self_user_id: Option<i64>,
    #[serde(default)]
    filters: Vec<RawFilter>,
    #[serde(default)]
    chats: Vec<RawChat>,
    #[serde(default)]
    users: Vec<RawUser>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "_")]
enum RawFilter {
    DialogFilter {
        id: i32,
        title: RawTitle,
        #[serde(default)]
        include_peers: Vec<RawInputPeer>,
        #[serde(default)]
        exclude_peers: Vec<RawInputPeer>,
    },
    /// Shared folder; has no exclusion list.
    DialogFilterChatlist {
        id: i32,
        title: RawTitle,
        #[serde(default)]
        include_peers: Vec<RawInputPeer>,
    },
    /// The built-in "All chats" entry.
    DialogFilterDefault,
}

/// Older layers send a plain string, newer ones `TextWithEntities`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTitle {
    Plain(String),
    Rich { text: String },
}

impl RawTitle {
    fn into_text(self) -> String {
        match self {
            Self::Plain(text) | Self::Rich { text } => text,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "_")]
enum RawInputPeer {
    InputPeerUser { user_id: i64 },
    InputPeerChat { chat_id: i64 },
    InputPeerChannel { channel_id: i64 },
    InputPeerSelf,
    InputPeerEmpty,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "_")]
enum RawChat {
    Chat {
        id: i64,
        #[serde(default)]
        title: Option<String>,
    },
    ChatForbidden {
        id: i64,
    },
    Channel {
        id: i64,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        broadcast: bool,
        #[serde(default)]
        megagroup: bool,
    },
    ChannelForbidden {
        id: i64,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "_")]
enum RawUser {
    User {
        id: i64,
        #[serde(default)]
        first_name: Option<String>,
        #[serde(default)]
        last_name: Option<String>,
        #[serde(default)]
        username: Option<String>,
    },
    UserEmpty {
        id: i64,
    },
}

/// Read-only [`RemoteSource`] backed by a snapshot file.
#[derive(Debug)]
pub struct SnapshotSource {
    folders: Vec<Folder>,
    entities: HashMap<PeerRef, Lookup>,
}

impl SnapshotSource {
    /// Loads a snapshot from disk.
    ///
    /// # Errors
    /// Returns error if the file is missing, unreadable or malformed.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::io(format!("Failed to read snapshot: {}", path.display()), e)
        })?;

        tracing::debug!("Loading snapshot from: {}", path.display());
        Self::from_json(&content)
    }

    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or references `InputPeerSelf`
    /// without a `self_user_id`.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(content).map_err(AppError::json_parse)?;

        let mut folders = Vec::new();
        for filter in raw.filters {
            let folder = match filter {
                RawFilter::DialogFilter {
                    id,
                    title,
                    include_peers,
                    exclude_peers,
                } => Folder {
                    id,
                    title: title.into_text(),
                    included_peers: convert_peers(include_peers, raw.self_user_id)?,
                    excluded_peers: convert_peers(exclude_peers, raw.self_user_id)?,
                },
                RawFilter::DialogFilterChatlist {
                    id,
                    title,
                    include_peers,
                } => Folder {
                    id,
                    title: title.into_text(),
                    included_peers: convert_peers(include_peers, raw.self_user_id)?,
                    excluded_peers: Vec::new(),
                },
                RawFilter::DialogFilterDefault => continue,
            };
            folders.push(folder);
        }

        let mut entities = HashMap::with_capacity(raw.chats.len() + raw.users.len());
        for chat in raw.chats {
            let (peer, lookup) = chat_entry(chat);
            entities.insert(peer, lookup);
        }
        for user in raw.users {
            let (peer, lookup) = user_entry(user);
            entities.insert(peer, lookup);
        }

        tracing::debug!(
            "Snapshot has {} folders and {} entities",
            folders.len(),
            entities.len()
        );

        Ok(Self { folders, entities })
    }
}

impl RemoteSource for SnapshotSource {
    fn list_folders(&self) -> Result<Vec<Folder>> {
        Ok(self.folders.clone())
    }

    fn lookup(&self, peer: &PeerRef) -> Result<Lookup> {
        self.entities
            .get(peer)
            .cloned()
            .ok_or_else(|| AppError::PeerNotFound { peer: *peer })
    }
}

fn convert_peers(peers: Vec<RawInputPeer>, self_user_id: Option<i64>) -> Result<Vec<PeerRef>> {
    let mut out = Vec::with_capacity(peers.len());
    for peer in peers {
        let converted = match peer {
            RawInputPeer::InputPeerUser { user_id } => PeerRef::new(PeerKind::User, user_id),
            RawInputPeer::InputPeerChat { chat_id } => PeerRef::new(PeerKind::Chat, chat_id),
            RawInputPeer::InputPeerChannel { channel_id } => {
                PeerRef::new(PeerKind::Channel, channel_id)
            }
            RawInputPeer::InputPeerSelf => {
                let id = self_user_id.ok_or_else(|| AppError::InvalidData {
                    message: "InputPeerSelf used but snapshot has no self_user_id".into(),
                })?;
                PeerRef::new(PeerKind::User, id)
            }
            RawInputPeer::InputPeerEmpty => continue,
        };
        out.push(converted);
    }
    Ok(out)
}

fn chat_entry(chat: RawChat) -> (PeerRef, Lookup) {
    match chat {
        RawChat::Chat { id, title } => (
            PeerRef::new(PeerKind::Chat, id),
            Lookup::Found(RemoteEntity {
                id,
                title,
                ..Default::default()
            }),
        ),
        RawChat::ChatForbidden { id } => (PeerRef::new(PeerKind::Chat, id), Lookup::AccessDenied),
        RawChat::Channel {
            id,
            title,
            username,
            broadcast,
            megagroup,
        } => (
            PeerRef::new(PeerKind::Channel, id),
            Lookup::Found(RemoteEntity {
                id,
                broadcast,
                megagroup,
                title,
                username,
                ..Default::default()
            }),
        ),
        RawChat::ChannelForbidden { id } => {
            (PeerRef::new(PeerKind::Channel, id), Lookup::AccessDenied)
        }
    }
}

fn user_entry(user: RawUser) -> (PeerRef, Lookup) {
    match user {
        RawUser::User {
            id,
            first_name,
            last_name,
            username,
        } => (
            PeerRef::new(PeerKind::User, id),
            Lookup::Found(RemoteEntity {
                id,
                is_user: true,
                first_name,
                last_name,
                username,
                ..Default::default()
            }),
        ),
        RawUser::UserEmpty { id } => (PeerRef::new(PeerKind::User, id), Lookup::AccessDenied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "self_user_id": 1000,
        "filters": [
            {"_": "DialogFilterDefault"},
            {
                "_": "DialogFilter",
                "id": 2,
                "title": {"_": "TextWithEntities", "text": "Work", "entities": []},
                "contacts": false,
                "include_peers": [
                    {"_": "InputPeerChannel", "channel_id": 111, "access_hash": 42},
                    {"_": "InputPeerChat", "chat_id": 222},
                    {"_": "InputPeerSelf"},
                    {"_": "InputPeerEmpty"}
                ],
                "exclude_peers": [{"_": "InputPeerChat", "chat_id": 222}]
            },
            {
                "_": "DialogFilterChatlist",
                "id": 3,
                "title": "Shared",
                "include_peers": [{"_": "InputPeerUser", "user_id": 555, "access_hash": 7}]
            }
        ],
        "chats": [
            {"_": "Channel", "id": 111, "title": "Example Channel", "username": "ex_ch", "broadcast": true},
            {"_": "Chat", "id": 222, "title": "Team"},
            {"_": "ChannelForbidden", "id": 333, "title": "Gone"}
        ],
        "users": [
            {"_": "User", "id": 1000, "first_name": "Me"},
            {"_": "UserEmpty", "id": 555}
        ]
    }"#;

    #[test]
    fn test_folders_skip_default_and_keep_order() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        let folders = source.list_folders().unwrap();

        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].id, 2);
        assert_eq!(folders[0].title, "Work");
        assert_eq!(
            folders[0].included_peers,
            vec![
                PeerRef::new(PeerKind::Channel, 111),
                PeerRef::new(PeerKind::Chat, 222),
                PeerRef::new(PeerKind::User, 1000),
            ]
        );
        assert_eq!(
            folders[0].excluded_peers,
            vec![PeerRef::new(PeerKind::Chat, 222)]
        );
        assert_eq!(folders[1].title, "Shared");
        assert!(folders[1].excluded_peers.is_empty());
    }

    #[test]
    fn test_lookup() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();

        let channel = source.lookup(&PeerRef::new(PeerKind::Channel, 111)).unwrap();
        assert!(matches!(
            channel,
            Lookup::Found(RemoteEntity { broadcast: true, megagroup: false, .. })
        ));

        let forbidden = source.lookup(&PeerRef::new(PeerKind::Channel, 333)).unwrap();
        assert_eq!(forbidden, Lookup::AccessDenied);

        let empty_user = source.lookup(&PeerRef::new(PeerKind::User, 555)).unwrap();
        assert_eq!(empty_user, Lookup::AccessDenied);
    }

    #[test]
    fn test_missing_peer_is_fatal() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        let err = source
            .lookup(&PeerRef::new(PeerKind::Channel, 999))
            .unwrap_err();
        assert!(matches!(err, AppError::PeerNotFound { .. }));
    }

    #[test]
    fn test_self_peer_requires_self_id() {
        let json = r#"{"filters": [{"_": "DialogFilter", "id": 1, "title": "Me",
            "include_peers": [{"_": "InputPeerSelf"}]}]}"#;
        let err = SnapshotSource::from_json(json).unwrap_err();
        assert!(matches!(err, AppError::InvalidData { .. }));
    }

    #[test]
    fn test_malformed_snapshot() {
        let err = SnapshotSource::from_json("{\"filters\": 5}").unwrap_err();
        assert!(matches!(err, AppError::JsonParse { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SnapshotSource::open(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, AppError::SnapshotNotFound { .. }));
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let source = SnapshotSource::open(&path).unwrap();
        assert_eq!(source.list_folders().unwrap().len(), 2);
    }
}
