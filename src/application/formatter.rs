//! Output formatting for exported folders.
//!
//! Supports two output formats: JSON and a human-readable text report.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::domain::{EntityKind, ExportStats, FolderExportRecord, ResolvedEntity};

const BANNER: &str = "TELEGRAM FOLDERS EXPORT";
const RULE: &str = "=======================";

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON array of folder records.
    Json,
    /// Text report grouped by entity kind.
    Text,
}

/// Formats folder records as pretty-printed JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_folders_json(records: &[FolderExportRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Formats folder records as a text report with a totals footer.
pub fn format_folders_text(records: &[FolderExportRecord], generated_at: DateTime<Utc>) -> String {
    let mut out = format!("{BANNER}\n{RULE}\n\n");
    let mut totals = [0usize; 3];

    for record in records {
        let header = format!("Folder: {}", record.title);
        let _ = writeln!(out, "{header}\n{}", "-".repeat(header.chars().count()));

        for (slot, (kind, heading)) in SECTIONS.iter().enumerate() {
            let peers: Vec<&ResolvedEntity> = record.peers_of(*kind).collect();
            totals[slot] += peers.len();
            if peers.is_empty() {
                continue;
            }

            let _ = writeln!(out, "{heading} ({}):", peers.len());
            for peer in peers {
                let _ = writeln!(out, "  {}", format_peer_line(peer));
            }
            out.push('\n');
        }

        if record.peers.is_empty() {
            out.push_str("No items\n\n");
        }
    }

    let [channels, groups, users] = totals;
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Total: {} folders, {channels} channels, {groups} groups, {users} users",
        records.len()
    );
    let _ = write!(
        out,
        "Generated: {} UTC",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    out
}

/// Section order in the text report.
const SECTIONS: [(EntityKind, &str); 3] = [
    (EntityKind::Channel, "Channels"),
    (EntityKind::Group, "Groups"),
    (EntityKind::User, "Users"),
];

/// Formats one peer as `• name (@username) [ID: id]`.
fn format_peer_line(peer: &ResolvedEntity) -> String {
    let name = if peer.display_name.is_empty() {
        match peer.kind {
            EntityKind::Channel => "Unnamed Channel",
            EntityKind::Group => "Unnamed Group",
            EntityKind::User => "Unnamed User",
        }
    } else {
        peer.display_name.as_str()
    };

    match peer.username.as_deref() {
        Some(username) => format!("• {name} (@{username}) [ID: {}]", peer.id),
        None => format!("• {name} [ID: {}]", peer.id),
    }
}

/// Formats run statistics for the console.
pub fn format_stats(stats: &ExportStats) -> String {
    format!(
        "{}\n  Folders: {}\n  Peers exported: {}\n  Excluded by folder rules: {}\n  Inaccessible: {}",
        "📊 Statistics".bold(),
        stats.folder_count.to_string().cyan(),
        stats.exported_peers.to_string().green(),
        stats.excluded_peers.to_string().blue(),
        stats.inaccessible_peers.to_string().yellow()
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entity(kind: EntityKind, id: i64, username: Option<&str>, name: &str) -> ResolvedEntity {
        ResolvedEntity {
            kind,
            id,
            username: username.map(String::from),
            display_name: name.into(),
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    #[test]
    fn test_format_peer_line() {
        let with_username = entity(EntityKind::Channel, 12345, Some("testchannel"), "Test Channel");
        assert_eq!(
            format_peer_line(&with_username),
            "• Test Channel (@testchannel) [ID: 12345]"
        );

        let without = entity(EntityKind::Group, 67890, None, "Test Group");
        assert_eq!(format_peer_line(&without), "• Test Group [ID: 67890]");

        let unnamed = entity(EntityKind::User, 1, None, "");
        assert_eq!(format_peer_line(&unnamed), "• Unnamed User [ID: 1]");
    }

    #[test]
    fn test_text_report_single_folder() {
        let records = vec![FolderExportRecord {
            id: 1,
            title: "Work".into(),
            peers: vec![
                entity(EntityKind::Group, 67890, None, "Test Group"),
                entity(EntityKind::Channel, 12345, Some("testchannel"), "Test Channel"),
            ],
        }];

        let report = format_folders_text(&records, generated_at());

        let expected = "\
TELEGRAM FOLDERS EXPORT
=======================

Folder: Work
------------
Channels (1):
  • Test Channel (@testchannel) [ID: 12345]

Groups (1):
  • Test Group [ID: 67890]

=======================
Total: 1 folders, 1 channels, 1 groups, 0 users
Generated: 2024-05-06 07:08:09 UTC";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_text_report_totals_across_folders() {
        let records = vec![
            FolderExportRecord {
                id: 1,
                title: "News".into(),
                peers: vec![
                    entity(EntityKind::Channel, 1, Some("a"), "A"),
                    entity(EntityKind::Channel, 2, None, "B"),
                    entity(EntityKind::User, 3, None, "Ann"),
                ],
            },
            FolderExportRecord {
                id: 2,
                title: "Friends".into(),
                peers: vec![
                    entity(EntityKind::User, 3, None, "Ann"),
                    entity(EntityKind::Group, 4, None, "Club"),
                    entity(EntityKind::Channel, 1, Some("a"), "A"),
                ],
            },
            FolderExportRecord {
                id: 3,
                title: "Empty".into(),
                peers: vec![],
            },
        ];

        let report = format_folders_text(&records, generated_at());

        assert!(report.contains("Total: 3 folders, 3 channels, 1 groups, 2 users"));
        assert!(report.contains("Folder: Empty\n-------------\nNo items\n"));
        // Users come after channels inside a folder.
        let friends = report.find("Folder: Friends").unwrap();
        let channels = report[friends..].find("Channels (1):").unwrap();
        let users = report[friends..].find("Users (1):").unwrap();
        assert!(channels < users);
    }

    #[test]
    fn test_json_round_trip() {
        let records = vec![FolderExportRecord {
            id: 1,
            title: "Международный".into(),
            peers: vec![
                entity(EntityKind::Channel, 111, Some("ex_ch"), "Example Channel"),
                entity(EntityKind::Group, 222, None, "Team"),
            ],
        }];

        let json = format_folders_json(&records).unwrap();
        assert!(json.contains("Международный"));
        assert!(json.contains("\"username\": null"));
        assert!(json.contains("\n  {"));

        let parsed: Vec<FolderExportRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_json_peer_field_order() {
        let records = vec![FolderExportRecord {
            id: 1,
            title: "Work".into(),
            peers: vec![entity(EntityKind::User, 5, Some("ann"), "Ann")],
        }];

        let json = format_folders_json(&records).unwrap();
        let type_at = json.find("\"type\"").unwrap();
        let id_at = json.rfind("\"id\"").unwrap();
        let username_at = json.find("\"username\"").unwrap();
        let name_at = json.find("\"name\"").unwrap();
        assert!(type_at < id_at && id_at < username_at && username_at < name_at);
    }
}
