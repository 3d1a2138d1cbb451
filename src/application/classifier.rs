//! Maps raw remote entities onto the export schema.

use crate::domain::{EntityKind, RemoteEntity, ResolvedEntity};

/// Determines the semantic kind of a remote entity from its flags.
///
/// Broadcast channels are channels; supergroups, basic groups and any channel
/// without the broadcast flag are groups.
#[must_use]
pub const fn classify(entity: &RemoteEntity) -> EntityKind {
    if entity.is_user {
        EntityKind::User
    } else if entity.broadcast && !entity.megagroup {
        EntityKind::Channel
    } else {
        EntityKind::Group
    }
}

/// Display name: the title for chats, "first last" for users.
#[must_use]
pub fn display_name(entity: &RemoteEntity) -> String {
    if entity.is_user {
        let first = entity.first_name.as_deref().unwrap_or_default();
        let last = entity.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    } else {
        entity.title.clone().unwrap_or_default()
    }
}

/// Converts a remote entity into its export record.
#[must_use]
pub fn to_resolved(entity: &RemoteEntity) -> ResolvedEntity {
    ResolvedEntity {
        kind: classify(entity),
        id: entity.id,
        username: entity.username.clone().filter(|u| !u.is_empty()),
        display_name: display_name(entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(broadcast: bool, megagroup: bool) -> RemoteEntity {
        RemoteEntity {
            id: 111,
            broadcast,
            megagroup,
            title: Some("Example Channel".into()),
            username: Some("ex_ch".into()),
            ..Default::default()
        }
    }

    fn user(first: Option<&str>, last: Option<&str>) -> RemoteEntity {
        RemoteEntity {
            id: 67890,
            is_user: true,
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&channel(true, false)), EntityKind::Channel);
        assert_eq!(classify(&channel(false, true)), EntityKind::Group);
        assert_eq!(classify(&channel(false, false)), EntityKind::Group);
        assert_eq!(classify(&RemoteEntity::default()), EntityKind::Group);
        assert_eq!(classify(&user(Some("John"), None)), EntityKind::User);
    }

    #[test]
    fn test_user_display_name() {
        assert_eq!(display_name(&user(Some("John"), Some("Doe"))), "John Doe");
        assert_eq!(display_name(&user(Some("John"), None)), "John");
        assert_eq!(display_name(&user(None, Some("Doe"))), "Doe");
        assert_eq!(display_name(&user(None, None)), "");
    }

    #[test]
    fn test_untitled_chat_has_empty_name() {
        let entity = RemoteEntity {
            id: 9,
            ..Default::default()
        };
        assert_eq!(display_name(&entity), "");
    }

    #[test]
    fn test_to_resolved() {
        let resolved = to_resolved(&channel(true, false));
        assert_eq!(
            resolved,
            ResolvedEntity {
                kind: EntityKind::Channel,
                id: 111,
                username: Some("ex_ch".into()),
                display_name: "Example Channel".into(),
            }
        );
    }

    #[test]
    fn test_empty_username_is_absent() {
        let mut entity = user(Some("Ann"), None);
        entity.username = Some(String::new());
        assert_eq!(to_resolved(&entity).username, None);
    }
}
