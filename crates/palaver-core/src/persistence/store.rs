//! Save/load of the three warehouse resources.
//!
//! # Files
//!
//! - `users.json` - registered accounts
//! - `groups.json` - groups and member lists
//! - `messages.json` - full message history
//!
//! # Design
//!
//! The three resources are independent: a failure while saving or
//! loading one is logged and the others still go through. Saves are
//! atomic (write `<name>.json.tmp`, then rename). A missing file on load
//! simply leaves that collection empty. In-memory state stays usable
//! whatever the disk does.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{GroupRecord, MessageRecord, UserRecord};
use crate::entities::{Group, Message, User, ValidationError};
use crate::warehouse::Warehouse;

/// Error type for persistence operations.
#[derive(Debug)]
pub enum StorageError {
    /// IO error (file not found, permission denied, etc.)
    Io(std::io::Error),
    /// JSON serialization/deserialization error
    Json(serde_json::Error),
    /// A decoded record failed entity validation
    Invalid(ValidationError),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {e}"),
            StorageError::Json(e) => write!(f, "JSON error: {e}"),
            StorageError::Invalid(e) => write!(f, "Invalid record: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

impl From<ValidationError> for StorageError {
    fn from(e: ValidationError) -> Self {
        StorageError::Invalid(e)
    }
}

/// Write one resource atomically.
fn save_resource<T: Serialize>(dir: &Path, name: &str, records: &[T]) -> Result<(), StorageError> {
    fs::create_dir_all(dir)?;

    let file_path = dir.join(format!("{name}.json"));
    let temp_path = dir.join(format!("{name}.json.tmp"));

    log::debug!("Saving {}", file_path.display());
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, &file_path)?;

    Ok(())
}

/// Read one resource. `Ok(None)` when the file does not exist.
fn load_resource<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<Vec<T>>, StorageError> {
    let file_path = dir.join(format!("{name}.json"));

    if !file_path.exists() {
        return Ok(None);
    }

    log::debug!("Loading {}", file_path.display());
    let contents = fs::read_to_string(&file_path)?;
    let records: Vec<T> = serde_json::from_str(&contents)?;

    Ok(Some(records))
}

/// Save all three collections under `dir`, overwriting previous files.
///
/// Each resource is written on its own; a failure is logged and the
/// remaining resources are still saved.
pub fn save(dir: &Path, warehouse: &Warehouse) {
    let users: Vec<UserRecord> = warehouse.users().iter().map(UserRecord::from).collect();
    if let Err(e) = save_resource(dir, "users", &users) {
        log::warn!("Failed to save users: {}", e);
    }

    let groups: Vec<GroupRecord> = warehouse.groups().iter().map(GroupRecord::from).collect();
    if let Err(e) = save_resource(dir, "groups", &groups) {
        log::warn!("Failed to save groups: {}", e);
    }

    let messages: Vec<MessageRecord> =
        warehouse.messages().iter().map(MessageRecord::from).collect();
    if let Err(e) = save_resource(dir, "messages", &messages) {
        log::warn!("Failed to save messages: {}", e);
    }
}

/// Load all three collections from `dir` into a fresh warehouse.
///
/// Invoked once at process start. Missing files leave the corresponding
/// collection empty. A decode or validation failure in one resource is
/// logged and only that collection stays empty; the others load
/// normally.
pub fn load(dir: &Path) -> Warehouse {
    let warehouse = Warehouse::new();

    match load_users(dir) {
        Ok(Some(users)) => warehouse.replace_users(users),
        Ok(None) => {}
        Err(e) => log::warn!("Failed to load users: {}", e),
    }

    match load_groups(dir) {
        Ok(Some(groups)) => warehouse.replace_groups(groups),
        Ok(None) => {}
        Err(e) => log::warn!("Failed to load groups: {}", e),
    }

    match load_messages(dir) {
        Ok(Some(messages)) => warehouse.replace_messages(messages),
        Ok(None) => {}
        Err(e) => log::warn!("Failed to load messages: {}", e),
    }

    warehouse
}

fn load_users(dir: &Path) -> Result<Option<Vec<User>>, StorageError> {
    match load_resource::<UserRecord>(dir, "users")? {
        Some(records) => {
            let users = records
                .into_iter()
                .map(User::try_from)
                .collect::<Result<Vec<_>, ValidationError>>()?;
            Ok(Some(users))
        }
        None => Ok(None),
    }
}

fn load_groups(dir: &Path) -> Result<Option<Vec<Group>>, StorageError> {
    match load_resource::<GroupRecord>(dir, "groups")? {
        Some(records) => {
            let groups = records
                .into_iter()
                .map(Group::try_from)
                .collect::<Result<Vec<_>, ValidationError>>()?;
            Ok(Some(groups))
        }
        None => Ok(None),
    }
}

fn load_messages(dir: &Path) -> Result<Option<Vec<Message>>, StorageError> {
    match load_resource::<MessageRecord>(dir, "messages")? {
        Some(records) => {
            let messages = records
                .into_iter()
                .map(Message::try_from)
                .collect::<Result<Vec<_>, ValidationError>>()?;
            Ok(Some(messages))
        }
        None => Ok(None),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::tempdir;

    use super::*;
    use crate::entities::{Contact, Recipient};

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn populated() -> Warehouse {
        let warehouse = Warehouse::new();
        let alice = User::new("alice", "secret").unwrap();
        warehouse.add_user(alice.clone()).unwrap();
        warehouse.add_user(User::new("bob", "hunter2").unwrap()).unwrap();

        warehouse.add_group(Group::new("team").unwrap());
        warehouse.add_user_to_group(&alice, "team");

        warehouse.add_message(
            Message::new(
                Contact::User("alice".to_string()),
                Recipient::User("bob".to_string()),
                "hi",
                at(100),
            )
            .unwrap(),
        );
        warehouse.add_message(
            Message::new(
                Contact::User("alice".to_string()),
                Recipient::Group("team".to_string()),
                "hi team",
                at(200),
            )
            .unwrap(),
        );
        warehouse
    }

    #[test]
    fn save_then_load_reproduces_the_collections() {
        let dir = tempdir().unwrap();
        let original = populated();

        save(dir.path(), &original);
        let loaded = load(dir.path());

        assert_eq!(loaded.users(), original.users());
        assert_eq!(loaded.groups(), original.groups());
        assert_eq!(loaded.messages(), original.messages());
        // user equality ignores the credential, so check it survived too
        assert_eq!(loaded.get_user("bob").unwrap().password, "hunter2");
        assert_eq!(loaded.groups()[0].members, vec!["alice".to_string()]);
    }

    #[test]
    fn load_from_empty_dir_yields_empty_warehouse() {
        let dir = tempdir().unwrap();
        let loaded = load(dir.path());

        assert!(loaded.users().is_empty());
        assert!(loaded.groups().is_empty());
        assert!(loaded.messages().is_empty());
    }

    #[test]
    fn missing_resource_leaves_only_that_collection_empty() {
        let dir = tempdir().unwrap();
        save(dir.path(), &populated());
        fs::remove_file(dir.path().join("groups.json")).unwrap();

        let loaded = load(dir.path());

        assert_eq!(loaded.users().len(), 2);
        assert_eq!(loaded.messages().len(), 2);
        assert!(loaded.groups().is_empty());
    }

    #[test]
    fn corrupted_resource_is_isolated() {
        let dir = tempdir().unwrap();
        save(dir.path(), &populated());
        fs::write(dir.path().join("groups.json"), "not json at all").unwrap();

        let loaded = load(dir.path());

        assert_eq!(loaded.users().len(), 2);
        assert_eq!(loaded.messages().len(), 2);
        assert!(loaded.groups().is_empty());
    }

    #[test]
    fn invalid_record_fails_its_resource_only() {
        let dir = tempdir().unwrap();
        save(dir.path(), &populated());
        // name is required to be non-empty; the users resource must not load
        fs::write(
            dir.path().join("users.json"),
            r#"[{"name": "", "password": "secret"}]"#,
        )
        .unwrap();

        let loaded = load(dir.path());

        assert!(loaded.users().is_empty());
        assert_eq!(loaded.groups().len(), 1);
        assert_eq!(loaded.messages().len(), 2);
    }

    #[test]
    fn message_record_violating_target_rule_fails_the_resource() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("messages.json"),
            r#"[{
                "sender": {"kind": "user", "name": "alice"},
                "toUser": "bob",
                "toGroup": "team",
                "body": "hi",
                "timestamp": "2026-01-01T00:00:00Z"
            }]"#,
        )
        .unwrap();

        let loaded = load(dir.path());
        assert!(loaded.messages().is_empty());
    }

    #[test]
    fn save_overwrites_previous_state() {
        let dir = tempdir().unwrap();
        let warehouse = populated();
        save(dir.path(), &warehouse);

        warehouse.add_user(User::new("carol", "pw").unwrap()).unwrap();
        save(dir.path(), &warehouse);

        let loaded = load(dir.path());
        assert_eq!(loaded.users().len(), 3);
    }

    #[test]
    fn atomic_save_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        save(dir.path(), &populated());

        for name in ["users", "groups", "messages"] {
            assert!(dir.path().join(format!("{name}.json")).exists());
            assert!(!dir.path().join(format!("{name}.json.tmp")).exists());
        }
    }

    #[test]
    fn save_creates_the_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("state");

        save(&nested, &populated());

        assert!(nested.join("users.json").exists());
    }
}
