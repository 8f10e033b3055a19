//! The warehouse: the authoritative store of users, groups and messages.
//!
//! # Design
//!
//! One [`Warehouse`] instance owns the three collections behind a single
//! `RwLock` and is handed to the session and presentation layers; there
//! are no globals. Mutations take the write lock for the whole
//! check-then-insert sequence, so two concurrent sign-ups with the same
//! name cannot both succeed. Queries clone out of the read lock: callers
//! get snapshots, never references into shared state.
//!
//! Lookups are linear scans. The collections are small (one process
//! serves one chat community) and every query contract is defined in
//! terms of the primary collections, so there are no auxiliary indexes
//! to keep in sync.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::entities::{Group, Message, User};

/// Error type for warehouse mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WarehouseError {
    /// Sign-up with a name that is already taken.
    #[error("user already exists: {0}")]
    DuplicateUser(String),
}

/// Result of a group membership insert.
///
/// Membership changes never fail hard; absent groups and repeated
/// inserts are reported so the caller can log or ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    /// The user is now a member.
    Added,
    /// The user already was a member; nothing changed.
    AlreadyMember,
    /// No group with that name exists; nothing changed.
    UnknownGroup,
}

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    groups: Vec<Group>,
    messages: Vec<Message>,
}

/// The authoritative chat store.
pub struct Warehouse {
    inner: RwLock<Collections>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
        }
    }

    // A poisoned lock only means another thread panicked while holding
    // it; the collections are plain Vecs mutated by single statements,
    // so keep serving.
    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new user.
    ///
    /// Rejected with [`WarehouseError::DuplicateUser`] when the name is
    /// already taken; the collections are untouched in that case. The
    /// check and the insert run under one write lock.
    pub fn add_user(&self, user: User) -> Result<(), WarehouseError> {
        let mut inner = self.write();
        if inner.users.iter().any(|existing| *existing == user) {
            log::warn!("Rejecting sign-up, user already exists: {}", user.name);
            return Err(WarehouseError::DuplicateUser(user.name));
        }
        log::info!("Registered user {}", user.name);
        inner.users.push(user);
        Ok(())
    }

    /// Register a group.
    ///
    /// Duplicate names are accepted; group names are not unique the way
    /// user names are.
    pub fn add_group(&self, group: Group) {
        self.write().groups.push(group);
    }

    /// Append a message to history.
    ///
    /// The sole way history grows; messages are never deleted.
    pub fn add_message(&self, message: Message) {
        self.write().messages.push(message);
    }

    /// Insert `user` into the group named `group_name`.
    ///
    /// Idempotent, and a no-op when no such group exists; the outcome
    /// says which of the three cases applied.
    pub fn add_user_to_group(&self, user: &User, group_name: &str) -> MembershipOutcome {
        let mut inner = self.write();
        let group = match inner.groups.iter_mut().find(|g| g.name == group_name) {
            Some(group) => group,
            None => return MembershipOutcome::UnknownGroup,
        };
        if group.add_member(&user.name) {
            MembershipOutcome::Added
        } else {
            MembershipOutcome::AlreadyMember
        }
    }

    /// Look up a user by exact name.
    pub fn get_user(&self, name: &str) -> Option<User> {
        self.read().users.iter().find(|u| u.name == name).cloned()
    }

    pub fn does_user_exist(&self, user: &User) -> bool {
        self.read().users.iter().any(|u| u == user)
    }

    pub fn does_group_exist(&self, group: &Group) -> bool {
        self.read().groups.iter().any(|g| g == group)
    }

    pub fn does_message_exist(&self, message: &Message) -> bool {
        self.read().messages.iter().any(|m| m == message)
    }

    /// Groups the user is known to belong to, derived from message
    /// traffic: a group shows up once it has received at least one
    /// message while the user is among its members. First-seen order,
    /// one entry per group. An unknown user yields an empty vec.
    pub fn get_groups_of_user(&self, user: &User) -> Vec<Group> {
        let inner = self.read();
        let mut found: Vec<Group> = Vec::new();
        for message in &inner.messages {
            let group_name = match message.target_group() {
                Some(name) => name,
                None => continue,
            };
            if found.iter().any(|g| g.name == group_name) {
                continue;
            }
            if let Some(group) = inner.groups.iter().find(|g| g.name == group_name) {
                if group.has_member(&user.name) {
                    found.push(group.clone());
                }
            }
        }
        found
    }

    /// Direct messages exchanged between exactly `a` and `b`, in either
    /// direction, oldest first.
    pub fn get_chat_messages_sorted(&self, a: &User, b: &User) -> Vec<Message> {
        let mut chat: Vec<Message> = self
            .read()
            .messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect();
        chat.sort_by_key(|m| m.timestamp);
        chat
    }

    /// Messages addressed to the group, in insertion order. Ordering is
    /// left to callers.
    pub fn get_group_messages(&self, group: &Group) -> Vec<Message> {
        self.read()
            .messages
            .iter()
            .filter(|m| m.target_group() == Some(group.name.as_str()))
            .cloned()
            .collect()
    }

    /// Snapshot of all users.
    pub fn users(&self) -> Vec<User> {
        self.read().users.clone()
    }

    /// Snapshot of all groups.
    pub fn groups(&self) -> Vec<Group> {
        self.read().groups.clone()
    }

    /// Snapshot of all messages.
    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    /// Replace the user collection wholesale (persistence load).
    pub fn replace_users(&self, users: Vec<User>) {
        self.write().users = users;
    }

    /// Replace the group collection wholesale (persistence load).
    pub fn replace_groups(&self, groups: Vec<Group>) {
        self.write().groups = groups;
    }

    /// Replace the message collection wholesale (persistence load).
    pub fn replace_messages(&self, messages: Vec<Message>) {
        self.write().messages = messages;
    }
}

impl Default for Warehouse {
    fn default() -> Self {
        Self::new()
    }
}
