use chrono::{DateTime, Utc};

use super::{Contact, Recipient, User, ValidationError};

/// A single chat message.
///
/// Messages are immutable once created and compare structurally (sender,
/// target, body, timestamp); the warehouse uses that to detect exact
/// duplicates. Chronological order is by `timestamp` at the query site,
/// deliberately not an `Ord` impl: two distinct messages may share a
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who sent it: a user or the system pseudo-sender.
    pub sender: Contact,
    /// Exactly one user or one group.
    pub target: Recipient,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message, rejecting empty required fields.
    pub fn new(
        sender: Contact,
        target: Recipient,
        body: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let body = body.into();
        if sender.name().is_empty() {
            return Err(ValidationError {
                entity: "message",
                field: "sender",
            });
        }
        if target.name().is_empty() {
            return Err(ValidationError {
                entity: "message",
                field: "target",
            });
        }
        if body.is_empty() {
            return Err(ValidationError {
                entity: "message",
                field: "body",
            });
        }
        Ok(Self {
            sender,
            target,
            body,
            timestamp,
        })
    }

    /// True when this is a direct message between exactly `a` and `b`,
    /// in either direction.
    pub fn is_between(&self, a: &User, b: &User) -> bool {
        match (&self.sender, &self.target) {
            (Contact::User(from), Recipient::User(to)) => {
                (from == &a.name && to == &b.name) || (from == &b.name && to == &a.name)
            }
            _ => false,
        }
    }

    /// The group this message addresses, if it is a group message.
    pub fn target_group(&self) -> Option<&str> {
        match &self.target {
            Recipient::Group(name) => Some(name.as_str()),
            Recipient::User(_) => None,
        }
    }
}
