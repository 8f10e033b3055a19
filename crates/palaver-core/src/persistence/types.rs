//! On-disk record schema.
//!
//! Records are deliberately separate from the entity model so the two
//! can evolve independently. They carry plain fields with camelCase
//! names; conversions back into entities go through the validating
//! constructors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Contact, Group, Message, Recipient, User, ValidationError};

/// One persisted user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub password: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            password: user.password.clone(),
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = ValidationError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        User::new(record.name, record.password)
    }
}

/// One persisted group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl From<&Group> for GroupRecord {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            members: group.members.clone(),
        }
    }
}

impl TryFrom<GroupRecord> for Group {
    type Error = ValidationError;

    fn try_from(record: GroupRecord) -> Result<Self, Self::Error> {
        Group::with_members(record.name, record.members)
    }
}

/// The kind of party a [`ContactRecord`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    User,
    Group,
    System,
}

/// Who sent a persisted message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub kind: ContactKind,
    pub name: String,
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        let (kind, name) = match contact {
            Contact::User(name) => (ContactKind::User, name),
            Contact::Group(name) => (ContactKind::Group, name),
            Contact::System(name) => (ContactKind::System, name),
        };
        Self {
            kind,
            name: name.clone(),
        }
    }
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        match record.kind {
            ContactKind::User => Contact::User(record.name),
            ContactKind::Group => Contact::Group(record.name),
            ContactKind::System => Contact::System(record.name),
        }
    }
}

/// One persisted message.
///
/// The target is stored as a `toUser`/`toGroup` option pair; exactly one
/// must be set, anything else fails the decode of that resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub sender: ContactRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_group: Option<String>,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        let (to_user, to_group) = match &message.target {
            Recipient::User(name) => (Some(name.clone()), None),
            Recipient::Group(name) => (None, Some(name.clone())),
        };
        Self {
            sender: ContactRecord::from(&message.sender),
            to_user,
            to_group,
            body: message.body.clone(),
            timestamp: message.timestamp,
        }
    }
}

impl TryFrom<MessageRecord> for Message {
    type Error = ValidationError;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        let target = match (record.to_user, record.to_group) {
            (Some(name), None) => Recipient::User(name),
            (None, Some(name)) => Recipient::Group(name),
            // both or neither: the record does not address exactly one party
            _ => {
                return Err(ValidationError {
                    entity: "message",
                    field: "target",
                })
            }
        };
        Message::new(record.sender.into(), target, record.body, record.timestamp)
    }
}
