//! Entity model: users, groups, messages and the addressing types.
//!
//! Equality is identity-based for [`User`] and [`Group`] (the name is
//! the natural key) and structural for [`Message`]. Constructors check
//! required fields and refuse to produce half-initialized entities.

mod contact;
mod group;
mod message;
mod user;

pub use contact::{Contact, Recipient};
pub use group::Group;
pub use message::Message;
pub use user::User;

use thiserror::Error;

/// Rejected entity construction: a required field was empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{entity} is missing required field: {field}")]
pub struct ValidationError {
    pub entity: &'static str,
    pub field: &'static str,
}
