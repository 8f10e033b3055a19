//! Derived, read-only views over the warehouse.
//!
//! Presentation layers render their conversation lists from these
//! projections. Everything here is recomputed on demand from warehouse
//! snapshots; nothing is cached or persisted.

use std::collections::HashMap;

use crate::entities::{Contact, Message, Recipient, User};
use crate::warehouse::Warehouse;

/// All conversations `user` participates in, keyed by the other party.
///
/// Direct traffic is keyed by the peer (or the system sender); group
/// traffic is keyed by the group contact, for every group the user
/// belongs to or has posted to. Within a thread, messages keep history
/// order.
pub fn contact_threads(warehouse: &Warehouse, user: &User) -> HashMap<Contact, Vec<Message>> {
    let groups = warehouse.get_groups_of_user(user);
    let me = user.contact();

    let mut threads: HashMap<Contact, Vec<Message>> = HashMap::new();
    for message in warehouse.messages() {
        let key = match &message.target {
            Recipient::User(to) => {
                if *to == user.name {
                    Some(message.sender.clone())
                } else if message.sender == me {
                    Some(Contact::User(to.clone()))
                } else {
                    None
                }
            }
            Recipient::Group(name) => {
                let involved =
                    message.sender == me || groups.iter().any(|group| group.name == *name);
                if involved {
                    Some(Contact::Group(name.clone()))
                } else {
                    None
                }
            }
        };
        if let Some(key) = key {
            threads.entry(key).or_default().push(message);
        }
    }
    threads
}

/// The latest message per contact: the row data for a contact list.
pub fn latest_messages(warehouse: &Warehouse, user: &User) -> HashMap<Contact, Message> {
    contact_threads(warehouse, user)
        .into_iter()
        .filter_map(|(contact, thread)| {
            thread
                .into_iter()
                .max_by_key(|m| m.timestamp)
                .map(|latest| (contact, latest))
        })
        .collect()
}

/// The latest message exchanged with one specific contact.
pub fn latest_message_with(
    warehouse: &Warehouse,
    user: &User,
    contact: &Contact,
) -> Option<Message> {
    contact_threads(warehouse, user)
        .remove(contact)
        .and_then(|thread| thread.into_iter().max_by_key(|m| m.timestamp))
}
