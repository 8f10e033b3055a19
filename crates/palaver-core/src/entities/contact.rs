//! Chat addressing types.

/// An addressable chat party: a user, a group, or the system itself.
///
/// Contacts are how the rest of the platform says "who sent this" and
/// "which conversation does this belong to". The `System` variant is
/// reserved for server-generated notices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Contact {
    User(String),
    Group(String),
    System(String),
}

impl Contact {
    /// The display name of this contact.
    pub fn name(&self) -> &str {
        match self {
            Contact::User(name) | Contact::Group(name) | Contact::System(name) => name,
        }
    }
}

/// The target of a message: exactly one user or exactly one group.
///
/// Modeled as an enum so a message can never address both, or neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    User(String),
    Group(String),
}

impl Recipient {
    pub fn name(&self) -> &str {
        match self {
            Recipient::User(name) | Recipient::Group(name) => name,
        }
    }

    /// The contact this recipient shows up as in conversation views.
    pub fn to_contact(&self) -> Contact {
        match self {
            Recipient::User(name) => Contact::User(name.clone()),
            Recipient::Group(name) => Contact::Group(name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_name_covers_all_variants() {
        assert_eq!(Contact::User("alice".to_string()).name(), "alice");
        assert_eq!(Contact::Group("team".to_string()).name(), "team");
        assert_eq!(Contact::System("server".to_string()).name(), "server");
    }

    #[test]
    fn recipient_maps_to_matching_contact() {
        let user = Recipient::User("bob".to_string());
        assert_eq!(user.to_contact(), Contact::User("bob".to_string()));

        let group = Recipient::Group("team".to_string());
        assert_eq!(group.to_contact(), Contact::Group("team".to_string()));
    }

    #[test]
    fn user_and_group_contacts_with_same_name_differ() {
        let user = Contact::User("team".to_string());
        let group = Contact::Group("team".to_string());
        assert_ne!(user, group);
    }
}
