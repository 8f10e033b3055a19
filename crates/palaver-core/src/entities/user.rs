use std::hash::{Hash, Hasher};

use super::{Contact, ValidationError};

/// A registered account.
///
/// The name is the natural key: two users are the same user iff their
/// names match, and the warehouse guarantees no two records share one.
/// The password is an opaque credential the session layer compares
/// verbatim; it never participates in identity.
#[derive(Debug, Clone, Eq)]
pub struct User {
    /// Unique, case-sensitive account name.
    pub name: String,
    pub password: String,
}

impl User {
    /// Create a user, rejecting empty required fields.
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let password = password.into();
        if name.is_empty() {
            return Err(ValidationError {
                entity: "user",
                field: "name",
            });
        }
        if password.is_empty() {
            return Err(ValidationError {
                entity: "user",
                field: "password",
            });
        }
        Ok(Self { name, password })
    }

    /// The contact other parties address this user by.
    pub fn contact(&self) -> Contact {
        Contact::User(self.name.clone())
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_name_only() {
        let a = User::new("alice", "one").unwrap();
        let b = User::new("alice", "two").unwrap();
        let c = User::new("Alice", "one").unwrap();

        assert_eq!(a, b);
        // case-sensitive
        assert_ne!(a, c);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = User::new("", "secret").unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = User::new("alice", "").unwrap_err();
        assert_eq!(err.field, "password");
    }

    #[test]
    fn contact_is_a_user_contact() {
        let alice = User::new("alice", "secret").unwrap();
        assert_eq!(alice.contact(), Contact::User("alice".to_string()));
    }
}
