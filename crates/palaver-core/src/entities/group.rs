use std::hash::{Hash, Hasher};

use super::{Contact, ValidationError};

/// A named group of users.
///
/// Identity is the group name. Unlike user names, group names are not
/// unique: the warehouse accepts several groups with the same name, and
/// they all compare equal. Membership is a set with stable join order.
#[derive(Debug, Clone, Eq)]
pub struct Group {
    /// Identifier and display short-name.
    pub name: String,
    /// Member user names, in join order, duplicate-free.
    pub members: Vec<String>,
}

impl Group {
    /// Create an empty group, rejecting an empty name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError {
                entity: "group",
                field: "name",
            });
        }
        Ok(Self {
            name,
            members: Vec::new(),
        })
    }

    /// Rebuild a group with an existing member list.
    ///
    /// Duplicates in the list collapse; join order is kept otherwise.
    pub fn with_members(
        name: impl Into<String>,
        members: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let mut group = Self::new(name)?;
        for member in &members {
            group.add_member(member);
        }
        Ok(group)
    }

    /// Idempotent membership insert; true when the user was newly added.
    pub fn add_member(&mut self, name: &str) -> bool {
        if self.has_member(name) {
            return false;
        }
        self.members.push(name.to_string());
        true
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }

    /// The contact messages address this group by.
    pub fn contact(&self) -> Contact {
        Contact::Group(self.name.clone())
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
