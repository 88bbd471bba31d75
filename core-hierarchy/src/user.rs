//! Per-hierarchy user registry.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

/// Owner or modifier of a node. `email` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct User {
    pub display_name: String,
    pub email: String,
}

/// Deduplicates users by email so every node touched by the same person
/// shares one `Arc<User>`.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<String, Arc<User>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the user registered for `email`, creating it on first sight.
    ///
    /// The first display name seen for an email wins.
    pub fn intern(&mut self, email: &str, display_name: &str) -> Arc<User> {
        if let Some(user) = self.users.get(email) {
            return Arc::clone(user);
        }

        let user = Arc::new(User {
            display_name: display_name.to_string(),
            email: email.to_string(),
        });
        self.users.insert(email.to_string(), Arc::clone(&user));
        user
    }

    pub fn get(&self, email: &str) -> Option<&Arc<User>> {
        self.users.get(email)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedups_by_email() {
        let mut registry = UserRegistry::new();
        let first = registry.intern("alice@example.com", "Alice");
        let second = registry.intern("alice@example.com", "Alice Smith");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.display_name, "Alice");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_emails() {
        let mut registry = UserRegistry::new();
        registry.intern("alice@example.com", "Alice");
        registry.intern("bob@example.com", "Alice");

        assert_eq!(registry.len(), 2);
        assert!(registry.get("bob@example.com").is_some());
        assert!(registry.get("carol@example.com").is_none());
    }
}
