//! Authors whose messages the bot ignores

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    users: HashSet<String>,
}

impl Blocklist {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, user: &str) -> bool {
        self.users.contains(user)
    }

    /// Returns `false` when the user was already blocked.
    pub fn block(&mut self, user: &str) -> bool {
        self.users.insert(user.to_string())
    }

    /// Returns `false` when the user was not blocked.
    pub fn unblock(&mut self, user: &str) -> bool {
        self.users.remove(user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
