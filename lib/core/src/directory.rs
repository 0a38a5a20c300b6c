//! Account directory trait for the token gateway.
//!
//! The gateway does NOT depend on any specific storage module. It only
//! knows this trait. The concrete implementation (the user table) is
//! injected at startup time.

use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Role carried by an account and encoded into issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a stored role string. Unknown values are `None` — callers
    /// decide the fallback (the store treats them as `user`).
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// An account as the directory reports it: the login key, the stored
/// secret in whatever form the backing store holds it, and the role.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Pluggable account lookup. The gateway calls this once per login.
pub trait AccountDirectory: Send + Sync {
    /// Look up an account by username. `Ok(None)` means no such
    /// account; `Err` means the directory itself failed.
    fn find_account(&self, username: &str) -> Result<Option<Account>, ServiceError>;
}

/// A fixed in-memory directory. Used for testing.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    accounts: Vec<Account>,
}

impl StaticDirectory {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}

impl AccountDirectory for StaticDirectory {
    fn find_account(&self, username: &str) -> Result<Option<Account>, ServiceError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }
}
