//! The signed-in user as seen by the dashboard.
//!
//! Signing in and out is handled elsewhere, the dashboard only asks a
//! [Session] whether somebody is currently signed in.

use std::sync::Mutex;

use serde::Deserialize;

use crate::{gateway::deserialize_id, lock};

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    /// The user's ID on the server.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    /// The user's display name.
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Tells the dashboard who, if anyone, is signed in.
pub trait Session: Send + Sync {
    fn current(&self) -> Option<User>;
}

/// A [Session] that holds the current user in memory.
#[derive(Debug, Default)]
pub struct FixedSession {
    user: Mutex<Option<User>>,
}

impl FixedSession {
    pub fn new(user: Option<User>) -> Self {
        Self {
            user: Mutex::new(user),
        }
    }

    /// Replace the current user, `None` signs the user out.
    pub fn set(&self, user: Option<User>) {
        *lock(&self.user) = user;
    }
}

impl Session for FixedSession {
    fn current(&self) -> Option<User> {
        lock(&self.user).clone()
    }
}
