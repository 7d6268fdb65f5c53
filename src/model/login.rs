//! Interned, case-folded author logins
//!
//! Handles repeat across every thread of a project, so each distinct login
//! is stored once in a process-wide `lasso` interner and passed around as a
//! `Copy` key. Logins are lower-cased on the way in: users do not type
//! mentions case-sensitively.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

fn interner() -> &'static ThreadedRodeo {
    INTERNER.get_or_init(ThreadedRodeo::default)
}

/// A lower-cased login
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Login(Spur);

impl Login {
    pub fn new(raw: &str) -> Self {
        if raw.chars().any(char::is_uppercase) {
            Login(interner().get_or_intern(raw.to_lowercase()))
        } else {
            Login(interner().get_or_intern(raw))
        }
    }

    /// The interner keeps strings alive forever, hence `'static`.
    pub fn as_str(&self) -> &'static str {
        interner().resolve(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<&str> for Login {
    fn from(raw: &str) -> Self {
        Login::new(raw)
    }
}

impl PartialOrd for Login {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Login {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Login({:?})", self.as_str())
    }
}

impl Serialize for Login {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Login {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Login::new(&raw))
    }
}

/// Either a real author or the synthetic predecessor of a thread's first comment
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Actor {
    /// Stands in as `previous_author` at position 0. Never a participant,
    /// never equal to any user.
    ThreadOwner,
    User(Login),
}

impl Actor {
    pub fn login(&self) -> Option<Login> {
        match self {
            Actor::User(login) => Some(*login),
            Actor::ThreadOwner => None,
        }
    }

    pub fn is_user(&self, login: Login) -> bool {
        matches!(self, Actor::User(l) if *l == login)
    }
}

impl From<Login> for Actor {
    fn from(login: Login) -> Self {
        Actor::User(login)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::ThreadOwner => f.write_str("<thread-owner>"),
            Actor::User(login) => f.write_str(login.as_str()),
        }
    }
}

impl Serialize for Actor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
