//! References: directed "who addressed whom" events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::comment::ThreadKind;
use super::login::{Actor, Login};

/// How a reference was detected
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RefKind {
    Mention,
    Quote,
    ContextualReply,
}

impl RefKind {
    pub const ALL: [RefKind; 3] = [RefKind::Mention, RefKind::Quote, RefKind::ContextualReply];

    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::Mention => "Mention",
            RefKind::Quote => "Quote",
            RefKind::ContextualReply => "ContextualReply",
        }
    }

    /// Mentions and quotes are written by the commenter; contextual replies are inferred
    pub fn is_explicit(&self) -> bool {
        !matches!(self, RefKind::ContextualReply)
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a candidate was rejected
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// No addressee could be determined (e.g. a bare `@`)
    Unresolved,
    /// Addressed to the synthetic predecessor of the first comment
    ThreadOwner,
    /// Addressee and commenter are the same login
    SelfReference,
    /// Addressee authored nothing in the thread or the project
    NotParticipant,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::Unresolved => "unresolved addressee",
            InvalidReason::ThreadOwner => "addressee is the thread owner",
            InvalidReason::SelfReference => "addressee is the commenter",
            InvalidReason::NotParticipant => "addressee is not a participant",
        };
        f.write_str(text)
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid(InvalidReason),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// A detector's raw finding, before validation
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub kind: RefKind,
    pub commenter: Login,
    pub addressee: Option<Actor>,
    pub comment_id: u64,
    pub timestamp: DateTime<Utc>,
    /// Byte offset of the `@` or `>` marker in the body
    pub origin: Option<usize>,
}

/// A validated reference. Validity is fixed at construction.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Reference {
    commenter: Login,
    addressee: Option<Actor>,
    comment_id: u64,
    timestamp: DateTime<Utc>,
    thread_kind: ThreadKind,
    kind: RefKind,
    origin: Option<usize>,
    validity: Validity,
}

impl Reference {
    pub(crate) fn new(candidate: Candidate, thread_kind: ThreadKind, validity: Validity) -> Self {
        Self {
            commenter: candidate.commenter,
            addressee: candidate.addressee,
            comment_id: candidate.comment_id,
            timestamp: candidate.timestamp,
            thread_kind,
            kind: candidate.kind,
            origin: candidate.origin,
            validity,
        }
    }

    pub fn commenter(&self) -> Login {
        self.commenter
    }

    pub fn addressee(&self) -> Option<Actor> {
        self.addressee
    }

    /// The addressee's login, if it is a real user
    pub fn addressee_login(&self) -> Option<Login> {
        self.addressee.and_then(|a| a.login())
    }

    pub fn comment_id(&self) -> u64 {
        self.comment_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn thread_kind(&self) -> ThreadKind {
        self.thread_kind
    }

    pub fn kind(&self) -> RefKind {
        self.kind
    }

    pub fn origin(&self) -> Option<usize> {
        self.origin
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }
}
