//! Diagnostic collectors
//!
//! Per-candidate detail for what detection filtered out. A `Diagnostics`
//! value is owned by one thread pass and merged by the caller, so passes
//! share no mutable state. Collection is switched per category in
//! [`crate::AnalysisConfig`]; counters in [`crate::Report`] are kept either way.

use serde::Serialize;
use std::fmt;

use crate::model::{Actor, InvalidReason, Login, RefKind, Reference, ThreadKind, Validity};

/// A reference that failed validation
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct InvalidReference {
    pub thread_kind: ThreadKind,
    pub thread_id: String,
    pub comment_id: u64,
    pub kind: RefKind,
    pub commenter: Login,
    pub addressee: Option<Actor>,
    pub reason: InvalidReason,
}

impl InvalidReference {
    /// `None` when the reference is valid
    pub fn from_reference(reference: &Reference, thread_id: &str) -> Option<Self> {
        match reference.validity() {
            Validity::Valid => None,
            Validity::Invalid(reason) => Some(Self {
                thread_kind: reference.thread_kind(),
                thread_id: thread_id.to_string(),
                comment_id: reference.comment_id(),
                kind: reference.kind(),
                commenter: reference.commenter(),
                addressee: reference.addressee(),
                reason,
            }),
        }
    }
}

/// A `>` quote whose text appears in no earlier comment of its thread
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UnsourcedQuote {
    pub thread_kind: ThreadKind,
    pub thread_id: String,
    pub comment_id: u64,
    pub commenter: Login,
    pub origin: usize,
    pub text: String,
}

/// A diff-anchored row that carried no diff position
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MissingPosition {
    pub thread_kind: ThreadKind,
    pub thread_id: String,
    pub comment_id: u64,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub invalid: Vec<InvalidReference>,
    pub unsourced: Vec<UnsourcedQuote>,
    pub missing_position: Vec<MissingPosition>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.invalid.extend(other.invalid);
        self.unsourced.extend(other.unsourced);
        self.missing_position.extend(other.missing_position);
    }

    pub fn is_empty(&self) -> bool {
        self.invalid.is_empty() && self.unsourced.is_empty() && self.missing_position.is_empty()
    }

    pub fn invalid_summary(&self) -> InvalidSummary {
        InvalidSummary::from(self.invalid.as_slice())
    }
}

/// Tally of collected invalid references by rejection reason
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct InvalidSummary {
    pub total: usize,
    pub self_reference: usize,
    pub thread_owner: usize,
    pub unresolved: usize,
    pub not_participant: usize,
    pub mentions: usize,
    pub quotes: usize,
    pub contextual_replies: usize,
}

impl From<&[InvalidReference]> for InvalidSummary {
    fn from(invalid: &[InvalidReference]) -> Self {
        let mut summary = InvalidSummary::default();
        for entry in invalid {
            summary.total += 1;
            match entry.reason {
                InvalidReason::SelfReference => summary.self_reference += 1,
                InvalidReason::ThreadOwner => summary.thread_owner += 1,
                InvalidReason::Unresolved => summary.unresolved += 1,
                InvalidReason::NotParticipant => summary.not_participant += 1,
            }
            match entry.kind {
                RefKind::Mention => summary.mentions += 1,
                RefKind::Quote => summary.quotes += 1,
                RefKind::ContextualReply => summary.contextual_replies += 1,
            }
        }
        summary
    }
}

impl fmt::Display for InvalidSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "invalid references:          {}", self.total)?;
        writeln!(f, "  addressee == commenter:    {}", self.self_reference)?;
        writeln!(f, "  addressee == thread owner: {}", self.thread_owner)?;
        writeln!(f, "  unresolved addressee:      {}", self.unresolved)?;
        writeln!(f, "  not a participant:         {}", self.not_participant)?;
        write!(
            f,
            "  by kind: mention {} / quote {} / contextual {}",
            self.mentions, self.quotes, self.contextual_replies
        )
    }
}
