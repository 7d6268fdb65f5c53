//! Threads: ordered comment sequences sharing one discussion id

use serde::Serialize;
use std::collections::HashSet;

use super::comment::{Comment, ThreadKind};
use super::login::Login;
use crate::error::MalformedThreadError;

/// Distinct lower-cased authors, per thread or per project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantSet {
    logins: HashSet<Login>,
}

impl ParticipantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, login: Login) -> bool {
        self.logins.insert(login)
    }

    pub fn contains(&self, login: Login) -> bool {
        self.logins.contains(&login)
    }

    pub fn len(&self) -> usize {
        self.logins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }

    pub fn union_with(&mut self, other: &ParticipantSet) {
        self.logins.extend(other.logins.iter().copied());
    }

    /// Logins in lexical order
    pub fn sorted(&self) -> Vec<Login> {
        let mut logins: Vec<Login> = self.logins.iter().copied().collect();
        logins.sort();
        logins
    }
}

impl FromIterator<Login> for ParticipantSet {
    fn from_iter<I: IntoIterator<Item = Login>>(iter: I) -> Self {
        Self {
            logins: iter.into_iter().collect(),
        }
    }
}

impl Extend<Login> for ParticipantSet {
    fn extend<I: IntoIterator<Item = Login>>(&mut self, iter: I) {
        self.logins.extend(iter);
    }
}

impl Serialize for ParticipantSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

/// Identifies one conversation: thread id, plus diff position for diff-anchored kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ThreadKey {
    pub thread_id: String,
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Thread {
    kind: ThreadKind,
    key: ThreadKey,
    comments: Vec<Comment>,
    #[serde(skip)]
    participants: ParticipantSet,
}

impl Thread {
    /// Build a thread from one segmented group.
    ///
    /// Comments are ordered by ascending id with a stable sort, so equal ids
    /// keep their input order. Every comment must carry the same thread id,
    /// and for diff-anchored kinds the same position.
    pub fn new(kind: ThreadKind, mut comments: Vec<Comment>) -> Result<Self, MalformedThreadError> {
        let first = comments.first().ok_or(MalformedThreadError::Empty)?;
        let key = ThreadKey {
            thread_id: first.thread_id.clone(),
            position: if kind.is_diff_anchored() { first.position } else { None },
        };

        for comment in &comments {
            if comment.thread_id != key.thread_id {
                return Err(MalformedThreadError::MixedThreadIds {
                    expected: key.thread_id.clone(),
                    found: comment.thread_id.clone(),
                    comment_id: comment.id,
                });
            }
            if kind.is_diff_anchored() && comment.position != key.position {
                return Err(MalformedThreadError::MixedPositions {
                    thread_id: key.thread_id.clone(),
                    expected: key.position,
                    found: comment.position,
                    comment_id: comment.id,
                });
            }
        }

        comments.sort_by_key(|c| c.id);
        let participants = comments.iter().map(|c| c.author).collect();

        Ok(Self {
            kind,
            key,
            comments,
            participants,
        })
    }

    pub fn kind(&self) -> ThreadKind {
        self.kind
    }

    pub fn key(&self) -> &ThreadKey {
        &self.key
    }

    pub fn thread_id(&self) -> &str {
        &self.key.thread_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Always false: construction rejects empty groups
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn participants(&self) -> &ParticipantSet {
        &self.participants
    }

    pub fn is_participant(&self, login: Login) -> bool {
        self.participants.contains(login)
    }
}
