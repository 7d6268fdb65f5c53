//! Comment records as supplied by the external loader

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::login::Login;
use crate::error::{AnalysisError, Result};

/// Discussion kind a comment table belongs to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThreadKind {
    #[serde(rename = "issue")]
    Issue,
    #[serde(rename = "pullreq")]
    PullRequest,
    #[serde(rename = "commit")]
    Commit,
}

impl ThreadKind {
    pub const ALL: [ThreadKind; 3] = [ThreadKind::Issue, ThreadKind::PullRequest, ThreadKind::Commit];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadKind::Issue => "issue",
            ThreadKind::PullRequest => "pullreq",
            ThreadKind::Commit => "commit",
        }
    }

    /// Review and commit comments hang off a diff line; several independent
    /// conversations can share one thread id at different positions.
    pub fn is_diff_anchored(&self) -> bool {
        matches!(self, ThreadKind::PullRequest | ThreadKind::Commit)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ThreadKind::Issue => 0,
            ThreadKind::PullRequest => 1,
            ThreadKind::Commit => 2,
        }
    }
}

impl fmt::Display for ThreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of an input comment table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CommentRow {
    #[serde(deserialize_with = "string_or_number")]
    pub thread_id: String,
    pub author: String,
    #[serde(default)]
    pub body: String,
    pub comment_id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub position: Option<i64>,
}

impl CommentRow {
    pub fn new(
        thread_id: impl Into<String>,
        comment_id: u64,
        author: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            author: author.into(),
            body: body.into(),
            comment_id,
            created_at,
            position: None,
        }
    }

    pub fn at_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}

/// Thread ids arrive as integers (issues, pull requests) or strings (commit shas).
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
    })
}

/// A validated, immutable comment
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub thread_id: String,
    pub author: Login,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub position: Option<i64>,
}

impl Comment {
    /// Fails when the author field cannot be a login (empty or containing whitespace).
    pub fn from_row(row: &CommentRow) -> Result<Self> {
        let author = row.author.trim();
        if author.is_empty() || author.chars().any(char::is_whitespace) {
            return Err(AnalysisError::MalformedComment {
                thread_id: row.thread_id.clone(),
                comment_id: row.comment_id,
                reason: format!("author {:?} is not a login", row.author),
            });
        }

        Ok(Self {
            id: row.comment_id,
            thread_id: row.thread_id.clone(),
            author: Login::new(author),
            body: row.body.clone(),
            created_at: row.created_at,
            position: row.position,
        })
    }
}
