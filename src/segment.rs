//! ThreadSegmenter: comment tables → ordered threads
//!
//! Rows are grouped by thread id in order of first appearance. Diff-anchored
//! kinds are further split by diff position, since one pull request or
//! commit can carry independent conversations on different lines. A row of a
//! diff-anchored kind without a position joins its thread's position-less
//! group and is reported.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::diagnostics::MissingPosition;
use crate::error::Result;
use crate::model::{Comment, CommentRow, Thread, ThreadKey, ThreadKind};

/// All comments of one kind for one owner/repository
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CommentTable {
    pub kind: ThreadKind,
    #[serde(default)]
    pub rows: Vec<CommentRow>,
}

impl CommentTable {
    pub fn new(kind: ThreadKind, rows: Vec<CommentRow>) -> Self {
        Self { kind, rows }
    }

    /// Stand-in for a kind the loader found no data for
    pub fn empty(kind: ThreadKind) -> Self {
        Self { kind, rows: Vec::new() }
    }
}

#[derive(Debug, Default)]
pub struct Segmented {
    pub threads: Vec<Thread>,
    pub missing_position: Vec<MissingPosition>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSegmenter;

impl ThreadSegmenter {
    pub fn new() -> Self {
        ThreadSegmenter
    }

    pub fn segment(&self, table: &CommentTable) -> Result<Segmented> {
        let kind = table.kind;
        let mut order: Vec<ThreadKey> = Vec::new();
        let mut groups: HashMap<ThreadKey, Vec<Comment>> = HashMap::new();
        let mut missing_position = Vec::new();

        for row in &table.rows {
            let comment = Comment::from_row(row)?;
            if kind.is_diff_anchored() && comment.position.is_none() {
                missing_position.push(MissingPosition {
                    thread_kind: kind,
                    thread_id: comment.thread_id.clone(),
                    comment_id: comment.id,
                });
            }

            let key = ThreadKey {
                thread_id: comment.thread_id.clone(),
                position: if kind.is_diff_anchored() { comment.position } else { None },
            };
            groups
                .entry(key)
                .or_insert_with_key(|key| {
                    order.push(key.clone());
                    Vec::new()
                })
                .push(comment);
        }

        let mut threads = Vec::with_capacity(order.len());
        for key in order {
            if let Some(comments) = groups.remove(&key) {
                threads.push(Thread::new(kind, comments)?);
            }
        }

        if !missing_position.is_empty() {
            warn!(kind = %kind, rows = missing_position.len(), "diff-anchored rows without position");
        }
        debug!(kind = %kind, rows = table.rows.len(), threads = threads.len(), "segmented comment table");

        Ok(Segmented { threads, missing_position })
    }

    /// Build one thread from a group the caller already segmented.
    ///
    /// Fails with `MalformedThread` when the rows do not share one thread id
    /// (and, for diff-anchored kinds, one position).
    pub fn group(&self, kind: ThreadKind, rows: &[CommentRow]) -> Result<Thread> {
        let comments = rows.iter().map(Comment::from_row).collect::<Result<Vec<_>>>()?;
        Ok(Thread::new(kind, comments)?)
    }
}
