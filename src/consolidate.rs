//! ReferenceConsolidator: per-thread and project-wide reference lists
//!
//! Within a thread the order is mentions, then quotes, then contextual
//! replies, without cross-kind deduplication. Across threads the thread
//! order is kept. Weighted mode folds events into one edge per
//! (commenter, addressee, kind).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Login, RefKind, Reference, ThreadKind};

/// One output row in raw mode
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReferenceRecord {
    pub commenter: Login,
    pub addressee: Login,
    pub comment_id: u64,
    pub ref_type: RefKind,
    pub timestamp: DateTime<Utc>,
    pub thread_type: ThreadKind,
}

impl ReferenceRecord {
    /// `None` unless the reference is valid (and so addressed to a real login)
    pub fn from_reference(reference: &Reference) -> Option<Self> {
        if !reference.is_valid() {
            return None;
        }
        Some(Self {
            commenter: reference.commenter(),
            addressee: reference.addressee_login()?,
            comment_id: reference.comment_id(),
            ref_type: reference.kind(),
            timestamp: reference.timestamp(),
            thread_type: reference.thread_kind(),
        })
    }
}

/// Aggregated edge in weighted mode
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightedEdge {
    pub commenter: Login,
    pub addressee: Login,
    pub ref_type: RefKind,
    pub weight: usize,
    pub comment_ids: BTreeSet<u64>,
}

/// Project output in the mode the config asked for
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "mode", content = "rows", rename_all = "snake_case")]
pub enum ReferenceTable {
    Raw(Vec<ReferenceRecord>),
    Weighted(Vec<WeightedEdge>),
}

impl ReferenceTable {
    pub fn len(&self) -> usize {
        match self {
            ReferenceTable::Raw(rows) => rows.len(),
            ReferenceTable::Weighted(edges) => edges.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ReferenceConsolidator;

impl ReferenceConsolidator {
    /// Valid mentions, then valid quotes, then valid contextual replies
    pub fn thread(mentions: Vec<Reference>, quotes: Vec<Reference>, contextuals: Vec<Reference>) -> Vec<Reference> {
        mentions
            .into_iter()
            .chain(quotes)
            .chain(contextuals)
            .filter(Reference::is_valid)
            .collect()
    }

    /// Concatenate per-thread lists in thread order
    pub fn project<I>(per_thread: I) -> Vec<Reference>
    where
        I: IntoIterator<Item = Vec<Reference>>,
    {
        per_thread.into_iter().flatten().collect()
    }

    pub fn records(references: &[Reference]) -> Vec<ReferenceRecord> {
        references.iter().filter_map(ReferenceRecord::from_reference).collect()
    }

    /// Group by (commenter, addressee, kind); edges come out in key order
    pub fn weighted(references: &[Reference]) -> Vec<WeightedEdge> {
        let mut groups: BTreeMap<(Login, Login, RefKind), (usize, BTreeSet<u64>)> = BTreeMap::new();

        for record in references.iter().filter_map(ReferenceRecord::from_reference) {
            let entry = groups
                .entry((record.commenter, record.addressee, record.ref_type))
                .or_default();
            entry.0 += 1;
            entry.1.insert(record.comment_id);
        }

        groups
            .into_iter()
            .map(|((commenter, addressee, ref_type), (weight, comment_ids))| WeightedEdge {
                commenter,
                addressee,
                ref_type,
                weight,
                comment_ids,
            })
            .collect()
    }

    pub fn table(references: &[Reference], weighted: bool) -> ReferenceTable {
        if weighted {
            ReferenceTable::Weighted(Self::weighted(references))
        } else {
            ReferenceTable::Raw(Self::records(references))
        }
    }
}
