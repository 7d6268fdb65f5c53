//! Report: per-project diagnostic counters
//!
//! Counters only; nothing here affects which references are produced.
//! Every candidate is counted as found, and as valid only when it passed
//! validation. Unsourced quotes count as found quotes that were never
//! valid, and additionally as "not sourced".

use serde::Serialize;
use std::fmt;

use crate::model::{RefKind, ThreadKind};

/// Found/valid tally for one reference kind
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub found: usize,
    pub valid: usize,
}

impl KindCounts {
    fn record(&mut self, valid: bool) {
        self.found += 1;
        if valid {
            self.valid += 1;
        }
    }

    fn add(&mut self, other: &KindCounts) {
        self.found += other.found;
        self.valid += other.valid;
    }

    /// Percentage of found candidates that were valid (0 when none found)
    pub fn valid_share(&self) -> f64 {
        if self.found == 0 {
            0.0
        } else {
            self.valid as f64 / self.found as f64 * 100.0
        }
    }
}

/// Counts for all three reference kinds
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReferenceCounts {
    pub mention: KindCounts,
    pub quote: KindCounts,
    pub contextual_reply: KindCounts,
}

impl ReferenceCounts {
    pub fn get(&self, kind: RefKind) -> KindCounts {
        match kind {
            RefKind::Mention => self.mention,
            RefKind::Quote => self.quote,
            RefKind::ContextualReply => self.contextual_reply,
        }
    }

    fn get_mut(&mut self, kind: RefKind) -> &mut KindCounts {
        match kind {
            RefKind::Mention => &mut self.mention,
            RefKind::Quote => &mut self.quote,
            RefKind::ContextualReply => &mut self.contextual_reply,
        }
    }

    fn add(&mut self, other: &ReferenceCounts) {
        self.mention.add(&other.mention);
        self.quote.add(&other.quote);
        self.contextual_reply.add(&other.contextual_reply);
    }

    pub fn valid_total(&self) -> usize {
        self.mention.valid + self.quote.valid + self.contextual_reply.valid
    }
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThreadKindStats {
    pub threads: usize,
    pub comments: usize,
    pub references: ReferenceCounts,
    pub quotes_not_sourced: usize,
}

impl ThreadKindStats {
    fn add(&mut self, other: &ThreadKindStats) {
        self.threads += other.threads;
        self.comments += other.comments;
        self.references.add(&other.references);
        self.quotes_not_sourced += other.quotes_not_sourced;
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// `owner/repo`, when known
    pub project: Option<String>,
    pub participants: usize,
    pub rows_without_position: usize,
    pub elapsed_us: u64,
    issue: ThreadKindStats,
    pullreq: ThreadKindStats,
    commit: ThreadKindStats,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_project(name: impl Into<String>) -> Self {
        Self {
            project: Some(name.into()),
            ..Self::default()
        }
    }

    fn stats_mut(&mut self, kind: ThreadKind) -> &mut ThreadKindStats {
        match kind {
            ThreadKind::Issue => &mut self.issue,
            ThreadKind::PullRequest => &mut self.pullreq,
            ThreadKind::Commit => &mut self.commit,
        }
    }

    pub fn by_thread_kind(&self, kind: ThreadKind) -> &ThreadKindStats {
        match kind {
            ThreadKind::Issue => &self.issue,
            ThreadKind::PullRequest => &self.pullreq,
            ThreadKind::Commit => &self.commit,
        }
    }

    pub fn add_thread(&mut self, kind: ThreadKind, comments: usize) {
        let stats = self.stats_mut(kind);
        stats.threads += 1;
        stats.comments += comments;
    }

    pub fn record(&mut self, thread_kind: ThreadKind, kind: RefKind, valid: bool) {
        self.stats_mut(thread_kind).references.get_mut(kind).record(valid);
    }

    pub fn record_unsourced_quote(&mut self, thread_kind: ThreadKind) {
        let stats = self.stats_mut(thread_kind);
        stats.references.quote.record(false);
        stats.quotes_not_sourced += 1;
    }

    pub fn threads(&self) -> usize {
        ThreadKind::ALL.iter().map(|k| self.by_thread_kind(*k).threads).sum()
    }

    pub fn comments(&self) -> usize {
        ThreadKind::ALL.iter().map(|k| self.by_thread_kind(*k).comments).sum()
    }

    pub fn quotes_not_sourced(&self) -> usize {
        ThreadKind::ALL.iter().map(|k| self.by_thread_kind(*k).quotes_not_sourced).sum()
    }

    /// Reference counts summed over thread kinds
    pub fn totals(&self) -> ReferenceCounts {
        let mut totals = ReferenceCounts::default();
        for kind in ThreadKind::ALL {
            totals.add(&self.by_thread_kind(kind).references);
        }
        totals
    }

    pub fn counts(&self, kind: RefKind) -> KindCounts {
        self.totals().get(kind)
    }

    /// Add another report's counters. Participant count and elapsed time are
    /// project-level and left to the caller.
    pub fn merge(&mut self, other: &Report) {
        self.issue.add(&other.issue);
        self.pullreq.add(&other.pullreq);
        self.commit.add(&other.commit);
        self.rows_without_position += other.rows_without_position;
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = self.totals();

        writeln!(f, "### Project Stats Summary ###")?;
        if let Some(project) = &self.project {
            writeln!(f, "project:                  {}", project)?;
        }
        writeln!(f, "participants:             {}", self.participants)?;
        writeln!(f, "threads:                  {}", self.threads())?;
        writeln!(f, "comments:                 {}", self.comments())?;
        writeln!(f)?;
        writeln!(f, "                          total\tvalid\tshare")?;
        for (label, kind) in [
            ("quotes:", RefKind::Quote),
            ("mentions:", RefKind::Mention),
            ("contextuals:", RefKind::ContextualReply),
        ] {
            let counts = totals.get(kind);
            writeln!(
                f,
                "{:<26}{}\t{}\t{:.2}%",
                label,
                counts.found,
                counts.valid,
                counts.valid_share()
            )?;
        }
        let not_sourced = self.quotes_not_sourced();
        writeln!(f, "quotes sourced:           {}", totals.quote.found.saturating_sub(not_sourced))?;
        writeln!(f, "quotes not sourced:       {}", not_sourced)?;
        if self.rows_without_position > 0 {
            writeln!(f, "rows without position:    {}", self.rows_without_position)?;
        }
        write!(f, "valid sum:                {}", totals.valid_total())
    }
}
