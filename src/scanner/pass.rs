//! ThreadScanner: the per-thread detection pass
//!
//! Comments are visited once, in ascending id order. The only state carried
//! between comments is the position, the set of authors seen so far, and
//! the explicit references of the comment at hand. Everything a pass
//! produces is returned in its [`ThreadOutcome`]; the caller merges
//! outcomes, so threads can be scanned independently.

use std::collections::HashSet;
use tracing::debug;

use super::contextual::ContextualReplyDetector;
use super::mention::MentionDetector;
use super::quote::QuoteDetector;
use super::validate::ReferenceValidator;
use crate::config::AnalysisConfig;
use crate::consolidate::ReferenceConsolidator;
use crate::diagnostics::{Diagnostics, InvalidReference, UnsourcedQuote};
use crate::model::{Actor, Candidate, Login, ParticipantSet, RefKind, Reference, Thread};
use crate::report::Report;

/// Everything one thread pass produced
#[derive(Debug, Default)]
pub struct ThreadOutcome {
    /// Valid references: mentions, then quotes, then contextual replies
    pub references: Vec<Reference>,
    pub report: Report,
    pub diagnostics: Diagnostics,
}

pub struct ThreadScanner {
    mentions: MentionDetector,
    quotes: QuoteDetector,
    contextual: ContextualReplyDetector,
    collect_invalid: bool,
    collect_unsourced: bool,
}

impl Default for ThreadScanner {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

/// Per-pass accumulator
struct PassState<'t> {
    thread: &'t Thread,
    report: Report,
    diagnostics: Diagnostics,
    collect_invalid: bool,
}

impl PassState<'_> {
    /// Count a judged reference; keep it only if valid
    fn tally(&mut self, reference: Reference, kept: &mut Vec<Reference>) {
        self.report.record(reference.thread_kind(), reference.kind(), reference.is_valid());
        if reference.is_valid() {
            kept.push(reference);
        } else if self.collect_invalid {
            if let Some(entry) = InvalidReference::from_reference(&reference, self.thread.thread_id()) {
                self.diagnostics.invalid.push(entry);
            }
        }
    }
}

impl ThreadScanner {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            mentions: MentionDetector::new(),
            quotes: QuoteDetector::new(config.quote_skip, config.quote_window),
            contextual: ContextualReplyDetector::new(config.contextual_party_threshold),
            collect_invalid: config.collect_invalid,
            collect_unsourced: config.collect_unsourced,
        }
    }

    pub fn scan(&self, thread: &Thread, project_participants: &ParticipantSet) -> ThreadOutcome {
        let kind = thread.kind();
        let validator = ReferenceValidator::new(thread.participants(), project_participants);
        let mut state = PassState {
            thread,
            report: Report::new(),
            diagnostics: Diagnostics::new(),
            collect_invalid: self.collect_invalid,
        };
        state.report.add_thread(kind, thread.len());

        let mut mentions = Vec::new();
        let mut quotes = Vec::new();
        let mut contextuals = Vec::new();
        let mut seen_authors: HashSet<Login> = HashSet::new();

        for (position, comment) in thread.comments().iter().enumerate() {
            let previous = match position {
                0 => Actor::ThreadOwner,
                r => Actor::User(thread.comments()[r - 1].author),
            };

            let mut row_mentions = Vec::new();
            for candidate in self.mentions.detect(comment) {
                state.tally(validator.judge(candidate, kind), &mut row_mentions);
            }

            let mut row_quotes = Vec::new();
            for finding in self.quotes.detect(thread, position) {
                match finding.source {
                    Some(source) => {
                        let candidate = Candidate {
                            kind: RefKind::Quote,
                            commenter: comment.author,
                            addressee: Some(Actor::User(source)),
                            comment_id: comment.id,
                            timestamp: comment.created_at,
                            origin: Some(finding.origin),
                        };
                        state.tally(validator.judge(candidate, kind), &mut row_quotes);
                    }
                    None => {
                        state.report.record_unsourced_quote(kind);
                        if self.collect_unsourced {
                            state.diagnostics.unsourced.push(UnsourcedQuote {
                                thread_kind: kind,
                                thread_id: thread.thread_id().to_string(),
                                comment_id: comment.id,
                                commenter: comment.author,
                                origin: finding.origin,
                                text: finding.text.to_string(),
                            });
                        }
                    }
                }
            }

            let explicit: Vec<Reference> = row_mentions.iter().chain(row_quotes.iter()).cloned().collect();
            if let Some(candidate) = self.contextual.detect(comment, previous, seen_authors.len(), &explicit) {
                state.tally(validator.judge(candidate, kind), &mut contextuals);
            }

            mentions.extend(row_mentions);
            quotes.extend(row_quotes);
            seen_authors.insert(comment.author);
        }

        let references = ReferenceConsolidator::thread(mentions, quotes, contextuals);
        debug!(
            kind = %kind,
            thread = thread.thread_id(),
            comments = thread.len(),
            references = references.len(),
            "scanned thread"
        );

        ThreadOutcome {
            references,
            report: state.report,
            diagnostics: state.diagnostics,
        }
    }
}
