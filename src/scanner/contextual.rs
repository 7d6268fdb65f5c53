//! ContextualReplyDetector: implicit replies from comment adjacency
//!
//! A comment that follows another participant's comment is taken to answer
//! it, unless an explicit reference in the same comment already covers the
//! relationship.

use crate::config::DEFAULT_PARTY_THRESHOLD;
use crate::model::{Actor, Candidate, Comment, RefKind, Reference};

#[derive(Debug, Clone, Copy)]
pub struct ContextualReplyDetector {
    party_threshold: usize,
}

impl Default for ContextualReplyDetector {
    fn default() -> Self {
        Self::new(DEFAULT_PARTY_THRESHOLD)
    }
}

impl ContextualReplyDetector {
    pub fn new(party_threshold: usize) -> Self {
        Self { party_threshold }
    }

    /// At most one contextual reply for `comment`.
    ///
    /// * `previous` - author of the preceding comment, `ThreadOwner` at position 0
    /// * `earlier_authors` - distinct authors among the preceding comments
    /// * `explicit` - this comment's mentions and quotes; only valid ones count
    pub fn detect(
        &self,
        comment: &Comment,
        previous: Actor,
        earlier_authors: usize,
        explicit: &[Reference],
    ) -> Option<Candidate> {
        if previous.is_user(comment.author) {
            return None;
        }

        let valid = || explicit.iter().filter(|r| r.is_valid() && r.kind().is_explicit());
        let covered = valid().any(|r| r.addressee() == Some(previous));
        let multi_party = earlier_authors >= self.party_threshold;
        let opens_with_reference = valid().any(|r| r.origin() == Some(0));

        if covered || (multi_party && opens_with_reference) {
            return None;
        }

        Some(Candidate {
            kind: RefKind::ContextualReply,
            commenter: comment.author,
            addressee: Some(previous),
            comment_id: comment.id,
            timestamp: comment.created_at,
            origin: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Login, ThreadKind, Validity};
    use chrono::{TimeZone, Utc};

    fn comment(id: u64, author: &str) -> Comment {
        Comment {
            id,
            thread_id: "1".into(),
            author: Login::new(author),
            body: String::new(),
            created_at: Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
            position: None,
        }
    }

    fn mention(commenter: &str, addressee: &str, origin: usize, validity: Validity) -> Reference {
        let candidate = Candidate {
            kind: RefKind::Mention,
            commenter: Login::new(commenter),
            addressee: Some(Actor::User(Login::new(addressee))),
            comment_id: 9,
            timestamp: Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
            origin: Some(origin),
        };
        Reference::new(candidate, ThreadKind::Issue, validity)
    }

    fn prev(login: &str) -> Actor {
        Actor::User(Login::new(login))
    }

    #[test]
    fn test_replies_to_previous_author() {
        let found = ContextualReplyDetector::default()
            .detect(&comment(2, "bob"), prev("alice"), 1, &[])
            .unwrap();

        assert_eq!(found.commenter, Login::new("bob"));
        assert_eq!(found.addressee, Some(prev("alice")));
        assert_eq!(found.comment_id, 2);
        assert_eq!(found.origin, None);
    }

    #[test]
    fn test_self_follow_up_emits_nothing() {
        assert!(ContextualReplyDetector::default()
            .detect(&comment(2, "alice"), prev("Alice"), 1, &[])
            .is_none());
    }

    #[test]
    fn test_first_comment_addresses_thread_owner() {
        let found = ContextualReplyDetector::default()
            .detect(&comment(1, "alice"), Actor::ThreadOwner, 0, &[])
            .unwrap();
        assert_eq!(found.addressee, Some(Actor::ThreadOwner));
    }

    #[test]
    fn test_explicit_reference_to_previous_author_suppresses() {
        let explicit = [mention("bob", "alice", 0, Validity::Valid)];
        assert!(ContextualReplyDetector::default()
            .detect(&comment(2, "bob"), prev("alice"), 1, &explicit)
            .is_none());
    }

    #[test]
    fn test_leading_reference_suppresses_only_in_multi_party_threads() {
        let explicit = [mention("dan", "carol", 0, Validity::Valid)];
        let detector = ContextualReplyDetector::default();

        // two earlier authors: still emitted
        assert!(detector.detect(&comment(4, "dan"), prev("bob"), 2, &explicit).is_some());
        // three earlier authors: suppressed
        assert!(detector.detect(&comment(4, "dan"), prev("bob"), 3, &explicit).is_none());
    }

    #[test]
    fn test_mid_body_reference_to_someone_else_keeps_reply() {
        let explicit = [mention("dan", "carol", 12, Validity::Valid)];
        assert!(ContextualReplyDetector::default()
            .detect(&comment(4, "dan"), prev("bob"), 3, &explicit)
            .is_some());
    }

    #[test]
    fn test_invalid_explicit_references_are_ignored() {
        use crate::model::InvalidReason;
        let explicit = [mention("bob", "alice", 0, Validity::Invalid(InvalidReason::NotParticipant))];
        assert!(ContextualReplyDetector::default()
            .detect(&comment(2, "bob"), prev("alice"), 1, &explicit)
            .is_some());
    }
}
