//! ReferenceValidator: identity and participation rules
//!
//! A candidate is valid when its addressee resolves to a real login that
//! differs from the commenter and authored something in the thread or the
//! project.

use crate::model::{Actor, Candidate, InvalidReason, Login, ParticipantSet, Reference, ThreadKind, Validity};

pub struct ReferenceValidator<'a> {
    thread: &'a ParticipantSet,
    project: &'a ParticipantSet,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(thread: &'a ParticipantSet, project: &'a ParticipantSet) -> Self {
        Self { thread, project }
    }

    pub fn validate(&self, commenter: Login, addressee: Option<Actor>) -> Validity {
        let addressee = match addressee {
            None => return Validity::Invalid(InvalidReason::Unresolved),
            Some(Actor::ThreadOwner) => return Validity::Invalid(InvalidReason::ThreadOwner),
            Some(Actor::User(login)) if login.is_empty() => return Validity::Invalid(InvalidReason::Unresolved),
            Some(Actor::User(login)) => login,
        };

        if addressee == commenter {
            Validity::Invalid(InvalidReason::SelfReference)
        } else if self.thread.contains(addressee) || self.project.contains(addressee) {
            Validity::Valid
        } else {
            Validity::Invalid(InvalidReason::NotParticipant)
        }
    }

    /// Turn a candidate into a reference, fixing its validity
    pub fn judge(&self, candidate: Candidate, thread_kind: ThreadKind) -> Reference {
        let validity = self.validate(candidate.commenter, candidate.addressee);
        Reference::new(candidate, thread_kind, validity)
    }
}
