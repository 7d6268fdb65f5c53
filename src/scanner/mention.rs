//! MentionDetector: explicit `@login` references
//!
//! A handle runs from the byte after `@` to the first stop character or the
//! end of the body. No attempt is made to tell e-mail addresses from
//! mentions; validation against known participants sorts them out.

use regex::Regex;

use crate::model::{Actor, Candidate, Comment, Login, RefKind};

/// Characters that terminate a handle
pub const HANDLE_STOP_CHARS: &[char] = &[
    ' ', '\'', '.', '@', '`', ',', '!', '?', '(', ')', '{', '}', '[', ']', '/', '\\', '"', '\n', '\t', '\r',
];

pub struct MentionDetector {
    // `@` followed by any run of non-stop characters (possibly empty).
    // `@` is itself a stop character, so "@@bob" yields "" then "bob".
    handle_re: Regex,
}

impl Default for MentionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionDetector {
    pub fn new() -> Self {
        let handle_re = Regex::new(r#"@([^ '.@`,!?(){}\[\]/\\"\n\t\r]*)"#)
            .expect("static mention pattern compiles");
        Self { handle_re }
    }

    /// `(offset of '@', raw handle)` pairs, left to right
    pub fn handles<'a>(&self, body: &'a str) -> Vec<(usize, &'a str)> {
        self.handle_re
            .captures_iter(body)
            .filter_map(|cap| {
                let at = cap.get(0)?.start();
                let handle = cap.get(1).map_or("", |m| m.as_str());
                Some((at, handle))
            })
            .collect()
    }

    /// One candidate per `@`; an empty handle has no addressee
    pub fn detect(&self, comment: &Comment) -> Vec<Candidate> {
        self.handles(&comment.body)
            .into_iter()
            .map(|(at, handle)| Candidate {
                kind: RefKind::Mention,
                commenter: comment.author,
                addressee: (!handle.is_empty()).then(|| Actor::User(Login::new(handle))),
                comment_id: comment.id,
                timestamp: comment.created_at,
                origin: Some(at),
            })
            .collect()
    }
}
