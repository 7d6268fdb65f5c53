
use chrono::{TimeZone, Utc};

use crate::model::{CommentRow, Login, ParticipantSet, Thread, ThreadKind};
use crate::segment::ThreadSegmenter;

/// Issue thread "1" from `(id, author, body)` triples
pub(super) fn thread(rows: &[(u64, &str, &str)]) -> Thread {
    thread_of(ThreadKind::Issue, rows)
}

pub(super) fn thread_of(kind: ThreadKind, rows: &[(u64, &str, &str)]) -> Thread {
    let rows: Vec<CommentRow> = rows
        .iter()
        .map(|&(id, author, body)| {
            let ts = Utc.with_ymd_and_hms(2016, 5, 1, 10, 0, id as u32 % 60).unwrap();
            CommentRow::new("1", id, author, body, ts)
        })
        .collect();
    ThreadSegmenter::new().group(kind, &rows).unwrap()
}

/// Project participants = the thread's own participants
pub(super) fn own_participants(thread: &Thread) -> ParticipantSet {
    thread.participants().clone()
}

pub(super) fn logins(names: &[&str]) -> ParticipantSet {
    names.iter().map(|n| Login::new(n)).collect()
}
