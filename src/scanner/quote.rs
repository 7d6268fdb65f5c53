//! QuoteDetector: `>` quoted replies attributed by substring search
//!
//! A `>` that opens a logical line (body start, or right after `\r\n`)
//! starts a quote copied from an earlier comment. The quoted text is cut to
//! a short window and looked up in the strictly earlier comments of the same
//! thread; the first comment containing it names the addressee.

use crate::config::{DEFAULT_QUOTE_SKIP, DEFAULT_QUOTE_WINDOW};
use crate::model::{Login, Thread};

/// One confirmed quote opener in a comment body
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteFinding<'a> {
    /// Byte offset of the `>`
    pub origin: usize,
    /// Text looked up in earlier comments
    pub text: &'a str,
    /// Author of the first earlier comment containing `text`
    pub source: Option<Login>,
}

#[derive(Debug, Clone, Copy)]
pub struct QuoteDetector {
    skip: usize,
    window: usize,
}

impl Default for QuoteDetector {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE_SKIP, DEFAULT_QUOTE_WINDOW)
    }
}

impl QuoteDetector {
    /// `skip` and `window` are character counts from the `>`
    pub fn new(skip: usize, window: usize) -> Self {
        Self { skip, window }
    }

    /// Offsets of `>` characters that open a quote
    pub fn openers(body: &str) -> Vec<usize> {
        let markers: Vec<usize> = body.match_indices('>').map(|(i, _)| i).collect();
        collapse_runs(&markers)
            .into_iter()
            .filter(|&offset| opens_line(body.as_bytes(), offset))
            .collect()
    }

    /// Quote text for the opener at `origin`: from `skip` characters past the
    /// `>` up to the next `\r\n`, capped at `window` characters past the `>`.
    pub fn extract<'a>(&self, body: &'a str, origin: usize) -> &'a str {
        let Some(rest) = body.get(origin..) else {
            return "";
        };
        let char_offset = |n: usize| rest.char_indices().nth(n).map_or(rest.len(), |(i, _)| i);

        let start = char_offset(self.skip);
        let cap = char_offset(self.window);
        let line_end = rest.find("\r\n").unwrap_or(rest.len());
        let end = line_end.min(cap);

        if start >= end {
            ""
        } else {
            &rest[start..end]
        }
    }

    /// Quotes in comment `index` of `thread`, sourced against comments `[0, index)`
    pub fn detect<'a>(&self, thread: &'a Thread, index: usize) -> Vec<QuoteFinding<'a>> {
        let comments = thread.comments();
        let Some(comment) = comments.get(index) else {
            return Vec::new();
        };
        let earlier = &comments[..index];

        Self::openers(&comment.body)
            .into_iter()
            .map(|origin| {
                let text = self.extract(&comment.body, origin);
                // An empty window would match anything.
                let source = if text.is_empty() {
                    None
                } else {
                    earlier.iter().find(|c| c.body.contains(text)).map(|c| c.author)
                };
                QuoteFinding { origin, text, source }
            })
            .collect()
    }
}

/// Keep only the last member of each run of adjacent markers (`>>>` → one)
fn collapse_runs(markers: &[usize]) -> Vec<usize> {
    markers
        .iter()
        .enumerate()
        .filter(|&(i, &offset)| match markers.get(i + 1) {
            Some(&next) => next - offset > 1,
            None => true,
        })
        .map(|(_, &offset)| offset)
        .collect()
}

/// Walk back over consecutive `>` until reaching the body start or a `\r\n`.
fn opens_line(bytes: &[u8], offset: usize) -> bool {
    let mut pos = offset;
    loop {
        if pos == 0 {
            return true;
        }
        if pos >= 2 && &bytes[pos - 2..pos] == b"\r\n" {
            return true;
        }
        if bytes[pos - 1] == b'>' {
            pos -= 1;
            continue;
        }
        return false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_at_body_start() {
        assert_eq!(QuoteDetector::openers(">see this bug\r\nagreed"), vec![0]);
    }

    #[test]
    fn test_opener_after_crlf() {
        assert_eq!(QuoteDetector::openers("hi\r\n> quoted"), vec![4]);
    }

    #[test]
    fn test_inline_gt_is_not_an_opener() {
        assert!(QuoteDetector::openers("a > b and x->y").is_empty());
        // bare \n is not a line opener
        assert!(QuoteDetector::openers("hi\n> quoted").is_empty());
    }

    #[test]
    fn test_nested_markers_collapse_to_last() {
        assert_eq!(QuoteDetector::openers(">> nested"), vec![1]);
        assert_eq!(QuoteDetector::openers("x\r\n>>> deep"), vec![5]);
    }

    #[test]
    fn test_separated_markers_stay_separate() {
        assert_eq!(collapse_runs(&[0, 1, 5, 9, 10, 11]), vec![1, 5, 11]);
        assert_eq!(collapse_runs(&[3]), vec![3]);
        assert!(collapse_runs(&[]).is_empty());
    }

    #[test]
    fn test_long_marker_runs_do_not_recurse() {
        let body = ">".repeat(100_000) + " text";
        assert_eq!(QuoteDetector::openers(&body), vec![99_999]);
    }

    #[test]
    fn test_extract_skips_and_stops_at_line_break() {
        let detector = QuoteDetector::default();
        assert_eq!(detector.extract(">see this bug\r\nagreed", 0), "this bug");
    }

    #[test]
    fn test_extract_caps_window() {
        let detector = QuoteDetector::default();
        let body = format!(">    {}", "x".repeat(200));
        let text = detector.extract(&body, 0);
        assert_eq!(text.chars().count(), 55);
    }

    #[test]
    fn test_extract_counts_characters_not_bytes() {
        let detector = QuoteDetector::new(2, 6);
        assert_eq!(detector.extract("> ééééé", 0), "éééé");
    }

    #[test]
    fn test_extract_short_line_is_empty() {
        let detector = QuoteDetector::default();
        assert_eq!(detector.extract(">ok\r\nmore", 0), "");
    }
}
