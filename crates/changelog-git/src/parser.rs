// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit log parsing
//!
//! This module turns the line stream produced by [`crate::source::LogSource`]
//! into [`CommitRecord`] values. Each commit arrives as a block of
//! `key value` lines closed by a blank line:
//!
//! ```text
//! commit 1945ab9c752534e733c38ba0109dc3b741f0a6eb
//! author Jane Doe <jane@example.com>
//! date 2026-01-17
//! subject Fix the frobnicator
//! ref  (HEAD -> main, tag: v1.0.0)
//!
//! ```

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::commit::{CommitRecord, RecordBuilder};
use crate::error::GitError;
use crate::source::RawLines;

/// Matches the first parenthesised decoration list, e.g. `(HEAD -> main, tag: v1)`
static DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("valid decoration regex"));

/// Label git puts in front of tag names inside a decoration list
const TAG_PREFIX: &str = "tag: ";

/// Split a log line into its key and value
///
/// The key is everything before the first whitespace character and the
/// value everything after it. A line without whitespace is all key.
#[must_use]
pub fn split_field(line: &str) -> (&str, &str) {
    match line.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, c)) => (&line[..i], &line[i + c.len_utf8()..]),
        None => (line, ""),
    }
}

/// Rewrite raw `%d` decoration text into a changelog annotation
///
/// `" (HEAD -> main, tag: v1.0.0)"` becomes `" [HEAD -> main, v1.0.0]"`.
/// Text without a parenthesised list yields an empty string.
#[must_use]
pub fn format_decoration(value: &str) -> String {
    let Some(captures) = DECORATION.captures(value) else {
        return String::new();
    };

    let names: Vec<&str> = captures[1]
        .split(',')
        .map(str::trim)
        .map(|name| name.strip_prefix(TAG_PREFIX).unwrap_or(name))
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        String::new()
    } else {
        format!(" [{}]", names.join(", "))
    }
}

/// Lazy parser yielding one [`CommitRecord`] per terminated block
///
/// The parser pulls lines on demand, so at most one block is held in memory.
/// A block that is still open when the input ends is discarded. After the
/// first error the parser is exhausted.
pub struct RecordParser<I> {
    lines: I,
    builder: RecordBuilder,
    line_number: usize,
    finished: bool,
}

impl<I> RecordParser<I>
where
    I: Iterator<Item = Result<Vec<u8>, GitError>>,
{
    /// Create a parser over a sequence of raw lines
    #[must_use]
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            builder: RecordBuilder::new(),
            line_number: 0,
            finished: false,
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Feed one raw line, returning a record when it closes a block
    fn process_line(&mut self, raw: &[u8]) -> Result<Option<CommitRecord>, GitError> {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = std::str::from_utf8(raw).map_err(|source| GitError::Decoding {
            line: self.line_number,
            source,
        })?;

        if line.is_empty() {
            if self.builder.is_empty() {
                return Ok(None);
            }
            let record = std::mem::take(&mut self.builder).build(self.line_number)?;
            trace!(commit = record.short_id(), date = %record.date, "Parsed commit record");
            return Ok(Some(record));
        }

        let (key, value) = split_field(line);
        let value = if key == "ref" {
            format_decoration(value)
        } else {
            value.to_string()
        };
        self.builder.set(key, value);
        Ok(None)
    }
}

impl<R: BufRead> RecordParser<RawLines<R>> {
    /// Create a parser reading lines from any buffered reader
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        Self::new(RawLines::new(reader))
    }
}

impl<'a> RecordParser<RawLines<&'a [u8]>> {
    /// Create a parser over in-memory log text
    #[must_use]
    pub fn from_text(text: &'a str) -> Self {
        Self::from_reader(text.as_bytes())
    }
}

impl<I> Iterator for RecordParser<I>
where
    I: Iterator<Item = Result<Vec<u8>, GitError>>,
{
    type Item = Result<CommitRecord, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(raw) = self.lines.next() else {
                self.finished = true;
                if !self.builder.is_empty() {
                    warn!(
                        line = self.line_number,
                        missing = ?self.builder.missing_fields(),
                        "Discarding unterminated commit block at end of log"
                    );
                }
                debug!(lines = self.line_number, "Reached end of commit log");
                return None;
            };
            self.line_number += 1;

            let result = raw.and_then(|raw| self.process_line(&raw));
            match result {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for RecordParser<I> where
    I: Iterator<Item = Result<Vec<u8>, GitError>>
{
}

/// Parse a complete in-memory log into records
///
/// # Errors
///
/// Returns the first `GitError` encountered.
pub fn parse_log(text: &str) -> Result<Vec<CommitRecord>, GitError> {
    RecordParser::from_text(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const SHA_A: &str = "1945ab9c752534e733c38ba0109dc3b741f0a6eb";
    const SHA_B: &str = "c460aeb7fb2d109c17e43de0ce681faec0b7374d";

    fn block(sha: &str, date: &str, subject: &str, decoration: &str) -> String {
        format!(
            "commit {sha}\nauthor Test Author <test@example.com>\ndate {date}\nsubject {subject}\nref {decoration}\n\n"
        )
    }

    #[test]
    fn test_parse_single_block() {
        let input = block(SHA_A, "2026-01-17", "Fix bug", "");
        let records = parse_log(&input).expect("should parse");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.commit_id, SHA_A);
        assert_eq!(record.author, "Test Author <test@example.com>");
        assert_eq!(record.date, "2026-01-17");
        assert_eq!(record.subject, "Fix bug");
        assert_eq!(record.r#ref, "");
    }

    #[test]
    fn test_parse_decoration_strips_tag_prefix() {
        let input = block(SHA_A, "2026-01-17", "Release", " (HEAD -> main, tag: v1.0.0)");
        let records = parse_log(&input).expect("should parse");
        assert_eq!(records[0].r#ref, " [HEAD -> main, v1.0.0]");
    }

    #[test]
    fn test_parse_ref_without_decoration_is_empty() {
        let records = parse_log(&block(SHA_A, "2026-01-17", "x", "")).expect("should parse");
        assert_eq!(records[0].r#ref, "");

        let records = parse_log(&block(SHA_A, "2026-01-17", "x", "   ")).expect("should parse");
        assert_eq!(records[0].r#ref, "");
    }

    #[test]
    fn test_parse_multiple_blocks_with_spacing_lines() {
        // The log template emits an extra blank line between blocks
        let input = format!(
            "{}\n{}\n",
            block(SHA_A, "2026-01-17", "First", " (tag: v0.2)"),
            block(SHA_B, "2026-01-16", "Second", "")
        );
        let records = parse_log(&input).expect("should parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].commit_id, SHA_A);
        assert_eq!(records[0].r#ref, " [v0.2]");
        assert_eq!(records[1].commit_id, SHA_B);
        assert_eq!(records[1].subject, "Second");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_log("").expect("should parse").is_empty());
        assert!(parse_log("\n\n\n").expect("should parse").is_empty());
    }

    #[test]
    fn test_unterminated_trailing_block_is_discarded() {
        let input = format!(
            "{}commit {SHA_B}\nauthor A <a@b.c>\ndate 2026-01-16\nsubject Partial\nref ",
            block(SHA_A, "2026-01-17", "Complete", "")
        );
        let records = parse_log(&input).expect("should parse");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].commit_id, SHA_A);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let input = format!("commit {SHA_A}\ndate 2026-01-17\nsubject No author\nref \n\n");
        match parse_log(&input) {
            Err(GitError::MalformedRecord { line, missing }) => {
                assert_eq!(line, 5);
                assert_eq!(missing, vec!["author"]);
            }
            other => panic!("Expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_error_stops_the_parser() {
        let input = format!(
            "subject orphan\n\n{}",
            block(SHA_A, "2026-01-17", "After error", "")
        );
        let mut parser = RecordParser::from_text(&input);

        assert!(matches!(
            parser.next(),
            Some(Err(GitError::MalformedRecord { .. }))
        ));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_records_before_error_are_yielded() {
        let input = format!(
            "{}subject orphan\n\n",
            block(SHA_A, "2026-01-17", "Good", "")
        );
        let mut parser = RecordParser::from_text(&input);

        assert!(matches!(parser.next(), Some(Ok(_))));
        assert!(matches!(parser.next(), Some(Err(_))));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_decoding_error() {
        let mut bytes = format!("commit {SHA_A}\n").into_bytes();
        bytes.extend_from_slice(b"author \xff\xfe\n\n");

        let result: Result<Vec<_>, _> = RecordParser::from_reader(bytes.as_slice()).collect();
        match result {
            Err(GitError::Decoding { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected Decoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = block(SHA_A, "2026-01-17", "Windows", " (main)").replace('\n', "\r\n");
        let records = parse_log(&input).expect("should parse");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Windows");
        assert_eq!(records[0].r#ref, " [main]");
    }

    #[test]
    fn test_unknown_key_is_tolerated() {
        let input = format!(
            "commit {SHA_A}\nauthor A <a@b.c>\ndate 2026-01-17\nsubject s\nref \nnote extra text\n\n"
        );
        let records = parse_log(&input).expect("should parse");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_line_without_whitespace_has_empty_value() {
        let input = format!("commit {SHA_A}\nauthor A <a@b.c>\ndate 2026-01-17\nsubject\nref\n\n");
        let records = parse_log(&input).expect("should parse");
        assert_eq!(records[0].subject, "");
        assert_eq!(records[0].r#ref, "");
    }

    #[test]
    fn test_subject_keeps_inner_whitespace() {
        let input = block(SHA_A, "2026-01-17", " indented  subject ", "");
        let records = parse_log(&input).expect("should parse");
        assert_eq!(records[0].subject, " indented  subject ");
    }

    #[test]
    fn test_lines_read() {
        let input = block(SHA_A, "2026-01-17", "x", "");
        let mut parser = RecordParser::from_text(&input);
        let _ = parser.next();
        assert_eq!(parser.lines_read(), 6);
    }

    #[test]
    fn test_split_field() {
        assert_eq!(split_field("commit abc"), ("commit", "abc"));
        assert_eq!(split_field("ref  (main)"), ("ref", " (main)"));
        assert_eq!(split_field("subject\ttabbed"), ("subject", "tabbed"));
        assert_eq!(split_field("lonely"), ("lonely", ""));
        assert_eq!(split_field(""), ("", ""));
    }

    #[test]
    fn test_format_decoration() {
        assert_eq!(
            format_decoration(" (HEAD -> main, tag: v1.0.0)"),
            " [HEAD -> main, v1.0.0]"
        );
        assert_eq!(
            format_decoration(" (tag: v2, tag: v2-rc1, origin/main)"),
            " [v2, v2-rc1, origin/main]"
        );
        assert_eq!(format_decoration(" (HEAD)"), " [HEAD]");
        assert_eq!(format_decoration(""), "");
        assert_eq!(format_decoration(" no parens"), "");
        assert_eq!(format_decoration(" ()"), "");
    }
}
