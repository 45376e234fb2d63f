// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! ChangeLog text rendering
//!
//! Each group becomes a header line followed by one bullet per commit:
//!
//! ```text
//! 2020-05-01  J. Doe <j@x.com>
//!
//!   * Fix bug [v1.0]
//!
//! ```

use std::io;

use changelog_git::CommitRecord;

use crate::group::Group;

/// Destination for rendered text
pub trait OutputSink {
    /// Append `text` to the output
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the text cannot be written.
    fn append(&mut self, text: &str) -> io::Result<()>;
}

impl<W: io::Write> OutputSink for W {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())
    }
}

/// Header line for a group
#[must_use]
pub fn format_header(date: &str, author: &str) -> String {
    format!("{date}  {author}\n\n")
}

/// Bullet line for one commit
#[must_use]
pub fn format_entry(commit: &CommitRecord) -> String {
    format!("  * {}{}\n\n", commit.subject, commit.r#ref)
}

/// Streams groups to an [`OutputSink`]
pub struct Renderer<S> {
    sink: S,
    groups: usize,
    commits: usize,
}

impl<S: OutputSink> Renderer<S> {
    /// Create a renderer writing to `sink`
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            groups: 0,
            commits: 0,
        }
    }

    /// Write one group
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn render_group(&mut self, group: &Group) -> io::Result<()> {
        self.sink
            .append(&format_header(group.date(), group.author()))?;
        for commit in group.commits() {
            self.sink.append(&format_entry(commit))?;
        }

        self.groups += 1;
        self.commits += group.len();
        Ok(())
    }

    /// Groups written so far
    #[must_use]
    pub fn groups_rendered(&self) -> usize {
        self.groups
    }

    /// Commits written so far
    #[must_use]
    pub fn commits_rendered(&self) -> usize {
        self.commits
    }

    /// Borrow the sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Recover the sink
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}
