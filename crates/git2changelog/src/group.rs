// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Grouping of consecutive commits by date and author

use changelog_git::CommitRecord;
use tracing::trace;

/// A non-empty run of consecutive commits sharing one date and author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    commits: Vec<CommitRecord>,
}

impl Group {
    /// Start a group with its first commit
    #[must_use]
    pub fn new(first: CommitRecord) -> Self {
        Self {
            commits: vec![first],
        }
    }

    /// Date shared by every commit in the group
    #[must_use]
    pub fn date(&self) -> &str {
        &self.commits[0].date
    }

    /// Author shared by every commit in the group
    #[must_use]
    pub fn author(&self) -> &str {
        &self.commits[0].author
    }

    /// Commits in source order
    #[must_use]
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// Number of commits (always at least one)
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether the group has no commits (never true)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Whether `record` continues this run
    #[must_use]
    pub fn accepts(&self, record: &CommitRecord) -> bool {
        record.group_key() == (self.date(), self.author())
    }

    /// Append `record`, or hand it back if its key differs
    ///
    /// # Errors
    ///
    /// Returns the record unchanged when it belongs to a different group.
    pub fn push(&mut self, record: CommitRecord) -> Result<(), CommitRecord> {
        if self.accepts(&record) {
            self.commits.push(record);
            Ok(())
        } else {
            Err(record)
        }
    }

    /// Take the commits out of the group
    #[must_use]
    pub fn into_commits(self) -> Vec<CommitRecord> {
        self.commits
    }
}

/// Lazy adapter turning a record sequence into a [`Group`] sequence
///
/// Upstream errors pass through immediately and end the sequence; the run
/// being collected at that point is dropped.
pub struct Groups<I> {
    records: I,
    current: Option<Group>,
    finished: bool,
}

impl<I, E> Groups<I>
where
    I: Iterator<Item = Result<CommitRecord, E>>,
{
    /// Group the records yielded by `records`
    #[must_use]
    pub fn new(records: I) -> Self {
        Self {
            records,
            current: None,
            finished: false,
        }
    }
}

impl<I, E> Iterator for Groups<I>
where
    I: Iterator<Item = Result<CommitRecord, E>>,
{
    type Item = Result<Group, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.records.next() {
                Some(Ok(record)) => match self.current.as_mut() {
                    None => self.current = Some(Group::new(record)),
                    Some(group) => {
                        if let Err(record) = group.push(record) {
                            let done = self.current.replace(Group::new(record));
                            if let Some(ref group) = done {
                                trace!(date = group.date(), size = group.len(), "Closed group");
                            }
                            return done.map(Ok);
                        }
                    }
                },
                Some(Err(err)) => {
                    self.finished = true;
                    self.current = None;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    return self.current.take().map(Ok);
                }
            }
        }
    }
}

impl<I, E> std::iter::FusedIterator for Groups<I> where I: Iterator<Item = Result<CommitRecord, E>> {}

/// Extension trait adding `.grouped()` to record iterators
pub trait GroupExt: Iterator + Sized {
    /// Group consecutive records sharing date and author
    fn grouped(self) -> Groups<Self> {
        Groups {
            records: self,
            current: None,
            finished: false,
        }
    }
}

impl<I, E> GroupExt for I where I: Iterator<Item = Result<CommitRecord, E>> {}
