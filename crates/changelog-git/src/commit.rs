// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit record types and the block accumulator

use tracing::debug;

use crate::error::GitError;

/// Represents one parsed commit from the log stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full commit identifier
    pub commit_id: String,
    /// Committer display name and author email, e.g. `Jane <jane@example.com>`
    pub author: String,
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    /// One-line commit summary
    pub subject: String,
    /// Either empty or a decoration annotation such as ` [v1.2, main]`
    pub r#ref: String,
}

impl CommitRecord {
    /// Get the short commit id (first 7 characters)
    #[must_use]
    pub fn short_id(&self) -> &str {
        let end = self
            .commit_id
            .char_indices()
            .nth(7)
            .map_or(self.commit_id.len(), |(i, _)| i);
        &self.commit_id[..end]
    }

    /// Whether the commit carries any branch or tag decoration
    #[must_use]
    pub fn is_decorated(&self) -> bool {
        !self.r#ref.is_empty()
    }

    /// The `(date, author)` pair consecutive commits are grouped by
    #[must_use]
    pub fn group_key(&self) -> (&str, &str) {
        (&self.date, &self.author)
    }
}

/// Accumulates the key/value lines of one commit block
///
/// Each field has its own slot; [`RecordBuilder::build`] only succeeds once
/// every slot is filled. Keys the log template never produces are kept in
/// [`RecordBuilder::extras`] and dropped at build time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordBuilder {
    commit_id: Option<String>,
    author: Option<String>,
    date: Option<String>,
    subject: Option<String>,
    r#ref: Option<String>,
    extras: Vec<(String, String)>,
}

impl RecordBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no line has been accumulated since the last reset
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commit_id.is_none()
            && self.author.is_none()
            && self.date.is_none()
            && self.subject.is_none()
            && self.r#ref.is_none()
            && self.extras.is_empty()
    }

    /// Store a field; a repeated key overwrites the earlier value
    pub fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "commit" => &mut self.commit_id,
            "author" => &mut self.author,
            "date" => &mut self.date,
            "subject" => &mut self.subject,
            "ref" => &mut self.r#ref,
            _ => {
                debug!(key, "Keeping unrecognized commit field");
                self.extras.push((key.to_string(), value));
                return;
            }
        };
        if slot.replace(value).is_some() {
            debug!(key, "Commit field repeated within one block");
        }
    }

    /// Fields with keys outside the log template
    #[must_use]
    pub fn extras(&self) -> &[(String, String)] {
        &self.extras
    }

    /// Names of the required fields not yet seen
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("commit", self.commit_id.is_none()),
            ("author", self.author.is_none()),
            ("date", self.date.is_none()),
            ("subject", self.subject.is_none()),
            ("ref", self.r#ref.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }

    /// Finish the block terminated at `line`, consuming the builder
    ///
    /// # Errors
    ///
    /// Returns `GitError::MalformedRecord` if any required field is absent.
    pub fn build(self, line: usize) -> Result<CommitRecord, GitError> {
        match self {
            Self {
                commit_id: Some(commit_id),
                author: Some(author),
                date: Some(date),
                subject: Some(subject),
                r#ref: Some(r#ref),
                ..
            } => Ok(CommitRecord {
                commit_id,
                author,
                date,
                subject,
                r#ref,
            }),
            incomplete => Err(GitError::MalformedRecord {
                line,
                missing: incomplete.missing_fields(),
            }),
        }
    }
}
