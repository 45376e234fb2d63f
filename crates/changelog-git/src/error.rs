// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for changelog-git

use thiserror::Error;

/// Errors that can occur while reading and parsing the commit log
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// The `git log` command could not be started or exited abnormally
    #[error("Log source unavailable: {reason}")]
    SourceUnavailable {
        /// What went wrong, including git's stderr when available
        reason: String,
    },

    /// A terminated commit block lacks one or more required fields
    #[error("Malformed commit record ending at line {line}: missing {}", .missing.join(", "))]
    MalformedRecord {
        /// 1-based line number of the block terminator
        line: usize,
        /// Names of the required fields that were absent
        missing: Vec<&'static str>,
    },

    /// A log line is not valid UTF-8
    #[error("Commit log line {line} is not valid UTF-8")]
    Decoding {
        /// 1-based line number of the offending line
        line: usize,
        /// Underlying decoding error
        source: std::str::Utf8Error,
    },

    /// Error reading the log stream
    #[error("IO error")]
    Io(#[from] std::io::Error),
}
