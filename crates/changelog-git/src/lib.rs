// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelog-git: commit log reading for git2changelog
//!
//! This library crate runs `git log` with a fixed template and parses its
//! output into [`CommitRecord`] values, one lazily pulled record at a time.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use changelog_git::{GitRepo, RecordParser};
//!
//! let repo = GitRepo::discover(".").expect("find repo");
//! let lines = repo.log_source().spawn().expect("start git log");
//!
//! for record in RecordParser::new(lines) {
//!     let record = record.expect("parse record");
//!     println!("{} {}{}", record.short_id(), record.subject, record.r#ref);
//! }
//! ```

pub mod commit;
pub mod error;
pub mod parser;
pub mod repo;
pub mod source;

pub use commit::{CommitRecord, RecordBuilder};
pub use error::GitError;
pub use parser::{RecordParser, format_decoration, parse_log};
pub use repo::GitRepo;
pub use source::{LOG_FORMAT, LogLines, LogSource, RawLines};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::CommitRecord;
    pub use crate::error::GitError;
    pub use crate::parser::RecordParser;
    pub use crate::repo::GitRepo;
    pub use crate::source::LogSource;
}
