// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for git2changelog

use changelog_git::GitError;
use thiserror::Error;

use crate::config::ConfigError;

// Messages name the failing stage only; the cause is reached through
// `source()` so reporters print each link of the chain once.

/// Errors that end a changelog run, tagged with the failing stage
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The command-line configuration is unusable
    #[error("Invalid configuration")]
    Config(#[from] ConfigError),

    /// Locating, reading or parsing the commit log failed
    #[error("Reading commit log failed")]
    Source(#[from] GitError),

    /// Writing the rendered changelog failed
    #[error("Writing changelog failed")]
    Render(#[source] std::io::Error),
}
