// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository discovery
//!
//! This module locates the repository a changelog is generated for using
//! the `git2` crate, before any `git log` process is started.

use std::path::Path;

use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::error::GitError;
use crate::source::LogSource;

/// A git repository wrapper used to prepare the log source
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        debug!(git_dir = %repo.path().display(), "Discovered repository");
        Ok(Self { repo })
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the repository path (the `.git` directory)
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Directory `git log` should run in
    #[must_use]
    pub fn log_dir(&self) -> &Path {
        self.workdir().unwrap_or_else(|| self.path())
    }

    /// Whether HEAD points at a commit
    ///
    /// A freshly initialised repository has an unborn HEAD and no history.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Git2` if HEAD cannot be read for another reason.
    pub fn has_commits(&self) -> Result<bool, GitError> {
        match self.repo.head() {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the HEAD commit SHA
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved.
    pub fn head_sha(&self) -> Result<String, GitError> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// A log source running inside this repository
    #[must_use]
    pub fn log_source(&self) -> LogSource {
        LogSource::in_dir(self.log_dir())
    }
}
