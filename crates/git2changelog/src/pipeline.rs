// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Pipeline wiring: log source → parser → grouping → renderer
//!
//! Every stage is a lazy iterator, so a group is written out before the next
//! one is read from `git log`.

use std::io::Write;

use changelog_git::{CommitRecord, GitError, GitRepo, RecordParser};
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::error::ChangelogError;
use crate::group::GroupExt;
use crate::render::{OutputSink, Renderer};

/// Totals for one changelog run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commits rendered
    pub commits: usize,
    /// Groups rendered
    pub groups: usize,
}

/// Group `records` and render them through `renderer`
///
/// Groups already written stay written when a later record fails.
///
/// # Errors
///
/// Returns `ChangelogError::Source` for upstream failures and
/// `ChangelogError::Render` if the sink rejects a write.
pub fn render_records<I, S>(
    records: I,
    renderer: &mut Renderer<S>,
) -> Result<RunSummary, ChangelogError>
where
    I: Iterator<Item = Result<CommitRecord, GitError>>,
    S: OutputSink,
{
    for group in records.grouped() {
        let group = group?;
        renderer
            .render_group(&group)
            .map_err(ChangelogError::Render)?;
    }

    Ok(RunSummary {
        commits: renderer.commits_rendered(),
        groups: renderer.groups_rendered(),
    })
}

/// Render a changelog from raw `git log` output lines into `sink`
///
/// The sink is flushed before returning, on success and on failure alike.
///
/// # Errors
///
/// Returns the first parse, grouping or write error.
pub fn write_changelog<L, W>(lines: L, sink: W) -> Result<RunSummary, ChangelogError>
where
    L: Iterator<Item = Result<Vec<u8>, GitError>>,
    W: Write,
{
    let mut renderer = Renderer::new(sink);
    let result = render_records(RecordParser::new(lines), &mut renderer);
    let flushed = renderer.sink_mut().flush().map_err(ChangelogError::Render);
    let summary = result?;
    flushed?;
    Ok(summary)
}

/// Run the whole pipeline for `config`, writing the changelog to `sink`
///
/// # Errors
///
/// Returns `ChangelogError` identifying the stage that failed.
pub fn run<W: Write>(config: &Config, sink: W) -> Result<RunSummary, ChangelogError> {
    config.validate()?;
    let path = config.repo_path().ok_or(ConfigError::NoWorkingDirectory)?;

    let repo = GitRepo::discover(&path)?;
    debug!(dir = %repo.log_dir().display(), "Reading history");

    let summary = if repo.has_commits()? {
        debug!(head = %repo.head_sha()?, "Resolved HEAD");
        let lines = repo.log_source().spawn()?;
        write_changelog(lines, sink)?
    } else {
        info!("Repository has no commits yet");
        write_changelog(std::iter::empty(), sink)?
    };

    info!(
        commits = summary.commits,
        groups = summary.groups,
        "Changelog written"
    );
    Ok(summary)
}
