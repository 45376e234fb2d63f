// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! `git log` invocation
//!
//! [`LogSource`] runs `git log` with a fixed template and hands back its
//! standard output as a lazy sequence of raw lines. The sequence owns the
//! child process: draining it reaps the child, dropping it early kills it.
//! Standard error is drained on a helper thread so a chatty git can never
//! stall on a full pipe while stdout is being read.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use crate::error::GitError;

/// Output template, one `key value` line per field and a blank line per commit
///
/// The author line pairs the committer name with the author email.
pub const LOG_FORMAT: &str = "commit %H%nauthor %cn <%ae>%ndate %ad%nsubject %s%nref %d%n%n";

/// Default program name for the git executable
pub const GIT_PROGRAM: &str = "git";

/// Raw newline-delimited lines from any buffered reader
pub struct RawLines<R> {
    inner: std::io::Split<R>,
}

impl<R: BufRead> RawLines<R> {
    /// Wrap a reader
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            inner: reader.split(b'\n'),
        }
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = Result<Vec<u8>, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|line| line.map_err(GitError::from))
    }
}

/// Configuration for running `git log`
#[derive(Debug, Clone)]
pub struct LogSource {
    program: OsString,
    dir: Option<PathBuf>,
}

impl Default for LogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSource {
    /// Run `git log` in the current directory
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: OsString::from(GIT_PROGRAM),
            dir: None,
        }
    }

    /// Run `git log` in the given directory
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
            ..Self::new()
        }
    }

    /// Use a different git executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Directory the command runs in (None = current directory)
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Arguments passed to git
    #[must_use]
    pub fn command_args() -> Vec<String> {
        vec![
            "log".to_string(),
            "--no-color".to_string(),
            "--date=short".to_string(),
            "--decorate=short".to_string(),
            format!("--format={LOG_FORMAT}"),
        ]
    }

    /// Start `git log` and return its output lines
    ///
    /// # Errors
    ///
    /// Returns `GitError::SourceUnavailable` if the process cannot be started.
    pub fn spawn(&self) -> Result<LogLines, GitError> {
        let mut cmd = Command::new(&self.program);
        if let Some(ref dir) = self.dir {
            cmd.current_dir(dir);
        }
        cmd.args(Self::command_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(program = ?self.program, dir = ?self.dir, "Spawning git log");

        let mut child = cmd.spawn().map_err(|e| GitError::SourceUnavailable {
            reason: format!("failed to start {}: {e}", self.program.to_string_lossy()),
        })?;

        let (Some(stdout), stderr) = (child.stdout.take(), child.stderr.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(GitError::SourceUnavailable {
                reason: "git log stdout was not captured".to_string(),
            });
        };

        let stderr = stderr.map(|mut pipe| {
            std::thread::spawn(move || {
                let mut text = String::new();
                // Best effort: the exit status decides success, stderr only adds detail
                let _ = pipe.read_to_string(&mut text);
                text
            })
        });

        Ok(LogLines {
            child,
            lines: RawLines::new(BufReader::new(stdout)),
            stderr,
            finished: false,
        })
    }
}

/// Lazy line sequence tied to a running `git log` process
///
/// When stdout reaches end-of-file the child is reaped; a non-zero exit
/// status is yielded as a final `GitError::SourceUnavailable`.
pub struct LogLines {
    child: Child,
    lines: RawLines<BufReader<ChildStdout>>,
    stderr: Option<JoinHandle<String>>,
    finished: bool,
}

impl LogLines {
    /// Reap the child after stdout closed
    fn finish(&mut self) -> Result<(), GitError> {
        let status = self.child.wait()?;
        let stderr = self
            .stderr
            .take()
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();
        debug!(%status, "git log exited");

        if status.success() {
            Ok(())
        } else {
            Err(GitError::SourceUnavailable {
                reason: format!("git log exited with {status}: {}", stderr.trim()),
            })
        }
    }
}

impl Iterator for LogLines {
    type Item = Result<Vec<u8>, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(err)) => {
                self.finished = true;
                let _ = self.child.kill();
                let _ = self.child.wait();
                Some(Err(err))
            }
            None => {
                self.finished = true;
                self.finish().err().map(Err)
            }
        }
    }
}

impl std::iter::FusedIterator for LogLines {}

impl Drop for LogLines {
    fn drop(&mut self) {
        if !self.finished {
            warn!(pid = self.child.id(), "Terminating unfinished git log");
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
