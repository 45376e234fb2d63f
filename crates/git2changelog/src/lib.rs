// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! git2changelog library
//!
//! This module exports the changelog pipeline for use in integration tests
//! and as a library: commits from `git log` are grouped into consecutive
//! runs sharing a date and author, then rendered as ChangeLog text.

pub mod config;
pub mod error;
pub mod group;
pub mod pipeline;
pub mod render;

pub use config::Config;
pub use error::ChangelogError;
pub use group::{Group, GroupExt, Groups};
pub use pipeline::{RunSummary, run, write_changelog};
pub use render::{OutputSink, Renderer};
