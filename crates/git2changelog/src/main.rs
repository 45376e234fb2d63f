// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! git2changelog: ChangeLog generator for git repositories
//!
//! This binary reads the history of the current (or given) repository and
//! prints it as a ChangeLog grouped by date and author.

use std::process::ExitCode;

use clap::Parser;
use git2changelog::Config;
use tracing::debug;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries only the changelog
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "Run failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let stdout = std::io::stdout().lock();
    git2changelog::run(config, std::io::BufWriter::new(stdout))?;
    Ok(())
}
