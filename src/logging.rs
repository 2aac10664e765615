//! Logging initialization.
//!
//! The terminal UI owns stdout and stderr, so interactive sessions only log
//! when `--log-file` is given. One-shot runs log to stderr.

use std::{fs::OpenOptions, path::Path};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Where log records go for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    Disabled,
}

#[must_use]
pub fn sink_for<'a>(log_file: Option<&'a Path>, one_shot: bool) -> LogSink<'a> {
    match (log_file, one_shot) {
        (Some(path), _) => LogSink::File(path),
        (None, true) => LogSink::Stderr,
        (None, false) => LogSink::Disabled,
    }
}

/// Builds an `env_logger` builder honouring `RUST_LOG` (default `info`).
pub fn builder(sink: LogSink<'_>) -> Result<Option<Builder>> {
    let target = match sink {
        LogSink::Disabled => return Ok(None),
        LogSink::Stderr => Target::Stderr,
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Target::Pipe(Box::new(file))
        }
    };
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(target);
    Ok(Some(builder))
}

pub fn init(sink: LogSink<'_>) -> Result<()> {
    if let Some(mut builder) = builder(sink)? {
        builder
            .try_init()
            .context("failed to install logger")?;
    }
    Ok(())
}
