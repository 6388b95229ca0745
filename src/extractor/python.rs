use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

use super::protocol::{decode_payload, failure_error, ExtractedApp};
use super::RouteExtractor;
use crate::error::CommandError;
use crate::model::AppRef;

/// Python source of the child program, run with `python -c`.
pub const EXTRACTOR_SCRIPT: &str = include_str!("extract_routes.py");

/// Runs [`EXTRACTOR_SCRIPT`] in a fresh interpreter.
///
/// The working directory is injected as the first `PYTHONPATH` entry so the
/// application modules resolve from it; any pre-existing entries follow.
#[derive(Debug, Clone)]
pub struct PythonExtractor {
    interpreter: PathBuf,
    directory: PathBuf,
}

impl PythonExtractor {
    /// Create an extractor using `interpreter`, importing from `directory`.
    pub fn new(interpreter: impl Into<PathBuf>, directory: impl Into<PathBuf>) -> Self {
        PythonExtractor {
            interpreter: interpreter.into(),
            directory: directory.into(),
        }
    }

    /// Interpreter this extractor launches.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    fn command(&self, refs: &[AppRef]) -> anyhow::Result<Command> {
        let directory = self
            .directory
            .canonicalize()
            .with_context(|| format!("Failed to resolve directory {:?}", self.directory))?;
        let pythonpath = python_path(&directory, env::var_os("PYTHONPATH"))?;

        let mut cmd = Command::new(&self.interpreter);
        cmd.arg("-c")
            .arg(EXTRACTOR_SCRIPT)
            .args(refs.iter().map(ToString::to_string))
            .env("PYTHONPATH", pythonpath);
        Ok(cmd)
    }
}

impl RouteExtractor for PythonExtractor {
    fn extract(&self, refs: &[AppRef]) -> Result<Vec<ExtractedApp>, CommandError> {
        let mut cmd = self
            .command(refs)
            .map_err(|e| CommandError::Extraction(format!("{e:#}")))?;

        tracing::info!(
            interpreter = %self.interpreter.display(),
            directory = %self.directory.display(),
            apps = refs.len(),
            "running_subprocess"
        );

        let output = cmd.output().map_err(|e| {
            CommandError::Extraction(format!(
                "Failed to execute extractor subprocess {:?}: {e}",
                self.interpreter
            ))
        })?;

        if !output.status.success() {
            return Err(failure_error(
                &String::from_utf8_lossy(&output.stderr),
                output.status.code(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let apps = decode_payload(&stdout, refs)?;
        tracing::info!(count = apps.len(), "apps_loaded");
        Ok(apps)
    }
}

/// `directory` first, then the entries of `existing`.
pub fn python_path(directory: &Path, existing: Option<OsString>) -> anyhow::Result<OsString> {
    let mut entries = vec![directory.to_path_buf()];
    if let Some(existing) = existing.filter(|v| !v.is_empty()) {
        entries.extend(env::split_paths(&existing));
    }
    env::join_paths(entries).context("Failed to build PYTHONPATH")
}
