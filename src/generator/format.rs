use std::path::Path;
use std::process::Command;

/// Result of the post-generation formatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// No formatter available
    Skipped,
    /// `ruff format` and `ruff check --fix` both succeeded
    Formatted,
    /// The formatter ran but at least one step failed; the module is left as written
    Failed(String),
}

/// Run `ruff format` then `ruff check --fix` on `path`.
///
/// Best effort: failures are logged and reported in the outcome, never raised.
pub fn format_module(path: &Path, ruff: Option<&Path>) -> FormatOutcome {
    let Some(ruff) = ruff else {
        tracing::debug!("ruff not found, skipping formatting");
        return FormatOutcome::Skipped;
    };

    let mut failures = Vec::new();
    for step in [&["format"][..], &["check", "--fix"][..]] {
        let label = format!("ruff {}", step.join(" "));
        match Command::new(ruff).args(step).arg(path).output() {
            Ok(output) if output.status.success() => {
                tracing::debug!(step = %label, "format_step_succeeded");
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                tracing::warn!(
                    step = %label,
                    exit_code = ?output.status.code(),
                    stderr = %stderr,
                    "format_step_failed"
                );
                failures.push(format!("{label} exited with {}", output.status));
            }
            Err(e) => {
                tracing::warn!(step = %label, error = %e, "format_step_failed");
                failures.push(format!("{label}: {e}"));
            }
        }
    }

    if failures.is_empty() {
        FormatOutcome::Formatted
    } else {
        FormatOutcome::Failed(failures.join("; "))
    }
}
