use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::model::{AppRef, Route};

/// Markers in the child's stderr that indicate the application (or FastAPI
/// itself) could not be imported.
const IMPORT_FAILURE_MARKERS: [&str; 2] = ["ModuleNotFoundError", "ImportError"];

/// Appended to extraction failures caused by import errors.
pub const IMPORT_FAILURE_HINT: &str = "Hint: It looks like the application module could not be found or imported.\n\
If the interpreter running the extractor is not your project's environment, \
the application dependencies might not be available.\n\
Try running inside your project environment, activate its virtualenv, or pass --python <path-to-project-python>.";

/// One element of the JSON array the child writes to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedApp {
    /// Module the application was imported from
    pub import_path: String,
    /// Attribute name of the application object
    pub name: String,
    /// Named regular routes, sorted by name
    pub routes: Vec<Route>,
}

/// Decode the child's stdout and check it answers `refs` one-to-one, in order.
///
/// # Errors
///
/// Returns [`CommandError::Extraction`] with the raw output included when the
/// payload is not valid JSON of the expected shape, or when it does not line up
/// with the requested references.
pub fn decode_payload(
    stdout: &str,
    refs: &[AppRef],
) -> Result<Vec<ExtractedApp>, CommandError> {
    let apps: Vec<ExtractedApp> = serde_json::from_str(stdout.trim()).map_err(|e| {
        tracing::debug!(stdout = %stdout, error = %e, "payload_decode_failed");
        CommandError::Extraction(format!("Failed to parse output from extractor ({e}): {stdout}"))
    })?;

    if apps.len() != refs.len() {
        return Err(CommandError::Extraction(format!(
            "Extractor returned {} results for {} app modules",
            apps.len(),
            refs.len()
        )));
    }
    for (app, app_ref) in apps.iter().zip(refs) {
        if app.import_path != app_ref.import_path || app.name != app_ref.object_name {
            return Err(CommandError::Extraction(format!(
                "Extractor returned '{}:{}' where '{}' was expected",
                app.import_path, app.name, app_ref
            )));
        }
    }
    Ok(apps)
}

/// Build the error for a child that exited unsuccessfully.
///
/// The child's diagnostic text is included verbatim; an actionable hint is
/// appended when it looks like an import failure.
pub fn failure_error(stderr: &str, exit_code: Option<i32>) -> CommandError {
    let detail = stderr.trim();
    tracing::debug!(exit_code = ?exit_code, stderr = %detail, "subprocess_failed");

    let mut msg = format!("Failed to extract routes.\nError: {detail}");
    if is_import_failure(detail) {
        msg.push_str("\n\n");
        msg.push_str(IMPORT_FAILURE_HINT);
    }
    CommandError::Extraction(msg)
}

/// True when `stderr` contains a recognizable Python import failure.
pub fn is_import_failure(stderr: &str) -> bool {
    IMPORT_FAILURE_MARKERS.iter().any(|m| stderr.contains(m))
}
