//! # Extractor Module
//!
//! Reads the route tables of running FastAPI applications.
//!
//! ## Overview
//!
//! Importing an application module runs arbitrary code: route registration,
//! startup hooks, environment lookups. None of that happens in this process.
//! Instead a short-lived Python child imports every requested application,
//! walks its routes and reports back a single JSON document:
//!
//! ```text
//! parent                                   child (python -c EXTRACTOR_SCRIPT ref...)
//!   │  PYTHONPATH=<directory>:$PYTHONPATH     │
//!   ├───────────────── spawn ────────────────▶│ import module, getattr(app)
//!   │                                         │ isinstance(app, FastAPI)?
//!   │                                         │ keep APIRoute with a name
//!   │◀──────────── stdout: JSON ──────────────┤ sort by name, exit 0
//!   │◀──────────── stderr: diagnostic ────────┤ (or exit 1 on any failure)
//! ```
//!
//! ## Wire Format
//!
//! ```json
//! [{"import_path": "sample_app", "name": "app",
//!   "routes": [{"name": "create_user", "path": "/users/"}]}]
//! ```
//!
//! One object per requested reference, in request order.
//!
//! ## Failure Semantics
//!
//! Extraction is all-or-nothing. A single unimportable module, missing attribute
//! or non-FastAPI object fails the whole batch. Import failures get an
//! actionable hint appended (see [`IMPORT_FAILURE_HINT`]). There is no timeout:
//! an application that blocks at import time blocks the tool.

mod protocol;
mod python;
#[cfg(test)]
mod tests;

pub use protocol::{
    decode_payload, failure_error, is_import_failure, ExtractedApp, IMPORT_FAILURE_HINT,
};
pub use python::{python_path, PythonExtractor, EXTRACTOR_SCRIPT};

use crate::error::CommandError;
use crate::model::AppRef;

/// Source of route tables.
///
/// [`PythonExtractor`] is the real implementation; the seam lets the pipeline be
/// driven with synthetic data.
pub trait RouteExtractor {
    /// Extract one result per reference, in order, or fail the whole batch.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Extraction`] when any reference cannot be resolved.
    fn extract(&self, refs: &[AppRef]) -> Result<Vec<ExtractedApp>, CommandError>;
}
