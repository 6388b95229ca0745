//! # fastapi-typed-routes
//!
//! Generates a Python module of type-checked `url_path_for` helpers from the
//! route tables of running FastAPI applications, so that callers of
//! `app.url_path_for("get_item", ...)` get literal, checked route names instead
//! of free-form strings.
//!
//! ## Architecture
//!
//! One invocation is a two-stage batch pipeline:
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as cli::run
//!     participant Ext as extractor::PythonExtractor
//!     participant Py as python -c EXTRACTOR_SCRIPT
//!     participant Gen as generator
//!     participant FS as File System
//!
//!     User->>CLI: --app-module sample_app:app --output routes.py
//!     CLI->>CLI: parse refs, resolve prefixes (usage errors)
//!     CLI->>Ext: extract(&refs)
//!     Ext->>Py: spawn with PYTHONPATH=<directory>
//!     Py-->>Ext: stdout: JSON route tables
//!     Ext-->>CLI: Vec<ExtractedApp>
//!     CLI->>Gen: write_module(&apps, output)
//!     Gen->>FS: render template, atomic write
//!     CLI->>Gen: format_module (ruff, best effort)
//!     CLI-->>User: ✅ Generated typed routes at: routes.py
//! ```
//!
//! - **[`model`]** - route, reference and application records, prefix rules
//! - **[`extractor`]** - isolated route-table extraction in a Python subprocess
//! - **[`generator`]** - template rendering, writing and formatting
//! - **[`cli`]** - argument parsing and orchestration
//! - **[`config`]** / **[`logging`]** - environment-driven settings
//! - **[`error`]** - the normalized [`CommandError`]
//!
//! ## Quick Start
//!
//! ```bash
//! generate-fastapi-typed-routes --app-module myapp.main:app --output myapp/routes.py
//! ```
//!
//! ```python
//! from myapp.routes import app_url_path_for
//!
//! app_url_path_for("get_item", item_id=42)   # ok
//! app_url_path_for("get_itme", item_id=42)   # rejected by the type checker
//! ```
//!
//! ## Programmatic Usage
//!
//! Rendering does not need Python at all:
//!
//! ```rust
//! use fastapi_typed_routes::generator::render_module;
//! use fastapi_typed_routes::model::{AppInfo, Route};
//!
//! let app = AppInfo::new(
//!     "sample_app",
//!     "app",
//!     "app",
//!     vec![Route { name: "get_item".into(), path: "/items/{item_id}".into() }],
//! );
//! let source = render_module(&[app]).unwrap();
//! assert!(source.contains(r#"Literal["get_item"]"#));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod logging;
pub mod model;

pub use error::CommandError;
pub use extractor::{ExtractedApp, PythonExtractor, RouteExtractor};
pub use generator::{render_module, write_module};
pub use model::{AppInfo, AppRef, Route};
