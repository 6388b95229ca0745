//! # Generator Module
//!
//! Turns extracted route tables into a Python module of typed
//! `url_path_for` wrappers.
//!
//! ## Overview
//!
//! Rendering is a pure function from [`AppInfo`](crate::model::AppInfo) records
//! to text, so it can be exercised with synthetic data without ever importing a
//! real application. For each application, in command-line order, the module:
//!
//! - imports the application object from its module,
//! - declares one `@overload` per route, keyed by `Literal["<route name>"]`,
//!   in sorted route-name order,
//! - defines `{prefix}_url_path_for(name, **path_params)` forwarding to the
//!   application's own `url_path_for`.
//!
//! ## Generated Output
//!
//! ```python
//! """Auto-generated typed url_path_for functions for FastAPI apps."""
//!
//! from typing import Literal, overload
//!
//! from sample_app import app
//!
//!
//! # Routes for app
//! @overload
//! def app_url_path_for(name: Literal["create_user"], **path_params) -> str: ...
//! @overload
//! def app_url_path_for(name: Literal["get_item"], **path_params) -> str: ...
//!
//!
//! def app_url_path_for(name: str, **path_params) -> str:
//!     """Type-safe wrapper around app.url_path_for() with overloads for all routes."""
//!     return app.url_path_for(name, **path_params)
//! ```
//!
//! ## Template
//!
//! The module layout lives in `templates/typed_routes.py.txt` and is compiled
//! in through Askama.
//!
//! ## Formatting
//!
//! [`format_module`] runs `ruff format` and `ruff check --fix` on the written
//! file when ruff is available. It never fails the generation.

mod format;
mod templates;
mod write;

pub use format::{format_module, FormatOutcome};
pub use templates::{
    python_string_literal, render_module, AppView, RouteView, TypedRoutesTemplateData,
};
pub use write::write_module;
