//! # CLI Module
//!
//! Command-line entry point of the typed routes generator.
//!
//! ## Usage
//!
//! ```bash
//! generate-fastapi-typed-routes \
//!     --app-module myapp.main:app \
//!     --output myapp/typed_routes.py
//! ```
//!
//! Options:
//! - `--app-module <MODULE:ATTRIBUTE>` - FastAPI app to inspect (required, repeatable)
//! - `--output <PATH>` - Generated module, relative to `--directory` (required)
//! - `--prefix <NAME>` - Function prefix per app, positional with `--app-module`
//! - `-d, --directory <DIR>` - Import root (default: current directory)
//! - `--python <PATH>` - Interpreter that can import the apps
//! - `--no-format` - Skip the ruff pass
//! - `--dry-run` - Print the module instead of writing it
//!
//! ## Examples
//!
//! ```bash
//! # Two apps, explicit prefixes, run from the repository root
//! generate-fastapi-typed-routes \
//!     -d backend \
//!     --app-module api.public:app --prefix public \
//!     --app-module api.admin:app --prefix admin \
//!     --output api/typed_routes.py
//!
//! # Use the project's virtualenv interpreter from anywhere
//! generate-fastapi-typed-routes --python .venv/bin/python \
//!     --app-module main:app --output routes.py
//! ```
//!
//! ## Exit Codes
//!
//! - `0` - module written (or printed with `--dry-run`)
//! - `1` - extraction or generation failed
//! - `2` - usage error (malformed reference, prefix mismatch, bad arguments)

mod commands;


pub use commands::{execute, run, run_cli, Cli, GenerateReport, GenerationPlan};
