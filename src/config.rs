//! # Tool Configuration
//!
//! Environment-driven settings that are not worth a command-line flag of their own.
//!
//! ## Environment Variables
//!
//! ### `TYPED_ROUTES_PYTHON`
//!
//! Interpreter used to run the route extractor. The `--python` flag takes
//! precedence. When neither is set the interpreter of the active virtualenv
//! (`$VIRTUAL_ENV`) is used, then `python3` / `python` from `PATH`.
//!
//! ### `TYPED_ROUTES_RUFF_BIN`
//!
//! Path to the `ruff` binary used for the post-generation formatting pass.
//! Defaults to `ruff` looked up on `PATH`; the pass is skipped when none is found.
//!
//! ## Usage
//!
//! ```rust
//! use fastapi_typed_routes::config::ToolConfig;
//!
//! let config = ToolConfig::from_env();
//! let python = config.resolve_interpreter(None);
//! println!("extractor interpreter: {python:?}");
//! ```

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the extractor interpreter.
pub const PYTHON_ENV: &str = "TYPED_ROUTES_PYTHON";
/// Environment variable naming the ruff binary.
pub const RUFF_BIN_ENV: &str = "TYPED_ROUTES_RUFF_BIN";

/// Settings loaded from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    /// Explicit interpreter from `TYPED_ROUTES_PYTHON`
    pub python: Option<PathBuf>,
    /// Explicit ruff binary from `TYPED_ROUTES_RUFF_BIN`
    pub ruff_bin: Option<PathBuf>,
    /// Active virtualenv root from `VIRTUAL_ENV`
    pub virtual_env: Option<PathBuf>,
}

impl ToolConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_var = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };
        ToolConfig {
            python: path_var(PYTHON_ENV),
            ruff_bin: path_var(RUFF_BIN_ENV),
            virtual_env: path_var("VIRTUAL_ENV"),
        }
    }

    /// Pick the interpreter that runs the extractor.
    ///
    /// Order: `explicit` (the `--python` flag), `TYPED_ROUTES_PYTHON`, the
    /// virtualenv interpreter if it exists, then `python3` and `python` on `PATH`.
    pub fn resolve_interpreter(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = &self.python {
            return Some(path.clone());
        }
        if let Some(venv) = &self.virtual_env {
            let candidate = venv_interpreter(venv);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if let Ok(path) = which::which("python3") {
            return Some(path);
        }
        which::which("python").ok()
    }

    /// Pick the ruff binary, or `None` when formatting should be skipped.
    pub fn resolve_formatter(&self) -> Option<PathBuf> {
        if let Some(path) = &self.ruff_bin {
            return Some(path.clone());
        }
        which::which("ruff").ok()
    }
}

fn venv_interpreter(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ToolConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ToolConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let cfg = config(&[
            (PYTHON_ENV, "/opt/py/bin/python"),
            (RUFF_BIN_ENV, "/usr/bin/ruff"),
        ]);
        assert_eq!(cfg.python, Some(PathBuf::from("/opt/py/bin/python")));
        assert_eq!(cfg.ruff_bin, Some(PathBuf::from("/usr/bin/ruff")));
        assert_eq!(cfg.virtual_env, None);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let cfg = config(&[(PYTHON_ENV, "  "), (RUFF_BIN_ENV, "")]);
        assert_eq!(cfg, ToolConfig::default());
    }

    #[test]
    fn test_explicit_interpreter_wins() {
        let cfg = config(&[(PYTHON_ENV, "/from/env")]);
        assert_eq!(
            cfg.resolve_interpreter(Some(Path::new("/from/flag"))),
            Some(PathBuf::from("/from/flag"))
        );
        let from_env = cfg.resolve_interpreter(None);
        assert_eq!(from_env, Some(PathBuf::from("/from/env")));
    }

    #[test]
    fn test_virtualenv_interpreter_used_when_present() {
        let venv = tempfile::tempdir().unwrap();
        let python = venv_interpreter(venv.path());
        std::fs::create_dir_all(python.parent().unwrap()).unwrap();
        std::fs::write(&python, "").unwrap();

        let cfg = ToolConfig {
            virtual_env: Some(venv.path().to_path_buf()),
            ..ToolConfig::default()
        };
        assert_eq!(cfg.resolve_interpreter(None), Some(python));
    }

    #[test]
    fn test_explicit_ruff_bin() {
        let cfg = config(&[(RUFF_BIN_ENV, "/tools/ruff")]);
        assert_eq!(cfg.resolve_formatter(), Some(PathBuf::from("/tools/ruff")));
    }
}
