//! # Data Model
//!
//! Plain data shared by the extractor and the generator:
//!
//! - [`AppRef`] - a `module:attribute` reference supplied on the command line
//! - [`Route`] - one named route as reported by the child interpreter
//! - [`AppInfo`] - everything the generator needs to emit one function group
//!
//! Identifier checks live here as well so that malformed references and prefixes
//! are rejected before any subprocess is spawned.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;

static IDENTIFIER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{XID_Start}_]\p{XID_Continue}*$")
        .expect("identifier regex should be valid")
});

static MODULE_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{XID_Start}_]\p{XID_Continue}*(\.[\p{XID_Start}_]\p{XID_Continue}*)*$")
        .expect("module path regex should be valid")
});

/// Returns true when `s` is usable as a Python identifier.
///
/// Follows the `XID_Start XID_Continue*` rule Python 3 uses, so non-ASCII
/// names such as `aplicación` are accepted.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_REGEX.is_match(s)
}

/// Returns true when `s` is a dotted module path such as `pkg.api.main`.
pub fn is_module_path(s: &str) -> bool {
    MODULE_PATH_REGEX.is_match(s)
}

/// A named route of one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Symbolic route name passed to `url_path_for`
    pub name: String,
    /// URL path template, e.g. `/items/{item_id}`
    pub path: String,
}

/// Reference to an application object: `module_path:object_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRef {
    /// Importable module, e.g. `myapp.main`
    pub import_path: String,
    /// Attribute holding the application inside that module
    pub object_name: String,
}

impl FromStr for AppRef {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (import_path, object_name) = s.split_once(':').ok_or_else(|| {
            CommandError::Usage(format!(
                "Invalid app module '{s}', expected 'module:app' (e.g. 'myapp.main:app')"
            ))
        })?;
        if object_name.contains(':') {
            return Err(CommandError::Usage(format!(
                "Invalid app module '{s}', expected exactly one ':' separator"
            )));
        }
        if !is_module_path(import_path) {
            return Err(CommandError::Usage(format!(
                "Invalid module path '{import_path}' in '{s}'"
            )));
        }
        if !is_identifier(object_name) {
            return Err(CommandError::Usage(format!(
                "Invalid attribute name '{object_name}' in '{s}'"
            )));
        }
        Ok(AppRef {
            import_path: import_path.to_string(),
            object_name: object_name.to_string(),
        })
    }
}

impl fmt::Display for AppRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.import_path, self.object_name)
    }
}

/// One application ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Module the application is imported from
    pub import_path: String,
    /// Attribute name of the application object
    pub object_name: String,
    /// Namespace of the generated `{prefix}_url_path_for` function
    pub prefix: String,
    /// Routes sorted by name
    pub routes: Vec<Route>,
}

impl AppInfo {
    /// Build an `AppInfo`, sorting `routes` by name.
    pub fn new(
        import_path: impl Into<String>,
        object_name: impl Into<String>,
        prefix: impl Into<String>,
        mut routes: Vec<Route>,
    ) -> Self {
        routes.sort_by(|a, b| a.name.cmp(&b.name));
        AppInfo {
            import_path: import_path.into(),
            object_name: object_name.into(),
            prefix: prefix.into(),
            routes,
        }
    }

    /// Route names that occur more than once, in sorted order.
    pub fn duplicate_route_names(&self) -> Vec<&str> {
        let mut dups: Vec<&str> = self
            .routes
            .windows(2)
            .filter(|w| w[0].name == w[1].name)
            .map(|w| w[0].name.as_str())
            .collect();
        dups.dedup();
        dups
    }
}

/// Pair every reference with its prefix.
///
/// Without explicit prefixes each application uses its attribute name. With
/// explicit prefixes the counts must match positionally. Resulting prefixes must
/// be identifiers and pairwise distinct.
///
/// # Errors
///
/// Returns [`CommandError::Usage`] on a count mismatch, an invalid prefix, or a
/// prefix used twice.
pub fn resolve_prefixes(
    refs: &[AppRef],
    prefixes: &[String],
) -> Result<Vec<String>, CommandError> {
    let resolved: Vec<String> = if prefixes.is_empty() {
        refs.iter()
            .map(|r| {
                tracing::info!(prefix = %r.object_name, app = %r, "using_default_prefix");
                r.object_name.clone()
            })
            .collect()
    } else if prefixes.len() != refs.len() {
        return Err(CommandError::Usage(format!(
            "Number of prefixes ({}) must match number of app modules ({})",
            prefixes.len(),
            refs.len()
        )));
    } else {
        prefixes.to_vec()
    };

    for (i, prefix) in resolved.iter().enumerate() {
        if !is_identifier(prefix) {
            return Err(CommandError::Usage(format!(
                "Prefix '{prefix}' is not a valid Python identifier"
            )));
        }
        if resolved[..i].contains(prefix) {
            return Err(CommandError::Usage(format!(
                "Prefix '{prefix}' is used by more than one app module; pass a distinct --prefix for each"
            )));
        }
    }
    Ok(resolved)
}
