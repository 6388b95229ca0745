use askama::Template;
use std::collections::HashSet;

use crate::model::AppInfo;

/// One route as the template sees it.
#[derive(Debug, Clone)]
pub struct RouteView {
    /// Route name as a quoted, escaped Python string literal
    pub literal: String,
}

/// One application as the template sees it.
#[derive(Debug, Clone)]
pub struct AppView {
    /// `from <module> import <object>[ as <alias>]`
    pub import_line: String,
    /// Name the application is bound to inside the generated module
    pub binding: String,
    /// Function namespace
    pub prefix: String,
    /// Overloads, in sorted route-name order
    pub routes: Vec<RouteView>,
}

/// Template data for the generated Python module
#[derive(Template)]
#[template(path = "typed_routes.py.txt", escape = "none")]
pub struct TypedRoutesTemplateData {
    /// Applications in command-line order
    pub apps: Vec<AppView>,
}

/// Names the generated module binds before any application is imported.
const RESERVED_BINDINGS: &[&str] = &["Literal", "overload", "str"];

impl TypedRoutesTemplateData {
    /// Build template data from extracted applications.
    ///
    /// Each application is imported under its attribute name unless that name is
    /// already bound in the module (a `typing` import, a generated function or an
    /// earlier application). It is then aliased as `<prefix>_<name>`, with a
    /// numeric suffix appended until the alias is free.
    pub fn new(apps: &[AppInfo]) -> Self {
        let mut bound: HashSet<String> = HashSet::new();
        bound.extend(RESERVED_BINDINGS.iter().map(|n| n.to_string()));
        for app in apps {
            bound.insert(format!("{}_url_path_for", app.prefix));
        }

        let mut views = Vec::with_capacity(apps.len());
        for app in apps {
            let (binding, import_line) = if bound.contains(&app.object_name) {
                let alias = free_alias(&bound, &format!("{}_{}", app.prefix, app.object_name));
                let line = format!(
                    "from {} import {} as {}",
                    app.import_path, app.object_name, alias
                );
                (alias, line)
            } else {
                let line = format!("from {} import {}", app.import_path, app.object_name);
                (app.object_name.clone(), line)
            };
            bound.insert(binding.clone());
            views.push(AppView {
                import_line,
                binding,
                prefix: app.prefix.clone(),
                routes: app
                    .routes
                    .iter()
                    .map(|r| RouteView {
                        literal: python_string_literal(&r.name),
                    })
                    .collect(),
            });
        }
        TypedRoutesTemplateData { apps: views }
    }
}

fn free_alias(bound: &HashSet<String>, base: &str) -> String {
    if !bound.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !bound.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Render the typed routes module for `apps`.
///
/// The result always ends with exactly one newline.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_module(apps: &[AppInfo]) -> anyhow::Result<String> {
    let mut rendered = TypedRoutesTemplateData::new(apps).render()?;
    let trimmed_len = rendered.trim_end_matches('\n').len();
    rendered.truncate(trimmed_len);
    rendered.push('\n');
    Ok(rendered)
}

/// Quote `s` as a double-quoted Python string literal.
pub fn python_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
