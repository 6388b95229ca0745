use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::templates::render_module;
use crate::model::AppInfo;

/// Render `apps` and replace `output_path` with the result.
///
/// Missing parent directories are created. The module is written to a temporary
/// file next to the target and renamed over it, so the target either keeps its
/// previous content or holds the complete new module. An existing target keeps
/// its permissions.
///
/// # Errors
///
/// Returns an error if rendering, directory creation or the write fails.
pub fn write_module(apps: &[AppInfo], output_path: &Path) -> anyhow::Result<()> {
    tracing::info!(
        output_path = %output_path.display(),
        app_count = apps.len(),
        "generating_module"
    );

    let rendered = render_module(apps)
        .context("Failed to render typed routes module")?;

    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {parent:?}"))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {parent:?}"))?;
    tmp.write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write {output_path:?}"))?;

    let permissions = match fs::metadata(output_path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to set permissions on {output_path:?}"))?;
    }

    tmp.persist(output_path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {output_path:?}"))?;

    let total_routes: usize = apps.iter().map(|a| a.routes.len()).sum();
    tracing::info!(
        output_path = %output_path.display(),
        total_routes,
        "module_generated"
    );
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
