use crate::config::ToolConfig;
use crate::error::CommandError;
use crate::extractor::{PythonExtractor, RouteExtractor};
use crate::generator::{format_module, render_module, write_module, FormatOutcome};
use crate::logging::{init_logging, LogConfig};
use crate::model::{resolve_prefixes, AppInfo, AppRef};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Command-line interface for the typed routes generator
///
/// Inspects one or more FastAPI applications and writes a Python module with
/// `{prefix}_url_path_for` functions overloaded on every route name.
#[derive(Parser, Debug)]
#[command(name = "generate-fastapi-typed-routes")]
#[command(
    version,
    about = "Generate typed url_path_for functions for FastAPI applications",
    long_about = None
)]
pub struct Cli {
    /// Python module path to a FastAPI app (e.g. 'myapp.main:api_app'). Can be repeated.
    #[arg(long = "app-module", value_name = "MODULE:ATTRIBUTE", required = true)]
    pub app_module: Vec<String>,

    /// Output path for the generated module, relative to --directory unless absolute
    #[arg(long)]
    pub output: PathBuf,

    /// Prefix for the generated function (default: the app variable name). Repeat once per --app-module, in the same order.
    #[arg(long)]
    pub prefix: Vec<String>,

    /// Directory containing the application modules
    #[arg(short = 'd', long, default_value = ".", value_parser = existing_dir)]
    pub directory: PathBuf,

    /// Python interpreter used to import the applications (overrides TYPED_ROUTES_PYTHON)
    #[arg(long, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Skip the ruff formatting pass
    #[arg(long, default_value_t = false)]
    pub no_format: bool,

    /// Print the generated module instead of writing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

fn existing_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(format!("directory '{value}' does not exist"));
    }
    if !path.is_dir() {
        return Err(format!("'{value}' is not a directory"));
    }
    Ok(path)
}

/// Validated arguments of one generation run
///
/// Building a plan performs every check that does not need the applications
/// themselves, so usage errors surface before any subprocess is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Parsed application references
    pub refs: Vec<AppRef>,
    /// One prefix per reference
    pub prefixes: Vec<String>,
    /// Import root for the extractor
    pub directory: PathBuf,
    /// Target file, already resolved against `directory`
    pub output: PathBuf,
    /// Print instead of writing
    pub dry_run: bool,
    /// Run the formatter after writing
    pub format: bool,
}

impl GenerationPlan {
    /// Validate `cli` into a plan.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Usage`] for malformed references or prefixes.
    pub fn from_cli(cli: &Cli) -> Result<Self, CommandError> {
        let refs = cli
            .app_module
            .iter()
            .map(|s| s.parse::<AppRef>())
            .collect::<Result<Vec<_>, _>>()?;
        let prefixes = resolve_prefixes(&refs, &cli.prefix)?;
        Ok(GenerationPlan {
            refs,
            prefixes,
            directory: cli.directory.clone(),
            output: cli.directory.join(&cli.output),
            dry_run: cli.dry_run,
            format: !cli.no_format,
        })
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Target path (not written on dry runs)
    pub output: PathBuf,
    /// Number of applications rendered
    pub app_count: usize,
    /// Number of overloads rendered across all applications
    pub route_count: usize,
    /// Outcome of the formatting pass
    pub format: FormatOutcome,
    /// Rendered module, only set on dry runs
    pub rendered: Option<String>,
}

/// Extract, render and write according to `plan`.
///
/// Nothing is written unless extraction succeeded for every application.
///
/// # Errors
///
/// Returns [`CommandError::Extraction`] when the extractor fails and
/// [`CommandError::Generation`] when rendering or writing fails. Formatter
/// failures are reported in [`GenerateReport::format`] instead.
pub fn execute(
    plan: &GenerationPlan,
    extractor: &dyn RouteExtractor,
    ruff: Option<&Path>,
) -> Result<GenerateReport, CommandError> {
    let extracted = extractor.extract(&plan.refs)?;
    if extracted.len() != plan.refs.len() {
        return Err(CommandError::Extraction(format!(
            "Extractor returned {} results for {} app modules",
            extracted.len(),
            plan.refs.len()
        )));
    }

    let apps: Vec<AppInfo> = extracted
        .into_iter()
        .zip(&plan.prefixes)
        .map(|(app, prefix)| AppInfo::new(app.import_path, app.name, prefix.clone(), app.routes))
        .collect();

    for app in &apps {
        let dups = app.duplicate_route_names();
        if !dups.is_empty() {
            tracing::warn!(
                app = %format!("{}:{}", app.import_path, app.object_name),
                routes = ?dups,
                "duplicate_route_names"
            );
        }
    }

    let route_count: usize = apps.iter().map(|a| a.routes.len()).sum();

    if plan.dry_run {
        let rendered = render_module(&apps)?;
        return Ok(GenerateReport {
            output: plan.output.clone(),
            app_count: apps.len(),
            route_count,
            format: FormatOutcome::Skipped,
            rendered: Some(rendered),
        });
    }

    write_module(&apps, &plan.output)?;

    let format = if plan.format {
        format_module(&plan.output, ruff)
    } else {
        FormatOutcome::Skipped
    };

    Ok(GenerateReport {
        output: plan.output.clone(),
        app_count: apps.len(),
        route_count,
        format,
        rendered: None,
    })
}

/// Run a parsed command line with the given environment configuration
///
/// # Errors
///
/// Returns the normalized [`CommandError`] of the first failing step.
pub fn run(cli: &Cli, config: &ToolConfig) -> Result<GenerateReport, CommandError> {
    tracing::info!(
        app_modules = ?cli.app_module,
        output = %cli.output.display(),
        directory = %cli.directory.display(),
        "starting_generation"
    );

    let plan = GenerationPlan::from_cli(cli)?;

    let interpreter = config
        .resolve_interpreter(cli.python.as_deref())
        .ok_or_else(|| {
            CommandError::Extraction(
                "No Python interpreter found. Activate your project's virtualenv, \
                 set TYPED_ROUTES_PYTHON, or pass --python <path>."
                    .to_string(),
            )
        })?;
    let extractor = PythonExtractor::new(interpreter, &plan.directory);

    let ruff = if plan.format {
        config.resolve_formatter()
    } else {
        None
    };

    execute(&plan, &extractor, ruff.as_deref()).inspect_err(|e| {
        tracing::debug!(error = %e, "generation_failed");
    })
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if the references are malformed, extraction fails, or the
/// module cannot be written.
pub fn run_cli() -> Result<(), CommandError> {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {e:#}");
    }

    let report = run(&cli, &ToolConfig::from_env())?;

    if let Some(rendered) = &report.rendered {
        print!("{rendered}");
        return Ok(());
    }
    if report.format == FormatOutcome::Formatted {
        println!("🎨 Reformatted {} with Ruff", report.output.display());
    }
    println!("✅ Generated typed routes at: {}", report.output.display());
    Ok(())
}
