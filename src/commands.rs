//! Command implementations behind the CLI.
//!
//! Every command writes its report to the given sink so the binary prints
//! to stdout while tests capture the text.

use crate::cli::{Cli, Commands, ConfigAction};
use anyhow::{bail, Context};
use cutpath_core::Statistics;
use cutpath_geometry::ProcessingContext;
use cutpath_settings::Config;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Paths written by a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    pub statistics: Statistics,
    pub output: PathBuf,
    pub preview: Option<PathBuf>,
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Config { action } => run_config(cli.config.as_deref(), action, out),
        Commands::Convert {
            input,
            output,
            tolerance,
            preview,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let report = convert(
                &config,
                input,
                output.as_deref(),
                *tolerance,
                preview.as_deref(),
            )?;
            writeln!(out, "Wrote {}", report.output.display())?;
            if let Some(preview) = &report.preview {
                writeln!(out, "Preview {}", preview.display())?;
            }
            print_statistics(&report.statistics, out)
        }
        Commands::Stats {
            input,
            tolerance,
            json,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let stats = statistics(&config, input, *tolerance)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
                Ok(())
            } else {
                print_statistics(&stats, out)
            }
        }
    }
}

/// Explicit config file, or the default location with fallback to defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load_default().context("Failed to load default config"),
    }
}

fn processing_context(config: &Config, tolerance: Option<f64>) -> anyhow::Result<ProcessingContext> {
    let options = config.processing_options_with(tolerance);
    ProcessingContext::new(options).context("Invalid processing options")
}

/// Run the pipeline on `input` and export the trajectories.
pub fn convert(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    tolerance: Option<f64>,
    preview: Option<&Path>,
) -> anyhow::Result<ConvertReport> {
    let mut ctx = processing_context(config, tolerance)?;
    let statistics = ctx.process_file(input)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(config, input, "txt"),
    };
    let output = ctx
        .export_to_text(&output)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    let preview = match preview {
        Some(path) => Some(path.to_path_buf()),
        None if config.output.write_preview => Some(output.with_extension("svg")),
        None => None,
    };
    if let Some(path) = &preview {
        ctx.render_preview(Some(path))
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
    }

    Ok(ConvertReport {
        statistics,
        output,
        preview,
    })
}

/// Run the pipeline on `input` and return its statistics.
pub fn statistics(config: &Config, input: &Path, tolerance: Option<f64>) -> anyhow::Result<Statistics> {
    let mut ctx = processing_context(config, tolerance)?;
    Ok(ctx.process_file(input)?)
}

fn default_output_path(config: &Config, input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trajectories".to_string());
    config
        .output
        .output_directory
        .join(format!("{}.{}", stem, extension))
}

fn print_statistics(stats: &Statistics, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Segments:     {}", stats.original_segment_count)?;
    writeln!(out, "Clusters:     {}", stats.cluster_count)?;
    writeln!(out, "Trajectories: {}", stats.final_trajectory_count)?;
    writeln!(out, "Tolerance:    {}", stats.tolerance_used)?;
    Ok(())
}

fn run_config(path: Option<&Path>, action: &ConfigAction, out: &mut impl Write) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(path)?;
            write!(out, "{}", toml::to_string_pretty(&config)?)?;
        }
        ConfigAction::Init { force } => {
            let path = match path {
                Some(path) => path.to_path_buf(),
                None => Config::default_path()?,
            };
            if path.exists() && !force {
                bail!(
                    "Config file {} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to_file(&path)?;
            writeln!(out, "Wrote {}", path.display())?;
        }
    }
    Ok(())
}
