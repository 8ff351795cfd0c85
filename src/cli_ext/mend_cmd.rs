//! CLI command handlers for `run`, `check`, and `markers`.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::instrument;

use crate::cli::{AppContext, MarkersArgs, OutputFormat, RunArgs};
use crate::core::batch::{Batch, BatchReport};
use crate::core::process::ProcessOptions;
use crate::core::report::{Palette, render_text, shorten};
use crate::infra::config::load_config;

/// Rewrite the batch (honours global `--dry-run`).
pub fn run(
    args: RunArgs,
    ctx: &AppContext,
) -> Result<ExitCode>
{
    let report = execute(&args, ctx, ctx.dry_run)?;
    emit(&report, &args, ctx)?;

    Ok(if report.summary.failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Dry run that fails when anything would change.
pub fn check(
    args: RunArgs,
    ctx: &AppContext,
) -> Result<ExitCode>
{
    let report = execute(&args, ctx, true)?;
    emit(&report, &args, ctx)?;

    let pending = report.summary.modified > 0 || report.summary.failed > 0;
    Ok(if pending { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Print the catalog in match order.
pub fn markers(
    args: MarkersArgs,
    ctx: &AppContext,
) -> Result<ExitCode>
{
    let cfg = load_config(&args.root, ctx.config.as_deref())?;
    let rules = cfg.rules()?;

    match args.format
    {
        OutputFormat::Json =>
        {
            let output = json!({
                "markers": rules.catalog().iter().collect::<Vec<_>>(),
                "directive": rules.directive().text(),
                "fragment": rules.directive().fragment(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text =>
        {
            for (i, marker) in rules.catalog().iter().enumerate()
            {
                println!("{:>3}. {}", i + 1, shorten(marker));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[instrument(level = "debug", skip(ctx))]
fn execute(
    args: &RunArgs,
    ctx: &AppContext,
    dry_run: bool,
) -> Result<BatchReport>
{
    let cfg = load_config(&args.root, ctx.config.as_deref())?;
    let rules = cfg.rules()?;

    let batch = Batch {
        rules: &rules,
        prompt_dir: &cfg.prompt_dir,
        extension: &cfg.extension,
        options: ProcessOptions { dry_run, diff: args.diff },
    };

    let report = batch
        .run(&args.root)
        .with_context(|| format!("batch under {} aborted", args.root.display()))?;
    Ok(report)
}

fn emit(
    report: &BatchReport,
    args: &RunArgs,
    ctx: &AppContext,
) -> Result<()>
{
    match args.format
    {
        OutputFormat::Json =>
        {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text =>
        {
            let color = !ctx.no_color && std::io::stdout().is_terminal();
            print!("{}", render_text(report, Palette::new(color), !ctx.quiet));
        }
    }
    Ok(())
}
