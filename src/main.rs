use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use promptmend::cli::{AppContext, Cli, Commands};
use promptmend::cli_ext::mend_cmd;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    promptmend::infra::logging::init_cli_logger(cli.verbose);

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        config: cli.config,
    };

    match cli.command {
        Commands::Run(args) => mend_cmd::run(args, &ctx),
        Commands::Check(args) => mend_cmd::check(args, &ctx),
        Commands::Markers(args) => mend_cmd::markers(args, &ctx),
        Commands::Init(args) => {
            promptmend::infra::config::init(args, &ctx)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions(args) => {
            promptmend::completion::run(args, &ctx)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
