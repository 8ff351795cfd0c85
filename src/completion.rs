//! Shell completions for `pmend`.
//!
//! Scripts go to stdout unless `--out-dir` names a directory, so
//! `pmend completions zsh > _pmend` works without extra flags.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell as CompletionShell, generate, generate_to};
use std::{fs, io};

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "pmend";

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

/// Completion script for `shell` as bytes.
pub fn render(shell: Shell) -> Vec<u8> {
    let mut buf = Vec::new();
    generate(
        CompletionShell::from(shell),
        &mut Cli::command(),
        BIN_NAME,
        &mut buf,
    );
    buf
}

pub fn run(args: CompletionsArgs, ctx: &AppContext) -> Result<()> {
    let Some(dir) = args.out_dir.filter(|_| !args.stdout) else {
        io::Write::write_all(&mut io::stdout(), &render(args.shell))
            .context("write completion to stdout")?;
        return Ok(());
    };

    fs::create_dir_all(&dir).context("create --out-dir")?;
    let path = generate_to(
        CompletionShell::from(args.shell),
        &mut Cli::command(),
        BIN_NAME,
        &dir,
    )
    .context("generate completion file")?;

    tracing::debug!(path = %path.display(), "completion written");
    if !ctx.quiet {
        eprintln!("Wrote completion to {}", path.display());
    }
    Ok(())
}
