//! Filepath: src/infra/walk.rs
//! Candidate file discovery for a batch.
//! - Candidates are regular files named `*.<ext>` directly inside one directory
//! - Dotfiles count; ignore files (.gitignore etc.) are not consulted, since
//!   prompt files are often untracked and must still be found
//! - Deterministic ordering for stable tests/CI
//! - Entries the walker cannot read come back to the caller, never dropped
//!
//! Backed by ripgrep's `ignore` crate and `globset`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// One directory entry the walk could not read.
#[derive(Debug, Clone)]
pub struct WalkIssue
{
    /// Offending path, or the walk root when the error carries none
    pub path: PathBuf,

    pub error: String,
}

/// Matching files (sorted) plus every entry that failed along the way.
#[derive(Debug, Default)]
pub struct WalkOutcome
{
    pub files: Vec<PathBuf>,
    pub issues: Vec<WalkIssue>,
}

/// Flat walker selecting regular files whose name matches the include glob.
pub struct FileWalker
{
    /// Compiled include pattern (file-name match)
    include: GlobSet,
}

impl FileWalker
{
    /// Walker for every `*.<ext>` file directly inside a directory.
    pub fn for_extension(ext: &str) -> Result<Self>
    {
        let ext = ext.trim_start_matches('.');

        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new(&format!("*.{ext}"))?);

        Ok(Self {
            include: builder.build()?,
        })
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // No hidden-file or ignore-file filtering at all
        b.standard_filters(false);

        b.follow_links(false);
        b.max_depth(Some(1));

        b
    }

    /// Traverse `root` and return matching regular files, **sorted**,
    /// together with the entries that could not be read.
    pub fn walk_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> WalkOutcome
    {
        let root_path = root.as_ref();
        let walker = self
            .build_walk(root_path)
            .build();

        let mut outcome = WalkOutcome::default();

        for res in walker
        {
            let entry = match res
            {
                Ok(entry) => entry,
                Err(err) =>
                {
                    let path = error_path(&err).unwrap_or(root_path).to_path_buf();
                    tracing::warn!(path = %path.display(), error = %err, "walk entry unreadable");
                    outcome.issues.push(WalkIssue {
                        path,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            // Keep only regular files
            if !entry
                .file_type()
                .is_some_and(|ft| ft.is_file())
            {
                continue;
            }

            let path = entry.into_path();
            if path
                .file_name()
                .is_some_and(|name| self.include.is_match(name))
            {
                outcome.files.push(path);
            }
        }

        // Deterministic order (stable CLI & tests)
        outcome.files.sort();

        outcome
    }
}

/// Dig the offending path out of a (possibly wrapped) walk error.
fn error_path(err: &ignore::Error) -> Option<&Path>
{
    match err
    {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } =>
        {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}
