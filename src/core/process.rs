//! Per-file processing: read, transform, write back only on change.

use std::path::{Path, PathBuf};

use serde::Serialize;
use similar::TextDiff;
use tracing::{debug, instrument};

use crate::core::transform::{Rules, TransformResult, transform};
use crate::error::{FileOp, MendError, Result};
use crate::infra::io::{read_text, write_atomic};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Compute everything, write nothing.
    pub dry_run: bool,
    /// Keep a unified diff of each change for display.
    pub diff: bool,
}

/// Outcome for one prompt file that was read successfully.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub name: String,
    #[serde(flatten)]
    pub result: TransformResult,
    /// True when the new content actually reached the disk.
    pub written: bool,
    #[serde(skip)]
    pub diff: Option<String>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run the pipeline over one file. A read failure means the file was
/// never processed; a write failure happens after processing.
#[instrument(level = "debug", skip(rules, opts), fields(file = %path.display()))]
pub fn process_file(path: &Path, rules: &Rules, opts: ProcessOptions) -> Result<FileReport> {
    let original = read_text(path).map_err(|source| MendError::FileAccess {
        path: path.to_path_buf(),
        op: FileOp::Read,
        source,
    })?;

    let out = transform(&original, rules);
    debug!(
        removed = out.result.removed_markers.len(),
        collapsed = out.result.blank_lines_collapsed,
        directive_added = out.result.directive_added,
        modified = out.result.modified,
        "transformed"
    );

    let diff = (opts.diff && out.result.modified).then(|| {
        let name = file_name(path);
        TextDiff::from_lines(original.as_str(), out.content.as_str())
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{name}"), &format!("b/{name}"))
            .to_string()
    });

    let mut written = false;
    if out.result.modified && !opts.dry_run {
        write_atomic(path, out.content.as_bytes()).map_err(|source| MendError::FileAccess {
            path: path.to_path_buf(),
            op: FileOp::Write,
            source,
        })?;
        written = true;
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        name: file_name(path),
        result: out.result,
        written,
        diff,
    })
}
