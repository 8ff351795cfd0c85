//! Batch runner: discover prompt files, process each, aggregate.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::core::process::{FileReport, ProcessOptions, process_file};
use crate::core::transform::Rules;
use crate::error::{FileOp, MendError, Result};
use crate::infra::walk::{FileWalker, WalkOutcome};

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub discovered: usize,
    pub processed: usize,
    pub modified: usize,
    pub failed: usize,
    pub markers_removed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub op: FileOp,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub prompt_dir: PathBuf,
    pub dry_run: bool,
    pub summary: BatchSummary,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

/// Where to look and what to do there.
#[derive(Debug, Clone)]
pub struct Batch<'a> {
    pub rules: &'a Rules,
    /// Prompt directory relative to the root.
    pub prompt_dir: &'a Path,
    pub extension: &'a str,
    pub options: ProcessOptions,
}

impl Batch<'_> {
    /// Enumerate candidates directly inside the prompt directory.
    /// A missing or unlistable directory fails before any file is touched.
    pub fn discover(&self, root: &Path) -> Result<(PathBuf, WalkOutcome)> {
        let dir = root.join(self.prompt_dir);
        if !dir.is_dir() {
            return Err(MendError::MissingPromptDir(dir));
        }
        if let Err(source) = fs::read_dir(&dir) {
            return Err(MendError::UnreadablePromptDir { path: dir, source });
        }

        let walker = FileWalker::for_extension(self.extension)
            .map_err(|e| MendError::InvalidConfig(format!("extension {:?}: {e}", self.extension)))?;
        let outcome = walker.walk_files(&dir);

        Ok((dir, outcome))
    }

    #[instrument(level = "info", skip(self), fields(root = %root.display()))]
    pub fn run(&self, root: &Path) -> Result<BatchReport> {
        let (dir, WalkOutcome { files, issues }) = self.discover(root)?;

        let mut report = BatchReport {
            prompt_dir: dir,
            dry_run: self.options.dry_run,
            summary: BatchSummary {
                discovered: files.len(),
                ..BatchSummary::default()
            },
            files: Vec::with_capacity(files.len()),
            failures: Vec::new(),
        };

        // Entries the walk could not read are failures, not an empty batch
        for issue in issues {
            report.summary.failed += 1;
            report.failures.push(FileFailure {
                path: issue.path,
                op: FileOp::Read,
                error: issue.error,
            });
        }

        if files.is_empty() {
            if report.failures.is_empty() {
                warn!(dir = %report.prompt_dir.display(), "no prompt files found");
            }
            return Ok(report);
        }

        for path in &files {
            match process_file(path, self.rules, self.options) {
                Ok(file) => {
                    report.summary.processed += 1;
                    report.summary.markers_removed += file.result.removed_markers.len();
                    if file.result.modified {
                        report.summary.modified += 1;
                    }
                    report.files.push(file);
                }
                Err(fatal) if fatal.is_fatal() => return Err(fatal),
                Err(MendError::FileAccess { path, op, source }) => {
                    // The read happened, so the file still counts as processed
                    if op == FileOp::Write {
                        report.summary.processed += 1;
                    }
                    report.summary.failed += 1;
                    warn!(file = %path.display(), %op, error = %source, "skipping file");
                    report.failures.push(FileFailure {
                        path,
                        op,
                        error: source.to_string(),
                    });
                }
                Err(other) => return Err(other),
            }
        }

        info!(
            discovered = report.summary.discovered,
            processed = report.summary.processed,
            modified = report.summary.modified,
            failed = report.summary.failed,
            "batch complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::MarkerCatalog;
    use crate::core::inject::Directive;
    use tempfile::TempDir;

    fn rules() -> Rules {
        Rules::new(
            MarkerCatalog::new(["[[draft]]", "INTERNAL:"]).unwrap(),
            Directive::new("Be brief.", None).unwrap(),
        )
        .unwrap()
    }

    fn batch(rules: &Rules) -> Batch<'_> {
        Batch {
            rules,
            prompt_dir: Path::new("prompts"),
            extension: "txt",
            options: ProcessOptions::default(),
        }
    }

    #[test]
    fn missing_prompt_dir_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let rules = rules();

        let err = batch(&rules).run(tmp.path()).unwrap_err();
        assert!(matches!(err, MendError::MissingPromptDir(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn empty_prompt_dir_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("prompts")).unwrap();
        fs::write(tmp.path().join("prompts/readme.md"), "not a prompt").unwrap();
        let rules = rules();

        let report = batch(&rules).run(tmp.path()).unwrap();
        assert_eq!(report.summary, BatchSummary::default());
        assert!(report.files.is_empty());
    }

    #[test]
    fn aggregates_counts_across_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("prompts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.txt"), "A\nINTERNAL: x\n[[draft]] y\n").unwrap();
        fs::write(dir.join("b.txt"), "B\nBe brief.\n").unwrap();
        fs::write(dir.join("c.txt"), "").unwrap();
        let rules = rules();

        let report = batch(&rules).run(tmp.path()).unwrap();

        assert_eq!(
            report.summary,
            BatchSummary {
                discovered: 3,
                processed: 3,
                modified: 2,
                failed: 0,
                markers_removed: 2,
            }
        );
        let names: Vec<_> = report.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(fs::read_to_string(dir.join("c.txt")).unwrap(), "Be brief.");
    }

    #[test]
    fn unreadable_file_is_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("prompts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("good.txt"), "Title\n").unwrap();
        fs::write(dir.join("bad.txt"), [0xff, 0xfe]).unwrap();
        let rules = rules();

        let report = batch(&rules).run(tmp.path()).unwrap();

        assert_eq!(report.summary.discovered, 2);
        assert_eq!(report.summary.processed, 1);
        assert_eq!(report.summary.modified, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.failures[0].op, FileOp::Read);
        assert!(report.failures[0].path.ends_with("bad.txt"));
    }

    #[cfg(unix)]
    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_counts_as_processed_not_modified() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("prompts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.txt"), "Title\n").unwrap();
        let rules = rules();

        // Readable but not writable: the atomic temp file cannot be created
        set_mode(&dir, 0o555);
        if fs::write(dir.join("write-check"), "").is_ok() {
            // Permission bits do not bind this user (root)
            set_mode(&dir, 0o755);
            return;
        }

        let report = batch(&rules).run(tmp.path());
        set_mode(&dir, 0o755);
        let report = report.unwrap();

        assert_eq!(report.summary.discovered, 1);
        assert_eq!(report.summary.processed, 1);
        assert_eq!(report.summary.modified, 0);
        assert_eq!(report.summary.failed, 1);
        assert!(report.files.is_empty());
        assert_eq!(report.failures[0].op, FileOp::Write);
        assert_eq!(fs::read_to_string(dir.join("a.txt")).unwrap(), "Title\n");
    }

    #[cfg(unix)]
    #[test]
    fn unlistable_prompt_dir_is_fatal_not_empty() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("prompts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.txt"), "Title\n").unwrap();
        let rules = rules();

        set_mode(&dir, 0o000);
        if fs::read_dir(&dir).is_ok() {
            set_mode(&dir, 0o755);
            return;
        }

        let result = batch(&rules).run(tmp.path());
        set_mode(&dir, 0o755);

        let err = result.unwrap_err();
        assert!(matches!(err, MendError::UnreadablePromptDir { .. }));
        assert!(err.is_fatal());
    }
}
