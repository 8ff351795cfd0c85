//! Human-readable rendering of batch results.
//!
//! Color is a plain value handed in by the caller; nothing here touches
//! process-wide state.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::core::batch::BatchReport;

/// Longest marker text shown before truncating with "...".
const MARKER_DISPLAY_CHARS: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, s: &str, f: impl Fn(&str) -> String) -> String {
        if self.color { f(s) } else { s.to_string() }
    }

    pub fn info(&self, s: &str) -> String {
        self.paint(s, |s| s.blue().to_string())
    }

    pub fn ok(&self, s: &str) -> String {
        self.paint(s, |s| s.green().to_string())
    }

    pub fn warn(&self, s: &str) -> String {
        self.paint(s, |s| s.yellow().to_string())
    }

    pub fn err(&self, s: &str) -> String {
        self.paint(s, |s| s.red().to_string())
    }

    pub fn head(&self, s: &str) -> String {
        self.paint(s, |s| s.cyan().bold().to_string())
    }
}

/// Char-safe truncation for long marker text.
pub fn shorten(marker: &str) -> String {
    match marker.char_indices().nth(MARKER_DISPLAY_CHARS) {
        Some((cut, _)) => format!("{}...", &marker[..cut]),
        None => marker.to_string(),
    }
}

/// Per-file lines followed by the summary block.
pub fn render_text(report: &BatchReport, palette: Palette, per_file: bool) -> String {
    let mut out = String::new();

    if per_file {
        for file in &report.files {
            let _ = writeln!(out, "{} {}", palette.info("[file]"), file.name);

            for marker in &file.result.removed_markers {
                let _ = writeln!(out, "  - removed: {}", shorten(marker));
            }
            if file.result.removed_markers.is_empty() {
                let _ = writeln!(out, "  - {}", palette.warn("no markers found"));
            }
            if file.result.blank_lines_collapsed > 0 {
                let _ = writeln!(
                    out,
                    "  - collapsed {} blank line(s)",
                    file.result.blank_lines_collapsed
                );
            }
            if file.result.directive_added {
                let _ = writeln!(out, "  - {}", palette.ok("directive added"));
            } else {
                let _ = writeln!(out, "  - {}", palette.warn("directive already present"));
            }

            if let Some(diff) = &file.diff {
                out.push_str(diff);
            }
        }
    }

    for failure in &report.failures {
        let _ = writeln!(
            out,
            "{} {} ({}): {}",
            palette.err("[error]"),
            failure.path.display(),
            failure.op,
            failure.error
        );
    }

    let s = &report.summary;
    let title = if report.dry_run { "Summary (dry run)" } else { "Summary" };
    let _ = writeln!(out, "{}", palette.head(title));
    let _ = writeln!(out, "  processed: {} / {}", s.processed, s.discovered);
    let verb = if report.dry_run { "would modify" } else { "modified" };
    let _ = writeln!(out, "  {verb}: {}", s.modified);
    let _ = writeln!(out, "  markers removed: {}", s.markers_removed);
    if s.failed > 0 {
        let _ = writeln!(out, "  {}", palette.err(&format!("failed: {}", s.failed)));
    }

    out
}
