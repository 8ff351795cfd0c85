//! Pure content pipeline: filter → collapse → inject.
//!
//! No I/O happens here; the file processor feeds text in and decides
//! whether to write based on `TransformResult::modified`.

use serde::Serialize;

use crate::core::catalog::MarkerCatalog;
use crate::core::collapse::collapse_blank_runs;
use crate::core::filter::{filter_lines, split_lines};
use crate::core::inject::Directive;
use crate::error::{MendError, Result};

/// Catalog and directive, validated together.
#[derive(Debug, Clone)]
pub struct Rules {
    catalog: MarkerCatalog,
    directive: Directive,
}

impl Rules {
    /// A directive that a marker would strip could never stay injected,
    /// so that combination is rejected up front.
    pub fn new(catalog: MarkerCatalog, directive: Directive) -> Result<Self> {
        if let Some(marker) = catalog.first_match(directive.text()) {
            return Err(MendError::InvalidConfig(format!(
                "directive contains marker {marker:?} and would be removed on the next run"
            )));
        }
        Ok(Self { catalog, directive })
    }

    pub fn catalog(&self) -> &MarkerCatalog {
        &self.catalog
    }

    pub fn directive(&self) -> &Directive {
        &self.directive
    }
}

/// What changed in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    /// Marker that condemned each removed line, in line order.
    pub removed_markers: Vec<String>,
    /// Blank lines dropped by the collapser.
    pub blank_lines_collapsed: usize,
    pub directive_added: bool,
    pub modified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub content: String,
    pub result: TransformResult,
}

/// Run the three stages. When no stage reports a change the input is
/// returned untouched, line endings included.
pub fn transform(content: &str, rules: &Rules) -> Transformed {
    let lines = split_lines(content);
    let filtered = filter_lines(&lines, &rules.catalog);
    let (collapsed, blank_lines_collapsed) = collapse_blank_runs(&filtered.kept);

    let joined = collapsed.join("\n");
    let (injected, directive_added) = rules.directive.inject(&joined);

    let modified =
        !filtered.removed.is_empty() || blank_lines_collapsed > 0 || directive_added;
    let content = if modified {
        injected.into_owned()
    } else {
        content.to_string()
    };

    Transformed {
        content,
        result: TransformResult {
            removed_markers: filtered.removed,
            blank_lines_collapsed,
            directive_added,
            modified,
        },
    }
}
