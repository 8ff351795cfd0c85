//! Line filter: drops every line that contains a catalog marker.

use crate::core::catalog::MarkerCatalog;

/// Split text into logical lines on `\n`, treating trailing `\r`s as
/// part of the separator. Empty text has no lines.
pub fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    content
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .collect()
}

/// Output of one filter pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Filtered<'a> {
    /// Surviving lines, in input order.
    pub kept: Vec<&'a str>,
    /// One entry per dropped line: the first marker that condemned it.
    pub removed: Vec<String>,
}

/// Test each line against the catalog and keep the ones no marker hits.
pub fn filter_lines<'a>(lines: &[&'a str], catalog: &MarkerCatalog) -> Filtered<'a> {
    let mut out = Filtered {
        kept: Vec::with_capacity(lines.len()),
        removed: Vec::new(),
    };

    for &line in lines {
        match catalog.first_match(line) {
            Some(marker) => out.removed.push(marker.to_string()),
            None => out.kept.push(line),
        }
    }

    out
}
