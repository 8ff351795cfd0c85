//! Ordered catalog of literal line markers.
//!
//! Matching is plain, case-sensitive substring containment. Each marker
//! keeps a prebuilt `memmem` finder so a line scan is one SIMD search per
//! marker, tried strictly in catalog order.

use memchr::memmem::Finder;

use crate::error::{MendError, Result};

#[derive(Debug, Clone)]
struct Marker {
    text: String,
    finder: Finder<'static>,
}

/// Immutable, non-empty, ordered marker list.
#[derive(Debug, Clone)]
pub struct MarkerCatalog {
    markers: Vec<Marker>,
}

impl MarkerCatalog {
    /// Build a catalog; rejects an empty list, empty markers, and markers
    /// carrying line-break characters (lines never contain them).
    pub fn new<I, S>(markers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Vec::new();
        for (idx, raw) in markers.into_iter().enumerate() {
            let text: String = raw.into();
            if text.is_empty() {
                return Err(MendError::InvalidConfig(format!(
                    "marker #{} is empty",
                    idx + 1
                )));
            }
            if text.contains('\n') || text.contains('\r') {
                return Err(MendError::InvalidConfig(format!(
                    "marker #{} contains a line break",
                    idx + 1
                )));
            }
            let finder = Finder::new(text.as_bytes()).into_owned();
            out.push(Marker { text, finder });
        }

        if out.is_empty() {
            return Err(MendError::InvalidConfig(
                "marker catalog is empty".to_string(),
            ));
        }

        Ok(Self { markers: out })
    }

    /// First marker (in catalog order) contained in `line`.
    pub fn first_match(&self, line: &str) -> Option<&str> {
        self.markers
            .iter()
            .find(|m| m.finder.find(line.as_bytes()).is_some())
            .map(|m| m.text.as_str())
    }

    /// Markers in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(|m| m.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
