//! Idempotent directive injection after the first line.

use std::borrow::Cow;

use crate::error::{MendError, Result};

/// A single directive line plus the fragment whose presence marks it as
/// already injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    text: String,
    fragment: String,
}

impl Directive {
    /// `fragment` defaults to the whole text and must occur inside it.
    pub fn new(text: impl Into<String>, fragment: Option<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MendError::InvalidConfig("directive text is empty".into()));
        }
        if text.contains('\n') || text.contains('\r') {
            return Err(MendError::InvalidConfig(
                "directive must be a single line".into(),
            ));
        }

        let fragment = fragment.unwrap_or_else(|| text.clone());
        if fragment.is_empty() {
            return Err(MendError::InvalidConfig(
                "directive fragment is empty".into(),
            ));
        }
        if !text.contains(&fragment) {
            return Err(MendError::InvalidConfig(format!(
                "directive fragment {fragment:?} does not occur in the directive text"
            )));
        }

        Ok(Self { text, fragment })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn is_present_in(&self, content: &str) -> bool {
        content.contains(&self.fragment)
    }

    /// Insert the directive after the first line unless its fragment is
    /// already present. An empty input becomes the bare directive.
    pub fn inject<'a>(&self, content: &'a str) -> (Cow<'a, str>, bool) {
        if self.is_present_in(content) {
            return (Cow::Borrowed(content), false);
        }
        if content.is_empty() {
            return (Cow::Owned(self.text.clone()), true);
        }

        let mut out = String::with_capacity(content.len() + self.text.len() + 2);
        match content.split_once('\n') {
            Some((first, rest)) => {
                out.push_str(first);
                out.push('\n');
                out.push_str(&self.text);
                out.push('\n');
                out.push_str(rest);
            }
            None => {
                out.push_str(content);
                out.push('\n');
                out.push_str(&self.text);
            }
        }

        (Cow::Owned(out), true)
    }
}
