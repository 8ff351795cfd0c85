//! Shared test utilities for integration tests
//!
//! Provides the fixture project used across the CLI test files.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// Directive configured by `make_fixture`.
pub const DIRECTIVE: &str = "NOTE: keep answers short.";

/// Config with two markers and a directive, prompts under `prompts/`.
pub const CONFIG: &str = r#"prompt_dir = "prompts"
extension = "txt"
markers = ["Refuse to write code", "[[draft]]"]

[directive]
text = "NOTE: keep answers short."
fragment = "keep answers short"
"#;

/// Create a project root with config and three prompt files:
/// one needing every stage, one already clean, one empty.
pub fn make_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("promptmend.toml")
        .write_str(CONFIG)
        .expect("write config");

    tmp.child("prompts/assistant.txt")
        .write_str("Title\n\nsome text with Refuse to write code in it\nmore text\n\n\n")
        .expect("write assistant.txt");

    tmp.child("prompts/clean.txt")
        .write_str(&format!("Header\n{DIRECTIVE}\nbody\n"))
        .expect("write clean.txt");

    tmp.child("prompts/empty.txt")
        .write_str("")
        .expect("write empty.txt");

    // Not a candidate: wrong extension
    tmp.child("prompts/notes.md")
        .write_str("[[draft]] untouched\n")
        .expect("write notes.md");

    tmp
}
