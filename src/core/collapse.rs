//! Blank-line collapser.

/// Whitespace-only lines count as empty.
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Drop every empty line that directly follows an empty line in the
/// output. Returns the surviving lines and how many were dropped.
pub fn collapse_blank_runs<'a>(lines: &[&'a str]) -> (Vec<&'a str>, usize) {
    let mut out: Vec<&'a str> = Vec::with_capacity(lines.len());
    let mut dropped = 0usize;
    let mut prev_blank = false;

    for &line in lines {
        let blank = is_blank(line);
        if blank && prev_blank {
            dropped += 1;
            continue;
        }
        out.push(line);
        prev_blank = blank;
    }

    (out, dropped)
}
