//! Line-oriented magic directive splitting.
//!
//! A block of code is split into ordered segments before any interpreter
//! interaction: plain code runs through the interpreter, `%table <expr>`
//! asks this layer for structured output, and any other `%name` line is
//! an unknown directive surfaced as an error when reached in order.

use std::sync::OnceLock;

use regex_lite::Regex;

/// One segment of a submitted block, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Consecutive non-magic lines, newline-terminated.
    Code(String),
    /// A `%table` line; the argument text, trimmed.
    TableDirective(String),
    /// A magic line naming a directive this layer does not know.
    UnknownDirective { name: String },
}

fn magic_line() -> &'static Regex {
    static MAGIC: OnceLock<Regex> = OnceLock::new();
    MAGIC.get_or_init(|| {
        Regex::new(r"^\s*%(\w+)\s*(.*)$").expect("magic directive pattern compiles")
    })
}

/// Split a block line-wise into segments. Whitespace-only code segments
/// are dropped; magic recognition requires the `%` to start the line
/// (leading whitespace allowed), so `50 % 3` stays code.
pub(crate) fn split_segments(code: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    let mut flush = |current: &mut String, segments: &mut Vec<Segment>| {
        if !current.trim().is_empty() {
            segments.push(Segment::Code(std::mem::take(current)));
        } else {
            current.clear();
        }
    };

    for line in code.lines() {
        if let Some(caps) = magic_line().captures(line) {
            flush(&mut current, &mut segments);
            let name = &caps[1];
            if name == "table" {
                segments.push(Segment::TableDirective(caps[2].trim().to_string()));
            } else {
                segments.push(Segment::UnknownDirective {
                    name: name.to_string(),
                });
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    flush(&mut current, &mut segments);

    segments
}
