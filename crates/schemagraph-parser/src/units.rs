//! Splitting multi-file input into named source units.
//!
//! Several files can be analyzed together by concatenating them with a
//! marker line in front of each one:
//!
//! ```text
//! // FILE: models/user.js
//! const UserSchema = new Schema({ ... });
//! // FILE: models/post.js
//! const PostSchema = new Schema({ ... });
//! ```
//!
//! Each unit is scanned on its own, and the declarations of all units share
//! one namespace.

const FILE_MARKER: &str = "// FILE:";

/// A contiguous piece of the input scanned as one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit<'a> {
    name: Option<&'a str>,
    text: &'a str,
    offset: usize,
}

impl<'a> SourceUnit<'a> {
    /// The name given by the unit's marker line, or `None` for text
    /// without a marker.
    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    /// The unit's text, excluding its marker line.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of [`text`](Self::text) within the full input.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Returns the unit name if `line` is a marker line.
fn marker_name(line: &str) -> Option<&str> {
    let name = line.trim_start().strip_prefix(FILE_MARKER)?.trim();
    (!name.is_empty()).then_some(name)
}

/// Split `input` into source units.
///
/// Input without marker lines is a single unnamed unit. Text before the
/// first marker becomes an unnamed unit of its own unless it is blank.
pub fn split_units(input: &str) -> Vec<SourceUnit<'_>> {
    let mut units = Vec::new();
    let mut current_name = None;
    let mut current_start = 0;
    let mut line_start = 0;

    for line in input.split_inclusive('\n') {
        let next_line_start = line_start + line.len();
        if let Some(name) = marker_name(line) {
            push_unit(&mut units, input, current_name, current_start, line_start);
            current_name = Some(name);
            current_start = next_line_start;
        }
        line_start = next_line_start;
    }
    push_unit(&mut units, input, current_name, current_start, input.len());

    log::debug!(units = units.len(); "Split input into source units");
    units
}

fn push_unit<'a>(
    units: &mut Vec<SourceUnit<'a>>,
    input: &'a str,
    name: Option<&'a str>,
    start: usize,
    end: usize,
) {
    let text = &input[start..end];
    if name.is_none() && text.trim().is_empty() {
        return;
    }
    units.push(SourceUnit {
        name,
        text,
        offset: start,
    });
}
