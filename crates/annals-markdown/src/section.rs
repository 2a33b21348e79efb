//! Section extraction and heading renumbering.

use crate::heading::{Heading, MAX_LEVEL, headings, relevel, shifted};

/// Returns the text under the first heading whose content is `from_heading`.
///
/// The section ends before the next heading of the same or a shallower
/// level. With `set_head_level`, every heading of the section is shifted so
/// the matched heading lands at that level (deeper ones follow, clamped to
/// 1..=6). With `strip_heading`, the matched heading line is left out.
/// Surrounding blank lines are trimmed. A heading that is not found yields
/// an empty string.
#[must_use]
pub fn extract_section(
    text: &str,
    from_heading: &str,
    set_head_level: Option<u8>,
    strip_heading: bool,
) -> String {
    let wanted = from_heading.trim();
    let all: Vec<Heading<'_>> = headings(text).collect();
    let Some(start) = all.iter().position(|h| h.content == wanted) else {
        return String::new();
    };

    let head = all[start];
    let end = all[start + 1..]
        .iter()
        .find(|h| h.level <= head.level)
        .map(|h| h.index);
    let target = set_head_level.map_or(head.level, |level| level.clamp(1, MAX_LEVEL));
    let first = if strip_heading {
        head.index + 1
    } else {
        head.index
    };

    let mut inner = all[start..]
        .iter()
        .filter(|h| h.index >= first && Some(h.index) != end)
        .peekable();

    let mut lines: Vec<String> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if index < first {
            continue;
        }
        if Some(index) == end {
            break;
        }
        match inner.next_if(|h| h.index == index) {
            Some(h) => lines.push(relevel(h, shifted(h.level, head.level, target))),
            None => lines.push(line.to_string()),
        }
    }

    let Some(from) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let to = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(from);

    lines[from..=to].join("\n")
}

/// Shifts every heading so the shallowest one lands at `target_level`.
///
/// Deeper headings keep their distance from the shallowest one, clamped to
/// level 6. Text without headings is returned unchanged, as are line
/// endings.
#[must_use]
pub fn renumber_headings(text: &str, target_level: u8) -> String {
    let found: Vec<Heading<'_>> = headings(text).collect();
    let Some(min) = found.iter().map(|h| h.level).min() else {
        return text.to_string();
    };
    let target = target_level.clamp(1, MAX_LEVEL);
    if min == target {
        return text.to_string();
    }

    let mut found = found.into_iter().peekable();
    let mut out = String::with_capacity(text.len() + found.len() * 2);
    for (index, line) in text.split_inclusive('\n').enumerate() {
        match found.next_if(|h| h.index == index) {
            Some(h) => {
                out.push_str(&relevel(&h, shifted(h.level, min, target)));
                out.push_str(&line[h.line.len()..]);
            }
            None => out.push_str(line),
        }
    }
    out
}
