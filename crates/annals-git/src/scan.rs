//! Line scanner for `git log` and `git show` output.
//!
//! Every line is classified by what it can legally be in the current state,
//! so message text that happens to look like a header or a date never splits
//! a commit: commit messages are indented by git, and patch lines always carry
//! a one-character prefix, leaving unindented `commit <id>` lines as the only
//! block boundary.

/// Length of a full hexadecimal commit id.
const COMMIT_ID_LEN: usize = 40;

/// One commit block of `git log` or `git show` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry<'a> {
    /// The full commit id.
    pub id: &'a str,

    /// The `Date:` value, if the header carried one.
    pub date: Option<&'a str>,

    /// Message lines as printed by git, indentation included.
    pub message: Vec<&'a str>,

    /// Lines added by the patch, without the leading `+`.
    pub added: Vec<&'a str>,
}

impl<'a> LogEntry<'a> {
    fn new(id: &'a str) -> Self {
        Self {
            id,
            date: None,
            message: Vec::new(),
            added: Vec::new(),
        }
    }

    /// Returns the abbreviated commit id (first 8 characters).
    #[must_use]
    pub fn short_id(&self) -> &'a str {
        &self.id[..8.min(self.id.len())]
    }

    /// Returns the message with git's indentation removed.
    #[must_use]
    pub fn message_text(&self) -> String {
        strip_message_indent(&self.message)
    }
}

/// The parsed output of `git show <tag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutput<'a> {
    /// An annotated tag: the tag object's own date and message.
    AnnotatedTag {
        /// The tag name from the `tag` header.
        name: &'a str,
        /// The `Date:` value of the tag header.
        date: &'a str,
        /// The annotation lines, unindented.
        annotation: Vec<&'a str>,
    },

    /// A lightweight tag: the commit it points at.
    Commit(LogEntry<'a>),
}

/// What a single line can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    CommitHeader(&'a str),
    Date(&'a str),
    DiffStart,
    HunkStart,
    Blank,
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(id) = commit_header(line) {
        Line::CommitHeader(id)
    } else if let Some(date) = line.strip_prefix("Date:") {
        Line::Date(date.trim())
    } else if line.starts_with("diff --git ")
        || line.starts_with("diff --cc ")
        || line.starts_with("diff --combined ")
    {
        Line::DiffStart
    } else if line.starts_with("@@") {
        Line::HunkStart
    } else if line.trim().is_empty() {
        Line::Blank
    } else {
        Line::Text(line)
    }
}

/// Returns the commit id if the line is a `commit <40 hex>` header.
///
/// Decorations after the id (`commit <id> (tag: v1)`) are allowed.
fn commit_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("commit ")?;
    let id = rest.get(..COMMIT_ID_LEN)?;
    if !id.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()) {
        return None;
    }
    match rest.as_bytes().get(COMMIT_ID_LEN) {
        None | Some(b' ') => Some(id),
        Some(_) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Header,
    Message,
    Patch { in_hunk: bool },
}

/// Parses `git log` output (with or without `--patch`) into commit blocks.
///
/// Text before the first commit header is ignored.
#[must_use]
pub fn parse_log(text: &str) -> Vec<LogEntry<'_>> {
    let mut entries = Vec::new();
    let mut current: Option<LogEntry<'_>> = None;
    let mut state = State::Outside;

    for raw in text.lines() {
        let line = classify(raw);

        if let Line::CommitHeader(id) = line {
            if let Some(entry) = current.take() {
                entries.push(finish(entry));
            }
            current = Some(LogEntry::new(id));
            state = State::Header;
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        state = match (state, line) {
            (State::Header, Line::Date(date)) => {
                entry.date = Some(date);
                State::Header
            }
            (State::Header, Line::Blank) => State::Message,
            (State::Header | State::Message | State::Patch { .. }, Line::DiffStart) => {
                State::Patch { in_hunk: false }
            }
            (State::Message, _) => {
                entry.message.push(raw);
                State::Message
            }
            (State::Patch { .. }, Line::HunkStart) => State::Patch { in_hunk: true },
            (State::Patch { in_hunk: true }, _) => {
                if let Some(added) = raw.strip_prefix('+') {
                    entry.added.push(added);
                }
                state
            }
            (other, _) => other,
        };
    }

    if let Some(entry) = current.take() {
        entries.push(finish(entry));
    }

    entries
}

fn finish(mut entry: LogEntry<'_>) -> LogEntry<'_> {
    while entry.message.last().is_some_and(|line| line.trim().is_empty()) {
        entry.message.pop();
    }
    entry
}

/// Parses `git show` output for the tag `tag_name`.
///
/// Annotated tags are recognized by a leading `tag <name>` header; the
/// annotation runs up to the first commit header. Output that starts with a
/// commit header is a lightweight tag. Anything else yields `None`.
#[must_use]
pub fn parse_show<'a>(text: &'a str, tag_name: &str) -> Option<ShowOutput<'a>> {
    let first = text.lines().next()?;

    if let Some(name) = first.strip_prefix("tag ")
        && name == tag_name
    {
        return parse_annotated_tag(text, name);
    }

    if commit_header(first).is_some() {
        return parse_log(text).into_iter().next().map(ShowOutput::Commit);
    }

    None
}

fn parse_annotated_tag<'a>(text: &'a str, name: &'a str) -> Option<ShowOutput<'a>> {
    let mut lines = text.lines().skip(1);
    let mut date = None;

    for line in lines.by_ref() {
        match classify(line) {
            Line::Date(value) => date = Some(value),
            Line::Blank => break,
            _ => {}
        }
    }

    let date = date?;
    let mut annotation: Vec<&str> = lines
        .take_while(|line| commit_header(line).is_none())
        .collect();

    while annotation.last().is_some_and(|line| line.trim().is_empty()) {
        annotation.pop();
    }

    Some(ShowOutput::AnnotatedTag {
        name,
        date,
        annotation,
    })
}

/// Removes the four-space indentation git puts before message lines.
///
/// Lines whose text starts with `#` keep their indentation, so they are never
/// promoted to Markdown headings. Trailing whitespace is trimmed from the result.
#[must_use]
pub fn strip_message_indent(lines: &[&str]) -> String {
    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| match line.strip_prefix("    ") {
            Some(rest) if !rest.starts_with('#') => rest,
            _ => line,
        })
        .collect();

    stripped.join("\n").trim_end().to_string()
}
