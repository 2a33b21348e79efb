//! ATX heading detection.

/// Deepest Markdown heading level.
pub(crate) const MAX_LEVEL: u8 = 6;

/// An ATX heading line of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Zero-based line index in the document.
    pub index: usize,

    /// Heading level, 1 to 6.
    pub level: u8,

    /// Heading text without markers or surrounding whitespace.
    pub content: &'a str,

    /// The full line as written.
    pub line: &'a str,
}

impl<'a> Heading<'a> {
    /// Parses a line as an ATX heading.
    ///
    /// The marker must start at column 0 and be followed by whitespace or
    /// the end of the line. An optional closing `#` sequence is removed
    /// from the content.
    #[must_use]
    pub fn parse(index: usize, line: &'a str) -> Option<Self> {
        let level = line.bytes().take_while(|&b| b == b'#').count();
        if level == 0 || level > usize::from(MAX_LEVEL) {
            return None;
        }

        let rest = &line[level..];
        if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
            return None;
        }

        let mut content = rest.trim();
        let closing = content.trim_end_matches('#');
        if closing.is_empty() {
            content = "";
        } else if closing.len() < content.len() && closing.ends_with([' ', '\t']) {
            content = closing.trim_end();
        }

        Some(Self {
            index,
            level: u8::try_from(level).ok()?,
            content,
            line,
        })
    }
}

/// Tracks fenced code blocks while walking lines.
#[derive(Debug, Default)]
pub(crate) struct Fences {
    open: Option<(char, usize)>,
}

impl Fences {
    /// Feeds the next line and returns true if it belongs to a code block,
    /// fence lines included.
    pub(crate) fn is_code(&mut self, line: &str) -> bool {
        let indent = line.len() - line.trim_start_matches(' ').len();
        let fence = if indent <= 3 {
            fence_run(&line[indent..])
        } else {
            None
        };

        match (self.open, fence) {
            (None, Some((marker, len, _))) => {
                self.open = Some((marker, len));
                true
            }
            (Some((open, open_len)), Some((marker, len, rest)))
                if marker == open && len >= open_len && rest.trim().is_empty() =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}

fn fence_run(line: &str) -> Option<(char, usize, &str)> {
    let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some((marker, len, &line[len..]))
}

/// Returns the headings of a document, skipping fenced code blocks.
pub fn headings(text: &str) -> impl Iterator<Item = Heading<'_>> {
    let mut fences = Fences::default();
    text.lines().enumerate().filter_map(move |(index, line)| {
        if fences.is_code(line) {
            None
        } else {
            Heading::parse(index, line)
        }
    })
}

/// Returns the content of the first heading of any level.
#[must_use]
pub fn first_heading(text: &str) -> Option<String> {
    headings(text)
        .map(|h| h.content)
        .find(|content| !content.is_empty())
        .map(String::from)
}

/// Rewrites a heading line at another level.
pub(crate) fn relevel(heading: &Heading<'_>, level: u8) -> String {
    let markers = "#".repeat(usize::from(level));
    format!("{markers}{}", &heading.line[usize::from(heading.level)..])
}

/// Shifts `level` by `to - from`, clamped to valid heading levels.
pub(crate) fn shifted(level: u8, from: u8, to: u8) -> u8 {
    if to >= from {
        level.saturating_add(to - from).min(MAX_LEVEL)
    } else {
        level.saturating_sub(from - to).max(1)
    }
}
