//! `<history>` directives embedded in Markdown documents.
//!
//! A directive is either self-closing (`<history repos="..." />`) or a
//! paired tag whose body is discarded (`<history ...>old output</history>`).
//! Its attributes override the configured defaults for that one occurrence.

use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use annals_config::Config;
use annals_record::DateFormat;
use regex::Regex;
use tracing::{debug, warn};

use crate::{CoreError, CoreResult};

/// Matches a whole directive; group 1 holds the raw attribute list.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<history((?:\s+[A-Za-z_][\w-]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|(?:[^\s"'/>]|/[^\s"'>])+))?)*)\s*(?:/>|>.*?</history\s*>)"#,
    )
    .expect("invalid regex")
});

/// Start of anything that looks like a directive.
static OPENING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<history[\s/>]").expect("invalid regex"));

/// Matches one attribute: `key="v"`, `key='v'`, `key=v` or a bare `key`.
///
/// An unquoted value may contain `/`, except right before the closing `>`.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([A-Za-z_][\w-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|((?:[^\s"'/>]|/[^\s"'>])+)))?"#,
    )
    .expect("invalid regex")
});

/// A directive found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Byte range of the whole tag, body included.
    pub range: Range<usize>,

    /// Attributes in source order. Bare attributes carry `"true"`.
    pub attributes: Vec<(String, String)>,
}

/// Finds every directive in `content`, in document order.
///
/// Tags that look like directives but do not parse are left in place and
/// logged.
pub fn find_directives(content: &str) -> Vec<Directive> {
    let directives: Vec<Directive> = DIRECTIVE_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let raw = caps.get(1).map_or("", |m| m.as_str());
            Some(Directive {
                range: whole.range(),
                attributes: parse_attributes(raw),
            })
        })
        .collect();

    for opening in OPENING_RE.find_iter(content) {
        let offset = opening.start();
        if !directives.iter().any(|d| d.range.contains(&offset)) {
            let line = content[..offset].matches('\n').count() + 1;
            warn!(line, "malformed history directive left unchanged");
        }
    }

    directives
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE_RE
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("true", |m| m.as_str());
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

/// Returns `base` with a directive's attributes applied.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDirective`] if a boolean or numeric attribute
/// does not parse, or [`CoreError::Config`] if the result is out of range.
pub fn apply_attributes(base: &Config, attributes: &[(String, String)]) -> CoreResult<Config> {
    let mut config = base.clone();
    let history = &mut config.history;
    let rss = &mut config.rss;

    for (key, value) in attributes {
        match key.as_str() {
            "repos" => {
                history.repos = value
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "revision" => history.revision.clone_from(value),
            "from" => history.from.clone_from(value),
            "changelog" => history.changelog.clone_from(value),
            "readme" => history.readme.clone_from(value),
            "name_from_readme" => history.name_from_readme = parse_bool(key, value)?,
            "merge_commits" => history.merge_commits = parse_bool(key, value)?,
            "source_heading_level" => history.source_heading_level = parse_number(key, value)?,
            "target_heading_level" => history.target_heading_level = parse_number(key, value)?,
            "target_heading_template" => history.target_heading_template.clone_from(value),
            "date_format" => history.date_format = DateFormat::from(value.as_str()),
            "limit" => history.limit = parse_number(key, value)?,
            "rss" => rss.enabled = parse_bool(key, value)?,
            "rss_file" => rss.file.clone_from(value),
            "rss_title" => rss.title.clone_from(value),
            "rss_link" => rss.link.clone_from(value),
            "rss_description" => rss.description.clone_from(value),
            "rss_language" => rss.language.clone_from(value),
            "rss_item_title_template" => rss.item_title_template.clone_from(value),
            _ => warn!(attribute = %key, "unknown history attribute ignored"),
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_bool(key: &str, value: &str) -> CoreResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CoreError::InvalidDirective(format!(
            "{key}: expected a boolean, got {value}"
        ))),
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> CoreResult<T> {
    value.trim().parse().map_err(|_| {
        CoreError::InvalidDirective(format!("{key}: expected a number, got {value}"))
    })
}

/// Replaces every directive in `content` with the output of `render`.
///
/// `render` receives the configuration for each occurrence. Text outside
/// the directives is kept byte for byte.
///
/// # Errors
///
/// Returns the first error from attribute handling or from `render`.
pub fn process_directives<F, E>(content: &str, base: &Config, mut render: F) -> Result<String, E>
where
    F: FnMut(&Config) -> Result<String, E>,
    E: From<CoreError>,
{
    let directives = find_directives(content);
    if directives.is_empty() {
        return Ok(content.to_string());
    }
    debug!(count = directives.len(), "history directives found");

    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    for directive in directives {
        let config = apply_attributes(base, &directive.attributes)?;
        output.push_str(&content[cursor..directive.range.start]);
        output.push_str(&render(&config)?);
        cursor = directive.range.end;
    }
    output.push_str(&content[cursor..]);

    Ok(output)
}
