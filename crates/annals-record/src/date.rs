//! Release timestamps.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format of `git log --date=iso` timestamps.
const ISO_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Date-only format used by hand-written changelogs.
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// RFC 822 format used by RSS `pubDate`.
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// How dates are displayed in rendered headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `YYYY-MM-DD`.
    #[default]
    YearFirst,

    /// `DD.MM.YYYY`.
    DayFirst,

    /// The date exactly as it was read from the source.
    #[serde(other)]
    Passthrough,
}

impl From<&str> for DateFormat {
    fn from(value: &str) -> Self {
        match value {
            "year_first" => Self::YearFirst,
            "day_first" => Self::DayFirst,
            _ => Self::Passthrough,
        }
    }
}

/// A release timestamp.
///
/// The source text is kept verbatim: ordering compares that text, which is
/// monotonic with real time as long as all dates share the ISO layout.
/// Reformatting only happens when the text is one of the recognized layouts
/// (`YYYY-MM-DD HH:MM:SS ±ZZZZ` or `YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseDate(String);

enum Parsed {
    Full(DateTime<FixedOffset>),
    DateOnly(NaiveDate),
}

impl ReleaseDate {
    /// Creates a date from source text, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            Self(raw)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the date as read from the source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse(&self) -> Option<Parsed> {
        if let Ok(full) = DateTime::parse_from_str(&self.0, ISO_FORMAT) {
            return Some(Parsed::Full(full));
        }
        NaiveDate::parse_from_str(&self.0, DATE_ONLY_FORMAT)
            .ok()
            .map(Parsed::DateOnly)
    }

    /// Formats the date for display.
    ///
    /// Unrecognized dates are returned unchanged whatever the format.
    #[must_use]
    pub fn display(&self, format: DateFormat) -> String {
        let pattern = match format {
            DateFormat::YearFirst => "%Y-%m-%d",
            DateFormat::DayFirst => "%d.%m.%Y",
            DateFormat::Passthrough => return self.0.clone(),
        };

        match self.parse() {
            Some(Parsed::Full(full)) => full.format(pattern).to_string(),
            Some(Parsed::DateOnly(date)) => date.format(pattern).to_string(),
            None => self.0.clone(),
        }
    }

    /// Formats the date as RFC 822, as required by RSS `pubDate`.
    ///
    /// Date-only values are taken as midnight UTC. Returns `None` for
    /// unrecognized dates.
    #[must_use]
    pub fn rfc822(&self) -> Option<String> {
        match self.parse()? {
            Parsed::Full(full) => Some(full.format(RFC822_FORMAT).to_string()),
            Parsed::DateOnly(date) => {
                let midnight = date.and_hms_opt(0, 0, 0)?;
                Some(format!("{} +0000", midnight.format("%a, %d %b %Y %H:%M:%S")))
            }
        }
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReleaseDate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
