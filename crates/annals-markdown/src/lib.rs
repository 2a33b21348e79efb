//! Markdown collaborators for Annals.
//!
//! Line-based helpers over ATX headings, plus the plugin capability
//! implementations that wrap them:
//! - [`extract_section`] / [`MarkdownSections`]: the slice under one heading
//! - [`renumber_headings`] / [`HeadingShifter`]: shift a document's headings
//! - [`first_heading`]: the title of a README
//! - [`to_html`] / [`CmarkHtml`]: Markdown to HTML with `pulldown-cmark`

mod collaborators;
mod heading;
mod html;
mod section;

pub use collaborators::{CmarkHtml, HeadingShifter, MarkdownSections};
pub use heading::{Heading, first_heading, headings};
pub use html::to_html;
pub use section::{extract_section, renumber_headings};
