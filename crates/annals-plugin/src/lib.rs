//! Plugin system for Annals.
//!
//! This crate provides the plugin traits and infrastructure:
//! - [`Plugin`]: Base trait for all plugins
//! - [`HistorySource`]: Mines release records from a checkout
//! - [`HistoryRenderer`]: Turns sorted records into a document
//! - [`SectionExtractor`], [`HeadingRenumberer`], [`HtmlRenderer`]: Markdown
//!   collaborators injected into sources and renderers
//! - [`Template`]: Heading and title templates with `%name%` placeholders

mod error;
mod template;
mod traits;

pub use annals_git::RepoSync;
pub use error::{PluginError, PluginResult};
pub use template::{Template, TemplateValues};
pub use traits::Plugin;
pub use traits::capability::{HeadingRenumberer, HtmlRenderer, SectionExtractor};
pub use traits::renderer::HistoryRenderer;
pub use traits::source::HistorySource;
