//! RSS 2.0 feed renderer plugin.
//!
//! Every record becomes an `<item>` whose GUID is the channel link plus a
//! 128-bit hash of the record content, so feed readers see a new item only
//! when a release actually changes.

use std::fmt::Display;

use annals_plugin::{
    HistoryRenderer, HtmlRenderer, Plugin, PluginError, PluginResult, Template, TemplateValues,
};
use annals_record::ReleaseRecord;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use xxhash_rust::xxh3::xxh3_128;

/// Atom namespace used for the self link.
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Channel metadata.
#[derive(Debug, Clone)]
pub struct RssChannel {
    /// Channel title.
    pub title: String,

    /// Channel link, also the GUID prefix.
    pub link: String,

    /// Channel description.
    pub description: String,

    /// Channel language.
    pub language: String,

    /// Feed file name, appended to the link for the self reference.
    pub file: String,

    /// Item title template.
    pub item_title: Template,

    /// Maximum number of items; 0 includes every record.
    pub limit: usize,
}

impl Default for RssChannel {
    fn default() -> Self {
        Self {
            title: "History of Releases".to_string(),
            link: String::new(),
            description: String::new(),
            language: "en-US".to_string(),
            file: "rss.xml".to_string(),
            item_title: Template::parse("%repo% %version%"),
            limit: 0,
        }
    }
}

impl RssChannel {
    /// Returns the feed's own URL: the link and file joined by one slash.
    #[must_use]
    pub fn self_link(&self) -> String {
        format!(
            "{}/{}",
            self.link.trim_end_matches('/'),
            self.file.trim_start_matches('/')
        )
    }
}

/// Renders records as an RSS 2.0 document.
pub struct RssRenderer {
    channel: RssChannel,
    html: Box<dyn HtmlRenderer>,
}

impl RssRenderer {
    /// Creates an RSS renderer.
    #[must_use]
    pub fn new(channel: RssChannel, html: Box<dyn HtmlRenderer>) -> Self {
        Self { channel, html }
    }

    /// Returns the channel metadata.
    #[must_use]
    pub fn channel(&self) -> &RssChannel {
        &self.channel
    }

    fn item_title(&self, record: &ReleaseRecord) -> String {
        let title = self.channel.item_title.render(&TemplateValues {
            date: record.date.as_str(),
            repo: &record.repo_name,
            link: &record.repo_url,
            version: &record.version,
        });
        escape_title(&title)
    }

    fn write_item(
        &self,
        writer: &mut Writer<Vec<u8>>,
        record: &ReleaseRecord,
    ) -> PluginResult<()> {
        xml(writer.write_event(Event::Start(BytesStart::new("item"))))?;

        let title = self.item_title(record);
        text_element(writer, "title", BytesText::from_escaped(title.as_str()))?;
        text_element(writer, "link", BytesText::new(&record.repo_url))?;

        let guid = format!("{}#{}", self.channel.link, content_hash(record));
        xml(writer.write_event(Event::Start(
            BytesStart::new("guid").with_attributes([("isPermaLink", "false")]),
        )))?;
        xml(writer.write_event(Event::Text(BytesText::new(&guid))))?;
        xml(writer.write_event(Event::End(BytesEnd::new("guid"))))?;

        if let Some(pub_date) = record.date.rfc822() {
            text_element(writer, "pubDate", BytesText::new(&pub_date))?;
        }

        let html = self.html.to_html(&record.description);
        xml(writer.write_event(Event::Start(BytesStart::new("description"))))?;
        for section in BytesCData::escaped(&html) {
            xml(writer.write_event(Event::CData(section)))?;
        }
        xml(writer.write_event(Event::End(BytesEnd::new("description"))))?;

        xml(writer.write_event(Event::End(BytesEnd::new("item"))))
    }
}

impl Plugin for RssRenderer {
    fn name(&self) -> &'static str {
        "rss"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Renders the release history as an RSS 2.0 feed"
    }
}

impl HistoryRenderer for RssRenderer {
    fn render(&self, records: &[ReleaseRecord]) -> PluginResult<String> {
        let limit = match self.channel.limit {
            0 => records.len(),
            n => n,
        };

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        xml(writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None))))?;
        xml(writer.write_event(Event::Start(
            BytesStart::new("rss").with_attributes([("version", "2.0"), ("xmlns:atom", ATOM_NS)]),
        )))?;
        xml(writer.write_event(Event::Start(BytesStart::new("channel"))))?;

        let channel = &self.channel;
        text_element(&mut writer, "title", BytesText::new(&channel.title))?;
        text_element(&mut writer, "link", BytesText::new(&channel.link))?;
        let self_link = channel.self_link();
        xml(writer.write_event(Event::Empty(BytesStart::new("atom:link").with_attributes([
            ("href", self_link.as_str()),
            ("rel", "self"),
            ("type", "application/rss+xml"),
        ]))))?;
        text_element(&mut writer, "description", BytesText::new(&channel.description))?;
        text_element(&mut writer, "language", BytesText::new(&channel.language))?;

        for record in records.iter().take(limit) {
            self.write_item(&mut writer, record)?;
        }

        xml(writer.write_event(Event::End(BytesEnd::new("channel"))))?;
        xml(writer.write_event(Event::End(BytesEnd::new("rss"))))?;

        let mut document = String::from_utf8(writer.into_inner())
            .map_err(|e| PluginError::Render(e.to_string()))?;
        document.push('\n');
        Ok(document)
    }

    fn extension(&self) -> &'static str {
        "xml"
    }
}

/// Returns the hex-encoded 128-bit hash identifying a record's content.
///
/// Covers the repository URL, version, date and description.
#[must_use]
pub fn content_hash(record: &ReleaseRecord) -> String {
    let content = format!(
        "{} {} {} {}",
        record.repo_url, record.version, record.date, record.description
    );
    format!("{:032x}", xxh3_128(content.as_bytes()))
}

/// Escapes the five XML special characters, `&` first.
#[must_use]
pub fn escape_title(title: &str) -> String {
    title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: BytesText<'_>,
) -> PluginResult<()> {
    xml(writer.write_event(Event::Start(BytesStart::new(name))))?;
    xml(writer.write_event(Event::Text(text)))?;
    xml(writer.write_event(Event::End(BytesEnd::new(name))))
}

fn xml<T, E: Display>(result: Result<T, E>) -> PluginResult<T> {
    result.map_err(|e| PluginError::Render(e.to_string()))
}
