//! Atom feed parsing for the arXiv export API.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::consumer::messages::{FeedEntry, FeedPage};
use crate::errors::PipelineError;

/// Marker present in the ids of entries the API uses to report errors.
const API_ERROR_MARKER: &str = "/api/errors";

/// Parse one page of the arXiv Atom feed.
///
/// An error entry published by the API (malformed query, etc.) is turned into
/// a `PipelineError::CatalogError`.
pub fn parse_feed(xml: &str) -> Result<FeedPage, PipelineError> {
    let mut reader = Reader::from_str(xml);
    let mut page = FeedPage::default();
    let mut path: Vec<String> = Vec::new();
    let mut entry: Option<EntryBuilder> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = local_name(&e);
                if name == "entry" {
                    entry = Some(EntryBuilder::default());
                }
                if let Some(builder) = entry.as_mut() {
                    builder.apply_attributes(&name, &e)?;
                }
                path.push(name);
                text.clear();
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                if let Some(builder) = entry.as_mut() {
                    builder.apply_attributes(&name, &e)?;
                }
            }
            Event::Text(e) => {
                text.push_str(&e.unescape()?);
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(_) => {
                let name = path.pop().unwrap_or_default();
                let parent = path.last().map(String::as_str);

                if name == "entry" {
                    if let Some(builder) = entry.take() {
                        page.entries.push(builder.build()?);
                    }
                } else if let Some(builder) = entry.as_mut() {
                    builder.apply_text(&name, parent, text.trim())?;
                } else if name == "totalResults" {
                    page.total_results = text.trim().parse().ok();
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(page)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, PipelineError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PipelineError::parse(format!("invalid {} timestamp {:?}: {}", field, value, e)))
}

#[derive(Debug, Default)]
struct EntryBuilder {
    entry_id: Option<String>,
    title: String,
    summary: String,
    authors: Vec<String>,
    pdf_url: Option<String>,
    published: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
    primary_category: Option<String>,
    categories: Vec<String>,
}

impl EntryBuilder {
    fn apply_attributes(&mut self, name: &str, e: &BytesStart<'_>) -> Result<(), PipelineError> {
        match name {
            "link" => {
                let mut href = None;
                let mut is_pdf = false;
                for attr in e.attributes() {
                    let attr = attr.map_err(|err| PipelineError::parse(err.to_string()))?;
                    let value = attr.unescape_value()?;
                    match attr.key.local_name().as_ref() {
                        b"href" => href = Some(value.into_owned()),
                        b"title" => is_pdf = value == "pdf",
                        _ => {}
                    }
                }
                if is_pdf {
                    self.pdf_url = href;
                }
            }
            "primary_category" | "category" => {
                for attr in e.attributes() {
                    let attr = attr.map_err(|err| PipelineError::parse(err.to_string()))?;
                    if attr.key.local_name().as_ref() == b"term" {
                        let term = attr.unescape_value()?.into_owned();
                        if name == "primary_category" {
                            self.primary_category = Some(term);
                        } else {
                            self.categories.push(term);
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_text(
        &mut self,
        name: &str,
        parent: Option<&str>,
        value: &str,
    ) -> Result<(), PipelineError> {
        match (name, parent) {
            ("id", Some("entry")) => self.entry_id = Some(value.to_string()),
            ("title", Some("entry")) => self.title = value.to_string(),
            ("summary", Some("entry")) => self.summary = value.to_string(),
            ("published", Some("entry")) => {
                self.published = Some(parse_timestamp("published", value)?)
            }
            ("updated", Some("entry")) => self.updated = Some(parse_timestamp("updated", value)?),
            ("name", Some("author")) => self.authors.push(value.to_string()),
            _ => {}
        }
        Ok(())
    }

    fn build(self) -> Result<FeedEntry, PipelineError> {
        let entry_id = self
            .entry_id
            .ok_or_else(|| PipelineError::parse("feed entry without id"))?;

        if entry_id.contains(API_ERROR_MARKER) {
            return Err(PipelineError::catalog(format!(
                "feed reported an error: {}",
                self.summary
            )));
        }

        let published = self
            .published
            .ok_or_else(|| PipelineError::parse(format!("entry {} has no published date", entry_id)))?;
        let updated = self.updated.unwrap_or(published);
        let primary_category = self
            .primary_category
            .or_else(|| self.categories.first().cloned())
            .unwrap_or_default();

        Ok(FeedEntry {
            entry_id,
            title: self.title,
            summary: self.summary,
            authors: self.authors,
            pdf_url: self.pdf_url,
            published,
            updated,
            primary_category,
            categories: self.categories,
        })
    }
}
