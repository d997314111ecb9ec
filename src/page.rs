//! Content extraction: raw response bytes to a cleaned, titled page.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::config::ScrapingSettings;

pub const NO_TITLE: &str = "No title found";
pub const NO_CONTENT: &str = "No content found";

// How far into the body a <meta charset> declaration is looked for.
const CHARSET_PRESCAN_BYTES: usize = 1024;

// Create static selectors to avoid recompiling them each time
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub status_code: u16,
    /// Empty when the response carried no content-type header.
    pub content_type: String,
    pub content_length: usize,
    pub scraped_at: DateTime<Utc>,
}

/// A fetched page reduced to its title and readable text.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    url: String,
    title: String,
    text: String,
    metadata: PageMetadata,
}

impl FetchedPage {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        metadata: PageMetadata,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text: text.into(),
            metadata,
        }
    }

    /// Builds a page from a response body. Never fails: malformed markup is
    /// parsed best-effort and missing elements fall back to sentinel strings.
    pub fn from_response(
        url: impl Into<String>,
        body: &[u8],
        status_code: u16,
        content_type: Option<&str>,
        settings: &ScrapingSettings,
    ) -> Self {
        let html = decode_body(body, content_type);
        let mut document = Html::parse_document(&html);

        let title = extract_title(&document);
        let text = extract_text(&mut document, &settings.remove_elements)
            .unwrap_or_else(|| NO_CONTENT.to_string());

        let metadata = PageMetadata {
            status_code,
            content_type: content_type.unwrap_or_default().to_string(),
            content_length: body.len(),
            scraped_at: Utc::now(),
        };

        Self::new(url, title, text, metadata)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Strips the discarded tags out of `<body>` and returns its text, one
/// trimmed line per text run. `None` when there is no body to read.
fn extract_text(document: &mut Html, remove_elements: &[String]) -> Option<String> {
    let (body_id, doomed) = {
        let body = document.select(&BODY_SELECTOR).next()?;
        // html5ever always synthesizes a <body>. One holding no elements and
        // only whitespace text counts as absent, explicit `<body></body>` included.
        let has_content = body.children().any(|child| {
            child.value().is_element()
                || child.value().as_text().is_some_and(|text| !text.trim().is_empty())
        });
        if !has_content {
            return None;
        }

        let mut doomed = Vec::new();
        for tag in remove_elements {
            let Ok(selector) = Selector::parse(tag) else {
                tracing::debug!("Skipping unusable tag name in discard set: {}", tag);
                continue;
            };
            doomed.extend(body.select(&selector).map(|element| element.id()));
        }

        (body.id(), doomed)
    };

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let body = document.tree.get(body_id).and_then(ElementRef::wrap)?;
    Some(clean_text(body.text()))
}

/// Decodes the response body using the charset from the content-type
/// header, then a `<meta charset>` near the top of the document, then UTF-8.
/// A byte order mark overrides all of them.
fn decode_body<'a>(body: &'a [u8], content_type: Option<&str>) -> Cow<'a, str> {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!("Body contained bytes invalid for {}", used.name());
    }
    text
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}

fn charset_from_meta(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(CHARSET_PRESCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let start = head.find("<meta")?;
    let after = &head[start..];
    let value = &after[after.find("charset=")? + "charset=".len()..];
    let label: String = value
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();

    Encoding::for_label(label.as_bytes())
}

fn clean_text<'a>(runs: impl Iterator<Item = &'a str>) -> String {
    runs.flat_map(str::lines)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
