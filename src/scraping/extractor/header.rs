use super::{first_success, Strategy};
use crate::scraping::text::element_text;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderNumbers {
    pub number: Option<u32>,
    pub verse_count: Option<u32>,
}

static HEADER_RE: OnceLock<Regex> = OnceLock::new();

fn header_re() -> &'static Regex {
    HEADER_RE.get_or_init(|| {
        // "1. Fatiha Suresi - 7 Ayet", "2. Bakara Suresi – 286 Âyet", "1. Al-Fatiha | 7 verses"
        Regex::new(r"(?i)(\d{1,3})\s*\.\s*(.+?)\s*[-–—|:]\s*(\d{1,3})\s*(?:ayet|âyet|ayat|verses?)")
            .expect("valid header pattern")
    })
}

/// Parse "<number>. <name> - <count> ayet" out of a title-like string.
pub fn parse_header_text(text: &str) -> Option<HeaderNumbers> {
    let caps = header_re().captures(text)?;
    Some(HeaderNumbers {
        number: caps.get(1).and_then(|m| m.as_str().parse().ok()),
        verse_count: caps.get(3).and_then(|m| m.as_str().parse().ok()),
    })
}

fn from_selector(document: &Html, selector: &str) -> Option<HeaderNumbers> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    parse_header_text(&element_text(&element))
}

pub(super) fn extract(document: &Html) -> Option<HeaderNumbers> {
    let chain: [Strategy<'_, HeaderNumbers>; 2] = [
        ("title", &|doc: &Html| from_selector(doc, "title")),
        ("h1", &|doc: &Html| from_selector(doc, "h1")),
    ];
    first_success("header", document, &chain)
}
