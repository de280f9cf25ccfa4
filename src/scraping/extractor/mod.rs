//! Field extraction for chapter detail pages.
//!
//! The upstream markup has no stable schema, so every field is an ordered
//! chain of small strategies over the parsed document. The first strategy that
//! produces a qualifying value wins; later ones never run. A field that no
//! strategy fills stays `None`. Nothing in here returns an error.

mod header;
mod prose;
mod revelation;
mod verses;

use crate::types::{ChapterDetails, ChapterRef};
use scraper::Html;
use tracing::debug;

pub use header::{parse_header_text, HeaderNumbers};
pub use prose::MIN_PROSE_CHARS;
pub use verses::{MAX_VERSES, MIN_FALLBACK_VERSE_CHARS, MIN_VERSE_CHARS};

/// A named strategy in a field's fallback chain.
pub(crate) type Strategy<'a, T> = (&'static str, &'a dyn Fn(&Html) -> Option<T>);

/// Run `chain` in order and return the first value produced.
pub(crate) fn first_success<T>(field: &str, document: &Html, chain: &[Strategy<'_, T>]) -> Option<T> {
    let found = chain.iter().find_map(|(name, strategy)| {
        let value = strategy(document)?;
        debug!("{}: extracted by '{}'", field, name);
        Some(value)
    });
    if found.is_none() {
        debug!("{}: no strategy matched", field);
    }
    found
}

pub struct FieldExtractor;

impl FieldExtractor {
    /// Pull every known field off a detail page.
    ///
    /// Numbers found in the page header take precedence over the ones the
    /// listing row carried.
    pub fn extract_details(document: &Html, chapter: &ChapterRef) -> ChapterDetails {
        let mut details = ChapterDetails::new(chapter.name.clone(), chapter.detail_url.clone());

        let numbers = header::extract(document);
        details.number = numbers.and_then(|n| n.number).or(chapter.number);
        details.verse_count = numbers.and_then(|n| n.verse_count).or(chapter.verse_count);

        details.meaning = prose::extract_meaning(document);
        details.description = prose::extract_description(document, details.meaning.as_deref());
        details.revelation_place = revelation::extract_place(document);
        details.revelation_order = revelation::extract_order(document);
        details.verses = verses::extract(document);

        details
    }

    pub fn extract_details_from_str(html: &str, chapter: &ChapterRef) -> ChapterDetails {
        Self::extract_details(&Html::parse_document(html), chapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RevelationPlace;

    fn fatiha() -> ChapterRef {
        ChapterRef {
            name: "Fatiha".to_string(),
            detail_url: "https://www.kuranokuyan.com/fatiha-suresi".to_string(),
            number: None,
            verse_count: None,
        }
    }

    const DETAIL: &str = r#"
        <html><head><title>1. Fatiha Suresi - 7 Ayet</title></head>
        <body>
          <h1>Fatiha Suresi</h1>
          <div class="sure-meal">Fatiha, açılış demektir; Kuran'ın ilk suresi olduğu için bu adı almıştır ve namazın her rekatında okunur.</div>
          <div class="sure-bilgi"><span>Mekki bir suredir.</span><span>İniş sırası: 5</span></div>
          <div class="ayet">Rahman ve Rahim olan Allah'ın adıyla.</div>
          <div class="ayet">Hamd, alemlerin Rabbi Allah'a mahsustur.</div>
          <div class="ayet">Kısa</div>
        </body></html>
    "#;

    #[test]
    fn extracts_every_field() {
        let details = FieldExtractor::extract_details_from_str(DETAIL, &fatiha());
        assert_eq!(details.number, Some(1));
        assert_eq!(details.verse_count, Some(7));
        assert!(details.meaning.as_deref().unwrap().starts_with("Fatiha, açılış"));
        assert_eq!(details.revelation_place, Some(RevelationPlace::Mecca));
        assert_eq!(details.revelation_order, Some(5));

        let verses = details.verses.unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].index, 1);
        assert_eq!(verses[1].text, "Hamd, alemlerin Rabbi Allah'a mahsustur.");
    }

    #[test]
    fn listing_numbers_fill_missing_header() {
        let chapter = ChapterRef {
            number: Some(2),
            verse_count: Some(286),
            ..fatiha()
        };
        let details = FieldExtractor::extract_details_from_str("<html><body></body></html>", &chapter);
        assert_eq!(details.number, Some(2));
        assert_eq!(details.verse_count, Some(286));
        assert!(!details.is_informative());
    }

    #[test]
    fn chain_stops_at_first_success() {
        let doc = Html::parse_document("<p>x</p>");
        let calls = std::cell::Cell::new(0);
        let first = |_: &Html| -> Option<u32> {
            calls.set(calls.get() + 1);
            None
        };
        let second = |_: &Html| -> Option<u32> { Some(2) };
        let third = |_: &Html| -> Option<u32> { panic!("must not run") };
        let chain: [Strategy<'_, u32>; 3] = [("first", &first), ("second", &second), ("third", &third)];
        assert_eq!(first_success("test", &doc, &chain), Some(2));
        assert_eq!(calls.get(), 1);
    }
}
