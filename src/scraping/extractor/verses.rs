use crate::scraping::text::{char_len, class_contains, element_text};
use crate::types::Verse;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub const MAX_VERSES: usize = 10;

/// Floor for elements found through a verse marker class.
pub const MIN_VERSE_CHARS: usize = 20;

/// Higher floor for the plain-paragraph fallback, which sees far more noise.
pub const MIN_FALLBACK_VERSE_CHARS: usize = 40;

/// Class tokens tried in order; the first one present on the page decides.
const VERSE_MARKERS: &[&str] = &["ayet-meal", "ayetmeal", "ayet", "verse", "ayah"];

/// Elements carrying `token`, keeping only the innermost when marked elements nest
/// (a `div.ayetler` wrapper around `div.ayet` rows).
fn marked_elements<'a>(document: &'a Html, token: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse("[class]") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter(|el| class_contains(el, token))
        .filter(|el| {
            !el.descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .any(|inner| class_contains(&inner, token))
        })
        .collect()
}

fn to_verses<'a>(elements: impl Iterator<Item = ElementRef<'a>>, min_chars: usize) -> Vec<Verse> {
    elements
        .map(|el| element_text(&el))
        .filter(|text| char_len(text) > min_chars)
        .take(MAX_VERSES)
        .enumerate()
        .map(|(i, text)| Verse {
            index: i as u32 + 1,
            text,
        })
        .collect()
}

fn non_empty(verses: Vec<Verse>) -> Option<Vec<Verse>> {
    if verses.is_empty() {
        None
    } else {
        Some(verses)
    }
}

/// The first marker token that matches anything wins, even when none of its
/// matches clear the length floor. Paragraphs are used only when no token
/// matches at all.
pub(super) fn extract(document: &Html) -> Option<Vec<Verse>> {
    for token in VERSE_MARKERS {
        let elements = marked_elements(document, token);
        if elements.is_empty() {
            continue;
        }
        debug!("verses: marker '{}' matched {} elements", token, elements.len());
        return non_empty(to_verses(elements.into_iter(), MIN_VERSE_CHARS));
    }

    debug!("verses: no marker matched, falling back to paragraphs");
    let selector = Selector::parse("p").ok()?;
    non_empty(to_verses(document.select(&selector), MIN_FALLBACK_VERSE_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse_div(class: &str, i: usize) -> String {
        format!(r#"<div class="{}">{}. ayet metni burada yer alıyor ve yeterince uzun.</div>"#, class, i)
    }

    #[test]
    fn caps_at_ten_and_numbers_from_one() {
        let body: String = (1..=14).map(|i| verse_div("ayet", i)).collect();
        let doc = Html::parse_document(&body);
        let verses = extract(&doc).unwrap();
        assert_eq!(verses.len(), MAX_VERSES);
        assert_eq!(verses.first().unwrap().index, 1);
        assert_eq!(verses.last().unwrap().index, 10);
        assert!(verses[0].text.starts_with("1. ayet"));
    }

    #[test]
    fn earlier_token_takes_precedence() {
        let body = format!("{}{}", verse_div("verse", 1), verse_div("ayet-meal", 2));
        let doc = Html::parse_document(&body);
        let verses = extract(&doc).unwrap();
        assert_eq!(verses.len(), 1);
        assert!(verses[0].text.starts_with("2."));
    }

    #[test]
    fn innermost_marked_elements_only() {
        let inner: String = (1..=3).map(|i| verse_div("ayet", i)).collect();
        let body = format!(r#"<div class="ayetler">{}</div>"#, inner);
        let doc = Html::parse_document(&body);
        assert_eq!(extract(&doc).unwrap().len(), 3);
    }

    #[test]
    fn winning_token_with_only_short_matches_yields_none() {
        let doc = Html::parse_document(
            r#"<span class="ayet-sayisi">7 Ayet</span><p>Bu paragraf yeterince uzun olsa da ayet yerine kullanılmamalıdır.</p>"#,
        );
        assert!(extract(&doc).is_none());
    }

    #[test]
    fn paragraph_fallback_uses_higher_floor() {
        let doc = Html::parse_document(
            "<p>Otuz karakterden uzun ama kırktan kısa.</p><p>Bu paragraf kırk karakterlik eşiği rahatlıkla aşan bir metindir.</p>",
        );
        let verses = extract(&doc).unwrap();
        assert_eq!(verses.len(), 1);
        assert!(verses[0].text.starts_with("Bu paragraf"));
    }
}
