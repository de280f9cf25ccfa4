use super::{first_success, Strategy};
use crate::scraping::text::{char_len, class_contains, element_text};
use scraper::{Html, Selector};

/// Prose shorter than this is a caption, label or menu item.
pub const MIN_PROSE_CHARS: usize = 50;

const MEANING_MARKERS: &[&str] = &["meal", "anlam", "meaning", "translation", "tercume", "tercüme"];

const DESCRIPTION_MARKERS: &[&str] = &[
    "aciklama",
    "açıklama",
    "description",
    "hakkinda",
    "hakkında",
    "ozet",
    "özet",
    "summary",
    "intro",
    "tefsir",
];

const BLOCK_SELECTOR: &str = "div, section, article, p, blockquote";

fn qualifies(text: &str, exclude: Option<&str>) -> bool {
    char_len(text) > MIN_PROSE_CHARS && exclude != Some(text)
}

/// First block whose class carries one of `markers` and whose text is long enough.
fn marked_block(document: &Html, markers: &[&str], exclude: Option<&str>) -> Option<String> {
    let selector = Selector::parse(BLOCK_SELECTOR).ok()?;
    document
        .select(&selector)
        .filter(|el| markers.iter().any(|m| class_contains(el, m)))
        .map(|el| element_text(&el))
        .find(|text| qualifies(text, exclude))
}

/// First long paragraph after the page's primary heading.
fn paragraph_after_heading(document: &Html, exclude: Option<&str>) -> Option<String> {
    let selector = Selector::parse("h1, p").ok()?;
    let mut seen_heading = false;
    for el in document.select(&selector) {
        if el.value().name() == "h1" {
            seen_heading = true;
            continue;
        }
        if !seen_heading {
            continue;
        }
        let text = element_text(&el);
        if qualifies(&text, exclude) {
            return Some(text);
        }
    }
    None
}

fn any_paragraph(document: &Html, exclude: Option<&str>) -> Option<String> {
    let selector = Selector::parse("p").ok()?;
    document
        .select(&selector)
        .map(|el| element_text(&el))
        .find(|text| qualifies(text, exclude))
}

pub(super) fn extract_meaning(document: &Html) -> Option<String> {
    let chain: [Strategy<'_, String>; 3] = [
        ("meaning-class", &|doc: &Html| marked_block(doc, MEANING_MARKERS, None)),
        ("paragraph-after-h1", &|doc: &Html| paragraph_after_heading(doc, None)),
        ("first-paragraph", &|doc: &Html| any_paragraph(doc, None)),
    ];
    first_success("meaning", document, &chain)
}

/// Same chain as the meaning, with description markers; a candidate identical
/// to the extracted meaning is skipped.
pub(super) fn extract_description(document: &Html, meaning: Option<&str>) -> Option<String> {
    let chain: [Strategy<'_, String>; 3] = [
        ("description-class", &|doc: &Html| {
            marked_block(doc, DESCRIPTION_MARKERS, meaning)
        }),
        ("paragraph-after-h1", &|doc: &Html| paragraph_after_heading(doc, meaning)),
        ("first-paragraph", &|doc: &Html| any_paragraph(doc, meaning)),
    ];
    first_success("description", document, &chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_A: &str = "Bu sure, adını ilk ayetinde geçen kelimeden alır ve Mekke döneminde inmiştir.";
    const LONG_B: &str = "Surenin ana konusu tevhid, ahiret inancı ve geçmiş kavimlerin kıssalarıdır burada.";

    #[test]
    fn class_marker_wins_over_paragraphs() {
        let html = format!(
            r#"<h1>Başlık</h1><p>{}</p><div class="Sure-Anlami">{}</div>"#,
            LONG_A, LONG_B
        );
        let doc = Html::parse_document(&html);
        assert_eq!(extract_meaning(&doc).as_deref(), Some(LONG_B));
    }

    #[test]
    fn short_marked_block_is_ignored() {
        let html = format!(r#"<div class="meal">Anlamı</div><h1>Başlık</h1><p>{}</p>"#, LONG_A);
        let doc = Html::parse_document(&html);
        assert_eq!(extract_meaning(&doc).as_deref(), Some(LONG_A));
    }

    #[test]
    fn paragraph_must_follow_heading_before_global_fallback() {
        let html = format!(r#"<p>{}</p><h1>Başlık</h1><p>kısa</p><p>{}</p>"#, LONG_A, LONG_B);
        let doc = Html::parse_document(&html);
        assert_eq!(paragraph_after_heading(&doc, None).as_deref(), Some(LONG_B));
        assert_eq!(any_paragraph(&doc, None).as_deref(), Some(LONG_A));
    }

    #[test]
    fn description_skips_the_meaning_text() {
        let html = format!(r#"<h1>Başlık</h1><p>{}</p><p>{}</p>"#, LONG_A, LONG_B);
        let doc = Html::parse_document(&html);
        let meaning = extract_meaning(&doc);
        assert_eq!(meaning.as_deref(), Some(LONG_A));
        assert_eq!(extract_description(&doc, meaning.as_deref()).as_deref(), Some(LONG_B));
    }

    #[test]
    fn nothing_long_enough_means_none() {
        let doc = Html::parse_document("<h1>Başlık</h1><p>kısa</p><div class='meal'>kısa</div>");
        assert!(extract_meaning(&doc).is_none());
        assert!(extract_description(&doc, None).is_none());
    }
}
