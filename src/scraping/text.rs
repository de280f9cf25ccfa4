use scraper::{ElementRef, Html, Node};

/// Trailing qualifiers users append to a chapter name ("Fatiha Suresi").
const NAME_QUALIFIERS: &[&str] = &[" suresi", " sûresi", " süresi", " sure", " surah", " chapter"];

/// Case-fold for matching. Drops the combining dot that `İ` lowercases into
/// and merges dotless `ı` with `i`, so "İbrahim", "IBRAHIM" and "ıbrahim" all
/// fold to "ibrahim" and "SABIR" meets "Sabır".
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| *c != '\u{307}')
        .map(|c| if c == 'ı' { 'i' } else { c })
        .collect()
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Folded, trimmed, whitespace-collapsed form used for name comparison and cache keys.
pub fn normalize_name(text: &str) -> String {
    fold(&collapse_whitespace(text))
}

/// `normalize_name` with one trailing qualifier removed, if any.
pub fn strip_name_qualifier(normalized: &str) -> String {
    for qualifier in NAME_QUALIFIERS {
        if let Some(stripped) = normalized.strip_suffix(qualifier) {
            let stripped = stripped.trim();
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }
    normalized.to_string()
}

/// Elements whose boundaries separate words. Text inside anything else
/// (`b`, `i`, `a`, `span`, ...) is glued to its neighbours as written.
const BREAKING_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hr", "li", "main", "nav",
    "ol", "p", "section", "table", "td", "th", "title", "tr", "ul",
];

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Node::Text(text) = child.value() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if HIDDEN_TAGS.contains(&name) {
            continue;
        }
        let breaks = BREAKING_TAGS.contains(&name);
        if breaks {
            out.push(' ');
        }
        push_text(child, out);
        if breaks {
            out.push(' ');
        }
    }
}

/// Whitespace-collapsed text of an element and its descendants, skipping
/// scripts and styles. Inline markup does not split words.
pub fn element_text(element: &ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(*element, &mut out);
    collapse_whitespace(&out)
}

/// Length in characters, not bytes; Turkish text is mostly multi-byte.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Case-insensitive substring test of `token` against the element's class attribute.
pub fn class_contains(element: &ElementRef<'_>, token: &str) -> bool {
    element
        .value()
        .attr("class")
        .map(|classes| classes.to_lowercase().contains(token))
        .unwrap_or(false)
}

/// Text a reader would see on the whole page.
pub fn visible_text(document: &Html) -> String {
    element_text(&document.root_element())
}

/// Whether the match at `start..end` in `text` is a whole word.
pub fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map(|c| !c.is_alphanumeric())
        .unwrap_or(true);
    let after_ok = text[end..]
        .chars()
        .next()
        .map(|c| !c.is_alphanumeric())
        .unwrap_or(true);
    before_ok && after_ok
}
