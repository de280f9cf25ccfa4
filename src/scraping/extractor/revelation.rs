use super::{first_success, Strategy};
use crate::scraping::text::{element_text, fold, is_word_bounded};
use crate::types::RevelationPlace;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

const BLOCK_SELECTOR: &str = "p, li, td, dd, dt, span, div, section";

/// Folded place markers; the index decides the place.
const PLACE_MARKERS: &[(&str, RevelationPlace)] = &[
    ("mekki", RevelationPlace::Mecca),
    ("mekkî", RevelationPlace::Mecca),
    ("mekke", RevelationPlace::Mecca),
    ("meccan", RevelationPlace::Mecca),
    ("makki", RevelationPlace::Mecca),
    ("makkah", RevelationPlace::Mecca),
    ("mecca", RevelationPlace::Mecca),
    ("medeni", RevelationPlace::Medina),
    ("medenî", RevelationPlace::Medina),
    ("medine", RevelationPlace::Medina),
    ("medinan", RevelationPlace::Medina),
    ("madani", RevelationPlace::Medina),
    ("madinah", RevelationPlace::Medina),
    ("medina", RevelationPlace::Medina),
];

const ORDER_MARKERS: &[&str] = &[
    "iniş sırası",
    "inis sirasi",
    "nüzul sırası",
    "nüzûl sırası",
    "nuzul sirasi",
    "order of revelation",
    "revelation order",
];

static PLACE_MATCHER: OnceLock<AhoCorasick> = OnceLock::new();
static ORDER_MATCHER: OnceLock<AhoCorasick> = OnceLock::new();
static INTEGER_RE: OnceLock<Regex> = OnceLock::new();

fn place_matcher() -> &'static AhoCorasick {
    PLACE_MATCHER.get_or_init(|| {
        AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(PLACE_MARKERS.iter().map(|(p, _)| fold(p)))
            .expect("valid revelation place markers")
    })
}

fn order_matcher() -> &'static AhoCorasick {
    ORDER_MATCHER.get_or_init(|| {
        AhoCorasick::new(ORDER_MARKERS.iter().map(|m| fold(m)))
            .expect("valid revelation order markers")
    })
}

fn integer_re() -> &'static Regex {
    INTEGER_RE.get_or_init(|| Regex::new(r"\d+").expect("valid integer pattern"))
}

/// Earliest whole-word place marker in `text`.
fn place_in_text(text: &str) -> Option<RevelationPlace> {
    let folded = fold(text);
    place_matcher()
        .find_iter(&folded)
        .find(|m| is_word_bounded(&folded, m.start(), m.end()))
        .map(|m| PLACE_MARKERS[m.pattern().as_usize()].1)
}

/// First integer after an order marker, or the first integer of the text.
fn order_in_text(text: &str) -> Option<u32> {
    let folded = fold(text);
    let marker = order_matcher().find(&folded)?;
    let re = integer_re();
    re.find(&folded[marker.end()..])
        .or_else(|| re.find(&folded))
        .and_then(|m| m.as_str().parse().ok())
}

fn has_order_marker(text: &str) -> bool {
    order_matcher().is_match(&fold(text))
}

/// Blocks whose text is `marked` while none of their nested blocks is, in
/// document order. A wrapper around several labelled rows never answers for
/// them.
fn innermost_marked<'a>(
    document: &'a Html,
    selector: &Selector,
    marked: &dyn Fn(&str) -> bool,
) -> Vec<ElementRef<'a>> {
    document
        .select(selector)
        .filter(|el| marked(&element_text(el)))
        .filter(|el| {
            !el.descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .any(|inner| selector.matches(&inner) && marked(&element_text(&inner)))
        })
        .collect()
}

fn scan_blocks<T>(
    document: &Html,
    marked: &dyn Fn(&str) -> bool,
    extract: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let selector = Selector::parse(BLOCK_SELECTOR).ok()?;
    innermost_marked(document, &selector, marked)
        .into_iter()
        .find_map(|el| extract(&element_text(&el)))
}

pub(super) fn extract_place(document: &Html) -> Option<RevelationPlace> {
    let chain: [Strategy<'_, RevelationPlace>; 1] = [("block-marker", &|doc: &Html| {
        scan_blocks(doc, &|text: &str| place_in_text(text).is_some(), place_in_text)
    })];
    first_success("revelation_place", document, &chain)
}

pub(super) fn extract_order(document: &Html) -> Option<u32> {
    let chain: [Strategy<'_, u32>; 1] = [("block-marker", &|doc: &Html| {
        scan_blocks(doc, &has_order_marker, order_in_text)
    })];
    first_success("revelation_order", document, &chain)
}
