use crate::scraping::text::{fold, is_word_bounded};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

/// Any of these (folded, substring) turns a question into a prophet-name search.
pub const PROPHET_MARKERS: &[&str] = &[
    "peygamber",
    "resul",
    "rasul",
    "nebi",
    "elçi",
    "prophet",
    "messenger",
];

/// Any of these (folded, substring) turns a question into a keyword search.
pub const INTERROGATIVE_MARKERS: &[&str] = &[
    "hangi", "nerede", "kaç", "kim", "which", "where", "how many", "who",
];

/// Terms of this many characters or fewer are never searched for.
pub const MIN_TERM_CHARS: usize = 3;

pub const STOP_WORDS: &[&str] = &[
    // tr
    "hangi", "hangisi", "hangileri", "nerede", "kimdir", "nedir", "neler", "nasıl", "niçin",
    "neden", "için", "gibi", "olan", "olarak", "veya", "daha", "kadar", "geçer", "geçiyor",
    "geçen", "geçmektedir", "bahseder", "bahsedilir", "anlatılır", "vardır", "kuran", "kuranda",
    "kuranın", "sure", "sureler", "surelerde", "suresi", "surede", "ayet", "ayetler",
    "ayetlerde", "hakkında",
    // en
    "which", "where", "many", "what", "whom", "does", "with", "that", "this", "from", "have",
    "there", "their", "about", "quran", "surah", "surahs", "chapter", "chapters", "mentioned",
    "mention",
];

/// Canonical prophet names with the folded spellings that count as a mention.
pub const PROPHETS: &[(&str, &[&str])] = &[
    ("Âdem", &["âdem", "adem"]),
    ("İdris", &["idris"]),
    ("Nuh", &["nuh", "noah"]),
    ("Hud", &["hud", "hûd"]),
    ("Salih", &["salih", "sâlih"]),
    ("İbrahim", &["ibrahim", "abraham"]),
    ("Lut", &["lut", "lût"]),
    ("İsmail", &["ismail", "ismâil"]),
    ("İshak", &["ishak"]),
    ("Yakub", &["yakub", "yakup", "yâkub"]),
    ("Yusuf", &["yusuf"]),
    ("Eyyub", &["eyyub", "eyüp", "eyyüb"]),
    ("Şuayb", &["şuayb", "şuayp"]),
    ("Musa", &["musa", "mûsâ", "moses"]),
    ("Harun", &["harun", "hârûn"]),
    ("Zülkifl", &["zülkifl", "zulkifl"]),
    ("Davud", &["davud", "davut", "dâvûd"]),
    ("Süleyman", &["süleyman"]),
    ("İlyas", &["ilyas"]),
    ("Elyesa", &["elyesa", "elyesâ"]),
    ("Yunus", &["yunus"]),
    ("Zekeriya", &["zekeriya", "zekeriyya"]),
    ("Yahya", &["yahya"]),
    ("İsa", &["isa", "îsâ", "jesus"]),
    ("Muhammed", &["muhammed", "muhammad"]),
];

static PROPHET_MARKER_MATCHER: OnceLock<AhoCorasick> = OnceLock::new();
static INTERROGATIVE_MATCHER: OnceLock<AhoCorasick> = OnceLock::new();
static NAME_MATCHER: OnceLock<(AhoCorasick, Vec<&'static str>)> = OnceLock::new();
static FOLDED_STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

// Patterns are folded the same way as the text they are matched against.
fn folded(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| fold(p)).collect()
}

pub fn prophet_marker_matcher() -> &'static AhoCorasick {
    PROPHET_MARKER_MATCHER
        .get_or_init(|| AhoCorasick::new(folded(PROPHET_MARKERS)).expect("valid prophet markers"))
}

pub fn interrogative_matcher() -> &'static AhoCorasick {
    INTERROGATIVE_MATCHER
        .get_or_init(|| AhoCorasick::new(folded(INTERROGATIVE_MARKERS)).expect("valid interrogative markers"))
}

fn name_matcher() -> &'static (AhoCorasick, Vec<&'static str>) {
    NAME_MATCHER.get_or_init(|| {
        let mut spellings = Vec::new();
        let mut canonical = Vec::new();
        for (name, aliases) in PROPHETS {
            for alias in aliases.iter() {
                spellings.push(fold(alias));
                canonical.push(*name);
            }
        }
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&spellings)
            .expect("valid prophet names");
        (matcher, canonical)
    })
}

pub fn canonical_prophets() -> Vec<String> {
    PROPHETS.iter().map(|(name, _)| name.to_string()).collect()
}

/// `term` must already be folded.
pub fn is_stop_word(term: &str) -> bool {
    FOLDED_STOP_WORDS
        .get_or_init(|| STOP_WORDS.iter().map(|w| fold(w)).collect())
        .contains(term)
}

/// Canonical names of the prophets mentioned, as whole words, in folded `text`.
pub fn prophets_in(folded: &str) -> BTreeSet<String> {
    let (matcher, canonical) = name_matcher();
    matcher
        .find_iter(folded)
        .filter(|m| is_word_bounded(folded, m.start(), m.end()))
        .map(|m| canonical[m.pattern().as_usize()].to_string())
        .collect()
}
