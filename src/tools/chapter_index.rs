use crate::core::error::{FetchError, Result, ScoutError};
use crate::scraping::fetcher::PageSource;
use crate::scraping::text::{char_len, element_text, fold, normalize_name, strip_name_qualifier};
use crate::types::{ChapterRef, EnvelopeData, ResultEnvelope};
use crate::{core::config::Settings, AppState};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, info};
use url::Url;

/// How far up from an anchor to look for "<number> <name> <count> ayet" row text.
const METADATA_ANCESTOR_DEPTH: usize = 3;

/// Characters allowed between a chapter's name and its verse count.
const METADATA_NAME_SLACK: usize = 40;

static ROW_METADATA_RE: OnceLock<Regex> = OnceLock::new();

fn row_metadata_re() -> &'static Regex {
    ROW_METADATA_RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,3})\s*[.):\-]?\s*(\D{1,120}?)\s*(\d{1,3})\s*(?:ayet|âyet|ayat|verses?)")
            .expect("valid row metadata pattern")
    })
}

/// Anchors of one listing-page scan, in document order.
///
/// Built fresh for every top-level call; only final results are memoized.
#[derive(Debug, Clone)]
pub struct ChapterIndex {
    listing_url: Url,
    entries: Vec<ChapterRef>,
}

impl ChapterIndex {
    /// Fetch the listing page and scan it.
    pub async fn load(source: &dyn PageSource, settings: &Settings) -> Result<Self> {
        let listing_url = settings.listing_url();
        let base = Url::parse(&listing_url).map_err(|e| FetchError::Network {
            url: listing_url.clone(),
            message: format!("invalid listing URL: {}", e),
        })?;

        info!("Fetching chapter listing: {}", listing_url);
        let page = source.fetch(&listing_url, settings.listing_timeout).await?;

        let index = Self::parse(&page.body, base);
        info!("Chapter listing scanned: {} anchors", index.entries.len());
        Ok(index)
    }

    pub fn parse(html: &str, listing_url: Url) -> Self {
        let document = Html::parse_document(html);
        let mut entries = Vec::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for anchor in document.select(&selector) {
                let Some(href) = anchor.value().attr("href") else {
                    continue;
                };
                let href = href.trim();
                if href.is_empty()
                    || href.starts_with('#')
                    || href.starts_with("javascript:")
                    || href.starts_with("mailto:")
                {
                    continue;
                }

                let name = element_text(&anchor);
                if name.is_empty() {
                    continue;
                }

                let Ok(detail_url) = listing_url.join(href) else {
                    continue;
                };
                if !matches!(detail_url.scheme(), "http" | "https") {
                    continue;
                }

                let (number, verse_count) = inline_metadata(&anchor, &name).unzip();
                entries.push(ChapterRef {
                    name,
                    detail_url: detail_url.to_string(),
                    number,
                    verse_count,
                });
            }
        }

        Self {
            listing_url,
            entries,
        }
    }

    /// First anchor (document order) whose text equals the input, or the input
    /// with a trailing "suresi"/"chapter" qualifier removed.
    pub fn resolve(&self, name: &str) -> Result<ChapterRef> {
        let wanted = normalize_name(name);
        let wanted_bare = strip_name_qualifier(&wanted);

        let found = self.entries.iter().find(|entry| {
            let anchor = normalize_name(&entry.name);
            anchor == wanted || anchor == wanted_bare || strip_name_qualifier(&anchor) == wanted_bare
        });

        match found {
            Some(entry) => {
                debug!("Resolved '{}' to {}", name, entry.detail_url);
                Ok(entry.clone())
            }
            None => Err(ScoutError::NotFound(format!(
                "chapter '{}' not found on the listing page (the page layout may have changed)",
                name.trim()
            ))),
        }
    }

    /// Entries that look like chapter detail pages, deduplicated by URL.
    ///
    /// Falls back to every entry when nothing qualifies, so a redesigned site
    /// with unfamiliar URLs still gets searched.
    pub fn chapters(&self) -> Vec<ChapterRef> {
        let chapter_like: Vec<&ChapterRef> = self
            .entries
            .iter()
            .filter(|entry| self.looks_like_chapter(entry))
            .collect();

        let pool: Vec<&ChapterRef> = if chapter_like.is_empty() {
            self.entries.iter().collect()
        } else {
            chapter_like
        };

        let mut seen = HashSet::new();
        pool.into_iter()
            .filter(|entry| seen.insert(entry.detail_url.clone()))
            .cloned()
            .collect()
    }

    fn looks_like_chapter(&self, entry: &ChapterRef) -> bool {
        let Ok(url) = Url::parse(&entry.detail_url) else {
            return false;
        };
        if url.host_str() != self.listing_url.host_str() {
            return false;
        }
        if url.path() == self.listing_url.path() || url.path() == "/" {
            return false;
        }
        if entry.number.is_some() {
            return true;
        }
        let path = fold(url.path());
        ["sure", "surah", "chapter"]
            .iter()
            .any(|marker| path.contains(marker))
    }
}

/// `(number, verse_count)` from the anchor's row, if the row reads like
/// "1. Fatiha 7 Ayet".
fn inline_metadata(anchor: &ElementRef<'_>, name: &str) -> Option<(u32, u32)> {
    let name = normalize_name(name);
    let re = row_metadata_re();

    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(METADATA_ANCESTOR_DEPTH)
        .find_map(|row| {
            let text = element_text(&row);
            re.captures_iter(&text).find_map(|caps| {
                let label = normalize_name(caps.get(2)?.as_str());
                let rest = label.strip_prefix(name.as_str())?;
                if char_len(rest) > METADATA_NAME_SLACK {
                    return None;
                }
                let number = caps.get(1)?.as_str().parse().ok()?;
                let count = caps.get(3)?.as_str().parse().ok()?;
                Some((number, count))
            })
        })
}

/// List the chapters on the listing page. Never cached.
pub async fn list_chapters(state: &AppState) -> ResultEnvelope {
    ResultEnvelope::from_result(load_chapters(state).await.map(EnvelopeData::Chapters))
}

async fn load_chapters(state: &AppState) -> Result<Vec<ChapterRef>> {
    let index = ChapterIndex::load(state.pages.as_ref(), &state.settings).await?;
    let chapters = index.chapters();
    if chapters.is_empty() {
        return Err(ScoutError::NotFound(
            "the listing page has no chapter links (the page layout may have changed)".to_string(),
        ));
    }
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r##"
        <html><body>
          <nav><a href="/">Ana Sayfa</a><a href="/sure-listesi">Sureler</a><a href="#top">Yukarı</a></nav>
          <table>
            <tr><td>1.</td><td><a href="/fatiha-suresi">Fatiha</a></td><td>7 Ayet</td></tr>
            <tr><td>2.</td><td><a href="https://www.kuranokuyan.com/bakara-suresi">Bakara</a></td><td>286 Ayet</td></tr>
          </table>
          <ul><li><a href="/al-i-imran-suresi">Al-i İmran</a></li></ul>
          <a href="/fatiha-suresi">Fatiha</a>
          <a href="/iletisim">İletişim</a>
        </body></html>
    "##;

    fn index() -> ChapterIndex {
        ChapterIndex::parse(
            LISTING,
            Url::parse("https://www.kuranokuyan.com/sure-listesi").unwrap(),
        )
    }

    #[test]
    fn resolves_names_case_and_qualifier_insensitively() {
        let index = index();
        let a = index.resolve("fatiha").unwrap();
        let b = index.resolve("Fatiha").unwrap();
        let c = index.resolve("Fatiha Suresi").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.detail_url, "https://www.kuranokuyan.com/fatiha-suresi");
        assert_eq!(a.name, "Fatiha");
    }

    #[test]
    fn picks_up_row_metadata() {
        let index = index();
        let bakara = index.resolve("BAKARA").unwrap();
        assert_eq!(bakara.number, Some(2));
        assert_eq!(bakara.verse_count, Some(286));

        let imran = index.resolve("al-i imran").unwrap();
        assert_eq!(imran.number, None);
        assert_eq!(imran.verse_count, None);
    }

    #[test]
    fn shared_row_gives_each_chapter_its_own_numbers() {
        let index = ChapterIndex::parse(
            r#"<p>3. <a href="/al-i-imran-suresi">Al-i İmran</a> 200 Ayet, 4. <a href="/nisa-suresi">Nisa</a> 176 Ayet</p>"#,
            Url::parse("https://www.kuranokuyan.com/sure-listesi").unwrap(),
        );
        let imran = index.resolve("AL-I İMRAN").unwrap();
        assert_eq!((imran.number, imran.verse_count), (Some(3), Some(200)));
        let nisa = index.resolve("nisa").unwrap();
        assert_eq!((nisa.number, nisa.verse_count), (Some(4), Some(176)));
    }

    #[test]
    fn resolves_uppercase_turkish_names() {
        let index = ChapterIndex::parse(
            r#"<ul><li><a href="/kiyame-suresi">Kıyame</a></li><li><a href="/ihlas-suresi">İhlas</a></li></ul>"#,
            Url::parse("https://www.kuranokuyan.com/sure-listesi").unwrap(),
        );
        assert_eq!(index.resolve("KIYAME").unwrap().name, "Kıyame");
        assert_eq!(index.resolve("kıyame suresi").unwrap().name, "Kıyame");
        assert_eq!(index.resolve("IHLAS").unwrap().name, "İhlas");
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = index().resolve("Nonexistent").unwrap_err();
        assert!(matches!(err, ScoutError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn chapter_candidates_skip_navigation_and_duplicates() {
        let names: Vec<String> = index().chapters().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Fatiha", "Bakara", "Al-i İmran"]);
    }

    #[test]
    fn unfamiliar_urls_fall_back_to_all_entries() {
        let index = ChapterIndex::parse(
            r#"<a href="/p/1">Fatiha</a><a href="/p/2">Bakara</a>"#,
            Url::parse("https://mirror.example/list").unwrap(),
        );
        assert_eq!(index.chapters().len(), 2);
    }
}
