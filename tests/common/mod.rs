#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sure_scout::core::config::Settings;
use sure_scout::scraping::fetcher::{FetchedPage, PageSource};
use sure_scout::{AppState, FetchError};

pub const BASE: &str = "https://www.kuranokuyan.com";

pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

pub fn init_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// In-memory site: canned pages, URLs that fail with 503, and a log of every fetch.
#[derive(Default)]
pub struct FixtureSite {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

impl FixtureSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, path: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url(path), html.into());
        self
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(url(path));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub fn fetches_of(&self, path: &str) -> usize {
        let wanted = url(path);
        self.fetched
            .lock()
            .unwrap()
            .iter()
            .filter(|u| **u == wanted)
            .count()
    }
}

#[async_trait]
impl PageSource for FixtureSite {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<FetchedPage, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 503,
            });
        }
        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                url: url.to_string(),
                body: body.clone(),
            }),
            None => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn state_with(site: Arc<FixtureSite>, settings: Settings) -> AppState {
    AppState::with_page_source(settings, site)
}

pub fn state(site: Arc<FixtureSite>) -> AppState {
    state_with(site, Settings::default())
}

pub const LISTING: &str = r##"
<html><head><title>Sure Listesi</title></head><body>
  <nav><a href="/">Ana Sayfa</a> <a href="/sure-listesi">Sureler</a> <a href="#icerik">İçerik</a></nav>
  <table>
    <tr><td>1.</td><td><a href="/fatiha-suresi">Fatiha</a></td><td>7 Ayet</td></tr>
    <tr><td>2.</td><td><a href="/bakara-suresi">Bakara</a></td><td>286 Ayet</td></tr>
    <tr><td>3.</td><td><a href="/al-i-imran-suresi">Al-i İmran</a></td><td>200 Ayet</td></tr>
  </table>
  <footer><a href="mailto:iletisim@example.com">İletişim</a></footer>
</body></html>
"##;

pub const FATIHA: &str = r#"
<html><head><title>1. Fatiha Suresi - 7 Ayet</title></head><body>
  <h1>Fatiha Suresi</h1>
  <div class="sure-anlami">Hamd, alemlerin Rabbine aittir; bu sure kulluğun ve doğru yola iletilme duasının özüdür.</div>
  <ul class="bilgi"><li>Yer: Mekki</li><li>İniş sırası: 5</li></ul>
  <div class="ayet">1. Rahman ve Rahim olan Allah'ın adıyla.</div>
  <div class="ayet">2. Hamd, alemlerin Rabbi Allah'a mahsustur.</div>
  <div class="ayet">3. O, Rahman'dır, Rahim'dir.</div>
</body></html>
"#;

pub const BAKARA: &str = r#"
<html><head><title>2. Bakara Suresi - 286 Ayet</title></head><body>
  <h1>Bakara Suresi</h1>
  <div class="sure-aciklama">Medine döneminde inen en uzun suredir; Musa kıssası ile İbrahim'in Kabe'yi inşası anlatılır.</div>
  <p>Medeni bir suredir.</p>
  <div class="ayet-meal">1. Elif Lam Mim, bu kitapta şüphe yoktur.</div>
</body></html>
"#;

pub const AL_I_IMRAN: &str = r#"
<html><head><title>3. Al-i İmran Suresi - 200 Ayet</title></head><body>
  <h1>Al-i İmran Suresi</h1>
  <p>Adını İmran ailesinden alan bu sure Medine döneminde inmiş olup tevhit ve sabrı öğütler.</p>
</body></html>
"#;

/// Listing and three detail pages that all resolve.
pub fn three_chapter_site() -> FixtureSite {
    FixtureSite::new()
        .page("/sure-listesi", LISTING)
        .page("/fatiha-suresi", FATIHA)
        .page("/bakara-suresi", BAKARA)
        .page("/al-i-imran-suresi", AL_I_IMRAN)
}
