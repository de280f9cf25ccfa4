use std::time::Duration;

// ---------------------------------------------------------------------------
// ScoutConfig: file-based config loader (sure-scout.json) with env-var fallback
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://www.kuranokuyan.com";
pub const DEFAULT_LISTING_PATH: &str = "/sure-listesi";

/// Raw config as read from `sure-scout.json`. Every field is optional; the
/// `resolve_*` methods apply the env-var and built-in fallbacks.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct ScoutConfig {
    /// Origin of the reference site, e.g. `https://www.kuranokuyan.com`.
    pub base_url: Option<String>,
    /// Path of the chapter listing page, relative to `base_url`.
    pub listing_path: Option<String>,
    pub listing_timeout_secs: Option<u64>,
    pub detail_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    /// Max memoized results. Default: 128.
    pub cache_capacity: Option<usize>,
    /// Chapters visited by a prophet-name search. Default: 10.
    pub entity_fanout: Option<usize>,
    /// Chapters visited by a keyword search. Default: 8.
    pub keyword_fanout: Option<usize>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse().ok())
}

impl ScoutConfig {
    /// Base URL: JSON field → `SURE_SCOUT_BASE_URL` → built-in default.
    pub fn resolve_base_url(&self) -> String {
        self.base_url
            .as_ref()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .or_else(|| env_string("SURE_SCOUT_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Listing path: JSON field → `SURE_SCOUT_LISTING_PATH` → `/sure-listesi`.
    pub fn resolve_listing_path(&self) -> String {
        self.listing_path
            .as_ref()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .or_else(|| env_string("SURE_SCOUT_LISTING_PATH"))
            .unwrap_or_else(|| DEFAULT_LISTING_PATH.to_string())
    }

    pub fn resolve_listing_timeout(&self) -> Duration {
        let secs = self
            .listing_timeout_secs
            .or_else(|| env_parse("SURE_SCOUT_LISTING_TIMEOUT_SECS"))
            .unwrap_or(10);
        Duration::from_secs(secs.max(1))
    }

    pub fn resolve_detail_timeout(&self) -> Duration {
        let secs = self
            .detail_timeout_secs
            .or_else(|| env_parse("SURE_SCOUT_DETAIL_TIMEOUT_SECS"))
            .unwrap_or(15);
        Duration::from_secs(secs.max(1))
    }

    pub fn resolve_connect_timeout(&self) -> Duration {
        let secs = self
            .connect_timeout_secs
            .or_else(|| env_parse("HTTP_CONNECT_TIMEOUT_SECS"))
            .unwrap_or(5);
        Duration::from_secs(secs.max(1))
    }

    pub fn resolve_cache_capacity(&self) -> usize {
        self.cache_capacity
            .or_else(|| env_parse("SURE_SCOUT_CACHE_CAPACITY"))
            .unwrap_or(128)
            .max(1)
    }

    pub fn resolve_entity_fanout(&self) -> usize {
        self.entity_fanout
            .or_else(|| env_parse("SURE_SCOUT_ENTITY_FANOUT"))
            .unwrap_or(10)
    }

    pub fn resolve_keyword_fanout(&self) -> usize {
        self.keyword_fanout
            .or_else(|| env_parse("SURE_SCOUT_KEYWORD_FANOUT"))
            .unwrap_or(8)
    }

    pub fn resolve(&self) -> Settings {
        Settings {
            base_url: self.resolve_base_url(),
            listing_path: self.resolve_listing_path(),
            listing_timeout: self.resolve_listing_timeout(),
            detail_timeout: self.resolve_detail_timeout(),
            connect_timeout: self.resolve_connect_timeout(),
            cache_capacity: self.resolve_cache_capacity(),
            entity_fanout: self.resolve_entity_fanout(),
            keyword_fanout: self.resolve_keyword_fanout(),
        }
    }
}

/// Resolved, immutable settings shared through `AppState`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub listing_path: String,
    pub listing_timeout: Duration,
    pub detail_timeout: Duration,
    pub connect_timeout: Duration,
    pub cache_capacity: usize,
    pub entity_fanout: usize,
    pub keyword_fanout: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            listing_timeout: Duration::from_secs(10),
            detail_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
            cache_capacity: 128,
            entity_fanout: 10,
            keyword_fanout: 8,
        }
    }
}

impl Settings {
    pub fn listing_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.listing_path.starts_with('/') {
            format!("{}{}", base, self.listing_path)
        } else {
            format!("{}/{}", base, self.listing_path)
        }
    }
}

/// Load `sure-scout.json` from standard locations.
///
/// Search order (first found wins):
/// 1. `SURE_SCOUT_CONFIG` env var path
/// 2. `./sure-scout.json`
/// 3. `../sure-scout.json`
///
/// Missing file → `ScoutConfig::default()` (env-var fallbacks still apply).
/// Parse error → log a warning, return `ScoutConfig::default()`.
pub fn load_scout_config() -> ScoutConfig {
    let mut candidates = vec![
        std::path::PathBuf::from("sure-scout.json"),
        std::path::PathBuf::from("../sure-scout.json"),
    ];
    if let Some(env_path) = env_string("SURE_SCOUT_CONFIG") {
        candidates.insert(0, std::path::PathBuf::from(env_path));
    }

    for path in &candidates {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };
        return match serde_json::from_str::<ScoutConfig>(&contents) {
            Ok(cfg) => {
                tracing::info!("sure-scout.json loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "sure-scout.json parse error at {}: {}, using defaults",
                    path.display(),
                    e
                );
                ScoutConfig::default()
            }
        };
    }

    ScoutConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_take_precedence() {
        let cfg: ScoutConfig = serde_json::from_str(
            r#"{"base_url": "http://mirror.local/", "listing_path": "liste", "cache_capacity": 4}"#,
        )
        .unwrap();
        let settings = cfg.resolve();
        assert_eq!(settings.base_url, "http://mirror.local/");
        assert_eq!(settings.listing_url(), "http://mirror.local/liste");
        assert_eq!(settings.cache_capacity, 4);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let cfg = ScoutConfig {
            cache_capacity: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_cache_capacity(), 1);
    }

    #[test]
    fn default_listing_url() {
        assert_eq!(
            Settings::default().listing_url(),
            "https://www.kuranokuyan.com/sure-listesi"
        );
    }
}
