use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::error::ScoutError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A chapter as found on the listing page.
///
/// `name` keeps the casing of the anchor text; matching is done on a folded copy.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChapterRef {
    pub name: String,
    pub detail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RevelationPlace {
    Mecca,
    Medina,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Verse {
    /// 1-based position among the extracted verses.
    pub index: u32,
    pub text: String,
}

/// Fields pulled off a chapter detail page. Every optional field means
/// "not found on the page", never an error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChapterDetails {
    pub name: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revelation_place: Option<RevelationPlace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revelation_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verses: Option<Vec<Verse>>,
}

impl ChapterDetails {
    pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            number: None,
            verse_count: None,
            revelation_place: None,
            revelation_order: None,
            meaning: None,
            description: None,
            verses: None,
        }
    }

    /// True when at least one of meaning, description or verses was found.
    pub fn is_informative(&self) -> bool {
        self.meaning.is_some() || self.description.is_some() || self.verses.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    NamedEntity,
    Keyword,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum MatchedOn {
    Entities { matched_entities: BTreeSet<String> },
    Terms { matched_terms: BTreeSet<String> },
}

impl MatchedOn {
    pub fn len(&self) -> usize {
        match self {
            MatchedOn::Entities { matched_entities } => matched_entities.len(),
            MatchedOn::Terms { matched_terms } => matched_terms.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub chapter_name: String,
    pub url: String,
    #[serde(flatten)]
    pub matched: MatchedOn,
}

/// A chapter that was dropped from a fan-out because its page could not be fetched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SkippedChapter {
    pub chapter_name: String,
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchResultSet {
    pub question: String,
    pub strategy: SearchStrategy,
    /// Candidate terms (keyword search) or the canonical prophet list (named-entity search).
    pub terms: Vec<String>,
    pub chapters_visited: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedChapter>,
    /// In traversal order, not ranked.
    pub matches: Vec<SearchMatch>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EnvelopeData {
    Chapter(ChapterDetails),
    Search(SearchResultSet),
    Chapters(Vec<ChapterRef>),
}

/// Uniform result of every public operation. `data` and `error` are mutually
/// exclusive; `timestamp` is stamped when the envelope is built.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResultEnvelope {
    pub success: bool,
    pub data: Option<EnvelopeData>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ResultEnvelope {
    pub fn success(data: EnvelopeData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: now_timestamp(),
        }
    }

    pub fn failure(error: &ScoutError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            timestamp: now_timestamp(),
        }
    }

    pub fn from_result(result: Result<EnvelopeData, ScoutError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn chapter(&self) -> Option<&ChapterDetails> {
        match &self.data {
            Some(EnvelopeData::Chapter(c)) => Some(c),
            _ => None,
        }
    }

    pub fn search(&self) -> Option<&SearchResultSet> {
        match &self.data {
            Some(EnvelopeData::Search(s)) => Some(s),
            _ => None,
        }
    }

    pub fn chapters(&self) -> Option<&[ChapterRef]> {
        match &self.data {
            Some(EnvelopeData::Chapters(c)) => Some(c),
            _ => None,
        }
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
