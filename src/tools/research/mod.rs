pub mod vocabulary;

use crate::core::error::{Result, ScoutError};
use crate::scraping::text::{char_len, fold, normalize_name, visible_text};
use crate::tools::chapter_index::ChapterIndex;
use crate::types::*;
use crate::AppState;
use scraper::Html;
use std::collections::BTreeSet;
use tracing::{info, warn};

use vocabulary::{
    canonical_prophets, interrogative_matcher, is_stop_word, prophet_marker_matcher, prophets_in,
    MIN_TERM_CHARS,
};

/// Outcome of visiting one chapter during a fan-out.
pub type Attempt = (ChapterRef, std::result::Result<MatchedOn, ScoutError>);

/// Pick a search strategy by substring markers. Prophet markers win over
/// interrogatives; a question with neither is not searchable.
pub fn classify(question: &str) -> Option<SearchStrategy> {
    let folded = fold(question);
    if prophet_marker_matcher().is_match(&folded) {
        Some(SearchStrategy::NamedEntity)
    } else if interrogative_matcher().is_match(&folded) {
        Some(SearchStrategy::Keyword)
    } else {
        None
    }
}

/// Folded question words longer than the floor and not stop words, first occurrence order.
pub fn candidate_terms(question: &str) -> Vec<String> {
    let folded = fold(question);
    let mut seen = BTreeSet::new();
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| char_len(w) > MIN_TERM_CHARS)
        .filter(|w| !is_stop_word(w))
        .filter(|w| seen.insert(w.to_string()))
        .map(str::to_string)
        .collect()
}

/// Match one detail page against the strategy. Empty sets mean "no hit".
pub fn scan_page(html: &str, strategy: SearchStrategy, terms: &[String]) -> MatchedOn {
    let text = fold(&visible_text(&Html::parse_document(html)));
    match strategy {
        SearchStrategy::NamedEntity => MatchedOn::Entities {
            matched_entities: prophets_in(&text),
        },
        SearchStrategy::Keyword => MatchedOn::Terms {
            matched_terms: terms
                .iter()
                .filter(|t| text.contains(t.as_str()))
                .cloned()
                .collect(),
        },
    }
}

/// Keep chapters with hits, record the ones that could not be fetched, and
/// fail only when no chapter matched.
pub fn aggregate(
    question: &str,
    strategy: SearchStrategy,
    terms: Vec<String>,
    attempts: Vec<Attempt>,
) -> Result<SearchResultSet> {
    let chapters_visited = attempts.len();
    let mut matches = Vec::new();
    let mut skipped = Vec::new();

    for (chapter, attempt) in attempts {
        match attempt {
            Ok(matched) if !matched.is_empty() => matches.push(SearchMatch {
                chapter_name: chapter.name,
                url: chapter.detail_url,
                matched,
            }),
            Ok(_) => {}
            Err(e) => {
                warn!("research: {}", e);
                skipped.push(SkippedChapter {
                    chapter_name: chapter.name,
                    url: chapter.detail_url,
                    reason: e.to_string(),
                });
            }
        }
    }

    if matches.is_empty() {
        return Err(ScoutError::NoResults(format!(
            "none of the {} chapters searched matched the question ({} could not be fetched)",
            chapters_visited,
            skipped.len()
        )));
    }

    Ok(SearchResultSet {
        question: question.to_string(),
        strategy,
        terms,
        chapters_visited,
        skipped,
        matches,
    })
}

async fn research(state: &AppState, question: &str) -> Result<SearchResultSet> {
    let strategy = classify(question).ok_or_else(|| {
        ScoutError::NoResults(
            "the question names neither prophets nor asks which/where/how many/who".to_string(),
        )
    })?;

    let (terms, fanout) = match strategy {
        SearchStrategy::NamedEntity => (canonical_prophets(), state.settings.entity_fanout),
        SearchStrategy::Keyword => {
            let terms = candidate_terms(question);
            if terms.is_empty() {
                return Err(ScoutError::NoResults(
                    "the question has no searchable terms".to_string(),
                ));
            }
            (terms, state.settings.keyword_fanout)
        }
    };

    let index = ChapterIndex::load(state.pages.as_ref(), &state.settings).await?;
    let chapters: Vec<ChapterRef> = index.chapters().into_iter().take(fanout).collect();
    info!(
        "research: {:?} search over {} chapters for '{}'",
        strategy,
        chapters.len(),
        question
    );

    // One page at a time, in listing order.
    let mut attempts: Vec<Attempt> = Vec::with_capacity(chapters.len());
    for chapter in chapters {
        let attempt = match state
            .pages
            .fetch(&chapter.detail_url, state.settings.detail_timeout)
            .await
        {
            Ok(page) => Ok(scan_page(&page.body, strategy, &terms)),
            Err(source) => Err(ScoutError::PartialFetch {
                chapter: chapter.name.clone(),
                source,
            }),
        };
        attempts.push((chapter, attempt));
    }

    aggregate(question, strategy, terms, attempts)
}

/// Answer a free-text question by searching a bounded prefix of the chapter list.
pub async fn answer_question(state: &AppState, question: &str) -> ResultEnvelope {
    let question = question.trim();
    if question.is_empty() {
        return ResultEnvelope::failure(&ScoutError::InvalidInput(
            "question must be a non-empty string".to_string(),
        ));
    }

    let key = format!("research:{}", normalize_name(question));
    state
        .cache
        .get_or_compute(&key, || async {
            ResultEnvelope::from_result(research(state, question).await.map(EnvelopeData::Search))
        })
        .await
}
