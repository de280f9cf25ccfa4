use crate::core::error::{Result, ScoutError};
use crate::scraping::extractor::FieldExtractor;
use crate::scraping::text::normalize_name;
use crate::tools::chapter_index::ChapterIndex;
use crate::types::{ChapterDetails, EnvelopeData, ResultEnvelope};
use crate::AppState;
use tracing::info;

/// Resolve `name` on the listing page, fetch its detail page and extract the
/// known fields. Results (failures included) are memoized per normalized name.
pub async fn get_chapter_details(state: &AppState, name: &str) -> ResultEnvelope {
    let name = name.trim();
    if name.is_empty() {
        return ResultEnvelope::failure(&ScoutError::InvalidInput(
            "chapter name must be a non-empty string".to_string(),
        ));
    }

    let key = format!("chapter:{}", normalize_name(name));
    state
        .cache
        .get_or_compute(&key, || async {
            ResultEnvelope::from_result(lookup(state, name).await.map(EnvelopeData::Chapter))
        })
        .await
}

async fn lookup(state: &AppState, name: &str) -> Result<ChapterDetails> {
    let index = ChapterIndex::load(state.pages.as_ref(), &state.settings).await?;
    let chapter = index.resolve(name)?;
    info!("chapter '{}' resolved to {}", name, chapter.detail_url);

    let page = state
        .pages
        .fetch(&chapter.detail_url, state.settings.detail_timeout)
        .await?;
    let details = FieldExtractor::extract_details_from_str(&page.body, &chapter);

    if !details.is_informative() {
        return Err(ScoutError::NotFound(format!(
            "no meaning, description or verses could be extracted from {} (the page layout may have changed)",
            page.url
        )));
    }
    Ok(details)
}
