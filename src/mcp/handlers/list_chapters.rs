use super::common::{envelope_response, HandlerResult};
use crate::tools::list_chapters;
use crate::AppState;
use std::sync::Arc;

pub async fn handle(state: Arc<AppState>) -> HandlerResult {
    envelope_response(&list_chapters(&state).await)
}
