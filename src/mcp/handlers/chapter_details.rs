use super::common::{envelope_response, required_str, HandlerResult};
use crate::tools::get_chapter_details;
use crate::AppState;
use serde_json::Value;
use std::sync::Arc;

pub async fn handle(state: Arc<AppState>, arguments: &Value) -> HandlerResult {
    let name = match required_str(arguments, "name") {
        Ok(name) => name,
        Err(envelope) => return envelope_response(&envelope),
    };
    envelope_response(&get_chapter_details(&state, name).await)
}
