use super::common::{envelope_response, required_str, HandlerResult};
use crate::tools::answer_question;
use crate::AppState;
use serde_json::Value;
use std::sync::Arc;

pub async fn handle(state: Arc<AppState>, arguments: &Value) -> HandlerResult {
    let question = match required_str(arguments, "question") {
        Ok(question) => question,
        Err(envelope) => return envelope_response(&envelope),
    };
    envelope_response(&answer_question(&state, question).await)
}
