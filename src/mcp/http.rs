use super::handlers;
use super::handlers::common::HandlerResult;
use crate::types::*;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpToolsResponse {
    pub tools: Vec<McpTool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpCallResponse {
    pub content: Vec<McpContent>,
    pub is_error: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<McpToolsResponse> {
    let tools = state
        .tool_registry
        .public_specs()
        .into_iter()
        .map(|spec| McpTool {
            name: spec.name,
            title: spec.title,
            description: spec.description,
            input_schema: spec.input_schema,
        })
        .collect();
    Json(McpToolsResponse { tools })
}

pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Json(request): Json<McpCallRequest>,
) -> HandlerResult {
    call_tool_inner(state, &request.name, request.arguments).await
}

/// Resolve legacy names, rename legacy argument keys and dispatch. Shared by
/// the HTTP and stdio transports.
pub async fn call_tool_inner(state: Arc<AppState>, name: &str, arguments: Value) -> HandlerResult {
    info!("MCP tool call: {} with args: {:?}", name, arguments);

    let tool = state
        .tool_registry
        .resolve_incoming_tool_name(name)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Unknown tool: {}", name),
                }),
            )
        })?;
    let arguments = state.tool_registry.map_incoming_arguments(&tool, arguments);

    match tool.as_str() {
        "chapter_details" => handlers::chapter_details::handle(state, &arguments).await,
        "quran_research" => handlers::quran_research::handle(state, &arguments).await,
        "list_chapters" => handlers::list_chapters::handle(state).await,
        _ => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown tool: {}", name),
            }),
        )),
    }
}
