use super::http::call_tool_inner;
use super::tooling::schema_to_object_map;
use crate::core::config::load_scout_config;
use crate::mcp::McpCallResponse;
use crate::types::ErrorResponse;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::Json;
use rmcp::{model::*, ServiceExt};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{info, warn};

fn status_code_to_error_code(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::INVALID_PARAMS,
        StatusCode::NOT_FOUND => ErrorCode::METHOD_NOT_FOUND,
        _ => ErrorCode::INTERNAL_ERROR,
    }
}

fn mcp_call_response_to_stdio_result(response: McpCallResponse) -> CallToolResult {
    let content = response
        .content
        .into_iter()
        .map(|item| Content::text(item.text))
        .collect();

    if response.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

fn convert_http_handler_result(
    result: Result<Json<McpCallResponse>, (StatusCode, Json<ErrorResponse>)>,
) -> Result<CallToolResult, ErrorData> {
    match result {
        Ok(Json(response)) => Ok(mcp_call_response_to_stdio_result(response)),
        Err((status, Json(err))) => Err(ErrorData::new(
            status_code_to_error_code(status),
            err.error,
            None,
        )),
    }
}

#[derive(Clone, Debug)]
pub struct McpService {
    pub state: Arc<AppState>,
}

impl McpService {
    pub fn new() -> anyhow::Result<Self> {
        let settings = load_scout_config().resolve();
        info!("Starting MCP Service");
        info!("Chapter listing: {}", settings.listing_url());
        info!(
            "Timeouts: listing {}s, detail {}s; cache capacity {}",
            settings.listing_timeout.as_secs(),
            settings.detail_timeout.as_secs(),
            settings.cache_capacity
        );

        Ok(Self::with_state(Arc::new(AppState::new(settings)?)))
    }

    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl rmcp::ServerHandler for McpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::LATEST)
            .with_server_info(
                Implementation::from_build_env()
                    .with_title("Sure Scout")
                    .with_description(
                        "Chapter lookup and question answering over a live Quran reference site.",
                    ),
            )
            .with_instructions(
                "Use chapter_details for one sure by name, quran_research for questions across chapters, list_chapters to see what names resolve.",
            )
    }

    async fn list_tools(
        &self,
        _page: Option<PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .state
            .tool_registry
            .public_specs()
            .into_iter()
            .map(|spec| {
                Tool::new(
                    Cow::Owned(spec.name),
                    Cow::Owned(spec.description),
                    schema_to_object_map(&spec.input_schema),
                )
                .with_title(spec.title)
            })
            .collect();

        Ok(ListToolsResult {
            tools,
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        // rmcp hands over an object map; handlers take a serde_json::Value.
        let arguments = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(Default::default()));

        let result =
            call_tool_inner(Arc::clone(&self.state), request.name.as_ref(), arguments).await;
        let stats = self.state.cache.stats().await;
        info!(
            "cache: {} entries / {} capacity, {} hits, {} misses",
            stats.entries, stats.capacity, stats.hits, stats.misses
        );
        convert_http_handler_result(result)
    }
}

pub async fn run() -> anyhow::Result<()> {
    let service = McpService::new()?;
    let running = service.serve(rmcp::transport::stdio()).await?;
    info!("MCP stdio server initialized; waiting for client session");
    let quit_reason = running.waiting().await?;
    warn!("MCP stdio server stopped: {:?}", quit_reason);
    Ok(())
}
