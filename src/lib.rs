pub mod core;
pub mod mcp;
pub mod scraping;
pub mod tools;

// --- Primary core exports ---
pub use core::error::{FetchError, ScoutError};
pub use core::types;
pub use core::types::*;
pub use core::AppState;

pub use mcp::handlers as mcp_handlers;
pub use mcp::stdio as stdio_service;
pub use mcp::tooling as mcp_tooling;
pub use tools::{answer_question, get_chapter_details, list_chapters};
