use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ToolCatalogEntry {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn tool_catalog() -> Vec<ToolCatalogEntry> {
    vec![
        ToolCatalogEntry {
            name: "chapter_details",
            title: "Chapter Details",
            description: "Look up a sure by name and return its meaning, description, revelation place and order, verse count and up to ten sample verses.",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Sure name as shown on the listing page, e.g. \"Fatiha\" or \"Bakara Suresi\""}
                },
                "required": ["name"]
            }),
        },
        ToolCatalogEntry {
            name: "quran_research",
            title: "Quran Research",
            description: "Answer a free-text question by searching a bounded set of chapter pages for prophet names or question keywords.",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {"type": "string", "description": "e.g. \"Hangi surelerde sabır geçer?\""}
                },
                "required": ["question"]
            }),
        },
        ToolCatalogEntry {
            name: "list_chapters",
            title: "List Chapters",
            description: "List the chapters found on the listing page, in page order.",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

pub fn schema_to_object_map(schema: &Value) -> Arc<Map<String, Value>> {
    match schema {
        Value::Object(map) => Arc::new(map.clone()),
        _ => Arc::new(Map::new()),
    }
}
