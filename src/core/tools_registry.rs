use crate::mcp::tooling::tool_catalog;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Deserialize)]
pub struct ToolMetadataEntry {
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
}

#[derive(Clone, Debug)]
pub struct PublicToolSpec {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
}

/// Catalog of exposed tools plus the legacy names still accepted on input.
#[derive(Clone, Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, PublicToolSpec>,
    // legacy tool name -> tool name
    tool_aliases: HashMap<String, String>,
    // Per-tool argument key aliases (legacy key -> key)
    arg_aliases: HashMap<String, HashMap<String, String>>,
}

impl ToolRegistry {
    pub fn load() -> Self {
        let (metadata_map, source) = load_tools_metadata();
        match source {
            Some(source) => info!("tool_metadata: loaded from {}", source.display()),
            None => debug!("tool_metadata: no metadata file; using built-in descriptions"),
        }

        let mut registry = ToolRegistry::default();

        registry.tool_aliases.extend([
            ("sure_anlami".to_string(), "chapter_details".to_string()),
            ("kuran_arastirma".to_string(), "quran_research".to_string()),
        ]);
        registry.arg_aliases.insert(
            "chapter_details".to_string(),
            HashMap::from([("sure_adi".to_string(), "name".to_string())]),
        );
        registry.arg_aliases.insert(
            "quran_research".to_string(),
            HashMap::from([("soru".to_string(), "question".to_string())]),
        );

        for entry in tool_catalog() {
            let name = entry.name.to_string();
            let (title, description) = match metadata_map.as_ref().and_then(|m| m.get(&name)) {
                Some(meta) => (
                    meta.title.clone().unwrap_or_else(|| entry.title.to_string()),
                    meta.description.clone(),
                ),
                None => (entry.title.to_string(), entry.description.to_string()),
            };

            registry.tools.insert(
                name.clone(),
                PublicToolSpec {
                    name,
                    title,
                    description,
                    input_schema: entry.input_schema,
                },
            );
        }

        registry
    }

    pub fn public_specs(&self) -> Vec<PublicToolSpec> {
        let mut tools: Vec<_> = self.tools.values().cloned().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub fn resolve_incoming_tool_name(&self, incoming: &str) -> Option<String> {
        if self.tools.contains_key(incoming) {
            return Some(incoming.to_string());
        }
        self.tool_aliases.get(incoming).cloned()
    }

    /// Rename legacy argument keys. A key already present under its current
    /// name is left alone.
    pub fn map_incoming_arguments(&self, tool_name: &str, arguments: Value) -> Value {
        let mut args = match arguments {
            Value::Object(map) => map,
            other => return other,
        };

        if let Some(alias_map) = self.arg_aliases.get(tool_name) {
            for (legacy_key, key) in alias_map {
                if args.contains_key(key) {
                    continue;
                }
                if let Some(v) = args.remove(legacy_key) {
                    args.insert(key.clone(), v);
                }
            }
        }

        Value::Object(args)
    }
}

fn load_tools_metadata() -> (Option<HashMap<String, ToolMetadataEntry>>, Option<PathBuf>) {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(p) = std::env::var("SURE_SCOUT_TOOLS_METADATA_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
    {
        candidates.push(PathBuf::from(p));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("tools_metadata.json"));
        candidates.push(cwd.join("../tools_metadata.json"));
    }

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, ToolMetadataEntry>>(&raw) {
                Ok(map) => return (Some(map), Some(path)),
                Err(e) => warn!(
                    "tool_metadata: failed to parse {} ({}); ignoring and continuing",
                    path.display(),
                    e
                ),
            },
            Err(e) => warn!(
                "tool_metadata: failed to read {} ({}); ignoring and continuing",
                path.display(),
                e
            ),
        }
    }

    (None, None)
}
