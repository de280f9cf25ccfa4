mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use std::sync::Arc;
use sure_scout::core::tools_registry::ToolRegistry;
use sure_scout::mcp::call_tool_inner;
use sure_scout::ResultEnvelope;

#[test]
fn catalog_names_resolve_to_themselves() {
    let registry = ToolRegistry::load();

    let names: Vec<String> = registry.public_specs().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["chapter_details", "list_chapters", "quran_research"]);
    for name in &names {
        assert_eq!(registry.resolve_incoming_tool_name(name).as_deref(), Some(name.as_str()));
    }
}

#[test]
fn legacy_names_and_arguments_are_mapped() {
    let registry = ToolRegistry::load();

    assert_eq!(
        registry.resolve_incoming_tool_name("sure_anlami").as_deref(),
        Some("chapter_details")
    );
    assert_eq!(
        registry.resolve_incoming_tool_name("kuran_arastirma").as_deref(),
        Some("quran_research")
    );
    assert!(registry.resolve_incoming_tool_name("scrape_url").is_none());

    let args = registry.map_incoming_arguments("quran_research", json!({"soru": "Kim?"}));
    assert_eq!(args, json!({"question": "Kim?"}));

    // an explicit current-name argument wins over the legacy one
    let args = registry.map_incoming_arguments(
        "chapter_details",
        json!({"name": "Fatiha", "sure_adi": "Bakara"}),
    );
    assert_eq!(args["name"], "Fatiha");
}

fn envelope_of(text: &str) -> ResultEnvelope {
    serde_json::from_str(text).expect("tool output is an envelope")
}

#[tokio::test]
async fn legacy_tool_call_returns_the_envelope() {
    let site = Arc::new(three_chapter_site());
    let state = Arc::new(state(site));

    let response = call_tool_inner(state, "sure_anlami", json!({"sure_adi": "Fatiha"}))
        .await
        .expect("known tool")
        .0;

    assert!(!response.is_error);
    assert_eq!(response.content.len(), 1);
    assert_eq!(response.content[0].content_type, "text");
    let envelope = envelope_of(&response.content[0].text);
    assert_eq!(envelope.chapter().unwrap().number, Some(1));
}

#[tokio::test]
async fn bad_arguments_come_back_as_invalid_input_envelopes() {
    let site = Arc::new(three_chapter_site());
    let state = Arc::new(state(site.clone()));

    for args in [json!({}), json!({"question": 42}), serde_json::Value::Null] {
        let response = call_tool_inner(state.clone(), "quran_research", args)
            .await
            .expect("known tool")
            .0;
        assert!(response.is_error);
        let envelope = envelope_of(&response.content[0].text);
        assert!(!envelope.success);
        assert!(envelope.error.unwrap().starts_with("invalid input"));
    }
    assert_eq!(site.fetch_count(), 0);
}

#[tokio::test]
async fn unknown_tool_is_a_transport_error() {
    let site = Arc::new(three_chapter_site());
    let state = Arc::new(state(site));

    let Err((status, body)) = call_tool_inner(state, "scrape_url", json!({})).await else {
        panic!("expected an error");
    };
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.0.error.contains("scrape_url"));
}

#[tokio::test]
async fn list_chapters_tool_takes_no_arguments() {
    let site = Arc::new(three_chapter_site());
    let state = Arc::new(state(site));

    let response = call_tool_inner(state, "list_chapters", serde_json::Value::Null)
        .await
        .expect("known tool")
        .0;
    let envelope = envelope_of(&response.content[0].text);
    assert_eq!(envelope.chapters().unwrap().len(), 3);
}
