//! Tests for the training pipeline (load, extract, chunk)

use httpmock::prelude::*;
use tempfile::tempdir;

use slack_reader::knowledge::{loader, Chunker};

#[tokio::test]
async fn load_url_extracts_visible_text() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/docs");
        then.status(200)
            .header("content-type", "text/html")
            .body(
                "<html><head><title>Docs</title>\
                 <script>var x = 1;</script>\
                 <style>body { color: red; }</style></head>\
                 <body><h1>Getting   started</h1><p>First step.</p></body></html>",
            );
    });

    let http = reqwest::Client::new();
    let text = loader::load_url(&http, &format!("{}/docs", server.base_url()))
        .await
        .expect("load url");

    assert!(text.contains("Getting started"));
    assert!(text.contains("First step."));
    assert!(!text.contains("var x"));
    assert!(!text.contains("color: red"));
}

#[tokio::test]
async fn load_url_fails_on_http_error() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404).body("nope");
    });

    let http = reqwest::Client::new();
    let err = loader::load_url(&http, &format!("{}/missing", server.base_url()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Bad status"));
}

#[test]
fn load_json_file_flattens_string_values() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("faq.json");
    std::fs::write(
        &path,
        r#"{ "title": "FAQ", "entries": [ { "q": "What is it?", "a": "A bot." } ] }"#,
    )
    .expect("write json");

    let text = loader::load_json_file(&path).expect("load json");

    assert!(text.contains("FAQ"));
    assert!(text.contains("What is it?"));
    assert!(text.contains("A bot."));
}

#[test]
fn load_json_file_rejects_invalid_json() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write file");

    let err = loader::load_json_file(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid JSON"));
}

#[test]
fn extracted_text_chunks_with_default_settings() {
    let text = "word ".repeat(200);
    let chunker = Chunker::new(300, 2);
    let chunks = chunker.chunk(&text, "https://example.com/docs");

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= 300);
        assert_eq!(chunk.source, "https://example.com/docs");
    }
}

#[tokio::test]
async fn train_rejects_empty_collection() {
    let config = slack_reader::Config::default();
    let err = slack_reader::commands::train::run(&config, "https://example.com", "")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Collection name"));
}
