//! Tests for the question-answering flow

use httpmock::prelude::*;
use serde_json::json;

use slack_reader::OpenAIClient;

#[tokio::test]
async fn answer_with_context_feeds_retrieved_chunks_to_the_model() {
    let server = MockServer::start_async().await;

    let completion_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions").is_true(|req| {
            let body = String::from_utf8_lossy(req.body().as_ref());
            body.contains("chunk one") && body.contains("chunk two") && body.contains("the question")
        });
        then.status(200).json_body(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "grounded answer" } }
            ]
        }));
    });

    let client = OpenAIClient::with_base_url("test_key", server.base_url()).expect("client");
    let answer = client
        .answer_with_context(
            "the question",
            &["chunk one".to_string(), "chunk two".to_string()],
            "gpt-4o-mini",
            0.9,
            1000,
        )
        .await
        .expect("answer");

    assert_eq!(answer, "grounded answer");
    completion_mock.assert_calls(1);
}

#[tokio::test]
async fn chat_command_rejects_empty_question() {
    let config = slack_reader::Config::default();
    let err = slack_reader::commands::chat::run(&config, "knowledge_base", "")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Question"));
}

#[tokio::test]
#[ignore] // Requires OPENAI_API_KEY and a running Qdrant with a trained collection
async fn chat_live_round_trip() {
    dotenvy::dotenv().ok();
    let config = slack_reader::Config::new();
    let answer = slack_reader::commands::chat::run(&config, "knowledge_base", "What is this about?")
        .await
        .expect("live chat");
    assert!(!answer.is_empty());
}
