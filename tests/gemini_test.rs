//! Tests for the Gemini client against a mock server

use mockito::Matcher;
use serde_json::json;

use docsync::gemini::{GeminiClient, GeminiError};

const GENERATE_PATH: &str = "/models/gemini-1.5-flash-latest:generateContent";

fn test_client(server: &mockito::Server) -> GeminiClient {
    GeminiClient::with_api_base(
        reqwest::Client::new(),
        "test-key".to_string(),
        server.url(),
    )
}

#[tokio::test]
async fn test_generate_content_returns_candidate_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"parts": [{"text": "hello model"}]}]
        })))
        .with_status(200)
        .with_body(
            json!({
                "candidates": [{
                    "content": {"parts": [{"text": "hello caller"}]}
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let text = test_client(&server)
        .generate_content("hello model")
        .await
        .unwrap();
    assert_eq!(text, "hello caller");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_content_without_candidates_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"candidates": []}).to_string())
        .create_async()
        .await;

    let err = test_client(&server)
        .generate_content("prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::EmptyResponse));
}

#[tokio::test]
async fn test_generate_content_surfaces_api_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let err = test_client(&server)
        .generate_content("prompt")
        .await
        .unwrap_err();
    match err {
        GeminiError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("quota"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}
