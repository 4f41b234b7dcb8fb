// Chat model client tests against a local mock server

use clinical_interest_mapper::llm::{ChatMessage, ChatModel, LlmError, ModelConfig, OpenAiChatModel};
use mockito::Matcher;

fn config(base_url: String) -> ModelConfig {
    ModelConfig {
        api_key: Some("sk-test".to_string()),
        base_url,
        ..ModelConfig::default()
    }
}

#[tokio::test]
async fn test_completion_request_and_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4",
            "temperature": 0.0,
            "messages": [{"role": "system", "content": "rules"}, {"role": "user", "content": "text"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "  {\"mappings\": []}\n"}}]}"#)
        .create_async()
        .await;

    let model = OpenAiChatModel::new(&config(format!("{}/v1", server.url()))).unwrap();
    let reply = model
        .complete(&[ChatMessage::system("rules"), ChatMessage::user("text")], 0.0)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "{\"mappings\": []}");
}

#[tokio::test]
async fn test_api_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let model = OpenAiChatModel::new(&config(format!("{}/v1", server.url()))).unwrap();
    let err = model.complete(&[ChatMessage::user("text")], 0.0).await.unwrap_err();

    assert!(matches!(err, LlmError::Api { status: 503, ref message } if message == "overloaded"));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let model = OpenAiChatModel::new(&config(format!("{}/v1", server.url()))).unwrap();
    let err = model.complete(&[ChatMessage::user("text")], 0.0).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}
