//! Integration tests for the OpenAI client against a mocked HTTP server.

use git_massage::error::GenerateError;
use git_massage::llm::{GenerationRequest, MessageGenerator, OpenAiClient};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(diff: &str, hint: Option<&str>) -> GenerationRequest {
    GenerationRequest {
        diff: diff.to_string(),
        model: "gpt-5-nano".to_string(),
        api_key: "sk-test".to_string(),
        hint: hint.map(str::to_string),
    }
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn client(server: &MockServer) -> OpenAiClient {
    OpenAiClient::with_base_url(format!("{}/v1", server.uri()))
}

#[tokio::test]
async fn test_generate_returns_cleaned_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-5-nano", "temperature": 1.0})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("```\nfeat(cli): add print-only flag\n```\n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server)
        .generate(&request("+fn main() {}", None))
        .await
        .expect("generation succeeds");

    assert_eq!(message, "feat(cli): add print-only flag");
}

#[tokio::test]
async fn test_generate_sends_system_prompt_diff_and_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("fix: typo")))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .generate(&request("-teh\n+the", Some("mention the README")))
        .await
        .expect("generation succeeds");

    let received = server.received_requests().await.expect("request recording");
    assert_eq!(received.len(), 1);
    let body: Value = serde_json::from_slice(&received[0].body).expect("json body");

    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"].as_str().unwrap().contains("Conventional Commits"));
    assert_eq!(messages[1]["role"], "user");

    let user = messages[1]["content"].as_str().unwrap();
    assert!(user.contains("-teh\n+the"));
    assert!(user.contains("mention the README"));
}

#[tokio::test]
async fn test_generate_without_hint_omits_guidance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("chore: bump")))
        .mount(&server)
        .await;

    client(&server)
        .generate(&request("+1", None))
        .await
        .expect("generation succeeds");

    let received = server.received_requests().await.expect("request recording");
    let body: Value = serde_json::from_slice(&received[0].body).expect("json body");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(!user.contains("Additional guidance"));
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate(&request("+x", None))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::Authentication));
    assert_eq!(
        err.to_string(),
        "Invalid API Key. Please check your configuration."
    );
}

#[tokio::test]
async fn test_server_error_is_generation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "The server had an error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate(&request("+x", None))
        .await
        .unwrap_err();

    match err {
        GenerateError::Failed(detail) => {
            assert!(detail.contains("500"));
            assert!(detail.contains("The server had an error"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate(&request("+x", None))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::EmptyResponse));
}

#[tokio::test]
async fn test_blank_diff_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("feat: never")))
        .expect(0)
        .mount(&server)
        .await;

    let message = client(&server)
        .generate(&request("  \n", None))
        .await
        .expect("blank diff is not an error");
    assert_eq!(message, "");
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Nothing listens on the discard port
    let client = OpenAiClient::with_base_url("http://127.0.0.1:9/v1");

    let err = client.generate(&request("+x", None)).await.unwrap_err();
    assert!(matches!(err, GenerateError::Request(_)));
}
