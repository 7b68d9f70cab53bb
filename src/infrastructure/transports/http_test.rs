use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::greeting_response_fixture;

use super::HttpTransport;
use crate::domain::models::ChatPayload;
use crate::domain::models::ChatRequest;
use crate::domain::models::Role;
use crate::domain::models::Transport;
use crate::domain::models::TransportConfig;
use crate::domain::models::TransportError;

impl HttpTransport {
    fn with_url(url: String) -> HttpTransport {
        return HttpTransport::new(TransportConfig::new(&url, "abc"));
    }
}

#[tokio::test]
async fn it_posts_request_and_decodes_response() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_header("Authorization", "Bearer abc")
        .match_header("Content-Type", "application/json")
        .match_body(Matcher::Json(json!({
            "channel": "web",
            "locale": "en-GB"
        })))
        .with_status(200)
        .with_body(greeting_response_fixture())
        .create_async()
        .await;

    let transport = HttpTransport::with_url(format!("{}/api/chat", server.url()));
    let res = transport
        .send(ChatRequest::new(None, ChatPayload::Empty))
        .await?;
    mock.assert_async().await;

    assert_eq!(res.conversation_id, Some("conv-123".to_string()));
    assert_eq!(res.messages.len(), 1);
    assert_eq!(res.messages[0].role, Role::Assistant);
    assert_eq!(res.messages[0].suggestions.as_ref().map(|e| return e.len()), Some(4));

    return Ok(());
}

#[tokio::test]
async fn it_sends_conversation_id_and_text() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({
            "conversationId": "conv-123",
            "channel": "web",
            "locale": "en-GB",
            "text": "2025-09-05 dinner 4 Salamanca Italian €€"
        })))
        .with_status(200)
        .with_body(r#"{"messages":[]}"#)
        .create_async()
        .await;

    let transport = HttpTransport::with_url(server.url());
    let res = transport
        .send(ChatRequest::new(
            Some("conv-123".to_string()),
            ChatPayload::Text("2025-09-05 dinner 4 Salamanca Italian €€".to_string()),
        ))
        .await?;
    mock.assert_async().await;

    assert!(res.conversation_id.is_none());
    assert!(res.messages.is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_returns_backend_error_with_status_and_body() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let transport = HttpTransport::with_url(server.url());
    let err = transport
        .send(ChatRequest::new(None, ChatPayload::Empty))
        .await
        .unwrap_err();
    mock.assert_async().await;

    assert_eq!(
        err,
        TransportError::Backend {
            status: 500,
            body: "boom".to_string()
        }
    );

    return Ok(());
}

#[tokio::test]
async fn it_defaults_malformed_messages() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"conversationId":"conv-9","messages":{"oops":true}}"#)
        .create_async()
        .await;

    let transport = HttpTransport::with_url(server.url());
    let res = transport
        .send(ChatRequest::new(None, ChatPayload::Empty))
        .await?;
    mock.assert_async().await;

    assert_eq!(res.conversation_id, Some("conv-9".to_string()));
    assert!(res.messages.is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_fails_configuration_before_network() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let transport = HttpTransport::new(TransportConfig::new("", ""));
    let err = transport
        .send(ChatRequest::new(None, ChatPayload::Empty))
        .await
        .unwrap_err();
    mock.assert_async().await;

    assert_eq!(
        err,
        TransportError::Configuration {
            missing: vec!["api-url".to_string(), "api-token".to_string()]
        }
    );
    assert!(transport.validate().is_err());

    return Ok(());
}

#[tokio::test]
async fn it_returns_network_error_when_unreachable() -> Result<()> {
    // Nothing listens on port 9 (discard) in test environments.
    let transport = HttpTransport::with_url("http://127.0.0.1:9/api/chat".to_string());
    let err = transport
        .send(ChatRequest::new(None, ChatPayload::Empty))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));

    return Ok(());
}
