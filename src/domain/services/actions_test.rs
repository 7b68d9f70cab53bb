use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::help_text;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::ChatPayload;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Transport;
use crate::domain::models::TransportError;

struct EchoTransport {
    seen: Arc<Mutex<Vec<ChatRequest>>>,
}

#[async_trait]
impl Transport for EchoTransport {
    fn validate(&self) -> Result<(), TransportError> {
        return Ok(());
    }

    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        if request.text.as_deref() == Some("fail") {
            return Err(TransportError::Backend {
                status: 500,
                body: "boom".to_string(),
            });
        }

        return Ok(ChatResponse {
            conversation_id: Some("conv-123".to_string()),
            messages: vec![Message::new(
                Role::Assistant,
                &format!("You said {}", request.text.unwrap_or_default()),
            )],
        });
    }
}

#[tokio::test]
async fn it_posts_responses_in_request_order() -> Result<()> {
    let seen = Arc::new(Mutex::new(vec![]));
    let transport = Box::new(EchoTransport { seen: seen.clone() });
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    action_tx.send(Action::BackendRequest(ChatRequest::new(
        None,
        ChatPayload::Text("hello".to_string()),
    )))?;
    action_tx.send(Action::BackendRequest(ChatRequest::new(
        Some("conv-123".to_string()),
        ChatPayload::Text("fail".to_string()),
    )))?;
    drop(action_tx);

    ActionsService::start(transport, event_tx, &mut action_rx).await?;

    match event_rx.recv().await {
        Some(Event::BackendResponse(Ok(res))) => {
            assert_eq!(res.conversation_id, Some("conv-123".to_string()));
            assert_eq!(res.messages[0].text, "You said hello");
        }
        _ => bail!("Wrong enum"),
    }

    match event_rx.recv().await {
        Some(Event::BackendResponse(Err(err))) => {
            assert_eq!(
                err,
                TransportError::Backend {
                    status: 500,
                    body: "boom".to_string()
                }
            );
        }
        _ => bail!("Wrong enum"),
    }

    assert_eq!(seen.lock().unwrap().len(), 2);

    return Ok(());
}

#[test]
fn it_documents_every_command() {
    let text = help_text();
    for command in ["/chip", "/reset", "/theme", "/quit", "/help", "CTRL+T"] {
        assert!(text.contains(command), "missing {command}");
    }
}
