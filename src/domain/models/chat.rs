#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use super::Message;

pub const CHAT_CHANNEL: &str = "web";
pub const CHAT_LOCALE: &str = "en-GB";

/// What a single request carries besides the conversation metadata. The
/// backend accepts free text or a structured action, never both.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatPayload {
    Empty,
    Text(String),
    Action(Value),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub channel: String,
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
}

impl ChatRequest {
    pub fn new(conversation_id: Option<String>, payload: ChatPayload) -> ChatRequest {
        let mut req = ChatRequest {
            conversation_id,
            channel: CHAT_CHANNEL.to_string(),
            locale: CHAT_LOCALE.to_string(),
            text: None,
            action: None,
        };

        match payload {
            ChatPayload::Empty => (),
            ChatPayload::Text(text) => req.text = Some(text),
            ChatPayload::Action(action) => req.action = Some(action),
        }

        return req;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub messages: Vec<Message>,
}

impl ChatResponse {
    /// Decodes a successful response body. Anything that doesn't look like a
    /// list of messages is treated as no messages at all. Messages that fail
    /// to decode are dropped one by one, keeping the rest.
    pub fn from_body(body: &str) -> ChatResponse {
        let value = match serde_json::from_str::<Value>(body) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = ?err, "Response body is not JSON, treating as empty");
                return ChatResponse::default();
            }
        };

        let conversation_id = value
            .get("conversationId")
            .and_then(|id| return id.as_str())
            .filter(|id| return !id.is_empty())
            .map(|id| return id.to_string());

        let messages = match value.get("messages") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| {
                    match serde_json::from_value::<Message>(item.to_owned()) {
                        Ok(message) => return Some(message),
                        Err(err) => {
                            tracing::warn!(error = ?err, index = idx, "Skipping malformed message in response");
                            return None;
                        }
                    }
                })
                .collect(),
            Some(other) => {
                tracing::warn!(messages = ?other, "Messages in response is not a list, treating as empty");
                vec![]
            }
            None => vec![],
        };

        return ChatResponse {
            conversation_id,
            messages,
        };
    }
}
