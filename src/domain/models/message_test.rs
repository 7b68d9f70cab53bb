use serde_json::json;

use super::Message;
use super::MessageType;
use super::Role;
use super::Suggestion;

impl Suggestion {
    pub fn new(title: &str, action: serde_json::Value) -> Suggestion {
        return Suggestion {
            title: title.to_string(),
            action,
        };
    }
}

impl Message {
    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Message {
        self.suggestions = Some(suggestions);
        return self;
    }
}

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::Assistant, "Hi there!");
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.role.to_string(), "Tablebook");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert!(msg.suggestions.is_none());
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Role::User, "\t\tHi there!");
    assert_eq!(msg.role.to_string(), "You");
    assert_eq!(msg.text, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Role::Assistant, MessageType::Error, "It broke!");
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_decodes_suggestions() {
    let msg: Message = serde_json::from_value(json!({
        "role": "assistant",
        "text": "Pick one",
        "suggestions": [
            { "title": "Italian", "action": { "type": "pick" } },
            { "title": "Menu" }
        ]
    }))
    .unwrap();

    assert_eq!(
        msg.suggestions,
        Some(vec![
            Suggestion::new("Italian", json!({ "type": "pick" })),
            Suggestion::new("Menu", serde_json::Value::Null),
        ])
    );
}

#[test]
fn it_splits_line_breaks_into_lines() {
    let msg = Message::new(Role::Assistant, "Table for 4\n\nSalamanca, 21:00");
    assert_eq!(
        msg.as_string_lines(50),
        vec![
            "Table for 4".to_string(),
            " ".to_string(),
            "Salamanca, 21:00".to_string()
        ]
    );
}

#[test]
fn it_wraps_long_lines() {
    let msg = Message::new(
        Role::Assistant,
        "I found three Italian restaurants in Salamanca for four people",
    );
    let lines = msg.as_string_lines(20);

    assert_eq!(
        lines,
        vec![
            "I found three".to_string(),
            "Italian restaurants".to_string(),
            "in Salamanca for".to_string(),
            "four people".to_string(),
        ]
    );
}

#[test]
fn it_does_not_emit_empty_line_for_long_word() {
    let msg = Message::new(Role::Assistant, "supercalifragilistic ok");
    let lines = msg.as_string_lines(5);
    assert_eq!(
        lines,
        vec!["supercalifragilistic".to_string(), "ok".to_string()]
    );
}

#[test]
fn it_deserializes_backend_messages() {
    let msg: Message = serde_json::from_value(json!({
        "role": "assistant",
        "text": "Which cuisines?",
        "suggestions": [
            { "title": "Italian", "action": { "clientOnly": true, "type": "toggle", "group": "cuisine", "value": "Italian" } }
        ]
    }))
    .unwrap();

    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.message_type(), MessageType::Normal);
    assert_eq!(msg.suggestions.unwrap()[0].title, "Italian");
}

#[test]
fn it_defaults_missing_role_to_assistant() {
    let msg: Message = serde_json::from_value(json!({ "text": "Hello!" })).unwrap();
    assert_eq!(msg.role, Role::Assistant);
    assert!(msg.suggestions.is_none());
}
