#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::time::Instant;

use serde_json::Value;

use super::DuplicateGuard;
use super::PendingSelections;
use crate::domain::models::ChatPayload;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::SessionSettings;
use crate::domain::models::SessionStoreBox;
use crate::domain::models::StoreSlot;
use crate::domain::models::Suggestion;
use crate::domain::models::SuggestionAction;
use crate::domain::models::Theme;
use crate::domain::models::Toast;
use crate::domain::models::ToastKind;
use crate::domain::models::TransportError;

/// Owns everything the user sees of a conversation and decides when a
/// request may be sent. At most one request is in flight: every trigger that
/// arrives while sending is dropped rather than queued.
///
/// Sending is split in two so the UI loop never blocks on the network:
/// `begin_*` returns the request to dispatch, and `complete_send` merges the
/// transport result once it arrives.
pub struct SessionController {
    conversation_id: Option<String>,
    transcript: Vec<Message>,
    pending_selections: PendingSelections,
    sending: bool,
    theme: Theme,
    toast: Option<Toast>,
    config_error: Option<TransportError>,
    bootstrapped: bool,
    duplicates: DuplicateGuard,
    settings: SessionSettings,
    store: SessionStoreBox,
}

impl SessionController {
    pub fn new(
        settings: SessionSettings,
        store: SessionStoreBox,
        config_error: Option<TransportError>,
        default_theme: Theme,
    ) -> SessionController {
        let conversation_id = store
            .get(StoreSlot::ConversationId)
            .filter(|id| return !id.is_empty());
        let theme = store
            .get(StoreSlot::Theme)
            .and_then(|theme| return theme.parse::<Theme>().ok())
            .unwrap_or(default_theme);

        tracing::debug!(
            conversation_id = ?conversation_id,
            theme = %theme,
            config_error = ?config_error,
            "Session restored"
        );

        return SessionController {
            conversation_id,
            transcript: vec![],
            pending_selections: PendingSelections::default(),
            sending: false,
            theme,
            toast: None,
            config_error,
            bootstrapped: false,
            duplicates: DuplicateGuard::new(settings.duplicate_window),
            settings,
            store,
        };
    }

    pub fn conversation_id(&self) -> Option<&str> {
        return self.conversation_id.as_deref();
    }

    pub fn transcript(&self) -> &[Message] {
        return &self.transcript;
    }

    pub fn pending_selections(&self) -> &PendingSelections {
        return &self.pending_selections;
    }

    pub fn is_sending(&self) -> bool {
        return self.sending;
    }

    pub fn theme(&self) -> Theme {
        return self.theme;
    }

    pub fn toast(&self) -> Option<&Toast> {
        return self.toast.as_ref();
    }

    pub fn config_error(&self) -> Option<&TransportError> {
        return self.config_error.as_ref();
    }

    /// Chips of the most recent assistant message. Older chips are never
    /// clickable.
    pub fn active_suggestions(&self) -> &[Suggestion] {
        if let Some(message) = self.last_assistant_message() {
            if let Some(suggestions) = &message.suggestions {
                return suggestions;
            }
        }

        return &[];
    }

    fn last_assistant_message(&self) -> Option<&Message> {
        return self
            .transcript
            .iter()
            .rev()
            .find(|message| return message.role == Role::Assistant);
    }

    fn clear_stale_suggestions(&mut self) {
        if let Some(message) = self
            .transcript
            .iter_mut()
            .rev()
            .find(|message| return message.role == Role::Assistant)
        {
            message.suggestions = None;
        }
    }

    fn can_send(&self) -> bool {
        if self.sending {
            tracing::debug!("Request already in flight, ignoring trigger");
            return false;
        }
        if self.config_error.is_some() {
            tracing::debug!("Configuration is incomplete, ignoring trigger");
            return false;
        }

        return true;
    }

    /// Requests the opening greeting on first mount. Fires at most once, and
    /// never when a conversation is already in progress.
    pub fn bootstrap(&mut self, now: Instant) -> Option<ChatRequest> {
        if self.bootstrapped {
            return None;
        }
        self.bootstrapped = true;

        if self.conversation_id.is_some() || self.config_error.is_some() {
            return None;
        }

        return self.begin_send(None, None, now);
    }

    /// Starts a send. `text` is echoed into the transcript; the request
    /// carries `action` when it is a JSON object, otherwise `text`, otherwise
    /// nothing. Returns `None` when the trigger is rejected.
    pub fn begin_send(
        &mut self,
        text: Option<&str>,
        action: Option<Value>,
        now: Instant,
    ) -> Option<ChatRequest> {
        if !self.can_send() {
            return None;
        }

        let text = text
            .map(|text| return text.trim())
            .filter(|text| return !text.is_empty());

        let action = action.filter(|action| {
            if action.is_object() {
                return true;
            }
            tracing::debug!(action = ?action, "Action is not an object, sending without it");
            return false;
        });

        let payload = match (&action, text) {
            (Some(action), _) => ChatPayload::Action(action.clone()),
            (None, Some(text)) => ChatPayload::Text(text.to_string()),
            (None, None) => ChatPayload::Empty,
        };

        if !self.duplicates.accept(text, &payload, now) {
            tracing::debug!(payload = ?payload, "Duplicate submission ignored");
            return None;
        }

        self.sending = true;

        if let Some(text) = text {
            self.echo(text);
        }

        let request = ChatRequest::new(self.conversation_id.clone(), payload);
        tracing::debug!(request = ?request, "Sending request");

        return Some(request);
    }

    fn echo(&mut self, text: &str) {
        if let Some(last) = self.transcript.last() {
            if last.role == Role::User && last.text == text {
                return;
            }
        }

        self.transcript.push(Message::new(Role::User, text));
    }

    /// Merges the outcome of the request started by `begin_send`.
    pub fn complete_send(&mut self, result: Result<ChatResponse, TransportError>, now: Instant) {
        if !self.sending {
            tracing::warn!("Received a response with no request in flight, ignoring");
            return;
        }
        self.sending = false;

        match result {
            Ok(response) => {
                if let Some(id) = response.conversation_id {
                    if self.conversation_id.as_deref() != Some(id.as_str()) {
                        tracing::info!(conversation_id = %id, "Conversation started");
                        if let Err(err) = self.store.set(StoreSlot::ConversationId, &id) {
                            tracing::error!(error = ?err, "Failed to persist conversation id");
                        }
                        self.conversation_id = Some(id);
                    }
                }

                let confirmed = response
                    .messages
                    .last()
                    .map(|message| {
                        return self.settings.confirmation_pattern.is_match(&message.text);
                    })
                    .unwrap_or(false);

                self.transcript.extend(response.messages);

                if confirmed {
                    self.show_toast(
                        ToastKind::Success,
                        "Booking confirmed! Check your email for the details.",
                        now,
                    );
                }
            }
            Err(err) => {
                tracing::error!(error = ?err, "Request to the booking service failed");
                self.transcript.push(Message::new_with_type(
                    Role::Assistant,
                    MessageType::Error,
                    &format!("Sorry, I couldn't get through to the restaurants. {err}"),
                ));
                self.show_toast(ToastKind::Error, &err.to_string(), now);
            }
        }
    }

    /// Acts on a chip from the most recent assistant message. Toggle chips
    /// only change local selections; every other chip sends a request, which
    /// is returned for dispatch.
    pub fn click_chip(&mut self, suggestion: &Suggestion, now: Instant) -> Option<ChatRequest> {
        if !self.can_send() {
            return None;
        }

        let action = SuggestionAction::parse(&suggestion.action);
        let refine_group = action.refine_group();
        match action {
            SuggestionAction::ToggleLocal { group, value } => {
                let selected = self.pending_selections.toggle(&group, &value);
                tracing::debug!(group = %group, value = %value, selected, "Toggled chip");
                return None;
            }
            SuggestionAction::SubmitCuisines | SuggestionAction::SubmitAreas => {
                let group = refine_group?;
                let selected = self.pending_selections.get(group.group_name());
                let request = self.begin_chip_send(
                    &group.summary(&selected),
                    Some(group.action(&selected)),
                    now,
                )?;

                self.clear_stale_suggestions();
                self.pending_selections.clear(group.group_name());

                return Some(request);
            }
            SuggestionAction::Generic(payload) => {
                let request = self.begin_chip_send(&suggestion.title, Some(payload), now)?;
                self.clear_stale_suggestions();

                return Some(request);
            }
        }
    }

    /// `begin_send` for chips. Sending was already checked to be allowed, so
    /// a rejection here is always a repeated click.
    fn begin_chip_send(
        &mut self,
        echo: &str,
        action: Option<Value>,
        now: Instant,
    ) -> Option<ChatRequest> {
        let request = self.begin_send(Some(echo), action, now);
        if request.is_none() {
            self.show_toast(ToastKind::Info, "That choice was just sent.", now);
        }

        return request;
    }

    /// Forgets the conversation and asks the backend for a fresh greeting.
    /// Ignored while a request is in flight so a late response can't leak
    /// into the new conversation.
    pub fn reset(&mut self, now: Instant) -> Option<ChatRequest> {
        if self.sending {
            tracing::debug!("Request in flight, ignoring reset");
            return None;
        }

        if let Err(err) = self.store.clear(StoreSlot::ConversationId) {
            tracing::error!(error = ?err, "Failed to clear conversation id");
        }
        tracing::info!(conversation_id = ?self.conversation_id, "Conversation reset");

        self.conversation_id = None;
        self.transcript.clear();
        self.pending_selections.clear_all();
        self.duplicates.reset();
        self.toast = None;
        self.bootstrapped = false;

        return self.bootstrap(now);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        if let Err(err) = self.store.set(StoreSlot::Theme, &self.theme.to_string()) {
            tracing::error!(error = ?err, "Failed to persist theme");
        }

        return self.theme;
    }

    pub fn show_toast(&mut self, kind: ToastKind, text: &str, now: Instant) {
        self.toast = Some(Toast::new(kind, text, now));
    }

    pub fn dismiss_expired_toast(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if toast.is_expired(now) {
                self.toast = None;
            }
        }
    }
}
