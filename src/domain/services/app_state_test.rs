use anyhow::bail;
use anyhow::Result;
use serde_json::json;
use test_utils::greeting_response_fixture;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::SessionSettings;
use crate::domain::models::SessionStore;
use crate::domain::models::StoreSlot;
use crate::domain::models::Theme;
use crate::domain::models::ToastKind;
use crate::domain::services::SessionController;
use crate::infrastructure::stores::memory::MemoryStore;

fn new_app_state(store: &MemoryStore) -> AppState {
    let session = SessionController::new(
        SessionSettings::default(),
        Box::new(store.clone()),
        None,
        Theme::Dark,
    );

    let mut app_state = AppState::new(session);
    app_state.last_known_width = 100;
    app_state.last_known_height = 300;
    return app_state;
}

fn expect_request(rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<ChatRequest> {
    match rx.try_recv() {
        Ok(Action::BackendRequest(request)) => return Ok(request),
        Err(err) => bail!("No action sent: {err}"),
    }
}

/// App state that already shows the greeting and its chips.
fn greeted_app_state(
    store: &MemoryStore,
    tx: &mpsc::UnboundedSender<Action>,
    rx: &mut mpsc::UnboundedReceiver<Action>,
) -> Result<AppState> {
    let mut app_state = new_app_state(store);
    app_state.bootstrap(tx)?;
    expect_request(rx)?;
    app_state.handle_backend_response(Ok(ChatResponse::from_body(greeting_response_fixture())));

    return Ok(app_state);
}

mod handle_slash_commands {
    use super::*;

    #[test]
    fn it_breaks_on_quit() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = new_app_state(&MemoryStore::default());
        let (should_break, should_continue) = app_state.handle_slash_commands("/q", &tx)?;

        assert!(should_break);
        assert!(!should_continue);

        return Ok(());
    }

    #[test]
    fn it_passes_through_plain_text() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = new_app_state(&MemoryStore::default());
        let (should_break, should_continue) =
            app_state.handle_slash_commands("Dinner for 4 tonight", &tx)?;

        assert!(!should_break);
        assert!(!should_continue);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_shows_help() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = new_app_state(&MemoryStore::default());
        let (should_break, should_continue) = app_state.handle_slash_commands("/help", &tx)?;

        assert!(!should_break);
        assert!(should_continue);
        assert!(app_state.show_help);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_toggles_theme() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = new_app_state(&store);

        app_state.handle_slash_commands("/theme", &tx)?;

        assert_eq!(app_state.session.theme(), Theme::Light);
        assert_eq!(store.get(StoreSlot::Theme), Some("light".to_string()));

        return Ok(());
    }

    #[test]
    fn it_toggles_chip_without_sending() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = greeted_app_state(&store, &tx, &mut rx)?;

        let (_, should_continue) = app_state.handle_slash_commands("/chip 1", &tx)?;

        assert!(should_continue);
        assert!(rx.try_recv().is_err());
        assert!(app_state
            .session
            .pending_selections()
            .contains("cuisine", "Italian"));

        return Ok(());
    }

    #[test]
    fn it_submits_chip_selection() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = greeted_app_state(&store, &tx, &mut rx)?;

        app_state.handle_slash_commands("/c 2", &tx)?;
        app_state.handle_slash_commands("/c 3", &tx)?;

        let request = expect_request(&mut rx)?;
        assert_eq!(request.conversation_id, Some("conv-123".to_string()));
        assert_eq!(
            request.action,
            Some(json!({ "type": "refine_set_cuisines", "data": ["Japanese"] }))
        );
        assert!(app_state.session.is_sending());

        return Ok(());
    }

    #[test]
    fn it_rejects_unknown_chip_number() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = greeted_app_state(&store, &tx, &mut rx)?;

        app_state.handle_slash_commands("/chip 9", &tx)?;

        assert!(rx.try_recv().is_err());
        let toast = app_state.session.toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.text, "There is no chip number 9.");

        return Ok(());
    }

    #[test]
    fn it_requires_chip_number() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = greeted_app_state(&store, &tx, &mut rx)?;

        app_state.handle_slash_commands("/chip", &tx)?;

        assert!(rx.try_recv().is_err());
        assert_eq!(app_state.session.toast().unwrap().kind, ToastKind::Error);

        return Ok(());
    }

    #[test]
    fn it_resets_conversation() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = greeted_app_state(&store, &tx, &mut rx)?;

        app_state.handle_slash_commands("/reset", &tx)?;

        let request = expect_request(&mut rx)?;
        assert!(request.conversation_id.is_none());
        assert!(request.text.is_none());
        assert!(app_state.session.transcript().is_empty());
        assert!(store.get(StoreSlot::ConversationId).is_none());

        return Ok(());
    }

    #[test]
    fn it_does_not_reset_while_sending() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = greeted_app_state(&store, &tx, &mut rx)?;

        assert!(app_state.submit_text("Dinner for 4", &tx)?);
        expect_request(&mut rx)?;

        app_state.handle_slash_commands("/r", &tx)?;

        assert!(rx.try_recv().is_err());
        assert_eq!(app_state.session.conversation_id(), Some("conv-123"));
        assert_eq!(app_state.session.toast().unwrap().kind, ToastKind::Info);

        return Ok(());
    }
}

mod submit_text {
    use super::*;

    #[test]
    fn it_sends_text_once() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let mut app_state = greeted_app_state(&store, &tx, &mut rx)?;

        assert!(app_state.submit_text("  Dinner for 4  ", &tx)?);
        assert!(!app_state.submit_text("Dinner for 4", &tx)?);

        let request = expect_request(&mut rx)?;
        assert_eq!(request.text, Some("Dinner for 4".to_string()));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_renders_transcript_and_chips() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let store = MemoryStore::default();
        let app_state = greeted_app_state(&store, &tx, &mut rx)?;

        // Greeting bubble with two text lines, one chip row and the hint.
        assert_eq!(app_state.bubble_list.len(), 6);

        return Ok(());
    }
}

mod handle_resize {
    use super::*;

    #[test]
    fn it_leaves_room_for_toast_and_composer() {
        let mut app_state = new_app_state(&MemoryStore::default());
        app_state.handle_resize(120, 40);

        assert_eq!(app_state.last_known_width, 120);
        assert_eq!(app_state.last_known_height, 35);
    }

    #[test]
    fn it_keeps_one_row_on_tiny_terminals() {
        let mut app_state = new_app_state(&MemoryStore::default());
        app_state.handle_resize(20, 3);

        assert_eq!(app_state.last_known_height, 1);
    }
}
