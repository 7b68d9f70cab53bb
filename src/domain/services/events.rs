#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;

use crate::domain::models::Event;

const TICK_INTERVAL: time::Duration = time::Duration::from_millis(500);

/// Maps a key press to a UI event. Anything without a binding goes to the
/// composer as is.
pub fn map_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(c) if alt && ('1'..='9').contains(&c) => {
            let number = c.to_digit(10).unwrap_or_default() as usize;
            return Some(Event::KeyboardChip(number));
        }
        KeyCode::Char('c') if ctrl => return Some(Event::KeyboardCTRLC()),
        KeyCode::Char('t') if ctrl => return Some(Event::KeyboardCTRLT()),
        KeyCode::Char('d') if ctrl => return Some(Event::UIScrollPageDown()),
        KeyCode::Char('u') if ctrl => return Some(Event::UIScrollPageUp()),
        KeyCode::Up => return Some(Event::UIScrollUp()),
        KeyCode::Down => return Some(Event::UIScrollDown()),
        KeyCode::PageUp => return Some(Event::UIScrollPageUp()),
        KeyCode::PageDown => return Some(Event::UIScrollPageDown()),
        KeyCode::Enter => return Some(Event::KeyboardEnter()),
        _ => return Some(Event::KeyboardCharInput(key.into())),
    }
}

/// Maps any terminal event to a UI event, dropping the ones the UI has no
/// use for.
pub fn map_terminal_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) => return map_key(key),
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Resize(width, height) => return Some(Event::UIResize(width, height)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        _ => return None,
    }
}

/// Single stream the UI loop waits on: terminal input, responses coming
/// back from the actions worker, and a tick that expires toasts.
pub struct EventsService {
    terminal: EventStream,
    worker: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(worker: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            terminal: EventStream::new(),
            worker,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let next = tokio::select! {
                event = self.worker.recv() => event,
                event = self.terminal.next() => match event {
                    Some(Ok(event)) => map_terminal_event(event),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "Failed to read terminal event");
                        None
                    }
                    None => None,
                },
                _ = time::sleep(TICK_INTERVAL) => Some(Event::UITick()),
            };

            if let Some(event) = next {
                return Ok(event);
            }
        }
    }
}
