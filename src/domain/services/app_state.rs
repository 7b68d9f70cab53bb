#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::time::Instant;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::ChipLabel;
use super::Palette;
use super::Scroll;
use super::SessionController;
use super::Themes;
use crate::domain::models::Action;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::SlashCommand;
use crate::domain::models::ToastKind;
use crate::domain::models::TransportError;

/// Rows below the chat area: the toast line and the composer.
pub const TOAST_HEIGHT: u16 = 1;
pub const COMPOSER_HEIGHT: u16 = 4;

pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub scroll: Scroll,
    pub session: SessionController,
    pub show_help: bool,
}

impl AppState {
    pub fn new(session: SessionController) -> AppState {
        let palette = Themes::palette(session.theme());
        return AppState {
            bubble_list: BubbleList::new(palette),
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            session,
            show_help: false,
        };
    }

    pub fn palette(&self) -> Palette {
        return Themes::palette(self.session.theme());
    }

    /// Requests the greeting when the conversation is new.
    pub fn bootstrap(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let request = self.session.bootstrap(Instant::now());
        self.dispatch(request, tx)?;
        return Ok(());
    }

    /// Returns `(should_break, should_continue)` for the UI loop. Input that
    /// isn't a command returns `(false, false)` and should be sent as text.
    pub fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let command = match SlashCommand::parse(input_str) {
            Some(command) => command,
            None => return Ok((false, false)),
        };

        if command.is_quit() {
            return Ok((true, false));
        }

        if command.is_help() {
            self.show_help = true;
            return Ok((false, true));
        }

        if command.is_theme() {
            self.toggle_theme();
            return Ok((false, true));
        }

        if command.is_reset() {
            if self.session.is_sending() {
                self.session.show_toast(
                    ToastKind::Info,
                    "Hold on, still waiting for the restaurants.",
                    Instant::now(),
                );
                return Ok((false, true));
            }

            let request = self.session.reset(Instant::now());
            self.dispatch(request, tx)?;
            self.scroll.last();
            return Ok((false, true));
        }

        if command.is_chip() {
            match command.chip_number() {
                Some(number) => self.click_chip(number, tx)?,
                None => {
                    self.session.show_toast(
                        ToastKind::Error,
                        "Use /chip with the number shown next to a chip, e.g. /chip 1",
                        Instant::now(),
                    );
                }
            }
            return Ok((false, true));
        }

        return Ok((false, false));
    }

    /// Sends free text. Returns whether the text was accepted, in which case
    /// the composer should be cleared.
    pub fn submit_text(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        let request = self.session.begin_send(Some(input_str), None, Instant::now());
        let accepted = self.dispatch(request, tx)?;
        if accepted {
            self.scroll.last();
        }

        return Ok(accepted);
    }

    /// Clicks the one based chip `number` under the latest reply.
    pub fn click_chip(&mut self, number: usize, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let suggestion = match self.session.active_suggestions().get(number.saturating_sub(1)) {
            Some(suggestion) => suggestion.clone(),
            None => {
                self.session.show_toast(
                    ToastKind::Error,
                    &format!("There is no chip number {number}."),
                    Instant::now(),
                );
                return Ok(());
            }
        };

        let request = self.session.click_chip(&suggestion, Instant::now());
        self.dispatch(request, tx)?;
        self.sync_dependants();

        return Ok(());
    }

    pub fn handle_backend_response(&mut self, res: Result<ChatResponse, TransportError>) {
        self.session.complete_send(res, Instant::now());
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn toggle_theme(&mut self) {
        self.session.toggle_theme();
        self.bubble_list.set_palette(self.palette());
        self.sync_dependants();
    }

    pub fn tick(&mut self) {
        self.session.dismiss_expired_toast(Instant::now());
    }

    /// Resizes the chat area to what is left of a `width` x `height`
    /// terminal once the toast line and the composer are laid out.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let chat_height = height
            .saturating_sub(TOAST_HEIGHT + COMPOSER_HEIGHT)
            .max(1);
        self.set_rect(Rect::new(0, 0, width, chat_height));
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn dispatch(
        &mut self,
        request: Option<ChatRequest>,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        let request = match request {
            Some(request) => request,
            None => return Ok(false),
        };

        tx.send(Action::BackendRequest(request))?;
        self.sync_dependants();

        return Ok(true);
    }

    pub fn sync_dependants(&mut self) {
        let chips = ChipLabel::from_suggestions(
            self.session.active_suggestions(),
            self.session.pending_selections(),
        );

        self.bubble_list.set_messages(
            self.session.transcript(),
            &chips,
            self.last_known_width.into(),
        );

        self.scroll.set_state(
            self.bubble_list.len().try_into().unwrap_or(u16::MAX),
            self.last_known_height,
        );

        if self.session.is_sending() {
            self.scroll.last();
        }
    }
}
