use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::models::ToastKind;
use crate::domain::models::TransportError;
use crate::domain::services::actions::help_text;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::COMPOSER_HEIGHT;
use crate::domain::services::TOAST_HEIGHT;
use crate::domain::services::Palette;
use crate::domain::services::SessionController;

fn render_config_error(frame: &mut Frame, err: &TransportError, palette: &Palette) {
    let mut text = err.setup_instructions().unwrap_or_else(|| return err.to_string());
    text = format!("{text}\n\nPress CTRL+C to exit.");

    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(palette.foreground).bg(palette.background))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Configuration needed")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.error))
                    .padding(Padding::new(1, 1, 1, 1)),
            ),
        frame.size(),
    );
}

fn render_toast(frame: &mut Frame, app_state: &AppState, rect: Rect, palette: &Palette) {
    let toast = match app_state.session.toast() {
        Some(toast) => toast,
        None => return,
    };

    let color = match toast.kind {
        ToastKind::Success => palette.success,
        ToastKind::Error => palette.error,
        ToastKind::Info => palette.info,
    };

    frame.render_widget(
        Paragraph::new(toast.text.to_string())
            .style(Style::default().fg(color).bg(palette.background))
            .alignment(Alignment::Center),
        rect,
    );
}

fn render_help(frame: &mut Frame, rect: Rect, palette: &Palette) {
    let area = rect.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!("{}\n\nPress any key to close.", help_text()))
            .style(Style::default().fg(palette.foreground).bg(palette.background))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.info))
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
        area,
    );
}

/// Shows setup instructions until the user quits. Nothing can be sent
/// without an endpoint and a token.
async fn start_config_error_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &AppState,
    err: &TransportError,
    events: &mut EventsService,
) -> Result<()> {
    let palette = app_state.palette();

    loop {
        terminal.draw(|frame| {
            render_config_error(frame, err, &palette);
        })?;

        if let Event::KeyboardCTRLC() = events.next().await? {
            return Ok(());
        }
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    if let Some(err) = app_state.session.config_error().cloned() {
        return start_config_error_loop(terminal, app_state, &err, &mut events).await;
    }

    let mut textarea = TextArea::new(&app_state.palette());
    let mut loading = Loading::default();
    app_state.bootstrap(&tx)?;

    loop {
        terminal.draw(|frame| {
            let palette = app_state.palette();
            frame.render_widget(
                Block::default().style(Style::default().bg(palette.background)),
                frame.size(),
            );

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Length(TOAST_HEIGHT),
                    Constraint::Max(COMPOSER_HEIGHT),
                ])
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            app_state
                .bubble_list
                .render(frame, layout[0], app_state.scroll.position);
            render_toast(frame, app_state, layout[1], &palette);

            if app_state.session.is_sending() {
                loading.render(frame, layout[2], &palette);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }

            if app_state.show_help {
                render_help(frame, layout[0], &palette);
            }
        })?;

        match events.next().await? {
            Event::BackendResponse(res) => {
                app_state.handle_backend_response(res);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLT() => {
                app_state.toggle_theme();
                TextArea::apply_palette(&mut textarea, &app_state.palette());
            }
            Event::KeyboardEnter() => {
                if app_state.show_help {
                    app_state.show_help = false;
                    continue;
                }
                if app_state.session.is_sending() {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(&input_str, &tx)?;
                if should_break {
                    break;
                }
                if should_continue {
                    textarea = TextArea::new(&app_state.palette());
                    continue;
                }

                if app_state.submit_text(&input_str, &tx)? {
                    textarea = TextArea::new(&app_state.palette());
                    loading.restart();
                }
            }
            Event::KeyboardChip(number) => {
                if app_state.show_help {
                    app_state.show_help = false;
                    continue;
                }
                if !app_state.session.is_sending() {
                    app_state.click_chip(number, &tx)?;
                    loading.restart();
                }
            }
            Event::KeyboardCharInput(input) => {
                if app_state.show_help {
                    app_state.show_help = false;
                    continue;
                }
                if !app_state.session.is_sending() {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.session.is_sending() {
                    textarea.insert_str(text);
                }
            }
            Event::UIResize(width, height) => {
                app_state.handle_resize(width, height);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                app_state.tick();
                if app_state.session.is_sending() {
                    loading.tick();
                }
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    session: SessionController,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(session);

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
