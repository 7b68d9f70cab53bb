use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

use crate::domain::services::Palette;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn new(palette: &Palette) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        TextArea::apply_palette(&mut textarea, palette);

        return textarea;
    }

    /// Restyles an existing composer, keeping whatever was typed.
    pub fn apply_palette(textarea: &mut tui_textarea::TextArea<'a>, palette: &Palette) {
        textarea.set_style(Style::default().fg(palette.foreground).bg(palette.background));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(palette.muted))
                .title("Where and when would you like to eat? (/help for commands)")
                .padding(Padding::new(1, 1, 0, 0)),
        );
    }
}
