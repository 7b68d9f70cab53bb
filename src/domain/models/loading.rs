#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::services::Palette;

const MAX_DOTS: usize = 3;

/// Stands in for the composer while a request is in flight. Every tick adds
/// a dot so a slow backend still looks alive.
#[derive(Default)]
pub struct Loading {
    dots: usize,
}

impl Loading {
    pub fn tick(&mut self) {
        self.dots = (self.dots + 1) % (MAX_DOTS + 1);
    }

    pub fn restart(&mut self) {
        self.dots = 0;
    }

    pub fn text(&self) -> String {
        return format!(
            "Checking with the restaurants{:<width$}",
            ".".repeat(self.dots),
            width = MAX_DOTS
        );
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, palette: &Palette) {
        let muted = Style::default().fg(palette.muted).bg(palette.background);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(muted)
            .padding(Padding::new(1, 1, 0, 0));

        frame.render_widget(
            Paragraph::new(self.text())
                .style(muted)
                .alignment(Alignment::Center)
                .block(block),
            rect,
        );
    }
}
