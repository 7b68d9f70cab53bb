#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use super::Palette;
use super::PendingSelections;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::Suggestion;
use crate::domain::models::SuggestionAction;

struct BubbleCacheEntry {
    role: Role,
    mtype: MessageType,
    text_len: usize,
    lines: Vec<Line<'static>>,
}

/// A chip as shown under the latest reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChipLabel {
    pub number: usize,
    pub title: String,
    pub selected: bool,
}

impl ChipLabel {
    pub fn from_suggestions(
        suggestions: &[Suggestion],
        selections: &PendingSelections,
    ) -> Vec<ChipLabel> {
        return suggestions
            .iter()
            .enumerate()
            .map(|(idx, suggestion)| {
                let selected = match SuggestionAction::parse(&suggestion.action) {
                    SuggestionAction::ToggleLocal { group, value } => {
                        selections.contains(&group, &value)
                    }
                    _ => false,
                };

                return ChipLabel {
                    number: idx + 1,
                    title: suggestion.title.to_string(),
                    selected,
                };
            })
            .collect();
    }

    pub fn text(&self) -> String {
        if self.selected {
            return format!("({}) [x] {}", self.number, self.title);
        }

        return format!("({}) {}", self.number, self.title);
    }
}

pub struct BubbleList {
    cache: HashMap<usize, BubbleCacheEntry>,
    chip_lines: Vec<Line<'static>>,
    line_width: usize,
    lines_len: usize,
    palette: Palette,
}

impl BubbleList {
    pub fn new(palette: Palette) -> BubbleList {
        return BubbleList {
            cache: HashMap::new(),
            chip_lines: vec![],
            line_width: 0,
            lines_len: 0,
            palette,
        };
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if self.palette != palette {
            self.palette = palette;
            self.cache.clear();
        }
    }

    pub fn set_messages(&mut self, messages: &[Message], chips: &[ChipLabel], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }
        self.cache.retain(|idx, _| return *idx < messages.len());

        let messages_len: usize = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if cache_entry.role == message.role
                        && cache_entry.mtype == message.message_type()
                        && cache_entry.text_len == message.text.len()
                    {
                        return cache_entry.lines.len();
                    }
                }

                let mut align = BubbleAlignment::Left;
                if message.role == Role::User {
                    align = BubbleAlignment::Right;
                }

                let bubble_lines = Bubble::new(message, align, line_width).as_lines(&self.palette);
                let bubble_line_len = bubble_lines.len();

                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        role: message.role,
                        mtype: message.message_type(),
                        text_len: message.text.len(),
                        lines: bubble_lines,
                    },
                );

                return bubble_line_len;
            })
            .sum();

        self.chip_lines = self.build_chip_lines(chips, line_width);
        self.lines_len = messages_len + self.chip_lines.len();
    }

    /// Lays chips out left to right, breaking onto a new row when the next one
    /// doesn't fit.
    fn build_chip_lines(&self, chips: &[ChipLabel], line_width: usize) -> Vec<Line<'static>> {
        if chips.is_empty() {
            return vec![];
        }

        let mut lines = vec![];
        let mut spans: Vec<Span<'static>> = vec![];
        let mut line_char_count = 0;

        for chip in chips {
            let text = format!(" {} ", chip.text());
            let text_len = text.chars().count() + 1;

            if !spans.is_empty() && line_char_count + text_len > line_width {
                lines.push(Line::from(spans));
                spans = vec![];
                line_char_count = 0;
            }

            let mut style = Style::default()
                .fg(self.palette.chip)
                .add_modifier(Modifier::REVERSED);
            if chip.selected {
                style = Style::default()
                    .fg(self.palette.chip_selected)
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }

            spans.push(Span::styled(text, style));
            spans.push(Span::from(" "));
            line_char_count += text_len;
        }
        lines.push(Line::from(spans));

        lines.push(Line::from(Span::styled(
            "Pick a chip with /chip NUMBER",
            Style::default().fg(self.palette.muted),
        )));

        return lines;
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();

        let mut lines: Vec<Line<'static>> = indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| return entry.lines.to_owned())
            .collect();
        lines.extend(self.chip_lines.to_owned());

        return lines;
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines())
                .style(Style::default().bg(self.palette.background))
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
