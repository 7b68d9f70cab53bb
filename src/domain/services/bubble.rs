#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::Palette;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub border_elements_length: usize,
    pub outer_padding_percentage: usize,
}

fn repeat_from_subtractions(text: &str, total: usize, subtractions: &[usize]) -> String {
    let used: usize = subtractions.iter().sum();
    return text.repeat(total.saturating_sub(used));
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // left border + left padding + (text, not counted) + right padding + right border.
            border_elements_length: 4,
            outer_padding_percentage: 4,
        };
    }

    pub fn as_lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let text_lines = self.message.as_string_lines(max_line_length);

        let inner_length = text_lines
            .iter()
            .map(|line| return line.chars().count())
            .chain([self.username().chars().count()])
            .max()
            .unwrap_or_default();

        let text_style = Style::default().fg(palette.foreground);
        let border_style = self.border_style(palette);

        let lines = text_lines
            .into_iter()
            .map(|line| {
                let fill = repeat_from_subtractions(" ", inner_length, &[line.chars().count()]);
                return self.pad_line(
                    vec![
                        Span::styled("│ ", border_style),
                        Span::styled(line, text_style),
                        Span::styled(format!("{fill} │"), border_style),
                    ],
                    inner_length,
                );
            })
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, inner_length, border_style);
    }

    fn username(&self) -> String {
        return self.message.role.to_string();
    }

    /// Widest text line allowed, leaving room for borders and a minimum
    /// outer padding.
    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Rounded up so narrow windows still get a column of padding.
        let min_bubble_padding_length =
            (self.window_max_width * style_config.outer_padding_percentage + 99) / 100;
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;

        return self
            .window_max_width
            .saturating_sub(line_border_width)
            .max(self.username().chars().count())
            .max(1);
    }

    fn pad_line(&self, spans: Vec<Span<'static>>, inner_length: usize) -> Line<'static> {
        let outer_bubble_padding = repeat_from_subtractions(
            " ",
            self.window_max_width,
            &[inner_length, Bubble::style_config().border_elements_length],
        );

        if self.alignment == BubbleAlignment::Left {
            let mut line_spans = spans;
            line_spans.push(Span::from(outer_bubble_padding));
            return Line::from(line_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(spans);
        return Line::from(line_spans);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        inner_length: usize,
        border_style: Style,
    ) -> Vec<Line<'static>> {
        let username = self.username();
        // Add 2 for the padding next to the vertical bars.
        let top_fill =
            repeat_from_subtractions("─", inner_length + 2, &[username.chars().count()]);
        let top_bar = format!("╭{username}{top_fill}╮");
        let bottom_bar = format!("╰{}╯", "─".repeat(inner_length + 2));

        let mut res = vec![self.pad_line(vec![Span::styled(top_bar, border_style)], inner_length)];
        res.extend(lines);
        res.push(self.pad_line(
            vec![Span::styled(bottom_bar, border_style)],
            inner_length,
        ));

        return res;
    }

    fn border_style(&self, palette: &Palette) -> Style {
        if self.message.message_type() == MessageType::Error {
            return Style::default().fg(palette.error);
        }
        if self.message.role == Role::User {
            return Style::default().fg(palette.user);
        }

        return Style::default().fg(palette.assistant);
    }
}
