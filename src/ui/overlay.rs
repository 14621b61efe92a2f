// Centered message boxes drawn over the playfield

use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A message to display as an overlay in the center of the field
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMessage {
    /// Lines of text; the first one is drawn bold
    pub lines: Vec<String>,
    pub title: Option<String>,
    pub style: OverlayStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStyle {
    /// Waiting for the players (cyan border)
    Info,
    /// Match result (green border)
    Result,
}

impl OverlayMessage {
    pub fn info(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Info,
        }
    }

    pub fn result(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Result,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Result => Color::Green,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Result => Color::LightGreen,
        }
    }
}

/// Render an overlay message centered in `area`, shrinking to fit
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    let max_line_length = message
        .lines
        .iter()
        .chain(message.title.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    // Borders plus one column / row of padding on each side
    let overlay_width = (max_line_length as u16 + 6).min(area.width);
    let overlay_height = (message.lines.len() as u16 + 4).min(area.height);
    if overlay_width < 3 || overlay_height < 3 {
        return;
    }

    let overlay_area = Rect {
        x: area.x + (area.width - overlay_width) / 2,
        y: area.y + (area.height - overlay_height) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));
    if let Some(title) = &message.title {
        block = block.title(format!(" {} ", title));
    }
    frame.render_widget(block, overlay_area);

    let text_style = Style::default().fg(message.text_color());
    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                text_style.add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            Line::from(Span::styled(line.clone(), style))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, overlay_area.inner(Margin::new(2, 1)));
}
