//! Modal message dialog

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::layout::{centered_rect_fixed, create_popup_block, wrapped_height};

const DIALOG_WIDTH: u16 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
            Self::Critical => Color::LightRed,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Error => "✖",
            Self::Critical => "‼",
        }
    }
}

/// What a dialog says; owned so it can outlive the event that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogMessage {
    pub severity: Severity,
    pub title: String,
    pub text: String,
}

impl DialogMessage {
    pub fn new(severity: Severity, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { severity, title: title.into(), text: text.into() }
    }
}

pub struct MessageDialog<'a> {
    message: &'a DialogMessage,
}

impl<'a> MessageDialog<'a> {
    pub fn new(message: &'a DialogMessage) -> Self {
        Self { message }
    }
}

impl Widget for MessageDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let severity = self.message.severity;
        let text_width = DIALOG_WIDTH.saturating_sub(4);
        // borders + text + blank + hint
        let height = wrapped_height(&self.message.text, text_width) + 4;
        let popup_area = centered_rect_fixed(DIALOG_WIDTH, height, area);
        Clear.render(popup_area, buf);

        let title = format!(" {} {} ", severity.icon(), self.message.title);
        let block = create_popup_block(&title, severity.color());
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let text_area = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(2),
        );
        Paragraph::new(self.message.text.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false })
            .render(text_area, buf);

        render_dismiss_hint(buf, inner);
    }
}

fn render_dismiss_hint(buf: &mut Buffer, inner: Rect) {
    if inner.height == 0 {
        return;
    }
    let hint = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" OK"),
    ]);
    let x = inner.x + inner.width.saturating_sub(hint.width() as u16) / 2;
    buf.set_line(x, inner.y + inner.height - 1, &hint, inner.width);
}
