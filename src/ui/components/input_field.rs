//! Input field widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::layout::fill_row;

/// Single-line bordered text box with a placeholder, like a login form entry.
pub struct InputField<'a> {
    placeholder: &'a str,
    value: &'a str,
    cursor: usize,
    masked: bool,
    focused: bool,
}

impl<'a> InputField<'a> {
    pub fn new(placeholder: &'a str, value: &'a str, cursor: usize) -> Self {
        Self { placeholder, value, cursor, masked: false, focused: false }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused { Color::Green } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let bg = if self.focused { Color::DarkGray } else { Color::Reset };
        fill_row(buf, inner.x, inner.y, inner.width, Style::default().bg(bg));

        let cursor = if self.value.is_empty() {
            let style = Style::default().fg(Color::Gray).bg(bg);
            buf.set_stringn(inner.x, inner.y, self.placeholder, inner.width as usize, style);
            0
        } else {
            let (visible, cursor) =
                visible_window(self.value, self.cursor, self.masked, inner.width as usize);
            buf.set_string(inner.x, inner.y, &visible, Style::default().fg(Color::White).bg(bg));
            cursor
        };

        if self.focused {
            render_cursor(buf, inner.x + cursor as u16, inner.y, inner.x + inner.width);
        }
    }
}

/// Text to draw and the cursor column, scrolled so the cursor stays visible
fn visible_window(value: &str, cursor: usize, masked: bool, width: usize) -> (String, usize) {
    let display: String = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let scroll = if cursor >= width.saturating_sub(1) {
        cursor.saturating_sub(width.saturating_sub(2))
    } else {
        0
    };

    let visible = display.chars().skip(scroll).take(width).collect();
    (visible, cursor.saturating_sub(scroll))
}

fn render_cursor(buf: &mut Buffer, x: u16, y: u16, max_x: u16) {
    if x >= max_x {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
    }
}
