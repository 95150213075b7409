//! Login Form Component
//!
//! Unique code and password entry with the Log In, Register and Cancel
//! buttons and the forgot-password link.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::auth::{Credentials, ValidationError};
use crate::input::{handle_text_key, SecureTextBuffer, TextBuffer, TextEditing};

use super::input_field::InputField;
use super::layout::{centered_rect_fixed, render_centered_text};

pub const CARD_WIDTH: u16 = 46;
pub const CARD_HEIGHT: u16 = 17;

const FOCUS_ORDER: [Focus; 6] = [
    Focus::UniqueCode,
    Focus::Password,
    Focus::ForgotPassword,
    Focus::LogIn,
    Focus::Register,
    Focus::Cancel,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    UniqueCode,
    Password,
    ForgotPassword,
    LogIn,
    Register,
    Cancel,
}

impl Focus {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::UniqueCode | Self::Password)
    }

    fn position(&self) -> usize {
        FOCUS_ORDER.iter().position(|f| f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub unique_code: TextBuffer,
    pub password: SecureTextBuffer,
    pub focus: Focus,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            unique_code: TextBuffer::new(),
            password: SecureTextBuffer::new(),
            focus: Focus::UniqueCode,
        }
    }

    pub fn next_focus(&mut self) {
        let next = (self.focus.position() + 1) % FOCUS_ORDER.len();
        self.focus = FOCUS_ORDER[next];
    }

    pub fn prev_focus(&mut self) {
        let pos = self.focus.position();
        let prev = if pos == 0 { FOCUS_ORDER.len() - 1 } else { pos - 1 };
        self.focus = FOCUS_ORDER[prev];
    }

    /// Route an editing key to the focused field. Returns false when no text
    /// field has focus or the key is not an editing key.
    pub fn handle_text_key(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        match self.focus {
            Focus::UniqueCode => handle_text_key(&mut self.unique_code, code, mods),
            Focus::Password => handle_text_key(&mut self.password, code, mods),
            _ => false,
        }
    }

    /// Trimmed, presence-checked credentials from the current field values.
    pub fn credentials(&self) -> Result<Credentials, ValidationError> {
        Credentials::parse(self.unique_code.content(), self.password.content())
    }
}

pub struct LoginFormWidget<'a> {
    form: &'a LoginForm,
    busy: bool,
}

impl<'a> LoginFormWidget<'a> {
    pub fn new(form: &'a LoginForm) -> Self {
        Self { form, busy: false }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

fn render_card_block(buf: &mut Buffer, card: Rect) -> Rect {
    Clear.render(card, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(card);
    block.render(card, buf);
    // Side padding inside the card
    Rect::new(inner.x + 2, inner.y, inner.width.saturating_sub(4), inner.height)
}

fn button_style(color: Color, focused: bool) -> Style {
    let style = Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD);
    if focused {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn render_button(buf: &mut Buffer, area: Rect, label: &str, color: Color, focused: bool) {
    let style = button_style(color, focused);
    for x in area.x..area.x + area.width {
        if let Some(cell) = buf.cell_mut((x, area.y)) {
            cell.set_char(' ').set_style(style);
        }
    }
    let text = if focused { format!("▸ {label} ◂") } else { label.to_string() };
    render_centered_text(buf, area, area.y, &text, style);
}

fn render_link(buf: &mut Buffer, x: u16, y: u16, focused: bool) {
    let mut style = Style::default().fg(Color::LightBlue);
    if focused {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }
    buf.set_string(x, y, "Forgot Password?", style);
}

impl Widget for LoginFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let card = centered_rect_fixed(CARD_WIDTH, CARD_HEIGHT, area);
        let inner = render_card_block(buf, card);
        if inner.height < CARD_HEIGHT - 2 {
            return;
        }

        let focus = self.form.focus;
        let title_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        render_centered_text(buf, inner, inner.y, "Imhotep", title_style);
        let subtitle_style = Style::default().fg(Color::Gray);
        render_centered_text(buf, inner, inner.y + 1, "Log in to your account", subtitle_style);

        let code = &self.form.unique_code;
        InputField::new("Unique Code", code.content(), code.cursor())
            .focused(focus == Focus::UniqueCode)
            .render(Rect::new(inner.x, inner.y + 3, inner.width, 3), buf);

        let password = &self.form.password;
        InputField::new("Password", password.content(), password.cursor())
            .masked()
            .focused(focus == Focus::Password)
            .render(Rect::new(inner.x, inner.y + 6, inner.width, 3), buf);

        render_link(buf, inner.x, inner.y + 9, focus == Focus::ForgotPassword);

        let log_in = Rect::new(inner.x, inner.y + 11, inner.width, 1);
        render_button(buf, log_in, "Log In", Color::Blue, focus == Focus::LogIn);

        let half = inner.width.saturating_sub(2) / 2;
        let register = Rect::new(inner.x, inner.y + 13, half, 1);
        let cancel = Rect::new(inner.x + inner.width - half, inner.y + 13, half, 1);
        render_button(buf, register, "Register", Color::Green, focus == Focus::Register);
        render_button(buf, cancel, "Cancel", Color::Red, focus == Focus::Cancel);

        if self.busy {
            let busy_style = Style::default().fg(Color::Yellow);
            render_centered_text(buf, inner, inner.y + 14, "Verifying…", busy_style);
        }
    }
}
