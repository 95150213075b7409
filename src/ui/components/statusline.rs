//! Help Bar Component
//!
//! Bottom row with key hints, or a progress note while verifying.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

const HINTS: [(&str, &str); 4] = [
    ("Tab", "next"),
    ("S-Tab", "previous"),
    ("Enter", "select"),
    ("Esc", "cancel"),
];

pub struct HelpBar {
    /// Animation frame while a verification is pending
    busy: Option<usize>,
}

impl HelpBar {
    pub fn new() -> Self {
        Self { busy: None }
    }

    pub fn busy(mut self, frame: usize) -> Self {
        self.busy = Some(frame);
        self
    }
}

impl Default for HelpBar {
    fn default() -> Self {
        Self::new()
    }
}

fn hint_line() -> Line<'static> {
    let mut spans = Vec::with_capacity(HINTS.len() * 2);
    for (key, label) in HINTS {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {label}  "), Style::default().fg(Color::Gray)));
    }
    Line::from(spans)
}

fn busy_line(frame: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {} ", SPINNER[frame % SPINNER.len()]),
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Verifying…", Style::default().fg(Color::Yellow)),
    ])
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.busy {
            Some(frame) => busy_line(frame),
            None => hint_line(),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
