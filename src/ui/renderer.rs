//! Renderer
//!
//! Draws one frame of the login window from borrowed application state.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};

use super::components::{DialogMessage, HelpBar, LoginForm, LoginFormWidget, MessageDialog};
use super::components::layout::render_centered_text;

pub const WINDOW_TITLE: &str = "Imhotep Login";

pub struct UiState<'a> {
    pub form: &'a LoginForm,
    /// Spinner frame while a verification is pending
    pub busy: Option<usize>,
    pub dialog: Option<&'a DialogMessage>,
}

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &UiState) {
        let area = frame.area();
        if area.height < 3 {
            return;
        }

        let title_area = Rect::new(area.x, area.y, area.width, 1);
        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 2);
        let help_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

        let buf = frame.buffer_mut();
        let title_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        render_centered_text(buf, title_area, title_area.y, WINDOW_TITLE, title_style);

        frame.render_widget(LoginFormWidget::new(state.form).busy(state.busy.is_some()), body);

        let help = match state.busy {
            Some(tick) => HelpBar::new().busy(tick),
            None => HelpBar::new(),
        };
        frame.render_widget(help, help_area);

        if let Some(message) = state.dialog {
            frame.render_widget(MessageDialog::new(message), body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::Severity;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| Renderer::render(frame, state)).unwrap();
        crate::ui::components::test_support::buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_render_login_window() {
        let form = LoginForm::new();
        let text = draw(&UiState { form: &form, busy: None, dialog: None });
        assert!(text.contains(WINDOW_TITLE));
        assert!(text.contains("Unique Code"));
        assert!(text.contains("Esc"));
    }

    #[test]
    fn test_render_dialog_over_form() {
        let form = LoginForm::new();
        let dialog =
            DialogMessage::new(Severity::Error, "Error", "Incorrect password or unique code.");
        let text = draw(&UiState { form: &form, busy: None, dialog: Some(&dialog) });
        assert!(text.contains("Incorrect password or unique code."));
    }

    #[test]
    fn test_render_tiny_terminal() {
        let form = LoginForm::new();
        let mut terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
        let state = UiState { form: &form, busy: Some(1), dialog: None };
        terminal.draw(|frame| Renderer::render(frame, &state)).unwrap();
    }
}
