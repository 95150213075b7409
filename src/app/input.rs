use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::components::Focus;

use super::App;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.cancel();
            return;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(key.code);
            return;
        }

        self.handle_form_key(key.code, key.modifiers);
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.dialog = None;
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, mods: KeyModifiers) {
        match (code, mods) {
            (KeyCode::Esc, _) => self.cancel(),
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => self.form.next_focus(),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.form.prev_focus(),
            (KeyCode::Enter, _) => self.activate_focused(),
            (KeyCode::Char(' '), KeyModifiers::NONE) if !self.form.focus.is_text() => {
                self.activate_focused()
            }
            _ => {
                // Keys no field understands are dropped
                let _handled = self.form.handle_text_key(code, mods);
            }
        }
    }

    fn activate_focused(&mut self) {
        match self.form.focus {
            // Enter inside either field submits, like the Log In button
            Focus::UniqueCode | Focus::Password | Focus::LogIn => self.submit(),
            Focus::ForgotPassword => self.forgot_password(),
            Focus::Register => {}
            Focus::Cancel => self.cancel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::login_handler::tests::{app_with, Stub};
    use crate::auth::VerificationOutcome;
    use crate::input::TextEditing;
    use crossterm::event::KeyEventState;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_tab_fill_both_fields() {
        let (mut app, _) = app_with(Stub::new(VerificationOutcome::NotMatched));
        type_text(&mut app, "ABC123");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "hunter 2");

        assert_eq!(app.form.unique_code.content(), "ABC123");
        assert_eq!(app.form.password.content(), "hunter 2");
    }

    #[test]
    fn test_enter_in_password_field_submits() {
        let (mut app, stub) = app_with(Stub::new(VerificationOutcome::Matched(7)));
        type_text(&mut app, "ABC123");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "hunter2");
        press(&mut app, KeyCode::Enter);

        app.wait_for_verification();
        assert_eq!(stub.calls(), 1);
        assert_eq!(app.dialog.as_ref().unwrap().text, "Welcome! You're logged in.");
    }

    #[test]
    fn test_dialog_is_modal_until_dismissed() {
        let (mut app, stub) = app_with(Stub::new(VerificationOutcome::NotMatched));
        press(&mut app, KeyCode::Enter);
        assert!(app.dialog.is_some());

        // Keys other than dismiss keys are swallowed
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Tab);
        assert!(app.form.unique_code.is_empty());
        assert!(app.dialog.is_some());

        press(&mut app, KeyCode::Enter);
        assert!(app.dialog.is_none());
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_escape_cancels() {
        let (mut app, stub) = app_with(Stub::new(VerificationOutcome::NotMatched));
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_cancel_button() {
        let (mut app, _) = app_with(Stub::new(VerificationOutcome::NotMatched));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.focus, Focus::Cancel);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_even_with_dialog() {
        let (mut app, _) = app_with(Stub::new(VerificationOutcome::NotMatched));
        press(&mut app, KeyCode::Enter);
        assert!(app.dialog.is_some());
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_register_does_nothing() {
        let (mut app, stub) = app_with(Stub::new(VerificationOutcome::Matched(7)));
        app.form.unique_code.set_content("ABC123");
        app.form.password.set_content("hunter2");
        app.form.focus = Focus::Register;
        press(&mut app, KeyCode::Enter);

        assert!(app.dialog.is_none());
        assert!(!app.is_verifying());
        assert!(!app.should_quit);
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_key_release_ignored() {
        let (mut app, _) = app_with(Stub::new(VerificationOutcome::NotMatched));
        let release = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        app.handle_key_event(release);
        assert!(app.form.unique_code.is_empty());
    }
}
