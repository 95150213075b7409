//! Application State
//!
//! Ties the login form, the verifier and the dialogs together.

mod input;
mod login_handler;

use std::sync::Arc;

use ratatui::Frame;

use crate::auth::{VerificationTask, Verifier};
use crate::config::AppConfig;
use crate::ui::components::{DialogMessage, LoginForm};
use crate::ui::renderer::{Renderer, UiState};

pub use login_handler::{outcome_dialog, validation_dialog};

pub struct App {
    pub config: AppConfig,
    pub form: LoginForm,
    /// Modal dialog; while set, keys only dismiss it
    pub dialog: Option<DialogMessage>,
    pub should_quit: bool,
    verifier: Arc<dyn Verifier>,
    /// At most one verification in flight
    pending: Option<VerificationTask>,
    clipboard: Option<arboard::Clipboard>,
    tick: usize,
}

impl App {
    pub fn new(config: AppConfig, verifier: Arc<dyn Verifier>) -> Self {
        Self {
            config,
            form: LoginForm::new(),
            dialog: None,
            should_quit: false,
            verifier,
            pending: None,
            clipboard: None,
            tick: 0,
        }
    }

    pub fn is_verifying(&self) -> bool {
        self.pending.is_some()
    }

    /// Called once per event-loop iteration.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.poll_verification();
    }

    pub fn render(&self, frame: &mut Frame) {
        let state = UiState {
            form: &self.form,
            busy: self.is_verifying().then_some(self.tick),
            dialog: self.dialog.as_ref(),
        };
        Renderer::render(frame, &state);
    }
}
