use std::sync::Arc;

use crate::auth::{ValidationError, VerificationOutcome, VerificationTask};
use crate::ui::components::{DialogMessage, Severity};

use super::App;

/// The single dialog shown for each verification outcome.
pub fn outcome_dialog(outcome: &VerificationOutcome) -> DialogMessage {
    match outcome {
        VerificationOutcome::Matched(_) => {
            DialogMessage::new(Severity::Info, "Success", "Welcome! You're logged in.")
        }
        VerificationOutcome::NotMatched => {
            DialogMessage::new(Severity::Error, "Error", "Incorrect password or unique code.")
        }
        VerificationOutcome::ConnectionFailed(detail) => DialogMessage::new(
            Severity::Critical,
            "Connection Error",
            format!("Database connection failed.\n{detail}"),
        ),
        VerificationOutcome::SchemaError(detail) => DialogMessage::new(
            Severity::Critical,
            "Database Error",
            format!("Database/table issue.\n{detail}"),
        ),
        VerificationOutcome::UnexpectedError(detail) => DialogMessage::new(
            Severity::Critical,
            "Error",
            format!("Unexpected error:\n{detail}"),
        ),
    }
}

pub fn validation_dialog(err: &ValidationError) -> DialogMessage {
    DialogMessage::new(Severity::Warning, "Input Error", err.to_string())
}

impl App {
    /// Validate the form and start a verification. Ignored while one is
    /// already pending.
    pub fn submit(&mut self) {
        if self.is_verifying() {
            tracing::debug!("submit ignored, verification already in flight");
            return;
        }

        let credentials = match self.form.credentials() {
            Ok(credentials) => credentials,
            Err(err) => {
                tracing::info!(
                    identifier_missing = err.identifier_missing,
                    secret_missing = err.secret_missing,
                    "login rejected, missing input"
                );
                self.dialog = Some(validation_dialog(&err));
                return;
            }
        };

        let timeout = self.config.database.connect_timeout();
        match VerificationTask::spawn(Arc::clone(&self.verifier), credentials, timeout) {
            Ok(task) => {
                tracing::debug!("verification started");
                self.pending = Some(task);
            }
            Err(err) => self.finish_verification(VerificationOutcome::UnexpectedError(format!(
                "failed to start verification: {err}"
            ))),
        }
    }

    pub fn cancel(&mut self) {
        tracing::info!(pending = self.is_verifying(), "login window cancelled");
        self.should_quit = true;
    }

    /// Copy the reset link to the clipboard and show it.
    pub fn forgot_password(&mut self) {
        let url = self.config.links.forgot_password.clone();

        let text = match self.copy_to_clipboard(&url) {
            Ok(()) => format!(
                "Reset your password at:\n{url}\n\nThe link was copied to the clipboard."
            ),
            Err(err) => {
                tracing::warn!(error = %err, "could not copy forgot-password link");
                format!("Reset your password at:\n{url}")
            }
        };

        self.dialog = Some(DialogMessage::new(Severity::Info, "Forgot Password", text));
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), arboard::Error> {
        if self.clipboard.is_none() {
            self.clipboard = Some(arboard::Clipboard::new()?);
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(text),
            None => Err(arboard::Error::ClipboardNotSupported),
        }
    }

    /// Deliver a finished verification. While a dialog is open the outcome
    /// stays queued until that dialog is dismissed.
    pub fn poll_verification(&mut self) {
        if self.dialog.is_some() {
            return;
        }
        let outcome = self.pending.as_ref().and_then(|task| task.try_outcome());
        if let Some(outcome) = outcome {
            self.finish_verification(outcome);
        }
    }

    fn finish_verification(&mut self, outcome: VerificationOutcome) {
        let elapsed_ms = self.pending.take().map(|task| task.elapsed().as_millis());

        match &outcome {
            VerificationOutcome::Matched(user_id) => {
                tracing::info!(user_id, ?elapsed_ms, "login succeeded");
            }
            VerificationOutcome::NotMatched => {
                tracing::info!(?elapsed_ms, "login rejected, credentials did not match");
            }
            failure => {
                tracing::warn!(
                    kind = failure.kind(),
                    detail = failure.detail().unwrap_or_default(),
                    ?elapsed_ms,
                    "verification failed"
                );
            }
        }

        self.dialog = Some(outcome_dialog(&outcome));
    }

    #[cfg(test)]
    pub(crate) fn wait_for_verification(&mut self) {
        if self.dialog.is_some() {
            return;
        }
        let outcome = self
            .pending
            .as_ref()
            .and_then(|task| task.wait(std::time::Duration::from_secs(5)));
        if let Some(outcome) = outcome {
            self.finish_verification(outcome);
        }
    }
}
