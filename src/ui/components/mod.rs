//! UI Components
//!
//! Widgets for the login window.

pub mod dialogs;
pub mod input_field;
pub mod layout;
pub mod login_form;
pub mod statusline;

// Re-exports
pub use dialogs::{DialogMessage, MessageDialog, Severity};
pub use login_form::{Focus, LoginForm, LoginFormWidget};
pub use statusline::HelpBar;

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::buffer::Buffer;

    /// Buffer symbols, one line per row
    pub fn buffer_text(buf: &Buffer) -> String {
        let width = buf.area.width.max(1) as usize;
        buf.content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
