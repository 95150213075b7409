//! Input Module
//!
//! Text editing for the login fields.

pub mod text_buffer;

// Re-exports
pub use text_buffer::{handle_text_key, SecureTextBuffer, TextBuffer, TextEditing};
