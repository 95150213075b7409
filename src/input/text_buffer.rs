//! Text Buffer
//!
//! Editing buffers for the login fields. Cursor positions count characters,
//! not bytes, so multi-byte input never splits a code point.

use crossterm::event::{KeyCode, KeyModifiers};
use zeroize::Zeroizing;

/// Trait for text editing operations
pub trait TextEditing {
    fn content(&self) -> &str;
    fn cursor(&self) -> usize;
    fn set_content(&mut self, content: &str);
    fn insert_char(&mut self, c: char);
    fn delete_char(&mut self);
    fn delete_char_forward(&mut self);
    fn delete_word(&mut self);
    fn clear_to_start(&mut self);
    fn cursor_left(&mut self);
    fn cursor_right(&mut self);
    fn cursor_home(&mut self);
    fn cursor_end(&mut self);

    fn char_count(&self) -> usize {
        self.content().chars().count()
    }

    fn is_empty(&self) -> bool {
        self.content().is_empty()
    }
}

/// Handle common text input keys, returns true if key was handled
pub fn handle_text_key<T: TextEditing>(buf: &mut T, code: KeyCode, mods: KeyModifiers) -> bool {
    match (code, mods) {
        (KeyCode::Backspace, KeyModifiers::CONTROL | KeyModifiers::ALT) => buf.delete_word(),
        (KeyCode::Backspace, _) => buf.delete_char(),
        (KeyCode::Delete, _) => buf.delete_char_forward(),
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => buf.cursor_home(),
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => buf.cursor_end(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => buf.clear_to_start(),
        (KeyCode::Left, _) => buf.cursor_left(),
        (KeyCode::Right, _) => buf.cursor_right(),
        (KeyCode::Home, _) => buf.cursor_home(),
        (KeyCode::End, _) => buf.cursor_end(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => buf.insert_char(c),
        _ => return false,
    }
    true
}

/// Character position where a backward word delete starting at `from` stops.
pub fn find_word_boundary_back(s: &str, from: usize) -> usize {
    let chars: Vec<char> = s.chars().take(from).collect();
    let mut pos = chars.len();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let is_punct = |c: char| !c.is_whitespace() && !is_word(c);

    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    if pos == 0 { return 0; }

    if is_word(chars[pos - 1]) {
        while pos > 0 && is_word(chars[pos - 1]) {
            pos -= 1;
        }
    } else {
        // Punctuation run, then the word it is attached to
        while pos > 0 && is_punct(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word(chars[pos - 1]) {
            pos -= 1;
        }
    }
    pos
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map_or(s.len(), |(idx, _)| idx)
}

// ============================================================================
// Shared editing primitives over (content, cursor)
// ============================================================================

fn insert_at(content: &mut String, cursor: &mut usize, c: char) {
    let at = byte_index(content, *cursor);
    content.insert(at, c);
    *cursor += 1;
}

fn delete_before(content: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    *cursor -= 1;
    let at = byte_index(content, *cursor);
    content.remove(at);
}

fn delete_at(content: &mut String, cursor: usize) {
    if cursor >= content.chars().count() {
        return;
    }
    let at = byte_index(content, cursor);
    content.remove(at);
}

fn delete_word_before(content: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    let start = find_word_boundary_back(content, *cursor);
    let range = byte_index(content, start)..byte_index(content, *cursor);
    content.replace_range(range, "");
    *cursor = start;
}

fn delete_to_start(content: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    let end = byte_index(content, *cursor);
    content.replace_range(..end, "");
    *cursor = 0;
}

// ============================================================================
// TextBuffer - for the unique code
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    content: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }
}

impl TextEditing for TextBuffer {
    fn content(&self) -> &str {
        &self.content
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cursor = self.content.chars().count();
    }

    fn insert_char(&mut self, c: char) {
        insert_at(&mut self.content, &mut self.cursor, c);
    }

    fn delete_char(&mut self) {
        delete_before(&mut self.content, &mut self.cursor);
    }

    fn delete_char_forward(&mut self) {
        delete_at(&mut self.content, self.cursor);
    }

    fn delete_word(&mut self) {
        delete_word_before(&mut self.content, &mut self.cursor);
    }

    fn clear_to_start(&mut self) {
        delete_to_start(&mut self.content, &mut self.cursor);
    }

    fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    fn cursor_end(&mut self) {
        self.cursor = self.char_count();
    }
}

// ============================================================================
// SecureTextBuffer - for the password, zeroized on drop
// ============================================================================

#[derive(Clone)]
pub struct SecureTextBuffer {
    content: Zeroizing<String>,
    cursor: usize,
}

impl std::fmt::Debug for SecureTextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureTextBuffer")
            .field("content", &"[REDACTED]")
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl Default for SecureTextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureTextBuffer {
    pub fn new() -> Self {
        Self {
            content: Zeroizing::new(String::new()),
            cursor: 0,
        }
    }
}

impl TextEditing for SecureTextBuffer {
    fn content(&self) -> &str {
        &self.content
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_content(&mut self, content: &str) {
        *self.content = content.to_string();
        self.cursor = self.content.chars().count();
    }

    fn insert_char(&mut self, c: char) {
        insert_at(&mut self.content, &mut self.cursor, c);
    }

    fn delete_char(&mut self) {
        delete_before(&mut self.content, &mut self.cursor);
    }

    fn delete_char_forward(&mut self) {
        delete_at(&mut self.content, self.cursor);
    }

    fn delete_word(&mut self) {
        delete_word_before(&mut self.content, &mut self.cursor);
    }

    fn clear_to_start(&mut self) {
        delete_to_start(&mut self.content, &mut self.cursor);
    }

    fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    fn cursor_end(&mut self) {
        self.cursor = self.char_count();
    }
}

// ============================================================================
// Tests
// ============================================================================
