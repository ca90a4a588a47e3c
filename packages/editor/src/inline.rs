//! # Inline Editable Field
//!
//! A text buffer that lets a rendered piece of text be edited in place.
//!
//! ```text
//!            begin_edit                       commit (text changed)
//!  Idle ───────────────────▶ Editing ─────────────────────────────▶ Idle + Commit::Changed
//!   ▲  sync_external applies   │  sync_external ignored          │
//!   │                          │  Enter (single-line) → commit   │ commit (same text)
//!   └──────────────────────────┘  Escape → cancel (revert)       └──▶ Idle + Commit::Unchanged
//! ```
//!
//! While editing, outside updates never overwrite the live text; the caret
//! would jump under the operator's hands. They are accepted again once the
//! edit ends.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InlineError {
    #[error("Field is not being edited")]
    NotEditing,

    #[error("Edit handle belongs to an earlier edit")]
    StaleHandle,
}

/// Token for one edit, from `begin_edit` until commit or cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditHandle(u64);

/// Outcome of ending an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Text differs from the snapshot taken at `begin_edit`
    Changed(String),
    Unchanged,
}

/// Keys the field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKey {
    Enter,
    Escape,
}

/// Result of a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    Committed(Commit),
    Cancelled,
    /// Enter in multiline mode inserted a line break
    Inserted,
    Ignored,
}

/// Clipboard flavours offered on paste
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardData {
    pub plain: Option<String>,
    pub html: Option<String>,
}

impl ClipboardData {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain: Some(text.into()),
            html: None,
        }
    }

    /// Plain text of the clipboard, formatting dropped
    pub fn to_plain_text(&self) -> String {
        if let Some(plain) = &self.plain {
            return plain.clone();
        }
        self.html.as_deref().map(strip_tags).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct EditState {
    handle: EditHandle,
    snapshot: String,
    live: String,
    /// Caret position in chars
    caret: usize,
}

/// In-place editable text
#[derive(Debug, Clone)]
pub struct InlineField {
    value: String,
    multiline: bool,
    edit: Option<EditState>,
    generation: u64,
}

impl InlineField {
    pub fn new(value: impl Into<String>, multiline: bool) -> Self {
        Self {
            value: value.into(),
            multiline,
            edit: None,
            generation: 0,
        }
    }

    /// Text currently displayed (live text while editing)
    pub fn text(&self) -> &str {
        match &self.edit {
            Some(edit) => &edit.live,
            None => &self.value,
        }
    }

    /// Last committed value
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn caret(&self) -> Option<usize> {
        self.edit.as_ref().map(|edit| edit.caret)
    }

    /// Focus: snapshot the current text and enter edit mode
    ///
    /// Focusing an already-focused field keeps the running edit.
    pub fn begin_edit(&mut self) -> EditHandle {
        if let Some(edit) = &self.edit {
            return edit.handle;
        }

        self.generation += 1;
        let handle = EditHandle(self.generation);
        self.edit = Some(EditState {
            handle,
            snapshot: self.value.clone(),
            live: self.value.clone(),
            caret: self.value.chars().count(),
        });
        handle
    }

    /// Replace the live text (the operator typed)
    pub fn input(&mut self, text: &str) -> Result<(), InlineError> {
        let multiline = self.multiline;
        let edit = self.edit.as_mut().ok_or(InlineError::NotEditing)?;
        edit.live = normalize(text, multiline);
        edit.caret = edit.live.chars().count();
        Ok(())
    }

    pub fn set_caret(&mut self, position: usize) -> Result<(), InlineError> {
        let edit = self.edit.as_mut().ok_or(InlineError::NotEditing)?;
        edit.caret = position.min(edit.live.chars().count());
        Ok(())
    }

    /// Insert text at the caret and move the caret after it
    pub fn insert_at_caret(&mut self, text: &str) -> Result<(), InlineError> {
        let multiline = self.multiline;
        let edit = self.edit.as_mut().ok_or(InlineError::NotEditing)?;
        let text = normalize(text, multiline);

        let byte = edit
            .live
            .char_indices()
            .nth(edit.caret)
            .map(|(i, _)| i)
            .unwrap_or(edit.live.len());
        edit.live.insert_str(byte, &text);
        edit.caret += text.chars().count();
        Ok(())
    }

    /// Paste as plain text at the caret
    pub fn paste(&mut self, clipboard: &ClipboardData) -> Result<(), InlineError> {
        self.insert_at_caret(&clipboard.to_plain_text())
    }

    pub fn key(&mut self, handle: EditHandle, key: InlineKey) -> Result<KeyResult, InlineError> {
        self.check(handle)?;
        match key {
            InlineKey::Enter if self.multiline => {
                self.insert_at_caret("\n")?;
                Ok(KeyResult::Inserted)
            }
            InlineKey::Enter => Ok(KeyResult::Committed(self.commit(handle)?)),
            InlineKey::Escape => {
                self.cancel(handle)?;
                Ok(KeyResult::Cancelled)
            }
        }
    }

    /// Blur: end the edit, reporting whether the text changed
    pub fn commit(&mut self, handle: EditHandle) -> Result<Commit, InlineError> {
        self.check(handle)?;
        let edit = self.edit.take().ok_or(InlineError::NotEditing)?;

        if edit.live == edit.snapshot {
            return Ok(Commit::Unchanged);
        }
        self.value = edit.live.clone();
        Ok(Commit::Changed(edit.live))
    }

    /// Revert to the snapshot and end the edit without committing
    pub fn cancel(&mut self, handle: EditHandle) -> Result<(), InlineError> {
        self.check(handle)?;
        if let Some(edit) = self.edit.take() {
            self.value = edit.snapshot;
        }
        Ok(())
    }

    /// Take a value from outside state; ignored while editing
    pub fn sync_external(&mut self, value: &str) -> bool {
        if self.edit.is_some() {
            return false;
        }
        if self.value != value {
            self.value = value.to_string();
        }
        true
    }

    fn check(&self, handle: EditHandle) -> Result<(), InlineError> {
        match &self.edit {
            None => Err(InlineError::NotEditing),
            Some(edit) if edit.handle != handle => Err(InlineError::StaleHandle),
            Some(_) => Ok(()),
        }
    }
}

/// Single-line fields fold line breaks into single spaces
fn normalize(text: &str, multiline: bool) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if multiline {
        return text;
    }
    text.split('\n')
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text content of an HTML fragment
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_reports_change_once() {
        let mut field = InlineField::new("", false);
        let handle = field.begin_edit();
        field.input("Sale").unwrap();

        assert_eq!(field.commit(handle).unwrap(), Commit::Changed("Sale".to_string()));
        assert_eq!(field.value(), "Sale");
        assert!(!field.is_editing());
        assert_eq!(field.commit(handle), Err(InlineError::NotEditing));
    }

    #[test]
    fn test_blur_without_change_is_noop() {
        let mut field = InlineField::new("Same", false);
        let handle = field.begin_edit();
        field.input("Other").unwrap();
        field.input("Same").unwrap();
        assert_eq!(field.commit(handle).unwrap(), Commit::Unchanged);
    }

    #[test]
    fn test_escape_reverts() {
        let mut field = InlineField::new("Original", false);
        let handle = field.begin_edit();
        field.input("Typo").unwrap();

        assert_eq!(field.key(handle, InlineKey::Escape).unwrap(), KeyResult::Cancelled);
        assert_eq!(field.text(), "Original");
        assert!(!field.is_editing());
    }

    #[test]
    fn test_enter_commits_single_line_and_breaks_multiline() {
        let mut single = InlineField::new("a", false);
        let handle = single.begin_edit();
        single.input("b").unwrap();
        assert_eq!(
            single.key(handle, InlineKey::Enter).unwrap(),
            KeyResult::Committed(Commit::Changed("b".to_string()))
        );

        let mut multi = InlineField::new("line", true);
        let handle = multi.begin_edit();
        assert_eq!(multi.key(handle, InlineKey::Enter).unwrap(), KeyResult::Inserted);
        assert_eq!(multi.text(), "line\n");
        assert!(multi.is_editing());
    }

    #[test]
    fn test_external_updates_wait_for_edit_to_end() {
        let mut field = InlineField::new("v1", false);
        let handle = field.begin_edit();
        field.input("typing").unwrap();

        assert!(!field.sync_external("v2"));
        assert_eq!(field.text(), "typing");

        field.cancel(handle).unwrap();
        assert!(field.sync_external("v2"));
        assert_eq!(field.text(), "v2");
    }

    #[test]
    fn test_paste_inserts_plain_text_at_caret() {
        let mut field = InlineField::new("Hello world", false);
        let handle = field.begin_edit();
        field.set_caret(5).unwrap();
        field
            .paste(&ClipboardData {
                plain: None,
                html: Some("<b>,&nbsp;big</b>\n<i>wide</i>".to_string()),
            })
            .unwrap();

        assert_eq!(field.text(), "Hello, big wide world");
        assert_eq!(field.caret(), Some(15));
        assert_eq!(
            field.commit(handle).unwrap(),
            Commit::Changed("Hello, big wide world".to_string())
        );
    }

    #[test]
    fn test_caret_counts_chars_not_bytes() {
        let mut field = InlineField::new("héllo", false);
        field.begin_edit();
        field.set_caret(2).unwrap();
        field.insert_at_caret("ü").unwrap();
        assert_eq!(field.text(), "héüllo");
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut field = InlineField::new("x", false);
        let first = field.begin_edit();
        field.commit(first).unwrap();
        field.begin_edit();
        assert_eq!(field.commit(first), Err(InlineError::StaleHandle));
    }
}
