//! Selection and dialog state.
//!
//! At most one section is selected and at most one dialog is open. Pointer
//! and keyboard input are reduced here to a [`KeyAction`] the session acts on.

use pagecraft_content::{FieldPath, SectionId};

/// Modal dialog shown over the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    ConfirmDelete { section: SectionId },
    /// Apply a linked edit globally or unlink first
    LinkedEditDecision { section: SectionId, component_name: String },
    SaveAsReusable { section: SectionId },
    ReusablePicker,
    MediaPicker { section: SectionId, path: FieldPath },
}

/// Where a pointer press landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Section(SectionId),
    /// Section toolbar button
    Toolbar(SectionId),
    Dialog,
    /// Canvas background between sections
    Canvas,
    /// Anywhere outside the canvas
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
}

/// What has keyboard focus when a key is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Canvas,
    TextInput,
}

/// Result of a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    DialogClosed,
    Deselected,
    RequestDelete(SectionId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    selected: Option<SectionId>,
    dialog: Option<Dialog>,
}

impl Interaction {
    pub fn selected(&self) -> Option<&SectionId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &SectionId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Selecting the selected section again deselects it
    pub fn toggle(&mut self, id: &SectionId) {
        if self.is_selected(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.clone());
        }
    }

    pub fn select(&mut self, id: Option<SectionId>) {
        self.selected = id;
    }

    pub fn click(&mut self, target: &PointerTarget) {
        match target {
            PointerTarget::Section(id) => self.toggle(id),
            PointerTarget::Outside => self.selected = None,
            PointerTarget::Toolbar(_) | PointerTarget::Dialog | PointerTarget::Canvas => {}
        }
    }

    /// Open `dialog`, replacing any dialog already open
    pub fn open(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    pub fn close(&mut self) -> Option<Dialog> {
        self.dialog.take()
    }

    /// Forget a section that left the page
    pub fn forget(&mut self, id: &SectionId) {
        if self.is_selected(id) {
            self.selected = None;
        }
        let refers = match &self.dialog {
            Some(Dialog::ConfirmDelete { section })
            | Some(Dialog::LinkedEditDecision { section, .. })
            | Some(Dialog::SaveAsReusable { section })
            | Some(Dialog::MediaPicker { section, .. }) => section == id,
            _ => false,
        };
        if refers {
            self.dialog = None;
        }
    }

    pub fn key(&mut self, key: Key, focus: Focus) -> KeyAction {
        match key {
            Key::Escape if self.dialog.is_some() => {
                self.dialog = None;
                KeyAction::DialogClosed
            }
            Key::Escape if self.selected.is_some() => {
                self.selected = None;
                KeyAction::Deselected
            }
            Key::Delete | Key::Backspace if focus == Focus::Canvas && self.dialog.is_none() => self
                .selected
                .clone()
                .map(KeyAction::RequestDelete)
                .unwrap_or(KeyAction::None),
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SectionId {
        SectionId::new(s)
    }

    #[test]
    fn test_click_toggles_selection() {
        let mut ui = Interaction::default();
        ui.click(&PointerTarget::Section(id("a")));
        assert!(ui.is_selected(&id("a")));

        ui.click(&PointerTarget::Section(id("b")));
        assert_eq!(ui.selected(), Some(&id("b")));

        ui.click(&PointerTarget::Section(id("b")));
        assert_eq!(ui.selected(), None);
    }

    #[test]
    fn test_toolbar_and_canvas_keep_selection() {
        let mut ui = Interaction::default();
        ui.select(Some(id("a")));
        ui.click(&PointerTarget::Toolbar(id("a")));
        ui.click(&PointerTarget::Canvas);
        ui.click(&PointerTarget::Dialog);
        assert!(ui.is_selected(&id("a")));

        ui.click(&PointerTarget::Outside);
        assert_eq!(ui.selected(), None);
    }

    #[test]
    fn test_escape_closes_dialog_before_deselecting() {
        let mut ui = Interaction::default();
        ui.select(Some(id("a")));
        ui.open(Dialog::ReusablePicker);

        assert_eq!(ui.key(Key::Escape, Focus::Canvas), KeyAction::DialogClosed);
        assert!(ui.is_selected(&id("a")));
        assert_eq!(ui.key(Key::Escape, Focus::Canvas), KeyAction::Deselected);
        assert_eq!(ui.key(Key::Escape, Focus::Canvas), KeyAction::None);
    }

    #[test]
    fn test_delete_key_ignored_while_typing() {
        let mut ui = Interaction::default();
        ui.select(Some(id("a")));
        assert_eq!(ui.key(Key::Backspace, Focus::TextInput), KeyAction::None);
        assert_eq!(ui.key(Key::Delete, Focus::Canvas), KeyAction::RequestDelete(id("a")));
    }

    #[test]
    fn test_single_dialog() {
        let mut ui = Interaction::default();
        ui.open(Dialog::ReusablePicker);
        ui.open(Dialog::ConfirmDelete { section: id("a") });
        assert_eq!(ui.dialog(), Some(&Dialog::ConfirmDelete { section: id("a") }));

        ui.forget(&id("a"));
        assert_eq!(ui.dialog(), None);
    }
}
