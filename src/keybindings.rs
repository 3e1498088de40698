//! Editor keyboard shortcuts.
//!
//! Shortcuts are matched on key plus the command (Ctrl/Cmd) and shift
//! modifiers. Alt never takes part in a shortcut. Bindings are stored in the editor config and can be edited
//! there.

use hotmap_ui::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    Save,
    /// Request deletion of the selected hotspot
    Delete,
    /// Finish the polygon being drawn
    Finish,
    /// Cancel drawing or drag, else clear the selection
    Cancel,
}

impl EditorAction {
    pub fn name(&self) -> &'static str {
        match self {
            EditorAction::Undo => "Undo",
            EditorAction::Redo => "Redo",
            EditorAction::Save => "Save",
            EditorAction::Delete => "Delete",
            EditorAction::Finish => "Finish polygon",
            EditorAction::Cancel => "Cancel",
        }
    }
}

/// A key together with the modifiers it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub key: KeyCode,
    /// Ctrl on Linux/Windows, Cmd on macOS
    #[serde(default)]
    pub command: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Shortcut {
    /// A bare key without modifiers.
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            command: false,
            shift: false,
        }
    }

    /// Ctrl/Cmd + key.
    pub const fn command(key: KeyCode) -> Self {
        Self {
            key,
            command: true,
            shift: false,
        }
    }

    /// Ctrl/Cmd + Shift + key.
    pub const fn command_shift(key: KeyCode) -> Self {
        Self {
            key,
            command: true,
            shift: true,
        }
    }

    /// Check if a key press triggers this shortcut. Presses with Alt held never do.
    pub fn matches(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.key == key
            && !modifiers.alt
            && self.command == modifiers.has_command()
            && self.shift == modifiers.shift
    }
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub undo: Shortcut,
    pub redo: Shortcut,
    pub save: Shortcut,
    pub finish: Shortcut,
    pub cancel: Shortcut,
    /// Any of these deletes the selection
    pub delete: Vec<Shortcut>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            undo: Shortcut::command(KeyCode::Z),
            redo: Shortcut::command_shift(KeyCode::Z),
            save: Shortcut::command(KeyCode::S),
            finish: Shortcut::key(KeyCode::Enter),
            cancel: Shortcut::key(KeyCode::Escape),
            delete: vec![
                Shortcut::key(KeyCode::Delete),
                Shortcut::key(KeyCode::Backspace),
            ],
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for(&self, key: KeyCode, modifiers: KeyModifiers) -> Option<EditorAction> {
        if self.undo.matches(key, modifiers) {
            Some(EditorAction::Undo)
        } else if self.redo.matches(key, modifiers) {
            Some(EditorAction::Redo)
        } else if self.save.matches(key, modifiers) {
            Some(EditorAction::Save)
        } else if self.finish.matches(key, modifiers) {
            Some(EditorAction::Finish)
        } else if self.cancel.matches(key, modifiers) {
            Some(EditorAction::Cancel)
        } else if self.delete.iter().any(|s| s.matches(key, modifiers)) {
            Some(EditorAction::Delete)
        } else {
            None
        }
    }

    /// Check if a shortcut is already bound. Returns the action using it.
    pub fn conflict(&self, shortcut: Shortcut) -> Option<EditorAction> {
        let modifiers = KeyModifiers {
            shift: shortcut.shift,
            ctrl: shortcut.command,
            ..KeyModifiers::NONE
        };
        self.action_for(shortcut.key, modifiers)
    }
}
