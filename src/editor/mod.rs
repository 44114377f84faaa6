// SPDX-License-Identifier: GPL-3.0-only

//! Profile editor state and key interaction.
//!
//! The editor decides what a click on a key means. In **set** mode the key
//! takes the picker colour, in **clear** mode the key loses its colour, and
//! in **picker** mode the picker takes the key's colour and the editor goes
//! back to set mode. Changes to the profile are reported to the backend as
//! [`BackendCommand`]s.
//!
//! All editor state lives in [`EditorState`], owned by the [`ProfileEditor`]
//! of a view.
//!
//! # Example
//!
//! ```rust,ignore
//! use chromakeys::backend::CommandSender;
//! use chromakeys::editor::{EditorMode, ProfileEditor};
//!
//! let (commands, mut rx) = CommandSender::channel();
//! let mut editor = ProfileEditor::new(widget, commands);
//!
//! editor.set_picker_color("#00ff00");
//! editor.key_pressed(1, 5); // sends set-key?1?5?#00ff00
//!
//! editor.set_mode(EditorMode::Clear);
//! editor.key_pressed(1, 5); // sends clear-key?1?5
//! ```

use crate::backend::{BackendCommand, CommandSender};
use crate::keyboard::{KeyId, KeyboardWidget, UnknownNameError};
use std::fmt;
use std::str::FromStr;

/// Colour the picker starts with.
pub const DEFAULT_PICKER_COLOR: &str = "#00ff00";

// ============================================================================
// Modes
// ============================================================================

/// What a click on a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// Paint the key with the picker colour
    #[default]
    Set,
    /// Copy the key colour into the picker
    Picker,
    /// Remove the key colour
    Clear,
}

impl EditorMode {
    /// Returns the mode's identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EditorMode::Set => "set",
            EditorMode::Picker => "picker",
            EditorMode::Clear => "clear",
        }
    }

    /// Returns the pointer cursor shown over the keyboard in this mode.
    #[must_use]
    pub const fn cursor(self) -> Cursor {
        match self {
            EditorMode::Set => Cursor::ModeSet,
            EditorMode::Picker => Cursor::ModePicker,
            EditorMode::Clear => Cursor::ModeClear,
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(EditorMode::Set),
            "picker" => Ok(EditorMode::Picker),
            "clear" => Ok(EditorMode::Clear),
            other => Err(UnknownNameError::new("editor mode", other)),
        }
    }
}

/// Pointer cursors of the editor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Busy
    Wait,
    /// Set mode
    ModeSet,
    /// Picker mode
    ModePicker,
    /// Clear mode
    ModeClear,
}

impl Cursor {
    /// Returns the CSS class applied to the keyboard container.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Cursor::Wait => "cursor-wait",
            Cursor::ModeSet => "cursor-mode-set",
            Cursor::ModePicker => "cursor-mode-picker",
            Cursor::ModeClear => "cursor-mode-clear",
        }
    }
}

/// A label and a help line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeText {
    /// Short name of the mode
    pub label: String,
    /// One-line explanation
    pub help: String,
}

impl ModeText {
    /// Creates a new label/help pair.
    pub fn new(label: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            help: help.into(),
        }
    }
}

/// Localized mode descriptions supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStrings {
    /// Set mode text
    pub set: ModeText,
    /// Picker mode text
    pub picker: ModeText,
    /// Clear mode text
    pub clear: ModeText,
}

impl ModeStrings {
    /// Returns the text for a mode.
    #[must_use]
    pub fn get(&self, mode: EditorMode) -> &ModeText {
        match mode {
            EditorMode::Set => &self.set,
            EditorMode::Picker => &self.picker,
            EditorMode::Clear => &self.clear,
        }
    }
}

impl Default for ModeStrings {
    fn default() -> Self {
        Self {
            set: ModeText::new("Set", "Click a key to assign the current colour."),
            picker: ModeText::new("Picker", "Click a key to use its colour."),
            clear: ModeText::new("Clear", "Click a key to remove its colour."),
        }
    }
}

// ============================================================================
// State
// ============================================================================

/// Mutable state of one editor view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    mode: EditorMode,
    picker_color: String,
    cursor: Cursor,
    strings: ModeStrings,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(ModeStrings::default())
    }
}

impl EditorState {
    /// Creates editor state in set mode.
    #[must_use]
    pub fn new(strings: ModeStrings) -> Self {
        Self {
            mode: EditorMode::Set,
            picker_color: DEFAULT_PICKER_COLOR.to_string(),
            cursor: EditorMode::Set.cursor(),
            strings,
        }
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the colour applied in set mode.
    #[must_use]
    pub fn picker_color(&self) -> &str {
        &self.picker_color
    }

    /// Returns the cursor for the keyboard container.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the mode descriptions.
    #[must_use]
    pub fn strings(&self) -> &ModeStrings {
        &self.strings
    }

    /// Returns the status line for the current mode, `"{label} - {help}"`.
    #[must_use]
    pub fn status_text(&self) -> String {
        let text = self.strings.get(self.mode);
        format!("{} - {}", text.label, text.help)
    }

    fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.cursor = mode.cursor();
    }
}

// ============================================================================
// Editor
// ============================================================================

/// Result of a click on a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// The key is missing or disabled
    Ignored,
    /// The key was given the picker colour
    Painted(String),
    /// The key colour was removed
    Cleared,
    /// The picker took the key colour
    Picked(String),
}

/// Profile editor: a keyboard widget, its editor state and the backend
/// command channel.
#[derive(Debug)]
pub struct ProfileEditor {
    widget: KeyboardWidget,
    state: EditorState,
    commands: CommandSender,
}

impl ProfileEditor {
    /// Creates an editor with default mode strings.
    pub fn new(widget: KeyboardWidget, commands: CommandSender) -> Self {
        Self::with_state(widget, EditorState::default(), commands)
    }

    /// Creates an editor with existing state.
    pub fn with_state(widget: KeyboardWidget, state: EditorState, commands: CommandSender) -> Self {
        Self {
            widget,
            state,
            commands,
        }
    }

    /// Returns the keyboard widget.
    #[must_use]
    pub fn widget(&self) -> &KeyboardWidget {
        &self.widget
    }

    /// Returns the keyboard widget for direct updates.
    pub fn widget_mut(&mut self) -> &mut KeyboardWidget {
        &mut self.widget
    }

    /// Returns the editor state.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Changes what a click on a key does.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.state.set_mode(mode);
        tracing::debug!("Editor mode: {}", mode);
    }

    /// Shows a busy cursor, or restores the mode cursor.
    pub fn set_busy(&mut self, busy: bool) {
        self.state.cursor = if busy {
            Cursor::Wait
        } else {
            self.state.mode.cursor()
        };
    }

    /// Sets the colour applied in set mode.
    pub fn set_picker_color(&mut self, color: impl Into<String>) {
        self.state.picker_color = color.into();
    }

    /// Handles a click on a key.
    pub fn key_pressed(&mut self, row: u32, col: u32) -> KeyAction {
        if !self.widget.is_key_enabled(row, col) {
            tracing::debug!("Ignoring click on inactive key {}", KeyId::new(row, col));
            return KeyAction::Ignored;
        }

        let key_id = KeyId::new(row, col).element_id();
        match self.state.mode {
            EditorMode::Set => {
                let color = self.state.picker_color.clone();
                self.widget.set_key_color_by_id(&key_id, &color);
                self.commands.send(BackendCommand::SetKey {
                    row,
                    col,
                    color: color.clone(),
                });
                KeyAction::Painted(color)
            }
            EditorMode::Clear => {
                self.widget.clear_key_by_id(&key_id);
                self.commands.send(BackendCommand::ClearKey { row, col });
                KeyAction::Cleared
            }
            EditorMode::Picker => {
                let Some(color) = self.widget.get_key_color(row, col) else {
                    return KeyAction::Ignored;
                };
                self.state.picker_color = color.clone();
                self.set_mode(EditorMode::Set);
                KeyAction::Picked(color)
            }
        }
    }

    /// Renames the profile and changes its icon.
    pub fn save_metadata(&self, name: impl Into<String>, icon: impl Into<String>) {
        self.commands.send(BackendCommand::SetProfileMetadata {
            name: name.into(),
            icon: icon.into(),
        });
    }

    /// Updates an application preference.
    pub fn set_preference(&self, group: &str, setting: &str, value: impl fmt::Display) {
        self.commands.send(BackendCommand::SetPreference {
            group: group.to_string(),
            setting: setting.to_string(),
            value: value.to_string(),
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
