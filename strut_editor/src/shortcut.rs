// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard shortcuts.

use crate::input::{Key, KeyEvent};

/// An editor action reachable from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    /// Delete the selected views or constraint.
    Delete,
    /// Clear the selection.
    ClearSelection,
    /// Zoom in by one step.
    ZoomIn,
    /// Zoom out by one step.
    ZoomOut,
    /// Reset zoom to 1.
    ResetZoom,
    /// Add a layout variable.
    AddVariable,
}

/// A key plus the modifiers that must be held.
///
/// `primary` means command or control; characters match case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key.
    pub key: Key,
    /// Command or control held.
    pub primary: bool,
    /// Shift held.
    pub shift: bool,
}

impl KeyChord {
    /// A key with no modifiers.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            primary: false,
            shift: false,
        }
    }

    /// A key with command or control.
    #[must_use]
    pub const fn primary(key: Key) -> Self {
        Self {
            key,
            primary: true,
            shift: false,
        }
    }

    /// Adds shift.
    #[must_use]
    pub const fn shifted(mut self) -> Self {
        self.shift = true;
        self
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        let key = match (self.key, event.key) {
            (Key::Character(a), Key::Character(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        key && self.primary == event.modifiers.primary() && self.shift == event.modifiers.shift
    }
}

/// Maps key chords to editor commands.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortcutMap {
    bindings: Vec<(KeyChord, EditorCommand)>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyChord::key(Key::Backspace), EditorCommand::Delete),
                (KeyChord::key(Key::Delete), EditorCommand::Delete),
                (KeyChord::key(Key::Escape), EditorCommand::ClearSelection),
                (KeyChord::primary(Key::Character('=')), EditorCommand::ZoomIn),
                (
                    KeyChord::primary(Key::Character('+')).shifted(),
                    EditorCommand::ZoomIn,
                ),
                (KeyChord::primary(Key::Character('-')), EditorCommand::ZoomOut),
                (KeyChord::primary(Key::Character('0')), EditorCommand::ResetZoom),
                (
                    KeyChord::primary(Key::Character('v')).shifted(),
                    EditorCommand::AddVariable,
                ),
            ],
        }
    }
}

impl ShortcutMap {
    /// A map with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds `chord` to `command`, replacing an earlier binding of the chord.
    pub fn bind(&mut self, chord: KeyChord, command: EditorCommand) {
        self.bindings.retain(|(c, _)| *c != chord);
        self.bindings.push((chord, command));
    }

    /// Removes every binding of `command`.
    pub fn unbind(&mut self, command: EditorCommand) {
        self.bindings.retain(|(_, c)| *c != command);
    }

    /// The command bound to `event`, if any.
    #[must_use]
    pub fn resolve(&self, event: &KeyEvent) -> Option<EditorCommand> {
        self.bindings
            .iter()
            .find(|(chord, _)| chord.matches(event))
            .map(|(_, command)| *command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    #[test]
    fn default_bindings() {
        let map = ShortcutMap::default();
        assert_eq!(
            map.resolve(&KeyEvent::plain(Key::Backspace)),
            Some(EditorCommand::Delete)
        );
        assert_eq!(
            map.resolve(&KeyEvent::plain(Key::Escape)),
            Some(EditorCommand::ClearSelection)
        );
        let ctrl = Modifiers {
            control: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            map.resolve(&KeyEvent::with(Key::Character('0'), ctrl)),
            Some(EditorCommand::ResetZoom)
        );
        let cmd_shift = Modifiers {
            shift: true,
            ..Modifiers::COMMAND
        };
        assert_eq!(
            map.resolve(&KeyEvent::with(Key::Character('V'), cmd_shift)),
            Some(EditorCommand::AddVariable)
        );
        // Modifiers must match exactly.
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Character('0'))), None);
    }

    #[test]
    fn rebinding_replaces() {
        let mut map = ShortcutMap::empty();
        let chord = KeyChord::key(Key::Character('d'));
        map.bind(chord, EditorCommand::Delete);
        map.bind(chord, EditorCommand::ZoomOut);
        assert_eq!(
            map.resolve(&KeyEvent::plain(Key::Character('D'))),
            Some(EditorCommand::ZoomOut)
        );
        map.unbind(EditorCommand::ZoomOut);
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Character('d'))), None);
    }
}
