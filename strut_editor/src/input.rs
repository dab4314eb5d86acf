// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and keyboard input as delivered by the host.
//!
//! Positions are in screen pixels relative to the workspace origin, before
//! the editor's zoom is undone. The host captures the pointer for the whole
//! gesture, so moves and releases outside the workspace still arrive here.

use kurbo::Point;

/// Pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Left mouse button, or a touch.
    Primary,
    /// Right mouse button.
    Secondary,
}

/// Modifier keys held during an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Command (macOS) or Windows key.
    pub command: bool,
    /// Control key.
    pub control: bool,
    /// Shift key.
    pub shift: bool,
    /// Alt/Option key.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        command: false,
        control: false,
        shift: false,
        alt: false,
    };

    /// Only the command key held.
    pub const COMMAND: Self = Self {
        command: true,
        control: false,
        shift: false,
        alt: false,
    };

    /// Returns whether the platform's primary shortcut modifier (command or
    /// control) is held.
    #[must_use]
    pub const fn primary(self) -> bool {
        self.command || self.control
    }
}

/// A pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// A button was pressed.
    Down {
        /// Press position.
        position: Point,
        /// Pressed button.
        button: Button,
        /// Modifiers at press time.
        modifiers: Modifiers,
    },
    /// The pointer moved.
    Move {
        /// New position.
        position: Point,
    },
    /// The pressed button was released.
    Up {
        /// Release position.
        position: Point,
    },
    /// The gesture was interrupted (touch cancel, window blur).
    Cancel,
}

/// A key, independent of layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Character(char),
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Escape.
    Escape,
    /// Return/Enter.
    Enter,
}

/// A key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
    /// Modifiers at press time.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// A key press with modifiers.
    #[must_use]
    pub const fn with(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}
