// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window bookkeeping for editor chrome.
//!
//! [`WindowManager`] is an explicit context object owned by the host: it
//! tracks open windows, which one is key, and which are minimized. Closing or
//! minimizing the key window hands key status to the most recently keyed
//! window that is still visible.

use std::collections::BTreeMap;

use kurbo::Rect;

/// Handle to a window registered with a [`WindowManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u32);

/// How a window behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowStyle {
    /// A regular window.
    #[default]
    Normal,
    /// Blocks interaction with other windows; cannot be minimized.
    Modal,
    /// A floating auxiliary panel.
    Tool,
}

/// Errors from window state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Modal windows cannot be minimized or restored.
    #[error("cannot minimize or restore a modal window")]
    ModalWindow,
    /// The window is not registered.
    #[error("unknown window {0:?}")]
    UnknownWindow(WindowId),
}

/// Window lifecycle callbacks. Every method defaults to a no-op.
pub trait WindowDelegate {
    /// The window is about to become visible.
    fn window_will_appear(&mut self, window: WindowId) {
        let _ = window;
    }

    /// The window became key.
    fn window_did_become_key(&mut self, window: WindowId) {
        let _ = window;
    }

    /// The window stopped being key.
    fn window_did_resign_key(&mut self, window: WindowId) {
        let _ = window;
    }

    /// The window was minimized.
    fn window_did_minimize(&mut self, window: WindowId) {
        let _ = window;
    }

    /// The window was restored from minimized state.
    fn window_did_restore(&mut self, window: WindowId) {
        let _ = window;
    }

    /// The window is about to close.
    fn window_will_close(&mut self, window: WindowId) {
        let _ = window;
    }
}

struct WindowRecord {
    title: String,
    style: WindowStyle,
    frame: Rect,
    minimized: bool,
    delegate: Option<Box<dyn WindowDelegate>>,
}

impl core::fmt::Debug for WindowRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowRecord")
            .field("title", &self.title)
            .field("style", &self.style)
            .field("frame", &self.frame)
            .field("minimized", &self.minimized)
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}

/// Open windows and key-window tracking.
#[derive(Debug, Default)]
pub struct WindowManager {
    windows: BTreeMap<WindowId, WindowRecord>,
    /// Keyed windows, most recent last.
    key_history: Vec<WindowId>,
    next: u32,
}

impl WindowManager {
    /// Creates a manager with no windows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers and shows a window, making it key.
    pub fn open(
        &mut self,
        title: impl Into<String>,
        style: WindowStyle,
        frame: Rect,
        delegate: Option<Box<dyn WindowDelegate>>,
    ) -> WindowId {
        let id = WindowId(self.next);
        self.next += 1;
        let mut record = WindowRecord {
            title: title.into(),
            style,
            frame,
            minimized: false,
            delegate,
        };
        if let Some(d) = record.delegate.as_mut() {
            d.window_will_appear(id);
        }
        tracing::debug!(window = ?id, title = %record.title, ?style, "opened window");
        self.windows.insert(id, record);
        self.make_key(id);
        id
    }

    /// Makes `window` key. Minimized or unknown windows are ignored.
    pub fn make_key(&mut self, window: WindowId) {
        if !self.windows.get(&window).is_some_and(|w| !w.minimized) {
            return;
        }
        let previous = self.key_window();
        if previous == Some(window) {
            return;
        }
        if let Some(prev) = previous {
            self.notify(prev, |d, id| d.window_did_resign_key(id));
        }
        self.key_history.retain(|w| *w != window);
        self.key_history.push(window);
        self.notify(window, |d, id| d.window_did_become_key(id));
    }

    /// The key window, if any.
    #[must_use]
    pub fn key_window(&self) -> Option<WindowId> {
        self.key_history
            .iter()
            .rev()
            .copied()
            .find(|w| self.windows.get(w).is_some_and(|r| !r.minimized))
    }

    /// Minimizes a window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ModalWindow`] for modal windows and
    /// [`WindowError::UnknownWindow`] for unregistered ones.
    pub fn minimize(&mut self, window: WindowId) -> Result<(), WindowError> {
        let was_key = self.key_window() == Some(window);
        self.set_minimized(window, true)?;
        self.key_history.retain(|w| *w != window);
        if was_key {
            self.notify(window, |d, id| d.window_did_resign_key(id));
            self.promote_key();
        }
        self.notify(window, |d, id| d.window_did_minimize(id));
        Ok(())
    }

    /// Restores a minimized window and makes it key.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ModalWindow`] for modal windows and
    /// [`WindowError::UnknownWindow`] for unregistered ones.
    pub fn restore(&mut self, window: WindowId) -> Result<(), WindowError> {
        self.set_minimized(window, false)?;
        self.notify(window, |d, id| d.window_did_restore(id));
        self.make_key(window);
        Ok(())
    }

    /// Closes a window. Unknown windows are ignored.
    pub fn close(&mut self, window: WindowId) {
        let was_key = self.key_window() == Some(window);
        self.notify(window, |d, id| d.window_will_close(id));
        if self.windows.remove(&window).is_none() {
            return;
        }
        self.key_history.retain(|w| *w != window);
        tracing::debug!(?window, "closed window");
        if was_key {
            self.promote_key();
        }
    }

    /// Returns whether the window is open.
    #[must_use]
    pub fn is_open(&self, window: WindowId) -> bool {
        self.windows.contains_key(&window)
    }

    /// Returns whether the window is minimized.
    #[must_use]
    pub fn is_minimized(&self, window: WindowId) -> bool {
        self.windows.get(&window).is_some_and(|w| w.minimized)
    }

    /// Style of an open window.
    #[must_use]
    pub fn style(&self, window: WindowId) -> Option<WindowStyle> {
        self.windows.get(&window).map(|w| w.style)
    }

    /// Title of an open window.
    #[must_use]
    pub fn title(&self, window: WindowId) -> Option<&str> {
        self.windows.get(&window).map(|w| w.title.as_str())
    }

    /// Frame of an open window.
    #[must_use]
    pub fn frame(&self, window: WindowId) -> Option<Rect> {
        self.windows.get(&window).map(|w| w.frame)
    }

    /// Moves or resizes an open window.
    pub fn set_frame(&mut self, window: WindowId, frame: Rect) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.frame = frame;
        }
    }

    /// Open windows in creation order.
    pub fn windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys().copied()
    }

    fn set_minimized(&mut self, window: WindowId, minimized: bool) -> Result<(), WindowError> {
        let record = self
            .windows
            .get_mut(&window)
            .ok_or(WindowError::UnknownWindow(window))?;
        if record.style == WindowStyle::Modal {
            return Err(WindowError::ModalWindow);
        }
        record.minimized = minimized;
        Ok(())
    }

    fn promote_key(&mut self) {
        if let Some(next) = self.key_window() {
            self.notify(next, |d, id| d.window_did_become_key(id));
        }
    }

    fn notify(&mut self, window: WindowId, f: impl FnOnce(&mut dyn WindowDelegate, WindowId)) {
        if let Some(d) = self
            .windows
            .get_mut(&window)
            .and_then(|w| w.delegate.as_deref_mut())
        {
            f(d, window);
        }
    }
}
