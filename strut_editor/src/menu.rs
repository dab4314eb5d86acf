// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context menus.

/// One menu entry.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem<T> {
    /// Displayed title.
    pub title: String,
    /// Whether the item can be chosen.
    pub enabled: bool,
    /// The value the item stands for.
    pub value: T,
}

/// Vetoes menu choices. Every method has a permissive default.
pub trait MenuDelegate<T> {
    /// Returns whether `item` may be chosen.
    fn should_select(&mut self, item: &MenuItem<T>) -> bool {
        let _ = item;
        true
    }
}

/// An ordered list of items.
#[derive(Clone, Debug, PartialEq)]
pub struct Menu<T> {
    items: Vec<MenuItem<T>>,
}

impl<T> Default for Menu<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Menu<T> {
    /// Creates an empty menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an enabled item.
    pub fn push(&mut self, title: impl Into<String>, value: T) {
        self.items.push(MenuItem {
            title: title.into(),
            enabled: true,
            value,
        });
    }

    /// The items in display order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem<T>] {
        &self.items
    }

    /// Enables or disables the item at `index`.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.enabled = enabled;
        }
    }

    /// Returns whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Chooses the item at `index`.
    ///
    /// Returns `None` for an out-of-range index, a disabled item, or one the
    /// delegate vetoes. Without a delegate every enabled item is allowed.
    pub fn select(&self, index: usize, delegate: Option<&mut dyn MenuDelegate<T>>) -> Option<&T> {
        let item = self.items.get(index).filter(|i| i.enabled)?;
        if let Some(delegate) = delegate {
            if !delegate.should_select(item) {
                tracing::debug!(title = %item.title, "menu selection vetoed");
                return None;
            }
        }
        Some(&item.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Veto(&'static str);

    impl MenuDelegate<u8> for Veto {
        fn should_select(&mut self, item: &MenuItem<u8>) -> bool {
            item.title != self.0
        }
    }

    struct Permissive;

    impl MenuDelegate<u8> for Permissive {}

    fn menu() -> Menu<u8> {
        let mut menu = Menu::new();
        menu.push("Width", 1);
        menu.push("Height", 2);
        menu
    }

    #[test]
    fn absent_delegate_allows_selection() {
        assert_eq!(menu().select(1, None), Some(&2));
        assert_eq!(menu().select(5, None), None);
        assert_eq!(menu().select(0, Some(&mut Permissive)), Some(&1));
    }

    #[test]
    fn delegate_and_disabled_items_block_selection() {
        let mut m = menu();
        assert_eq!(m.select(0, Some(&mut Veto("Width"))), None);
        assert_eq!(m.select(1, Some(&mut Veto("Width"))), Some(&2));
        m.set_enabled(1, false);
        assert_eq!(m.select(1, None), None);
    }
}
