// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base values with per-size-class overrides.
//!
//! Every varied property (constraint constant, priority and active state;
//! view opacity, hidden flag and style class; layout variable values) follows
//! the same rule: when the active size class has a stored variation, the
//! variation wins; otherwise the base value applies. With no active size
//! class the base value always applies.

use std::collections::BTreeMap;

use crate::size_class::{SizeClass, SizeClassKey};

/// A base value plus overrides keyed by size class.
#[derive(Clone, Debug, PartialEq)]
pub struct Variations<T> {
    base: T,
    overrides: BTreeMap<SizeClassKey, T>,
}

impl<T> Variations<T> {
    /// Creates a value with no variations.
    #[must_use]
    pub const fn new(base: T) -> Self {
        Self {
            base,
            overrides: BTreeMap::new(),
        }
    }

    /// Returns the base value.
    #[must_use]
    pub const fn base(&self) -> &T {
        &self.base
    }

    /// Replaces the base value.
    pub fn set_base(&mut self, value: T) {
        self.base = value;
    }

    /// Sets the base value (`size_class == None`) or the variation for
    /// `size_class`.
    pub fn set(&mut self, value: T, size_class: Option<&SizeClass>) {
        match size_class {
            None => self.base = value,
            Some(class) => {
                self.overrides.insert(class.key(), value);
            }
        }
    }

    /// Sets the variation stored under `key`.
    pub fn set_key(&mut self, key: SizeClassKey, value: T) {
        self.overrides.insert(key, value);
    }

    /// Removes the variation for `size_class`, returning it if present.
    pub fn remove(&mut self, size_class: &SizeClass) -> Option<T> {
        self.overrides.remove(&size_class.key())
    }

    /// Returns the variation stored for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &SizeClassKey) -> Option<&T> {
        self.overrides.get(key)
    }

    /// Returns whether a variation is stored for `size_class`.
    #[must_use]
    pub fn has_variation(&self, size_class: &SizeClass) -> bool {
        self.overrides.contains_key(&size_class.key())
    }

    /// Returns whether any variation is stored.
    #[must_use]
    pub fn is_varied(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Iterates over the stored variations in key order.
    pub fn variations(&self) -> impl Iterator<Item = (&SizeClassKey, &T)> {
        self.overrides.iter()
    }

    /// Resolves the effective value under `active`.
    #[must_use]
    pub fn resolve(&self, active: Option<&SizeClass>) -> &T {
        active
            .and_then(|class| self.overrides.get(&class.key()))
            .unwrap_or(&self.base)
    }

    /// Resolves the effective value using a precomputed key.
    #[must_use]
    pub fn resolve_key(&self, active: Option<&SizeClassKey>) -> &T {
        active
            .and_then(|key| self.overrides.get(key))
            .unwrap_or(&self.base)
    }

    /// Returns `true` if the base value or any variation satisfies `pred`.
    pub fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        pred(&self.base) || self.overrides.values().any(pred)
    }
}

impl<T: Default> Default for Variations<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variation_wins_only_for_its_class() {
        let s = SizeClass::all().with_max_width(600.0);
        let t = SizeClass::all().with_max_width(1000.0);

        let mut constant = Variations::new(10.0);
        constant.set(20.0, Some(&s));

        assert_eq!(*constant.resolve(Some(&s)), 20.0);
        assert_eq!(*constant.resolve(Some(&t)), 10.0);
        assert_eq!(*constant.resolve(None), 10.0);
        assert_eq!(*constant.resolve_key(Some(&s.key())), 20.0);
    }

    #[test]
    fn same_rule_for_booleans() {
        let s = SizeClass::all().with_max_height(500.0);
        let mut active = Variations::new(false);
        active.set(true, Some(&s));
        assert!(*active.resolve(Some(&s)));
        assert!(!*active.resolve(None));
        assert!(active.any(|v| *v));

        assert_eq!(active.remove(&s), Some(true));
        assert!(!active.is_varied());
        assert!(!active.any(|v| *v));
    }

    #[test]
    fn setting_base_leaves_variations() {
        let s = SizeClass::all().with_max_width(320.0);
        let mut v = Variations::new(1_u16);
        v.set(2, Some(&s));
        v.set(3, None);
        assert_eq!(*v.base(), 3);
        assert!(v.has_variation(&s));
        assert_eq!(v.variations().count(), 1);
    }
}
