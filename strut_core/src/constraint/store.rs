// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint and collection records and their generational arena.

use super::attribute::{Attribute, Axis, Constant, Priority, Relation};
use super::id::{CollectionId, ConstraintId};
use crate::variation::Variations;
use crate::view::ViewId;

/// Generational slot storage shared by constraints and collections.
#[derive(Debug)]
pub(crate) struct Slab<T> {
    entries: Vec<Option<T>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<T> Slab<T> {
    /// Stores `value`, returning its `(idx, generation)`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "handles address at most u32::MAX slots"
    )]
    pub(crate) fn insert(&mut self, value: T) -> (u32, u32) {
        if let Some(idx) = self.free_list.pop() {
            self.entries[idx as usize] = Some(value);
            (idx, self.generation[idx as usize])
        } else {
            let idx = self.entries.len() as u32;
            self.entries.push(Some(value));
            self.generation.push(0);
            (idx, 0)
        }
    }

    pub(crate) fn get(&self, idx: u32, generation: u32) -> Option<&T> {
        if self.generation.get(idx as usize) != Some(&generation) {
            return None;
        }
        self.entries[idx as usize].as_ref()
    }

    pub(crate) fn get_mut(&mut self, idx: u32, generation: u32) -> Option<&mut T> {
        if self.generation.get(idx as usize) != Some(&generation) {
            return None;
        }
        self.entries[idx as usize].as_mut()
    }

    /// Removes the entry and bumps the slot generation.
    pub(crate) fn remove(&mut self, idx: u32, generation: u32) -> Option<T> {
        if self.generation.get(idx as usize) != Some(&generation) {
            return None;
        }
        let value = self.entries[idx as usize].take()?;
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
        Some(value)
    }

    /// Iterates over live entries as `(idx, generation, value)`.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        (0_u32..)
            .zip(self.entries.iter().zip(&self.generation))
            .filter_map(|(idx, (entry, generation))| {
                entry.as_ref().map(|value| (idx, *generation, value))
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len() - self.free_list.len()
    }
}

/// An atomic layout constraint:
/// `view.attribute  relation  multiplier × target.attribute + constant`.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub(crate) view: ViewId,
    pub(crate) attribute: Attribute,
    pub(crate) target: Option<(ViewId, Attribute)>,
    pub(crate) relation: Relation,
    pub(crate) multiplier: f64,
    pub(crate) constant: Variations<Constant>,
    pub(crate) priority: Variations<Priority>,
    pub(crate) active: Variations<bool>,
    pub(crate) collection: Option<CollectionId>,
}

impl Constraint {
    /// The constrained view.
    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// The constrained attribute.
    #[must_use]
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// The target view and attribute; `None` for constant-only constraints.
    #[must_use]
    pub fn target(&self) -> Option<(ViewId, Attribute)> {
        self.target
    }

    /// The relation.
    #[must_use]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The multiplier applied to the target attribute.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The axis this constraint acts on.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.attribute.axis()
    }

    /// Base constant and its size-class variations.
    #[must_use]
    pub fn constant(&self) -> &Variations<Constant> {
        &self.constant
    }

    /// Base priority and its size-class variations.
    #[must_use]
    pub fn priority(&self) -> &Variations<Priority> {
        &self.priority
    }

    /// Base active state and its size-class variations.
    #[must_use]
    pub fn active(&self) -> &Variations<bool> {
        &self.active
    }

    /// The collection this constraint is a constituent of, if any.
    #[must_use]
    pub fn collection(&self) -> Option<CollectionId> {
        self.collection
    }

    /// Returns whether the constraint is active at the base level or in any
    /// size class, i.e. whether it is registered with its views.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.active.any(|active| *active)
    }

    /// Returns whether the constraint involves `view` on either side.
    #[must_use]
    pub fn involves(&self, view: ViewId) -> bool {
        self.view == view || self.target.is_some_and(|(target, _)| target == view)
    }

    /// Returns the view on the other side from `view`.
    #[must_use]
    pub fn other_view(&self, view: ViewId) -> Option<ViewId> {
        match self.target {
            Some((target, _)) if self.view == view => Some(target),
            Some(_) => Some(self.view),
            None => None,
        }
    }
}

/// How a collection generates its constituents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Every view's attribute equals the first view's.
    EqualAttribute(Attribute),
    /// Consecutive views are separated by one shared spacing constant.
    EqualSpacing(Axis),
}

/// A group of constraints created and managed as one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    pub(crate) kind: CollectionKind,
    pub(crate) views: Vec<ViewId>,
    pub(crate) constituents: Vec<ConstraintId>,
}

impl Collection {
    /// The collection kind.
    #[must_use]
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Participating views, in constituent order.
    #[must_use]
    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    /// The atomic constraints handed to the solver.
    #[must_use]
    pub fn constituents(&self) -> &[ConstraintId] {
        &self.constituents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_reuses_slots_with_new_generation() {
        let mut slab = Slab::default();
        let (a, gen_a) = slab.insert("a");
        assert_eq!(slab.get(a, gen_a), Some(&"a"));
        assert_eq!(slab.remove(a, gen_a), Some("a"));
        assert_eq!(slab.get(a, gen_a), None);

        let (b, gen_b) = slab.insert("b");
        assert_eq!(a, b);
        assert_ne!(gen_a, gen_b);
        assert_eq!(slab.remove(a, gen_a), None);
        assert_eq!(slab.len(), 1);
        assert_eq!(slab.iter().count(), 1);
    }
}
