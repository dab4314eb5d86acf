// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Equal-attribute and equal-spacing constraint collections.

use super::attribute::{Attribute, Axis, Constant, Priority, Relation};
use super::id::{CollectionId, ConstraintId};
use super::store::{Collection, CollectionKind, Constraint};
use crate::error::ConstraintError;
use crate::variation::Variations;
use crate::view::{ViewId, ViewStore};

impl ViewStore {
    /// Creates a collection making `attribute` equal across `views`.
    ///
    /// Produces `views.len() - 1` inactive constituents
    /// `views[i].attribute = views[0].attribute`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::TooFewViews`] for fewer than two views.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn create_equal_attribute(
        &mut self,
        views: &[ViewId],
        attribute: Attribute,
    ) -> Result<CollectionId, ConstraintError> {
        self.check_collection_views(views)?;
        let first = views[0];
        let pairs: Vec<_> = views[1..]
            .iter()
            .map(|&v| (v, attribute, first, attribute))
            .collect();
        Ok(self.build_collection(
            CollectionKind::EqualAttribute(attribute),
            views.to_vec(),
            &pairs,
            Constant::Value(0.0),
        ))
    }

    /// Creates a collection spacing `views` evenly along `axis`.
    ///
    /// Views are sorted by their current position on the axis. Consecutive
    /// views get `next.leading = previous.trailing + spacing` (top/bottom
    /// vertically), all sharing one spacing constant initialised to the
    /// current average gap.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::TooFewViews`] for fewer than two views.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn create_equal_spacing(
        &mut self,
        views: &[ViewId],
        axis: Axis,
    ) -> Result<CollectionId, ConstraintError> {
        self.check_collection_views(views)?;
        let (leading, trailing) = (axis.leading(), axis.trailing());

        let mut sorted = views.to_vec();
        sorted.sort_by(|a, b| {
            let a = leading.value_in(self.frame_in_root(*a));
            let b = leading.value_in(self.frame_in_root(*b));
            a.total_cmp(&b)
        });

        let gaps: f64 = sorted
            .windows(2)
            .map(|w| {
                leading.value_in(self.frame_in_root(w[1]))
                    - trailing.value_in(self.frame_in_root(w[0]))
            })
            .sum();
        #[expect(
            clippy::cast_precision_loss,
            reason = "view counts are far below f64 precision limits"
        )]
        let spacing = gaps / (sorted.len() - 1) as f64;

        let pairs: Vec<_> = sorted
            .windows(2)
            .map(|w| (w[1], leading, w[0], trailing))
            .collect();
        Ok(self.build_collection(
            CollectionKind::EqualSpacing(axis),
            sorted,
            &pairs,
            Constant::Value(spacing),
        ))
    }

    /// Returns whether the handle refers to a live collection.
    #[must_use]
    pub fn is_collection_alive(&self, id: CollectionId) -> bool {
        self.collections.get(id.idx, id.generation).is_some()
    }

    /// Returns the collection record.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> &Collection {
        match self.collections.get(id.idx, id.generation) {
            Some(c) => c,
            None => panic!("stale CollectionId: {id:?}"),
        }
    }

    /// Returns the collection a constraint belongs to, if any.
    #[must_use]
    pub fn collection_of(&self, id: ConstraintId) -> Option<CollectionId> {
        self.constraint(id).collection
    }

    /// Iterates over every live collection.
    pub fn collections(&self) -> impl Iterator<Item = (CollectionId, &Collection)> {
        self.collections
            .iter()
            .map(|(idx, generation, c)| (CollectionId { idx, generation }, c))
    }

    /// Removes a collection and every constituent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_collection(&mut self, id: CollectionId) {
        for constraint in self.collection(id).constituents.clone() {
            self.remove_constraint(constraint);
        }
        // Removing the last constituent normally drops the collection.
        self.collections.remove(id.idx, id.generation);
        tracing::debug!(collection = ?id, "removed collection");
    }

    fn check_collection_views(&self, views: &[ViewId]) -> Result<(), ConstraintError> {
        for &view in views {
            self.validate(view);
        }
        if views.len() < 2 {
            return Err(ConstraintError::TooFewViews(views.len()));
        }
        Ok(())
    }

    fn build_collection(
        &mut self,
        kind: CollectionKind,
        views: Vec<ViewId>,
        pairs: &[(ViewId, Attribute, ViewId, Attribute)],
        constant: Constant,
    ) -> CollectionId {
        let (idx, generation) = self.collections.insert(Collection {
            kind,
            views,
            constituents: Vec::new(),
        });
        let id = CollectionId { idx, generation };

        let constituents: Vec<ConstraintId> = pairs
            .iter()
            .map(|&(view, attribute, target, target_attribute)| {
                self.insert_constraint(Constraint {
                    view,
                    attribute,
                    target: Some((target, target_attribute)),
                    relation: Relation::Equal,
                    multiplier: 1.0,
                    constant: Variations::new(constant.clone()),
                    priority: Variations::new(Priority::REQUIRED),
                    active: Variations::new(false),
                    collection: Some(id),
                })
            })
            .collect();
        if let Some(col) = self.collections.get_mut(idx, generation) {
            col.constituents = constituents;
        }
        tracing::debug!(collection = ?id, ?kind, "created collection");
        id
    }
}
