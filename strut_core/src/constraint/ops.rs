// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint lifecycle and variation management on [`ViewStore`].
//!
//! Mutators accept anything convertible into a [`ConstraintRef`]: an atomic
//! [`ConstraintId`] or a [`CollectionId`](super::CollectionId). Editing a
//! collection edits every constituent, so the constituents of one collection
//! always share constant, priority, and active state.

use core::fmt::Write as _;

use super::attribute::{Axis, Constant, Priority};
use super::id::{ConstraintId, ConstraintRef};
use super::spec::ConstraintSpec;
use super::store::{CollectionKind, Constraint};
use crate::error::ConstraintError;
use crate::size_class::SizeClass;
use crate::variation::Variations;
use crate::view::{ViewId, ViewStore};

impl ViewStore {
    /// Creates a constraint from `spec`.
    ///
    /// The constraint starts inactive; call [`set_active`](Self::set_active)
    /// to register it with its views.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the attributes are not axis-consistent
    /// or the multiplier is unusable.
    ///
    /// # Panics
    ///
    /// Panics if either view handle is stale.
    pub fn create_constraint(&mut self, spec: ConstraintSpec) -> Result<ConstraintId, ConstraintError> {
        self.validate(spec.view);
        if let Some(target) = spec.target {
            self.validate(target.view);
        }
        spec.validate()?;

        let record = Constraint {
            view: spec.view,
            attribute: spec.attribute,
            target: spec.target.map(|t| (t.view, t.attribute)),
            relation: spec.relation,
            multiplier: if spec.target.is_some() {
                spec.multiplier
            } else {
                1.0
            },
            constant: Variations::new(spec.constant),
            priority: Variations::new(spec.priority),
            active: Variations::new(false),
            collection: None,
        };
        Ok(self.insert_constraint(record))
    }

    /// Stores a validated record and attaches it to its views.
    pub(crate) fn insert_constraint(&mut self, record: Constraint) -> ConstraintId {
        let view = record.view;
        let target = record.target.map(|(t, _)| t);
        let (idx, generation) = self.constraints.insert(record);
        let id = ConstraintId { idx, generation };
        self.attached[view.idx as usize].push(id);
        if let Some(target) = target.filter(|t| *t != view) {
            self.attached[target.idx as usize].push(id);
        }
        tracing::debug!(constraint = ?id, "created constraint");
        id
    }

    /// Returns whether the handle refers to a live constraint.
    #[must_use]
    pub fn is_constraint_alive(&self, id: ConstraintId) -> bool {
        self.constraints.get(id.idx, id.generation).is_some()
    }

    /// Returns the constraint record.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        match self.constraints.get(id.idx, id.generation) {
            Some(c) => c,
            None => panic!("stale ConstraintId: {id:?}"),
        }
    }

    /// Iterates over every live constraint.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints
            .iter()
            .map(|(idx, generation, c)| (ConstraintId { idx, generation }, c))
    }

    /// Returns the number of live constraints.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Resolves a reference to its atomic constraints.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn atomics(&self, target: impl Into<ConstraintRef>) -> Vec<ConstraintId> {
        match target.into() {
            ConstraintRef::Atomic(id) => {
                let _ = self.constraint(id);
                vec![id]
            }
            ConstraintRef::Collection(id) => self.collection(id).constituents.clone(),
        }
    }

    /// Returns whether the handle refers to a live constraint or collection.
    #[must_use]
    pub fn is_ref_alive(&self, target: ConstraintRef) -> bool {
        match target {
            ConstraintRef::Atomic(id) => self.is_constraint_alive(id),
            ConstraintRef::Collection(id) => self.is_collection_alive(id),
        }
    }

    /// The reference an editor should select for `id`: its collection if it
    /// belongs to one, otherwise the constraint itself.
    #[must_use]
    pub fn selectable_ref(&self, id: ConstraintId) -> ConstraintRef {
        self.constraint(id)
            .collection
            .map_or(ConstraintRef::Atomic(id), ConstraintRef::Collection)
    }

    // -- Active state --

    /// Sets the base active state.
    ///
    /// An inactive constraint is kept and can be activated again.
    pub fn set_active(&mut self, target: impl Into<ConstraintRef>, active: bool) {
        self.set_active_for(target, active, None);
    }

    /// Sets the base active state (`size_class == None`) or its variation.
    pub fn set_active_for(
        &mut self,
        target: impl Into<ConstraintRef>,
        active: bool,
        size_class: Option<&SizeClass>,
    ) {
        self.update_constraints(target.into(), |c| c.active.set(active, size_class));
    }

    /// Removes the active-state variation for `size_class`.
    pub fn remove_active_variation(&mut self, target: impl Into<ConstraintRef>, size_class: &SizeClass) {
        self.update_constraints(target.into(), |c| {
            c.active.remove(size_class);
        });
    }

    /// Returns whether the constraint is active under the active size class.
    #[must_use]
    pub fn is_active(&self, target: impl Into<ConstraintRef>) -> bool {
        self.first_atomic(target.into())
            .is_some_and(|c| *c.active.resolve_key(self.active_key.as_ref()))
    }

    /// Returns whether the constraint is active at the base level or in any
    /// size class.
    #[must_use]
    pub fn is_registered(&self, target: impl Into<ConstraintRef>) -> bool {
        self.first_atomic(target.into())
            .is_some_and(Constraint::is_registered)
    }

    // -- Constant --

    /// Sets the base constant.
    pub fn set_constant(&mut self, target: impl Into<ConstraintRef>, constant: impl Into<Constant>) {
        self.set_constant_for(target, constant, None);
    }

    /// Sets the base constant (`size_class == None`) or its variation.
    pub fn set_constant_for(
        &mut self,
        target: impl Into<ConstraintRef>,
        constant: impl Into<Constant>,
        size_class: Option<&SizeClass>,
    ) {
        let constant = constant.into();
        self.update_constraints(target.into(), |c| c.constant.set(constant.clone(), size_class));
    }

    /// Removes the constant variation for `size_class`.
    pub fn remove_constant_variation(
        &mut self,
        target: impl Into<ConstraintRef>,
        size_class: &SizeClass,
    ) {
        self.update_constraints(target.into(), |c| {
            c.constant.remove(size_class);
        });
    }

    /// Returns the constant in effect under the active size class.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or names an empty collection.
    #[must_use]
    pub fn effective_constant(&self, target: impl Into<ConstraintRef>) -> &Constant {
        let target = target.into();
        match self.first_atomic(target) {
            Some(c) => c.constant.resolve_key(self.active_key.as_ref()),
            None => panic!("constraint reference without constituents: {target:?}"),
        }
    }

    // -- Priority --

    /// Sets the base priority.
    pub fn set_priority(&mut self, target: impl Into<ConstraintRef>, priority: Priority) {
        self.set_priority_for(target, priority, None);
    }

    /// Sets the base priority (`size_class == None`) or its variation.
    pub fn set_priority_for(
        &mut self,
        target: impl Into<ConstraintRef>,
        priority: Priority,
        size_class: Option<&SizeClass>,
    ) {
        self.update_constraints(target.into(), |c| c.priority.set(priority, size_class));
    }

    /// Removes the priority variation for `size_class`.
    pub fn remove_priority_variation(
        &mut self,
        target: impl Into<ConstraintRef>,
        size_class: &SizeClass,
    ) {
        self.update_constraints(target.into(), |c| {
            c.priority.remove(size_class);
        });
    }

    /// Returns the priority in effect under the active size class.
    #[must_use]
    pub fn effective_priority(&self, target: impl Into<ConstraintRef>) -> Priority {
        self.first_atomic(target.into())
            .map_or(Priority::REQUIRED, |c| {
                *c.priority.resolve_key(self.active_key.as_ref())
            })
    }

    // -- Removal and enumeration --

    /// Deactivates and permanently detaches a constraint from its views.
    ///
    /// A constituent is also dropped from its collection; a collection left
    /// without constituents is removed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_constraint(&mut self, id: ConstraintId) {
        let Some(record) = self.constraints.remove(id.idx, id.generation) else {
            panic!("stale ConstraintId: {id:?}");
        };
        for view in [Some(record.view), record.target.map(|(t, _)| t)]
            .into_iter()
            .flatten()
        {
            if self.is_alive(view) {
                self.attached[view.idx as usize].retain(|c| *c != id);
                if record.is_registered() {
                    self.mark_layout(view.idx);
                }
            }
        }
        if let Some(collection) = record.collection {
            let now_empty = match self.collections.get_mut(collection.idx, collection.generation) {
                Some(col) => {
                    col.constituents.retain(|c| *c != id);
                    col.constituents.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.collections.remove(collection.idx, collection.generation);
            }
        }
        tracing::debug!(constraint = ?id, "removed constraint");
    }

    /// Removes an atomic constraint or a whole collection.
    pub fn remove(&mut self, target: impl Into<ConstraintRef>) {
        match target.into() {
            ConstraintRef::Atomic(id) => self.remove_constraint(id),
            ConstraintRef::Collection(id) => self.remove_collection(id),
        }
    }

    /// Returns the constraints registered on `view` (active at the base level
    /// or in some size class), in creation order per view.
    #[must_use]
    pub fn local_constraints(&self, view: ViewId) -> Vec<ConstraintId> {
        self.validate(view);
        self.attached[view.idx as usize]
            .iter()
            .copied()
            .filter(|id| self.constraint(*id).is_registered())
            .collect()
    }

    /// Returns every constraint naming `view`, registered or not.
    #[must_use]
    pub fn attached_constraints(&self, view: ViewId) -> &[ConstraintId] {
        self.validate(view);
        &self.attached[view.idx as usize]
    }

    // -- Layout variables --

    /// Marks the views of every constraint whose constant (base or any
    /// variation) names `variable` as needing layout. Returns how many
    /// constraints were affected.
    pub fn invalidate_layout_variable(&mut self, variable: &str) -> usize {
        let affected: Vec<ConstraintId> = self
            .constraints()
            .filter(|(_, c)| c.constant.any(|k| k.variable_name() == Some(variable)))
            .map(|(id, _)| id)
            .collect();
        for &id in &affected {
            self.mark_constraint_views(id);
        }
        affected.len()
    }

    /// Points every constant that names `old` at `new` instead. Returns how
    /// many constraints were affected.
    pub fn rename_variable_references(&mut self, old: &str, new: &str) -> usize {
        let affected: Vec<ConstraintId> = self
            .constraints()
            .filter(|(_, c)| c.constant.any(|k| k.variable_name() == Some(old)))
            .map(|(id, _)| id)
            .collect();
        for &id in &affected {
            if let Some(c) = self.constraints.get_mut(id.idx, id.generation) {
                let renamed = |k: &Constant| match k {
                    Constant::Variable { name, negated } if name == old => Constant::Variable {
                        name: String::from(new),
                        negated: *negated,
                    },
                    other => other.clone(),
                };
                let mut constant = Variations::new(renamed(c.constant.base()));
                for (key, value) in c.constant.variations() {
                    constant.set_key(key.clone(), renamed(value));
                }
                c.constant = constant;
            }
            self.mark_constraint_views(id);
        }
        affected.len()
    }

    // -- Descriptions --

    /// Describes a constraint as an equation, e.g.
    /// `"a.leading = b.trailing + 8 @750"`.
    ///
    /// Values are the ones in effect under the active size class.
    #[must_use]
    pub fn describe(&self, id: ConstraintId) -> String {
        let c = self.constraint(id);
        let mut out = format!(
            "{}.{} {} ",
            self.label(c.view),
            c.attribute.name(),
            c.relation.symbol()
        );
        let constant = c.constant.resolve_key(self.active_key.as_ref());
        match c.target {
            Some((target, attribute)) => {
                if c.multiplier != 1.0 {
                    let _ = write!(out, "{} * ", c.multiplier);
                }
                let _ = write!(out, "{}.{}", self.label(target), attribute.name());
                match constant {
                    Constant::Value(v) if *v == 0.0 => {}
                    Constant::Value(v) if *v < 0.0 => {
                        let _ = write!(out, " - {}", -v);
                    }
                    Constant::Value(v) => {
                        let _ = write!(out, " + {v}");
                    }
                    Constant::Variable { name, negated } => {
                        let sign = if *negated { '-' } else { '+' };
                        let _ = write!(out, " {sign} {name}");
                    }
                }
            }
            None => {
                let _ = write!(out, "{constant}");
            }
        }
        let priority = *c.priority.resolve_key(self.active_key.as_ref());
        if !priority.is_required() {
            let _ = write!(out, " @{}", priority.value());
        }
        out
    }

    /// Describes an atomic constraint or a collection.
    #[must_use]
    pub fn describe_ref(&self, target: ConstraintRef) -> String {
        match target {
            ConstraintRef::Atomic(id) => self.describe(id),
            ConstraintRef::Collection(id) => {
                let col = self.collection(id);
                let names: Vec<String> = col.views.iter().map(|v| self.label(*v)).collect();
                let names = names.join(", ");
                match col.kind {
                    CollectionKind::EqualAttribute(attribute) => {
                        format!("equal {}: {names}", attribute.name())
                    }
                    CollectionKind::EqualSpacing(axis) => {
                        let spacing = col
                            .constituents
                            .first()
                            .map(|c| self.effective_constant(*c).to_string())
                            .unwrap_or_default();
                        let axis = match axis {
                            Axis::Horizontal => "horizontal",
                            Axis::Vertical => "vertical",
                        };
                        format!("equal {axis} spacing {spacing}: {names}")
                    }
                }
            }
        }
    }

    // -- Internal helpers --

    fn first_atomic(&self, target: ConstraintRef) -> Option<&Constraint> {
        match target {
            ConstraintRef::Atomic(id) => Some(self.constraint(id)),
            ConstraintRef::Collection(id) => self
                .collection(id)
                .constituents
                .first()
                .map(|c| self.constraint(*c)),
        }
    }

    /// Applies `f` to every atomic constraint of `target` and marks their
    /// views as needing layout.
    fn update_constraints(&mut self, target: ConstraintRef, mut f: impl FnMut(&mut Constraint)) {
        for id in self.atomics(target) {
            if let Some(c) = self.constraints.get_mut(id.idx, id.generation) {
                f(c);
            }
            self.mark_constraint_views(id);
        }
    }

    fn mark_constraint_views(&mut self, id: ConstraintId) {
        let c = self.constraint(id);
        let first = c.view;
        let second = c.target.map(|(t, _)| t);
        self.mark_layout(first.idx);
        if let Some(second) = second {
            self.mark_layout(second.idx);
        }
    }
}
