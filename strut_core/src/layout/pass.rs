// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout pass driver on [`ViewStore`].

use std::collections::{BTreeMap, BTreeSet};

use kurbo::{Rect, Size, Vec2};

use super::{
    IntrinsicInput, LayoutChanges, LayoutContext, LayoutProblem, LayoutValidity, ProblemView,
    ResolvedConstraint, validity,
};
use crate::constraint::{Constant, ConstraintId};
use crate::dirty;
use crate::trace::{ConstraintRejectedEvent, PassBeginEvent, PassEndEvent, RootSolvedEvent};
use crate::variables::LayoutVariableProvider;
use crate::view::{INVALID, ViewId, ViewStore};

impl ViewStore {
    /// Lays out the tree under `root` at `container` size.
    ///
    /// The root keeps its origin and takes the container size. If neither
    /// the container size nor anything under `root` changed since the last
    /// pass, no solve happens; property and lifecycle changes are still
    /// collected, so repeated calls return empty changes.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale or has a superview.
    pub fn layout(
        &mut self,
        root: ViewId,
        container: Size,
        ctx: &mut LayoutContext<'_>,
    ) -> LayoutChanges {
        self.validate(root);
        assert!(
            self.parent[root.idx as usize] == INVALID,
            "layout root has a superview"
        );
        let idx = root.idx as usize;
        let resized = self.frame[idx].size() != container;
        if resized {
            self.frame[idx] = Rect::from_origin_size(self.frame[idx].origin(), container);
            self.mark_layout(root.idx);
        }
        self.sync_layout_dirty();
        let roots = if self.layout_pending[idx] {
            vec![root.idx]
        } else {
            Vec::new()
        };
        let mut changes = self.run_pass(&roots, ctx);
        if resized && !changes.frames.contains(&root) {
            changes.frames.insert(0, root);
        }
        changes
    }

    /// Lays out every root with pending layout, at its current size.
    ///
    /// Returns `None` while a layout batch is open; the dirty marks are kept
    /// for the pass that closes the batch.
    pub fn layout_if_needed(&mut self, ctx: &mut LayoutContext<'_>) -> Option<LayoutChanges> {
        if self.batch_depth > 0 {
            return None;
        }
        self.sync_layout_dirty();
        let roots: Vec<u32> = (0..self.len)
            .filter(|&idx| {
                self.parent[idx as usize] == INVALID
                    && self.layout_pending[idx as usize]
                    && self.alive[idx as usize]
            })
            .collect();
        Some(self.run_pass(&roots, ctx))
    }

    /// Opens a layout batch. Batches nest.
    pub fn begin_layout_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Closes a layout batch; closing the outermost batch runs one coalesced
    /// pass and returns its changes.
    ///
    /// # Panics
    ///
    /// Panics if no batch is open.
    pub fn end_layout_batch(&mut self, ctx: &mut LayoutContext<'_>) -> Option<LayoutChanges> {
        assert!(
            self.batch_depth > 0,
            "end_layout_batch without begin_layout_batch"
        );
        self.batch_depth -= 1;
        self.layout_if_needed(ctx)
    }

    /// Returns whether a layout batch is open.
    #[must_use]
    pub fn is_layout_batch_open(&self) -> bool {
        self.batch_depth > 0
    }

    /// Returns the validity verdict of the last pass over `root`.
    #[must_use]
    pub fn layout_validity(&self, root: ViewId) -> Option<&LayoutValidity> {
        self.validate(root);
        self.validity.get(&root.idx)
    }

    /// Returns the index the next layout pass will carry.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        self.pass_index
    }

    fn run_pass(&mut self, roots: &[u32], ctx: &mut LayoutContext<'_>) -> LayoutChanges {
        let pass_index = self.pass_index;
        self.pass_index += 1;
        let mut changes = LayoutChanges {
            pass_index,
            ..LayoutChanges::default()
        };

        ctx.tracer.pass_begin(&PassBeginEvent {
            pass_index,
            roots: roots.len(),
        });
        for &root in roots {
            self.layout_root(root, pass_index, ctx, &mut changes);
        }
        self.recompute_properties(&mut changes);
        self.collect_lifecycle(&mut changes);
        ctx.tracer.pass_end(&PassEndEvent {
            pass_index,
            frames_changed: changes.frames.len(),
            properties_changed: changes.properties.len(),
        });

        tracing::trace!(
            pass_index,
            roots = roots.len(),
            frames = changes.frames.len(),
            properties = changes.properties.len(),
            "layout pass"
        );
        changes
    }

    fn layout_root(
        &mut self,
        root: u32,
        pass_index: u64,
        ctx: &mut LayoutContext<'_>,
        changes: &mut LayoutChanges,
    ) {
        let root_id = self.id_at(root);
        let problem = self.build_problem(root_id, ctx);

        let (frames, rejected, validity) = match ctx.solver.solve(&problem) {
            Ok(solution) => {
                let validity = validity::classify(&problem, &solution.rejected);
                (Some(solution.frames), solution.rejected, validity)
            }
            Err(err) => {
                tracing::warn!(root = ?root_id, %err, "layout solve failed; frames kept");
                (None, Vec::new(), LayoutValidity::Unsatisfiable)
            }
        };

        let mut frames_changed = 0;
        for (i, view) in problem.views.iter().enumerate() {
            let idx = view.view.idx as usize;
            let mut moved = self.offset[idx] != Vec2::ZERO;
            self.offset[idx] = Vec2::ZERO;
            if let (Some(frames), Some(parent)) = (&frames, view.parent) {
                let solved = frames[i] - frames[parent].origin().to_vec2();
                if solved != self.frame[idx] {
                    self.frame[idx] = solved;
                    moved = true;
                }
            }
            if moved {
                changes.frames.push(view.view);
                frames_changed += 1;
            }
            self.layout_pending[idx] = false;
        }

        for &constraint in &rejected {
            ctx.tracer.constraint_rejected(&ConstraintRejectedEvent {
                pass_index,
                constraint,
            });
        }
        ctx.tracer.root_solved(&RootSolvedEvent {
            pass_index,
            root: root_id,
            views: problem.views.len(),
            constraints: problem.constraints.len(),
            frames_changed,
            ambiguous: match &validity {
                LayoutValidity::Ambiguous(views) => views.len(),
                _ => 0,
            },
            unsatisfiable: validity == LayoutValidity::Unsatisfiable,
        });
        if !validity.is_valid() {
            tracing::debug!(root = ?root_id, ?validity, "layout is not fully determined");
        }

        self.validity.insert(root, validity.clone());
        changes.roots.push(root_id);
        changes.validity.push((root_id, validity));
        changes.rejected.extend(rejected);
    }

    /// Gathers the subtree of `root` and the constraints in effect among it.
    fn build_problem(&mut self, root: ViewId, ctx: &mut LayoutContext<'_>) -> LayoutProblem {
        let order: Vec<ViewId> = self.descendants(root).collect();
        let local: BTreeMap<ViewId, usize> =
            order.iter().enumerate().map(|(i, v)| (*v, i)).collect();

        let mut views = Vec::with_capacity(order.len());
        for &view in &order {
            let p = self.parent[view.idx as usize];
            let parent = if view == root {
                None
            } else {
                local.get(&self.id_at(p)).copied()
            };
            views.push(ProblemView {
                view,
                parent,
                previous: self.frame_in_root(view),
                intrinsic: self.measure_intrinsic(view, ctx),
            });
        }

        let variables = ctx.variables;
        let mut seen = BTreeSet::new();
        let mut constraints = Vec::new();
        for &view in &order {
            for &id in &self.attached[view.idx as usize] {
                if seen.insert(id) {
                    if let Some(resolved) = self.resolve_constraint(id, &local, &views, variables) {
                        constraints.push(resolved);
                    }
                }
            }
        }

        LayoutProblem {
            root,
            container: self.frame[root.idx as usize].size(),
            views,
            constraints,
        }
    }

    fn measure_intrinsic(
        &mut self,
        view: ViewId,
        ctx: &mut LayoutContext<'_>,
    ) -> Option<IntrinsicInput> {
        let state = &mut self.intrinsic[view.idx as usize];
        if !state.supported {
            return None;
        }
        if state.cached.is_none() {
            if let Some(measure) = ctx.measure.as_deref_mut() {
                state.cached = measure.measure(view);
            }
        }
        state.cached.map(|size| IntrinsicInput {
            size,
            hugging: state.hugging,
            compression: state.compression,
        })
    }

    /// Resolves one constraint for the solver, or `None` if it is not in
    /// effect or reaches outside the laid-out tree.
    fn resolve_constraint(
        &self,
        id: ConstraintId,
        local: &BTreeMap<ViewId, usize>,
        views: &[ProblemView],
        variables: Option<&dyn LayoutVariableProvider>,
    ) -> Option<ResolvedConstraint> {
        let c = self.constraint(id);
        let key = self.active_key.as_ref();
        if !*c.active.resolve_key(key) {
            return None;
        }
        let Some(&first) = local.get(&c.view) else {
            tracing::debug!(constraint = ?id, "constraint reaches outside the laid-out tree");
            return None;
        };
        let second = match c.target {
            Some((target, attribute)) => {
                let Some(&second) = local.get(&target) else {
                    tracing::debug!(constraint = ?id, "constraint reaches outside the laid-out tree");
                    return None;
                };
                Some((second, attribute))
            }
            // Positional constants are offsets from the superview's same edge.
            None if !c.attribute.is_size() => views[first].parent.map(|p| (p, c.attribute)),
            None => None,
        };

        let constant = match c.constant.resolve_key(key) {
            Constant::Value(value) => *value,
            Constant::Variable { name, negated } => {
                let value = variables
                    .and_then(|p| p.value_of(name, self.active_size_class.as_ref()))
                    .unwrap_or_else(|| {
                        tracing::warn!(variable = %name, constraint = ?id, "unknown layout variable, using 0");
                        0.0
                    });
                if *negated { -value } else { value }
            }
        };

        Some(ResolvedConstraint {
            id,
            first,
            first_attribute: c.attribute,
            relation: c.relation,
            second,
            multiplier: c.multiplier,
            constant,
            priority: *c.priority.resolve_key(key),
        })
    }

    fn recompute_properties(&mut self, changes: &mut LayoutChanges) {
        let marked: Vec<u32> = self
            .dirty
            .drain(dirty::PROPERTIES)
            .affected()
            .deterministic()
            .run()
            .collect();
        for idx in marked {
            if idx >= self.len || !self.alive[idx as usize] {
                continue;
            }
            let resolved = self.properties[idx as usize].resolve(self.active_key.as_ref());
            if resolved != self.effective[idx as usize] {
                self.effective[idx as usize] = resolved;
                changes.properties.push(self.id_at(idx));
            }
        }
    }

    fn collect_lifecycle(&mut self, changes: &mut LayoutChanges) {
        let topology = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .affected()
            .deterministic()
            .run()
            .count();
        changes.topology_changed = topology > 0;
        changes.added = core::mem::take(&mut self.pending_added)
            .into_iter()
            .filter(|v| self.is_alive(*v))
            .collect();
        changes.removed = core::mem::take(&mut self.pending_removed);
    }
}
