// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays view storage with allocation, topology, and frame management.

use std::collections::{BTreeMap, BTreeSet};

use kurbo::{Point, Rect, Size, Vec2};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, ViewId};
use super::property::{EffectiveProperties, ViewProperties};
use super::traverse::{Descendants, Subviews};
use crate::constraint::{Axis, Collection, Constraint, ConstraintId, Priority};
use crate::constraint::store::Slab;
use crate::dirty;
use crate::layout::LayoutValidity;
use crate::size_class::{SizeClass, SizeClassKey};

/// Intrinsic-size support and the cached measurement of one view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct IntrinsicState {
    pub(crate) supported: bool,
    pub(crate) cached: Option<Size>,
    /// Content hugging, `[horizontal, vertical]`.
    pub(crate) hugging: [Priority; 2],
    /// Compression resistance, `[horizontal, vertical]`.
    pub(crate) compression: [Priority; 2],
}

impl Default for IntrinsicState {
    fn default() -> Self {
        Self {
            supported: false,
            cached: None,
            hugging: [Priority::DEFAULT_LOW; 2],
            compression: [Priority::DEFAULT_HIGH; 2],
        }
    }
}

/// Where a view sat in its superview before
/// [`take_from_superview`](ViewStore::take_from_superview).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// The former superview.
    pub superview: ViewId,
    /// The sibling the view preceded, or `None` if it was last.
    pub before: Option<ViewId>,
}

/// Struct-of-arrays storage for all views and their constraints.
///
/// Views are addressed by [`ViewId`] handles. Internally, each view occupies a
/// slot in parallel arrays. Destroyed views are recycled via a free list, and
/// generation counters prevent stale handle access. Constraints and
/// constraint collections live in generational arenas owned by the store.
#[derive(Debug)]
pub struct ViewStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local state (set by callers) --
    pub(crate) names: Vec<Option<String>>,
    pub(crate) intrinsic: Vec<IntrinsicState>,
    pub(crate) properties: Vec<ViewProperties>,
    /// Constraints naming the view on either side, registered or not.
    pub(crate) attached: Vec<Vec<ConstraintId>>,

    // -- Computed state (written by layout) --
    /// Frame relative to the superview.
    pub(crate) frame: Vec<Rect>,
    /// Presentation-only displacement, cleared by the next layout.
    pub(crate) offset: Vec<Vec2>,
    pub(crate) effective: Vec<EffectiveProperties>,
    pub(crate) layout_pending: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Constraints --
    pub(crate) constraints: Slab<Constraint>,
    pub(crate) collections: Slab<Collection>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Layout state --
    pub(crate) active_size_class: Option<SizeClass>,
    pub(crate) active_key: Option<SizeClassKey>,
    pub(crate) batch_depth: u32,
    pub(crate) pass_index: u64,
    pub(crate) validity: BTreeMap<u32, LayoutValidity>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<ViewId>,
    pub(crate) pending_removed: Vec<ViewId>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    /// Creates an empty view store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            names: Vec::new(),
            intrinsic: Vec::new(),
            properties: Vec::new(),
            attached: Vec::new(),
            frame: Vec::new(),
            offset: Vec::new(),
            effective: Vec::new(),
            layout_pending: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            constraints: Slab::default(),
            collections: Slab::default(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            active_size_class: None,
            active_key: None,
            batch_depth: 0,
            pass_index: 0,
            validity: BTreeMap::new(),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new detached view and returns its handle.
    ///
    /// The view starts with an empty frame, full opacity, no constraints and
    /// no superview.
    pub fn create_view(&mut self) -> ViewId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.names[i] = None;
            self.intrinsic[i] = IntrinsicState::default();
            self.properties[i] = ViewProperties::default();
            self.attached[i].clear();
            self.frame[i] = Rect::ZERO;
            self.offset[i] = Vec2::ZERO;
            self.effective[i] = EffectiveProperties::default();
            self.layout_pending[i] = false;
            self.alive[i] = true;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.names.push(None);
            self.intrinsic.push(IntrinsicState::default());
            self.properties.push(ViewProperties::default());
            self.attached.push(Vec::new());
            self.frame.push(Rect::ZERO);
            self.offset.push(Vec2::ZERO);
            self.effective.push(EffectiveProperties::default());
            self.layout_pending.push(false);
            self.generation.push(0);
            self.alive.push(true);
            idx
        };

        let id = self.id_at(idx);
        self.pending_added.push(id);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.mark_layout(idx);
        id
    }

    /// Destroys a view and its whole subtree.
    ///
    /// Every constraint touching a destroyed view is removed, and the view is
    /// unlinked from its superview.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_view(&mut self, id: ViewId) {
        self.validate(id);
        let mut doomed: Vec<ViewId> = self.descendants(id).collect();
        doomed.reverse();

        if self.parent[id.idx as usize] != INVALID {
            self.detach_links(id.idx);
        }

        for view in doomed {
            let idx = view.idx;
            for constraint in core::mem::take(&mut self.attached[idx as usize]) {
                if self.is_constraint_alive(constraint) {
                    self.remove_constraint(constraint);
                }
            }
            let p = self.parent[idx as usize];
            if p != INVALID {
                self.unlink_from_parent(idx);
            }

            // Remove dirty tracking dependencies.
            self.dirty.remove_key(idx);

            // Bump generation so old handles immediately fail validation.
            self.generation[idx as usize] += 1;
            self.alive[idx as usize] = false;
            self.free_list.push(idx);
            self.validity.remove(&idx);
            self.pending_removed.push(view);
            tracing::debug!(?view, "destroyed view");
        }
    }

    /// Returns whether the given handle refers to a live view.
    #[must_use]
    pub fn is_alive(&self, id: ViewId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && self.alive[id.idx as usize]
    }

    /// Returns the number of live views.
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Sets a display name used in constraint descriptions.
    pub fn set_name(&mut self, id: ViewId, name: impl Into<String>) {
        self.validate(id);
        self.names[id.idx as usize] = Some(name.into());
    }

    /// Returns the display name, if one was set.
    #[must_use]
    pub fn name(&self, id: ViewId) -> Option<&str> {
        self.validate(id);
        self.names[id.idx as usize].as_deref()
    }

    /// Returns the display name, falling back to `view<N>`.
    #[must_use]
    pub fn label(&self, id: ViewId) -> String {
        self.name(id)
            .map_or_else(|| format!("view{}", id.idx), String::from)
    }

    // -- Topology API --

    /// Adds `child` as the last subview of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a superview,
    /// or if `parent` lies inside `child`'s subtree.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a superview"
        );
        assert!(
            !self.is_descendant_of(parent, child),
            "cannot add a view to its own subtree"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        self.link_dirty(c, p);
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a superview, or
    /// `sibling` has no superview.
    pub fn insert_subview_before(&mut self, child: ViewId, sibling: ViewId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a superview"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no superview");
        assert!(
            !self.is_descendant_of(self.id_at(p), child),
            "cannot add a view to its own subtree"
        );

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        self.link_dirty(c, p);
    }

    /// Removes `child` from its superview.
    ///
    /// Every constraint connecting the detached subtree to a view outside it
    /// is removed, so no constraint is left referring across trees.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the view has no superview.
    pub fn remove_from_superview(&mut self, child: ViewId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "view has no superview"
        );

        let subtree: BTreeSet<ViewId> = self.descendants(child).collect();
        let mut crossing = BTreeSet::new();
        for view in &subtree {
            for &constraint in &self.attached[view.idx as usize] {
                let c = self.constraint(constraint);
                if c.other_view(*view).is_some_and(|other| !subtree.contains(&other)) {
                    crossing.insert(constraint);
                }
            }
        }
        for constraint in crossing {
            self.remove_constraint(constraint);
        }

        self.detach_links(child.idx);
    }

    /// Detaches `child` from its superview, keeping every constraint.
    ///
    /// Constraints reaching outside the detached subtree are ignored by layout
    /// until the view is put back with
    /// [`restore_to_superview`](Self::restore_to_superview). Returns `None` if
    /// the view had no superview.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn take_from_superview(&mut self, child: ViewId) -> Option<Placement> {
        self.validate(child);
        let c = child.idx as usize;
        if self.parent[c] == INVALID {
            return None;
        }
        let placement = Placement {
            superview: self.id_at(self.parent[c]),
            before: (self.next_sibling[c] != INVALID).then(|| self.id_at(self.next_sibling[c])),
        };
        self.detach_links(child.idx);
        Some(placement)
    }

    /// Reinserts a view at a position recorded by
    /// [`take_from_superview`](Self::take_from_superview).
    ///
    /// Falls back to appending when the recorded sibling is gone or has moved.
    ///
    /// # Panics
    ///
    /// Panics if `child` or the recorded superview is stale, or if `child`
    /// already has a superview.
    pub fn restore_to_superview(&mut self, child: ViewId, placement: Placement) {
        match placement.before {
            Some(sibling)
                if self.is_alive(sibling) && self.superview(sibling) == Some(placement.superview) =>
            {
                self.insert_subview_before(child, sibling);
            }
            _ => self.add_subview(placement.superview, child),
        }
    }

    /// Returns the superview of a view, if any.
    #[must_use]
    pub fn superview(&self, id: ViewId) -> Option<ViewId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_at(p))
    }

    /// Returns an iterator over the direct subviews of a view.
    #[must_use]
    pub fn subviews(&self, id: ViewId) -> Subviews<'_> {
        self.validate(id);
        Subviews::new(self, self.first_child[id.idx as usize])
    }

    /// Returns a pre-order iterator over `id` and all its descendants.
    #[must_use]
    pub fn descendants(&self, id: ViewId) -> Descendants<'_> {
        self.validate(id);
        Descendants::new(self, id.idx)
    }

    /// Returns the root of the tree containing `id`.
    #[must_use]
    pub fn root_of(&self, id: ViewId) -> ViewId {
        self.validate(id);
        self.id_at(self.root_idx(id.idx))
    }

    /// Returns every live view without a superview.
    #[must_use]
    pub fn roots(&self) -> Vec<ViewId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && self.alive[idx as usize])
            .map(|idx| self.id_at(idx))
            .collect()
    }

    /// Returns whether `id` is `ancestor` or lies beneath it.
    #[must_use]
    pub fn is_descendant_of(&self, id: ViewId, ancestor: ViewId) -> bool {
        self.validate(id);
        self.validate(ancestor);
        let mut cur = id.idx;
        while cur != INVALID {
            if cur == ancestor.idx {
                return true;
            }
            cur = self.parent[cur as usize];
        }
        false
    }

    /// Returns the nearest view that both `a` and `b` descend from
    /// (inclusive), or `None` if they are in different trees.
    #[must_use]
    pub fn common_ancestor(&self, a: ViewId, b: ViewId) -> Option<ViewId> {
        self.validate(a);
        self.validate(b);
        let mut chain = BTreeSet::new();
        let mut cur = a.idx;
        while cur != INVALID {
            chain.insert(cur);
            cur = self.parent[cur as usize];
        }
        let mut cur = b.idx;
        while cur != INVALID {
            if chain.contains(&cur) {
                return Some(self.id_at(cur));
            }
            cur = self.parent[cur as usize];
        }
        None
    }

    // -- Frames --

    /// Returns the frame of a view relative to its superview.
    ///
    /// Only meaningful after a layout pass, or after
    /// [`set_frame`](Self::set_frame).
    #[must_use]
    pub fn frame(&self, id: ViewId) -> Rect {
        self.validate(id);
        self.frame[id.idx as usize]
    }

    /// Seeds a frame relative to the superview.
    ///
    /// Under-determined views keep their previous frame across layout passes,
    /// so this positions views that constraints do not pin. For a root, the
    /// size is the container size.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        self.validate(id);
        self.frame[id.idx as usize] = frame;
        self.mark_layout(id.idx);
    }

    /// Returns the frame in the coordinate space of the view's root.
    #[must_use]
    pub fn frame_in_root(&self, id: ViewId) -> Rect {
        self.validate(id);
        let idx = id.idx as usize;
        let size = self.frame[idx].size();
        Rect::from_origin_size(self.origin_in_root(id.idx, false), size)
    }

    /// Like [`frame_in_root`](Self::frame_in_root), including presentation
    /// offsets from [`set_frame_offset`](Self::set_frame_offset).
    #[must_use]
    pub fn presented_frame_in_root(&self, id: ViewId) -> Rect {
        self.validate(id);
        let idx = id.idx as usize;
        let size = self.frame[idx].size();
        Rect::from_origin_size(self.origin_in_root(id.idx, true), size)
    }

    /// Displaces the rendered frame without involving the solver.
    ///
    /// The offset is presentation-only and is cleared by the next layout pass
    /// of the view's tree.
    pub fn set_frame_offset(&mut self, id: ViewId, offset: Vec2) {
        self.validate(id);
        self.offset[id.idx as usize] = offset;
    }

    /// Returns the current presentation offset.
    #[must_use]
    pub fn frame_offset(&self, id: ViewId) -> Vec2 {
        self.validate(id);
        self.offset[id.idx as usize]
    }

    // -- Intrinsic size --

    /// Declares whether the view has a content-derived natural size.
    pub fn set_supports_intrinsic_size(&mut self, id: ViewId, supported: bool) {
        self.validate(id);
        let state = &mut self.intrinsic[id.idx as usize];
        state.supported = supported;
        state.cached = None;
        self.mark_layout(id.idx);
    }

    /// Returns whether the view has a content-derived natural size.
    #[must_use]
    pub fn supports_intrinsic_size(&self, id: ViewId) -> bool {
        self.validate(id);
        self.intrinsic[id.idx as usize].supported
    }

    /// Clears the cached intrinsic measurement so the next layout pass
    /// measures again.
    pub fn invalidate_intrinsic_size(&mut self, id: ViewId) {
        self.validate(id);
        self.intrinsic[id.idx as usize].cached = None;
        self.mark_layout(id.idx);
    }

    /// Returns the cached intrinsic size, if measured.
    #[must_use]
    pub fn intrinsic_size(&self, id: ViewId) -> Option<Size> {
        self.validate(id);
        let state = &self.intrinsic[id.idx as usize];
        state.supported.then_some(state.cached).flatten()
    }

    /// Sets the priority with which the view resists growing past its
    /// intrinsic size on `axis`.
    pub fn set_content_hugging_priority(&mut self, id: ViewId, axis: Axis, priority: Priority) {
        self.validate(id);
        self.intrinsic[id.idx as usize].hugging[axis_slot(axis)] = priority;
        self.mark_layout(id.idx);
    }

    /// Sets the priority with which the view resists shrinking below its
    /// intrinsic size on `axis`.
    pub fn set_compression_resistance_priority(
        &mut self,
        id: ViewId,
        axis: Axis,
        priority: Priority,
    ) {
        self.validate(id);
        self.intrinsic[id.idx as usize].compression[axis_slot(axis)] = priority;
        self.mark_layout(id.idx);
    }

    // -- Size class --

    /// Selects the size class whose variations apply, or `None` for base
    /// values only.
    ///
    /// Marks every root as needing layout and every view with property
    /// variations for property recomputation.
    pub fn set_active_size_class(&mut self, size_class: Option<SizeClass>) {
        let key = size_class.as_ref().map(SizeClass::key);
        if key == self.active_key {
            return;
        }
        tracing::debug!(size_class = ?key, "active size class changed");
        self.active_key = key;
        self.active_size_class = size_class;
        for idx in 0..self.len {
            if !self.alive[idx as usize] {
                continue;
            }
            if self.properties[idx as usize].is_varied() {
                self.dirty.mark(idx, dirty::PROPERTIES);
            }
            if self.parent[idx as usize] == INVALID {
                self.mark_layout(idx);
            }
        }
    }

    /// Returns the size class whose variations currently apply.
    #[must_use]
    pub fn active_size_class(&self) -> Option<&SizeClass> {
        self.active_size_class.as_ref()
    }

    // -- Dirty state --

    /// Marks the view, and transitively its ancestors, as needing layout.
    pub fn set_needs_layout(&mut self, id: ViewId) {
        self.validate(id);
        self.mark_layout(id.idx);
    }

    /// Returns whether a layout pass is pending for the view.
    pub fn needs_layout(&mut self, id: ViewId) -> bool {
        self.validate(id);
        self.sync_layout_dirty();
        self.layout_pending[id.idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ViewId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ViewId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds the current handle for a live slot.
    pub(crate) fn id_at(&self, idx: u32) -> ViewId {
        ViewId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    pub(crate) fn root_idx(&self, mut idx: u32) -> u32 {
        while self.parent[idx as usize] != INVALID {
            idx = self.parent[idx as usize];
        }
        idx
    }

    /// Marks LAYOUT for `idx`, propagating to every ancestor.
    pub(crate) fn mark_layout(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::LAYOUT, &EagerPolicy);
    }

    /// Moves pending LAYOUT marks from the tracker into `layout_pending`.
    pub(crate) fn sync_layout_dirty(&mut self) {
        let marked: Vec<u32> = self
            .dirty
            .drain(dirty::LAYOUT)
            .affected()
            .deterministic()
            .run()
            .collect();
        for idx in marked {
            if (idx as usize) < self.alive.len() && self.alive[idx as usize] {
                self.layout_pending[idx as usize] = true;
            }
        }
    }

    fn origin_in_root(&self, idx: u32, presented: bool) -> Point {
        let mut origin = Point::ZERO;
        let mut cur = idx;
        while self.parent[cur as usize] != INVALID {
            origin += self.frame[cur as usize].origin().to_vec2();
            if presented {
                origin += self.offset[cur as usize];
            }
            cur = self.parent[cur as usize];
        }
        if presented {
            origin += self.offset[cur as usize];
        }
        origin
    }

    /// Adds dependency edges and dirty marks for a new parent link.
    fn link_dirty(&mut self, c: u32, p: u32) {
        // The superview depends on its subviews for LAYOUT.
        let _ = self.dirty.add_dependency(p, c, dirty::LAYOUT);
        self.mark_layout(c);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Unlinks `idx` from its superview and updates dirty state.
    fn detach_links(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        self.unlink_from_parent(idx);
        self.dirty.remove_dependency(p, idx, dirty::LAYOUT);
        self.mark_layout(p);
        self.mark_layout(idx);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

pub(crate) const fn axis_slot(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = ViewStore::new();
        let id = store.create_view();
        assert!(store.is_alive(id));
        store.destroy_view(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.view_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ViewStore::new();
        let id1 = store.create_view();
        store.destroy_view(id1);
        let id2 = store.create_view();
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn freed_slots_leave_roots_until_reused() {
        let mut store = ViewStore::new();
        let a = store.create_view();
        let b = store.create_view();
        let c = store.create_view();
        store.destroy_view(b);
        assert_eq!(store.roots(), vec![a, c]);
        assert_eq!(store.view_count(), 2);

        let d = store.create_view();
        assert_eq!(d.idx, b.idx);
        assert!(store.is_alive(d));
        assert!(!store.is_alive(b));
        assert_eq!(store.roots(), vec![a, d, c]);
    }

    #[test]
    fn add_subview_and_query() {
        let mut store = ViewStore::new();
        let parent = store.create_view();
        let a = store.create_view();
        let b = store.create_view();

        store.add_subview(parent, a);
        store.add_subview(parent, b);

        assert_eq!(store.superview(a), Some(parent));
        let kids: Vec<_> = store.subviews(parent).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(store.root_of(b), parent);
    }

    #[test]
    fn insert_before_and_descendants_order() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let a = store.create_view();
        let b = store.create_view();
        let c = store.create_view();
        let a1 = store.create_view();

        store.add_subview(root, a);
        store.add_subview(root, c);
        store.insert_subview_before(b, c);
        store.add_subview(a, a1);

        let kids: Vec<_> = store.subviews(root).collect();
        assert_eq!(kids, vec![a, b, c]);
        let all: Vec<_> = store.descendants(root).collect();
        assert_eq!(all, vec![root, a, a1, b, c]);
        let sub: Vec<_> = store.descendants(a).collect();
        assert_eq!(sub, vec![a, a1]);
    }

    #[test]
    fn ancestry_queries() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let a = store.create_view();
        let b = store.create_view();
        let a1 = store.create_view();
        let other = store.create_view();
        store.add_subview(root, a);
        store.add_subview(root, b);
        store.add_subview(a, a1);

        assert!(store.is_descendant_of(a1, root));
        assert!(!store.is_descendant_of(root, a1));
        assert_eq!(store.common_ancestor(a1, b), Some(root));
        assert_eq!(store.common_ancestor(a1, a), Some(a));
        assert_eq!(store.common_ancestor(a1, other), None);

        let roots = store.roots();
        assert!(roots.contains(&root));
        assert!(roots.contains(&other));
        assert!(!roots.contains(&a));
    }

    #[test]
    fn destroy_cascades_to_subtree() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let a = store.create_view();
        let a1 = store.create_view();
        store.add_subview(root, a);
        store.add_subview(a, a1);

        store.destroy_view(a);
        assert!(!store.is_alive(a));
        assert!(!store.is_alive(a1));
        assert!(store.subviews(root).next().is_none());
    }

    #[test]
    fn take_and_restore_keeps_position() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let a = store.create_view();
        let b = store.create_view();
        let c = store.create_view();
        store.add_subview(root, a);
        store.add_subview(root, b);
        store.add_subview(root, c);

        let placement = store.take_from_superview(b).unwrap();
        assert_eq!(placement.superview, root);
        assert_eq!(placement.before, Some(c));
        assert_eq!(store.superview(b), None);

        store.restore_to_superview(b, placement);
        let kids: Vec<_> = store.subviews(root).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn frame_in_root_accumulates_origins() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let a = store.create_view();
        let a1 = store.create_view();
        store.add_subview(root, a);
        store.add_subview(a, a1);
        store.set_frame(root, Rect::new(500.0, 500.0, 900.0, 900.0));
        store.set_frame(a, Rect::new(10.0, 20.0, 110.0, 120.0));
        store.set_frame(a1, Rect::new(5.0, 5.0, 15.0, 15.0));

        assert_eq!(store.frame_in_root(a1), Rect::new(15.0, 25.0, 25.0, 35.0));
        assert_eq!(store.frame_in_root(root), Rect::new(0.0, 0.0, 400.0, 400.0));

        store.set_frame_offset(a, Vec2::new(3.0, 0.0));
        assert_eq!(
            store.presented_frame_in_root(a1),
            Rect::new(18.0, 25.0, 28.0, 35.0)
        );
    }

    #[test]
    fn needs_layout_propagates_to_ancestors() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let a = store.create_view();
        let a1 = store.create_view();
        store.add_subview(root, a);
        store.add_subview(a, a1);
        store.sync_layout_dirty();
        for idx in 0..store.len {
            store.layout_pending[idx as usize] = false;
        }

        store.set_needs_layout(a1);
        assert!(store.needs_layout(a1));
        assert!(store.needs_layout(a));
        assert!(store.needs_layout(root));
    }

    #[test]
    #[should_panic(expected = "child already has a superview")]
    fn double_add_panics() {
        let mut store = ViewStore::new();
        let p1 = store.create_view();
        let p2 = store.create_view();
        let child = store.create_view();
        store.add_subview(p1, child);
        store.add_subview(p2, child);
    }

    #[test]
    #[should_panic(expected = "cannot add a view to its own subtree")]
    fn cycle_panics() {
        let mut store = ViewStore::new();
        let a = store.create_view();
        let b = store.create_view();
        store.add_subview(a, b);
        store.add_subview(b, a);
    }

    #[test]
    #[should_panic(expected = "stale ViewId")]
    fn destroyed_handle_panics_on_frame() {
        let mut store = ViewStore::new();
        let id = store.create_view();
        store.destroy_view(id);
        let _ = store.frame(id);
    }

    #[test]
    #[should_panic(expected = "stale ViewId")]
    fn destroyed_handle_panics_on_add_subview() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let id = store.create_view();
        store.destroy_view(id);
        store.add_subview(root, id);
    }
}
