// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size-class preview and layout hooks.

use kurbo::Rect;
use strut_core::animation::{
    AnimatedValue, AnimationDriver, AnimationRequest, AnimationTarget, AnimationTicket,
};
use strut_core::layout::{LayoutChanges, LayoutContext};
use strut_core::size_class::{SizeClass, ViewportState};
use strut_core::view::ViewStore;

use super::{Continuation, LayoutEditor};
use crate::selection::Selection;

impl LayoutEditor {
    /// Previews `size_class`, or the live viewport for `None`.
    ///
    /// The viewport is overridden with the class's preview size, the class
    /// becomes active in `store`, and the workspace is resized to match.
    /// Outside a layout batch the resize is animated and the overlay redrawn
    /// when it finishes; inside one the change coalesces into the batch's
    /// pass and `None` is returned.
    pub fn set_active_size_class(
        &mut self,
        store: &mut ViewStore,
        viewport: &mut ViewportState,
        size_class: Option<SizeClass>,
        animations: &mut dyn AnimationDriver,
    ) -> Option<AnimationTicket> {
        let required = size_class
            .as_ref()
            .map(|class| class.preview_viewport(viewport.live()));
        viewport.set_required_viewport(required);
        tracing::debug!(
            size_class = %size_class.as_ref().map_or_else(|| String::from("live"), SizeClass::display_name),
            "previewing size class"
        );
        store.set_active_size_class(size_class);

        self.workspace = viewport.current().size();
        let origin = store.frame(self.root).origin();
        store.set_frame(self.root, Rect::from_origin_size(origin, self.workspace));
        self.constant_invalid = false;

        if store.is_layout_batch_open() {
            return None;
        }
        let request = AnimationRequest::new(
            AnimationTarget::Element(String::from("workspace")),
            self.config.transition,
            self.config.transition_easing,
        )
        .with("width", AnimatedValue::Number(self.workspace.width))
        .with("height", AnimatedValue::Number(self.workspace.height));
        Some(self.animate(animations, request, Continuation::RedrawOverlay))
    }

    /// Opens a layout batch so several edits settle in one pass.
    pub fn await_layout(&mut self, store: &mut ViewStore) {
        store.begin_layout_batch();
    }

    /// Closes the batch opened by [`await_layout`](Self::await_layout) and
    /// applies its pass, if it was the outermost one.
    pub fn finish_await_layout(
        &mut self,
        store: &mut ViewStore,
        ctx: &mut LayoutContext<'_>,
    ) -> Option<LayoutChanges> {
        let changes = store.end_layout_batch(ctx)?;
        self.did_layout(store, &changes);
        Some(changes)
    }

    /// Lays out the workspace.
    pub fn layout(&mut self, store: &mut ViewStore, ctx: &mut LayoutContext<'_>) -> LayoutChanges {
        let changes = store.layout(self.root, self.workspace, ctx);
        self.did_layout(store, &changes);
        changes
    }

    /// Reacts to a finished layout pass.
    ///
    /// Records whether the root's layout is valid, drops destroyed views
    /// and constraints from the selection, and redraws the overlay.
    pub fn did_layout(&mut self, store: &ViewStore, changes: &LayoutChanges) {
        if let Some(validity) = changes.validity_of(self.root) {
            let invalid = !validity.is_valid();
            if invalid != self.invalid_layout {
                tracing::debug!(?validity, "workspace layout validity changed");
            }
            self.invalid_layout = invalid;
        }
        let pruned = match &self.selection {
            Selection::ConstraintSelected {
                constraint,
                reference,
            } if !store.is_ref_alive(*constraint) => {
                if store.is_alive(*reference) {
                    Selection::ViewSelected(*reference)
                } else {
                    Selection::NoSelection
                }
            }
            selection => selection.retain_views(|v| store.is_alive(v)),
        };
        self.select(store, pruned);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};
    use strut_core::animation::ImmediateAnimations;
    use strut_core::layout::{CassowarySolver, LayoutContext};
    use strut_core::size_class::{SizeClass, Viewport, ViewportState};
    use strut_core::view::ViewStore;

    use crate::config::EditorConfig;
    use crate::editor::LayoutEditor;
    use crate::selection::Selection;

    fn workspace() -> (ViewStore, LayoutEditor, ViewportState) {
        let mut store = ViewStore::new();
        let root = store.create_view();
        store.set_frame(root, Rect::new(0.0, 0.0, 1024.0, 768.0));
        let editor = LayoutEditor::open(&mut store, root, EditorConfig::default());
        (store, editor, ViewportState::new(Viewport::new(1024.0, 768.0)))
    }

    #[test]
    fn previewing_resizes_and_animates() {
        let (mut store, mut editor, mut viewport) = workspace();
        let mut animations = ImmediateAnimations::new();
        let phone = SizeClass::all().with_max_width(400.0);

        let ticket = editor.set_active_size_class(
            &mut store,
            &mut viewport,
            Some(phone.clone()),
            &mut animations,
        );
        assert!(ticket.is_some());
        assert_eq!(editor.workspace_size().width, 400.0);
        assert_eq!(store.active_size_class(), Some(&phone));
        assert_eq!(viewport.current().width, 400.0);

        let redraws = editor.overlay().redraws();
        assert_eq!(editor.poll_animations(&store, &mut animations), 1);
        assert_eq!(editor.overlay().redraws(), redraws + 1);

        editor.set_active_size_class(&mut store, &mut viewport, None, &mut animations);
        assert_eq!(editor.workspace_size(), Size::new(1024.0, 768.0));
        assert_eq!(viewport.required_viewport(), None);
    }

    #[test]
    fn batched_preview_coalesces_into_one_pass() {
        let (mut store, mut editor, mut viewport) = workspace();
        let mut animations = ImmediateAnimations::new();
        let child = store.create_view();
        store.add_subview(editor.root(), child);

        editor.await_layout(&mut store);
        let compact = SizeClass::all().with_max_width(600.0);
        assert!(editor
            .set_active_size_class(&mut store, &mut viewport, Some(compact), &mut animations)
            .is_none());
        assert!(!editor.has_pending_animations());

        let mut solver = CassowarySolver::new();
        let mut ctx = LayoutContext::new(&mut solver);
        let changes = editor
            .finish_await_layout(&mut store, &mut ctx)
            .expect("outermost batch runs a pass");
        assert_eq!(changes.roots, vec![editor.root()]);
        assert_eq!(store.frame(editor.root()).width(), 600.0);
    }

    #[test]
    fn layout_prunes_destroyed_views_from_selection() {
        let (mut store, mut editor, _) = workspace();
        let a = store.create_view();
        let b = store.create_view();
        store.add_subview(editor.root(), a);
        store.add_subview(editor.root(), b);
        editor.select(&store, Selection::MultipleViewsSelected(vec![a, b]));

        store.destroy_view(b);
        let mut solver = CassowarySolver::new();
        let mut ctx = LayoutContext::new(&mut solver);
        editor.layout(&mut store, &mut ctx);
        assert_eq!(editor.selection(), &Selection::ViewSelected(a));
        // `a` has no constraints pinning it.
        assert!(editor.invalid_layout());
    }
}
