// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for rendering surfaces.
//!
//! Strut leaves drawing to the host. A backend provides the following pieces:
//!
//! - **Presenter**: Implements the [`Presenter`] trait to apply layout
//!   changes to a platform-native tree (e.g. DOM elements, retained layers).
//!
//! - **Measurement**: Implements [`IntrinsicMeasure`] for views whose natural
//!   size depends on content (text labels, images).
//!
//! - **Viewport**: Implements
//!   [`ViewportSource`](crate::size_class::ViewportSource) to snapshot the
//!   size of the rendering surface.
//!
//! - **Animation**: Implements
//!   [`AnimationDriver`](crate::animation::AnimationDriver) to run animated
//!   transitions and report their completion.

use kurbo::Size;

use crate::layout::LayoutChanges;
use crate::view::{ViewId, ViewStore};

/// Applies layout changes to a platform-native presentation tree.
///
/// # Layout loop pseudocode
///
/// ```rust,ignore
/// fn on_frame() {
///     // Mutate: edit views, constraints, or the active size class.
///     store.set_active_size_class(Some(compact));
///
///     // Layout: drain dirty channels, solve each dirty root.
///     let mut ctx = LayoutContext::new(&mut solver).with_variables(&vars);
///     if let Some(changes) = store.layout_if_needed(&mut ctx) {
///         // Present: apply incremental changes to the native tree.
///         presenter.apply(&store, &changes);
///     }
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`LayoutChanges`] to the backing presentation tree,
    /// reading frames and effective properties from `store` as needed.
    fn apply(&mut self, store: &ViewStore, changes: &LayoutChanges);
}

/// Measures the content-derived natural size of a view.
pub trait IntrinsicMeasure {
    /// Returns the natural size of `view`, or `None` if it has none right
    /// now. Called only for views that declare intrinsic-size support and
    /// have no cached measurement.
    fn measure(&mut self, view: ViewId) -> Option<Size>;
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::layout::{CassowarySolver, LayoutContext};

    #[derive(Default)]
    struct RecordingPresenter {
        frames: Vec<(ViewId, Rect)>,
    }

    impl Presenter for RecordingPresenter {
        fn apply(&mut self, store: &ViewStore, changes: &LayoutChanges) {
            for &view in &changes.frames {
                self.frames.push((view, store.frame_in_root(view)));
            }
        }
    }

    struct FixedMeasure(Size);

    impl IntrinsicMeasure for FixedMeasure {
        fn measure(&mut self, _view: ViewId) -> Option<Size> {
            Some(self.0)
        }
    }

    #[test]
    fn presenter_sees_measured_frames() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let label = store.create_view();
        store.add_subview(root, label);
        store.set_supports_intrinsic_size(label, true);
        store.set_frame(root, Rect::new(0.0, 0.0, 200.0, 100.0));

        let mut solver = CassowarySolver::new();
        let mut measure = FixedMeasure(Size::new(64.0, 16.0));
        let mut ctx = LayoutContext::new(&mut solver).with_measure(&mut measure);
        let changes = store.layout_if_needed(&mut ctx).unwrap();

        let mut presenter = RecordingPresenter::default();
        presenter.apply(&store, &changes);
        let (_, frame) = presenter
            .frames
            .iter()
            .find(|(v, _)| *v == label)
            .copied()
            .unwrap();
        assert_eq!(frame.size(), Size::new(64.0, 16.0));
        assert_eq!(store.intrinsic_size(label), Some(Size::new(64.0, 16.0)));
    }
}
