// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor's selection state machine.

use strut_core::constraint::ConstraintRef;
use strut_core::view::ViewId;

/// What the editor has selected. Exactly one state holds at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    NoSelection,
    /// A single view.
    ViewSelected(ViewId),
    /// Two or more views, in selection order.
    MultipleViewsSelected(Vec<ViewId>),
    /// A constraint, inspected from one of the views it involves.
    ConstraintSelected {
        /// The atomic constraint or collection.
        constraint: ConstraintRef,
        /// The view whose constraint list the selection was made from.
        reference: ViewId,
    },
}

impl Selection {
    /// The selected views, empty unless views are selected.
    #[must_use]
    pub fn views(&self) -> &[ViewId] {
        match self {
            Self::ViewSelected(view) => core::slice::from_ref(view),
            Self::MultipleViewsSelected(views) => views,
            Self::NoSelection | Self::ConstraintSelected { .. } => &[],
        }
    }

    /// The selected constraint, if any.
    #[must_use]
    pub fn constraint(&self) -> Option<ConstraintRef> {
        match self {
            Self::ConstraintSelected { constraint, .. } => Some(*constraint),
            _ => None,
        }
    }

    /// The view whose constraints are drawn: the selected view, or the
    /// reference view of a selected constraint.
    #[must_use]
    pub fn reference_view(&self) -> Option<ViewId> {
        match self {
            Self::ViewSelected(view) | Self::ConstraintSelected { reference: view, .. } => {
                Some(*view)
            }
            Self::NoSelection | Self::MultipleViewsSelected(_) => None,
        }
    }

    /// Returns `true` for [`NoSelection`](Self::NoSelection).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoSelection)
    }

    /// The state after a click on `view`.
    ///
    /// A plain click selects just `view`. A toggling click adds `view` to the
    /// selected views or removes it, collapsing to a single view or to no
    /// selection as members drop out.
    #[must_use]
    pub fn clicked(&self, view: ViewId, toggle: bool) -> Self {
        if !toggle {
            return Self::ViewSelected(view);
        }
        let mut views = self.views().to_vec();
        if let Some(pos) = views.iter().position(|v| *v == view) {
            views.remove(pos);
        } else {
            views.push(view);
        }
        Self::from_views(views)
    }

    /// The state selecting exactly `views`.
    #[must_use]
    pub fn from_views(mut views: Vec<ViewId>) -> Self {
        match views.len() {
            0 => Self::NoSelection,
            1 => Self::ViewSelected(views.remove(0)),
            _ => Self::MultipleViewsSelected(views),
        }
    }

    /// The state left after the views rejected by `alive` are gone.
    #[must_use]
    pub fn retain_views(&self, mut alive: impl FnMut(ViewId) -> bool) -> Self {
        match self {
            Self::ConstraintSelected { reference, .. } if !alive(*reference) => Self::NoSelection,
            Self::ViewSelected(_) | Self::MultipleViewsSelected(_) => {
                Self::from_views(self.views().iter().copied().filter(|v| alive(*v)).collect())
            }
            other => other.clone(),
        }
    }
}
