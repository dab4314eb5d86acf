// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraints offered after a constraint-creation drag or for a
//! multi-view selection.
//!
//! Constants are taken from the current presented geometry, so a new
//! constraint keeps views where they are, except for sibling alignment,
//! which aligns exactly.

use strut_core::constraint::{Attribute, Axis, CollectionId, ConstraintSpec};
use strut_core::error::ConstraintError;
use strut_core::view::{ViewId, ViewStore};

use crate::menu::Menu;

/// A single constraint between two views, or on one view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintOption {
    /// Fixes the source's width to its current value.
    FixedWidth,
    /// Fixes the source's height to its current value.
    FixedHeight,
    /// Aligns one edge or center of the source with the target.
    Align(Attribute),
    /// Keeps the current gap between the two views along an axis.
    Spacing(Axis),
    /// Makes the widths equal.
    EqualWidth,
    /// Makes the heights equal.
    EqualHeight,
}

const ALIGNMENTS: [Attribute; 6] = [
    Attribute::Leading,
    Attribute::CenterX,
    Attribute::Trailing,
    Attribute::Top,
    Attribute::CenterY,
    Attribute::Bottom,
];

impl ConstraintOption {
    /// The options applicable from `source` to `target`.
    ///
    /// A view paired with itself only gets fixed sizes. Spacing is offered
    /// only between views where neither contains the other.
    #[must_use]
    pub fn applicable(store: &ViewStore, source: ViewId, target: ViewId) -> Vec<Self> {
        if source == target {
            return vec![Self::FixedWidth, Self::FixedHeight];
        }
        let mut options: Vec<Self> = ALIGNMENTS.iter().map(|a| Self::Align(*a)).collect();
        if !nested(store, source, target) {
            options.push(Self::Spacing(Axis::Horizontal));
            options.push(Self::Spacing(Axis::Vertical));
        }
        options.push(Self::EqualWidth);
        options.push(Self::EqualHeight);
        options
    }

    /// Menu title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FixedWidth => "Width",
            Self::FixedHeight => "Height",
            Self::Align(Attribute::Left | Attribute::Leading) => "Leading Edges",
            Self::Align(Attribute::Right | Attribute::Trailing) => "Trailing Edges",
            Self::Align(Attribute::CenterX) => "Horizontal Centers",
            Self::Align(Attribute::Top) => "Top Edges",
            Self::Align(Attribute::Bottom) => "Bottom Edges",
            Self::Align(Attribute::CenterY) => "Vertical Centers",
            Self::Align(Attribute::Width) | Self::EqualWidth => "Equal Widths",
            Self::Align(Attribute::Height) | Self::EqualHeight => "Equal Heights",
            Self::Spacing(Axis::Horizontal) => "Horizontal Spacing",
            Self::Spacing(Axis::Vertical) => "Vertical Spacing",
        }
    }

    /// Builds the constraint this option stands for.
    #[must_use]
    pub fn spec(self, store: &ViewStore, source: ViewId, target: ViewId) -> ConstraintSpec {
        let s = store.presented_frame_in_root(source);
        let t = store.presented_frame_in_root(target);
        match self {
            Self::FixedWidth => source.width().equal_to_constant(s.width()),
            Self::FixedHeight => source.height().equal_to_constant(s.height()),
            Self::Align(attribute) => {
                let inset = if nested(store, source, target) {
                    attribute.value_in(s) - attribute.value_in(t)
                } else {
                    0.0
                };
                source
                    .anchor(attribute)
                    .equal_to(target.anchor(attribute))
                    .plus(inset)
            }
            Self::Spacing(axis) => {
                let (leading, trailing) = (axis.leading(), axis.trailing());
                let (first, second, f, n) = if leading.value_in(s) <= leading.value_in(t) {
                    (source, target, s, t)
                } else {
                    (target, source, t, s)
                };
                let gap = leading.value_in(n) - trailing.value_in(f);
                second
                    .anchor(leading)
                    .equal_to(first.anchor(trailing))
                    .plus(gap)
            }
            Self::EqualWidth => source.width().equal_to(target.width()),
            Self::EqualHeight => source.height().equal_to(target.height()),
        }
    }
}

fn nested(store: &ViewStore, a: ViewId, b: ViewId) -> bool {
    store.is_descendant_of(a, b) || store.is_descendant_of(b, a)
}

/// The menu opened when a constraint-creation drag is released.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintMenu {
    /// The view the drag started on.
    pub source: ViewId,
    /// The view it was released over, or `source`.
    pub target: ViewId,
    menu: Menu<ConstraintOption>,
}

impl ConstraintMenu {
    /// Builds the menu for a drag from `source` to `target`.
    #[must_use]
    pub fn new(store: &ViewStore, source: ViewId, target: ViewId) -> Self {
        let mut menu = Menu::new();
        for option in ConstraintOption::applicable(store, source, target) {
            menu.push(option.title(), option);
        }
        Self {
            source,
            target,
            menu,
        }
    }

    /// The menu entries.
    #[must_use]
    pub fn menu(&self) -> &Menu<ConstraintOption> {
        &self.menu
    }

    /// The offered options, in menu order.
    #[must_use]
    pub fn options(&self) -> Vec<ConstraintOption> {
        self.menu.items().iter().map(|i| i.value).collect()
    }
}

/// A collection offered for a multi-view selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MultiOption {
    /// Equal widths across the views.
    EqualWidths,
    /// Equal heights across the views.
    EqualHeights,
    /// Even horizontal gaps.
    EqualHorizontalSpacing,
    /// Even vertical gaps.
    EqualVerticalSpacing,
}

impl MultiOption {
    /// Menu title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::EqualWidths => "Equal Widths",
            Self::EqualHeights => "Equal Heights",
            Self::EqualHorizontalSpacing => "Equal Horizontal Spacing",
            Self::EqualVerticalSpacing => "Equal Vertical Spacing",
        }
    }

    /// Creates the (inactive) collection over `views`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::TooFewViews`] for fewer than two views.
    pub fn create(self, store: &mut ViewStore, views: &[ViewId]) -> Result<CollectionId, ConstraintError> {
        match self {
            Self::EqualWidths => store.create_equal_attribute(views, Attribute::Width),
            Self::EqualHeights => store.create_equal_attribute(views, Attribute::Height),
            Self::EqualHorizontalSpacing => store.create_equal_spacing(views, Axis::Horizontal),
            Self::EqualVerticalSpacing => store.create_equal_spacing(views, Axis::Vertical),
        }
    }
}

/// The collections offered for `views`; empty for fewer than two views.
#[must_use]
pub fn multi_selection_options(views: &[ViewId]) -> Menu<MultiOption> {
    let mut menu = Menu::new();
    if views.len() >= 2 {
        for option in [
            MultiOption::EqualWidths,
            MultiOption::EqualHeights,
            MultiOption::EqualHorizontalSpacing,
            MultiOption::EqualVerticalSpacing,
        ] {
            menu.push(option.title(), option);
        }
    }
    menu
}
