// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Strut uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! decide which roots need a layout pass and which views need their effective
//! properties recomputed.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`LAYOUT`] has dependency edges from parent to child
//!   (a superview depends on its subviews). Marking a view with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) marks every ancestor, so
//!   a change anywhere in a tree surfaces at its root, which is the unit the
//!   solver works on.
//!
//! - **Local-only**: [`PROPERTIES`] is marked with the default policy. Only
//!   views whose own opacity, hidden flag, or style class (or one of their
//!   size-class variations) changed appear in the drain output.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on topology mutations
//!   (add/remove subview, create/destroy view).
//!
//! # Consumption
//!
//! Each [`ViewStore::layout`](crate::view::ViewStore::layout) call drains all
//! channels and surfaces the results as
//! [`LayoutChanges`](crate::layout::LayoutChanges).

use understory_dirty::Channel;

/// Geometry inputs changed: constraints, intrinsic size, container size, or
/// the active size class.
pub const LAYOUT: Channel = Channel::new(0);

/// Effective view properties (opacity, hidden, style class) may have changed.
pub const PROPERTIES: Channel = Channel::new(1);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(2);
