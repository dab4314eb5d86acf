// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout constraints.
//!
//! A constraint is one linear relation
//! `view.attribute  (= | >= | <=)  multiplier × target.attribute + constant`
//! with a priority in `0..=1000`. Constant, priority, and active state each
//! carry a base value plus per-size-class variations, resolved by the rule in
//! [`variation`](crate::variation).
//!
//! Constraints are created inactive from a [`ConstraintSpec`] (usually built
//! through the [`Anchor`] methods on [`ViewId`](crate::view::ViewId)) and live
//! in the [`ViewStore`](crate::view::ViewStore). A constraint is *registered*
//! with its views while it is active at the base level or in any size class.
//!
//! [Collections](Collection) group constituents generated together (equal
//! widths, equal spacing); an editor selects and removes them as one unit
//! through [`ConstraintRef`].

mod attribute;
mod collection;
mod id;
mod ops;
mod spec;
pub(crate) mod store;

pub use attribute::{Attribute, Axis, Constant, Priority, Relation};
pub use id::{CollectionId, ConstraintId, ConstraintRef};
pub use spec::{Anchor, ConstraintSpec};
pub use store::{Collection, CollectionKind, Constraint};
