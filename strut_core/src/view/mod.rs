// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view tree.
//!
//! Views are stored in a [`ViewStore`] using struct-of-arrays layout and
//! addressed by generational [`ViewId`] handles. The store also owns every
//! constraint and constraint collection, so removing a view can tear down the
//! constraints that reference it.

mod id;
mod properties;
mod property;
mod store;
mod traverse;

pub use id::{INVALID, ViewId};
pub use property::{EffectiveProperties, PropertyValue, ViewProperty};
pub use store::{Placement, ViewStore};
pub use traverse::{Descendants, Subviews};
