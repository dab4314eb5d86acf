// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint and collection identity types.

use core::fmt;

/// A handle to an atomic constraint in a [`ViewStore`](crate::view::ViewStore).
///
/// Like [`ViewId`](crate::view::ViewId), it pairs a slot index with a
/// generation counter so handles to removed constraints are detected.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ConstraintId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstraintId({}@gen{})", self.idx, self.generation)
    }
}

/// A handle to a constraint collection.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl CollectionId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionId({}@gen{})", self.idx, self.generation)
    }
}

/// The unit an editor selects and removes: an atomic constraint or a whole
/// collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintRef {
    /// A single constraint handed to the solver as is.
    Atomic(ConstraintId),
    /// A collection standing for several constituent constraints.
    Collection(CollectionId),
}

impl From<ConstraintId> for ConstraintRef {
    fn from(id: ConstraintId) -> Self {
        Self::Atomic(id)
    }
}

impl From<CollectionId> for ConstraintRef {
    fn from(id: CollectionId) -> Self {
        Self::Collection(id)
    }
}
