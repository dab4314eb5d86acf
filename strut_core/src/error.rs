// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for recoverable precondition failures.
//!
//! Stale handles and broken tree invariants are programmer errors and panic
//! at the call site. The errors here cover requests a caller can reasonably
//! build from user input and must be able to refuse.

use thiserror::Error;

use crate::constraint::Attribute;

/// Reasons a constraint specification is rejected at construction time.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConstraintError {
    /// The two attributes lie on different axes (e.g. `left` and `top`).
    #[error("attribute {first:?} cannot be related to {second:?}: axes differ")]
    AxisMismatch {
        /// Attribute of the constrained view.
        first: Attribute,
        /// Attribute of the target view.
        second: Attribute,
    },
    /// A size attribute was paired with a position attribute.
    #[error("size attribute cannot be related to a position attribute ({first:?} / {second:?})")]
    MixedSizeAndPosition {
        /// Attribute of the constrained view.
        first: Attribute,
        /// Attribute of the target view.
        second: Attribute,
    },
    /// The constraint relates an attribute to itself.
    #[error("constraint relates {0:?} of a view to itself")]
    SelfReference(Attribute),
    /// The multiplier is not a finite non-zero number.
    #[error("invalid multiplier {0}")]
    InvalidMultiplier(f64),
    /// A constraint collection needs at least two views.
    #[error("a constraint collection needs at least two views, got {0}")]
    TooFewViews(usize),
}

/// Failures reported by a [`LayoutSolver`](crate::layout::LayoutSolver).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The solver hit an internal inconsistency and produced no layout.
    #[error("internal solver error: {0}")]
    Internal(&'static str),
    /// A required structural constraint (root pinning, non-negative sizes)
    /// could not be added.
    #[error("required structural constraint rejected: {0}")]
    Structural(&'static str),
}
