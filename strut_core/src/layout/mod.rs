// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout pass.
//!
//! A pass visits every root with pending layout, gathers the constraints
//! among its subtree that are in effect for the active size class, and hands
//! them to a [`LayoutSolver`] as a [`LayoutProblem`]. Solved frames are
//! written back relative to each superview and reported in
//! [`LayoutChanges`], together with recomputed view properties, lifecycle
//! changes, and a [`LayoutValidity`] verdict per root.
//!
//! The default solver is [`CassowarySolver`]. Hosts with their own solver
//! implement [`LayoutSolver`] over the same problem description.

mod pass;
mod solver;
mod validity;

use kurbo::{Rect, Size};

use crate::backend::IntrinsicMeasure;
use crate::constraint::{Attribute, ConstraintId, Priority, Relation};
use crate::error::SolveError;
use crate::trace::Tracer;
use crate::variables::LayoutVariableProvider;
use crate::view::ViewId;

pub use solver::CassowarySolver;

/// Whether a root's constraints determine every frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LayoutValidity {
    /// Every view is fully determined by required constraints.
    #[default]
    Valid,
    /// The listed views are under-determined on at least one axis; their
    /// frames fall back to the previous layout.
    Ambiguous(Vec<ViewId>),
    /// A required constraint conflicted with others and was dropped.
    Unsatisfiable,
}

impl LayoutValidity {
    /// Returns `true` for [`Valid`](Self::Valid).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Intrinsic content size of one view and how strongly it is enforced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntrinsicInput {
    /// The measured natural size.
    pub size: Size,
    /// Priority of `size <= intrinsic`, `[horizontal, vertical]`.
    pub hugging: [Priority; 2],
    /// Priority of `size >= intrinsic`, `[horizontal, vertical]`.
    pub compression: [Priority; 2],
}

/// One view in a [`LayoutProblem`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemView {
    /// The view.
    pub view: ViewId,
    /// Index of the superview within the problem, `None` for the root.
    pub parent: Option<usize>,
    /// Frame from the previous layout, in root coordinates.
    pub previous: Rect,
    /// Intrinsic content size, if the view supports one.
    pub intrinsic: Option<IntrinsicInput>,
}

/// One constraint in a [`LayoutProblem`], with its constant resolved.
///
/// Reads `first.attribute relation multiplier × second.attribute + constant`.
/// Without `second`, the right-hand side is the constant alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConstraint {
    /// The constraint this was resolved from.
    pub id: ConstraintId,
    /// Index of the constrained view.
    pub first: usize,
    /// Attribute of the constrained view.
    pub first_attribute: Attribute,
    /// Relation between the two sides.
    pub relation: Relation,
    /// Index and attribute of the other view, if any.
    pub second: Option<(usize, Attribute)>,
    /// Multiplier applied to the second attribute.
    pub multiplier: f64,
    /// Resolved constant.
    pub constant: f64,
    /// Effective priority.
    pub priority: Priority,
}

/// Everything a solver needs to lay out one root.
///
/// Views are listed in pre-order; index 0 is the root. All geometry is in the
/// root's coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutProblem {
    /// The root being laid out.
    pub root: ViewId,
    /// Size the root is pinned to.
    pub container: Size,
    /// Views of the subtree.
    pub views: Vec<ProblemView>,
    /// Constraints in effect among those views.
    pub constraints: Vec<ResolvedConstraint>,
}

/// A solver's answer to a [`LayoutProblem`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutSolution {
    /// One frame per problem view, in root coordinates.
    pub frames: Vec<Rect>,
    /// Required constraints that conflicted and were left out.
    pub rejected: Vec<ConstraintId>,
}

/// Computes frames from a constraint system.
pub trait LayoutSolver {
    /// Solves `problem`.
    ///
    /// Conflicting required constraints are reported in
    /// [`LayoutSolution::rejected`] rather than failing the solve.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] when no layout could be produced at all.
    fn solve(&mut self, problem: &LayoutProblem) -> Result<LayoutSolution, SolveError>;
}

/// Collaborators for one layout call.
pub struct LayoutContext<'a> {
    pub(crate) solver: &'a mut dyn LayoutSolver,
    pub(crate) measure: Option<&'a mut dyn IntrinsicMeasure>,
    pub(crate) variables: Option<&'a dyn LayoutVariableProvider>,
    pub(crate) tracer: Tracer<'a>,
}

impl core::fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("measure", &self.measure.is_some())
            .field("variables", &self.variables.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> LayoutContext<'a> {
    /// Creates a context with only a solver.
    #[must_use]
    pub fn new(solver: &'a mut dyn LayoutSolver) -> Self {
        Self {
            solver,
            measure: None,
            variables: None,
            tracer: Tracer::none(),
        }
    }

    /// Adds the intrinsic-size measurement seam.
    #[must_use]
    pub fn with_measure(mut self, measure: &'a mut dyn IntrinsicMeasure) -> Self {
        self.measure = Some(measure);
        self
    }

    /// Adds the layout variable provider used to resolve variable constants.
    #[must_use]
    pub fn with_variables(mut self, variables: &'a dyn LayoutVariableProvider) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Adds a tracer.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer<'a>) -> Self {
        self.tracer = tracer;
        self
    }
}

/// Everything one layout pass changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutChanges {
    /// Counter of the pass that produced these changes.
    pub pass_index: u64,
    /// Roots that were solved.
    pub roots: Vec<ViewId>,
    /// Views whose frame (or presented frame) changed.
    pub frames: Vec<ViewId>,
    /// Views whose effective properties changed.
    pub properties: Vec<ViewId>,
    /// Views created since the previous pass.
    pub added: Vec<ViewId>,
    /// Views destroyed since the previous pass.
    pub removed: Vec<ViewId>,
    /// Whether any superview/subview link changed.
    pub topology_changed: bool,
    /// Validity verdict per solved root.
    pub validity: Vec<(ViewId, LayoutValidity)>,
    /// Required constraints the solver rejected.
    pub rejected: Vec<ConstraintId>,
}

impl LayoutChanges {
    /// Returns whether the pass changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
            && self.frames.is_empty()
            && self.properties.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }

    /// Returns the verdict for `root` if it was solved in this pass.
    #[must_use]
    pub fn validity_of(&self, root: ViewId) -> Option<&LayoutValidity> {
        self.validity
            .iter()
            .find(|(r, _)| *r == root)
            .map(|(_, v)| v)
    }
}
