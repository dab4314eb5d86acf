// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`LayoutSolver`] backed by the `cassowary` crate.

use cassowary::strength::{self, REQUIRED, WEAK};
use cassowary::{AddConstraintError, Constraint, Expression, RelationalOperator, Solver, Term, Variable};
use kurbo::Rect;

use super::{LayoutProblem, LayoutSolution, LayoutSolver, ResolvedConstraint};
use crate::constraint::{Attribute, Priority, Relation};
use crate::error::SolveError;

/// Solver variables of one view: `left`, `top`, `width`, `height`.
///
/// Every other attribute is a linear expression over these.
#[derive(Clone, Copy, Debug)]
struct ViewVars {
    left: Variable,
    top: Variable,
    width: Variable,
    height: Variable,
}

impl ViewVars {
    fn new() -> Self {
        Self {
            left: Variable::new(),
            top: Variable::new(),
            width: Variable::new(),
            height: Variable::new(),
        }
    }

    /// Terms of `attribute`, scaled by `coefficient`.
    fn terms(&self, attribute: Attribute, coefficient: f64) -> Vec<Term> {
        match attribute {
            Attribute::Left | Attribute::Leading => vec![Term::new(self.left, coefficient)],
            Attribute::Right | Attribute::Trailing => vec![
                Term::new(self.left, coefficient),
                Term::new(self.width, coefficient),
            ],
            Attribute::CenterX => vec![
                Term::new(self.left, coefficient),
                Term::new(self.width, 0.5 * coefficient),
            ],
            Attribute::Top => vec![Term::new(self.top, coefficient)],
            Attribute::Bottom => vec![
                Term::new(self.top, coefficient),
                Term::new(self.height, coefficient),
            ],
            Attribute::CenterY => vec![
                Term::new(self.top, coefficient),
                Term::new(self.height, 0.5 * coefficient),
            ],
            Attribute::Width => vec![Term::new(self.width, coefficient)],
            Attribute::Height => vec![Term::new(self.height, coefficient)],
        }
    }
}

/// The default solver: an incremental simplex solver (Cassowary) rebuilt for
/// every problem.
///
/// Each view gets four variables. Sizes are required to be non-negative and
/// the root is pinned to the container. Every other view carries weak stay
/// constraints at its previous frame, so under-determined views keep their
/// position instead of collapsing to the origin. Intrinsic sizes enter as a
/// pair of inequalities at the view's hugging and compression-resistance
/// priorities.
///
/// Priorities below 1000 map to strengths proportional to the priority,
/// all of them stronger than the stays.
#[derive(Clone, Copy, Debug, Default)]
pub struct CassowarySolver;

impl CassowarySolver {
    /// Creates a solver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Maps a priority to a Cassowary strength.
fn strength_of(priority: Priority) -> f64 {
    if priority.is_required() {
        REQUIRED
    } else {
        strength::create(0.0, f64::from(priority.value().max(1)), 0.0, 1.0)
    }
}

const fn operator_of(relation: Relation) -> RelationalOperator {
    match relation {
        Relation::Equal => RelationalOperator::Equal,
        Relation::GreaterOrEqual => RelationalOperator::GreaterOrEqual,
        Relation::LessOrEqual => RelationalOperator::LessOrEqual,
    }
}

/// `variable op value` at `strength`.
fn pin(variable: Variable, op: RelationalOperator, value: f64, strength: f64) -> Constraint {
    Constraint::new(
        Expression::new(vec![Term::new(variable, 1.0)], -value),
        op,
        strength,
    )
}

/// Builds `first − multiplier × second − constant  op  0`.
fn user_constraint(vars: &[ViewVars], c: &ResolvedConstraint) -> Constraint {
    let mut terms = vars[c.first].terms(c.first_attribute, 1.0);
    if let Some((second, attribute)) = c.second {
        terms.extend(vars[second].terms(attribute, -c.multiplier));
    }
    Constraint::new(
        Expression::new(terms, -c.constant),
        operator_of(c.relation),
        strength_of(c.priority),
    )
}

fn add_structural(
    solver: &mut Solver,
    constraint: Constraint,
    what: &'static str,
) -> Result<(), SolveError> {
    match solver.add_constraint(constraint) {
        Ok(()) | Err(AddConstraintError::DuplicateConstraint) => Ok(()),
        Err(AddConstraintError::UnsatisfiableConstraint) => Err(SolveError::Structural(what)),
        Err(AddConstraintError::InternalSolverError(msg)) => Err(SolveError::Internal(msg)),
    }
}

impl LayoutSolver for CassowarySolver {
    fn solve(&mut self, problem: &LayoutProblem) -> Result<LayoutSolution, SolveError> {
        use RelationalOperator::{Equal, GreaterOrEqual, LessOrEqual};

        let mut solver = Solver::new();
        let vars: Vec<ViewVars> = problem.views.iter().map(|_| ViewVars::new()).collect();

        for (i, (view, v)) in problem.views.iter().zip(&vars).enumerate() {
            add_structural(&mut solver, pin(v.width, GreaterOrEqual, 0.0, REQUIRED), "width >= 0")?;
            add_structural(&mut solver, pin(v.height, GreaterOrEqual, 0.0, REQUIRED), "height >= 0")?;

            if i == 0 {
                add_structural(&mut solver, pin(v.left, Equal, 0.0, REQUIRED), "root left")?;
                add_structural(&mut solver, pin(v.top, Equal, 0.0, REQUIRED), "root top")?;
                add_structural(
                    &mut solver,
                    pin(v.width, Equal, problem.container.width, REQUIRED),
                    "root width",
                )?;
                add_structural(
                    &mut solver,
                    pin(v.height, Equal, problem.container.height, REQUIRED),
                    "root height",
                )?;
                continue;
            }

            let previous = view.previous;
            for (variable, value) in [
                (v.left, previous.x0),
                (v.top, previous.y0),
                (v.width, previous.width()),
                (v.height, previous.height()),
            ] {
                add_structural(&mut solver, pin(variable, Equal, value, WEAK), "stay")?;
            }

            if let Some(intrinsic) = view.intrinsic {
                for (slot, (variable, value)) in [
                    (v.width, intrinsic.size.width),
                    (v.height, intrinsic.size.height),
                ]
                .into_iter()
                .enumerate()
                {
                    let hug = strength_of(intrinsic.hugging[slot]);
                    let resist = strength_of(intrinsic.compression[slot]);
                    add_structural(&mut solver, pin(variable, LessOrEqual, value, hug), "hugging")?;
                    add_structural(
                        &mut solver,
                        pin(variable, GreaterOrEqual, value, resist),
                        "compression resistance",
                    )?;
                }
            }
        }

        let mut rejected = Vec::new();
        for c in &problem.constraints {
            match solver.add_constraint(user_constraint(&vars, c)) {
                Ok(()) | Err(AddConstraintError::DuplicateConstraint) => {}
                Err(AddConstraintError::UnsatisfiableConstraint) => {
                    tracing::warn!(constraint = ?c.id, "unsatisfiable constraint skipped");
                    rejected.push(c.id);
                }
                Err(AddConstraintError::InternalSolverError(msg)) => {
                    return Err(SolveError::Internal(msg));
                }
            }
        }

        let frames = vars
            .iter()
            .map(|v| {
                let x = solver.get_value(v.left);
                let y = solver.get_value(v.top);
                let w = solver.get_value(v.width).max(0.0);
                let h = solver.get_value(v.height).max(0.0);
                Rect::new(x, y, x + w, y + h)
            })
            .collect();

        Ok(LayoutSolution { frames, rejected })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::layout::{IntrinsicInput, ProblemView};
    use crate::view::ViewStore;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn problem(n: usize, constraints: Vec<ResolvedConstraint>) -> LayoutProblem {
        let mut store = ViewStore::new();
        let views: Vec<ProblemView> = (0..n)
            .map(|i| ProblemView {
                view: store.create_view(),
                parent: (i > 0).then_some(0),
                previous: Rect::ZERO,
                intrinsic: None,
            })
            .collect();
        LayoutProblem {
            root: views[0].view,
            container: Size::new(400.0, 300.0),
            views,
            constraints,
        }
    }

    fn rc(
        first: usize,
        first_attribute: Attribute,
        second: Option<(usize, Attribute)>,
        constant: f64,
    ) -> ResolvedConstraint {
        let mut store = ViewStore::new();
        let a = store.create_view();
        let id = store
            .create_constraint(a.width().equal_to_constant(1.0))
            .unwrap();
        ResolvedConstraint {
            id,
            first,
            first_attribute,
            relation: Relation::Equal,
            second,
            multiplier: 1.0,
            constant,
            priority: Priority::REQUIRED,
        }
    }

    #[test]
    fn pins_root_and_places_child() {
        let p = problem(
            2,
            vec![
                rc(1, Attribute::Left, Some((0, Attribute::Left)), 10.0),
                rc(1, Attribute::Right, Some((0, Attribute::Right)), -10.0),
                rc(1, Attribute::Top, Some((0, Attribute::Top)), 20.0),
                rc(1, Attribute::Height, None, 44.0),
            ],
        );
        let solution = CassowarySolver::new().solve(&p).unwrap();
        assert_eq!(solution.frames[0], Rect::new(0.0, 0.0, 400.0, 300.0));
        let child = solution.frames[1];
        assert!(approx(child.x0, 10.0), "left: {}", child.x0);
        assert!(approx(child.x1, 390.0), "right: {}", child.x1);
        assert!(approx(child.y0, 20.0), "top: {}", child.y0);
        assert!(approx(child.height(), 44.0), "height: {}", child.height());
        assert!(solution.rejected.is_empty());
    }

    #[test]
    fn center_and_multiplier() {
        let mut half = rc(1, Attribute::Width, Some((0, Attribute::Width)), 0.0);
        half.multiplier = 0.5;
        let p = problem(
            2,
            vec![
                half,
                rc(1, Attribute::CenterX, Some((0, Attribute::CenterX)), 0.0),
            ],
        );
        let solution = CassowarySolver::new().solve(&p).unwrap();
        let child = solution.frames[1];
        assert!(approx(child.width(), 200.0), "width: {}", child.width());
        assert!(approx(child.x0, 100.0), "left: {}", child.x0);
    }

    #[test]
    fn conflicting_required_constraint_is_rejected() {
        let p = problem(
            2,
            vec![
                rc(1, Attribute::Width, None, 50.0),
                rc(1, Attribute::Width, None, 80.0),
            ],
        );
        let solution = CassowarySolver::new().solve(&p).unwrap();
        assert_eq!(solution.rejected.len(), 1);
        assert!(approx(solution.frames[1].width(), 50.0), "first one wins");
    }

    #[test]
    fn higher_priority_wins() {
        let mut low = rc(1, Attribute::Width, None, 50.0);
        low.priority = Priority::DEFAULT_LOW;
        let mut high = rc(1, Attribute::Width, None, 80.0);
        high.priority = Priority::DEFAULT_HIGH;
        let p = problem(2, vec![low, high]);
        let solution = CassowarySolver::new().solve(&p).unwrap();
        assert!(approx(solution.frames[1].width(), 80.0), "priority 750 beats 250");
        assert!(solution.rejected.is_empty());
    }

    #[test]
    fn under_determined_view_keeps_previous_frame() {
        let mut p = problem(2, vec![rc(1, Attribute::Width, None, 30.0)]);
        p.views[1].previous = Rect::new(15.0, 25.0, 35.0, 45.0);
        let solution = CassowarySolver::new().solve(&p).unwrap();
        let child = solution.frames[1];
        assert!(approx(child.x0, 15.0), "left: {}", child.x0);
        assert!(approx(child.y0, 25.0), "top: {}", child.y0);
        assert!(approx(child.width(), 30.0), "width: {}", child.width());
        assert!(approx(child.height(), 20.0), "height: {}", child.height());
    }

    #[test]
    fn intrinsic_size_applies_without_constraints() {
        let mut p = problem(2, Vec::new());
        p.views[1].intrinsic = Some(IntrinsicInput {
            size: Size::new(120.0, 18.0),
            hugging: [Priority::DEFAULT_LOW; 2],
            compression: [Priority::DEFAULT_HIGH; 2],
        });
        let solution = CassowarySolver::new().solve(&p).unwrap();
        let child = solution.frames[1];
        assert!(approx(child.width(), 120.0), "width: {}", child.width());
        assert!(approx(child.height(), 18.0), "height: {}", child.height());
    }
}
