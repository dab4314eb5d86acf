// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detects under-determined views in a [`LayoutProblem`].
//!
//! Each axis of a view has four linked quantities: leading edge, center,
//! trailing edge and size. Any two of them fix the other two. Required
//! equalities transfer knowledge between views, intrinsic sizes fix sizes,
//! and the root is fixed by its container. A fixpoint over these facts
//! yields the views left with a free axis.

use super::{LayoutProblem, LayoutValidity};
use crate::constraint::{Attribute, ConstraintId, Relation};
use crate::view::ViewId;

const ALL: u8 = 0b1111;

/// Axis slot and quantity bit of an attribute.
const fn slot_of(attribute: Attribute) -> (usize, u8) {
    match attribute {
        Attribute::Left | Attribute::Leading => (0, 0b0001),
        Attribute::CenterX => (0, 0b0010),
        Attribute::Right | Attribute::Trailing => (0, 0b0100),
        Attribute::Width => (0, 0b1000),
        Attribute::Top => (1, 0b0001),
        Attribute::CenterY => (1, 0b0010),
        Attribute::Bottom => (1, 0b0100),
        Attribute::Height => (1, 0b1000),
    }
}

/// Records `bit` as known; two known quantities saturate the axis.
fn learn(known: &mut [[u8; 2]], view: usize, attribute: Attribute) -> bool {
    let (axis, bit) = slot_of(attribute);
    let before = known[view][axis];
    let mut after = before | bit;
    if after.count_ones() >= 2 {
        after = ALL;
    }
    known[view][axis] = after;
    after != before
}

fn is_known(known: &[[u8; 2]], view: usize, attribute: Attribute) -> bool {
    let (axis, bit) = slot_of(attribute);
    known[view][axis] & bit != 0
}

/// Returns the views of `problem` whose frame is not fixed by required
/// equalities and intrinsic sizes. `rejected` constraints are ignored.
fn ambiguous_views(problem: &LayoutProblem, rejected: &[ConstraintId]) -> Vec<ViewId> {
    let mut known = vec![[0_u8; 2]; problem.views.len()];
    if let Some(root) = known.first_mut() {
        *root = [ALL; 2];
    }
    for (i, view) in problem.views.iter().enumerate() {
        if view.intrinsic.is_some() {
            learn(&mut known, i, Attribute::Width);
            learn(&mut known, i, Attribute::Height);
        }
    }

    let determining: Vec<_> = problem
        .constraints
        .iter()
        .filter(|c| {
            c.relation == Relation::Equal
                && c.priority.is_required()
                && !rejected.contains(&c.id)
        })
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for c in &determining {
            match c.second {
                None => changed |= learn(&mut known, c.first, c.first_attribute),
                Some((second, attribute)) => {
                    if is_known(&known, second, attribute) {
                        changed |= learn(&mut known, c.first, c.first_attribute);
                    }
                    if is_known(&known, c.first, c.first_attribute) {
                        changed |= learn(&mut known, second, attribute);
                    }
                }
            }
        }
    }

    problem
        .views
        .iter()
        .zip(&known)
        .filter(|(_, k)| k[0] != ALL || k[1] != ALL)
        .map(|(v, _)| v.view)
        .collect()
}

/// Classifies a solved problem.
pub(crate) fn classify(problem: &LayoutProblem, rejected: &[ConstraintId]) -> LayoutValidity {
    if !rejected.is_empty() {
        return LayoutValidity::Unsatisfiable;
    }
    let ambiguous = ambiguous_views(problem, rejected);
    if ambiguous.is_empty() {
        LayoutValidity::Valid
    } else {
        LayoutValidity::Ambiguous(ambiguous)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::*;
    use crate::constraint::Priority;
    use crate::layout::{IntrinsicInput, ProblemView, ResolvedConstraint};
    use crate::view::ViewStore;

    struct Fixture {
        store: ViewStore,
        problem: LayoutProblem,
    }

    impl Fixture {
        fn new(n: usize) -> Self {
            let mut store = ViewStore::new();
            let views: Vec<ProblemView> = (0..n)
                .map(|i| ProblemView {
                    view: store.create_view(),
                    parent: (i > 0).then_some(0),
                    previous: Rect::ZERO,
                    intrinsic: None,
                })
                .collect();
            let problem = LayoutProblem {
                root: views[0].view,
                container: Size::new(100.0, 100.0),
                views,
                constraints: Vec::new(),
            };
            Self { store, problem }
        }

        fn id(&mut self) -> ConstraintId {
            let v = self.problem.root;
            self.store
                .create_constraint(v.width().equal_to_constant(1.0))
                .unwrap()
        }

        fn add(&mut self, first: usize, a: Attribute, second: Option<(usize, Attribute)>) -> ConstraintId {
            let id = self.id();
            self.problem.constraints.push(ResolvedConstraint {
                id,
                first,
                first_attribute: a,
                relation: Relation::Equal,
                second,
                multiplier: 1.0,
                constant: 0.0,
                priority: Priority::REQUIRED,
            });
            id
        }
    }

    #[test]
    fn fully_pinned_child_is_valid() {
        let mut f = Fixture::new(2);
        f.add(1, Attribute::Leading, Some((0, Attribute::Leading)));
        f.add(1, Attribute::Trailing, Some((0, Attribute::Trailing)));
        f.add(1, Attribute::Top, Some((0, Attribute::Top)));
        f.add(1, Attribute::Height, None);
        assert_eq!(classify(&f.problem, &[]), LayoutValidity::Valid);
    }

    #[test]
    fn missing_vertical_position_is_ambiguous() {
        let mut f = Fixture::new(2);
        f.add(1, Attribute::Left, Some((0, Attribute::Left)));
        f.add(1, Attribute::Width, None);
        f.add(1, Attribute::Height, None);
        let child = f.problem.views[1].view;
        assert_eq!(
            classify(&f.problem, &[]),
            LayoutValidity::Ambiguous(vec![child])
        );
    }

    #[test]
    fn knowledge_flows_through_chains_and_intrinsic_sizes() {
        let mut f = Fixture::new(3);
        f.problem.views[1].intrinsic = Some(IntrinsicInput {
            size: Size::new(10.0, 10.0),
            hugging: [Priority::DEFAULT_LOW; 2],
            compression: [Priority::DEFAULT_HIGH; 2],
        });
        f.add(1, Attribute::Leading, Some((0, Attribute::Leading)));
        f.add(1, Attribute::Top, Some((0, Attribute::Top)));
        // View 2 hangs off view 1 and copies its size.
        f.add(2, Attribute::Leading, Some((1, Attribute::Trailing)));
        f.add(2, Attribute::CenterY, Some((1, Attribute::CenterY)));
        f.add(1, Attribute::Width, Some((2, Attribute::Width)));
        f.add(2, Attribute::Height, Some((1, Attribute::Height)));
        assert_eq!(classify(&f.problem, &[]), LayoutValidity::Valid);
    }

    #[test]
    fn non_required_constraints_do_not_determine() {
        let mut f = Fixture::new(2);
        for attribute in [Attribute::Left, Attribute::Top, Attribute::Width, Attribute::Height] {
            f.add(1, attribute, None);
        }
        f.problem.constraints[0].priority = Priority::DEFAULT_HIGH;
        assert!(matches!(
            classify(&f.problem, &[]),
            LayoutValidity::Ambiguous(_)
        ));
    }

    #[test]
    fn rejection_wins_over_ambiguity() {
        let mut f = Fixture::new(2);
        let id = f.add(1, Attribute::Width, None);
        assert_eq!(classify(&f.problem, &[id]), LayoutValidity::Unsatisfiable);
    }
}
