// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fluent constraint construction.
//!
//! ```
//! use strut_core::constraint::Priority;
//! use strut_core::view::ViewStore;
//!
//! let mut store = ViewStore::new();
//! let a = store.create_view();
//! let b = store.create_view();
//!
//! let spec = a.leading().equal_to(b.trailing()).plus(8.0).priority(Priority::DEFAULT_HIGH);
//! let id = store.create_constraint(spec).unwrap();
//! assert!(!store.is_active(id));
//! ```

use super::attribute::{Attribute, Constant, Priority, Relation};
use crate::error::ConstraintError;
use crate::view::ViewId;

/// A `(view, attribute)` pair; the starting point of a [`ConstraintSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// The view.
    pub view: ViewId,
    /// The attribute of the view.
    pub attribute: Attribute,
}

impl Anchor {
    /// Creates an anchor.
    #[must_use]
    pub const fn new(view: ViewId, attribute: Attribute) -> Self {
        Self { view, attribute }
    }

    /// `self = other`.
    #[must_use]
    pub fn equal_to(self, other: Self) -> ConstraintSpec {
        ConstraintSpec::new(self.view, self.attribute).to(other, Relation::Equal)
    }

    /// `self >= other`.
    #[must_use]
    pub fn greater_than_or_equal_to(self, other: Self) -> ConstraintSpec {
        ConstraintSpec::new(self.view, self.attribute).to(other, Relation::GreaterOrEqual)
    }

    /// `self <= other`.
    #[must_use]
    pub fn less_than_or_equal_to(self, other: Self) -> ConstraintSpec {
        ConstraintSpec::new(self.view, self.attribute).to(other, Relation::LessOrEqual)
    }

    /// `self = constant`. Position attributes are measured from the
    /// superview's matching edge.
    #[must_use]
    pub fn equal_to_constant(self, constant: f64) -> ConstraintSpec {
        ConstraintSpec::new(self.view, self.attribute).plus(constant)
    }

    /// `self >= constant`.
    #[must_use]
    pub fn greater_than_or_equal_to_constant(self, constant: f64) -> ConstraintSpec {
        ConstraintSpec::new(self.view, self.attribute)
            .relation(Relation::GreaterOrEqual)
            .plus(constant)
    }

    /// `self <= constant`.
    #[must_use]
    pub fn less_than_or_equal_to_constant(self, constant: f64) -> ConstraintSpec {
        ConstraintSpec::new(self.view, self.attribute)
            .relation(Relation::LessOrEqual)
            .plus(constant)
    }
}

impl ViewId {
    /// Anchor for an arbitrary attribute.
    #[must_use]
    pub const fn anchor(self, attribute: Attribute) -> Anchor {
        Anchor::new(self, attribute)
    }

    /// Left edge anchor.
    #[must_use]
    pub const fn left(self) -> Anchor {
        self.anchor(Attribute::Left)
    }

    /// Right edge anchor.
    #[must_use]
    pub const fn right(self) -> Anchor {
        self.anchor(Attribute::Right)
    }

    /// Top edge anchor.
    #[must_use]
    pub const fn top(self) -> Anchor {
        self.anchor(Attribute::Top)
    }

    /// Bottom edge anchor.
    #[must_use]
    pub const fn bottom(self) -> Anchor {
        self.anchor(Attribute::Bottom)
    }

    /// Leading edge anchor.
    #[must_use]
    pub const fn leading(self) -> Anchor {
        self.anchor(Attribute::Leading)
    }

    /// Trailing edge anchor.
    #[must_use]
    pub const fn trailing(self) -> Anchor {
        self.anchor(Attribute::Trailing)
    }

    /// Horizontal center anchor.
    #[must_use]
    pub const fn center_x(self) -> Anchor {
        self.anchor(Attribute::CenterX)
    }

    /// Vertical center anchor.
    #[must_use]
    pub const fn center_y(self) -> Anchor {
        self.anchor(Attribute::CenterY)
    }

    /// Width anchor.
    #[must_use]
    pub const fn width(self) -> Anchor {
        self.anchor(Attribute::Width)
    }

    /// Height anchor.
    #[must_use]
    pub const fn height(self) -> Anchor {
        self.anchor(Attribute::Height)
    }
}

/// Parameters for [`ViewStore::create_constraint`](crate::view::ViewStore::create_constraint).
///
/// Defaults: no target, relation `=`, multiplier 1, constant 0, priority
/// required.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSpec {
    /// The constrained view.
    pub view: ViewId,
    /// The constrained attribute.
    pub attribute: Attribute,
    /// Target view and attribute; `None` for a constant-only constraint.
    pub target: Option<Anchor>,
    /// Relation between the two sides.
    pub relation: Relation,
    /// Multiplier applied to the target attribute. Ignored without a target.
    pub multiplier: f64,
    /// Constant term.
    pub constant: Constant,
    /// Priority.
    pub priority: Priority,
}

impl ConstraintSpec {
    /// Creates a constant-only `view.attribute = 0` spec.
    #[must_use]
    pub fn new(view: ViewId, attribute: Attribute) -> Self {
        Self {
            view,
            attribute,
            target: None,
            relation: Relation::Equal,
            multiplier: 1.0,
            constant: Constant::Value(0.0),
            priority: Priority::REQUIRED,
        }
    }

    /// Sets the target anchor and relation.
    #[must_use]
    pub fn to(mut self, target: Anchor, relation: Relation) -> Self {
        self.target = Some(target);
        self.relation = relation;
        self
    }

    /// Sets the relation.
    #[must_use]
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    /// Sets a literal constant.
    #[must_use]
    pub fn plus(mut self, constant: f64) -> Self {
        self.constant = Constant::Value(constant);
        self
    }

    /// Sets the multiplier.
    #[must_use]
    pub fn times(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Uses the named layout variable as the constant.
    #[must_use]
    pub fn constant_variable(mut self, name: impl Into<String>) -> Self {
        self.constant = Constant::Variable {
            name: name.into(),
            negated: false,
        };
        self
    }

    /// Uses the negated value of the named layout variable as the constant.
    #[must_use]
    pub fn minus_variable(mut self, name: impl Into<String>) -> Self {
        self.constant = Constant::Variable {
            name: name.into(),
            negated: true,
        };
        self
    }

    /// Checks attribute pairing and the multiplier.
    pub(crate) fn validate(&self) -> Result<(), ConstraintError> {
        let Some(target) = self.target else {
            return Ok(());
        };
        let (first, second) = (self.attribute, target.attribute);
        if first.axis() != second.axis() {
            return Err(ConstraintError::AxisMismatch { first, second });
        }
        if first.is_size() != second.is_size() {
            return Err(ConstraintError::MixedSizeAndPosition { first, second });
        }
        if target.view == self.view && first.canonical() == second.canonical() {
            return Err(ConstraintError::SelfReference(first));
        }
        if !self.multiplier.is_finite() || self.multiplier == 0.0 {
            return Err(ConstraintError::InvalidMultiplier(self.multiplier));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (ViewId, ViewId) {
        (
            ViewId {
                idx: 0,
                generation: 0,
            },
            ViewId {
                idx: 1,
                generation: 0,
            },
        )
    }

    #[test]
    fn builders_fill_fields() {
        let (a, b) = ids();
        let spec = a
            .width()
            .less_than_or_equal_to(b.width())
            .times(0.5)
            .plus(4.0)
            .priority(Priority::new(500));
        assert_eq!(spec.relation, Relation::LessOrEqual);
        assert_eq!(spec.multiplier, 0.5);
        assert_eq!(spec.constant, Constant::Value(4.0));
        assert_eq!(spec.priority.value(), 500);
        assert_eq!(spec.target, Some(b.width()));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn constant_only_has_no_target() {
        let (a, _) = ids();
        let spec = a.height().greater_than_or_equal_to_constant(44.0);
        assert!(spec.target.is_none());
        assert_eq!(spec.relation, Relation::GreaterOrEqual);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn rejects_inconsistent_pairings() {
        let (a, b) = ids();
        assert_eq!(
            a.left().equal_to(b.top()).validate(),
            Err(ConstraintError::AxisMismatch {
                first: Attribute::Left,
                second: Attribute::Top
            })
        );
        assert_eq!(
            a.width().equal_to(b.height()).validate(),
            Err(ConstraintError::AxisMismatch {
                first: Attribute::Width,
                second: Attribute::Height
            })
        );
        assert_eq!(
            a.width().equal_to(b.leading()).validate(),
            Err(ConstraintError::MixedSizeAndPosition {
                first: Attribute::Width,
                second: Attribute::Leading
            })
        );
        assert_eq!(
            a.leading().equal_to(a.left()).validate(),
            Err(ConstraintError::SelfReference(Attribute::Leading))
        );
        assert!(matches!(
            a.width().equal_to(b.width()).times(0.0).validate(),
            Err(ConstraintError::InvalidMultiplier(_))
        ));
        assert!(a.leading().equal_to(a.trailing()).validate().is_ok());
    }
}
