// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributes, relations, priorities and constants.

use core::fmt;

use kurbo::Rect;

/// An edge, center line, or dimension of a view.
///
/// Leading and trailing are resolved left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Leading edge.
    Leading,
    /// Trailing edge.
    Trailing,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Horizontal center.
    CenterX,
    /// Vertical center.
    CenterY,
    /// Width.
    Width,
    /// Height.
    Height,
}

impl Attribute {
    /// All attributes, horizontal first.
    pub const ALL: [Self; 10] = [
        Self::Left,
        Self::Right,
        Self::Leading,
        Self::Trailing,
        Self::CenterX,
        Self::Width,
        Self::Top,
        Self::Bottom,
        Self::CenterY,
        Self::Height,
    ];

    /// The axis this attribute lies on.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left
            | Self::Right
            | Self::Leading
            | Self::Trailing
            | Self::CenterX
            | Self::Width => Axis::Horizontal,
            Self::Top | Self::Bottom | Self::CenterY | Self::Height => Axis::Vertical,
        }
    }

    /// Returns `true` for [`Width`](Self::Width) and [`Height`](Self::Height).
    #[must_use]
    pub const fn is_size(self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }

    /// Collapses leading/trailing onto left/right.
    #[must_use]
    pub const fn canonical(self) -> Self {
        match self {
            Self::Leading => Self::Left,
            Self::Trailing => Self::Right,
            other => other,
        }
    }

    /// Position of this attribute on `frame`, or its length for sizes.
    #[must_use]
    pub fn value_in(self, frame: Rect) -> f64 {
        match self.canonical() {
            Self::Left => frame.x0,
            Self::Right => frame.x1,
            Self::CenterX => (frame.x0 + frame.x1) * 0.5,
            Self::Top => frame.y0,
            Self::Bottom => frame.y1,
            Self::CenterY => (frame.y0 + frame.y1) * 0.5,
            Self::Width => frame.width(),
            Self::Height => frame.height(),
            Self::Leading | Self::Trailing => unreachable!("canonical() removes leading/trailing"),
        }
    }

    /// Short identifier used in constraint descriptions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::CenterX => "centerX",
            Self::CenterY => "centerY",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// Constraint orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    /// Left/right/leading/trailing/centerX/width.
    Horizontal,
    /// Top/bottom/centerY/height.
    Vertical,
}

impl Axis {
    /// The leading edge attribute of this axis.
    #[must_use]
    pub const fn leading(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Leading,
            Self::Vertical => Attribute::Top,
        }
    }

    /// The trailing edge attribute of this axis.
    #[must_use]
    pub const fn trailing(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Trailing,
            Self::Vertical => Attribute::Bottom,
        }
    }

    /// The center attribute of this axis.
    #[must_use]
    pub const fn center(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::CenterX,
            Self::Vertical => Attribute::CenterY,
        }
    }

    /// The size attribute of this axis.
    #[must_use]
    pub const fn size(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Width,
            Self::Vertical => Attribute::Height,
        }
    }
}

/// The relation between the two sides of a constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `=`
    #[default]
    Equal,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
}

impl Relation {
    /// The relation's symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

/// Constraint priority in `0..=1000`; `1000` is required.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u16);

impl Priority {
    /// Must be satisfied.
    pub const REQUIRED: Self = Self(1000);
    /// Default for content compression resistance.
    pub const DEFAULT_HIGH: Self = Self(750);
    /// Default for content hugging.
    pub const DEFAULT_LOW: Self = Self(250);

    /// Creates a priority, clamping to `0..=1000`.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        if value > 1000 { Self(1000) } else { Self(value) }
    }

    /// Creates a priority from a float, rounding and clamping to `0..=1000`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is rounded and clamped to 0..=1000 first"
    )]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self(0);
        }
        Self(value.round().clamp(0.0, 1000.0) as u16)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns `true` if this is [`REQUIRED`](Self::REQUIRED).
    #[must_use]
    pub const fn is_required(self) -> bool {
        self.0 == 1000
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}

/// The constant term of a constraint.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    /// A literal number.
    Value(f64),
    /// A named layout variable, optionally negated, resolved at layout time.
    Variable {
        /// Variable name.
        name: String,
        /// Whether the variable's value is negated.
        negated: bool,
    },
}

impl Constant {
    /// Parses constant-field text: a number, a variable name, or a variable
    /// name prefixed with `-`.
    ///
    /// Returns `None` for empty text. Whether a variable name exists is the
    /// caller's concern.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(value) = text.parse::<f64>() {
            return value.is_finite().then_some(Self::Value(value));
        }
        match text.strip_prefix('-') {
            Some(name) if !name.trim().is_empty() => Some(Self::Variable {
                name: String::from(name.trim()),
                negated: true,
            }),
            Some(_) => None,
            None => Some(Self::Variable {
                name: String::from(text),
                negated: false,
            }),
        }
    }

    /// Returns the literal value, if this is not a variable reference.
    #[must_use]
    pub fn literal(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Variable { .. } => None,
        }
    }

    /// Returns the referenced variable name, if any.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Variable { name, .. } => Some(name),
        }
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::Value(0.0)
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Variable {
                name,
                negated: false,
            } => f.write_str(name),
            Self::Variable {
                name,
                negated: true,
            } => write!(f, "-{name}"),
        }
    }
}
