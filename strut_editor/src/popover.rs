// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored popovers.
//!
//! A popover sits next to an anchor rectangle with an indicator pointing at
//! it. Placement tries below, above, right, then left of the anchor and takes
//! the first side where the popover fits inside the bounds. When no side
//! fits, it goes below and is clamped.

use kurbo::{Point, Rect, Size};

/// Errors from [`Popover::show`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PopoverError {
    /// The popover was shown without an anchor.
    #[error("popover has no anchor")]
    NoAnchor,
}

/// The popover edge carrying the indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorEdge {
    /// Popover below the anchor, indicator on its top edge.
    Top,
    /// Popover above the anchor, indicator on its bottom edge.
    Bottom,
    /// Popover right of the anchor, indicator on its left edge.
    Left,
    /// Popover left of the anchor, indicator on its right edge.
    Right,
}

/// Where a popover ends up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopoverPlacement {
    /// Popover frame, excluding the indicator.
    pub frame: Rect,
    /// Edge carrying the indicator.
    pub indicator: IndicatorEdge,
    /// Tip of the indicator, on the anchor's edge.
    pub indicator_tip: Point,
}

/// A popover's geometry inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Popover {
    /// Rectangle the popover points at.
    pub anchor: Option<Rect>,
    /// Preferred content size.
    pub size: Size,
    /// Area the popover must stay inside.
    pub bounds: Rect,
    /// Length of the indicator.
    pub indicator_size: f64,
}

impl Popover {
    /// Creates an unanchored popover of `size` inside `bounds`.
    #[must_use]
    pub fn new(size: Size, bounds: Rect) -> Self {
        Self {
            anchor: None,
            size,
            bounds,
            indicator_size: 8.0,
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn anchored_to(mut self, anchor: Rect) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Computes the placement.
    ///
    /// # Errors
    ///
    /// Returns [`PopoverError::NoAnchor`] if no anchor is set.
    pub fn show(&self) -> Result<PopoverPlacement, PopoverError> {
        let anchor = self.anchor.ok_or(PopoverError::NoAnchor)?;
        let (w, h) = (self.size.width, self.size.height);
        let gap = self.indicator_size;
        let b = self.bounds;
        let center = anchor.center();
        let clamp_x = |x: f64| x.min(b.x1 - w).max(b.x0);
        let clamp_y = |y: f64| y.min(b.y1 - h).max(b.y0);

        let below = (
            IndicatorEdge::Top,
            Point::new(clamp_x(center.x - w * 0.5), anchor.y1 + gap),
            Point::new(center.x, anchor.y1),
        );
        let candidates = [
            below,
            (
                IndicatorEdge::Bottom,
                Point::new(clamp_x(center.x - w * 0.5), anchor.y0 - gap - h),
                Point::new(center.x, anchor.y0),
            ),
            (
                IndicatorEdge::Left,
                Point::new(anchor.x1 + gap, clamp_y(center.y - h * 0.5)),
                Point::new(anchor.x1, center.y),
            ),
            (
                IndicatorEdge::Right,
                Point::new(anchor.x0 - gap - w, clamp_y(center.y - h * 0.5)),
                Point::new(anchor.x0, center.y),
            ),
        ];
        let fits = |origin: Point| {
            origin.x >= b.x0 && origin.y >= b.y0 && origin.x + w <= b.x1 && origin.y + h <= b.y1
        };
        let (indicator, origin, tip) = candidates
            .into_iter()
            .find(|(_, origin, _)| fits(*origin))
            .unwrap_or((below.0, Point::new(below.1.x, clamp_y(below.1.y)), below.2));
        Ok(PopoverPlacement {
            frame: Rect::from_origin_size(origin, self.size),
            indicator,
            indicator_tip: tip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popover(anchor: Rect) -> Popover {
        Popover::new(Size::new(100.0, 50.0), Rect::new(0.0, 0.0, 400.0, 300.0)).anchored_to(anchor)
    }

    #[test]
    fn unanchored_popover_errors() {
        let p = Popover::new(Size::new(10.0, 10.0), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(p.show(), Err(PopoverError::NoAnchor));
    }

    #[test]
    fn prefers_below() {
        let placement = popover(Rect::new(150.0, 20.0, 170.0, 40.0)).show().unwrap();
        assert_eq!(placement.indicator, IndicatorEdge::Top);
        assert_eq!(placement.frame, Rect::new(110.0, 48.0, 210.0, 98.0));
        assert_eq!(placement.indicator_tip, Point::new(160.0, 40.0));
    }

    #[test]
    fn falls_back_through_sides() {
        let above = popover(Rect::new(150.0, 260.0, 170.0, 280.0)).show().unwrap();
        assert_eq!(above.indicator, IndicatorEdge::Bottom);

        let tall_anchor = Rect::new(10.0, 0.0, 30.0, 300.0);
        assert_eq!(popover(tall_anchor).show().unwrap().indicator, IndicatorEdge::Left);

        let right_anchor = Rect::new(370.0, 0.0, 390.0, 300.0);
        assert_eq!(popover(right_anchor).show().unwrap().indicator, IndicatorEdge::Right);
    }

    #[test]
    fn horizontal_position_is_clamped() {
        let placement = popover(Rect::new(0.0, 20.0, 10.0, 40.0)).show().unwrap();
        assert_eq!(placement.frame.x0, 0.0);
        assert_eq!(placement.indicator_tip.x, 5.0);
    }
}
