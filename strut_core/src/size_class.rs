// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size classes and viewports.
//!
//! A [`SizeClass`] is a bucket of viewport conditions: optional upper bounds
//! on width, height, diagonal and surface area, plus an orientation filter. A
//! [`Viewport`] matches a class iff every bound the class specifies is
//! satisfied; a class with no bounds and [`Orientation::Any`] matches every
//! viewport.
//!
//! Thresholds are independent upper bounds, so several classes can match the
//! same viewport. Strut never picks a "best" match automatically: variation
//! lookups are always driven by one explicitly active class (see
//! [`ViewStore::set_active_size_class`](crate::view::ViewStore::set_active_size_class)).
//!
//! Variation maps are keyed by [`SizeClassKey`], a deterministic string
//! encoding of the class that round-trips through [`SizeClass::from_key`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Orientation filter of a size class, or orientation of a viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Matches both orientations. Never reported by a viewport.
    #[default]
    Any,
    /// Height strictly greater than width.
    Portrait,
    /// Width greater than or equal to height.
    Landscape,
}

impl Orientation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// A snapshot of the rendering surface's dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport with the given dimensions.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length of the diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// [`Orientation::Portrait`] iff height is strictly greater than width.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Scales both sides by `factor` and rounds down to whole pixels.
    fn scaled_down(self, factor: f64) -> Self {
        Self::new((self.width * factor).floor(), (self.height * factor).floor())
    }

    /// Returns the viewport as a [`kurbo::Size`].
    #[must_use]
    pub const fn size(&self) -> kurbo::Size {
        kurbo::Size::new(self.width, self.height)
    }
}

/// Snapshots the live viewport from the rendering surface.
pub trait ViewportSource {
    /// Returns the current dimensions of the rendering surface.
    fn current_viewport(&self) -> Viewport;
}

/// The live viewport plus an optional required override.
///
/// While an override is set (for example while an editor previews a size
/// class) it takes priority over the live value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    live: Viewport,
    required: Option<Viewport>,
}

impl ViewportState {
    /// Creates a state tracking the given live viewport with no override.
    #[must_use]
    pub const fn new(live: Viewport) -> Self {
        Self {
            live,
            required: None,
        }
    }

    /// Re-reads the live viewport from `source`.
    pub fn refresh(&mut self, source: &dyn ViewportSource) {
        self.live = source.current_viewport();
    }

    /// Sets the live viewport directly.
    pub fn set_live(&mut self, live: Viewport) {
        self.live = live;
    }

    /// Sets or clears the required override.
    pub fn set_required_viewport(&mut self, required: Option<Viewport>) {
        self.required = required;
    }

    /// Returns the override, if any.
    #[must_use]
    pub const fn required_viewport(&self) -> Option<Viewport> {
        self.required
    }

    /// Returns the live viewport, ignoring any override.
    #[must_use]
    pub const fn live(&self) -> Viewport {
        self.live
    }

    /// Returns the viewport in effect: the override if set, else the live one.
    #[must_use]
    pub fn current(&self) -> Viewport {
        self.required.unwrap_or(self.live)
    }
}

/// A bucket of viewport conditions used to select alternate property values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeClass {
    /// Inclusive upper bound on the viewport width.
    pub max_width: Option<f64>,
    /// Inclusive upper bound on the viewport height.
    pub max_height: Option<f64>,
    /// Inclusive upper bound on the viewport diagonal.
    pub max_diagonal: Option<f64>,
    /// Required orientation.
    pub orientation: Orientation,
    /// Inclusive upper bound on the viewport surface area.
    pub max_surface_area: Option<f64>,
}

impl SizeClass {
    /// A class with no thresholds, matching every viewport.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the maximum width.
    #[must_use]
    pub fn with_max_width(mut self, value: f64) -> Self {
        self.max_width = Some(value);
        self
    }

    /// Sets the maximum height.
    #[must_use]
    pub fn with_max_height(mut self, value: f64) -> Self {
        self.max_height = Some(value);
        self
    }

    /// Sets the maximum diagonal.
    #[must_use]
    pub fn with_max_diagonal(mut self, value: f64) -> Self {
        self.max_diagonal = Some(value);
        self
    }

    /// Sets the orientation filter.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the maximum surface area.
    #[must_use]
    pub fn with_max_surface_area(mut self, value: f64) -> Self {
        self.max_surface_area = Some(value);
        self
    }

    /// Returns `true` if this class specifies no thresholds at all.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.max_width.is_none()
            && self.max_height.is_none()
            && self.max_diagonal.is_none()
            && self.max_surface_area.is_none()
            && self.orientation == Orientation::Any
    }

    /// Returns whether `viewport` satisfies every threshold of this class.
    #[must_use]
    pub fn matches(&self, viewport: &Viewport) -> bool {
        let within = |bound: Option<f64>, value: f64| bound.is_none_or(|max| value <= max);
        within(self.max_width, viewport.width)
            && within(self.max_height, viewport.height)
            && within(self.max_diagonal, viewport.diagonal())
            && (self.orientation == Orientation::Any
                || self.orientation == viewport.orientation())
            && within(self.max_surface_area, viewport.area())
    }

    /// Derives a viewport that matches this class, starting from `live`.
    ///
    /// Width and height are clamped to their bounds and scaled down uniformly
    /// (rounded down to whole pixels) until the diagonal and area bounds
    /// hold. The orientation is enforced last by shrinking one side, which
    /// keeps every upper bound satisfied. The result matches the class
    /// whenever any viewport can; a portrait class whose height or diagonal
    /// bound is not positive cannot be matched.
    #[must_use]
    pub fn preview_viewport(&self, live: Viewport) -> Viewport {
        let mut width = live.width.max(0.0);
        let mut height = live.height.max(0.0);

        match self.orientation {
            Orientation::Portrait if width >= height => core::mem::swap(&mut width, &mut height),
            Orientation::Landscape if height > width => core::mem::swap(&mut width, &mut height),
            _ => {}
        }
        if let Some(max) = self.max_width {
            width = width.min(max);
        }
        if let Some(max) = self.max_height {
            height = height.min(max);
        }

        let mut viewport = Viewport::new(width, height);
        if let Some(max) = self.max_diagonal {
            let diagonal = viewport.diagonal();
            if diagonal > max && diagonal > 0.0 {
                viewport = viewport.scaled_down(max / diagonal);
            }
        }
        if let Some(max) = self.max_surface_area {
            let area = viewport.area();
            if area > max && area > 0.0 {
                viewport = viewport.scaled_down((max / area).sqrt());
            }
        }
        self.enforce_orientation(viewport)
    }

    /// Shrinks one side of `viewport` until it has this class's orientation.
    fn enforce_orientation(&self, mut viewport: Viewport) -> Viewport {
        match self.orientation {
            Orientation::Landscape if viewport.height > viewport.width => {
                viewport.height = viewport.width;
            }
            Orientation::Portrait if viewport.width >= viewport.height => {
                if viewport.height > 0.0 {
                    viewport.width = (viewport.height - 1.0).max(0.0);
                } else {
                    // Growing from nothing: the smallest portrait viewport
                    // the height and diagonal bounds allow.
                    let ceiling = [self.max_height, self.max_diagonal]
                        .into_iter()
                        .flatten()
                        .fold(1.0_f64, f64::min);
                    viewport = Viewport::new(0.0, ceiling);
                }
            }
            _ => {}
        }
        viewport
    }

    /// Returns the deterministic key used to index variation maps.
    #[must_use]
    pub fn key(&self) -> SizeClassKey {
        fn bound(value: Option<f64>) -> String {
            value.map_or_else(|| String::from("*"), |v| format!("{v}"))
        }
        SizeClassKey(format!(
            "w{}h{}d{}o{}a{}",
            bound(self.max_width),
            bound(self.max_height),
            bound(self.max_diagonal),
            self.orientation.as_str(),
            bound(self.max_surface_area),
        ))
    }

    /// Parses a key produced by [`key`](Self::key).
    #[must_use]
    pub fn from_key(key: &SizeClassKey) -> Option<Self> {
        key.0.parse().ok()
    }

    /// A short human-readable description for choosers and inspectors.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_all() {
            return String::from("All Size Classes");
        }
        let mut parts = Vec::new();
        if let Some(v) = self.max_width {
            parts.push(format!("width \u{2264} {v}"));
        }
        if let Some(v) = self.max_height {
            parts.push(format!("height \u{2264} {v}"));
        }
        if let Some(v) = self.max_diagonal {
            parts.push(format!("diagonal \u{2264} {v}"));
        }
        if self.orientation != Orientation::Any {
            parts.push(String::from(self.orientation.as_str()));
        }
        if let Some(v) = self.max_surface_area {
            parts.push(format!("area \u{2264} {v}"));
        }
        parts.join(", ")
    }
}

impl FromStr for SizeClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        fn bound(text: &str) -> Result<Option<f64>, ()> {
            if text == "*" {
                Ok(None)
            } else {
                text.parse::<f64>().map(Some).map_err(|_| ())
            }
        }

        let rest = s.strip_prefix('w').ok_or(())?;
        let (width, rest) = rest.split_once('h').ok_or(())?;
        let (height, rest) = rest.split_once('d').ok_or(())?;
        let (diagonal, rest) = rest.split_once('o').ok_or(())?;
        // Bounds may print as `NaN`, so the orientation word is matched
        // whole rather than searched for the area separator.
        let (orientation, area) = [
            Orientation::Any,
            Orientation::Portrait,
            Orientation::Landscape,
        ]
        .into_iter()
        .find_map(|o| {
            rest.strip_prefix(o.as_str())
                .and_then(|r| r.strip_prefix('a'))
                .map(|area| (o, area))
        })
        .ok_or(())?;
        Ok(Self {
            max_width: bound(width)?,
            max_height: bound(height)?,
            max_diagonal: bound(diagonal)?,
            orientation,
            max_surface_area: bound(area)?,
        })
    }
}

/// Deterministic string key identifying a [`SizeClass`] in variation maps.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SizeClassKey(pub String);

impl SizeClassKey {
    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SizeClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SizeClassKey({})", self.0)
    }
}

impl fmt::Display for SizeClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
