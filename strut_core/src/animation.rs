// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation-timing contract.
//!
//! Strut never tweens values itself. It describes a transition as an
//! [`AnimationRequest`] and hands it to the host's [`AnimationDriver`], which
//! returns an [`AnimationTicket`]. The host later reports finished tickets
//! through [`AnimationDriver::take_finished`]; every ticket is reported
//! exactly once. [`ImmediateAnimations`] finishes every request at once, for
//! hosts with animation disabled.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::view::ViewId;

/// Timing curve of an animated transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    #[default]
    EaseInOut,
    /// Damped spring.
    Spring,
}

/// What an animation acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnimationTarget {
    /// A managed view.
    View(ViewId),
    /// A host element named by the caller (editor chrome, text fields).
    Element(String),
}

/// Target value of one animated property.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimatedValue {
    /// A numeric property (e.g. a translation in pixels).
    Number(f64),
    /// A string-valued property (e.g. a color).
    Text(String),
    /// A sequence of numeric keyframes played evenly over the duration.
    Keyframes(Vec<f64>),
}

/// One animated transition.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRequest {
    /// What to animate.
    pub target: AnimationTarget,
    /// Property names and their target values.
    pub properties: Vec<(String, AnimatedValue)>,
    /// Total duration.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl AnimationRequest {
    /// Creates a request with no properties.
    #[must_use]
    pub fn new(target: AnimationTarget, duration: Duration, easing: Easing) -> Self {
        Self {
            target,
            properties: Vec::new(),
            duration,
            easing,
        }
    }

    /// Adds an animated property.
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: AnimatedValue) -> Self {
        self.properties.push((property.into(), value));
        self
    }
}

/// Identifies one issued animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationTicket(pub u64);

/// Runs animations on behalf of strut.
pub trait AnimationDriver {
    /// Starts `request` and returns its ticket.
    fn animate(&mut self, request: AnimationRequest) -> AnimationTicket;

    /// Returns the tickets that finished since the last call, each exactly
    /// once.
    fn take_finished(&mut self) -> Vec<AnimationTicket>;
}

/// An [`AnimationDriver`] that finishes every request immediately.
#[derive(Clone, Debug, Default)]
pub struct ImmediateAnimations {
    next: u64,
    finished: Vec<AnimationTicket>,
}

impl ImmediateAnimations {
    /// Creates a driver with no pending completions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationDriver for ImmediateAnimations {
    fn animate(&mut self, request: AnimationRequest) -> AnimationTicket {
        let ticket = AnimationTicket(self.next);
        self.next += 1;
        tracing::trace!(?ticket, target = ?request.target, "animation finished immediately");
        self.finished.push(ticket);
        ticket
    }

    fn take_finished(&mut self) -> Vec<AnimationTicket> {
        core::mem::take(&mut self.finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_reports_each_ticket_once() {
        let mut driver = ImmediateAnimations::new();
        let request = AnimationRequest::new(
            AnimationTarget::Element(String::from("workspace")),
            Duration::from_millis(300),
            Easing::EaseInOut,
        )
        .with("opacity", AnimatedValue::Number(1.0));
        let a = driver.animate(request.clone());
        let b = driver.animate(request);
        assert_ne!(a, b);
        assert_eq!(driver.take_finished(), vec![a, b]);
        assert!(driver.take_finished().is_empty());
    }

    #[test]
    fn easing_names_are_kebab_case() {
        let json = serde_json::to_string(&Easing::EaseInOut).unwrap();
        assert_eq!(json, "\"ease-in-out\"");
        let back: Easing = serde_json::from_str("\"spring\"").unwrap();
        assert_eq!(back, Easing::Spring);
    }
}
