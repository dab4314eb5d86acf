// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor tunables.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use strut_core::animation::Easing;

/// Tunables of a [`LayoutEditor`](crate::LayoutEditor).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use strut_editor::EditorConfig;
///
/// let config = EditorConfig::from_json(r#"{ "line_fan_step": 12 }"#).unwrap();
/// assert_eq!(config.line_fan_step, 12.0);
/// assert_eq!(config.max_scale, 4.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance between constraint lines fanned out from one attribute, in
    /// workspace units.
    pub line_fan_step: f64,
    /// Pointer slop around constraint lines, in screen pixels.
    pub hit_tolerance: f64,
    /// Smallest zoom factor.
    pub min_scale: f64,
    /// Largest zoom factor.
    pub max_scale: f64,
    /// Factor applied by one zoom step.
    pub scale_step: f64,
    /// Duration of animated size-class transitions.
    #[serde(with = "millis")]
    pub transition: Duration,
    /// Timing curve of animated size-class transitions.
    pub transition_easing: Easing,
    /// Duration of the row-insertion animation in the variables list.
    #[serde(with = "millis")]
    pub insertion: Duration,
    /// Duration of the rejection shake.
    #[serde(with = "millis")]
    pub shake: Duration,
    /// Horizontal offsets played by the rejection shake.
    pub shake_keyframes: Vec<f64>,
    /// How long a click is swallowed after a focus change.
    #[serde(with = "millis")]
    pub click_suppression: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_fan_step: 8.0,
            hit_tolerance: 4.0,
            min_scale: 0.25,
            max_scale: 4.0,
            scale_step: 1.25,
            transition: Duration::from_millis(300),
            transition_easing: Easing::EaseInOut,
            insertion: Duration::from_millis(200),
            shake: Duration::from_millis(400),
            shake_keyframes: vec![0.0, -10.0, 10.0, -10.0, 10.0, 0.0],
            click_suppression: Duration::from_millis(200),
        }
    }
}

impl EditorConfig {
    /// Parses a JSON document, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamps `scale` to `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return 1.0_f64.clamp(self.min_scale, self.max_scale);
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Durations as whole milliseconds.
mod millis {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[expect(
        clippy::cast_possible_truncation,
        reason = "editor durations are far below u64::MAX milliseconds"
    )]
    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_milliseconds() {
        let config = EditorConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["click_suppression"], 200);
        assert_eq!(json["transition_easing"], "ease-in-out");

        let back = EditorConfig::from_json(&json.to_string()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_documents_keep_defaults() {
        let config = EditorConfig::from_json(r#"{ "shake": 250, "min_scale": 0.5 }"#).unwrap();
        assert_eq!(config.shake, Duration::from_millis(250));
        assert_eq!(config.min_scale, 0.5);
        assert_eq!(config.line_fan_step, 8.0);
    }

    #[test]
    fn scale_is_clamped() {
        let config = EditorConfig::default();
        assert_eq!(config.clamp_scale(10.0), 4.0);
        assert_eq!(config.clamp_scale(0.01), 0.25);
        assert_eq!(config.clamp_scale(1.5), 1.5);
        assert_eq!(config.clamp_scale(f64::NAN), 1.0);
    }
}
