// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size-class-variable view properties.

use crate::size_class::{SizeClass, SizeClassKey};
use crate::variation::Variations;

/// A view property that can vary by size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewProperty {
    /// Opacity in `0.0..=1.0`.
    Opacity,
    /// Whether the view is hidden.
    Hidden,
    /// Style class applied to the rendered surface.
    StyleClass,
}

/// A value for one [`ViewProperty`].
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Opacity value.
    Opacity(f64),
    /// Hidden flag.
    Hidden(bool),
    /// Style class name, or `None` for no class.
    StyleClass(Option<String>),
}

impl PropertyValue {
    /// The property this value belongs to.
    #[must_use]
    pub const fn property(&self) -> ViewProperty {
        match self {
            Self::Opacity(_) => ViewProperty::Opacity,
            Self::Hidden(_) => ViewProperty::Hidden,
            Self::StyleClass(_) => ViewProperty::StyleClass,
        }
    }
}

/// Base values and size-class variations of every varied property.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ViewProperties {
    pub(crate) opacity: Variations<f64>,
    pub(crate) hidden: Variations<bool>,
    pub(crate) style_class: Variations<Option<String>>,
}

impl Default for ViewProperties {
    fn default() -> Self {
        Self {
            opacity: Variations::new(1.0),
            hidden: Variations::new(false),
            style_class: Variations::new(None),
        }
    }
}

impl ViewProperties {
    pub(crate) fn set(&mut self, value: PropertyValue, size_class: Option<&SizeClass>) {
        match value {
            PropertyValue::Opacity(v) => self.opacity.set(v.clamp(0.0, 1.0), size_class),
            PropertyValue::Hidden(v) => self.hidden.set(v, size_class),
            PropertyValue::StyleClass(v) => self.style_class.set(v, size_class),
        }
    }

    /// Returns whether a variation was removed.
    pub(crate) fn remove(&mut self, property: ViewProperty, size_class: &SizeClass) -> bool {
        match property {
            ViewProperty::Opacity => self.opacity.remove(size_class).is_some(),
            ViewProperty::Hidden => self.hidden.remove(size_class).is_some(),
            ViewProperty::StyleClass => self.style_class.remove(size_class).is_some(),
        }
    }

    pub(crate) fn is_varied(&self) -> bool {
        self.opacity.is_varied() || self.hidden.is_varied() || self.style_class.is_varied()
    }

    pub(crate) fn has_variation(&self, property: ViewProperty, size_class: &SizeClass) -> bool {
        match property {
            ViewProperty::Opacity => self.opacity.has_variation(size_class),
            ViewProperty::Hidden => self.hidden.has_variation(size_class),
            ViewProperty::StyleClass => self.style_class.has_variation(size_class),
        }
    }

    pub(crate) fn resolve(&self, active: Option<&SizeClassKey>) -> EffectiveProperties {
        EffectiveProperties {
            opacity: *self.opacity.resolve_key(active),
            hidden: *self.hidden.resolve_key(active),
            style_class: self.style_class.resolve_key(active).clone(),
        }
    }
}

/// Property values in effect under the active size class.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveProperties {
    /// Effective opacity.
    pub opacity: f64,
    /// Effective hidden flag.
    pub hidden: bool,
    /// Effective style class.
    pub style_class: Option<String>,
}

impl Default for EffectiveProperties {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            hidden: false,
            style_class: None,
        }
    }
}

impl EffectiveProperties {
    /// Returns the value of a single property.
    #[must_use]
    pub fn get(&self, property: ViewProperty) -> PropertyValue {
        match property {
            ViewProperty::Opacity => PropertyValue::Opacity(self.opacity),
            ViewProperty::Hidden => PropertyValue::Hidden(self.hidden),
            ViewProperty::StyleClass => PropertyValue::StyleClass(self.style_class.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varied_property_resolves_per_class() {
        let compact = SizeClass::all().with_max_width(600.0);
        let mut props = ViewProperties::default();
        props.set(PropertyValue::Hidden(true), Some(&compact));
        props.set(PropertyValue::Opacity(2.0), None);

        let base = props.resolve(None);
        assert!(!base.hidden);
        assert_eq!(base.opacity, 1.0);

        let varied = props.resolve(Some(&compact.key()));
        assert!(varied.hidden);
        assert!(props.is_varied());
        assert!(props.remove(ViewProperty::Hidden, &compact));
        assert!(!props.is_varied());
    }
}
