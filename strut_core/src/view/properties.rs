// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property variation accessors on [`ViewStore`].

use super::id::ViewId;
use super::property::{EffectiveProperties, PropertyValue, ViewProperty};
use super::store::ViewStore;
use crate::dirty;
use crate::size_class::SizeClass;

impl ViewStore {
    /// Sets the base value of a property.
    pub fn set_property(&mut self, id: ViewId, value: PropertyValue) {
        self.set_property_variation(id, value, None);
    }

    /// Sets the base value (`size_class == None`) or the size-class variation
    /// of a property.
    pub fn set_property_variation(
        &mut self,
        id: ViewId,
        value: PropertyValue,
        size_class: Option<&SizeClass>,
    ) {
        self.validate(id);
        self.properties[id.idx as usize].set(value, size_class);
        self.dirty.mark(id.idx, dirty::PROPERTIES);
    }

    /// Removes the variation of `property` for `size_class`, falling back to
    /// the base value.
    pub fn remove_property_variation(
        &mut self,
        id: ViewId,
        property: ViewProperty,
        size_class: &SizeClass,
    ) {
        self.validate(id);
        if self.properties[id.idx as usize].remove(property, size_class) {
            self.dirty.mark(id.idx, dirty::PROPERTIES);
        }
    }

    /// Returns whether `property` has a variation for `size_class`.
    #[must_use]
    pub fn has_property_variation(
        &self,
        id: ViewId,
        property: ViewProperty,
        size_class: &SizeClass,
    ) -> bool {
        self.validate(id);
        self.properties[id.idx as usize].has_variation(property, size_class)
    }

    /// Resolves a property under the active size class.
    #[must_use]
    pub fn effective_property(&self, id: ViewId, property: ViewProperty) -> PropertyValue {
        self.effective_properties(id).get(property)
    }

    /// Resolves every varied property under the active size class.
    #[must_use]
    pub fn effective_properties(&self, id: ViewId) -> EffectiveProperties {
        self.validate(id);
        self.properties[id.idx as usize].resolve(self.active_key.as_ref())
    }

    /// Returns the effective properties as of the last layout pass.
    ///
    /// This is what a [`Presenter`](crate::backend::Presenter) should apply.
    #[must_use]
    pub fn presented_properties(&self, id: ViewId) -> &EffectiveProperties {
        self.validate(id);
        &self.effective[id.idx as usize]
    }

    /// Sets the opacity for `size_class`.
    pub fn set_opacity_variation(&mut self, id: ViewId, opacity: f64, size_class: &SizeClass) {
        self.set_property_variation(id, PropertyValue::Opacity(opacity), Some(size_class));
    }

    /// Removes the opacity variation for `size_class`.
    pub fn remove_opacity_variation(&mut self, id: ViewId, size_class: &SizeClass) {
        self.remove_property_variation(id, ViewProperty::Opacity, size_class);
    }

    /// Sets the hidden flag for `size_class`.
    pub fn set_hidden_variation(&mut self, id: ViewId, hidden: bool, size_class: &SizeClass) {
        self.set_property_variation(id, PropertyValue::Hidden(hidden), Some(size_class));
    }

    /// Removes the hidden flag variation for `size_class`.
    pub fn remove_hidden_variation(&mut self, id: ViewId, size_class: &SizeClass) {
        self.remove_property_variation(id, ViewProperty::Hidden, size_class);
    }

    /// Sets the style class for `size_class`.
    pub fn set_style_class_variation(
        &mut self,
        id: ViewId,
        style_class: Option<String>,
        size_class: &SizeClass,
    ) {
        self.set_property_variation(id, PropertyValue::StyleClass(style_class), Some(size_class));
    }

    /// Removes the style class variation for `size_class`.
    pub fn remove_style_class_variation(&mut self, id: ViewId, size_class: &SizeClass) {
        self.remove_property_variation(id, ViewProperty::StyleClass, size_class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_size_class_selects_variation() {
        let mut store = ViewStore::new();
        let view = store.create_view();
        let compact = SizeClass::all().with_max_width(600.0);

        store.set_hidden_variation(view, true, &compact);
        store.set_style_class_variation(view, Some(String::from("narrow")), &compact);
        assert_eq!(
            store.effective_property(view, ViewProperty::Hidden),
            PropertyValue::Hidden(false)
        );

        store.set_active_size_class(Some(compact.clone()));
        assert_eq!(
            store.effective_property(view, ViewProperty::Hidden),
            PropertyValue::Hidden(true)
        );
        assert_eq!(
            store.effective_properties(view).style_class.as_deref(),
            Some("narrow")
        );

        store.remove_hidden_variation(view, &compact);
        assert!(!store.has_property_variation(view, ViewProperty::Hidden, &compact));
        assert!(!store.effective_properties(view).hidden);
    }
}
