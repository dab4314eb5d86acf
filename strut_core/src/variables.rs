// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout variables: named numeric values usable as constraint constants.
//!
//! The host owns variable storage and persistence through
//! [`LayoutVariableProvider`]. [`InMemoryVariables`] is a complete
//! implementation backed by ordered maps; it persists through a
//! [`VariableSink`] as a JSON [`VariableSnapshot`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::size_class::{SizeClass, SizeClassKey};
use crate::variation::Variations;

/// One size-class override of a layout variable.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableVariation {
    /// The size class the override applies to.
    pub size_class: SizeClass,
    /// The overriding value.
    pub value: f64,
}

/// Storage and persistence of layout variables, implemented by the host.
///
/// Names are unique among base entries; every variation has a base entry of
/// the same name.
pub trait LayoutVariableProvider {
    /// Base values by name.
    fn layout_variables(&self) -> BTreeMap<String, f64>;

    /// Size-class overrides of one variable, in key order.
    fn variations_for_layout_variable(&self, name: &str) -> Vec<VariableVariation>;

    /// Adds a variable with a base value.
    fn register_layout_variable(&mut self, name: &str, value: f64);

    /// Renames a variable together with its variations.
    fn rename_layout_variable(&mut self, old: &str, new: &str);

    /// Removes a variable and all of its variations.
    fn unregister_layout_variable(&mut self, name: &str);

    /// Sets the base value (`size_class == None`) or a size-class override.
    fn set_layout_variable_value(&mut self, value: f64, name: &str, size_class: Option<&SizeClass>);

    /// Removes one size-class override.
    fn remove_variation_for_layout_variable(&mut self, name: &str, size_class: &SizeClass);

    /// Resolves a variable for `size_class`: the override if present, else
    /// the base value. `None` if no such variable exists.
    fn value_of(&self, name: &str, size_class: Option<&SizeClass>) -> Option<f64>;

    /// Whether variables are available at all.
    fn can_use_layout_variables(&self) -> bool {
        true
    }

    /// Loads variable data before first display.
    ///
    /// This call is synchronous: variables are read as soon as it returns.
    /// A host that loads variables asynchronously finishes loading before
    /// the variables popover is opened, and reports
    /// [`can_use_layout_variables`](Self::can_use_layout_variables) as
    /// `false` until then.
    fn prepare_layout_variables(&mut self) {}

    /// Persists the current variables; called when the variables UI is
    /// dismissed.
    fn persist_layout_variables(&mut self) {}
}

/// Receives serialized variable snapshots from [`InMemoryVariables`].
pub trait VariableSink {
    /// Stores the JSON encoding of a [`VariableSnapshot`].
    fn store(&mut self, json: &str);
}

/// Serializable form of a variable set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableSnapshot {
    /// Variables in name order.
    pub variables: Vec<VariableEntry>,
}

/// One variable in a [`VariableSnapshot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableEntry {
    /// Variable name.
    pub name: String,
    /// Base value.
    pub value: f64,
    /// Size-class overrides.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<VariationEntry>,
}

/// One override in a [`VariableEntry`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariationEntry {
    /// Key of the size class.
    pub size_class: SizeClassKey,
    /// Overriding value.
    pub value: f64,
}

impl VariableSnapshot {
    /// Encodes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// An in-memory [`LayoutVariableProvider`].
#[derive(Default)]
pub struct InMemoryVariables {
    variables: BTreeMap<String, Variations<f64>>,
    sink: Option<Box<dyn VariableSink>>,
}

impl core::fmt::Debug for InMemoryVariables {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryVariables")
            .field("variables", &self.variables)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl InMemoryVariables {
    /// Creates an empty provider with no sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sink receiving snapshots on persist.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn VariableSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds a provider from a snapshot. Variations with unparsable size
    /// class keys are skipped.
    #[must_use]
    pub fn from_snapshot(snapshot: &VariableSnapshot) -> Self {
        let mut out = Self::new();
        for entry in &snapshot.variables {
            let mut values = Variations::new(entry.value);
            for variation in &entry.variations {
                if SizeClass::from_key(&variation.size_class).is_some() {
                    values.set_key(variation.size_class.clone(), variation.value);
                } else {
                    tracing::warn!(
                        variable = %entry.name,
                        key = %variation.size_class,
                        "skipping variation with malformed size class key"
                    );
                }
            }
            out.variables.insert(entry.name.clone(), values);
        }
        out
    }

    /// Captures the current variables.
    #[must_use]
    pub fn snapshot(&self) -> VariableSnapshot {
        VariableSnapshot {
            variables: self
                .variables
                .iter()
                .map(|(name, values)| VariableEntry {
                    name: name.clone(),
                    value: *values.base(),
                    variations: values
                        .variations()
                        .map(|(key, value)| VariationEntry {
                            size_class: key.clone(),
                            value: *value,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Returns whether a variable of that name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

impl LayoutVariableProvider for InMemoryVariables {
    fn layout_variables(&self) -> BTreeMap<String, f64> {
        self.variables
            .iter()
            .map(|(name, values)| (name.clone(), *values.base()))
            .collect()
    }

    fn variations_for_layout_variable(&self, name: &str) -> Vec<VariableVariation> {
        let Some(values) = self.variables.get(name) else {
            return Vec::new();
        };
        values
            .variations()
            .filter_map(|(key, value)| {
                SizeClass::from_key(key).map(|size_class| VariableVariation {
                    size_class,
                    value: *value,
                })
            })
            .collect()
    }

    fn register_layout_variable(&mut self, name: &str, value: f64) {
        self.variables
            .entry(String::from(name))
            .and_modify(|values| values.set_base(value))
            .or_insert_with(|| Variations::new(value));
    }

    fn rename_layout_variable(&mut self, old: &str, new: &str) {
        if old == new || self.variables.contains_key(new) {
            return;
        }
        if let Some(values) = self.variables.remove(old) {
            self.variables.insert(String::from(new), values);
        }
    }

    fn unregister_layout_variable(&mut self, name: &str) {
        self.variables.remove(name);
    }

    fn set_layout_variable_value(&mut self, value: f64, name: &str, size_class: Option<&SizeClass>) {
        match (self.variables.get_mut(name), size_class) {
            (Some(values), class) => values.set(value, class),
            (None, None) => self.register_layout_variable(name, value),
            (None, Some(_)) => {
                tracing::warn!(variable = %name, "variation set for unknown layout variable");
            }
        }
    }

    fn remove_variation_for_layout_variable(&mut self, name: &str, size_class: &SizeClass) {
        if let Some(values) = self.variables.get_mut(name) {
            values.remove(size_class);
        }
    }

    fn value_of(&self, name: &str, size_class: Option<&SizeClass>) -> Option<f64> {
        self.variables
            .get(name)
            .map(|values| *values.resolve(size_class))
    }

    fn persist_layout_variables(&mut self) {
        let snapshot = self.snapshot();
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        match snapshot.to_json() {
            Ok(json) => sink.store(&json),
            Err(err) => tracing::warn!(%err, "failed to encode layout variables"),
        }
    }
}
