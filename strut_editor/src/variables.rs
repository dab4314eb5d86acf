// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout variables list.
//!
//! [`VariableList`] mirrors a [`LayoutVariableProvider`] as display rows: each
//! variable's base row followed by its size-class variations. Every edit is
//! pushed to the provider immediately; the provider persists on
//! [`dismiss`](VariableList::dismiss).

use strut_core::animation::{AnimatedValue, AnimationRequest, AnimationTarget, Easing};
use strut_core::size_class::SizeClass;
use strut_core::variables::LayoutVariableProvider;
use strut_core::view::ViewStore;

use crate::config::EditorConfig;

/// Stem of generated variable names.
pub const NEW_VARIABLE: &str = "new variable";

/// One row: a base value or a size-class variation.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableRow {
    /// Variable name.
    pub name: String,
    /// The size class of a variation row, `None` for the base row.
    pub size_class: Option<SizeClass>,
    /// Value shown in the row.
    pub value: f64,
}

/// Result of a rename.
#[derive(Clone, Debug, PartialEq)]
pub enum RenameOutcome {
    /// The variable and every reference to it were renamed.
    Renamed,
    /// The name did not change.
    Unchanged,
    /// The name was empty or taken; the row keeps its old name and the
    /// name field should shake.
    Rejected {
        /// Shake animation for the name field.
        shake: AnimationRequest,
    },
}

/// Returns the first of `new variable`, `new variable 1`, `new variable 2`,
/// … for which `taken` is false.
pub fn unique_name(mut taken: impl FnMut(&str) -> bool) -> String {
    if !taken(NEW_VARIABLE) {
        return String::from(NEW_VARIABLE);
    }
    let mut suffix = 1_u32;
    loop {
        let name = format!("{NEW_VARIABLE} {suffix}");
        if !taken(&name) {
            return name;
        }
        suffix += 1;
    }
}

/// Display rows for the layout variables of a provider.
#[derive(Clone, Debug, Default)]
pub struct VariableList {
    rows: Vec<VariableRow>,
    committed: Option<Vec<VariableRow>>,
    update_depth: u32,
}

impl VariableList {
    /// Builds the rows from `provider`, base names in order.
    #[must_use]
    pub fn from_provider(provider: &dyn LayoutVariableProvider) -> Self {
        let mut list = Self::default();
        list.reload(provider);
        list
    }

    /// Rebuilds the rows from `provider`.
    pub fn reload(&mut self, provider: &dyn LayoutVariableProvider) {
        self.rows.clear();
        for (name, value) in provider.layout_variables() {
            let variations = provider.variations_for_layout_variable(&name);
            self.rows.push(VariableRow {
                name: name.clone(),
                size_class: None,
                value,
            });
            self.rows
                .extend(variations.into_iter().map(|v| VariableRow {
                    name: name.clone(),
                    size_class: Some(v.size_class),
                    value: v.value,
                }));
        }
    }

    /// The rows readers should display.
    ///
    /// While an update is open this is the snapshot taken by
    /// [`begin_updates`](Self::begin_updates).
    #[must_use]
    pub fn rows(&self) -> &[VariableRow] {
        self.committed.as_deref().unwrap_or(&self.rows)
    }

    /// Opens an update; readers keep seeing the current rows until the
    /// matching [`commit_updates`](Self::commit_updates). Updates nest.
    pub fn begin_updates(&mut self) {
        if self.update_depth == 0 {
            self.committed = Some(self.rows.clone());
        }
        self.update_depth += 1;
    }

    /// Closes an update, publishing the edited rows when the outermost one
    /// closes.
    ///
    /// # Panics
    ///
    /// Panics without a matching [`begin_updates`](Self::begin_updates).
    pub fn commit_updates(&mut self) {
        assert!(self.update_depth > 0, "commit_updates without begin_updates");
        self.update_depth -= 1;
        if self.update_depth == 0 {
            self.committed = None;
        }
    }

    /// Returns whether an update is open.
    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    /// Registers a new variable with value 0 under a unique name and appends
    /// its row. Returns the row index.
    pub fn add_variable(&mut self, provider: &mut dyn LayoutVariableProvider) -> usize {
        let existing = provider.layout_variables();
        let name = unique_name(|n| existing.contains_key(n) || self.rows.iter().any(|r| r.name == n));
        provider.register_layout_variable(&name, 0.0);
        tracing::debug!(%name, "added layout variable");
        self.rows.push(VariableRow {
            name,
            size_class: None,
            value: 0.0,
        });
        self.rows.len() - 1
    }

    /// Adds a `size_class` variation of the variable in `row`, starting at
    /// its base value, after the variable's last row.
    ///
    /// Returns the row of the variation, which is the existing one if the
    /// variable already varies for `size_class`, or the base row for the
    /// all-matching class. `None` if `row` is out of range.
    pub fn add_variation(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        row: usize,
        size_class: SizeClass,
    ) -> Option<usize> {
        let name = self.rows.get(row)?.name.clone();
        let base = self.base_row(&name)?;
        if size_class.is_all() {
            return Some(base);
        }
        let key = size_class.key();
        if let Some(existing) = self.rows.iter().position(|r| {
            r.name == name && r.size_class.as_ref().is_some_and(|c| c.key() == key)
        }) {
            return Some(existing);
        }

        let value = self.rows[base].value;
        let last = self
            .rows
            .iter()
            .rposition(|r| r.name == name)
            .unwrap_or(base);
        provider.set_layout_variable_value(value, &name, Some(&size_class));
        tracing::debug!(%name, size_class = %key, "added layout variable variation");
        self.rows.insert(
            last + 1,
            VariableRow {
                name,
                size_class: Some(size_class),
                value,
            },
        );
        Some(last + 1)
    }

    /// Renames the variable in `row`, along with constraint constants that
    /// reference it.
    pub fn rename(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        store: &mut ViewStore,
        row: usize,
        new_name: &str,
        config: &EditorConfig,
    ) -> RenameOutcome {
        let Some(old) = self.rows.get(row).map(|r| r.name.clone()) else {
            return RenameOutcome::Unchanged;
        };
        let new_name = new_name.trim();
        if new_name == old {
            return RenameOutcome::Unchanged;
        }
        if new_name.is_empty() || provider.layout_variables().contains_key(new_name) {
            tracing::debug!(%old, new = %new_name, "rejected variable rename");
            return RenameOutcome::Rejected {
                shake: shake_request(row, config),
            };
        }
        provider.rename_layout_variable(&old, new_name);
        let updated = store.rename_variable_references(&old, new_name);
        tracing::debug!(%old, new = %new_name, constraints = updated, "renamed layout variable");
        for r in self.rows.iter_mut().filter(|r| r.name == old) {
            r.name = String::from(new_name);
        }
        RenameOutcome::Renamed
    }

    /// Removes `row`.
    ///
    /// A variation row drops only that override. A base row unregisters the
    /// variable after removing each of its variations.
    pub fn remove(&mut self, provider: &mut dyn LayoutVariableProvider, store: &mut ViewStore, row: usize) {
        let Some(removed) = self.rows.get(row).cloned() else {
            return;
        };
        match &removed.size_class {
            Some(size_class) => {
                provider.remove_variation_for_layout_variable(&removed.name, size_class);
                self.rows.remove(row);
            }
            None => {
                for variation in provider.variations_for_layout_variable(&removed.name) {
                    provider.remove_variation_for_layout_variable(&removed.name, &variation.size_class);
                }
                provider.unregister_layout_variable(&removed.name);
                self.rows.retain(|r| r.name != removed.name);
            }
        }
        store.invalidate_layout_variable(&removed.name);
        tracing::debug!(name = %removed.name, variation = removed.size_class.is_some(), "removed layout variable row");
    }

    /// Sets the value of `row` and invalidates the layout of views whose
    /// constraints use the variable.
    pub fn set_value(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        store: &mut ViewStore,
        row: usize,
        value: f64,
    ) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.value = value;
        provider.set_layout_variable_value(value, &r.name, r.size_class.as_ref());
        store.invalidate_layout_variable(&r.name);
    }

    /// Persists the provider's variables; called when the list is dismissed.
    pub fn dismiss(&self, provider: &mut dyn LayoutVariableProvider) {
        provider.persist_layout_variables();
    }

    fn base_row(&self, name: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.name == name && r.size_class.is_none())
    }
}

/// The horizontal shake played on a rejected name field.
#[must_use]
pub fn shake_request(row: usize, config: &EditorConfig) -> AnimationRequest {
    AnimationRequest::new(
        AnimationTarget::Element(format!("variable-name-{row}")),
        config.shake,
        Easing::Linear,
    )
    .with(
        "translate-x",
        AnimatedValue::Keyframes(config.shake_keyframes.clone()),
    )
}
