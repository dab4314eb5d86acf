// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The inspector panel model and its edits.
//!
//! The inspector shows the current selection. Edits made while a size class
//! is active are stored as variations of that class; with no active class
//! they change base values.

use kurbo::Rect;
use strut_core::constraint::{Constant, ConstraintRef, Priority, Relation};
use strut_core::size_class::SizeClass;
use strut_core::variables::LayoutVariableProvider;
use strut_core::view::{EffectiveProperties, PropertyValue, ViewId, ViewProperty, ViewStore};

use super::LayoutEditor;
use crate::selection::Selection;

/// A constraint field that can vary by size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InspectorField {
    /// The constant.
    Constant,
    /// The priority.
    Priority,
    /// The active flag.
    Active,
}

/// Which constraint fields vary for the active size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VariedFields {
    /// The constant has a variation.
    pub constant: bool,
    /// The priority has a variation.
    pub priority: bool,
    /// The active flag has a variation.
    pub active: bool,
}

/// Inspector contents for one selected view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewInspector {
    /// The view.
    pub view: ViewId,
    /// Display name.
    pub name: String,
    /// Frame in workspace coordinates.
    pub frame: Rect,
    /// Properties in effect under the active size class.
    pub properties: EffectiveProperties,
    /// Properties with a variation for the active size class.
    pub varied: Vec<ViewProperty>,
    /// Registered constraints naming the view, collections collapsed.
    pub constraints: Vec<ConstraintRef>,
}

/// Inspector contents for a selected constraint or collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintInspector {
    /// The constraint.
    pub constraint: ConstraintRef,
    /// The view it was selected from.
    pub reference: ViewId,
    /// Equation text.
    pub description: String,
    /// Text of the constant field.
    pub constant_text: String,
    /// The last constant edit was rejected.
    pub invalid: bool,
    /// Priority in effect.
    pub priority: Priority,
    /// Relation of the (first) atomic constraint.
    pub relation: Relation,
    /// Multiplier of the (first) atomic constraint.
    pub multiplier: f64,
    /// Active under the active size class.
    pub active: bool,
    /// The size class edits apply to, `None` for base values.
    pub size_class: Option<SizeClass>,
    /// Fields varied for [`size_class`](Self::size_class).
    pub varied: VariedFields,
}

/// What the inspector shows.
#[derive(Clone, Debug, PartialEq)]
pub enum InspectorModel {
    /// Nothing selected.
    Empty,
    /// One view.
    View(ViewInspector),
    /// Several views.
    Views(Vec<ViewId>),
    /// A constraint or collection.
    Constraint(ConstraintInspector),
}

/// Autocomplete entries for a constant field: variable names starting with
/// `prefix`, then `-`-negated names starting with `prefix`.
#[must_use]
pub fn constant_suggestions(provider: &dyn LayoutVariableProvider, prefix: &str) -> Vec<String> {
    let names: Vec<String> = provider.layout_variables().into_keys().collect();
    let plain = names.iter().filter(|n| n.starts_with(prefix)).cloned();
    let negated = names
        .iter()
        .map(|n| format!("-{n}"))
        .filter(|n| n.starts_with(prefix));
    plain.chain(negated).collect()
}

impl LayoutEditor {
    /// Builds the inspector for the current selection.
    #[must_use]
    pub fn inspector(&self, store: &ViewStore) -> InspectorModel {
        match &self.selection {
            Selection::NoSelection => InspectorModel::Empty,
            Selection::ViewSelected(view) => InspectorModel::View(view_inspector(store, *view)),
            Selection::MultipleViewsSelected(views) => InspectorModel::Views(views.clone()),
            Selection::ConstraintSelected {
                constraint,
                reference,
            } => {
                let Some(&first) = store.atomics(*constraint).first() else {
                    return InspectorModel::Empty;
                };
                let size_class = store.active_size_class().cloned();
                let c = store.constraint(first);
                let varied = size_class.as_ref().map_or_else(VariedFields::default, |class| VariedFields {
                    constant: c.constant().has_variation(class),
                    priority: c.priority().has_variation(class),
                    active: c.active().has_variation(class),
                });
                InspectorModel::Constraint(ConstraintInspector {
                    constraint: *constraint,
                    reference: *reference,
                    description: store.describe_ref(*constraint),
                    constant_text: store.effective_constant(*constraint).to_string(),
                    invalid: self.constant_invalid,
                    priority: store.effective_priority(*constraint),
                    relation: c.relation(),
                    multiplier: c.multiplier(),
                    active: store.is_active(*constraint),
                    size_class,
                    varied,
                })
            }
        }
    }

    /// Sets the selected constraint's constant from field text.
    ///
    /// Accepts a number, a variable name, or `-` and a variable name. Text
    /// that is neither, or names an unknown variable, marks the field
    /// invalid and leaves the constraint unchanged. Returns whether the
    /// constant was set.
    pub fn set_constant_text(
        &mut self,
        store: &mut ViewStore,
        provider: &dyn LayoutVariableProvider,
        text: &str,
    ) -> bool {
        let Some(constraint) = self.selected_constraint(store) else {
            return false;
        };
        let constant = Constant::parse(text).filter(|c| match c.variable_name() {
            Some(name) => provider.layout_variables().contains_key(name),
            None => true,
        });
        let Some(constant) = constant else {
            tracing::debug!(%text, "rejected constant text");
            self.constant_invalid = true;
            return false;
        };
        self.constant_invalid = false;
        let size_class = store.active_size_class().cloned();
        store.set_constant_for(constraint, constant, size_class.as_ref());
        self.redraw_overlay(store);
        true
    }

    /// Sets the selected constraint's priority, rounded and clamped to
    /// `0..=1000`.
    pub fn set_priority(&mut self, store: &mut ViewStore, priority: f64) {
        let Some(constraint) = self.selected_constraint(store) else {
            return;
        };
        let size_class = store.active_size_class().cloned();
        store.set_priority_for(constraint, Priority::from_f64(priority), size_class.as_ref());
        self.redraw_overlay(store);
    }

    /// Activates or deactivates the selected constraint.
    ///
    /// Deactivating at the base level selects the reference view, since the
    /// constraint no longer appears in its list.
    pub fn set_active(&mut self, store: &mut ViewStore, active: bool) {
        let Selection::ConstraintSelected {
            constraint,
            reference,
        } = self.selection.clone()
        else {
            return;
        };
        if !store.is_ref_alive(constraint) {
            return;
        }
        match store.active_size_class().cloned() {
            Some(class) => {
                store.set_active_for(constraint, active, Some(&class));
                self.redraw_overlay(store);
            }
            None => {
                store.set_active(constraint, active);
                if active {
                    self.redraw_overlay(store);
                } else {
                    self.select(store, Selection::ViewSelected(reference));
                }
            }
        }
    }

    /// Drops the active size class's variation of `field` from the
    /// selected constraint. No-op without an active size class.
    pub fn remove_variation(&mut self, store: &mut ViewStore, field: InspectorField) {
        let Some(constraint) = self.selected_constraint(store) else {
            return;
        };
        let Some(class) = store.active_size_class().cloned() else {
            return;
        };
        match field {
            InspectorField::Constant => store.remove_constant_variation(constraint, &class),
            InspectorField::Priority => store.remove_priority_variation(constraint, &class),
            InspectorField::Active => store.remove_active_variation(constraint, &class),
        }
        self.redraw_overlay(store);
    }

    /// Sets a property on every selected view, as a variation of the active
    /// size class if there is one.
    pub fn set_view_property(&mut self, store: &mut ViewStore, value: PropertyValue) {
        let size_class = store.active_size_class().cloned();
        for &view in self.selection.views() {
            if store.is_alive(view) {
                store.set_property_variation(view, value.clone(), size_class.as_ref());
            }
        }
    }

    /// Drops the active size class's variation of `property` from every
    /// selected view.
    pub fn remove_view_property_variation(&mut self, store: &mut ViewStore, property: ViewProperty) {
        let Some(class) = store.active_size_class().cloned() else {
            return;
        };
        for &view in self.selection.views() {
            if store.is_alive(view) {
                store.remove_property_variation(view, property, &class);
            }
        }
    }

    fn selected_constraint(&self, store: &ViewStore) -> Option<ConstraintRef> {
        self.selection
            .constraint()
            .filter(|c| store.is_ref_alive(*c))
    }

    fn redraw_overlay(&mut self, store: &ViewStore) {
        self.overlay
            .redraw(store, &self.selection, self.config.line_fan_step);
    }
}

fn view_inspector(store: &ViewStore, view: ViewId) -> ViewInspector {
    let varied = store.active_size_class().map_or_else(Vec::new, |class| {
        [ViewProperty::Opacity, ViewProperty::Hidden, ViewProperty::StyleClass]
            .into_iter()
            .filter(|p| store.has_property_variation(view, *p, class))
            .collect()
    });
    let mut constraints: Vec<ConstraintRef> = Vec::new();
    for id in store.local_constraints(view) {
        let selectable = store.selectable_ref(id);
        if !constraints.contains(&selectable) {
            constraints.push(selectable);
        }
    }
    ViewInspector {
        view,
        name: store.label(view),
        frame: store.frame_in_root(view),
        properties: store.effective_properties(view),
        varied,
        constraints,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use strut_core::constraint::{ConstraintRef, Priority};
    use strut_core::size_class::SizeClass;
    use strut_core::variables::{InMemoryVariables, LayoutVariableProvider};
    use strut_core::view::{PropertyValue, ViewId, ViewProperty, ViewStore};

    use super::*;
    use crate::config::EditorConfig;

    fn editor_with_constraint() -> (ViewStore, LayoutEditor, ViewId, ConstraintRef) {
        let mut store = ViewStore::new();
        let root = store.create_view();
        store.set_frame(root, Rect::new(0.0, 0.0, 400.0, 300.0));
        let a = store.create_view();
        let b = store.create_view();
        store.add_subview(root, a);
        store.add_subview(root, b);
        store.set_name(a, "a");
        store.set_name(b, "b");
        let id = store
            .create_constraint(b.leading().equal_to(a.trailing()).plus(8.0))
            .unwrap();
        store.set_active(id, true);
        let mut editor = LayoutEditor::open(&mut store, root, EditorConfig::default());
        let constraint = ConstraintRef::Atomic(id);
        editor.select(
            &store,
            Selection::ConstraintSelected {
                constraint,
                reference: a,
            },
        );
        (store, editor, a, constraint)
    }

    #[test]
    fn constraint_inspector_reflects_the_selection() {
        let (store, editor, a, constraint) = editor_with_constraint();
        let InspectorModel::Constraint(model) = editor.inspector(&store) else {
            panic!("expected a constraint inspector");
        };
        assert_eq!(model.constraint, constraint);
        assert_eq!(model.reference, a);
        assert_eq!(model.description, "b.leading = a.trailing + 8");
        assert_eq!(model.constant_text, "8");
        assert!(model.active);
        assert_eq!(model.size_class, None);
        assert_eq!(model.varied, VariedFields::default());
    }

    #[test]
    fn constant_text_accepts_known_variables_only() {
        let (mut store, mut editor, _, constraint) = editor_with_constraint();
        let mut vars = InMemoryVariables::new();
        vars.register_layout_variable("gap", 12.0);

        assert!(!editor.set_constant_text(&mut store, &vars, "margin"));
        assert!(editor.constant_invalid());
        assert_eq!(store.effective_constant(constraint).literal(), Some(8.0));

        assert!(editor.set_constant_text(&mut store, &vars, "-gap"));
        assert!(!editor.constant_invalid());
        assert_eq!(store.effective_constant(constraint).variable_name(), Some("gap"));

        assert!(!editor.set_constant_text(&mut store, &vars, "  "));
        assert!(editor.set_constant_text(&mut store, &vars, "16"));
        assert_eq!(store.effective_constant(constraint).literal(), Some(16.0));
    }

    #[test]
    fn edits_go_to_the_active_size_class() {
        let (mut store, mut editor, _, constraint) = editor_with_constraint();
        let compact = SizeClass::all().with_max_width(600.0);
        store.set_active_size_class(Some(compact.clone()));

        editor.set_priority(&mut store, 749.6);
        let vars = InMemoryVariables::new();
        editor.set_constant_text(&mut store, &vars, "20");
        let InspectorModel::Constraint(model) = editor.inspector(&store) else {
            panic!("expected a constraint inspector");
        };
        assert_eq!(model.priority, Priority::new(750));
        assert!(model.varied.constant && model.varied.priority && !model.varied.active);

        store.set_active_size_class(None);
        assert_eq!(store.effective_priority(constraint), Priority::REQUIRED);
        assert_eq!(store.effective_constant(constraint).literal(), Some(8.0));

        store.set_active_size_class(Some(compact));
        editor.remove_variation(&mut store, InspectorField::Constant);
        assert_eq!(store.effective_constant(constraint).literal(), Some(8.0));
        assert_eq!(store.effective_priority(constraint), Priority::new(750));
    }

    #[test]
    fn base_deactivation_returns_to_the_reference_view() {
        let (mut store, mut editor, a, constraint) = editor_with_constraint();
        editor.set_active(&mut store, false);
        assert_eq!(editor.selection(), &Selection::ViewSelected(a));
        assert!(store.is_ref_alive(constraint));
        assert!(store.local_constraints(a).is_empty());

        let InspectorModel::View(model) = editor.inspector(&store) else {
            panic!("expected a view inspector");
        };
        assert_eq!(model.name, "a");
        assert!(model.constraints.is_empty());
    }

    #[test]
    fn deactivation_in_a_size_class_keeps_the_constraint_selected() {
        let (mut store, mut editor, _, constraint) = editor_with_constraint();
        store.set_active_size_class(Some(SizeClass::all().with_max_width(600.0)));
        editor.set_active(&mut store, false);
        assert_eq!(editor.selection().constraint(), Some(constraint));
        assert!(!store.is_active(constraint));
    }

    #[test]
    fn view_properties_vary_per_class() {
        let (mut store, mut editor, a, _) = editor_with_constraint();
        editor.select(&store, Selection::ViewSelected(a));
        let compact = SizeClass::all().with_max_width(600.0);
        store.set_active_size_class(Some(compact.clone()));
        editor.set_view_property(&mut store, PropertyValue::Hidden(true));

        let InspectorModel::View(model) = editor.inspector(&store) else {
            panic!("expected a view inspector");
        };
        assert!(model.properties.hidden);
        assert_eq!(model.varied, vec![ViewProperty::Hidden]);
        assert_eq!(model.constraints.len(), 1);

        editor.remove_view_property_variation(&mut store, ViewProperty::Hidden);
        assert!(!store.has_property_variation(a, ViewProperty::Hidden, &compact));
    }

    #[test]
    fn suggestions_list_plain_then_negated_names() {
        let mut vars = InMemoryVariables::new();
        vars.register_layout_variable("gap", 8.0);
        vars.register_layout_variable("gutter", 16.0);
        vars.register_layout_variable("margin", 20.0);
        assert_eq!(
            constant_suggestions(&vars, "g"),
            ["gap", "gutter"].map(String::from)
        );
        assert_eq!(
            constant_suggestions(&vars, "-m"),
            ["-margin"].map(String::from)
        );
        assert_eq!(constant_suggestions(&vars, "").len(), 6);
    }
}
