// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout variables popover.

use core::time::Duration;

use kurbo::{Rect, Size};
use strut_core::animation::{AnimatedValue, AnimationDriver, AnimationRequest, AnimationTarget};
use strut_core::size_class::SizeClass;
use strut_core::variables::LayoutVariableProvider;
use strut_core::view::ViewStore;

use super::{Continuation, LayoutEditor};
use crate::popover::{Popover, PopoverError, PopoverPlacement};
use crate::variables::{RenameOutcome, VariableList};

const POPOVER_SIZE: Size = Size::new(320.0, 400.0);

impl LayoutEditor {
    /// Opens the variables popover next to `anchor`.
    ///
    /// Returns `Ok(None)` if the provider cannot supply variables.
    ///
    /// # Errors
    ///
    /// Returns [`PopoverError::NoAnchor`] without an anchor.
    pub fn open_variables(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        anchor: Option<Rect>,
        bounds: Rect,
    ) -> Result<Option<PopoverPlacement>, PopoverError> {
        if !provider.can_use_layout_variables() {
            tracing::debug!("layout variables unavailable");
            return Ok(None);
        }
        let mut popover = Popover::new(POPOVER_SIZE, bounds);
        popover.anchor = anchor;
        let placement = popover.show()?;
        provider.prepare_layout_variables();
        self.variables = Some(VariableList::from_provider(provider));
        self.focused_variable = None;
        self.shaking = None;
        Ok(Some(placement))
    }

    /// Closes the variables popover and persists the variables.
    pub fn close_variables(&mut self, provider: &mut dyn LayoutVariableProvider) {
        if let Some(list) = self.variables.take() {
            list.dismiss(provider);
        }
        self.focused_variable = None;
    }

    /// The open variables list.
    #[must_use]
    pub fn variables(&self) -> Option<&VariableList> {
        self.variables.as_ref()
    }

    /// Row whose name field has focus.
    #[must_use]
    pub fn focused_variable(&self) -> Option<usize> {
        self.focused_variable
    }

    /// Row whose name field is shaking after a rejected rename.
    #[must_use]
    pub fn shaking_variable(&self) -> Option<usize> {
        self.shaking
    }

    /// Adds a variable. Its row is inserted with an animation, after which
    /// its name field takes focus. Returns the row, or `None` when the
    /// popover is closed.
    pub fn add_variable(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        animations: &mut dyn AnimationDriver,
    ) -> Option<usize> {
        let list = self.variables.as_mut()?;
        list.begin_updates();
        let row = list.add_variable(provider);
        list.commit_updates();
        self.animate_insertion(animations, row);
        Some(row)
    }

    /// Adds a `size_class` variation of the variable in `row`.
    pub fn add_variable_variation(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        animations: &mut dyn AnimationDriver,
        row: usize,
        size_class: SizeClass,
    ) -> Option<usize> {
        let list = self.variables.as_mut()?;
        let before = list.rows().len();
        list.begin_updates();
        let inserted = list.add_variation(provider, row, size_class);
        list.commit_updates();
        let inserted = inserted?;
        if list.rows().len() > before {
            self.animate_insertion(animations, inserted);
        }
        Some(inserted)
    }

    /// Renames the variable in `row`. A rejected name shakes the field.
    pub fn rename_variable(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        store: &mut ViewStore,
        animations: &mut dyn AnimationDriver,
        row: usize,
        name: &str,
    ) -> Option<RenameOutcome> {
        let list = self.variables.as_mut()?;
        let outcome = list.rename(provider, store, row, name, &self.config);
        if let RenameOutcome::Rejected { shake } = &outcome {
            self.shaking = Some(row);
            self.animate(animations, shake.clone(), Continuation::ShakeFinished(row));
        }
        Some(outcome)
    }

    /// Removes `row`, cascading to variations for a base row.
    pub fn remove_variable(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        store: &mut ViewStore,
        row: usize,
    ) {
        let Some(list) = self.variables.as_mut() else {
            return;
        };
        list.begin_updates();
        list.remove(provider, store, row);
        list.commit_updates();
        if self.focused_variable == Some(row) {
            self.focused_variable = None;
        }
    }

    /// Sets the value of `row`.
    pub fn set_variable_value(
        &mut self,
        provider: &mut dyn LayoutVariableProvider,
        store: &mut ViewStore,
        row: usize,
        value: f64,
    ) {
        if let Some(list) = self.variables.as_mut() {
            list.set_value(provider, store, row, value);
        }
    }

    fn animate_insertion(&mut self, animations: &mut dyn AnimationDriver, row: usize) {
        let request = AnimationRequest::new(
            AnimationTarget::Element(format!("variable-row-{row}")),
            self.config.insertion,
            self.config.transition_easing,
        )
        .with("opacity", AnimatedValue::Number(1.0));
        self.focused_variable = None;
        if request.duration == Duration::ZERO {
            self.focused_variable = Some(row);
            return;
        }
        self.animate(animations, request, Continuation::FocusVariable(row));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use strut_core::animation::ImmediateAnimations;
    use strut_core::size_class::SizeClass;
    use strut_core::variables::{InMemoryVariables, LayoutVariableProvider};
    use strut_core::view::ViewStore;

    use crate::config::EditorConfig;
    use crate::editor::LayoutEditor;
    use crate::popover::PopoverError;
    use crate::variables::RenameOutcome;
    use crate::variables::tests::RecordingProvider;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 1024.0, 768.0)
    }

    fn anchor() -> Option<Rect> {
        Some(Rect::new(500.0, 10.0, 540.0, 30.0))
    }

    fn editor() -> (ViewStore, LayoutEditor) {
        let mut store = ViewStore::new();
        let root = store.create_view();
        store.set_frame(root, bounds());
        let editor = LayoutEditor::open(&mut store, root, EditorConfig::default());
        (store, editor)
    }

    struct Unavailable;

    impl LayoutVariableProvider for Unavailable {
        fn layout_variables(&self) -> std::collections::BTreeMap<String, f64> {
            std::collections::BTreeMap::new()
        }
        fn variations_for_layout_variable(
            &self,
            _: &str,
        ) -> Vec<strut_core::variables::VariableVariation> {
            Vec::new()
        }
        fn register_layout_variable(&mut self, _: &str, _: f64) {}
        fn rename_layout_variable(&mut self, _: &str, _: &str) {}
        fn unregister_layout_variable(&mut self, _: &str) {}
        fn set_layout_variable_value(&mut self, _: f64, _: &str, _: Option<&SizeClass>) {}
        fn remove_variation_for_layout_variable(&mut self, _: &str, _: &SizeClass) {}
        fn value_of(&self, _: &str, _: Option<&SizeClass>) -> Option<f64> {
            None
        }
        fn can_use_layout_variables(&self) -> bool {
            false
        }
    }

    #[test]
    fn popover_needs_an_anchor_and_usable_provider() {
        let (_, mut editor) = editor();
        let mut vars = InMemoryVariables::new();
        assert_eq!(
            editor.open_variables(&mut vars, None, bounds()),
            Err(PopoverError::NoAnchor)
        );
        assert!(editor.variables().is_none());
        assert_eq!(editor.open_variables(&mut Unavailable, anchor(), bounds()), Ok(None));
        assert!(editor.open_variables(&mut vars, anchor(), bounds()).unwrap().is_some());
        assert!(editor.variables().is_some());
    }

    #[test]
    fn list_reflects_variables_loaded_during_prepare() {
        let (_, mut editor) = editor();
        let mut provider = RecordingProvider::default();
        provider.staged.push((String::from("gutter"), 12.0));

        editor.open_variables(&mut provider, None, bounds()).unwrap_err();
        assert!(provider.calls.is_empty(), "no anchor, no prepare");

        editor.open_variables(&mut provider, anchor(), bounds()).unwrap();
        assert_eq!(provider.calls, ["prepare"]);
        let rows = editor.variables().unwrap().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "gutter");
        assert_eq!(rows[0].value, 12.0);
    }

    #[test]
    fn added_variable_takes_focus_after_its_animation() {
        let (store, mut editor) = editor();
        let mut vars = InMemoryVariables::new();
        let mut animations = ImmediateAnimations::new();
        editor.open_variables(&mut vars, anchor(), bounds()).unwrap();

        assert_eq!(editor.add_variable(&mut vars, &mut animations), Some(0));
        assert_eq!(editor.add_variable(&mut vars, &mut animations), Some(1));
        assert_eq!(editor.focused_variable(), None);
        assert_eq!(editor.poll_animations(&store, &mut animations), 2);
        assert_eq!(editor.focused_variable(), Some(1));
        assert_eq!(
            vars.layout_variables().into_keys().collect::<Vec<_>>(),
            ["new variable", "new variable 1"]
        );
        // Each continuation runs once.
        assert_eq!(editor.poll_animations(&store, &mut animations), 0);
    }

    #[test]
    fn rejected_rename_shakes_until_the_animation_ends() {
        let (mut store, mut editor) = editor();
        let mut vars = InMemoryVariables::new();
        vars.register_layout_variable("gap", 8.0);
        vars.register_layout_variable("margin", 16.0);
        let mut animations = ImmediateAnimations::new();
        editor.open_variables(&mut vars, anchor(), bounds()).unwrap();

        let outcome = editor
            .rename_variable(&mut vars, &mut store, &mut animations, 0, "margin")
            .unwrap();
        assert!(matches!(outcome, RenameOutcome::Rejected { .. }));
        assert_eq!(editor.shaking_variable(), Some(0));
        assert_eq!(editor.variables().unwrap().rows()[0].name, "gap");
        editor.poll_animations(&store, &mut animations);
        assert_eq!(editor.shaking_variable(), None);

        let outcome = editor
            .rename_variable(&mut vars, &mut store, &mut animations, 0, "spacing")
            .unwrap();
        assert_eq!(outcome, RenameOutcome::Renamed);
        assert!(vars.contains("spacing"));
    }

    #[test]
    fn closing_persists_and_removal_cascades() {
        let (mut store, mut editor) = editor();
        let mut provider = RecordingProvider::default();
        provider.inner.register_layout_variable("gap", 8.0);
        let compact = SizeClass::all().with_max_width(600.0);
        let tall = SizeClass::all().with_max_height(900.0);
        provider
            .inner
            .set_layout_variable_value(4.0, "gap", Some(&compact));
        let mut animations = ImmediateAnimations::new();
        editor.open_variables(&mut provider, anchor(), bounds()).unwrap();
        assert_eq!(
            editor.add_variable_variation(&mut provider, &mut animations, 0, tall),
            Some(2)
        );
        assert_eq!(editor.variables().unwrap().rows().len(), 3);

        provider.calls.clear();
        editor.remove_variable(&mut provider, &mut store, 0);
        assert_eq!(provider.calls.len(), 3);
        assert!(editor.variables().unwrap().rows().is_empty());

        provider.calls.clear();
        editor.close_variables(&mut provider);
        assert_eq!(provider.calls, ["persist"]);
        assert!(editor.variables().is_none());
    }
}
