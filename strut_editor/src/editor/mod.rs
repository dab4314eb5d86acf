// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout editor session.
//!
//! A [`LayoutEditor`] takes a view subtree out of its superview, lays it out
//! in a workspace, and turns pointer and keyboard input into selection
//! changes, frame displacement and constraint edits. The host keeps
//! ownership of the [`ViewStore`] and the collaborators; the editor borrows
//! them per call.
//!
//! ```text
//!   PointerEvent ──► GestureTracker ──► GestureOutcome
//!                                            │
//!        ┌───────────────────────────────────┘
//!        ▼
//!   Selection ──► Overlay::redraw() ──► ConstraintLine[]
//!        │
//!        └──► inspector() ──► InspectorModel
//! ```

mod inspector;
mod preview;
mod variable_popover;

use std::collections::BTreeMap;

use core::time::Duration;

use kurbo::{Rect, Size, Vec2};
use strut_core::animation::{AnimationDriver, AnimationRequest, AnimationTicket};
use strut_core::constraint::ConstraintRef;
use strut_core::variables::LayoutVariableProvider;
use strut_core::view::{Placement, ViewId, ViewStore};

use crate::config::EditorConfig;
use crate::gesture::{Gesture, GestureOutcome, GestureTracker};
use crate::input::{Button, KeyEvent, PointerEvent};
use crate::menu::{Menu, MenuDelegate};
use crate::options::{ConstraintMenu, ConstraintOption, MultiOption, multi_selection_options};
use crate::overlay::{Overlay, hit_view, to_workspace};
use crate::selection::Selection;
use crate::shortcut::{EditorCommand, ShortcutMap};
use crate::variables::VariableList;
use crate::window::{WindowId, WindowManager, WindowStyle};

pub use inspector::{
    ConstraintInspector, InspectorField, InspectorModel, VariedFields, ViewInspector,
    constant_suggestions,
};

/// Work resumed when an animation finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Continuation {
    /// Redraw overlays from the settled frames.
    RedrawOverlay,
    /// Focus the name field of a freshly inserted variable row.
    FocusVariable(usize),
    /// A rejection shake finished.
    ShakeFinished(usize),
}

/// An editing session over one view subtree.
#[derive(Debug)]
pub struct LayoutEditor {
    root: ViewId,
    placement: Option<Placement>,
    config: EditorConfig,
    selection: Selection,
    overlay: Overlay,
    gesture: GestureTracker,
    menu: Option<ConstraintMenu>,
    constraint_mode: bool,
    scale: f64,
    workspace: Size,
    invalid_layout: bool,
    constant_invalid: bool,
    suppress_until: Option<Duration>,
    pending: BTreeMap<AnimationTicket, Continuation>,
    variables: Option<VariableList>,
    focused_variable: Option<usize>,
    shaking: Option<usize>,
    shortcuts: ShortcutMap,
    windows: WindowManager,
    main_window: WindowId,
    inspector_window: WindowId,
}

impl LayoutEditor {
    /// Opens an editor on `root`.
    ///
    /// `root` is taken out of its superview, remembering its position, and
    /// becomes the root of the workspace at its current size.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn open(store: &mut ViewStore, root: ViewId, config: EditorConfig) -> Self {
        let placement = store.take_from_superview(root);
        let workspace = store.frame(root).size();
        store.set_needs_layout(root);

        let mut windows = WindowManager::new();
        let inspector_window = windows.open(
            "Inspector",
            WindowStyle::Tool,
            Rect::from_origin_size((workspace.width, 0.0), (280.0, workspace.height)),
            None,
        );
        let main_window = windows.open(
            "Layout Editor",
            WindowStyle::Normal,
            Rect::from_origin_size((0.0, 0.0), workspace),
            None,
        );
        tracing::debug!(?root, detached = placement.is_some(), "opened layout editor");

        Self {
            root,
            placement,
            config,
            selection: Selection::NoSelection,
            overlay: Overlay::new(),
            gesture: GestureTracker::new(),
            menu: None,
            constraint_mode: false,
            scale: 1.0,
            workspace,
            invalid_layout: false,
            constant_invalid: false,
            suppress_until: None,
            pending: BTreeMap::new(),
            variables: None,
            focused_variable: None,
            shaking: None,
            shortcuts: ShortcutMap::default(),
            windows,
            main_window,
            inspector_window,
        }
    }

    /// Closes the editor and puts the subtree back where it was.
    ///
    /// Presentation offsets left by drags are cleared. If the original
    /// superview no longer exists the subtree stays detached.
    pub fn close(mut self, store: &mut ViewStore) {
        self.gesture.cancel();
        self.overlay.clear();
        self.selection = Selection::NoSelection;
        self.windows.close(self.inspector_window);
        self.windows.close(self.main_window);
        if !store.is_alive(self.root) {
            return;
        }
        let views: Vec<ViewId> = store.descendants(self.root).collect();
        for view in views {
            if store.frame_offset(view) != Vec2::ZERO {
                store.set_frame_offset(view, Vec2::ZERO);
            }
        }
        match self.placement {
            Some(placement) if store.is_alive(placement.superview) => {
                store.restore_to_superview(self.root, placement);
            }
            Some(_) => tracing::warn!(root = ?self.root, "original superview is gone; subtree stays detached"),
            None => {}
        }
        tracing::debug!(root = ?self.root, "closed layout editor");
    }

    // -- Accessors --

    /// The edited subtree's root.
    #[must_use]
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Constraint lines and highlights for the current selection.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The open constraint menu, after a constraint-creation drag.
    #[must_use]
    pub fn menu(&self) -> Option<&ConstraintMenu> {
        self.menu.as_ref()
    }

    /// The gesture in progress.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture.state()
    }

    /// The tunables.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size the root is laid out at.
    #[must_use]
    pub fn workspace_size(&self) -> Size {
        self.workspace
    }

    /// Whether the last layout of the root was ambiguous or unsatisfiable.
    #[must_use]
    pub fn invalid_layout(&self) -> bool {
        self.invalid_layout
    }

    /// Whether the last constant edit was rejected.
    #[must_use]
    pub fn constant_invalid(&self) -> bool {
        self.constant_invalid
    }

    /// Whether primary presses create constraints.
    #[must_use]
    pub fn is_constraint_mode(&self) -> bool {
        self.constraint_mode
    }

    /// Editor chrome windows.
    #[must_use]
    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    /// Mutable access to the editor chrome windows.
    pub fn windows_mut(&mut self) -> &mut WindowManager {
        &mut self.windows
    }

    /// The workspace window.
    #[must_use]
    pub fn main_window(&self) -> WindowId {
        self.main_window
    }

    /// The inspector panel.
    #[must_use]
    pub fn inspector_window(&self) -> WindowId {
        self.inspector_window
    }

    /// Keyboard bindings.
    pub fn shortcuts_mut(&mut self) -> &mut ShortcutMap {
        &mut self.shortcuts
    }

    // -- Selection --

    /// Makes `selection` current and redraws the overlay for it.
    ///
    /// Selecting the current selection again only redraws.
    pub fn select(&mut self, store: &ViewStore, selection: Selection) {
        if selection != self.selection {
            tracing::debug!(from = ?self.selection, to = ?selection, "selection changed");
            self.constant_invalid = false;
            self.selection = selection;
        }
        self.overlay
            .redraw(store, &self.selection, self.config.line_fan_step);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self, store: &ViewStore) {
        self.select(store, Selection::NoSelection);
    }

    fn click_view(&mut self, store: &ViewStore, view: ViewId, toggle: bool) {
        let next = self.selection.clicked(view, toggle);
        self.select(store, next);
    }

    // -- Pointer input --

    /// Makes primary presses start constraint-creation drags, for touch
    /// input without a secondary button.
    pub fn set_constraint_mode(&mut self, enabled: bool) {
        self.constraint_mode = enabled;
    }

    /// Swallows the next click that starts before `now` plus the configured
    /// suppression interval. Call after a focus change.
    pub fn suppress_next_click(&mut self, now: Duration) {
        self.suppress_until = Some(now + self.config.click_suppression);
    }

    /// Handles a pointer event at host time `now`.
    pub fn pointer(&mut self, store: &mut ViewStore, event: PointerEvent, now: Duration) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => {
                let at = to_workspace(position, self.scale);
                self.menu = None;
                let suppressed = self.suppress_until.take().is_some_and(|until| now < until);
                if suppressed {
                    tracing::debug!("click suppressed after focus change");
                    return;
                }
                if button == Button::Secondary || self.constraint_mode {
                    if let Some(view) = hit_view(store, self.root, at) {
                        self.gesture.press_connect(view);
                    }
                    return;
                }
                let tolerance = self.config.hit_tolerance / self.scale;
                if let Some(line) = self.overlay.hit_line(at, tolerance) {
                    let selection = Selection::ConstraintSelected {
                        constraint: line.constraint,
                        reference: line.reference,
                    };
                    self.select(store, selection);
                    return;
                }
                match hit_view(store, self.root, at) {
                    Some(view) => {
                        let origin = store.frame_offset(view);
                        self.gesture.press(view, at, origin, modifiers);
                    }
                    None => self.clear_selection(store),
                }
            }
            PointerEvent::Move { position } => {
                let at = to_workspace(position, self.scale);
                let hit = match self.gesture.state() {
                    Gesture::Connecting { .. } => hit_view(store, self.root, at),
                    _ => None,
                };
                match self.gesture.move_to(at, hit) {
                    GestureOutcome::DragStarted { view, offset } => {
                        self.overlay.clear();
                        store.set_frame_offset(view, offset);
                    }
                    GestureOutcome::Offset { view, offset } => store.set_frame_offset(view, offset),
                    GestureOutcome::TargetChanged(target) => {
                        tracing::trace!(?target, "constraint target changed");
                    }
                    _ => {}
                }
            }
            PointerEvent::Up { position } => {
                let at = to_workspace(position, self.scale);
                match self.gesture.release(at) {
                    GestureOutcome::Click { view, modifiers } => {
                        self.click_view(store, view, modifiers.primary());
                    }
                    GestureOutcome::DragEnded(view) => {
                        self.select(store, Selection::ViewSelected(view));
                    }
                    GestureOutcome::Connect { source, target } => {
                        self.menu = Some(ConstraintMenu::new(store, source, target));
                    }
                    _ => {}
                }
            }
            PointerEvent::Cancel => {
                if let GestureOutcome::Cancelled {
                    view,
                    offset: Some(offset),
                } = self.gesture.cancel()
                {
                    store.set_frame_offset(view, offset);
                    self.overlay
                        .redraw(store, &self.selection, self.config.line_fan_step);
                }
            }
        }
    }

    // -- Constraint creation --

    /// Closes the constraint menu without creating anything.
    pub fn dismiss_menu(&mut self) {
        self.menu = None;
    }

    /// Creates the constraint for the menu item at `index` and selects it.
    ///
    /// With a size class active, the constraint is active only in that
    /// class. Returns `None`, keeping the menu open, if the item is disabled
    /// or vetoed.
    pub fn choose_menu_option(
        &mut self,
        store: &mut ViewStore,
        index: usize,
        delegate: Option<&mut dyn MenuDelegate<ConstraintOption>>,
    ) -> Option<ConstraintRef> {
        let menu = self.menu.take()?;
        let chosen = menu.menu().select(index, delegate).copied();
        let Some(option) = chosen else {
            self.menu = Some(menu);
            return None;
        };
        let spec = option.spec(store, menu.source, menu.target);
        let id = match store.create_constraint(spec) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%err, ?option, "could not create constraint");
                return None;
            }
        };
        let constraint = ConstraintRef::Atomic(id);
        activate_for_active_class(store, constraint);
        self.select(
            store,
            Selection::ConstraintSelected {
                constraint,
                reference: menu.source,
            },
        );
        Some(constraint)
    }

    /// Collections offered for the current multi-view selection.
    #[must_use]
    pub fn multi_selection_menu(&self) -> Menu<MultiOption> {
        multi_selection_options(self.selection.views())
    }

    /// Creates a collection over the selected views and selects it.
    pub fn choose_multi_option(&mut self, store: &mut ViewStore, option: MultiOption) -> Option<ConstraintRef> {
        let views = self.selection.views().to_vec();
        let reference = *views.first()?;
        let collection = match option.create(store, &views) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%err, ?option, "could not create collection");
                return None;
            }
        };
        let constraint = ConstraintRef::Collection(collection);
        activate_for_active_class(store, constraint);
        self.select(
            store,
            Selection::ConstraintSelected {
                constraint,
                reference,
            },
        );
        Some(constraint)
    }

    // -- Deletion --

    /// Deletes the selection.
    ///
    /// A selected constraint or collection is removed and its reference view
    /// selected. Selected views are destroyed with their subtrees, except the
    /// editor root, and the selection is cleared.
    pub fn delete_selection(&mut self, store: &mut ViewStore) {
        match self.selection.clone() {
            Selection::NoSelection => {}
            Selection::ConstraintSelected {
                constraint,
                reference,
            } => {
                if store.is_ref_alive(constraint) {
                    store.remove(constraint);
                }
                self.select(store, Selection::ViewSelected(reference));
            }
            selection => {
                for &view in selection.views() {
                    if view == self.root {
                        tracing::debug!("editor root cannot be deleted");
                    } else if store.is_alive(view) {
                        store.destroy_view(view);
                    }
                }
                self.clear_selection(store);
            }
        }
    }

    // -- Zoom --

    /// Sets the zoom factor, clamped to the configured range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.config.clamp_scale(scale);
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * self.config.scale_step);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / self.config.scale_step);
    }

    // -- Keyboard --

    /// Runs the command bound to `event`, returning it.
    pub fn key(
        &mut self,
        store: &mut ViewStore,
        provider: &mut dyn LayoutVariableProvider,
        animations: &mut dyn AnimationDriver,
        event: &KeyEvent,
    ) -> Option<EditorCommand> {
        let command = self.shortcuts.resolve(event)?;
        self.execute(store, provider, animations, command);
        Some(command)
    }

    /// Runs `command`.
    pub fn execute(
        &mut self,
        store: &mut ViewStore,
        provider: &mut dyn LayoutVariableProvider,
        animations: &mut dyn AnimationDriver,
        command: EditorCommand,
    ) {
        tracing::debug!(?command, "editor command");
        match command {
            EditorCommand::Delete => self.delete_selection(store),
            EditorCommand::ClearSelection => {
                self.menu = None;
                self.clear_selection(store);
            }
            EditorCommand::ZoomIn => self.zoom_in(),
            EditorCommand::ZoomOut => self.zoom_out(),
            EditorCommand::ResetZoom => self.set_scale(1.0),
            EditorCommand::AddVariable => {
                self.add_variable(provider, animations);
            }
        }
    }

    // -- Animations --

    fn animate(
        &mut self,
        animations: &mut dyn AnimationDriver,
        request: AnimationRequest,
        then: Continuation,
    ) -> AnimationTicket {
        let ticket = animations.animate(request);
        self.pending.insert(ticket, then);
        ticket
    }

    /// Resumes the work waiting on finished animations. Returns how many
    /// continuations ran.
    pub fn poll_animations(&mut self, store: &ViewStore, animations: &mut dyn AnimationDriver) -> usize {
        let mut resumed = 0;
        for ticket in animations.take_finished() {
            let Some(continuation) = self.pending.remove(&ticket) else {
                continue;
            };
            resumed += 1;
            match continuation {
                Continuation::RedrawOverlay => {
                    self.overlay
                        .redraw(store, &self.selection, self.config.line_fan_step);
                }
                Continuation::FocusVariable(row) => self.focused_variable = Some(row),
                Continuation::ShakeFinished(row) => {
                    if self.shaking == Some(row) {
                        self.shaking = None;
                    }
                }
            }
        }
        resumed
    }

    /// Returns whether work is waiting on an animation.
    #[must_use]
    pub fn has_pending_animations(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Activates a new constraint, only in the active size class if one is set.
fn activate_for_active_class(store: &mut ViewStore, constraint: ConstraintRef) {
    match store.active_size_class().cloned() {
        Some(size_class) => {
            store.set_active_for(constraint, false, None);
            store.set_active_for(constraint, true, Some(&size_class));
        }
        None => store.set_active(constraint, true),
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{Point, Rect, Vec2};
    use strut_core::animation::ImmediateAnimations;
    use strut_core::constraint::{ConstraintRef, ConstraintSpec};
    use strut_core::size_class::SizeClass;
    use strut_core::variables::InMemoryVariables;
    use strut_core::view::{ViewId, ViewStore};

    use super::*;
    use crate::input::{Key, Modifiers};
    use crate::options::ConstraintOption;

    struct Fixture {
        store: ViewStore,
        editor: LayoutEditor,
        a: ViewId,
        b: ViewId,
    }

    /// Two siblings side by side in a 400x300 workspace.
    fn fixture() -> Fixture {
        let mut store = ViewStore::new();
        let root = store.create_view();
        store.set_frame(root, Rect::new(0.0, 0.0, 400.0, 300.0));
        let a = store.create_view();
        let b = store.create_view();
        store.add_subview(root, a);
        store.add_subview(root, b);
        store.set_frame(a, Rect::new(10.0, 10.0, 110.0, 60.0));
        store.set_frame(b, Rect::new(200.0, 10.0, 300.0, 60.0));
        let editor = LayoutEditor::open(&mut store, root, EditorConfig::default());
        Fixture {
            store,
            editor,
            a,
            b,
        }
    }

    fn down(x: f64, y: f64, button: Button, modifiers: Modifiers) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button,
            modifiers,
        }
    }

    fn click(f: &mut Fixture, x: f64, y: f64, modifiers: Modifiers) {
        let t = Duration::ZERO;
        f.editor
            .pointer(&mut f.store, down(x, y, Button::Primary, modifiers), t);
        f.editor.pointer(
            &mut f.store,
            PointerEvent::Up {
                position: Point::new(x, y),
            },
            t,
        );
    }

    fn connect(f: &mut Fixture, from: Point, to: Point) {
        let t = Duration::ZERO;
        f.editor.pointer(
            &mut f.store,
            down(from.x, from.y, Button::Secondary, Modifiers::NONE),
            t,
        );
        f.editor
            .pointer(&mut f.store, PointerEvent::Move { position: to }, t);
        f.editor
            .pointer(&mut f.store, PointerEvent::Up { position: to }, t);
    }

    fn index_of(menu: &ConstraintMenu, option: ConstraintOption) -> usize {
        menu.options()
            .iter()
            .position(|o| *o == option)
            .expect("option offered")
    }

    #[test]
    fn click_without_movement_selects_and_creates_nothing() {
        let mut f = fixture();
        let constraints = f.store.constraint_count();
        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        assert_eq!(f.editor.selection(), &Selection::ViewSelected(f.a));
        assert_eq!(f.store.constraint_count(), constraints);
        assert_eq!(f.store.frame_offset(f.a), Vec2::ZERO);
    }

    #[test]
    fn reselecting_redraws_without_duplicating_lines() {
        let mut f = fixture();
        let id = f
            .store
            .create_constraint(f.a.width().equal_to_constant(100.0))
            .unwrap();
        f.store.set_active(id, true);
        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        let lines = f.editor.overlay().lines().len();
        let redraws = f.editor.overlay().redraws();
        assert_eq!(lines, 1);

        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        assert_eq!(f.editor.overlay().lines().len(), lines);
        assert_eq!(f.editor.overlay().redraws(), redraws + 1);

        click(&mut f, 250.0, 30.0, Modifiers::NONE);
        assert_eq!(f.editor.selection(), &Selection::ViewSelected(f.b));
        assert!(f.editor.overlay().lines().is_empty());
        assert_eq!(f.editor.overlay().highlights(), [f.b]);
    }

    #[test]
    fn primary_click_toggles_membership() {
        let mut f = fixture();
        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        click(&mut f, 250.0, 30.0, Modifiers::COMMAND);
        assert_eq!(
            f.editor.selection(),
            &Selection::MultipleViewsSelected(vec![f.a, f.b])
        );
        click(&mut f, 50.0, 30.0, Modifiers::COMMAND);
        assert_eq!(f.editor.selection(), &Selection::ViewSelected(f.b));
        assert_eq!(f.editor.multi_selection_menu().items().len(), 0);
    }

    #[test]
    fn dragging_offsets_the_presented_frame() {
        let mut f = fixture();
        let id = f
            .store
            .create_constraint(f.a.width().equal_to_constant(100.0))
            .unwrap();
        f.store.set_active(id, true);
        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        assert!(!f.editor.overlay().lines().is_empty());

        let t = Duration::ZERO;
        f.editor
            .pointer(&mut f.store, down(50.0, 30.0, Button::Primary, Modifiers::NONE), t);
        f.editor.pointer(
            &mut f.store,
            PointerEvent::Move {
                position: Point::new(60.0, 35.0),
            },
            t,
        );
        assert!(f.editor.overlay().lines().is_empty());
        assert_eq!(f.store.frame_offset(f.a), Vec2::new(10.0, 5.0));
        assert_eq!(f.store.frame(f.a), Rect::new(10.0, 10.0, 110.0, 60.0));

        f.editor.pointer(
            &mut f.store,
            PointerEvent::Up {
                position: Point::new(60.0, 35.0),
            },
            t,
        );
        assert_eq!(f.editor.selection(), &Selection::ViewSelected(f.a));
        assert_eq!(f.editor.overlay().lines().len(), 1);
        assert_eq!(f.editor.gesture(), Gesture::Idle);
    }

    #[test]
    fn cancelled_drag_restores_the_offset() {
        let mut f = fixture();
        let t = Duration::ZERO;
        f.editor
            .pointer(&mut f.store, down(50.0, 30.0, Button::Primary, Modifiers::NONE), t);
        f.editor.pointer(
            &mut f.store,
            PointerEvent::Move {
                position: Point::new(90.0, 90.0),
            },
            t,
        );
        f.editor.pointer(&mut f.store, PointerEvent::Cancel, t);
        assert_eq!(f.store.frame_offset(f.a), Vec2::ZERO);
        assert_eq!(f.editor.selection(), &Selection::NoSelection);
    }

    #[test]
    fn connecting_two_views_offers_the_full_menu() {
        let mut f = fixture();
        connect(&mut f, Point::new(50.0, 30.0), Point::new(250.0, 30.0));
        let menu = f.editor.menu().expect("menu opened");
        assert_eq!((menu.source, menu.target), (f.a, f.b));
        assert_eq!(menu.options().len(), 10);

        let index = index_of(menu, ConstraintOption::Spacing(strut_core::constraint::Axis::Horizontal));
        let created = f
            .editor
            .choose_menu_option(&mut f.store, index, None)
            .expect("constraint created");
        assert!(f.editor.menu().is_none());
        assert!(f.store.is_active(created));
        assert_eq!(f.store.describe_ref(created), "view2.leading = view1.trailing + 90");
        assert_eq!(
            f.editor.selection(),
            &Selection::ConstraintSelected {
                constraint: created,
                reference: f.a,
            }
        );
    }

    #[test]
    fn connecting_a_view_to_itself_offers_fixed_sizes() {
        let mut f = fixture();
        connect(&mut f, Point::new(50.0, 30.0), Point::new(60.0, 40.0));
        let menu = f.editor.menu().expect("menu opened");
        assert_eq!(
            menu.options(),
            [ConstraintOption::FixedWidth, ConstraintOption::FixedHeight]
        );
    }

    #[test]
    fn constraint_mode_makes_primary_presses_connect() {
        let mut f = fixture();
        f.editor.set_constraint_mode(true);
        f.editor.pointer(
            &mut f.store,
            down(50.0, 30.0, Button::Primary, Modifiers::NONE),
            Duration::ZERO,
        );
        assert!(matches!(f.editor.gesture(), Gesture::Connecting { .. }));
    }

    #[test]
    fn new_constraints_activate_only_in_the_active_size_class() {
        let mut f = fixture();
        let compact = SizeClass::all().with_max_width(600.0);
        f.store.set_active_size_class(Some(compact.clone()));
        connect(&mut f, Point::new(50.0, 30.0), Point::new(250.0, 30.0));
        let index = index_of(f.editor.menu().unwrap(), ConstraintOption::EqualWidth);
        let created = f.editor.choose_menu_option(&mut f.store, index, None).unwrap();

        assert!(f.store.is_active(created));
        let ConstraintRef::Atomic(id) = created else {
            panic!("menu options create atomic constraints");
        };
        let c = f.store.constraint(id);
        assert!(!*c.active().base());
        assert!(c.active().has_variation(&compact));

        f.store.set_active_size_class(None);
        assert!(!f.store.is_active(created));
    }

    #[test]
    fn vetoed_menu_choice_keeps_the_menu() {
        struct Veto;
        impl MenuDelegate<ConstraintOption> for Veto {
            fn should_select(&mut self, _: &crate::menu::MenuItem<ConstraintOption>) -> bool {
                false
            }
        }

        let mut f = fixture();
        connect(&mut f, Point::new(50.0, 30.0), Point::new(250.0, 30.0));
        let constraints = f.store.constraint_count();
        assert_eq!(f.editor.choose_menu_option(&mut f.store, 0, Some(&mut Veto)), None);
        assert!(f.editor.menu().is_some());
        assert_eq!(f.store.constraint_count(), constraints);
        f.editor.dismiss_menu();
        assert!(f.editor.menu().is_none());
    }

    #[test]
    fn clicking_a_line_selects_its_constraint() {
        let mut f = fixture();
        let id = f
            .store
            .create_constraint(f.b.leading().equal_to(f.a.trailing()).plus(90.0))
            .unwrap();
        f.store.set_active(id, true);
        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        let at = f.editor.overlay().lines()[0].line.center();
        click(&mut f, at.x, at.y, Modifiers::NONE);
        assert_eq!(
            f.editor.selection(),
            &Selection::ConstraintSelected {
                constraint: ConstraintRef::Atomic(id),
                reference: f.a,
            }
        );
        assert!(f.editor.overlay().lines()[0].selected);
    }

    #[test]
    fn deleting_a_constraint_selects_its_reference() {
        let mut f = fixture();
        let id = f
            .store
            .create_constraint(f.b.top().equal_to(f.a.top()))
            .unwrap();
        f.store.set_active(id, true);
        f.editor.select(
            &f.store,
            Selection::ConstraintSelected {
                constraint: ConstraintRef::Atomic(id),
                reference: f.b,
            },
        );
        f.editor.delete_selection(&mut f.store);
        assert!(!f.store.is_constraint_alive(id));
        assert_eq!(f.editor.selection(), &Selection::ViewSelected(f.b));
    }

    #[test]
    fn deleting_views_spares_the_root() {
        let mut f = fixture();
        let root = f.editor.root();
        f.editor
            .select(&f.store, Selection::MultipleViewsSelected(vec![root, f.a]));
        f.editor.delete_selection(&mut f.store);
        assert!(f.store.is_alive(root));
        assert!(!f.store.is_alive(f.a));
        assert_eq!(f.editor.selection(), &Selection::NoSelection);
    }

    #[test]
    fn multi_selection_creates_collections() {
        let mut f = fixture();
        f.editor
            .select(&f.store, Selection::MultipleViewsSelected(vec![f.a, f.b]));
        assert_eq!(f.editor.multi_selection_menu().items().len(), 4);
        let created = f
            .editor
            .choose_multi_option(&mut f.store, MultiOption::EqualHeights)
            .unwrap();
        assert!(matches!(created, ConstraintRef::Collection(_)));
        assert!(f.store.is_active(created));
        assert_eq!(f.editor.selection().reference_view(), Some(f.a));
    }

    #[test]
    fn click_after_focus_change_is_suppressed() {
        let mut f = fixture();
        f.editor.suppress_next_click(Duration::from_millis(1_000));
        f.editor.pointer(
            &mut f.store,
            down(50.0, 30.0, Button::Primary, Modifiers::NONE),
            Duration::from_millis(1_100),
        );
        assert_eq!(f.editor.gesture(), Gesture::Idle);

        f.editor.suppress_next_click(Duration::from_millis(2_000));
        f.editor.pointer(
            &mut f.store,
            down(50.0, 30.0, Button::Primary, Modifiers::NONE),
            Duration::from_millis(2_300),
        );
        assert!(matches!(f.editor.gesture(), Gesture::Dragging { .. }));
    }

    #[test]
    fn zoom_scales_hit_testing_and_clamps() {
        let mut f = fixture();
        let mut vars = InMemoryVariables::new();
        let mut animations = ImmediateAnimations::new();
        let zoom_in = KeyEvent::with(Key::Character('='), Modifiers::COMMAND);
        assert_eq!(
            f.editor
                .key(&mut f.store, &mut vars, &mut animations, &zoom_in),
            Some(EditorCommand::ZoomIn)
        );
        assert_eq!(f.editor.scale(), 1.25);

        f.editor.set_scale(2.0);
        click(&mut f, 500.0, 60.0, Modifiers::NONE);
        assert_eq!(f.editor.selection(), &Selection::ViewSelected(f.b));

        for _ in 0..20 {
            f.editor.zoom_in();
        }
        assert_eq!(f.editor.scale(), 4.0);
        f.editor.execute(
            &mut f.store,
            &mut vars,
            &mut animations,
            EditorCommand::ResetZoom,
        );
        assert_eq!(f.editor.scale(), 1.0);

        f.editor
            .key(&mut f.store, &mut vars, &mut animations, &KeyEvent::plain(Key::Escape));
        assert_eq!(f.editor.selection(), &Selection::NoSelection);
    }

    #[test]
    fn closing_restores_the_original_placement() {
        let mut store = ViewStore::new();
        let parent = store.create_view();
        let (x, root, y) = (store.create_view(), store.create_view(), store.create_view());
        store.add_subview(parent, x);
        store.add_subview(parent, root);
        store.add_subview(parent, y);
        let child = store.create_view();
        store.add_subview(root, child);

        let editor = LayoutEditor::open(&mut store, root, EditorConfig::default());
        assert_eq!(store.superview(root), None);
        assert_eq!(store.subviews(parent).collect::<Vec<_>>(), [x, y]);
        assert!(editor.windows().is_open(editor.inspector_window()));
        assert_eq!(editor.windows().key_window(), Some(editor.main_window()));

        store.set_frame_offset(child, Vec2::new(3.0, 4.0));
        editor.close(&mut store);
        assert_eq!(store.subviews(parent).collect::<Vec<_>>(), [x, root, y]);
        assert_eq!(store.frame_offset(child), Vec2::ZERO);
    }

    #[test]
    fn closing_after_the_parent_is_gone_leaves_the_subtree_detached() {
        let mut store = ViewStore::new();
        let parent = store.create_view();
        let root = store.create_view();
        store.add_subview(parent, root);
        let editor = LayoutEditor::open(&mut store, root, EditorConfig::default());
        store.destroy_view(parent);
        editor.close(&mut store);
        assert!(store.is_alive(root));
        assert_eq!(store.superview(root), None);
    }

    #[test]
    fn constant_only_specs_are_unaffected_by_gestures() {
        let mut f = fixture();
        let spec: ConstraintSpec = f.a.height().equal_to_constant(50.0);
        let id = f.store.create_constraint(spec).unwrap();
        f.store.set_active(id, true);
        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        click(&mut f, 50.0, 30.0, Modifiers::NONE);
        assert_eq!(f.store.effective_constant(id).literal(), Some(50.0));
        assert!(f.store.is_active(id));
    }
}
