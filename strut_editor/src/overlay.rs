// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint overlay geometry and hit testing.
//!
//! The overlay is recomputed from scratch on every redraw, so drawing the same
//! selection twice yields the same lines rather than duplicates. All geometry
//! is in workspace coordinates (root space, before zoom); pointer positions
//! are brought into that space with [`to_workspace`].
//!
//! A constraint is drawn from the point of view of a *reference* view. For a
//! positional attribute the line runs along the attribute's axis between the
//! reference's attribute and the other side's attribute, through the middle
//! of the reference view. A lead line joins the far end to the other view
//! when the main line misses it. Width and height constraints are drawn as
//! brackets below or to the right of the view. Lines anchored to the same
//! attribute are fanned out by a fixed step.

use std::collections::BTreeMap;

use kurbo::{Point, Rect};
use strut_core::constraint::{Attribute, Axis, ConstraintId, ConstraintRef};
use strut_core::view::{ViewId, ViewStore};

use crate::selection::Selection;

/// One drawn constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintLine {
    /// What clicking the line selects: the constraint, or its collection.
    pub constraint: ConstraintRef,
    /// The atomic constraint this line depicts.
    pub atomic: ConstraintId,
    /// The view the line is drawn from.
    pub reference: ViewId,
    /// The main line, as a zero-thickness rectangle.
    pub line: Rect,
    /// Perpendicular connector to the other view's edge, if the main line
    /// does not reach it.
    pub lead: Option<Rect>,
    /// Drawn dashed because the constraint is not required.
    pub dashed: bool,
    /// Part of the current selection.
    pub selected: bool,
}

/// Lines and view highlights for the current selection.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    lines: Vec<ConstraintLine>,
    highlights: Vec<ViewId>,
    redraws: u64,
}

impl Overlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The drawn constraint lines.
    #[must_use]
    pub fn lines(&self) -> &[ConstraintLine] {
        &self.lines
    }

    /// Views drawn with a selection highlight.
    #[must_use]
    pub fn highlights(&self) -> &[ViewId] {
        &self.highlights
    }

    /// Number of redraws so far.
    #[must_use]
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Removes all lines and highlights.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.highlights.clear();
    }

    /// Replaces the overlay with the lines and highlights for `selection`.
    pub fn redraw(&mut self, store: &ViewStore, selection: &Selection, fan_step: f64) {
        self.clear();
        self.redraws += 1;
        match selection {
            Selection::NoSelection => {}
            Selection::MultipleViewsSelected(views) => self.highlights.clone_from(views),
            Selection::ViewSelected(view) => {
                self.highlights.push(*view);
                let atomics = active_local(store, *view);
                self.lines = lines_for(store, *view, &atomics, None, fan_step);
            }
            Selection::ConstraintSelected {
                constraint,
                reference,
            } => {
                self.highlights.push(*reference);
                let mut atomics = active_local(store, *reference);
                let mut foreign = Vec::new();
                if store.is_ref_alive(*constraint) {
                    for id in store.atomics(*constraint) {
                        if !store.constraint(id).involves(*reference) && store.is_active(id) {
                            foreign.push(id);
                        } else if !atomics.contains(&id) {
                            atomics.push(id);
                        }
                    }
                }
                self.lines = lines_for(store, *reference, &atomics, Some(*constraint), fan_step);
                // Constituents away from the reference are drawn from their own view.
                let mut counters = BTreeMap::new();
                for id in foreign {
                    let view = store.constraint(id).view();
                    if let Some(line) =
                        line_for(store, view, id, Some(*constraint), fan_step, &mut counters)
                    {
                        self.lines.push(line);
                    }
                }
            }
        }
    }

    /// The topmost line within `tolerance` of `point`.
    #[must_use]
    pub fn hit_line(&self, point: Point, tolerance: f64) -> Option<&ConstraintLine> {
        self.lines
            .iter()
            .rev()
            .find(|l| l.line.inflate(tolerance, tolerance).contains(point))
    }
}

/// Converts a screen position into workspace coordinates at zoom `scale`.
#[must_use]
pub fn to_workspace(point: Point, scale: f64) -> Point {
    Point::new(point.x / scale, point.y / scale)
}

/// The topmost visible view under `point` in the tree of `root`.
///
/// Later views in pre-order are drawn above earlier ones. Hidden views and
/// their subtrees are skipped.
#[must_use]
pub fn hit_view(store: &ViewStore, root: ViewId, point: Point) -> Option<ViewId> {
    store
        .descendants(root)
        .filter(|v| is_shown(store, root, *v))
        .filter(|v| store.presented_frame_in_root(*v).contains(point))
        .last()
}

fn is_shown(store: &ViewStore, root: ViewId, view: ViewId) -> bool {
    let mut cur = Some(view);
    while let Some(v) = cur {
        if store.presented_properties(v).hidden {
            return false;
        }
        if v == root {
            break;
        }
        cur = store.superview(v);
    }
    true
}

fn active_local(store: &ViewStore, view: ViewId) -> Vec<ConstraintId> {
    store
        .local_constraints(view)
        .into_iter()
        .filter(|id| store.is_active(*id))
        .collect()
}

fn lines_for(
    store: &ViewStore,
    reference: ViewId,
    atomics: &[ConstraintId],
    selected: Option<ConstraintRef>,
    fan_step: f64,
) -> Vec<ConstraintLine> {
    let mut counters = BTreeMap::new();
    atomics
        .iter()
        .filter_map(|id| line_for(store, reference, *id, selected, fan_step, &mut counters))
        .collect()
}

/// The other end of a constraint seen from `reference`.
struct Far {
    view: Option<ViewId>,
    frame: Rect,
    attribute: Attribute,
}

fn sides(store: &ViewStore, reference: ViewId, id: ConstraintId) -> Option<(Attribute, Option<Far>)> {
    let c = store.constraint(id);
    let far = |view: ViewId, attribute| Far {
        view: Some(view),
        frame: store.presented_frame_in_root(view),
        attribute,
    };
    if c.view() == reference {
        let other = match c.target() {
            Some((view, attribute)) => Some(far(view, attribute)),
            // Positional constants are offsets from the superview.
            None if !c.attribute().is_size() => Some(match store.superview(reference) {
                Some(sup) => far(sup, c.attribute()),
                None => Far {
                    view: None,
                    frame: Rect::ZERO,
                    attribute: c.attribute(),
                },
            }),
            None => None,
        };
        Some((c.attribute(), other))
    } else {
        let (_, attribute) = c.target().filter(|(t, _)| *t == reference)?;
        Some((attribute, Some(far(c.view(), c.attribute()))))
    }
}

fn line_for(
    store: &ViewStore,
    reference: ViewId,
    id: ConstraintId,
    selected: Option<ConstraintRef>,
    fan_step: f64,
    counters: &mut BTreeMap<Attribute, u32>,
) -> Option<ConstraintLine> {
    let (own, far) = sides(store, reference, id)?;
    let frame = store.presented_frame_in_root(reference);
    let slot = counters.entry(own.canonical()).or_insert(0);
    let k = f64::from(*slot);
    *slot += 1;

    let (line, lead) = if own.is_size() {
        let offset = fan_step * (k + 1.0);
        let bracket = |r: Rect| match own.axis() {
            Axis::Horizontal => Rect::new(r.x0, r.y1 + offset, r.x1, r.y1 + offset),
            Axis::Vertical => Rect::new(r.x1 + offset, r.y0, r.x1 + offset, r.y1),
        };
        let lead = far.filter(|f| f.view != Some(reference)).map(|f| bracket(f.frame));
        (bracket(frame), lead)
    } else {
        let from = own.value_in(frame);
        let center = frame.center();
        match own.axis() {
            Axis::Horizontal => {
                let y = center.y + fan_step * k;
                let to = far.as_ref().map_or(from, |f| f.attribute.value_in(f.frame));
                let lead = far
                    .filter(|f| f.view.is_some())
                    .and_then(|f| span_connector(y, f.frame.y0, f.frame.y1))
                    .map(|(a, b)| Rect::new(to, a, to, b));
                (Rect::new(from.min(to), y, from.max(to), y), lead)
            }
            Axis::Vertical => {
                let x = center.x + fan_step * k;
                let to = far.as_ref().map_or(from, |f| f.attribute.value_in(f.frame));
                let lead = far
                    .filter(|f| f.view.is_some())
                    .and_then(|f| span_connector(x, f.frame.x0, f.frame.x1))
                    .map(|(a, b)| Rect::new(a, to, b, to));
                (Rect::new(x, from.min(to), x, from.max(to)), lead)
            }
        }
    };

    let constraint = store.selectable_ref(id);
    Some(ConstraintLine {
        constraint,
        atomic: id,
        reference,
        line,
        lead,
        dashed: !store.effective_priority(id).is_required(),
        selected: selected.is_some_and(|s| s == constraint || s == ConstraintRef::Atomic(id)),
    })
}

/// Segment from `at` to the nearest point of `[lo, hi]`, if `at` is outside.
fn span_connector(at: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
    if at < lo {
        Some((at, lo))
    } else if at > hi {
        Some((hi, at))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use strut_core::constraint::Priority;

    use super::*;

    struct Scene {
        store: ViewStore,
        root: ViewId,
        a: ViewId,
        b: ViewId,
    }

    fn scene() -> Scene {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let a = store.create_view();
        let b = store.create_view();
        store.add_subview(root, a);
        store.add_subview(root, b);
        store.set_frame(root, Rect::new(0.0, 0.0, 400.0, 300.0));
        store.set_frame(a, Rect::new(10.0, 10.0, 110.0, 60.0));
        store.set_frame(b, Rect::new(200.0, 100.0, 300.0, 140.0));
        Scene { store, root, a, b }
    }

    fn activate(store: &mut ViewStore, spec: strut_core::constraint::ConstraintSpec) -> ConstraintId {
        let id = store.create_constraint(spec).unwrap();
        store.set_active(id, true);
        id
    }

    #[test]
    fn spacing_line_runs_between_edges_with_lead() {
        let mut s = scene();
        let id = activate(&mut s.store, s.b.leading().equal_to(s.a.trailing()).plus(90.0));
        let mut overlay = Overlay::new();
        overlay.redraw(&s.store, &Selection::ViewSelected(s.a), 8.0);

        let line = &overlay.lines()[0];
        assert_eq!(line.atomic, id);
        assert_eq!(line.reference, s.a);
        assert_eq!(line.line, Rect::new(110.0, 35.0, 200.0, 35.0));
        // The line passes above b, so a lead drops down to its top edge.
        assert_eq!(line.lead, Some(Rect::new(200.0, 35.0, 200.0, 100.0)));
        assert!(!line.dashed);
        assert!(!line.selected);
    }

    #[test]
    fn lines_on_one_attribute_fan_out() {
        let mut s = scene();
        activate(&mut s.store, s.a.leading().equal_to(s.root.leading()).plus(10.0));
        activate(
            &mut s.store,
            s.a.leading()
                .equal_to(s.b.leading())
                .priority(Priority::new(500)),
        );
        let mut overlay = Overlay::new();
        overlay.redraw(&s.store, &Selection::ViewSelected(s.a), 8.0);
        let ys: Vec<f64> = overlay.lines().iter().map(|l| l.line.y0).collect();
        assert_eq!(ys, vec![35.0, 43.0]);
        assert!(overlay.lines()[1].dashed);
    }

    #[test]
    fn size_constraints_draw_brackets() {
        let mut s = scene();
        activate(&mut s.store, s.a.width().equal_to_constant(100.0));
        activate(&mut s.store, s.a.height().equal_to(s.b.height()));
        let mut overlay = Overlay::new();
        overlay.redraw(&s.store, &Selection::ViewSelected(s.a), 8.0);
        assert_eq!(overlay.lines()[0].line, Rect::new(10.0, 68.0, 110.0, 68.0));
        assert_eq!(overlay.lines()[0].lead, None);
        assert_eq!(overlay.lines()[1].line, Rect::new(118.0, 10.0, 118.0, 60.0));
        assert_eq!(
            overlay.lines()[1].lead,
            Some(Rect::new(308.0, 100.0, 308.0, 140.0))
        );
    }

    #[test]
    fn redrawing_same_selection_does_not_duplicate() {
        let mut s = scene();
        activate(&mut s.store, s.a.top().equal_to(s.root.top()).plus(10.0));
        let mut overlay = Overlay::new();
        let selection = Selection::ViewSelected(s.a);
        overlay.redraw(&s.store, &selection, 8.0);
        let first = overlay.lines().to_vec();
        overlay.redraw(&s.store, &selection, 8.0);
        assert_eq!(overlay.lines(), first.as_slice());
        assert_eq!(overlay.highlights(), &[s.a]);
        assert_eq!(overlay.redraws(), 2);

        overlay.redraw(&s.store, &Selection::NoSelection, 8.0);
        assert!(overlay.lines().is_empty());
        assert!(overlay.highlights().is_empty());
    }

    #[test]
    fn inactive_constraints_are_not_drawn() {
        let mut s = scene();
        let id = activate(&mut s.store, s.a.width().equal_to_constant(100.0));
        s.store.set_active(id, false);
        let mut overlay = Overlay::new();
        overlay.redraw(&s.store, &Selection::ViewSelected(s.a), 8.0);
        assert!(overlay.lines().is_empty());
    }

    #[test]
    fn collection_lines_select_the_collection() {
        let mut s = scene();
        let col = s
            .store
            .create_equal_attribute(&[s.a, s.b], Attribute::Width)
            .unwrap();
        s.store.set_active(col, true);
        let mut overlay = Overlay::new();
        let selection = Selection::ConstraintSelected {
            constraint: col.into(),
            reference: s.b,
        };
        overlay.redraw(&s.store, &selection, 8.0);
        assert_eq!(overlay.lines().len(), 1);
        let line = &overlay.lines()[0];
        assert_eq!(line.constraint, ConstraintRef::Collection(col));
        assert!(line.selected);

        let hit = overlay.hit_line(Point::new(250.0, 150.0), 4.0).unwrap();
        assert_eq!(hit.constraint, ConstraintRef::Collection(col));
        assert!(overlay.hit_line(Point::new(250.0, 170.0), 4.0).is_none());
    }

    #[test]
    fn hit_view_prefers_topmost_visible() {
        let mut s = scene();
        let inner = s.store.create_view();
        s.store.add_subview(s.a, inner);
        s.store.set_frame(inner, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(hit_view(&s.store, s.root, Point::new(15.0, 15.0)), Some(inner));
        assert_eq!(hit_view(&s.store, s.root, Point::new(50.0, 50.0)), Some(s.a));
        assert_eq!(hit_view(&s.store, s.root, Point::new(350.0, 250.0)), Some(s.root));
        assert_eq!(hit_view(&s.store, s.root, Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn workspace_coordinates_undo_zoom() {
        assert_eq!(to_workspace(Point::new(100.0, 50.0), 2.0), Point::new(50.0, 25.0));
    }
}
