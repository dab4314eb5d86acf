// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of a laid-out view subtree.
//!
//! [`snapshot`] captures every view under a root with its frame in root
//! coordinates, effective properties, and the constraints it owns, described
//! as equations under the active size class. [`export`] writes the same data
//! as pretty-printed JSON.

use std::io::{self, Write};

use serde_json::{Value, json};

use strut_core::view::{ViewId, ViewStore};

/// Captures the subtree under `root` as a JSON value.
///
/// Each constraint is listed once, under the view whose attribute it
/// constrains.
///
/// # Panics
///
/// Panics if `root` is stale.
#[must_use]
pub fn snapshot(store: &ViewStore, root: ViewId) -> Value {
    let views: Vec<Value> = store
        .descendants(root)
        .map(|view| view_entry(store, view))
        .collect();
    json!({
        "root": store.label(root),
        "size_class": store.active_size_class().map(|c| c.display_name()),
        "validity": store.layout_validity(root).map(|v| format!("{v:?}")),
        "views": views,
    })
}

fn view_entry(store: &ViewStore, view: ViewId) -> Value {
    let frame = store.frame_in_root(view);
    let props = store.effective_properties(view);
    let constraints: Vec<Value> = store
        .local_constraints(view)
        .into_iter()
        .filter(|id| store.constraint(*id).view() == view)
        .map(|id| {
            json!({
                "equation": store.describe(id),
                "active": store.is_active(id),
            })
        })
        .collect();
    json!({
        "name": store.label(view),
        "superview": store.superview(view).map(|s| store.label(s)),
        "frame": [frame.x0, frame.y0, frame.width(), frame.height()],
        "opacity": props.opacity,
        "hidden": props.hidden,
        "style_class": props.style_class,
        "constraints": constraints,
    })
}

/// Writes the snapshot of `root` as pretty-printed JSON.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn export(store: &ViewStore, root: ViewId, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &snapshot(store, root))?;
    writeln!(writer)
}
