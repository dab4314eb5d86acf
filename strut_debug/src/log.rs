// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwarding layout events to `tracing`.

use strut_core::trace::{
    ConstraintRejectedEvent, PassBeginEvent, PassEndEvent, RootSolvedEvent, TraceSink,
};

/// A [`TraceSink`] that emits every event through the `tracing` crate.
///
/// Pass boundaries and solves log at `trace` level; unsatisfiable or
/// ambiguous roots and rejected constraints log at `warn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        tracing::trace!(pass = e.pass_index, roots = e.roots, "layout pass begin");
    }

    fn on_root_solved(&mut self, e: &RootSolvedEvent) {
        if e.unsatisfiable || e.ambiguous > 0 {
            tracing::warn!(
                pass = e.pass_index,
                root = ?e.root,
                ambiguous = e.ambiguous,
                unsatisfiable = e.unsatisfiable,
                "layout is not fully determined"
            );
        } else {
            tracing::trace!(
                pass = e.pass_index,
                root = ?e.root,
                views = e.views,
                constraints = e.constraints,
                changed = e.frames_changed,
                "root solved"
            );
        }
    }

    fn on_constraint_rejected(&mut self, e: &ConstraintRejectedEvent) {
        tracing::warn!(pass = e.pass_index, constraint = ?e.constraint, "required constraint rejected");
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        tracing::trace!(
            pass = e.pass_index,
            frames = e.frames_changed,
            properties = e.properties_changed,
            "layout pass end"
        );
    }
}
