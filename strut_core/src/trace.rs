// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the layout loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! layout pass calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::constraint::ConstraintId;
use crate::view::ViewId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a layout pass starts.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Number of roots that will be solved.
    pub roots: usize,
}

/// Emitted after one root's subtree has been solved and its frames written.
#[derive(Clone, Copy, Debug)]
pub struct RootSolvedEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// The root whose subtree was solved.
    pub root: ViewId,
    /// Views in the subtree.
    pub views: usize,
    /// Constraints handed to the solver.
    pub constraints: usize,
    /// Views whose frame changed.
    pub frames_changed: usize,
    /// Views whose position is not fully determined by required constraints.
    pub ambiguous: usize,
    /// Whether any constraint was rejected or the solve failed.
    pub unsatisfiable: bool,
}

/// Emitted when the solver rejects a required constraint.
#[derive(Clone, Copy, Debug)]
pub struct ConstraintRejectedEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// The rejected constraint.
    pub constraint: ConstraintId,
}

/// Emitted when a layout pass finishes.
#[derive(Clone, Copy, Debug)]
pub struct PassEndEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Views whose frame changed across all roots.
    pub frames_changed: usize,
    /// Views whose effective properties changed.
    pub properties_changed: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the layout loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of a layout pass.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called after each root is solved.
    fn on_root_solved(&mut self, e: &RootSolvedEvent) {
        _ = e;
    }

    /// Called for each rejected constraint.
    fn on_constraint_rejected(&mut self, e: &ConstraintRejectedEvent) {
        _ = e;
    }

    /// Called at the end of a layout pass.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RootSolvedEvent`].
    #[inline]
    pub fn root_solved(&mut self, e: &RootSolvedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_root_solved(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ConstraintRejectedEvent`].
    #[inline]
    pub fn constraint_rejected(&mut self, e: &ConstraintRejectedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_constraint_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_all_events() {
        let mut sink = NoopSink;
        sink.on_pass_begin(&PassBeginEvent {
            pass_index: 0,
            roots: 1,
        });
        sink.on_pass_end(&PassEndEvent {
            pass_index: 0,
            frames_changed: 0,
            properties_changed: 0,
        });
    }

    #[test]
    fn tracer_none_is_silent() {
        let mut tracer = Tracer::none();
        tracer.pass_begin(&PassBeginEvent {
            pass_index: 3,
            roots: 0,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        #[derive(Default)]
        struct RecordingSink {
            begins: Vec<u64>,
            ends: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_pass_begin(&mut self, e: &PassBeginEvent) {
                self.begins.push(e.pass_index);
            }
            fn on_pass_end(&mut self, e: &PassEndEvent) {
                self.ends.push(e.pass_index);
            }
        }

        let mut sink = RecordingSink::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.pass_begin(&PassBeginEvent {
                pass_index: 7,
                roots: 2,
            });
            tracer.pass_end(&PassEndEvent {
                pass_index: 7,
                frames_changed: 4,
                properties_changed: 0,
            });
        }
        assert_eq!(sink.begins, vec![7]);
        assert_eq!(sink.ends, vec![7]);
    }
}
