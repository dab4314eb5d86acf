// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strut_core::trace::{
    ConstraintRejectedEvent, PassBeginEvent, PassEndEvent, RootSolvedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] pass={} roots={}",
            e.pass_index, e.roots,
        );
    }

    fn on_root_solved(&mut self, e: &RootSolvedEvent) {
        let verdict = if e.unsatisfiable {
            "UNSATISFIABLE"
        } else if e.ambiguous > 0 {
            "ambiguous"
        } else {
            "ok"
        };
        let _ = writeln!(
            self.writer,
            "[solve] pass={} root={} views={} constraints={} changed={} ambiguous={} {verdict}",
            e.pass_index,
            e.root.index(),
            e.views,
            e.constraints,
            e.frames_changed,
            e.ambiguous,
        );
    }

    fn on_constraint_rejected(&mut self, e: &ConstraintRejectedEvent) {
        let _ = writeln!(
            self.writer,
            "[rejected] pass={} constraint={}",
            e.pass_index,
            e.constraint.index(),
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] pass={} frames={} properties={}",
            e.pass_index, e.frames_changed, e.properties_changed,
        );
    }
}
