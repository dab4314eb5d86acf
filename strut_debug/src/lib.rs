// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace printing, `tracing` forwarding and layout snapshots for strut
//! diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`log::LogSink`]: forwards layout events to the `tracing` crate.
//! - [`snapshot::export`]: writes a view subtree's frames and constraints as
//!   JSON.

pub mod log;
pub mod pretty;
pub mod snapshot;
