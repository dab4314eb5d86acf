// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View tree, layout constraints, and size classes for constraint-based layout.
//!
//! `strut_core` holds the data model behind an Auto-Layout-style UI: a
//! retained tree of rectangular views, linear constraints between view edges,
//! per-size-class variations of constraint and view properties, and named
//! layout variables usable as constraint constants. Views and constraints are
//! addressed by generational handles, so side tables (selection state,
//! overlay geometry) can be keyed by handle rather than by object identity.
//!
//! # Architecture
//!
//! The crate is organized around a layout loop driven by the host:
//!
//! ```text
//!   mutate views / constraints / size class
//!       │  (marks dirty channels)
//!       ▼
//!   ViewStore::layout_if_needed() ──► LayoutSolver::solve() (per dirty root)
//!       │
//!       ▼
//!   LayoutChanges ──► Presenter::apply()  ──►  editor / host redraw
//! ```
//!
//! **[`view`]**: Struct-of-arrays view tree with generational handles,
//! computed frames, intrinsic-size caching, and per-size-class view property
//! variations.
//!
//! **[`constraint`]**: Constraint model: attributes, relations, priorities,
//! constants (literal or layout variable), variation maps, and constraint
//! collections (equal attribute, equal spacing).
//!
//! **[`size_class`]**: Size classes, viewports, and viewport overrides used
//! to preview a class without resizing the real surface.
//!
//! **[`variation`]**: The base-or-variation resolution rule shared by
//! constraints and view properties.
//!
//! **[`variables`]**: The layout variable provider contract and an
//! in-memory implementation with JSON persistence.
//!
//! **[`layout`]**: The layout pass, the [`LayoutSolver`](layout::LayoutSolver)
//! seam with a Cassowary-backed default, and layout validity analysis.
//!
//! **[`dirty`]**: Dirty-tracking channels via `understory_dirty`.
//!
//! **[`backend`]**: Contracts for the rendering surface: presenting frames,
//! measuring intrinsic content, and snapshotting the viewport.
//!
//! **[`animation`]**: The animation-timing contract used for animated
//! transitions.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and layout-loop events
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod animation;
pub mod backend;
pub mod constraint;
pub mod dirty;
pub mod error;
pub mod layout;
pub mod size_class;
pub mod trace;
pub mod variables;
pub mod variation;
pub mod view;

pub use kurbo;
