// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An interactive layout editor over `strut_core` view trees.
//!
//! [`LayoutEditor`] detaches a view subtree, lays it out in a workspace and
//! turns pointer and keyboard input into edits of its constraint graph. It
//! renders nothing itself: the host draws the workspace, the
//! [`Overlay`](overlay::Overlay) constraint lines and the
//! [`InspectorModel`](editor::InspectorModel), and feeds input back in.
//!
//! ```text
//!   host input ──► LayoutEditor::pointer() / key()
//!                        │  (mutates ViewStore)
//!                        ▼
//!   ViewStore::layout() ──► LayoutEditor::did_layout() ──► overlay + inspector
//! ```
//!
//! **[`editor`]**: the session: selection, gestures, constraint creation,
//! deletion, zoom, size-class preview, the inspector and the variables
//! popover.
//!
//! **[`selection`]**, **[`gesture`]**, **[`overlay`]**: the selection state
//! machine, pointer gesture recognition and constraint-line geometry.
//!
//! **[`options`]**, **[`menu`]**: constraint-creation menu entries.
//!
//! **[`variables`]**: display rows for layout variables.
//!
//! **[`window`]**, **[`popover`]**, **[`shortcut`]**: editor chrome.
//!
//! **[`config`]**: tunables, loadable from JSON.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod editor;
pub mod gesture;
pub mod input;
pub mod menu;
pub mod options;
pub mod overlay;
pub mod popover;
pub mod selection;
pub mod shortcut;
pub mod variables;
pub mod window;

pub use config::EditorConfig;
pub use editor::LayoutEditor;
