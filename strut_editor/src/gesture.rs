// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer gesture recognition.
//!
//! [`GestureTracker`] turns a press/move/release sequence into a
//! [`GestureOutcome`]. It knows nothing about the store; the editor hit-tests
//! each position and applies the outcome.

use kurbo::{Point, Vec2};
use strut_core::view::ViewId;

use crate::input::Modifiers;

/// The gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No button is pressed.
    #[default]
    Idle,
    /// A primary press on a view, possibly moving it.
    Dragging {
        /// The pressed view.
        view: ViewId,
        /// Press position in workspace coordinates.
        start: Point,
        /// Presentation offset of the view at press time.
        origin: Vec2,
        /// Whether the pointer has moved since the press.
        moved: bool,
        /// Modifiers at press time.
        modifiers: Modifiers,
    },
    /// A constraint-creation drag.
    Connecting {
        /// The pressed view.
        source: ViewId,
        /// The view currently under the pointer, or `source`.
        target: ViewId,
    },
}

/// What a pointer event amounted to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Nothing the editor needs to act on.
    None,
    /// A drag began; overlays should be cleared and the view presented at
    /// `offset`.
    DragStarted {
        /// The dragged view.
        view: ViewId,
        /// New presentation offset.
        offset: Vec2,
    },
    /// The dragged view should be presented at `offset`.
    Offset {
        /// The dragged view.
        view: ViewId,
        /// New presentation offset.
        offset: Vec2,
    },
    /// A drag ended with net movement.
    DragEnded(ViewId),
    /// A press was released in place.
    Click {
        /// The pressed view.
        view: ViewId,
        /// Modifiers at press time.
        modifiers: Modifiers,
    },
    /// The constraint-creation target changed.
    TargetChanged(ViewId),
    /// A constraint-creation drag was released.
    Connect {
        /// The pressed view.
        source: ViewId,
        /// The view released over, or `source` when released elsewhere.
        target: ViewId,
    },
    /// The gesture was cancelled; a dragged view should return to `offset`.
    Cancelled {
        /// The view the gesture started on.
        view: ViewId,
        /// Presentation offset to restore, for drags.
        offset: Option<Vec2>,
    },
}

/// Recognizes drags, clicks and constraint-creation drags.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    state: Gesture,
}

impl GestureTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture in progress.
    #[must_use]
    pub fn state(&self) -> Gesture {
        self.state
    }

    /// Returns whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, Gesture::Idle)
    }

    /// Starts a drag on `view`, whose current presentation offset is `origin`.
    pub fn press(&mut self, view: ViewId, at: Point, origin: Vec2, modifiers: Modifiers) {
        self.state = Gesture::Dragging {
            view,
            start: at,
            origin,
            moved: false,
            modifiers,
        };
    }

    /// Starts a constraint-creation drag on `view`.
    pub fn press_connect(&mut self, view: ViewId) {
        self.state = Gesture::Connecting {
            source: view,
            target: view,
        };
    }

    /// Handles a move to `at`, over `hit`.
    pub fn move_to(&mut self, at: Point, hit: Option<ViewId>) -> GestureOutcome {
        match &mut self.state {
            Gesture::Idle => GestureOutcome::None,
            Gesture::Dragging {
                view,
                start,
                origin,
                moved,
                ..
            } => {
                let delta = at - *start;
                let offset = *origin + delta;
                if *moved {
                    GestureOutcome::Offset {
                        view: *view,
                        offset,
                    }
                } else if delta != Vec2::ZERO {
                    *moved = true;
                    GestureOutcome::DragStarted {
                        view: *view,
                        offset,
                    }
                } else {
                    GestureOutcome::None
                }
            }
            Gesture::Connecting { source, target } => {
                let next = hit.unwrap_or(*source);
                if next == *target {
                    GestureOutcome::None
                } else {
                    *target = next;
                    GestureOutcome::TargetChanged(next)
                }
            }
        }
    }

    /// Handles the release at `at`.
    pub fn release(&mut self, at: Point) -> GestureOutcome {
        match core::mem::take(&mut self.state) {
            Gesture::Idle => GestureOutcome::None,
            Gesture::Dragging {
                view,
                start,
                modifiers,
                ..
            } => {
                if at == start {
                    GestureOutcome::Click { view, modifiers }
                } else {
                    GestureOutcome::DragEnded(view)
                }
            }
            Gesture::Connecting { source, target } => GestureOutcome::Connect { source, target },
        }
    }

    /// Abandons the gesture.
    pub fn cancel(&mut self) -> GestureOutcome {
        match core::mem::take(&mut self.state) {
            Gesture::Idle => GestureOutcome::None,
            Gesture::Dragging { view, origin, .. } => GestureOutcome::Cancelled {
                view,
                offset: Some(origin),
            },
            Gesture::Connecting { source, .. } => GestureOutcome::Cancelled {
                view: source,
                offset: None,
            },
        }
    }
}
