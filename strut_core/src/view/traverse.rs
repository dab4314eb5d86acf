// Copyright 2026 the Strut Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, ViewId};
use super::store::ViewStore;

/// An iterator over the direct subviews of a view, back to front.
///
/// Created by [`ViewStore::subviews`].
#[derive(Debug)]
pub struct Subviews<'a> {
    store: &'a ViewStore,
    current: u32,
}

impl<'a> Subviews<'a> {
    pub(crate) fn new(store: &'a ViewStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Subviews<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(self.store.id_at(idx))
    }
}

/// A depth-first pre-order iterator over a subtree, including its root.
///
/// Created by [`ViewStore::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    store: &'a ViewStore,
    root: u32,
    next: u32,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(store: &'a ViewStore, root: u32) -> Self {
        Self {
            store,
            root,
            next: root,
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        if self.next == INVALID {
            return None;
        }
        let idx = self.next;
        let s = self.store;

        // Advance: first child, else the nearest next sibling walking up,
        // stopping at the subtree root.
        self.next = if s.first_child[idx as usize] != INVALID {
            s.first_child[idx as usize]
        } else {
            let mut cur = idx;
            loop {
                if cur == self.root {
                    break INVALID;
                }
                if s.next_sibling[cur as usize] != INVALID {
                    break s.next_sibling[cur as usize];
                }
                cur = s.parent[cur as usize];
            }
        };
        Some(s.id_at(idx))
    }
}
