// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change tracking between draws.
//!
//! Every mutation marks the affected matter on one of the
//! [`dirty`](crate::dirty) channels. [`Plane::take_changes`] drains all
//! channels at once so a renderer can repaint incrementally:
//!
//! 1. **GEOMETRY** — matters that moved or were resized.
//! 2. **SELECTION** — matters whose selection flag flipped.
//! 3. **CONTENT** — matters that became ready, were resized, or are still
//!    waiting for readiness.
//! 4. **TOPOLOGY** — drained into a single flag; insertion, removal, and mode
//!    changes alter what is drawn, not just where.
//!
//! [`PlaneChanges`] holds raw slot indices rather than [`MatterId`] handles so
//! renderers can use the `*_at()` accessors (e.g.
//! [`boundary_at`](Plane::boundary_at)) directly.
//!
//! [`MatterId`]: crate::id::MatterId

use alloc::vec::Vec;

use super::Plane;
use crate::dirty;

/// The set of changes accumulated since the previous
/// [`Plane::take_changes`] call.
#[derive(Clone, Debug, Default)]
pub struct PlaneChanges {
    /// Matters whose position or extent changed.
    pub geometry: Vec<u32>,
    /// Matters whose selection flag changed.
    pub selection: Vec<u32>,
    /// Matters whose content or readiness changed.
    pub content: Vec<u32>,
    /// Matters linked into the ring.
    pub added: Vec<u32>,
    /// Matters removed from the plane.
    pub removed: Vec<u32>,
    /// Whether membership or visibility changed.
    pub topology_changed: bool,
}

impl PlaneChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.selection.clear();
        self.content.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
            && self.selection.is_empty()
            && self.content.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl Plane {
    /// Drains the changes accumulated since the last call.
    pub fn take_changes(&mut self) -> PlaneChanges {
        let mut changes = PlaneChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a
    /// caller-provided buffer.
    pub fn take_changes_into(&mut self, changes: &mut PlaneChanges) {
        changes.clear();

        changes.geometry = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();

        changes.selection = self
            .dirty
            .drain(dirty::SELECTION)
            .deterministic()
            .run()
            .collect();

        changes.content = self
            .dirty
            .drain(dirty::CONTENT)
            .deterministic()
            .run()
            .collect();

        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.topology_changed = !topology.is_empty();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}
