// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane-level policy and notification hooks.

use core::any::Any;

use kurbo::{Point, Rect};

use crate::canvas::{Canvas, SELECTION_COLOR};
use crate::id::MatterId;
use crate::matter::Matter;

/// Selection policy and interaction callbacks for a [`Plane`](super::Plane).
///
/// The plane runs its own bookkeeping (ring, selection flags, focus, hover
/// target) and calls these hooks at fixed points, always after the matter's
/// own hook for the same event. All methods have defaults: nothing is
/// selectable and every notification is ignored.
pub trait PlaneHooks: Any {
    /// Returns `true` if `matter` may become selected.
    fn can_select(&self, id: MatterId, matter: &dyn Matter) -> bool {
        _ = (id, matter);
        false
    }

    /// Returns `true` if more than one matter may be selected at once.
    fn can_select_multiple(&self) -> bool {
        false
    }

    /// Runs before a selection flag flips to `selected`.
    fn before_select(&mut self, id: MatterId, selected: bool) {
        _ = (id, selected);
    }

    /// Runs after a selection flag flipped to `selected`.
    fn after_select(&mut self, id: MatterId, selected: bool) {
        _ = (id, selected);
    }

    /// Runs when `id` gains (`true`) or loses (`false`) the caret.
    fn on_focus(&mut self, id: MatterId, focused: bool) {
        _ = (id, focused);
    }

    /// Pointer is over `id`.
    fn on_hover(&mut self, id: MatterId, local: Point) {
        _ = (id, local);
    }

    /// Pointer left `id`.
    fn on_goodbye(&mut self, id: MatterId, local: Point) {
        _ = (id, local);
    }

    /// `id` was tapped, after selection was updated.
    fn on_tap(&mut self, id: MatterId, local: Point) {
        _ = (id, local);
    }

    /// `id` was tapped and is selected afterwards.
    fn on_tap_selected(&mut self, id: MatterId, local: Point) {
        _ = (id, local);
    }

    /// `id` finished construction and placement.
    fn on_matter_ready(&mut self, id: MatterId) {
        _ = id;
    }

    /// Outlines a selected matter whose drawn box is `bounds`.
    fn draw_visible_selection(&mut self, canvas: &mut dyn Canvas, bounds: Rect) {
        canvas.stroke_rect(bounds, SELECTION_COLOR);
    }
}

/// [`PlaneHooks`] with every default: no selection, no notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

impl PlaneHooks for DefaultHooks {}

/// Hooks that allow selecting every matter, optionally several at once.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectAll {
    /// Whether more than one matter may be selected.
    pub multiple: bool,
}

impl PlaneHooks for SelectAll {
    fn can_select(&self, id: MatterId, matter: &dyn Matter) -> bool {
        _ = (id, matter);
        true
    }

    fn can_select_multiple(&self) -> bool {
        self.multiple
    }
}
