// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-testing and input routing.
//!
//! Pointer events are hit-tested against the ring from tail to head, so the
//! matter drawn on top wins. Matters receive positions in local coordinates
//! relative to their drawn left-top corner. For every event the matter's own
//! hook runs first and the plane's [`PlaneHooks`](super::PlaneHooks) second.
//!
//! High-level matter hooks are only called when the matter's
//! [`EventLevel`](crate::matter::EventLevel) allows events, raw pointer hooks
//! only for [`EventLevel::LowLevel`](crate::matter::EventLevel::LowLevel). A
//! hook that reports the event as consumed signals an update.

use kurbo::{Point, Vec2};

use super::Plane;
use crate::id::MatterId;
use crate::input::{ButtonState, Modifiers, MouseButton};
use crate::matter::Matter;
use crate::trace::MatterEventKind;

impl Plane {
    // -- Hit testing --

    /// Returns the topmost mode-visible, unconcealed matter under `at`.
    ///
    /// `at` is in canvas coordinates: each matter's box is tested after the
    /// plane's translation and scale, inclusive of its right and bottom
    /// edges, and then refined by
    /// [`is_colliding_with_mouse`](crate::matter::Matter::is_colliding_with_mouse).
    #[must_use]
    pub fn find_matter(&self, at: Point) -> Option<MatterId> {
        self.ring
            .members_rev()
            .find(|&idx| {
                let Some(entry) = self.ring.get(idx) else {
                    return false;
                };
                if !entry.record.unmasked(self.mode) || entry.matter.concealed() {
                    return false;
                }
                let Some(rect) = self.screen_boundary_at(idx) else {
                    return false;
                };
                let inside = at.x >= rect.x0 && at.x <= rect.x1 && at.y >= rect.y0 && at.y <= rect.y1;
                inside && entry.matter.is_colliding_with_mouse(at - rect.origin().to_vec2())
            })
            .map(|idx| self.id_at(idx))
    }

    /// Returns the matter the pointer currently hovers.
    #[must_use]
    pub fn hovering_matter(&self) -> Option<MatterId> {
        self.hovering.filter(|&id| self.unmasked_member(id).is_some())
    }

    // -- Pointer --

    /// Routes a button press.
    ///
    /// Only single left clicks are handled. The hit matter (or nothing)
    /// becomes the caret owner and the selection is cleared before a
    /// low-level matter receives the press. Returns `true` if the hit matter
    /// consumed the press.
    pub fn on_pointer_pressed(&mut self, button: MouseButton, at: Point, clicks: u8) -> bool {
        if button != MouseButton::Left || clicks != 1 {
            return false;
        }
        let hit = self.find_matter(at);
        self.set_caret_owner(hit);
        self.no_selected();
        let Some(id) = hit else {
            return false;
        };
        let local = self.local_point(id, at);
        self.with_matter(id, |matter| {
            matter.events().allows_low_level() && matter.on_pointer_pressed(button, local, clicks)
        })
    }

    /// Routes pointer motion.
    ///
    /// Motion with any button held is ignored. When the matter under the
    /// pointer changes, the previous hover target says goodbye before the
    /// new one is greeted. Returns `true` if the pointer is over a matter.
    pub fn on_pointer_move(&mut self, state: ButtonState, at: Point, delta: Vec2) -> bool {
        if !state.is_empty() {
            return false;
        }
        let hit = self.find_matter(at);
        if hit != self.hovering {
            self.say_goodbye(state, at, delta);
        }
        let Some(id) = hit else {
            return false;
        };
        let entered = self.hovering != Some(id);
        self.hovering = Some(id);
        let local = self.local_point(id, at);
        self.with_matter(id, |matter| {
            let level = matter.events();
            let hovered = level.allows_events() && matter.on_hover(local);
            let moved = level.allows_low_level() && matter.on_pointer_move(state, local, delta, false);
            hovered || moved
        });
        self.hooks.on_hover(id, local);
        if entered && let Some(idx) = self.member(id) {
            self.note(idx, MatterEventKind::Hovered);
        }
        true
    }

    /// Routes a button release.
    ///
    /// Only single left clicks are handled. A hit matter is tapped and then
    /// the plane applies its tap policy: an unselected matter becomes the
    /// sole selection (and the caret owner, if it takes events) or, when the
    /// policy refuses, the selection is cleared. Returns `true` if the
    /// tapped matter is selected afterwards.
    pub fn on_pointer_released(&mut self, button: MouseButton, at: Point, clicks: u8) -> bool {
        if button != MouseButton::Left || clicks != 1 {
            return false;
        }
        let Some(id) = self.find_matter(at) else {
            return false;
        };
        let local = self.local_point(id, at);
        self.with_matter(id, |matter| {
            let level = matter.events();
            let tapped = level.allows_events() && matter.on_tap(local);
            let released =
                level.allows_low_level() && matter.on_pointer_released(button, local, clicks);
            tapped || released
        });
        if let Some(idx) = self.member(id) {
            self.note(idx, MatterEventKind::Tapped);
        }
        self.tap(id, local)
    }

    /// Scroll events are not handled by planes.
    pub fn on_scroll(&mut self, delta: Vec2) -> bool {
        _ = delta;
        false
    }

    // -- Keyboard and text --

    /// Forwards a key to the caret owner.
    pub fn on_char(&mut self, key: char, modifiers: Modifiers, repeats: u8, pressed: bool) -> bool {
        self.with_focused(|matter| matter.on_char(key, modifiers, repeats, pressed))
    }

    /// Forwards committed text to the caret owner.
    pub fn on_text(&mut self, text: &str, entire: bool) -> bool {
        self.with_focused(|matter| matter.on_text(text, entire))
    }

    /// Forwards in-progress composition text to the caret owner.
    pub fn on_editing_text(&mut self, text: &str, pos: usize, span: usize) -> bool {
        self.with_focused(|matter| matter.on_editing_text(text, pos, span))
    }

    // -- Internals --

    fn tap(&mut self, id: MatterId, local: Point) -> bool {
        let _scope = self.updates.begin();
        if !self.is_selected(id) {
            self.set_selected(id);
            if self.is_selected(id) {
                let takes_events = self
                    .matter(id)
                    .is_some_and(|matter| matter.events().allows_events());
                if takes_events {
                    self.set_caret_owner(Some(id));
                }
            } else {
                self.no_selected();
            }
        }
        self.hooks.on_tap(id, local);
        let selected = self.is_selected(id);
        if selected {
            self.hooks.on_tap_selected(id, local);
        }
        selected
    }

    fn say_goodbye(&mut self, state: ButtonState, at: Point, delta: Vec2) {
        let Some(id) = self.hovering.take() else {
            return;
        };
        let Some(idx) = self.member(id) else {
            return;
        };
        let local = self.local_point(id, at);
        self.with_matter(id, |matter| {
            let level = matter.events();
            let left = level.allows_events() && matter.on_goodbye(local);
            let moved = level.allows_low_level() && matter.on_pointer_move(state, local, delta, true);
            left || moved
        });
        self.hooks.on_goodbye(id, local);
        self.note(idx, MatterEventKind::Goodbye);
    }

    fn local_point(&self, id: MatterId, at: Point) -> Point {
        let origin = self
            .matter_screen_boundary(id)
            .map_or(Point::ZERO, |rect| rect.origin());
        at - origin.to_vec2()
    }

    /// Runs `f` on a member and signals an update if it reports the event
    /// as consumed.
    fn with_matter(&mut self, id: MatterId, f: impl FnOnce(&mut dyn Matter) -> bool) -> bool {
        let Some(idx) = self.member(id) else {
            return false;
        };
        let Some(entry) = self.ring.get_mut(idx) else {
            return false;
        };
        let consumed = f(&mut *entry.matter);
        if consumed {
            self.updates.notify_updated();
        }
        consumed
    }

    fn with_focused(&mut self, f: impl FnOnce(&mut dyn Matter) -> bool) -> bool {
        match self.focused_matter() {
            Some(id) => self.with_matter(id, f),
            None => false,
        }
    }
}
