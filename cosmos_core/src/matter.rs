// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface every scene element implements.
//!
//! A *matter* is anything a [`Plane`](crate::plane::Plane) can own: a
//! sprite, a label, a button. The plane owns the matter's placement record
//! (position, selection flag, mode mask, pending placement); the matter
//! itself owns its extent, its drawing, and its reaction to input.
//!
//! Every hook has a default, so a minimal matter only implements
//! [`extent`](Matter::extent) and [`draw`](Matter::draw).
//!
//! # Events
//!
//! Matters opt into pointer and keyboard delivery through
//! [`events`](Matter::events). High-level events (`on_hover`, `on_tap`,
//! `on_goodbye`, character and text input) need at least
//! [`EventLevel::HighLevel`]; raw pointer press, move, and release need
//! [`EventLevel::LowLevel`].
//!
//! # Sprites
//!
//! A matter that returns `Some` from [`as_movable`](Matter::as_movable) is
//! integrated by [`Plane::on_elapse`](crate::plane::Plane::on_elapse): its
//! velocity is added to its position each frame and [`Movable::on_border`]
//! reports how far it strayed outside the display.

use core::any::Any;

use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::anchor::MatterAnchor;
use crate::canvas::Canvas;
use crate::input::{ButtonState, Modifiers, MouseButton};
use crate::tick::Tick;

/// How much input a matter wants to receive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventLevel {
    /// No events; the matter is inert.
    #[default]
    None,
    /// Hover, tap, goodbye, and keyboard/text events.
    HighLevel,
    /// Everything in [`HighLevel`](Self::HighLevel) plus raw pointer press,
    /// move, and release.
    LowLevel,
}

impl EventLevel {
    /// Returns `true` if high-level events are delivered.
    #[inline]
    #[must_use]
    pub const fn allows_events(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` if raw pointer events are delivered.
    #[inline]
    #[must_use]
    pub const fn allows_low_level(self) -> bool {
        matches!(self, Self::LowLevel)
    }
}

/// A scene element owned by a [`Plane`](crate::plane::Plane).
///
/// Pointer hooks receive positions in matter-local coordinates, with the
/// origin at the matter's left-top corner as drawn. Hooks that return `bool`
/// report whether the event was consumed.
pub trait Matter: Any {
    // -- Construction --

    /// First construction phase, run once on insertion.
    fn pre_construct(&mut self) {}

    /// Main construction phase, run once on insertion.
    fn construct(&mut self) {}

    /// Last construction phase, run once on insertion.
    fn post_construct(&mut self) {}

    // -- Geometry --

    /// Returns the matter's size when located at `at`.
    fn extent(&self, at: Point) -> Size;

    /// Returns the insets between the extent and the visible content.
    fn margin(&self, at: Point) -> Insets {
        _ = at;
        Insets::ZERO
    }

    /// Returns `false` while the extent is not yet known.
    ///
    /// Placement of a matter that is not ready is deferred until the owner
    /// calls [`Plane::notify_matter_ready`](crate::plane::Plane::notify_matter_ready).
    fn ready(&self) -> bool {
        true
    }

    /// Returns the anchor to keep fixed while resizing, or `None` if the
    /// matter cannot be resized.
    fn resize_anchor(&self) -> Option<MatterAnchor> {
        None
    }

    /// Applies a new size. Only called for resizable matters, with a
    /// positive size that differs from `old`.
    fn on_resize(&mut self, size: Size, old: Size) {
        _ = (size, old);
    }

    // -- Frame --

    /// Per-frame update.
    fn update(&mut self, tick: &Tick) {
        _ = tick;
    }

    /// Draws the matter into `bounds`, which is its box in canvas space.
    fn draw(&mut self, canvas: &mut dyn Canvas, bounds: Rect);

    /// Returns `true` to make the matter invisible to hit-testing.
    ///
    /// A concealed matter is still drawn; it just never becomes a hover,
    /// tap, or press target.
    fn concealed(&self) -> bool {
        false
    }

    // -- Input --

    /// Which events this matter receives.
    fn events(&self) -> EventLevel {
        EventLevel::None
    }

    /// Fine-grained hit test after the bounding box matched.
    fn is_colliding_with_mouse(&self, local: Point) -> bool {
        _ = local;
        true
    }

    /// Gains or loses the text caret.
    fn own_caret(&mut self, owned: bool) {
        _ = owned;
    }

    /// Pointer is over the matter.
    fn on_hover(&mut self, local: Point) -> bool {
        _ = local;
        false
    }

    /// Pointer left the matter.
    fn on_goodbye(&mut self, local: Point) -> bool {
        _ = local;
        false
    }

    /// Matter was tapped (left button released over it).
    fn on_tap(&mut self, local: Point) -> bool {
        _ = local;
        false
    }

    /// Raw pointer press.
    fn on_pointer_pressed(&mut self, button: MouseButton, local: Point, clicks: u8) -> bool {
        _ = (button, local, clicks);
        false
    }

    /// Raw pointer motion; `bye` is set when the pointer just left.
    fn on_pointer_move(&mut self, state: ButtonState, local: Point, delta: Vec2, bye: bool) -> bool {
        _ = (state, local, delta, bye);
        false
    }

    /// Raw pointer release.
    fn on_pointer_released(&mut self, button: MouseButton, local: Point, clicks: u8) -> bool {
        _ = (button, local, clicks);
        false
    }

    /// Key press or release while the matter owns the caret.
    fn on_char(&mut self, key: char, modifiers: Modifiers, repeats: u8, pressed: bool) -> bool {
        _ = (key, modifiers, repeats, pressed);
        false
    }

    /// Committed text input while the matter owns the caret.
    fn on_text(&mut self, text: &str, entire: bool) -> bool {
        _ = (text, entire);
        false
    }

    /// Composition (IME) text while the matter owns the caret.
    fn on_editing_text(&mut self, text: &str, pos: usize, span: usize) -> bool {
        _ = (text, pos, span);
        false
    }

    // -- Capabilities --

    /// Returns the sprite view of this matter, if it moves on its own.
    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        None
    }
}

/// A matter that carries its own velocity.
pub trait Movable {
    /// Velocity in units per frame.
    fn speed(&self) -> Vec2;

    /// Replaces the velocity.
    fn set_speed(&mut self, speed: Vec2);

    /// Reports how far the matter lies outside the display on each axis.
    ///
    /// `hdist` is negative past the left edge, positive past the right edge,
    /// and zero when inside; likewise `vdist` for top and bottom. Setting a
    /// velocity component to zero here pins the matter to the edge on that
    /// axis.
    fn on_border(&mut self, hdist: f64, vdist: f64) {
        _ = (hdist, vdist);
    }

    /// Reverses each velocity component whose axis is out of bounds.
    ///
    /// A convenience for [`on_border`](Self::on_border) implementations.
    fn bounce(&mut self, hdist: f64, vdist: f64) {
        let mut speed = self.speed();
        if hdist != 0.0 {
            speed.x = -speed.x;
        }
        if vdist != 0.0 {
            speed.y = -speed.y;
        }
        self.set_speed(speed);
    }

    /// Zeroes each velocity component whose axis is out of bounds.
    fn halt(&mut self, hdist: f64, vdist: f64) {
        let mut speed = self.speed();
        if hdist != 0.0 {
            speed.x = 0.0;
        }
        if vdist != 0.0 {
            speed.y = 0.0;
        }
        self.set_speed(speed);
    }
}
