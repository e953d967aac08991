// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording matters and hooks shared by unit tests.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect, Size, Vec2};

use crate::anchor::MatterAnchor;
use crate::canvas::Canvas;
use crate::id::MatterId;
use crate::input::{ButtonState, Modifiers, MouseButton};
use crate::matter::{EventLevel, Matter, Movable};
use crate::plane::PlaneHooks;
use crate::tick::Tick;

/// Shared, ordered log of hook invocations.
#[derive(Clone, Debug, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn push(&self, line: String) {
        self.0.borrow_mut().push(line);
    }

    /// Returns and clears the log.
    pub(crate) fn take(&self) -> Vec<String> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// What a [`Block`] sprite does when it hits the display border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Border {
    Keep,
    Bounce,
    Halt,
}

/// A rectangular matter that logs every hook it receives.
#[derive(Debug)]
pub(crate) struct Block {
    pub(crate) name: &'static str,
    pub(crate) size: Size,
    pub(crate) events: EventLevel,
    pub(crate) ready: bool,
    pub(crate) anchor: Option<MatterAnchor>,
    pub(crate) speed: Option<Vec2>,
    pub(crate) border: Border,
    pub(crate) colliding: bool,
    pub(crate) concealed: bool,
    /// What every input hook reports back.
    pub(crate) consumes: bool,
    journal: Journal,
}

impl Block {
    pub(crate) fn new(name: &'static str, width: f64, height: f64, journal: &Journal) -> Self {
        Self {
            name,
            size: Size::new(width, height),
            events: EventLevel::None,
            ready: true,
            anchor: None,
            speed: None,
            border: Border::Keep,
            colliding: true,
            concealed: false,
            consumes: true,
            journal: journal.clone(),
        }
    }

    pub(crate) fn events(mut self, level: EventLevel) -> Self {
        self.events = level;
        self
    }

    /// Makes every input hook report the event as not consumed.
    pub(crate) fn passive(mut self) -> Self {
        self.consumes = false;
        self
    }

    pub(crate) fn pending(mut self) -> Self {
        self.ready = false;
        self
    }

    pub(crate) fn resizable(mut self, anchor: MatterAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub(crate) fn moving(mut self, speed: Vec2, border: Border) -> Self {
        self.speed = Some(speed);
        self.border = border;
        self
    }

    fn log(&self, what: &str) {
        self.journal.push(format!("{}.{what}", self.name));
    }
}

impl Matter for Block {
    fn construct(&mut self) {
        self.log("construct");
    }

    fn extent(&self, at: Point) -> Size {
        _ = at;
        self.size
    }

    fn ready(&self) -> bool {
        self.ready
    }

    fn resize_anchor(&self) -> Option<MatterAnchor> {
        self.anchor
    }

    fn on_resize(&mut self, size: Size, old: Size) {
        _ = old;
        self.size = size;
        self.log("resize");
    }

    fn update(&mut self, tick: &Tick) {
        self.log(&format!("update{}", tick.count));
    }

    fn draw(&mut self, canvas: &mut dyn Canvas, bounds: Rect) {
        _ = (canvas, bounds);
        self.log("draw");
    }

    fn concealed(&self) -> bool {
        self.concealed
    }

    fn events(&self) -> EventLevel {
        self.events
    }

    fn is_colliding_with_mouse(&self, local: Point) -> bool {
        _ = local;
        self.colliding
    }

    fn own_caret(&mut self, owned: bool) {
        self.log(if owned { "caret+" } else { "caret-" });
    }

    fn on_hover(&mut self, local: Point) -> bool {
        self.log(&format!("hover({},{})", local.x, local.y));
        self.consumes
    }

    fn on_goodbye(&mut self, local: Point) -> bool {
        _ = local;
        self.log("goodbye");
        self.consumes
    }

    fn on_tap(&mut self, local: Point) -> bool {
        self.log(&format!("tap({},{})", local.x, local.y));
        self.consumes
    }

    fn on_pointer_pressed(&mut self, button: MouseButton, local: Point, clicks: u8) -> bool {
        _ = (button, clicks);
        self.log(&format!("press({},{})", local.x, local.y));
        self.consumes
    }

    fn on_pointer_move(&mut self, state: ButtonState, local: Point, delta: Vec2, bye: bool) -> bool {
        _ = (state, local, delta);
        self.log(if bye { "move-bye" } else { "move" });
        self.consumes
    }

    fn on_pointer_released(&mut self, button: MouseButton, local: Point, clicks: u8) -> bool {
        _ = (button, local, clicks);
        self.log("release");
        self.consumes
    }

    fn on_char(&mut self, key: char, modifiers: Modifiers, repeats: u8, pressed: bool) -> bool {
        _ = (modifiers, repeats, pressed);
        self.log(&format!("char({key})"));
        self.consumes
    }

    fn on_text(&mut self, text: &str, entire: bool) -> bool {
        _ = entire;
        self.log(&format!("text({text})"));
        self.consumes
    }

    fn on_editing_text(&mut self, text: &str, pos: usize, span: usize) -> bool {
        self.log(&format!("editing({text},{pos},{span})"));
        self.consumes
    }

    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        if self.speed.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl Movable for Block {
    fn speed(&self) -> Vec2 {
        self.speed.unwrap_or(Vec2::ZERO)
    }

    fn set_speed(&mut self, speed: Vec2) {
        self.speed = Some(speed);
    }

    fn on_border(&mut self, hdist: f64, vdist: f64) {
        self.log(&format!("border({hdist},{vdist})"));
        match self.border {
            Border::Keep => {}
            Border::Bounce => self.bounce(hdist, vdist),
            Border::Halt => self.halt(hdist, vdist),
        }
    }
}

/// Plane hooks that log every callback, keyed by matter slot index.
#[derive(Debug)]
pub(crate) struct RecordingHooks {
    pub(crate) selectable: bool,
    pub(crate) multiple: bool,
    journal: Journal,
}

impl RecordingHooks {
    pub(crate) fn new(journal: &Journal) -> Self {
        Self {
            selectable: true,
            multiple: false,
            journal: journal.clone(),
        }
    }

    pub(crate) fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub(crate) fn unselectable(mut self) -> Self {
        self.selectable = false;
        self
    }

    fn log(&self, what: &str, id: MatterId) {
        self.journal.push(format!("plane.{what}#{}", id.index()));
    }
}

impl PlaneHooks for RecordingHooks {
    fn can_select(&self, id: MatterId, matter: &dyn Matter) -> bool {
        _ = (id, matter);
        self.selectable
    }

    fn can_select_multiple(&self) -> bool {
        self.multiple
    }

    fn before_select(&mut self, id: MatterId, selected: bool) {
        self.log(if selected { "before+" } else { "before-" }, id);
    }

    fn after_select(&mut self, id: MatterId, selected: bool) {
        self.log(if selected { "after+" } else { "after-" }, id);
    }

    fn on_focus(&mut self, id: MatterId, focused: bool) {
        self.log(if focused { "focus+" } else { "focus-" }, id);
    }

    fn on_hover(&mut self, id: MatterId, local: Point) {
        _ = local;
        self.log("hover", id);
    }

    fn on_goodbye(&mut self, id: MatterId, local: Point) {
        _ = local;
        self.log("goodbye", id);
    }

    fn on_tap(&mut self, id: MatterId, local: Point) {
        _ = local;
        self.log("tap", id);
    }

    fn on_tap_selected(&mut self, id: MatterId, local: Point) {
        _ = local;
        self.log("tap-selected", id);
    }

    fn on_matter_ready(&mut self, id: MatterId) {
        self.log("ready", id);
    }
}

/// Formats a plane hook line the way [`RecordingHooks`] logs it.
pub(crate) fn plane_line(what: &str, id: MatterId) -> String {
    format!("plane.{what}#{}", id.index())
}
