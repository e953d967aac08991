// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planes: rings of matters with selection, focus, and pointer routing.
//!
//! A [`Plane`] exclusively owns its matters. They live in a circular
//! doubly-linked ring in insertion order; the head is the oldest member and
//! the tail the newest. Draw order follows the ring (head first, tail on
//! top) and hit-testing walks it backwards so the topmost matter wins.
//!
//! Each member carries a placement record kept by the plane: its position in
//! plane coordinates, its selection flag, its mode mask, and an optional
//! pending placement for matters whose extent is not known yet.
//!
//! # Mode masking
//!
//! A matter is *mode-visible* ("unmasked") iff
//! `matter_mode & plane_mode == matter_mode`. Masked matters are skipped by
//! drawing, hit-testing, selection, focus, and per-frame updates. A matter's
//! mode is the plane's mode at the time of insertion unless retagged with
//! [`Plane::set_matter_mode`].
//!
//! # Handles
//!
//! Matters are addressed by [`MatterId`] handles. Operations given a stale
//! handle, or a handle to a matter that is masked when the operation
//! requires visibility, do nothing.
//!
//! # Redraw batching
//!
//! Every visible mutation signals the plane's [`UpdateSequence`]. Compound
//! operations open a nested sequence so the host sees one redraw request.

mod changes;
mod draw;
mod elapse;
mod hooks;
mod place;
mod route;
mod select;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::sync::atomic::{AtomicU32, Ordering};

use kurbo::{Point, Size, Vec2};
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::canvas::Rgba;
use crate::dirty;
use crate::id::MatterId;
use crate::matter::Matter;
use crate::ring::Ring;
use crate::trace::{MatterEvent, MatterEventKind, Tracer};
use crate::update::UpdateSequence;

pub use changes::PlaneChanges;
pub use hooks::{DefaultHooks, PlaneHooks, SelectAll};

/// Source of per-plane stamps carried by [`MatterId`].
static NEXT_PLANE_STAMP: AtomicU32 = AtomicU32::new(0);

/// Deferred placement request, replayed once the matter is ready.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlacementRequest {
    pub(crate) target: Point,
    pub(crate) fx: f64,
    pub(crate) fy: f64,
    pub(crate) offset: Vec2,
}

/// Whether a matter's position is final.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum Placement {
    #[default]
    Resolved,
    Pending(PlacementRequest),
}

/// The plane's bookkeeping for one member.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MatterRecord {
    pub(crate) position: Point,
    pub(crate) selected: bool,
    pub(crate) mode: u32,
    pub(crate) placement: Placement,
}

impl MatterRecord {
    #[inline]
    pub(crate) fn unmasked(&self, plane_mode: u32) -> bool {
        self.mode & plane_mode == self.mode
    }
}

pub(crate) struct MatterEntry {
    pub(crate) matter: Box<dyn Matter>,
    pub(crate) record: MatterRecord,
}

/// A named ring of matters with interaction state.
///
/// See the [module docs](self) for the ownership and masking model.
pub struct Plane {
    name: String,
    stamp: u32,

    // -- Membership --
    pub(crate) ring: Ring<MatterEntry>,
    pub(crate) mode: u32,

    // -- Interaction --
    pub(crate) focused: Option<MatterId>,
    pub(crate) hovering: Option<MatterId>,
    pub(crate) hooks: Box<dyn PlaneHooks>,

    // -- Geometry --
    pub(crate) translate: Vec2,
    pub(crate) scale: Vec2,
    pub(crate) display: Size,
    pub(crate) background: Option<Rgba>,
    pub(crate) bounds: Cell<Option<kurbo::Rect>>,

    // -- Shared with the owning cosmos --
    pub(crate) updates: UpdateSequence,
    pub(crate) tracer: Tracer,

    // -- Change tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) journal: Vec<MatterEvent>,
}

impl core::fmt::Debug for Plane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Plane")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("matters", &self.ring.len())
            .field("focused", &self.focused)
            .field("hovering", &self.hovering)
            .finish_non_exhaustive()
    }
}

impl Plane {
    /// Creates an empty plane with [`DefaultHooks`].
    #[must_use]
    pub fn new(name: impl Into<String>, mode: u32) -> Self {
        Self::with_hooks(name, mode, DefaultHooks)
    }

    /// Creates an empty plane with the given selection policy and callbacks.
    #[must_use]
    pub fn with_hooks(name: impl Into<String>, mode: u32, hooks: impl PlaneHooks) -> Self {
        Self {
            name: name.into(),
            stamp: NEXT_PLANE_STAMP.fetch_add(1, Ordering::Relaxed),
            ring: Ring::new(),
            mode,
            focused: None,
            hovering: None,
            hooks: Box::new(hooks),
            translate: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            display: Size::ZERO,
            background: None,
            bounds: Cell::new(None),
            updates: UpdateSequence::new(),
            tracer: Tracer::none(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            journal: Vec::new(),
        }
    }

    /// Returns the plane's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the plane's hooks.
    #[must_use]
    pub fn hooks(&self) -> &dyn PlaneHooks {
        &*self.hooks
    }

    /// Returns the plane's hooks downcast to their concrete type.
    #[must_use]
    pub fn hooks_as<H: PlaneHooks>(&self) -> Option<&H> {
        let hooks: &dyn core::any::Any = &*self.hooks;
        hooks.downcast_ref()
    }

    /// Mutable variant of [`hooks_as`](Self::hooks_as).
    pub fn hooks_as_mut<H: PlaneHooks>(&mut self) -> Option<&mut H> {
        let hooks: &mut dyn core::any::Any = &mut *self.hooks;
        hooks.downcast_mut()
    }

    /// Returns the update sequence this plane signals.
    #[must_use]
    pub fn updates(&self) -> &UpdateSequence {
        &self.updates
    }

    /// Routes this plane's trace events to `tracer`.
    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = tracer;
    }

    /// Joins the update sequence and tracer of an owning cosmos.
    pub(crate) fn attach(&mut self, updates: UpdateSequence, tracer: Tracer) {
        self.updates = updates;
        self.tracer = tracer;
    }

    // -- Membership queries --

    /// Number of matters in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if the ring is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns `true` if `id` names a matter in this plane's ring.
    #[must_use]
    pub fn contains(&self, id: MatterId) -> bool {
        self.member(id).is_some()
    }

    /// Iterates members from head (oldest) to tail (newest).
    pub fn matters(&self) -> impl Iterator<Item = MatterId> + '_ {
        self.ring.members().map(|idx| self.id_at(idx))
    }

    /// Returns the oldest member.
    #[must_use]
    pub fn head(&self) -> Option<MatterId> {
        self.ring.head().map(|idx| self.id_at(idx))
    }

    /// Returns the member after `id` in ring order, wrapping at the tail.
    #[must_use]
    pub fn next_matter(&self, id: MatterId) -> Option<MatterId> {
        let idx = self.member(id)?;
        self.ring.next_of(idx).map(|n| self.id_at(n))
    }

    /// Returns the member before `id` in ring order, wrapping at the head.
    #[must_use]
    pub fn prev_matter(&self, id: MatterId) -> Option<MatterId> {
        let idx = self.member(id)?;
        self.ring.prev_of(idx).map(|p| self.id_at(p))
    }

    /// Returns the matter behind `id`.
    #[must_use]
    pub fn matter(&self, id: MatterId) -> Option<&dyn Matter> {
        let idx = self.slot(id)?;
        self.ring.get(idx).map(|entry| &*entry.matter)
    }

    /// Returns the matter behind `id` mutably.
    ///
    /// Call [`notify_updated`](Self::notify_updated) after changing anything
    /// visible.
    pub fn matter_mut(&mut self, id: MatterId) -> Option<&mut dyn Matter> {
        let idx = self.slot(id)?;
        self.ring.get_mut(idx).map(|entry| &mut *entry.matter)
    }

    /// Returns the matter behind `id` downcast to its concrete type.
    #[must_use]
    pub fn downcast<M: Matter>(&self, id: MatterId) -> Option<&M> {
        let entry = self.ring.get(self.slot(id)?)?;
        let matter: &dyn core::any::Any = &*entry.matter;
        matter.downcast_ref()
    }

    /// Mutable variant of [`downcast`](Self::downcast).
    pub fn downcast_mut<M: Matter>(&mut self, id: MatterId) -> Option<&mut M> {
        let idx = self.slot(id)?;
        let entry = self.ring.get_mut(idx)?;
        let matter: &mut dyn core::any::Any = &mut *entry.matter;
        matter.downcast_mut()
    }

    // -- Mode --

    /// Returns the plane's current mode mask.
    #[must_use]
    pub fn current_mode(&self) -> u32 {
        self.mode
    }

    /// Switches the plane's mode mask.
    ///
    /// Clears the selection first. A hover target that becomes masked is
    /// forgotten without a goodbye.
    pub fn change_mode(&mut self, mode: u32) {
        if mode != self.mode {
            let _scope = self.updates.begin();
            self.no_selected();
            self.mode = mode;
            self.drop_masked_hover();
            self.invalidate_bounds();
            for idx in self.ring.order() {
                self.dirty.mark(idx, dirty::TOPOLOGY);
            }
            self.updates.notify_updated();
        }
    }

    /// Retags a member's mode mask.
    pub fn set_matter_mode(&mut self, id: MatterId, mode: u32) {
        let Some(idx) = self.member(id) else {
            return;
        };
        let Some(entry) = self.ring.get_mut(idx) else {
            return;
        };
        if entry.record.mode != mode {
            let was_selected = entry.record.selected;
            entry.record.mode = mode;
            if was_selected && !entry.record.unmasked(self.mode) {
                entry.record.selected = false;
                self.dirty.mark(idx, dirty::SELECTION);
            }
            self.dirty.mark(idx, dirty::TOPOLOGY);
            self.drop_masked_hover();
            self.invalidate_bounds();
            self.updates.notify_updated();
        }
    }

    /// Returns the mode mask a member was tagged with.
    #[must_use]
    pub fn matter_mode(&self, id: MatterId) -> Option<u32> {
        let idx = self.member(id)?;
        self.ring.get(idx).map(|entry| entry.record.mode)
    }

    /// Returns `true` if `id` is a member and visible under the current mode.
    #[must_use]
    pub fn matter_unmasked(&self, id: MatterId) -> bool {
        self.unmasked_member(id).is_some()
    }

    // -- Appearance --

    /// Sets the fill painted behind the matters; `None` paints nothing.
    pub fn set_background(&mut self, background: Option<Rgba>) {
        if self.background != background {
            self.background = background;
            self.updates.notify_updated();
        }
    }

    /// Returns the background fill.
    #[must_use]
    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    /// Sets the display size used for border tests in
    /// [`on_elapse`](Self::on_elapse).
    pub fn set_display_size(&mut self, size: Size) {
        self.display = size;
    }

    /// Returns the display size.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.display
    }

    /// Signals that something visible changed outside the plane's knowledge.
    pub fn notify_updated(&self) {
        self.updates.notify_updated();
    }

    // -- Tracing --

    /// Emits collected matter events to the tracer.
    ///
    /// Events are only collected with the `trace-rich` feature.
    pub fn flush_trace(&mut self, frame: u32) {
        if self.journal.is_empty() {
            return;
        }
        #[cfg(feature = "trace-rich")]
        self.tracer.matter_events(frame, &self.journal);
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = frame;
        }
        self.journal.clear();
    }

    // -- Internal helpers --

    pub(crate) fn id_at(&self, idx: u32) -> MatterId {
        MatterId {
            plane: self.stamp,
            idx,
            generation: self.ring.generation(idx),
        }
    }

    /// Resolves a live handle issued by this plane, linked or not.
    pub(crate) fn slot(&self, id: MatterId) -> Option<u32> {
        if id.plane != self.stamp {
            return None;
        }
        self.ring.resolve(id.idx, id.generation)
    }

    /// Resolves a handle to a ring member.
    pub(crate) fn member(&self, id: MatterId) -> Option<u32> {
        self.slot(id).filter(|&idx| self.ring.is_linked(idx))
    }

    /// Resolves a handle to a mode-visible ring member.
    pub(crate) fn unmasked_member(&self, id: MatterId) -> Option<u32> {
        let idx = self.member(id)?;
        let entry = self.ring.get(idx)?;
        entry.record.unmasked(self.mode).then_some(idx)
    }

    /// Forgets the hover target once it is no longer mode-visible.
    fn drop_masked_hover(&mut self) {
        if let Some(id) = self.hovering
            && self.unmasked_member(id).is_none()
        {
            self.hovering = None;
        }
    }

    pub(crate) fn invalidate_bounds(&self) {
        self.bounds.set(None);
    }

    #[inline]
    pub(crate) fn note(&mut self, idx: u32, kind: MatterEventKind) {
        #[cfg(feature = "trace-rich")]
        self.journal.push(MatterEvent {
            matter_index: idx,
            kind,
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = (idx, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Block, Journal};

    #[test]
    fn new_plane_is_empty() {
        let plane = Plane::new("title", 0);
        assert_eq!(plane.name(), "title");
        assert!(plane.is_empty());
        assert_eq!(plane.head(), None);
        assert_eq!(plane.current_mode(), 0);
        assert!(plane.hooks_as::<DefaultHooks>().is_some());
    }

    #[test]
    fn downcast_reaches_concrete_matter() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.insert(Block::new("a", 10.0, 10.0, &journal), Point::ZERO);
        assert_eq!(plane.downcast::<Block>(id).map(|b| b.name), Some("a"));
        plane.downcast_mut::<Block>(id).unwrap().size = Size::new(3.0, 4.0);
        assert_eq!(plane.matter_boundary(id).unwrap().size(), Size::new(3.0, 4.0));
    }

    #[test]
    fn change_mode_masks_and_clears_selection() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0x1, SelectAll { multiple: false });
        let a = plane.insert(Block::new("a", 10.0, 10.0, &journal), Point::ZERO);
        plane.change_mode(0x2);
        let b = plane.insert(Block::new("b", 10.0, 10.0, &journal), Point::ZERO);
        plane.change_mode(0x1);
        assert_eq!(plane.matter_mode(a), Some(0x1));
        assert_eq!(plane.matter_mode(b), Some(0x2));

        plane.set_selected(a);
        assert!(plane.is_selected(a));
        plane.change_mode(0x2);
        assert!(!plane.is_selected(a), "mode change clears the selection");
        assert!(!plane.matter_unmasked(a));
        assert!(plane.matter_unmasked(b));
    }

    #[test]
    fn mode_masking_hides_matters() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0x1, SelectAll { multiple: true });
        let a = plane.insert(Block::new("a", 10.0, 10.0, &journal), Point::new(0.0, 0.0));
        let b = plane.insert(Block::new("b", 10.0, 10.0, &journal), Point::new(50.0, 0.0));
        plane.set_matter_mode(b, 0x2);

        assert_eq!(plane.find_matter(Point::new(55.0, 5.0)), None);
        assert_eq!(plane.find_matter(Point::new(5.0, 5.0)), Some(a));

        plane.set_selected(b);
        assert!(!plane.is_selected(b), "masked matters cannot be selected");
        plane.set_caret_owner(Some(b));
        assert_eq!(plane.focused_matter(), None);

        plane.change_mode(0x3);
        assert_eq!(plane.find_matter(Point::new(55.0, 5.0)), Some(b));
    }

    #[test]
    fn set_matter_mode_drops_selection_of_masked_matter() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0x1, SelectAll { multiple: false });
        let a = plane.insert(Block::new("a", 10.0, 10.0, &journal), Point::ZERO);
        plane.set_selected(a);
        plane.set_matter_mode(a, 0x4);
        assert!(!plane.is_selected(a));
        assert_eq!(plane.count_selected(), 0);
    }

    #[test]
    fn background_change_signals_update() {
        let mut plane = Plane::new("p", 0);
        plane.set_background(Some(Rgba::opaque(0x10_2030)));
        assert_eq!(plane.updates().redraw_count(), 1);
        plane.set_background(Some(Rgba::opaque(0x10_2030)));
        assert_eq!(plane.updates().redraw_count(), 1, "same background is a no-op");
    }
}
