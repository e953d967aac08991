// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion, removal, placement, and geometry queries.
//!
//! Placing a matter means choosing the position such that the point at
//! fractions `(fx, fy)` of its extent lands on a target point, then adding an
//! offset:
//!
//! ```text
//! position = target - extent * (fx, fy) + offset
//! ```
//!
//! When the matter is not [ready](crate::matter::Matter::ready) its extent is
//! unknown, so the request is stashed and the matter is placed as if its
//! extent were zero. [`Plane::notify_matter_ready`] replays the stashed
//! request exactly once.

use alloc::boxed::Box;

use kurbo::{Point, Rect, Size, Vec2};

use super::{MatterEntry, MatterRecord, Placement, PlacementRequest, Plane};
use crate::anchor::MatterAnchor;
use crate::dirty;
use crate::id::MatterId;
use crate::matter::Matter;
use crate::trace::MatterEventKind;

const UNIT_SCALE: Vec2 = Vec2::new(1.0, 1.0);

impl Plane {
    // -- Insertion --

    /// Stores `matter` in this plane without linking it into the ring.
    ///
    /// The returned handle can be passed to [`insert_at`](Self::insert_at).
    /// A created matter is invisible to every other operation until then.
    pub fn create(&mut self, matter: impl Matter) -> MatterId {
        self.create_boxed(Box::new(matter))
    }

    /// Like [`create`](Self::create), for an already boxed matter.
    pub fn create_boxed(&mut self, matter: Box<dyn Matter>) -> MatterId {
        let idx = self.ring.alloc(MatterEntry {
            matter,
            record: MatterRecord::default(),
        });
        self.id_at(idx)
    }

    /// Creates `matter` and inserts it with its left-top corner at `at`.
    pub fn insert(&mut self, matter: impl Matter, at: Point) -> MatterId {
        self.insert_anchored(matter, at, MatterAnchor::LT, Vec2::ZERO)
    }

    /// Creates `matter` and inserts it with `anchor` on `at`, shifted by
    /// `offset`.
    pub fn insert_anchored(
        &mut self,
        matter: impl Matter,
        at: Point,
        anchor: MatterAnchor,
        offset: Vec2,
    ) -> MatterId {
        let id = self.create(matter);
        self.insert_at(id, at, anchor.fractions(), offset);
        id
    }

    /// Links a created matter at the tail of the ring and places it.
    ///
    /// Runs the construction protocol (`pre_construct`, `construct`,
    /// `post_construct`), then places the matter so that the point at
    /// `fraction` of its extent lands on `at`, plus `offset`. A ready matter
    /// is rescaled to the plane's scale and announced through
    /// [`PlaneHooks::on_matter_ready`](super::PlaneHooks::on_matter_ready);
    /// otherwise the placement waits for
    /// [`notify_matter_ready`](Self::notify_matter_ready).
    ///
    /// The matter takes the plane's current mode. Returns `false` without
    /// doing anything if the handle is stale or the matter is already in the
    /// ring.
    pub fn insert_at(&mut self, id: MatterId, at: Point, fraction: (f64, f64), offset: Vec2) -> bool {
        let Some(idx) = self.slot(id) else {
            return false;
        };
        if self.ring.is_linked(idx) {
            return false;
        }

        let _scope = self.updates.begin();
        let mode = self.mode;
        self.ring.link_tail(idx);
        if let Some(entry) = self.ring.get_mut(idx) {
            entry.record = MatterRecord {
                mode,
                ..MatterRecord::default()
            };
            entry.matter.pre_construct();
            entry.matter.construct();
            entry.matter.post_construct();
        }
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.note(idx, MatterEventKind::Inserted);

        let (fx, fy) = fraction;
        self.place(
            idx,
            PlacementRequest {
                target: at,
                fx,
                fy,
                offset,
            },
        );
        self.invalidate_bounds();

        if self.is_pending_at(idx) {
            self.dirty.mark(idx, dirty::CONTENT);
            self.updates.notify_updated();
        } else {
            if self.scale != UNIT_SCALE {
                self.do_resize(idx, self.scale, UNIT_SCALE);
            }
            self.updates.notify_updated();
            self.hooks.on_matter_ready(id);
        }
        true
    }

    /// Replays the stashed placement of a matter that just became ready.
    ///
    /// Does nothing unless the matter has a pending placement. The replay
    /// uses the now-known extent, applies the plane's scale, clears the
    /// pending record, and fires
    /// [`PlaneHooks::on_matter_ready`](super::PlaneHooks::on_matter_ready).
    pub fn notify_matter_ready(&mut self, id: MatterId) {
        let Some(idx) = self.member(id) else {
            return;
        };
        let Some(entry) = self.ring.get_mut(idx) else {
            return;
        };
        let Placement::Pending(request) = core::mem::take(&mut entry.record.placement) else {
            return;
        };

        self.invalidate_bounds();
        let _scope = self.updates.begin();
        self.place(idx, request);
        if self.is_pending_at(idx) {
            // Still not ready; the request was stashed again.
            return;
        }
        if self.scale != UNIT_SCALE {
            self.do_resize(idx, self.scale, UNIT_SCALE);
        }
        self.dirty.mark(idx, dirty::CONTENT);
        self.note(idx, MatterEventKind::Ready);
        self.updates.notify_updated();
        self.hooks.on_matter_ready(id);
    }

    /// Returns `true` while a member waits for
    /// [`notify_matter_ready`](Self::notify_matter_ready).
    #[must_use]
    pub fn is_pending(&self, id: MatterId) -> bool {
        self.member(id).is_some_and(|idx| self.is_pending_at(idx))
    }

    // -- Removal --

    /// Removes a mode-visible member and drops it.
    ///
    /// Clears the hover target and the caret owner if they referred to the
    /// matter. Returns `false` if `id` is not a mode-visible member.
    pub fn remove(&mut self, id: MatterId) -> bool {
        let Some(idx) = self.unmasked_member(id) else {
            return false;
        };
        if self.hovering == Some(id) {
            self.hovering = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        drop(self.ring.release(idx));
        self.forget(idx);
        self.invalidate_bounds();
        self.updates.notify_updated();
        true
    }

    /// Drops every matter this plane holds, linked or merely created.
    ///
    /// Calling it on an empty plane is a no-op.
    pub fn erase(&mut self) {
        let released = self.ring.release_all();
        self.hovering = None;
        self.focused = None;
        self.invalidate_bounds();
        if released.is_empty() {
            return;
        }
        for &(idx, _) in &released {
            self.forget(idx);
        }
        drop(released);
        self.updates.notify_updated();
    }

    fn forget(&mut self, idx: u32) {
        self.dirty.remove_key(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.note(idx, MatterEventKind::Removed);
    }

    // -- Moving --

    /// Moves a mode-visible member so the point at `fraction` of its extent
    /// lands on `at`, plus `offset`.
    ///
    /// Returns `true` if the position changed.
    pub fn move_to(&mut self, id: MatterId, at: Point, fraction: (f64, f64), offset: Vec2) -> bool {
        let Some(idx) = self.unmasked_member(id) else {
            return false;
        };
        let (fx, fy) = fraction;
        let moved = self.place(
            idx,
            PlacementRequest {
                target: at,
                fx,
                fy,
                offset,
            },
        );
        if moved {
            self.updates.notify_updated();
        }
        moved
    }

    /// Moves a member so its `anchor` lands on `at`, plus `offset`.
    pub fn move_to_anchor(&mut self, id: MatterId, at: Point, anchor: MatterAnchor, offset: Vec2) -> bool {
        self.move_to(id, at, anchor.fractions(), offset)
    }

    /// Moves a member relative to the point at `target_fraction` of
    /// `target`.
    ///
    /// A target that is not a mode-visible member stands for the origin.
    pub fn move_to_matter(
        &mut self,
        id: MatterId,
        target: MatterId,
        target_fraction: (f64, f64),
        fraction: (f64, f64),
        offset: Vec2,
    ) -> bool {
        let at = self
            .matter_location(target, target_fraction)
            .unwrap_or(Point::ZERO);
        self.move_to(id, at, fraction, offset)
    }

    /// Moves a member using the x coordinate of one target and the y
    /// coordinate of another.
    ///
    /// Unless both targets are mode-visible members the origin is used.
    pub fn move_to_matters(
        &mut self,
        id: MatterId,
        x_target: MatterId,
        x_fraction: f64,
        y_target: MatterId,
        y_fraction: f64,
        fraction: (f64, f64),
        offset: Vec2,
    ) -> bool {
        let x = self.matter_location(x_target, (x_fraction, 0.0));
        let y = self.matter_location(y_target, (0.0, y_fraction));
        let at = match (x, y) {
            (Some(x), Some(y)) => Point::new(x.x, y.y),
            _ => Point::ZERO,
        };
        self.move_to(id, at, fraction, offset)
    }

    /// Shifts a member by `delta`, or with `None` every selected
    /// mode-visible member.
    ///
    /// Returns `true` if anything moved.
    pub fn move_by(&mut self, id: Option<MatterId>, delta: Vec2) -> bool {
        match id {
            Some(id) => {
                let Some(idx) = self.unmasked_member(id) else {
                    return false;
                };
                let moved = self.shift(idx, delta);
                if moved {
                    self.updates.notify_updated();
                }
                moved
            }
            None => {
                let mode = self.mode;
                let mut moved = false;
                for idx in self.ring.order() {
                    let selected = self
                        .ring
                        .get(idx)
                        .is_some_and(|e| e.record.selected && e.record.unmasked(mode));
                    if selected {
                        moved |= self.shift(idx, delta);
                    }
                }
                if !self.ring.is_empty() {
                    self.updates.notify_updated();
                }
                moved
            }
        }
    }

    // -- Geometry queries --

    /// Returns the point at `fraction` of a mode-visible member's box, in
    /// plane coordinates.
    #[must_use]
    pub fn matter_location(&self, id: MatterId, fraction: (f64, f64)) -> Option<Point> {
        let rect = self.matter_boundary(id)?;
        let (fx, fy) = fraction;
        Some(Point::new(
            rect.x0 + rect.width() * fx,
            rect.y0 + rect.height() * fy,
        ))
    }

    /// Returns a mode-visible member's box in plane coordinates.
    #[must_use]
    pub fn matter_boundary(&self, id: MatterId) -> Option<Rect> {
        self.boundary_at(self.unmasked_member(id)?)
    }

    /// Returns the box a mode-visible member occupies on the canvas when drawn at the
    /// origin, after the plane's translation and scale.
    #[must_use]
    pub fn matter_screen_boundary(&self, id: MatterId) -> Option<Rect> {
        self.screen_boundary_at(self.unmasked_member(id)?)
    }

    /// Like [`matter_boundary`](Self::matter_boundary), addressed by raw slot
    /// index as found in [`PlaneChanges`](super::PlaneChanges).
    #[must_use]
    pub fn boundary_at(&self, idx: u32) -> Option<Rect> {
        let entry = self.ring.get(idx)?;
        let position = entry.record.position;
        Some(Rect::from_origin_size(
            position,
            entry.matter.extent(position),
        ))
    }

    /// Like [`matter_screen_boundary`](Self::matter_screen_boundary),
    /// addressed by raw slot index.
    #[must_use]
    pub fn screen_boundary_at(&self, idx: u32) -> Option<Rect> {
        let rect = self.boundary_at(idx)?;
        Some(Rect::from_origin_size(
            self.to_screen(rect.origin()),
            rect.size(),
        ))
    }

    /// Returns the union of all mode-visible members' boxes.
    ///
    /// An empty plane (or one whose members are all masked) yields
    /// [`Rect::ZERO`]. The result is cached until the next structural or
    /// positional change.
    #[must_use]
    pub fn matters_boundary(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = self
            .ring
            .members()
            .filter(|&idx| {
                self.ring
                    .get(idx)
                    .is_some_and(|e| e.record.unmasked(self.mode))
            })
            .filter_map(|idx| self.boundary_at(idx))
            .reduce(|acc, rect| acc.union(rect))
            .unwrap_or(Rect::ZERO);
        self.bounds.set(Some(bounds));
        bounds
    }

    // -- Resizing and global transform --

    /// Resizes a resizable member, keeping its resize anchor fixed.
    ///
    /// Ignored unless the matter reports a
    /// [`resize_anchor`](crate::matter::Matter::resize_anchor), `size` is
    /// positive, and it differs from the current extent.
    pub fn resize_matter(&mut self, id: MatterId, size: Size) -> bool {
        let Some(idx) = self.member(id) else {
            return false;
        };
        let resized = self.resize_moored(idx, size);
        if resized {
            self.updates.notify_updated();
        }
        resized
    }

    /// Scales a resizable member's extent by `ratio`, keeping its resize
    /// anchor fixed.
    pub fn scale_matter(&mut self, id: MatterId, ratio: f64) -> bool {
        let Some(idx) = self.member(id) else {
            return false;
        };
        if ratio == 1.0 {
            return false;
        }
        let Some(old) = self.boundary_at(idx).map(|r| r.size()) else {
            return false;
        };
        let resized = self.resize_moored(idx, old * ratio);
        if resized {
            self.updates.notify_updated();
        }
        resized
    }

    /// Sets the plane-wide scale and rescales every ready resizable member.
    ///
    /// Each matter's extent is divided by the previous scale and multiplied
    /// by the new one.
    pub fn set_scale(&mut self, scale: Vec2) {
        if scale == self.scale {
            return;
        }
        let previous = self.scale;
        self.scale = scale;
        let _scope = self.updates.begin();
        for idx in self.ring.order() {
            if !self.is_pending_at(idx) {
                self.do_resize(idx, scale, previous);
            }
        }
        self.invalidate_bounds();
        self.updates.notify_updated();
    }

    /// Returns the plane-wide scale.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Sets the plane-wide translation applied before scaling.
    pub fn set_translation(&mut self, translate: Vec2) {
        if translate != self.translate {
            self.translate = translate;
            self.updates.notify_updated();
        }
    }

    /// Returns the plane-wide translation.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translate
    }

    // -- Internals --

    pub(crate) fn is_pending_at(&self, idx: u32) -> bool {
        self.ring
            .get(idx)
            .is_some_and(|e| matches!(e.record.placement, Placement::Pending(_)))
    }

    /// Maps a plane-coordinate point to canvas space at the origin.
    pub(crate) fn to_screen(&self, point: Point) -> Point {
        Point::new(
            (point.x + self.translate.x) * self.scale.x,
            (point.y + self.translate.y) * self.scale.y,
        )
    }

    /// Resolves `request` against the matter's extent and moves it.
    ///
    /// A matter that is not ready gets the request stashed and is placed
    /// with a zero extent.
    fn place(&mut self, idx: u32, request: PlacementRequest) -> bool {
        let Some(entry) = self.ring.get_mut(idx) else {
            return false;
        };
        let (ax, ay) = if entry.matter.ready() {
            let size = entry.matter.extent(entry.record.position);
            (size.width * request.fx, size.height * request.fy)
        } else {
            entry.record.placement = Placement::Pending(request);
            (0.0, 0.0)
        };
        let target = Point::new(
            request.target.x - ax + request.offset.x,
            request.target.y - ay + request.offset.y,
        );
        self.move_record(idx, target)
    }

    fn shift(&mut self, idx: u32, delta: Vec2) -> bool {
        let Some(position) = self.ring.get(idx).map(|e| e.record.position) else {
            return false;
        };
        self.move_record(idx, position + delta)
    }

    pub(crate) fn move_record(&mut self, idx: u32, target: Point) -> bool {
        let Some(entry) = self.ring.get_mut(idx) else {
            return false;
        };
        if entry.record.position == target {
            return false;
        }
        entry.record.position = target;
        self.dirty.mark(idx, dirty::GEOMETRY);
        self.invalidate_bounds();
        true
    }


    /// Rescales a matter from `previous` to `scale`.
    ///
    /// The result compounds: extents are derived from the current extent,
    /// not from a remembered unscaled one.
    fn do_resize(&mut self, idx: u32, scale: Vec2, previous: Vec2) {
        let Some(old) = self.boundary_at(idx).map(|r| r.size()) else {
            return;
        };
        let size = Size::new(
            old.width / previous.x * scale.x,
            old.height / previous.y * scale.y,
        );
        self.resize_moored(idx, size);
    }

    /// Applies `size` to a resizable matter and moves it so its resize
    /// anchor stays put.
    fn resize_moored(&mut self, idx: u32, size: Size) -> bool {
        let Some(entry) = self.ring.get_mut(idx) else {
            return false;
        };
        let Some(anchor) = entry.matter.resize_anchor() else {
            return false;
        };
        if !(size.width > 0.0 && size.height > 0.0) {
            return false;
        }
        let position = entry.record.position;
        let old = entry.matter.extent(position);
        if old == size {
            return false;
        }
        entry.matter.on_resize(size, old);
        let new = entry.matter.extent(position);
        let (fx, fy) = anchor.fractions();
        let moored = Point::new(
            position.x + (old.width - new.width) * fx,
            position.y + (old.height - new.height) * fy,
        );
        self.move_record(idx, moored);
        self.dirty.mark(idx, dirty::CONTENT);
        self.invalidate_bounds();
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::plane::SelectAll;
    use crate::test_support::{Block, Journal, RecordingHooks, plane_line};

    fn block(name: &'static str, journal: &Journal) -> Block {
        Block::new(name, 10.0, 10.0, journal)
    }

    #[test]
    fn insertion_preserves_order_and_ring_integrity() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::ZERO);
        let c = plane.insert(block("c", &journal), Point::ZERO);

        assert_eq!(plane.matters().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(plane.head(), Some(a));
        assert_eq!(plane.next_matter(c), Some(a), "tail wraps to head");
        assert_eq!(plane.prev_matter(a), Some(c), "head wraps to tail");
        for id in [a, b, c] {
            let next = plane.next_matter(id).unwrap();
            assert_eq!(plane.prev_matter(next), Some(id));
        }
    }

    #[test]
    fn construction_protocol_runs_once() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.create(block("a", &journal));
        assert!(!plane.contains(id), "created matters are not members");
        assert!(plane.insert_at(id, Point::ZERO, (0.0, 0.0), Vec2::ZERO));
        assert!(
            !plane.insert_at(id, Point::new(5.0, 5.0), (0.0, 0.0), Vec2::ZERO),
            "double insert is a no-op"
        );
        assert_eq!(plane.len(), 1);
        assert_eq!(journal.lines(), vec![String::from("a.construct")]);
        assert_eq!(plane.matter_location(id, (0.0, 0.0)), Some(Point::ZERO));
    }

    #[test]
    fn anchored_placement() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.insert_anchored(
            Block::new("a", 40.0, 10.0, &journal),
            Point::new(100.0, 100.0),
            MatterAnchor::CC,
            Vec2::new(1.0, -1.0),
        );
        assert_eq!(
            plane.matter_boundary(id),
            Some(Rect::new(81.0, 94.0, 121.0, 104.0))
        );
    }

    #[test]
    fn async_replay_is_exact() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal));
        let id = plane.create(Block::new("a", 40.0, 10.0, &journal).pending());
        plane.insert_at(id, Point::new(10.0, 20.0), (0.5, 0.0), Vec2::new(1.0, 1.0));

        assert!(plane.is_pending(id));
        assert_eq!(
            plane.matter_location(id, (0.0, 0.0)),
            Some(Point::new(11.0, 21.0)),
            "pending placement uses a zero extent"
        );
        assert!(!journal.lines().contains(&plane_line("ready", id)));

        plane.downcast_mut::<Block>(id).unwrap().ready = true;
        plane.notify_matter_ready(id);
        assert!(!plane.is_pending(id));
        assert_eq!(plane.matter_location(id, (0.0, 0.0)), Some(Point::new(-9.0, 21.0)));
        assert!(journal.lines().contains(&plane_line("ready", id)));

        journal.take();
        plane.notify_matter_ready(id);
        assert!(journal.lines().is_empty(), "second notify is a no-op");
        assert_eq!(plane.matter_location(id, (0.0, 0.0)), Some(Point::new(-9.0, 21.0)));
    }

    #[test]
    fn notify_ready_without_pending_is_noop() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal));
        let id = plane.insert(block("a", &journal), Point::new(3.0, 4.0));
        journal.take();
        plane.notify_matter_ready(id);
        assert!(journal.lines().is_empty());
    }

    #[test]
    fn remove_splices_and_updates_head() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::ZERO);
        let c = plane.insert(block("c", &journal), Point::ZERO);

        assert!(plane.remove(a));
        assert_eq!(plane.head(), Some(b));
        assert_eq!(plane.matters().collect::<Vec<_>>(), vec![b, c]);
        assert!(!plane.remove(a), "stale handle");
        assert!(plane.matter(a).is_none());

        assert!(plane.remove(c));
        assert_eq!(plane.next_matter(b), Some(b));
        assert!(plane.remove(b));
        assert!(plane.is_empty());
        assert_eq!(plane.head(), None);
    }

    #[test]
    fn remove_requires_visibility() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0x1);
        let a = plane.insert(block("a", &journal), Point::ZERO);
        plane.set_matter_mode(a, 0x2);
        assert!(!plane.remove(a));
        assert!(plane.contains(a));
    }

    #[test]
    fn erase_is_idempotent() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let loose = plane.create(block("loose", &journal));
        plane.erase();
        assert!(plane.is_empty());
        assert!(plane.matter(a).is_none());
        assert!(plane.matter(loose).is_none());
        assert_eq!(plane.matters_boundary(), Rect::ZERO);
        plane.erase();
        assert!(plane.is_empty());
    }

    #[test]
    fn move_to_round_trips_through_location() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.insert(Block::new("a", 30.0, 20.0, &journal), Point::ZERO);
        for anchor in MatterAnchor::ALL {
            let target = Point::new(17.0, -5.0);
            plane.move_to_anchor(id, target, anchor, Vec2::ZERO);
            assert_eq!(
                plane.matter_location(id, anchor.fractions()),
                Some(target),
                "{anchor:?}"
            );
        }
    }

    #[test]
    fn move_to_reports_change_only() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.insert(block("a", &journal), Point::ZERO);
        let redraws = plane.updates().redraw_count();
        assert!(!plane.move_to(id, Point::ZERO, (0.0, 0.0), Vec2::ZERO));
        assert_eq!(plane.updates().redraw_count(), redraws);
        assert!(plane.move_to(id, Point::new(1.0, 0.0), (0.0, 0.0), Vec2::ZERO));
        assert_eq!(plane.updates().redraw_count(), redraws + 1);
    }

    #[test]
    fn move_relative_to_targets() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0x1);
        let base = plane.insert(Block::new("base", 20.0, 20.0, &journal), Point::new(100.0, 50.0));
        let other = plane.insert(Block::new("other", 10.0, 40.0, &journal), Point::new(0.0, 0.0));
        let id = plane.insert(block("a", &journal), Point::ZERO);

        plane.move_to_matter(id, base, (1.0, 1.0), (0.0, 0.0), Vec2::new(2.0, 0.0));
        assert_eq!(plane.matter_location(id, (0.0, 0.0)), Some(Point::new(122.0, 70.0)));

        plane.move_to_matters(id, base, 0.5, other, 1.0, (0.5, 1.0), Vec2::ZERO);
        assert_eq!(plane.matter_location(id, (0.5, 1.0)), Some(Point::new(110.0, 40.0)));

        plane.set_matter_mode(base, 0x2);
        plane.move_to_matter(id, base, (1.0, 1.0), (0.0, 0.0), Vec2::ZERO);
        assert_eq!(
            plane.matter_location(id, (0.0, 0.0)),
            Some(Point::ZERO),
            "masked target stands for the origin"
        );
    }

    #[test]
    fn masked_members_have_no_geometry() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0x1);
        let a = plane.insert(block("a", &journal), Point::new(4.0, 6.0));
        plane.set_matter_mode(a, 0x2);
        assert_eq!(plane.matter_location(a, (0.0, 0.0)), None);
        assert_eq!(plane.matter_boundary(a), None);
        assert_eq!(plane.matter_screen_boundary(a), None);

        plane.change_mode(0x3);
        assert_eq!(plane.matter_location(a, (0.0, 0.0)), Some(Point::new(4.0, 6.0)));
    }

    #[test]
    fn handles_from_another_plane_are_ignored() {
        let journal = Journal::default();
        let mut first = Plane::new("first", 0);
        let mut second = Plane::new("second", 0);
        let foreign = first.insert(block("a", &journal), Point::ZERO);
        let own = second.insert(block("b", &journal), Point::ZERO);
        assert_eq!(foreign.index(), own.index());
        assert_ne!(foreign, own);

        assert!(!second.contains(foreign));
        assert!(!second.remove(foreign));
        assert!(!second.move_to(foreign, Point::new(9.0, 9.0), (0.0, 0.0), Vec2::ZERO));
        assert!(!second.insert_at(foreign, Point::ZERO, (0.0, 0.0), Vec2::ZERO));
        assert!(second.matter(foreign).is_none());
        assert_eq!(second.len(), 1);
        assert_eq!(second.matter_location(own, (0.0, 0.0)), Some(Point::ZERO));
        assert!(first.contains(foreign));
    }

    #[test]
    fn move_by_none_shifts_selected_only() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, SelectAll { multiple: true });
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::new(50.0, 0.0));
        plane.add_selected(b);

        assert!(plane.move_by(None, Vec2::new(5.0, 5.0)));
        assert_eq!(plane.matter_location(a, (0.0, 0.0)), Some(Point::ZERO));
        assert_eq!(plane.matter_location(b, (0.0, 0.0)), Some(Point::new(55.0, 5.0)));

        assert!(plane.move_by(Some(a), Vec2::new(-1.0, 0.0)));
        assert_eq!(plane.matter_location(a, (0.0, 0.0)), Some(Point::new(-1.0, 0.0)));
    }

    #[test]
    fn bounding_box_tracks_visible_members() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0x1);
        assert_eq!(plane.matters_boundary(), Rect::ZERO);
        let a = plane.insert(block("a", &journal), Point::new(-5.0, 0.0));
        let b = plane.insert(block("b", &journal), Point::new(20.0, 30.0));
        assert_eq!(plane.matters_boundary(), Rect::new(-5.0, 0.0, 30.0, 40.0));

        plane.move_to(a, Point::new(0.0, 0.0), (0.0, 0.0), Vec2::ZERO);
        assert_eq!(plane.matters_boundary(), Rect::new(0.0, 0.0, 30.0, 40.0));

        plane.set_matter_mode(b, 0x2);
        assert_eq!(plane.matters_boundary(), Rect::new(0.0, 0.0, 10.0, 10.0));
        plane.set_matter_mode(a, 0x2);
        assert_eq!(plane.matters_boundary(), Rect::ZERO);
    }

    #[test]
    fn resize_keeps_anchor_fixed() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.insert(
            Block::new("a", 10.0, 10.0, &journal).resizable(MatterAnchor::CC),
            Point::new(0.0, 0.0),
        );
        assert!(plane.resize_matter(id, Size::new(20.0, 30.0)));
        assert_eq!(
            plane.matter_boundary(id),
            Some(Rect::new(-5.0, -10.0, 15.0, 20.0))
        );
        assert!(!plane.resize_matter(id, Size::new(20.0, 30.0)), "same size");
        assert!(!plane.resize_matter(id, Size::new(0.0, 30.0)), "non-positive");
    }

    #[test]
    fn fixed_size_matters_ignore_resize() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.insert(block("a", &journal), Point::ZERO);
        assert!(!plane.resize_matter(id, Size::new(20.0, 30.0)));
        assert!(!plane.scale_matter(id, 2.0));
    }

    #[test]
    fn scale_matter_by_ratio() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let id = plane.insert(
            Block::new("a", 10.0, 4.0, &journal).resizable(MatterAnchor::LT),
            Point::new(1.0, 1.0),
        );
        assert!(plane.scale_matter(id, 1.5));
        assert_eq!(plane.matter_boundary(id), Some(Rect::new(1.0, 1.0, 16.0, 7.0)));
    }

    #[test]
    fn plane_scale_applies_to_new_and_existing_matters() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let a = plane.insert(
            Block::new("a", 10.0, 10.0, &journal).resizable(MatterAnchor::LT),
            Point::ZERO,
        );
        plane.set_scale(Vec2::new(2.0, 2.0));
        assert_eq!(plane.matter_boundary(a).map(|r| r.size()), Some(Size::new(20.0, 20.0)));

        let b = plane.insert(
            Block::new("b", 5.0, 5.0, &journal).resizable(MatterAnchor::LT),
            Point::ZERO,
        );
        assert_eq!(plane.matter_boundary(b).map(|r| r.size()), Some(Size::new(10.0, 10.0)));

        plane.set_scale(Vec2::new(1.0, 1.0));
        assert_eq!(plane.matter_boundary(a).map(|r| r.size()), Some(Size::new(10.0, 10.0)));
    }

    #[test]
    fn insertion_batches_one_redraw() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        plane.insert(block("a", &journal), Point::new(4.0, 4.0));
        assert_eq!(plane.updates().redraw_count(), 1);
        assert!(!plane.updates().is_active());
    }
}
