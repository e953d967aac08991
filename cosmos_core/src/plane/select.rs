// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and caret ownership.

use super::Plane;
use crate::dirty;
use crate::id::MatterId;
use crate::trace::MatterEventKind;

impl Plane {
    // -- Selection --

    /// Makes `id` the only selected matter.
    ///
    /// Does nothing if `id` is masked or refused by
    /// [`PlaneHooks::can_select`](super::PlaneHooks::can_select). If `id` is
    /// already selected, only the other selected matters are deselected.
    pub fn set_selected(&mut self, id: MatterId) {
        if let Some(idx) = self.unmasked_member(id)
            && self.ring.get(idx).is_some_and(|e| e.record.selected)
        {
            self.deselect_others(Some(idx));
            return;
        }
        let Some(idx) = self.selectable(id) else {
            return;
        };
        let _scope = self.updates.begin();
        self.no_selected();
        self.flip_selection(idx, true);
    }

    /// Adds `id` to the selection.
    ///
    /// Only allowed when the hooks permit multiple selection.
    pub fn add_selected(&mut self, id: MatterId) {
        if !self.hooks.can_select_multiple() {
            return;
        }
        if let Some(idx) = self.selectable(id) {
            self.flip_selection(idx, true);
        }
    }

    /// Deselects a single matter.
    pub fn remove_selected(&mut self, id: MatterId) {
        let Some(idx) = self.unmasked_member(id) else {
            return;
        };
        if self.ring.get(idx).is_some_and(|e| e.record.selected) {
            self.flip_selection(idx, false);
        }
    }

    /// Deselects every mode-visible matter.
    pub fn no_selected(&mut self) {
        self.deselect_others(None);
    }

    /// Returns `true` if `id` is a selected mode-visible member.
    #[must_use]
    pub fn is_selected(&self, id: MatterId) -> bool {
        self.unmasked_member(id)
            .and_then(|idx| self.ring.get(idx))
            .is_some_and(|e| e.record.selected)
    }

    /// Counts selected mode-visible members.
    #[must_use]
    pub fn count_selected(&self) -> usize {
        self.ring
            .members()
            .filter(|&idx| {
                self.ring
                    .get(idx)
                    .is_some_and(|e| e.record.selected && e.record.unmasked(self.mode))
            })
            .count()
    }

    /// Returns the first selected mode-visible member after `start`, or from
    /// the head when `start` is `None`.
    ///
    /// The search stops at the tail; it does not wrap.
    #[must_use]
    pub fn find_next_selected_matter(&self, start: Option<MatterId>) -> Option<MatterId> {
        let mut members = self.ring.members();
        if let Some(start) = start {
            let start = self.member(start)?;
            members.find(|&idx| idx == start)?;
        }
        members
            .find(|&idx| {
                self.ring
                    .get(idx)
                    .is_some_and(|e| e.record.selected && e.record.unmasked(self.mode))
            })
            .map(|idx| self.id_at(idx))
    }

    /// Iterates selected mode-visible members in ring order.
    pub fn selected(&self) -> impl Iterator<Item = MatterId> + '_ {
        self.ring
            .members()
            .filter(|&idx| {
                self.ring
                    .get(idx)
                    .is_some_and(|e| e.record.selected && e.record.unmasked(self.mode))
            })
            .map(|idx| self.id_at(idx))
    }

    /// Deselects every mode-visible matter except the one at `keep`.
    fn deselect_others(&mut self, keep: Option<u32>) {
        let _scope = self.updates.begin();
        for idx in self.ring.order() {
            let selected = Some(idx) != keep
                && self
                    .ring
                    .get(idx)
                    .is_some_and(|e| e.record.selected && e.record.unmasked(self.mode));
            if selected {
                self.flip_selection(idx, false);
            }
        }
    }

    fn selectable(&self, id: MatterId) -> Option<u32> {
        let idx = self.unmasked_member(id)?;
        let entry = self.ring.get(idx)?;
        if entry.record.selected || !self.hooks.can_select(id, &*entry.matter) {
            return None;
        }
        Some(idx)
    }

    fn flip_selection(&mut self, idx: u32, selected: bool) {
        let id = self.id_at(idx);
        self.hooks.before_select(id, selected);
        if let Some(entry) = self.ring.get_mut(idx) {
            entry.record.selected = selected;
        }
        self.hooks.after_select(id, selected);
        self.dirty.mark(idx, dirty::SELECTION);
        self.note(
            idx,
            if selected {
                MatterEventKind::Selected
            } else {
                MatterEventKind::Deselected
            },
        );
        self.updates.notify_updated();
    }

    // -- Caret --

    /// Moves the caret to `id`, or clears it with `None`.
    ///
    /// A matter is eligible if it is a mode-visible member whose
    /// [`events`](crate::matter::Matter::events) level allows events. The
    /// previous owner (if any) is told it lost the caret before the new owner
    /// gains it. Passing an ineligible matter clears the caret. Passing the
    /// current owner again re-announces the focus to the hooks.
    pub fn set_caret_owner(&mut self, id: Option<MatterId>) {
        let eligible = id.and_then(|id| {
            let idx = self.unmasked_member(id)?;
            let entry = self.ring.get(idx)?;
            entry.matter.events().allows_events().then_some(id)
        });

        if eligible.is_some() && eligible == self.focused {
            if let Some(id) = eligible {
                self.hooks.on_focus(id, true);
            }
            return;
        }

        let _scope = self.updates.begin();
        if let Some(old) = self.focused.take() {
            self.release_caret(old);
        }
        if let Some(new) = eligible
            && let Some(idx) = self.member(new)
        {
            self.focused = Some(new);
            if let Some(entry) = self.ring.get_mut(idx) {
                entry.matter.own_caret(true);
            }
            self.hooks.on_focus(new, true);
            self.note(idx, MatterEventKind::Focused);
            self.updates.notify_updated();
        }
    }

    /// Returns the caret owner, if it is still mode-visible.
    #[must_use]
    pub fn focused_matter(&self) -> Option<MatterId> {
        self.focused
            .filter(|&id| self.unmasked_member(id).is_some())
    }

    /// Returns `true` if `id` owns the caret.
    #[must_use]
    pub fn has_caret(&self, id: MatterId) -> bool {
        self.focused_matter() == Some(id)
    }

    fn release_caret(&mut self, id: MatterId) {
        let Some(idx) = self.member(id) else {
            return;
        };
        if let Some(entry) = self.ring.get_mut(idx) {
            entry.matter.own_caret(false);
        }
        self.hooks.on_focus(id, false);
        self.note(idx, MatterEventKind::Unfocused);
        self.updates.notify_updated();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Point;

    use super::*;
    use crate::matter::EventLevel;
    use crate::test_support::{Block, Journal, RecordingHooks, plane_line};

    fn block(name: &'static str, journal: &Journal) -> Block {
        Block::new(name, 10.0, 10.0, journal).events(EventLevel::HighLevel)
    }

    #[test]
    fn single_selection_is_exclusive() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal));
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::ZERO);
        journal.take();

        plane.set_selected(a);
        plane.set_selected(b);
        assert!(!plane.is_selected(a));
        assert!(plane.is_selected(b));
        assert_eq!(plane.count_selected(), 1);
        assert_eq!(
            journal.take(),
            vec![
                plane_line("before+", a),
                plane_line("after+", a),
                plane_line("before-", a),
                plane_line("after-", a),
                plane_line("before+", b),
                plane_line("after+", b),
            ]
        );
    }

    #[test]
    fn set_selected_on_selected_is_noop() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal));
        let a = plane.insert(block("a", &journal), Point::ZERO);
        plane.set_selected(a);
        journal.take();
        let redraws = plane.updates().redraw_count();
        plane.set_selected(a);
        assert!(journal.lines().is_empty());
        assert_eq!(plane.updates().redraw_count(), redraws);
    }

    #[test]
    fn set_selected_on_one_of_many_keeps_only_it() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal).multiple());
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::ZERO);
        let c = plane.insert(block("c", &journal), Point::ZERO);
        plane.add_selected(a);
        plane.add_selected(b);
        plane.add_selected(c);
        journal.take();
        let redraws = plane.updates().redraw_count();

        plane.set_selected(a);
        assert_eq!(plane.selected().collect::<Vec<_>>(), vec![a]);
        assert_eq!(plane.count_selected(), 1);
        assert_eq!(
            journal.take(),
            vec![
                plane_line("before-", b),
                plane_line("after-", b),
                plane_line("before-", c),
                plane_line("after-", c),
            ],
            "the kept matter is not deselected and reselected"
        );
        assert_eq!(plane.updates().redraw_count(), redraws + 1);
    }

    #[test]
    fn selection_respects_policy() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal).unselectable());
        let a = plane.insert(block("a", &journal), Point::ZERO);
        plane.set_selected(a);
        assert!(!plane.is_selected(a));

        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal));
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::ZERO);
        plane.set_selected(a);
        plane.add_selected(b);
        assert!(!plane.is_selected(b), "multiple selection not allowed");
    }

    #[test]
    fn multiple_selection_and_search() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal).multiple());
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|name| plane.insert(block(name, &journal), Point::ZERO))
            .collect();
        plane.add_selected(ids[1]);
        plane.add_selected(ids[3]);
        assert_eq!(plane.count_selected(), 2);
        assert_eq!(plane.selected().collect::<Vec<_>>(), vec![ids[1], ids[3]]);
        assert_eq!(plane.find_next_selected_matter(None), Some(ids[1]));
        assert_eq!(plane.find_next_selected_matter(Some(ids[1])), Some(ids[3]));
        assert_eq!(plane.find_next_selected_matter(Some(ids[3])), None);

        plane.remove_selected(ids[1]);
        assert_eq!(plane.count_selected(), 1);
        plane.no_selected();
        assert_eq!(plane.count_selected(), 0);
    }

    #[test]
    fn no_selected_batches_one_redraw() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal).multiple());
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::ZERO);
        plane.add_selected(a);
        plane.add_selected(b);
        let redraws = plane.updates().redraw_count();
        plane.no_selected();
        assert_eq!(plane.updates().redraw_count(), redraws + 1);
    }

    #[test]
    fn caret_moves_between_owners() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal));
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let b = plane.insert(block("b", &journal), Point::ZERO);
        journal.take();

        plane.set_caret_owner(Some(a));
        plane.set_caret_owner(Some(b));
        assert_eq!(plane.focused_matter(), Some(b));
        assert!(plane.has_caret(b));
        assert_eq!(
            journal.take(),
            vec![
                String::from("a.caret+"),
                plane_line("focus+", a),
                String::from("a.caret-"),
                plane_line("focus-", a),
                String::from("b.caret+"),
                plane_line("focus+", b),
            ]
        );

        plane.set_caret_owner(Some(b));
        assert_eq!(journal.take(), vec![plane_line("focus+", b)]);

        plane.set_caret_owner(None);
        assert_eq!(plane.focused_matter(), None);
        assert_eq!(
            journal.take(),
            vec![String::from("b.caret-"), plane_line("focus-", b)]
        );
    }

    #[test]
    fn caret_refuses_silent_matters() {
        let journal = Journal::default();
        let mut plane = Plane::with_hooks("p", 0, RecordingHooks::new(&journal));
        let a = plane.insert(block("a", &journal), Point::ZERO);
        let mute = plane.insert(Block::new("mute", 5.0, 5.0, &journal), Point::ZERO);
        plane.set_caret_owner(Some(a));
        journal.take();

        plane.set_caret_owner(Some(mute));
        assert_eq!(plane.focused_matter(), None, "ineligible target clears the caret");
        assert_eq!(
            journal.take(),
            vec![String::from("a.caret-"), plane_line("focus-", a)]
        );
    }

    #[test]
    fn removing_the_caret_owner_clears_focus() {
        let journal = Journal::default();
        let mut plane = Plane::new("p", 0);
        let a = plane.insert(block("a", &journal), Point::ZERO);
        plane.set_caret_owner(Some(a));
        plane.remove(a);
        assert_eq!(plane.focused_matter(), None);
    }
}
