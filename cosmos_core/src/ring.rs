// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular doubly-linked arena shared by planes and cosmos.
//!
//! Entries live in parallel arrays addressed by slot index. Linked entries
//! form a single cycle: following `next` from the head visits every linked
//! entry exactly once and returns to the head, and `prev[head]` is the tail.
//! Allocating an entry does not link it; ring membership is a separate step
//! so that the owner can run its own protocol between the two.
//!
//! Released slots are recycled via a free list, and generation counters let
//! owners reject stale handles.

use alloc::vec::Vec;
use core::fmt;

use crate::id::INVALID;

pub(crate) struct Ring<T> {
    // -- Payload --
    entries: Vec<Option<T>>,

    // -- Topology --
    next: Vec<u32>,
    prev: Vec<u32>,
    head: u32,
    linked: u32,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl<T> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("slots", &self.entries.len())
            .field("linked", &self.linked)
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}

impl<T> Ring<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: Vec::new(),
            prev: Vec::new(),
            head: INVALID,
            linked: 0,
            generation: Vec::new(),
            free_list: Vec::new(),
        }
    }

    // -- Allocation --

    /// Stores `value` in a fresh or recycled slot, unlinked.
    pub(crate) fn alloc(&mut self, value: T) -> u32 {
        if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.entries[i] = Some(value);
            self.next[i] = INVALID;
            self.prev[i] = INVALID;
            idx
        } else {
            let idx = u32::try_from(self.entries.len()).unwrap_or(INVALID);
            debug_assert!(idx != INVALID, "ring slot space exhausted");
            self.entries.push(Some(value));
            self.next.push(INVALID);
            self.prev.push(INVALID);
            self.generation.push(0);
            idx
        }
    }

    /// Unlinks (if needed) and frees a slot, returning its payload.
    pub(crate) fn release(&mut self, idx: u32) -> Option<T> {
        let value = self.entries.get_mut(idx as usize)?.take()?;
        if self.is_linked(idx) {
            self.unlink(idx);
        }
        self.generation[idx as usize] = self.generation[idx as usize].wrapping_add(1);
        self.free_list.push(idx);
        Some(value)
    }

    /// Frees every occupied slot. Linked entries come first, in ring order.
    pub(crate) fn release_all(&mut self) -> Vec<(u32, T)> {
        let mut order = self.order();
        for idx in 0..self.entries.len() {
            let idx = idx as u32;
            if self.entries[idx as usize].is_some() && !self.is_linked(idx) {
                order.push(idx);
            }
        }
        order
            .into_iter()
            .filter_map(|idx| self.release(idx).map(|value| (idx, value)))
            .collect()
    }

    /// Returns the current generation of a slot.
    pub(crate) fn generation(&self, idx: u32) -> u32 {
        self.generation[idx as usize]
    }

    /// Returns `idx` if it names an occupied slot of the given generation.
    pub(crate) fn resolve(&self, idx: u32, generation: u32) -> Option<u32> {
        let i = idx as usize;
        (i < self.entries.len()
            && self.generation[i] == generation
            && self.entries[i].is_some())
        .then_some(idx)
    }

    pub(crate) fn get(&self, idx: u32) -> Option<&T> {
        self.entries.get(idx as usize)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        self.entries.get_mut(idx as usize)?.as_mut()
    }

    // -- Topology --

    pub(crate) fn is_linked(&self, idx: u32) -> bool {
        self.next.get(idx as usize).is_some_and(|&n| n != INVALID)
    }

    /// Appends an allocated, unlinked slot at the tail of the ring.
    pub(crate) fn link_tail(&mut self, idx: u32) {
        debug_assert!(!self.is_linked(idx), "slot is already linked");
        let i = idx as usize;
        if self.head == INVALID {
            self.head = idx;
            self.next[i] = idx;
            self.prev[i] = idx;
        } else {
            let head = self.head as usize;
            let tail = self.prev[head];
            self.prev[i] = tail;
            self.next[i] = self.head;
            self.next[tail as usize] = idx;
            self.prev[head] = idx;
        }
        self.linked += 1;
    }

    /// Splices a linked slot out of the ring, keeping its payload.
    pub(crate) fn unlink(&mut self, idx: u32) {
        debug_assert!(self.is_linked(idx), "slot is not linked");
        let i = idx as usize;
        let n = self.next[i];
        let p = self.prev[i];
        if n == idx {
            self.head = INVALID;
        } else {
            self.next[p as usize] = n;
            self.prev[n as usize] = p;
            if self.head == idx {
                self.head = n;
            }
        }
        self.next[i] = INVALID;
        self.prev[i] = INVALID;
        self.linked -= 1;
    }

    pub(crate) fn head(&self) -> Option<u32> {
        (self.head != INVALID).then_some(self.head)
    }

    pub(crate) fn tail(&self) -> Option<u32> {
        self.head().map(|head| self.prev[head as usize])
    }

    pub(crate) fn next_of(&self, idx: u32) -> Option<u32> {
        self.is_linked(idx).then(|| self.next[idx as usize])
    }

    pub(crate) fn prev_of(&self, idx: u32) -> Option<u32> {
        self.is_linked(idx).then(|| self.prev[idx as usize])
    }

    /// Number of linked entries.
    pub(crate) fn len(&self) -> usize {
        self.linked as usize
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.linked == 0
    }

    /// Iterates linked slots from head to tail.
    pub(crate) fn members(&self) -> Members<'_, T> {
        Members {
            ring: self,
            current: self.head,
            remaining: self.linked,
            forward: true,
        }
    }

    /// Iterates linked slots from tail to head.
    pub(crate) fn members_rev(&self) -> Members<'_, T> {
        Members {
            ring: self,
            current: self.tail().unwrap_or(INVALID),
            remaining: self.linked,
            forward: false,
        }
    }

    /// Snapshot of the linked slots in ring order, for loops that mutate.
    pub(crate) fn order(&self) -> Vec<u32> {
        self.members().collect()
    }
}

/// Walks the ring in one direction, visiting each linked slot once.
pub(crate) struct Members<'a, T> {
    ring: &'a Ring<T>,
    current: u32,
    remaining: u32,
    forward: bool,
}

impl<T> Iterator for Members<'_, T> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 || self.current == INVALID {
            return None;
        }
        let idx = self.current;
        let links = if self.forward {
            &self.ring.next
        } else {
            &self.ring.prev
        };
        self.current = links[idx as usize];
        self.remaining -= 1;
        Some(idx)
    }
}
