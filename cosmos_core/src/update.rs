// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched redraw requests.
//!
//! Every mutation that changes what a plane would draw calls
//! [`UpdateSequence::notify_updated`]. Outside of a sequence that requests a
//! redraw immediately; inside one the request is deferred and collapsed into
//! a single redraw when the outermost sequence ends.
//!
//! Sequences nest. [`UpdateSequence::begin`] returns an [`UpdateScope`] guard
//! and the sequence ends when the guard drops, so every early return balances
//! the begin.
//!
//! A [`Cosmos`](crate::cosmos::Cosmos) hands its own sequence to every plane
//! pushed onto it; a standalone [`Plane`](crate::plane::Plane) has a private
//! one.

use alloc::rc::Rc;
use core::cell::Cell;

#[derive(Debug, Default)]
struct SequenceState {
    depth: Cell<u32>,
    dirty: Cell<bool>,
    pending: Cell<bool>,
    redraws: Cell<u64>,
}

/// Shared, nestable begin/end bracket with a deferred redraw flag.
///
/// Cloning yields another handle onto the same sequence.
#[derive(Clone, Debug, Default)]
pub struct UpdateSequence {
    state: Rc<SequenceState>,
}

impl UpdateSequence {
    /// Creates a fresh sequence with no pending redraw.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a (possibly nested) update sequence.
    #[must_use = "the sequence ends when the scope is dropped"]
    pub fn begin(&self) -> UpdateScope {
        let depth = &self.state.depth;
        depth.set(depth.get() + 1);
        UpdateScope {
            sequence: self.clone(),
        }
    }

    /// Records that something visible changed.
    pub fn notify_updated(&self) {
        if self.state.depth.get() == 0 {
            self.request_redraw();
        } else {
            self.state.dirty.set(true);
        }
    }

    /// Current nesting depth; `0` outside any sequence.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.state.depth.get()
    }

    /// Returns `true` while at least one sequence is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.depth() > 0
    }

    /// Returns `true` if an open sequence has absorbed an update.
    #[must_use]
    pub fn should_update(&self) -> bool {
        self.state.dirty.get()
    }

    /// Total number of redraws requested so far.
    #[must_use]
    pub fn redraw_count(&self) -> u64 {
        self.state.redraws.get()
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw(&self) -> bool {
        self.state.pending.replace(false)
    }

    /// Returns `true` if both handles refer to the same sequence.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn end(&self) {
        let depth = &self.state.depth;
        debug_assert!(depth.get() > 0, "unbalanced update sequence");
        depth.set(depth.get().saturating_sub(1));
        if depth.get() == 0 && self.state.dirty.replace(false) {
            self.request_redraw();
        }
    }

    fn request_redraw(&self) {
        self.state.pending.set(true);
        let redraws = &self.state.redraws;
        redraws.set(redraws.get() + 1);
    }
}

/// Guard returned by [`UpdateSequence::begin`]; ends the sequence on drop.
#[derive(Debug)]
pub struct UpdateScope {
    sequence: UpdateSequence,
}

impl Drop for UpdateScope {
    fn drop(&mut self) {
        self.sequence.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_outside_sequence_redraws_immediately() {
        let seq = UpdateSequence::new();
        seq.notify_updated();
        assert_eq!(seq.redraw_count(), 1);
        assert!(seq.take_redraw());
        assert!(!seq.take_redraw());
    }

    #[test]
    fn nested_sequences_collapse_to_one_redraw() {
        let seq = UpdateSequence::new();
        {
            let _outer = seq.begin();
            {
                let _inner = seq.begin();
                seq.notify_updated();
                seq.notify_updated();
                assert_eq!(seq.depth(), 2);
            }
            assert_eq!(seq.redraw_count(), 0);
            assert!(seq.should_update());
            seq.notify_updated();
        }
        assert_eq!(seq.depth(), 0);
        assert_eq!(seq.redraw_count(), 1);
        assert!(!seq.should_update());
    }

    #[test]
    fn quiet_sequence_requests_nothing() {
        let seq = UpdateSequence::new();
        drop(seq.begin());
        assert_eq!(seq.redraw_count(), 0);
        assert!(!seq.take_redraw());
    }

    #[test]
    fn clones_share_state() {
        let a = UpdateSequence::new();
        let b = a.clone();
        let _scope = a.begin();
        assert!(b.is_active());
        assert!(a.shares_with(&b));
        assert!(!a.shares_with(&UpdateSequence::new()));
    }
}
