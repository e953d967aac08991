// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matter and plane identity types.

use core::fmt;

/// Sentinel value indicating "no slot" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a matter owned by a [`Plane`](crate::plane::Plane).
///
/// Contains the owning plane's stamp, a slot index, and a generation
/// counter. Handles from another plane never resolve, and stale handles are
/// detected after a matter is removed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatterId {
    /// Stamp of the plane that issued the handle.
    pub(crate) plane: u32,
    /// Slot index into the plane's ring.
    pub(crate) idx: u32,
    /// Generation counter; must match the ring's generation for this slot.
    pub(crate) generation: u32,
}

impl MatterId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for MatterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatterId({}:{}@gen{})", self.plane, self.idx, self.generation)
    }
}

/// A handle to a plane owned by a [`Cosmos`](crate::cosmos::Cosmos).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl PlaneId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaneId({}@gen{})", self.idx, self.generation)
    }
}
