// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame tick delivered to `on_elapse` handlers.

/// One frame of the host's timer.
///
/// The host drives [`Cosmos::on_elapse`](crate::cosmos::Cosmos::on_elapse)
/// once per frame; the tick is forwarded unchanged to every plane and every
/// matter's `update` hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tick {
    /// Monotonic frame counter.
    pub count: u32,
    /// Milliseconds since the previous tick.
    pub interval: u32,
    /// Milliseconds since the host started.
    pub uptime: u32,
}

impl Tick {
    /// Creates a tick.
    #[inline]
    #[must_use]
    pub const fn new(count: u32, interval: u32, uptime: u32) -> Self {
        Self {
            count,
            interval,
            uptime,
        }
    }

    /// Returns the tick that follows this one after `interval` milliseconds.
    #[inline]
    #[must_use]
    pub const fn advance(self, interval: u32) -> Self {
        Self {
            count: self.count.wrapping_add(1),
            interval,
            uptime: self.uptime.wrapping_add(interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_uptime() {
        let tick = Tick::default().advance(16).advance(17);
        assert_eq!(tick, Tick::new(2, 17, 33));
    }
}
