// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-plane application logic.

use kurbo::Size;

use crate::plane::Plane;
use crate::tick::Tick;

/// Application logic that populates and drives one [`Plane`].
///
/// A stage is pushed onto a [`Cosmos`](super::Cosmos) together with the
/// plane it manages. Every method has a no-op default.
pub trait Stage {
    /// Creates the plane's matters. Runs once, inside
    /// [`Cosmos::on_big_bang`](super::Cosmos::on_big_bang).
    fn construct(&mut self, plane: &mut Plane, size: Size) {
        _ = (plane, size);
    }

    /// Loads resources after construction.
    fn load(&mut self, plane: &mut Plane, size: Size) {
        _ = (plane, size);
    }

    /// Lays the matters out again for a new display size.
    fn reflow(&mut self, plane: &mut Plane, size: Size) {
        _ = (plane, size);
    }

    /// Per-frame logic, run after the plane's own
    /// [`on_elapse`](Plane::on_elapse).
    fn update(&mut self, plane: &mut Plane, tick: &Tick) {
        _ = (plane, tick);
    }

    /// Returns `true` if the application may exit while this plane is
    /// active.
    fn can_exit(&self, plane: &Plane) -> bool {
        _ = plane;
        false
    }

    /// Persists whatever the plane needs to survive a restart.
    fn on_save(&mut self, plane: &mut Plane) {
        _ = plane;
    }
}

impl Stage for () {}

/// Cosmos-wide per-frame logic, run after every plane has elapsed.
pub trait CosmosHooks {
    /// Runs once per frame.
    fn update(&mut self, tick: &Tick) {
        _ = tick;
    }
}

impl CosmosHooks for () {}
