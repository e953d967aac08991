// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame updates and sprite motion.

use kurbo::{Point, Size, Vec2};

use super::Plane;
use crate::tick::Tick;

impl Plane {
    /// Advances every mode-visible matter by one frame.
    ///
    /// Matters are updated in ring order. A [`Movable`](crate::matter::Movable)
    /// matter with a nonzero speed is moved by its speed and tested against
    /// the display rectangle `(0, 0)..display_size`. When it strays outside,
    /// [`on_border`](crate::matter::Movable::on_border) is told by how much.
    /// If either speed component is zero afterwards, the matter is pulled
    /// back inside on both axes.
    pub fn on_elapse(&mut self, tick: &Tick) {
        let _scope = self.updates.begin();
        let display = self.display;
        for idx in self.ring.order() {
            let Some(entry) = self.ring.get_mut(idx) else {
                continue;
            };
            if !entry.record.unmasked(self.mode) {
                continue;
            }
            let matter = &mut *entry.matter;
            matter.update(tick);

            let Some(speed) = matter.as_movable().map(|sprite| sprite.speed()) else {
                continue;
            };
            if speed == Vec2::ZERO {
                continue;
            }
            let mut next = entry.record.position + speed;
            let size = matter.extent(next);
            let hdist = overshoot(next.x, size.width, display.width);
            let vdist = overshoot(next.y, size.height, display.height);
            if (hdist != 0.0 || vdist != 0.0)
                && let Some(sprite) = matter.as_movable()
            {
                sprite.on_border(hdist, vdist);
                let speed = sprite.speed();
                if speed.x == 0.0 || speed.y == 0.0 {
                    next = clamp_into(next, size, display);
                }
            }
            if self.move_record(idx, next) {
                self.updates.notify_updated();
            }
        }
    }
}

/// Distance past the near (negative) or far (positive) edge, zero if inside.
fn overshoot(origin: f64, extent: f64, limit: f64) -> f64 {
    if origin < 0.0 {
        origin
    } else if origin + extent > limit {
        origin + extent - limit
    } else {
        0.0
    }
}

fn clamp_into(origin: Point, size: Size, display: Size) -> Point {
    let clamp = |v: f64, extent: f64, limit: f64| {
        if v < 0.0 {
            0.0
        } else if v + extent > limit {
            limit - extent
        } else {
            v
        }
    };
    Point::new(
        clamp(origin.x, size.width, display.width),
        clamp(origin.y, size.height, display.height),
    )
}
