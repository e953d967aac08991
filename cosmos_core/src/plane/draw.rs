// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing a plane onto a [`Canvas`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

use super::Plane;
use crate::canvas::{Canvas, Rgba};

impl Plane {
    /// Draws the plane into `area` of `canvas`.
    ///
    /// The background (if any) fills the part of `area` with non-negative
    /// coordinates. Mode-visible matters are drawn in ring order, each at
    /// `(position + translation) * scale + area.origin()` and clipped to its
    /// pixel-aligned box; matters entirely outside `area` are skipped.
    /// Selected matters get an outline from
    /// [`PlaneHooks::draw_visible_selection`](super::PlaneHooks::draw_visible_selection)
    /// drawn without a clip.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, area: Rect) {
        let visible = Rect::new(area.x0.max(0.0), area.y0.max(0.0), area.x1, area.y1);

        if let Some(background) = self.background
            && !background.is_transparent()
        {
            canvas.fill_rect(visible, background);
        }

        let origin = area.origin().to_vec2();
        for idx in self.ring.order() {
            let Some(entry) = self.ring.get_mut(idx) else {
                continue;
            };
            if !entry.record.unmasked(self.mode) {
                continue;
            }
            let position = entry.record.position;
            let size = entry.matter.extent(position);
            let at = Point::new(
                (position.x + self.translate.x) * self.scale.x,
                (position.y + self.translate.y) * self.scale.y,
            ) + origin;
            let bounds = Rect::from_origin_size(at, size);
            if bounds.x0 >= visible.x1
                || bounds.y0 >= visible.y1
                || bounds.x1 <= visible.x0
                || bounds.y1 <= visible.y0
            {
                continue;
            }

            let clip_origin = Point::new(at.x.floor(), at.y.floor());
            canvas.set_clip(Some(Rect::new(
                clip_origin.x,
                clip_origin.y,
                clip_origin.x + size.width.ceil(),
                clip_origin.y + size.height.ceil(),
            )));
            entry.matter.draw(canvas, bounds);
            if entry.record.selected {
                canvas.set_clip(None);
                self.hooks.draw_visible_selection(canvas, bounds);
            }
        }

        if !self.ring.is_empty() {
            canvas.set_clip(None);
        }
    }

    /// Draws the part of the plane inside `region` onto a `region`-sized
    /// canvas, with `background` in place of the plane's own.
    ///
    /// The plane's translation and scale still apply.
    pub fn snapshot(&mut self, canvas: &mut dyn Canvas, region: Rect, background: Option<Rgba>) {
        let saved = core::mem::replace(&mut self.background, background);
        let area = Rect::new(-region.x0, -region.y0, region.width(), region.height());
        self.draw(canvas, area);
        self.background = saved;
    }
}
