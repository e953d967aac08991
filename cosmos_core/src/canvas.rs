// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for drawing and window chrome.
//!
//! The engine never owns a renderer or a window. Instead the host passes in
//! two collaborators:
//!
//! - **[`Canvas`]** — receives draw calls from
//!   [`Plane::draw`](crate::plane::Plane::draw) and from each matter's
//!   [`draw`](crate::matter::Matter::draw) hook. Implemented by real
//!   rasterizers and by the recording canvas in `cosmos_render`.
//!
//! - **[`Screen`]** — window-level services the
//!   [`Cosmos`](crate::cosmos::Cosmos) needs, such as setting the title.
//!
//! # Frame pseudocode
//!
//! ```rust,ignore
//! fn on_frame(tick: Tick) {
//!     cosmos.on_elapse(tick);
//!     if cosmos.take_redraw() {
//!         cosmos.draw(&mut canvas, Rect::new(0.0, 0.0, width, height));
//!         canvas.present();
//!     }
//! }
//! ```

use kurbo::Rect;

/// An RGB color with a separate alpha channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Packed `0xRRGGBB`.
    pub rgb: u32,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl Rgba {
    /// Creates a color.
    #[inline]
    #[must_use]
    pub const fn new(rgb: u32, alpha: f64) -> Self {
        Self { rgb, alpha }
    }

    /// Creates a fully opaque color.
    #[inline]
    #[must_use]
    pub const fn opaque(rgb: u32) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// Returns `true` if the color contributes nothing when painted.
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }
}

/// Color used by the default selection outline.
pub const SELECTION_COLOR: Rgba = Rgba::opaque(0x00FF_FF);

/// A drawing surface.
///
/// Coordinates are in the same space as the `area` passed to
/// [`Plane::draw`](crate::plane::Plane::draw).
pub trait Canvas {
    /// Restricts subsequent draws to `clip`, or lifts the restriction.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Outlines `rect` with `color`.
    fn stroke_rect(&mut self, rect: Rect, color: Rgba);
}

/// Window-level services supplied by the host.
pub trait Screen {
    /// Sets the window title.
    fn set_window_title(&mut self, title: &str);
}

/// A [`Screen`] that ignores every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessScreen;

impl Screen for HeadlessScreen {
    fn set_window_title(&mut self, title: &str) {
        _ = title;
    }
}
