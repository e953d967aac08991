// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw list: an ordered record of canvas calls for one frame.

use alloc::vec::Vec;

use cosmos_core::canvas::{Canvas, Rgba};
use kurbo::Rect;

/// A single recorded canvas call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Restrict (or, with `None`, stop restricting) subsequent draws.
    SetClip(Option<Rect>),
    /// Fill a rectangle.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// Outline a rectangle.
    StrokeRect {
        /// Area to outline.
        rect: Rect,
        /// Stroke color.
        color: Rgba,
    },
}

/// A [`Canvas`] that records every call in order.
///
/// Hosts without a rasterizer draw into a list and hand it to a renderer
/// later with [`replay`](Self::replay).
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the list for reuse.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns the recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Issues every recorded command to `canvas`.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for command in &self.commands {
            match *command {
                DrawCommand::SetClip(clip) => canvas.set_clip(clip),
                DrawCommand::FillRect { rect, color } => canvas.fill_rect(rect, color),
                DrawCommand::StrokeRect { rect, color } => canvas.stroke_rect(rect, color),
            }
        }
    }
}

impl Canvas for DrawList {
    fn set_clip(&mut self, clip: Option<Rect>) {
        self.commands.push(DrawCommand::SetClip(clip));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }
}
