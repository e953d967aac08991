// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial re-rendering.

use alloc::vec::Vec;

use cosmos_core::plane::{Plane, PlaneChanges};
use kurbo::Rect;

/// Margin added around damaged boxes so selection outlines are repainted.
const OUTLINE_MARGIN: f64 = 1.0;

/// A region of the canvas that needs re-rendering.
///
/// Rectangles are relative to the origin of the area the plane is drawn
/// into.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// The entire canvas needs redrawing.
    #[default]
    Full,
    /// A list of axis-aligned rectangles that need redrawing.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Computes the damage a plane's drained changes cause.
    ///
    /// Movement, insertion, removal, and mode changes damage the whole
    /// canvas, since the vacated area is no longer known. Selection and
    /// content changes damage only the affected matters' drawn boxes.
    #[must_use]
    pub fn for_changes(plane: &Plane, changes: &PlaneChanges) -> Self {
        if changes.topology_changed
            || !changes.geometry.is_empty()
            || !changes.added.is_empty()
            || !changes.removed.is_empty()
        {
            return Self::Full;
        }
        let rects: Vec<Rect> = changes
            .selection
            .iter()
            .chain(&changes.content)
            .filter_map(|&idx| plane.screen_boundary_at(idx))
            .map(|rect| rect.inflate(OUTLINE_MARGIN, OUTLINE_MARGIN))
            .collect();
        if rects.is_empty() {
            Self::None
        } else {
            Self::Rects(rects)
        }
    }

    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the smallest rectangle covering the damage, or `None` for
    /// [`Full`](Self::Full) and [`None`](Self::None).
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Self::Rects(rects) => rects.iter().copied().reduce(|acc, rect| acc.union(rect)),
            Self::Full | Self::None => None,
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }
}
