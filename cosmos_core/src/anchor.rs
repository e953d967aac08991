// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named anchor points on a matter's bounding box.
//!
//! A [`MatterAnchor`] names one of nine points on a rectangle: the corners,
//! the edge midpoints, and the center. Placement operations on a
//! [`Plane`](crate::plane::Plane) express "which point of the matter lands on
//! the target" either as an anchor or directly as a pair of fractions in
//! `[0, 1]`, where `(0, 0)` is the left-top corner and `(1, 1)` is the
//! right-bottom corner.

use kurbo::{Point, Rect};

/// One of the nine named points of a bounding box.
///
/// The first letter is the horizontal position (`L`eft, `C`enter, `R`ight),
/// the second the vertical one (`T`op, `C`enter, `B`ottom).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatterAnchor {
    /// Left-top corner.
    #[default]
    LT,
    /// Center of the top edge.
    CT,
    /// Right-top corner.
    RT,
    /// Center of the left edge.
    LC,
    /// Center of the box.
    CC,
    /// Center of the right edge.
    RC,
    /// Left-bottom corner.
    LB,
    /// Center of the bottom edge.
    CB,
    /// Right-bottom corner.
    RB,
}

impl MatterAnchor {
    /// All anchors in row-major order.
    pub const ALL: [Self; 9] = [
        Self::LT,
        Self::CT,
        Self::RT,
        Self::LC,
        Self::CC,
        Self::RC,
        Self::LB,
        Self::CB,
        Self::RB,
    ];

    /// Returns the `(fx, fy)` fractions of this anchor.
    #[must_use]
    pub const fn fractions(self) -> (f64, f64) {
        match self {
            Self::LT => (0.0, 0.0),
            Self::CT => (0.5, 0.0),
            Self::RT => (1.0, 0.0),
            Self::LC => (0.0, 0.5),
            Self::CC => (0.5, 0.5),
            Self::RC => (1.0, 0.5),
            Self::LB => (0.0, 1.0),
            Self::CB => (0.5, 1.0),
            Self::RB => (1.0, 1.0),
        }
    }

    /// Returns the point this anchor names on `rect`.
    #[must_use]
    pub fn point_in(self, rect: Rect) -> Point {
        let (fx, fy) = self.fractions();
        Point::new(
            rect.x0 + rect.width() * fx,
            rect.y0 + rect.height() * fy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_cover_the_unit_square() {
        assert_eq!(MatterAnchor::LT.fractions(), (0.0, 0.0));
        assert_eq!(MatterAnchor::CC.fractions(), (0.5, 0.5));
        assert_eq!(MatterAnchor::RB.fractions(), (1.0, 1.0));
        assert_eq!(MatterAnchor::CB.fractions(), (0.5, 1.0));
        assert_eq!(MatterAnchor::RC.fractions(), (1.0, 0.5));
        for anchor in MatterAnchor::ALL {
            let (fx, fy) = anchor.fractions();
            assert!((0.0..=1.0).contains(&fx), "{anchor:?} fx out of range");
            assert!((0.0..=1.0).contains(&fy), "{anchor:?} fy out of range");
        }
    }

    #[test]
    fn default_is_left_top() {
        assert_eq!(MatterAnchor::default(), MatterAnchor::LT);
    }

    #[test]
    fn point_in_rect() {
        let rect = Rect::new(10.0, 20.0, 50.0, 40.0);
        assert_eq!(MatterAnchor::LT.point_in(rect), Point::new(10.0, 20.0));
        assert_eq!(MatterAnchor::CC.point_in(rect), Point::new(30.0, 30.0));
        assert_eq!(MatterAnchor::RB.point_in(rect), Point::new(50.0, 40.0));
        assert_eq!(MatterAnchor::CT.point_in(rect), Point::new(30.0, 20.0));
    }
}
