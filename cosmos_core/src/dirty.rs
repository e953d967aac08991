// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Each [`Plane`](crate::plane::Plane) records which of its matters changed
//! since the last drain using multi-channel dirty tracking (via
//! [`understory_dirty`]). Each channel is an independent category of change,
//! keyed by the matter's raw slot index.
//!
//! Matters in a plane are siblings on a ring, not a tree, so no channel
//! carries dependency edges: only the explicitly marked matter shows up in
//! the drain output.
//!
//! # Consumption
//!
//! [`Plane::take_changes`](crate::plane::Plane::take_changes) drains all
//! channels and surfaces the results as
//! [`PlaneChanges`](crate::plane::PlaneChanges), which renderers use to
//! compute damage.

use understory_dirty::Channel;

/// Position changed (placement, move, motion integration, resize mooring).
pub const GEOMETRY: Channel = Channel::new(0);

/// Selection flag flipped.
pub const SELECTION: Channel = Channel::new(1);

/// Matter content changed size or readiness.
pub const CONTENT: Channel = Channel::new(2);

/// Ring membership changed (insert, remove, erase).
pub const TOPOLOGY: Channel = Channel::new(3);
