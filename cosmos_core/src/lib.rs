// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene rings for interactive 2D applications.
//!
//! `cosmos_core` manages the objects on screen, called *matters*, and routes
//! input to them. It is `no_std` compatible (with `alloc`) and leaves
//! rendering and windowing to the host through small collaborator traits.
//!
//! # Architecture
//!
//! ```text
//!   Cosmos ── ring of planes, one active
//!     │
//!     ├── Plane + Stage ── ring of matters (draw order = insertion order)
//!     │     │
//!     │     ├── placement records: position, selection, mode, pending
//!     │     ├── caret owner and hover target
//!     │     └── dirty channels ──► take_changes() ──► PlaneChanges
//!     │
//!     └── UpdateSequence ── one redraw request per outermost scope
//! ```
//!
//! **[`cosmos`]** — The application root: owns planes and their stages,
//! fans frame ticks out to every plane, and forwards input to the active one.
//!
//! **[`plane`]** — The matter ring with insertion, anchor placement (with
//! deferred replay for matters that are not ready yet), selection, caret
//! ownership, hit-testing, hover/tap routing, sprite motion, and drawing.
//!
//! **[`matter`]** — The [`Matter`](matter::Matter) capability trait with
//! optional hooks, and the [`Movable`](matter::Movable) sprite sub-interface.
//!
//! **[`anchor`]** — The nine [`MatterAnchor`](anchor::MatterAnchor) points
//! and their fractional offsets.
//!
//! **[`update`]** — Nestable [`UpdateSequence`](update::UpdateSequence)
//! brackets that coalesce redraw requests.
//!
//! **[`canvas`]** — The [`Canvas`](canvas::Canvas) and
//! [`Screen`](canvas::Screen) host contracts.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Collects per-matter
//!   lifecycle and interaction events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod anchor;
pub mod canvas;
pub mod cosmos;
pub mod dirty;
pub mod id;
pub mod input;
pub mod matter;
pub mod plane;
pub mod tick;
pub mod trace;
pub mod update;

mod ring;

#[cfg(test)]
mod test_support;
