// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-list recording and damage tracking for cosmos planes.
//!
//! This crate sits between [`cosmos_core`]'s planes and a concrete
//! rasterizer. It defines:
//!
//! - [`DrawList`] — a [`Canvas`](cosmos_core::canvas::Canvas) that records
//!   every call as a [`DrawCommand`], for headless hosts, tests, and
//!   deferred replay
//! - [`DamageRegion`] — spatial damage tracking for partial re-rendering,
//!   computed from a plane's [`PlaneChanges`](cosmos_core::plane::PlaneChanges)

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod damage;
mod draw_list;

pub use damage::DamageRegion;
pub use draw_list::{DrawCommand, DrawList};
