// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the cosmos frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Cosmos`](crate::cosmos::Cosmos) and its planes call at each stage. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional shared sink. Cosmos and every plane pushed
//! onto it hold clones of the same tracer. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — makes planes collect [`MatterEvent`]
//!   records and enables the corresponding `TraceSink` method.

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::tick::Tick;

/// A trace sink shared between a cosmos and its planes.
pub type SharedSink = Rc<RefCell<dyn TraceSink>>;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the cosmos loop is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Constructing and loading every plane.
    BigBang,
    /// Per-frame update and motion integration.
    Elapse,
    /// Propagating a new display size.
    Reflow,
    /// Drawing the active plane.
    Draw,
    /// Routing a pointer, keyboard, or text event.
    Input,
}

/// What happened to a matter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatterEventKind {
    /// Linked into the ring.
    Inserted,
    /// A deferred placement was replayed.
    Ready,
    /// Removed from the ring.
    Removed,
    /// Selection flag set.
    Selected,
    /// Selection flag cleared.
    Deselected,
    /// Became the caret owner.
    Focused,
    /// Lost the caret.
    Unfocused,
    /// Pointer entered.
    Hovered,
    /// Pointer left.
    Goodbye,
    /// Tapped (pressed and released).
    Tapped,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the host delivers a frame tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTickEvent {
    /// Monotonic frame counter.
    pub count: u32,
    /// Milliseconds since the previous tick.
    pub interval: u32,
    /// Milliseconds since the host started.
    pub uptime: u32,
}

impl From<&Tick> for FrameTickEvent {
    fn from(tick: &Tick) -> Self {
        Self {
            count: tick.count,
            interval: tick.interval,
            uptime: tick.uptime,
        }
    }
}

/// Marks the beginning of a cosmos phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseBeginEvent {
    /// Frame counter of the most recent tick.
    pub frame: u32,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Uptime of the most recent tick, in milliseconds.
    pub uptime: u32,
}

/// Marks the end of a cosmos phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEndEvent {
    /// Frame counter of the most recent tick.
    pub frame: u32,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Uptime of the most recent tick, in milliseconds.
    pub uptime: u32,
}

/// Emitted when a closed update sequence requested a redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawEvent {
    /// Frame counter of the most recent tick.
    pub frame: u32,
    /// Running count of redraw requests.
    pub sequence: u64,
}

/// A single matter lifecycle or interaction record.
///
/// Planes only collect these when the `trace-rich` feature is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatterEvent {
    /// Slot index of the matter within its plane.
    pub matter_index: u32,
    /// What happened.
    pub kind: MatterEventKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the cosmos loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a frame tick is received.
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        _ = e;
    }

    /// Called at the beginning of a cosmos phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a cosmos phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called when an update sequence closes with a redraw request.
    fn on_redraw(&mut self, e: &RedrawEvent) {
        _ = e;
    }

    /// Called with a batch of matter events (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_matter_events(&mut self, frame: u32, events: &[MatterEvent]) {
        _ = (frame, events);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin, cloneable wrapper around an optional [`SharedSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching. A sink that is already borrowed (re-entrant emission) drops
/// the event.
#[derive(Clone, Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<SharedSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<SharedSink>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: SharedSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[cfg(feature = "trace")]
    #[inline]
    fn with_sink(&self, f: impl FnOnce(&mut dyn TraceSink)) {
        if let Some(sink) = &self.sink
            && let Ok(mut sink) = sink.try_borrow_mut()
        {
            f(&mut *sink);
        }
    }

    /// Emits a [`FrameTickEvent`].
    #[inline]
    pub fn frame_tick(&self, e: &FrameTickEvent) {
        #[cfg(feature = "trace")]
        self.with_sink(|s| s.on_frame_tick(e));
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&self, e: &PhaseBeginEvent) {
        #[cfg(feature = "trace")]
        self.with_sink(|s| s.on_phase_begin(e));
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&self, e: &PhaseEndEvent) {
        #[cfg(feature = "trace")]
        self.with_sink(|s| s.on_phase_end(e));
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RedrawEvent`].
    #[inline]
    pub fn redraw(&self, e: &RedrawEvent) {
        #[cfg(feature = "trace")]
        self.with_sink(|s| s.on_redraw(e));
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits matter events (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn matter_events(&self, frame: u32, events: &[MatterEvent]) {
        self.with_sink(|s| s.on_matter_events(frame, events));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tick() -> FrameTickEvent {
        FrameTickEvent::from(&Tick::new(42, 16, 672))
    }

    #[test]
    fn frame_tick_event_from_tick() {
        let evt = sample_tick();
        assert_eq!(evt.count, 42);
        assert_eq!(evt.interval, 16);
        assert_eq!(evt.uptime, 672);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame_tick(&sample_tick());
        sink.on_redraw(&RedrawEvent {
            frame: 0,
            sequence: 1,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let tracer = Tracer::none();
        tracer.frame_tick(&sample_tick());
        tracer.phase_begin(&PhaseBeginEvent {
            frame: 0,
            phase: PhaseKind::Elapse,
            uptime: 0,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_shared_sink() {
        use alloc::vec::Vec;

        #[derive(Default)]
        struct RecordingSink {
            ticks: Vec<u32>,
            phases: Vec<PhaseKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame_tick(&mut self, e: &FrameTickEvent) {
                self.ticks.push(e.count);
            }
            fn on_phase_end(&mut self, e: &PhaseEndEvent) {
                self.phases.push(e.phase);
            }
        }

        let sink = Rc::new(RefCell::new(RecordingSink::default()));
        let tracer = Tracer::new(sink.clone());
        let twin = tracer.clone();
        tracer.frame_tick(&sample_tick());
        twin.phase_end(&PhaseEndEvent {
            frame: 42,
            phase: PhaseKind::Draw,
            uptime: 672,
        });
        assert_eq!(sink.borrow().ticks, &[42]);
        assert_eq!(sink.borrow().phases, &[PhaseKind::Draw]);
    }
}
