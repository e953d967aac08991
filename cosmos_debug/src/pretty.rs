// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! the host's millisecond uptime.

use std::io::Write;

use cosmos_core::trace::{
    FrameTickEvent, MatterEvent, MatterEventKind, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    RedrawEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::BigBang => "big-bang",
        PhaseKind::Elapse => "elapse",
        PhaseKind::Reflow => "reflow",
        PhaseKind::Draw => "draw",
        PhaseKind::Input => "input",
    }
}

fn matter_kind_name(kind: MatterEventKind) -> &'static str {
    match kind {
        MatterEventKind::Inserted => "inserted",
        MatterEventKind::Ready => "ready",
        MatterEventKind::Removed => "removed",
        MatterEventKind::Selected => "selected",
        MatterEventKind::Deselected => "deselected",
        MatterEventKind::Focused => "focused",
        MatterEventKind::Unfocused => "unfocused",
        MatterEventKind::Hovered => "hovered",
        MatterEventKind::Goodbye => "goodbye",
        MatterEventKind::Tapped => "tapped",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        let _ = writeln!(
            self.writer,
            "[tick] frame={} interval={}ms uptime={}ms",
            e.count, e.interval, e.uptime,
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {} at {}ms",
            e.frame,
            phase_name(e.phase),
            e.uptime,
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {} at {}ms",
            e.frame,
            phase_name(e.phase),
            e.uptime,
        );
    }

    fn on_redraw(&mut self, e: &RedrawEvent) {
        let _ = writeln!(self.writer, "[redraw] frame={} seq={}", e.frame, e.sequence);
    }

    fn on_matter_events(&mut self, frame: u32, events: &[MatterEvent]) {
        let _ = write!(self.writer, "[matters] frame={frame}");
        for e in events {
            let _ = write!(
                self.writer,
                " {}#{}",
                matter_kind_name(e.kind),
                e.matter_index
            );
        }
        let _ = writeln!(self.writer);
    }
}
