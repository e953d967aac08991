// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! A batch of [`MatterEvent`]s is stored as one record per event, each
//! carrying the frame it was flushed in.

use cosmos_core::trace::{
    FrameTickEvent, MatterEvent, MatterEventKind, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    RedrawEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_TICK: u8 = 1;
const TAG_PHASE_BEGIN: u8 = 2;
const TAG_PHASE_END: u8 = 3;
const TAG_REDRAW: u8 = 4;
const TAG_MATTER: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::BigBang => 0,
            PhaseKind::Elapse => 1,
            PhaseKind::Reflow => 2,
            PhaseKind::Draw => 3,
            PhaseKind::Input => 4,
        });
    }

    fn write_matter_kind(&mut self, k: MatterEventKind) {
        self.write_u8(match k {
            MatterEventKind::Inserted => 0,
            MatterEventKind::Ready => 1,
            MatterEventKind::Removed => 2,
            MatterEventKind::Selected => 3,
            MatterEventKind::Deselected => 4,
            MatterEventKind::Focused => 5,
            MatterEventKind::Unfocused => 6,
            MatterEventKind::Hovered => 7,
            MatterEventKind::Goodbye => 8,
            MatterEventKind::Tapped => 9,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.write_u8(TAG_FRAME_TICK);
        self.write_u32(e.count);
        self.write_u32(e.interval);
        self.write_u32(e.uptime);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u32(e.frame);
        self.write_phase(e.phase);
        self.write_u32(e.uptime);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u32(e.frame);
        self.write_phase(e.phase);
        self.write_u32(e.uptime);
    }

    fn on_redraw(&mut self, e: &RedrawEvent) {
        self.write_u8(TAG_REDRAW);
        self.write_u32(e.frame);
        self.write_u64(e.sequence);
    }

    fn on_matter_events(&mut self, frame: u32, events: &[MatterEvent]) {
        for e in events {
            self.write_u8(TAG_MATTER);
            self.write_u32(frame);
            self.write_u32(e.matter_index);
            self.write_matter_kind(e.kind);
        }
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`FrameTickEvent`].
    FrameTick(FrameTickEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// A [`RedrawEvent`].
    Redraw(RedrawEvent),
    /// A single [`MatterEvent`].
    Matter {
        /// Frame counter at flush time.
        frame: u32,
        /// The recorded event.
        event: MatterEvent,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::BigBang,
            1 => PhaseKind::Elapse,
            2 => PhaseKind::Reflow,
            3 => PhaseKind::Draw,
            4 => PhaseKind::Input,
            _ => return None,
        })
    }

    fn read_matter_kind(&mut self) -> Option<MatterEventKind> {
        Some(match self.read_u8()? {
            0 => MatterEventKind::Inserted,
            1 => MatterEventKind::Ready,
            2 => MatterEventKind::Removed,
            3 => MatterEventKind::Selected,
            4 => MatterEventKind::Deselected,
            5 => MatterEventKind::Focused,
            6 => MatterEventKind::Unfocused,
            7 => MatterEventKind::Hovered,
            8 => MatterEventKind::Goodbye,
            9 => MatterEventKind::Tapped,
            _ => return None,
        })
    }

    fn decode_frame_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameTick(FrameTickEvent {
            count: self.read_u32()?,
            interval: self.read_u32()?,
            uptime: self.read_u32()?,
        }))
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            frame: self.read_u32()?,
            phase: self.read_phase()?,
            uptime: self.read_u32()?,
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            frame: self.read_u32()?,
            phase: self.read_phase()?,
            uptime: self.read_u32()?,
        }))
    }

    fn decode_redraw(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Redraw(RedrawEvent {
            frame: self.read_u32()?,
            sequence: self.read_u64()?,
        }))
    }

    fn decode_matter(&mut self) -> Option<RecordedEvent> {
        let frame = self.read_u32()?;
        let matter_index = self.read_u32()?;
        let kind = self.read_matter_kind()?;
        Some(RecordedEvent::Matter {
            frame,
            event: MatterEvent { matter_index, kind },
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FRAME_TICK => self.decode_frame_tick(),
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_REDRAW => self.decode_redraw(),
            TAG_MATTER => self.decode_matter(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
