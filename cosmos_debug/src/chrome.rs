// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are the host's millisecond uptime converted to microseconds.
/// Redraw and matter records carry no time of their own and are stamped
/// with the latest uptime seen before them.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut now = 0_u64;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FrameTick(e) => {
                now = ms_to_us(e.uptime);
                events.push(json!({
                    "ph": "i",
                    "name": "FrameTick",
                    "cat": "Cosmos",
                    "ts": now,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "count": e.count,
                        "interval_ms": e.interval,
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                now = ms_to_us(e.uptime);
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Phase",
                    "ts": now,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame": e.frame,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                now = ms_to_us(e.uptime);
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Phase",
                    "ts": now,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame": e.frame,
                    }
                }));
            }
            RecordedEvent::Redraw(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Redraw",
                    "cat": "Phase",
                    "ts": now,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame": e.frame,
                        "sequence": e.sequence,
                    }
                }));
            }
            RecordedEvent::Matter { frame, event } => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", event.kind),
                    "cat": "Matter",
                    "ts": now,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame": frame,
                        "matter_index": event.matter_index,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ms_to_us(ms: u32) -> u64 {
    u64::from(ms) * 1000
}
