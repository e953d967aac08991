// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop that exercises a cosmos and its diagnostics pipeline.
//!
//! Builds a two-plane cosmos with bouncing sprites, runs 60 synthetic frames
//! while recording events to both a
//! [`PrettyPrintSink`](cosmos_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](cosmos_debug::recorder::RecorderSink), taps a sprite,
//! draws into a [`DrawList`](cosmos_render::DrawList) with damage tracking,
//! then exports a Chrome trace JSON file.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use cosmos_core::canvas::{Canvas, Rgba, Screen};
use cosmos_core::cosmos::{Cosmos, CosmosConfig, Stage};
use cosmos_core::input::{ButtonState, MouseButton};
use cosmos_core::matter::{EventLevel, Matter, Movable};
use cosmos_core::plane::{Plane, SelectAll};
use cosmos_core::tick::Tick;
use cosmos_core::trace::{
    FrameTickEvent, MatterEvent, PhaseBeginEvent, PhaseEndEvent, RedrawEvent, TraceSink, Tracer,
};
use cosmos_debug::pretty::PrettyPrintSink;
use cosmos_debug::recorder::RecorderSink;
use cosmos_render::{DamageRegion, DrawList};
use kurbo::{Point, Rect, Size, Vec2};

const FRAME_COUNT: u32 = 60;
const FRAME_INTERVAL_MS: u32 = 16;
const DISPLAY: Size = Size::new(320.0, 240.0);

// -- Sinks --

/// Forwards every event to a pretty printer and a recorder.
#[derive(Debug)]
struct Tee {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.pretty.on_frame_tick(e);
        self.recorder.on_frame_tick(e);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.pretty.on_phase_begin(e);
        self.recorder.on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.pretty.on_phase_end(e);
        self.recorder.on_phase_end(e);
    }

    fn on_redraw(&mut self, e: &RedrawEvent) {
        self.pretty.on_redraw(e);
        self.recorder.on_redraw(e);
    }

    fn on_matter_events(&mut self, frame: u32, events: &[MatterEvent]) {
        self.pretty.on_matter_events(frame, events);
        self.recorder.on_matter_events(frame, events);
    }
}

// -- Scene --

/// A square that bounces off the display edges.
#[derive(Debug)]
struct Ball {
    side: f64,
    color: Rgba,
    speed: Vec2,
}

impl Matter for Ball {
    fn extent(&self, at: Point) -> Size {
        _ = at;
        Size::new(self.side, self.side)
    }

    fn draw(&mut self, canvas: &mut dyn Canvas, bounds: Rect) {
        canvas.fill_rect(bounds, self.color);
    }

    fn events(&self) -> EventLevel {
        EventLevel::HighLevel
    }

    fn as_movable(&mut self) -> Option<&mut dyn Movable> {
        Some(self)
    }
}

impl Movable for Ball {
    fn speed(&self) -> Vec2 {
        self.speed
    }

    fn set_speed(&mut self, speed: Vec2) {
        self.speed = speed;
    }

    fn on_border(&mut self, hdist: f64, vdist: f64) {
        self.bounce(hdist, vdist);
    }
}

/// Fills the arena plane with balls.
#[derive(Debug)]
struct Arena;

impl Stage for Arena {
    fn construct(&mut self, plane: &mut Plane, size: Size) {
        let balls = [
            (Point::new(20.0, 20.0), Vec2::new(3.0, 2.0), 0xE0_4040),
            (Point::new(size.width / 2.0, 60.0), Vec2::new(-2.0, 4.0), 0x40_C040),
            (Point::new(200.0, size.height - 40.0), Vec2::new(5.0, -3.0), 0x40_60E0),
        ];
        for (at, speed, rgb) in balls {
            plane.insert(
                Ball {
                    side: 16.0,
                    color: Rgba::opaque(rgb),
                    speed,
                },
                at,
            );
        }
    }
}

/// Prints the window title instead of owning a window.
#[derive(Debug)]
struct ConsoleScreen;

impl Screen for ConsoleScreen {
    fn set_window_title(&mut self, title: &str) {
        println!("[screen] title={title}");
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let tee = Rc::new(RefCell::new(Tee {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())),
        recorder: RecorderSink::new(),
    }));

    // -- cosmos ------------------------------------------------------------
    let mut cosmos = Cosmos::new(CosmosConfig::default(), ConsoleScreen);
    cosmos.set_tracer(Tracer::new(tee.clone()));
    let arena = cosmos.push_plane(
        Plane::with_hooks("arena", 0, SelectAll { multiple: false }),
        Arena,
    );
    cosmos.push_plane(Plane::new("hud", 0), ());
    cosmos.on_big_bang(DISPLAY);

    // -- simulated loop ----------------------------------------------------
    let mut tick = Tick::new(0, 0, 0);
    let mut list = DrawList::new();
    let mut damage = DamageRegion::None;

    for frame in 0..FRAME_COUNT {
        tick = tick.advance(FRAME_INTERVAL_MS);
        cosmos.on_elapse(tick);

        // Tap whatever sits under the display center halfway through.
        if frame == FRAME_COUNT / 2 {
            let center = Point::new(DISPLAY.width / 2.0, DISPLAY.height / 2.0);
            cosmos.on_mouse_move(ButtonState::empty(), center, Vec2::ZERO);
            cosmos.on_mouse_button(MouseButton::Left, center, 1, true);
            cosmos.on_mouse_button(MouseButton::Left, center, 1, false);
        }

        if let Some(plane) = cosmos.plane_mut(arena) {
            let changes = plane.take_changes();
            damage.merge(&DamageRegion::for_changes(plane, &changes));
        }

        if cosmos.take_redraw() {
            list.clear();
            cosmos.draw(&mut list, Rect::from_origin_size(Point::ZERO, DISPLAY));
            println!(
                "[draw] frame={} commands={} damage={:?}",
                tick.count,
                list.len(),
                damage.bounding_box()
            );
            damage = DamageRegion::None;
        }
    }

    if let Some(plane) = cosmos.plane(arena) {
        println!(
            "[summary] matters={} selected={} bounds={:?}",
            plane.len(),
            plane.count_selected(),
            plane.matters_boundary()
        );
    }

    // -- export ------------------------------------------------------------
    let bytes = tee.borrow().recorder.as_bytes().to_vec();
    let path = "trace_demo.json";
    let file = File::create(path).expect("failed to create trace file");
    let mut writer = BufWriter::new(file);
    cosmos_debug::chrome::export(&bytes, &mut writer).expect("failed to write trace");
    eprintln!("Wrote {path} ({} bytes recorded)", bytes.len());
}
