// Copyright 2026 the Cosmos Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The application root: a ring of planes and the host's entry points.
//!
//! A [`Cosmos`] owns every [`Plane`] pushed onto it, each paired with the
//! [`Stage`] that populates and drives it. One plane is *active*: it is the
//! only one drawn and the only one that receives input, while every plane
//! is elapsed each frame.
//!
//! All planes share the cosmos's [`UpdateSequence`], so a frame in which
//! several planes change still produces one redraw request. The host polls
//! it with [`Cosmos::take_redraw`].
//!
//! ```text
//!   host timer ──► on_elapse(tick) ──► Plane::on_elapse ──► Stage::update
//!                                                 │
//!   host input ──► on_mouse_* / on_char ──► active Plane routing
//!                                                 │
//!                         take_redraw() ◄─────────┘
//!                              │
//!                              ▼
//!                        draw(canvas) ──► active Plane::draw
//! ```

mod stage;

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::canvas::{Canvas, Rgba, Screen};
use crate::id::PlaneId;
use crate::input::{ButtonState, Modifiers, MouseButton};
use crate::plane::Plane;
use crate::ring::Ring;
use crate::tick::Tick;
use crate::trace::{FrameTickEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, RedrawEvent, Tracer};
use crate::update::UpdateSequence;

pub use stage::{CosmosHooks, Stage};

/// Host-facing settings of a [`Cosmos`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosmosConfig {
    /// Frames per second the host is asked to tick at.
    pub fps: u32,
    /// Default foreground (text) color.
    pub foreground: Rgba,
    /// Window clear color.
    pub background: Rgba,
}

impl Default for CosmosConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            foreground: Rgba::opaque(0xFF_FFFF),
            background: Rgba::opaque(0x00_0000),
        }
    }
}

struct Planet {
    plane: Plane,
    stage: Box<dyn Stage>,
}

/// Owner of all planes and dispatcher of host events.
pub struct Cosmos {
    config: CosmosConfig,
    planets: Ring<Planet>,
    active: Option<u32>,
    screen: Box<dyn Screen>,
    hooks: Box<dyn CosmosHooks>,
    updates: UpdateSequence,
    tracer: Tracer,
    tick: Tick,
    display: Size,
}

impl core::fmt::Debug for Cosmos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cosmos")
            .field("config", &self.config)
            .field("planes", &self.planets.len())
            .field("active", &self.active)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Cosmos {
    /// Creates an empty cosmos.
    #[must_use]
    pub fn new(config: CosmosConfig, screen: impl Screen + 'static) -> Self {
        Self::with_hooks(config, screen, ())
    }

    /// Creates an empty cosmos with cosmos-wide per-frame logic.
    #[must_use]
    pub fn with_hooks(
        config: CosmosConfig,
        screen: impl Screen + 'static,
        hooks: impl CosmosHooks + 'static,
    ) -> Self {
        Self {
            config,
            planets: Ring::new(),
            active: None,
            screen: Box::new(screen),
            hooks: Box::new(hooks),
            updates: UpdateSequence::new(),
            tracer: Tracer::none(),
            tick: Tick::default(),
            display: Size::ZERO,
        }
    }

    /// Returns the host-facing settings.
    #[must_use]
    pub fn config(&self) -> &CosmosConfig {
        &self.config
    }

    /// Routes trace events of the cosmos and all of its planes to `tracer`.
    pub fn set_tracer(&mut self, tracer: Tracer) {
        for idx in self.planets.order() {
            if let Some(planet) = self.planets.get_mut(idx) {
                planet.plane.set_tracer(tracer.clone());
            }
        }
        self.tracer = tracer;
    }

    /// Returns the update sequence shared by every plane.
    #[must_use]
    pub fn updates(&self) -> &UpdateSequence {
        &self.updates
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw(&self) -> bool {
        self.updates.take_redraw()
    }

    /// Returns the most recent tick.
    #[must_use]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    // -- Planes --

    /// Takes ownership of `plane` and the `stage` that drives it.
    ///
    /// The plane joins the cosmos's update sequence and tracer. The first
    /// plane pushed becomes the active one.
    pub fn push_plane(&mut self, mut plane: Plane, stage: impl Stage + 'static) -> PlaneId {
        plane.attach(self.updates.clone(), self.tracer.clone());
        let idx = self.planets.alloc(Planet {
            plane,
            stage: Box::new(stage),
        });
        self.planets.link_tail(idx);
        if self.active.is_none() {
            self.active = Some(idx);
        }
        PlaneId {
            idx,
            generation: self.planets.generation(idx),
        }
    }

    /// Drops every plane.
    pub fn collapse(&mut self) {
        drop(self.planets.release_all());
        self.active = None;
    }

    /// Number of planes.
    #[must_use]
    pub fn plane_count(&self) -> usize {
        self.planets.len()
    }

    /// Iterates planes in the order they were pushed.
    pub fn planes(&self) -> impl Iterator<Item = PlaneId> + '_ {
        self.planets.members().map(|idx| PlaneId {
            idx,
            generation: self.planets.generation(idx),
        })
    }

    /// Returns the plane behind `id`.
    #[must_use]
    pub fn plane(&self, id: PlaneId) -> Option<&Plane> {
        let idx = self.planets.resolve(id.idx, id.generation)?;
        self.planets.get(idx).map(|planet| &planet.plane)
    }

    /// Returns the plane behind `id` mutably.
    pub fn plane_mut(&mut self, id: PlaneId) -> Option<&mut Plane> {
        let idx = self.planets.resolve(id.idx, id.generation)?;
        self.planets.get_mut(idx).map(|planet| &mut planet.plane)
    }

    /// Makes `id` the plane that is drawn and receives input.
    pub fn set_active_plane(&mut self, id: PlaneId) -> bool {
        let Some(idx) = self.planets.resolve(id.idx, id.generation) else {
            return false;
        };
        if self.active != Some(idx) {
            self.active = Some(idx);
            if let Some(planet) = self.planets.get(idx) {
                self.screen.set_window_title(planet.plane.name());
            }
            self.updates.notify_updated();
        }
        true
    }

    /// Returns the active plane's handle.
    #[must_use]
    pub fn active_plane_id(&self) -> Option<PlaneId> {
        self.active.map(|idx| PlaneId {
            idx,
            generation: self.planets.generation(idx),
        })
    }

    /// Returns the active plane.
    #[must_use]
    pub fn active_plane(&self) -> Option<&Plane> {
        self.planets.get(self.active?).map(|planet| &planet.plane)
    }

    /// Returns the active plane mutably.
    pub fn active_plane_mut(&mut self) -> Option<&mut Plane> {
        self.planets.get_mut(self.active?).map(|planet| &mut planet.plane)
    }

    // -- Lifecycle --

    /// Constructs and loads every plane for a display of `size`, then titles
    /// the window after the active plane.
    pub fn on_big_bang(&mut self, size: Size) {
        self.phase(PhaseKind::BigBang, |cosmos| {
            cosmos.display = size;
            for idx in cosmos.planets.order() {
                let _scope = cosmos.updates.begin();
                if let Some(Planet { plane, stage }) = cosmos.planets.get_mut(idx) {
                    plane.set_display_size(size);
                    stage.construct(plane, size);
                    stage.load(plane, size);
                }
            }
            if let Some(planet) = cosmos.active.and_then(|idx| cosmos.planets.get(idx)) {
                cosmos.screen.set_window_title(planet.plane.name());
            }
        });
    }

    /// Propagates a new display size to every plane.
    ///
    /// Ignored unless both dimensions are positive.
    pub fn reflow(&mut self, size: Size) {
        if !(size.width > 0.0 && size.height > 0.0) {
            return;
        }
        self.phase(PhaseKind::Reflow, |cosmos| {
            cosmos.display = size;
            let _scope = cosmos.updates.begin();
            for idx in cosmos.planets.order() {
                if let Some(Planet { plane, stage }) = cosmos.planets.get_mut(idx) {
                    plane.set_display_size(size);
                    stage.reflow(plane, size);
                }
            }
        });
    }

    /// Returns the display size from the last big bang or reflow.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.display
    }

    /// Advances every plane by one frame.
    ///
    /// The whole frame runs in one update sequence. The active plane is
    /// elapsed first, inside a nested sequence of its own, then the other
    /// planes in ring order starting after the active one. The cosmos hooks
    /// run last.
    pub fn on_elapse(&mut self, tick: Tick) {
        self.tick = tick;
        self.tracer.frame_tick(&FrameTickEvent::from(&tick));
        self.phase(PhaseKind::Elapse, |cosmos| {
            let _frame = cosmos.updates.begin();
            if let Some(Planet { plane, stage }) = cosmos.active.and_then(|idx| cosmos.planets.get_mut(idx)) {
                let _scope = plane.updates().begin();
                plane.on_elapse(&tick);
                stage.update(plane, &tick);
            }
            for idx in cosmos.inactive_order() {
                if let Some(Planet { plane, stage }) = cosmos.planets.get_mut(idx) {
                    plane.on_elapse(&tick);
                    stage.update(plane, &tick);
                }
            }
            cosmos.hooks.update(&tick);
        });
    }

    /// Draws the active plane into `area` of `canvas`.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, area: Rect) {
        self.phase(PhaseKind::Draw, |cosmos| {
            if let Some(plane) = cosmos.active_plane_mut() {
                plane.draw(canvas, area);
            }
        });
    }

    /// Returns `true` if the active plane's stage allows exiting.
    #[must_use]
    pub fn can_exit(&self) -> bool {
        self.active
            .and_then(|idx| self.planets.get(idx))
            .is_some_and(|planet| planet.stage.can_exit(&planet.plane))
    }

    /// Asks the active plane's stage to persist its state.
    pub fn on_save(&mut self) {
        if let Some(Planet { plane, stage }) = self.active.and_then(|idx| self.planets.get_mut(idx)) {
            stage.on_save(plane);
        }
    }

    // -- Input --

    /// Forwards a mouse button press or release to the active plane.
    pub fn on_mouse_button(&mut self, button: MouseButton, at: Point, clicks: u8, pressed: bool) -> bool {
        self.route(|plane| {
            if pressed {
                plane.on_pointer_pressed(button, at, clicks)
            } else {
                plane.on_pointer_released(button, at, clicks)
            }
        })
    }

    /// Forwards pointer motion to the active plane.
    pub fn on_mouse_move(&mut self, state: ButtonState, at: Point, delta: Vec2) -> bool {
        self.route(|plane| plane.on_pointer_move(state, at, delta))
    }

    /// Forwards a wheel event to the active plane.
    pub fn on_scroll(&mut self, delta: Vec2) -> bool {
        self.route(|plane| plane.on_scroll(delta))
    }

    /// Forwards a key to the active plane.
    pub fn on_char(&mut self, key: char, modifiers: Modifiers, repeats: u8, pressed: bool) -> bool {
        self.route(|plane| plane.on_char(key, modifiers, repeats, pressed))
    }

    /// Forwards committed text to the active plane.
    pub fn on_text(&mut self, text: &str, entire: bool) -> bool {
        self.route(|plane| plane.on_text(text, entire))
    }

    /// Forwards composition text to the active plane.
    pub fn on_editing_text(&mut self, text: &str, pos: usize, span: usize) -> bool {
        self.route(|plane| plane.on_editing_text(text, pos, span))
    }

    // -- Internals --

    /// Every plane except the active one, walking the ring from the plane
    /// after the active one.
    fn inactive_order(&self) -> Vec<u32> {
        let Some(active) = self.active else {
            return self.planets.order();
        };
        let mut order = Vec::new();
        let mut cursor = self.planets.next_of(active);
        while let Some(idx) = cursor
            && idx != active
        {
            order.push(idx);
            cursor = self.planets.next_of(idx);
        }
        order
    }

    fn route(&mut self, f: impl FnOnce(&mut Plane) -> bool) -> bool {
        self.phase(PhaseKind::Input, |cosmos| {
            let _scope = cosmos.updates.begin();
            cosmos.active_plane_mut().is_some_and(f)
        })
    }

    /// Runs `f` between phase trace markers, reporting any redraw it caused
    /// and flushing the planes' matter events.
    fn phase<R>(&mut self, phase: PhaseKind, f: impl FnOnce(&mut Self) -> R) -> R {
        let frame = self.tick.count;
        let uptime = self.tick.uptime;
        self.tracer.phase_begin(&PhaseBeginEvent { frame, phase, uptime });
        let before = self.updates.redraw_count();

        let result = f(self);

        let sequence = self.updates.redraw_count();
        if sequence > before {
            self.tracer.redraw(&RedrawEvent { frame, sequence });
        }
        for idx in self.planets.order() {
            if let Some(planet) = self.planets.get_mut(idx) {
                planet.plane.flush_trace(frame);
            }
        }
        self.tracer.phase_end(&PhaseEndEvent { frame, phase, uptime });
        result
    }
}
