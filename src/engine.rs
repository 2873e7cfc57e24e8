//! Frame clock
//!
//! The [`Engine`] is either Running or Stopped. While Running it keeps exactly
//! one frame request outstanding; each frame prunes the trail, advances the
//! particles, draws (when a surface is available) and requests the next frame.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::renderer::{Surface, draw_simulation};
use crate::settings::EffectConfig;
use crate::sim::{PointerEvent, Simulation, tick};

/// Host frame-request id (`requestAnimationFrame` handle on the web)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host frame-request primitive
pub trait FrameScheduler {
    /// Ask for one callback on the next display frame
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for headless runs and tests: records requests, never fires
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next: i32,
    pub pending: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Ticking, listeners attached
    Running,
    /// No listeners, no pending frame
    Stopped,
}

pub struct Engine<S, R = Pcg32> {
    sim: Simulation<R>,
    scheduler: S,
    state: EngineState,
    pending: Option<FrameHandle>,
    /// Size to apply before the next draw
    pending_resize: Option<(u32, u32)>,
    /// Whether the last frame had a surface (None before the first frame)
    surface_seen: Option<bool>,
}

impl<S: FrameScheduler, R: Rng> Engine<S, R> {
    pub fn new(sim: Simulation<R>, scheduler: S) -> Self {
        Self {
            sim,
            scheduler,
            state: EngineState::Stopped,
            pending: None,
            pending_resize: None,
            surface_seen: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Stopped -> Running; requests the first frame
    pub fn mount(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = EngineState::Running;
        self.schedule();
        log::info!("Cursor effects mounted");
    }

    /// Running -> Stopped; cancels the outstanding frame request
    pub fn unmount(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = EngineState::Stopped;
        self.surface_seen = None;
        log::info!("Cursor effects unmounted");
    }

    pub fn set_config(&mut self, config: EffectConfig) {
        self.sim.set_config(config);
    }

    /// Record new surface dimensions; applied before the next draw
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pending_resize = Some((width, height));
    }

    /// Forward a pointer event; dropped while Stopped
    pub fn on_pointer(&mut self, event: PointerEvent, now_ms: f64) -> usize {
        if !self.is_running() {
            return 0;
        }
        self.sim.handle_pointer(event, now_ms)
    }

    /// One display frame. A missing surface skips drawing but still simulates.
    pub fn on_frame(&mut self, now_ms: f64, surface: Option<&mut dyn Surface>) {
        if !self.is_running() {
            return;
        }
        self.pending = None;

        tick(&mut self.sim, now_ms);

        let available = surface.is_some();
        if self.surface_seen != Some(available) {
            if available {
                log::info!("Drawing surface available");
            } else {
                log::warn!("Drawing surface unavailable, skipping draws");
            }
            self.surface_seen = Some(available);
        }

        if let Some(surface) = surface {
            if let Some((width, height)) = self.pending_resize.take() {
                surface.resize(width, height);
            }
            draw_simulation(surface, &self.sim, now_ms);
        }

        self.schedule();
    }

    fn schedule(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request failed; clock halted until remount");
        }
    }
}
