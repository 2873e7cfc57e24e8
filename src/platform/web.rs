//! Browser host: mounts the engine on a canvas

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, MouseEvent, Window};

use crate::engine::{Engine, FrameHandle, FrameScheduler};
use crate::renderer::{CanvasSurface, Surface};
use crate::settings::EffectConfig;
use crate::sim::{PointerEvent, PointerKind, Simulation};

/// Pointer listeners attached on mount
const POINTER_EVENTS: [(&str, PointerKind); 4] = [
    ("pointermove", PointerKind::Move),
    ("pointerdown", PointerKind::Down),
    ("pointerup", PointerKind::Up),
    ("click", PointerKind::Click),
];

/// Monotonic time in ms (same clock as requestAnimationFrame timestamps)
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// requestAnimationFrame-backed scheduler
struct RafScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

struct Host {
    engine: Engine<RafScheduler>,
    surface: Option<CanvasSurface>,
    canvas_id: String,
}

impl Host {
    fn frame(&mut self, time: f64) {
        let surface = self.surface.as_mut().map(|s| s as &mut dyn Surface);
        self.engine.on_frame(time, surface);
    }

    fn pointer(&mut self, kind: PointerKind, event: &MouseEvent) {
        let (x, y) = (event.client_x(), event.client_y());
        let position = match &self.surface {
            Some(surface) => surface.to_local(x, y),
            None => Vec2::new(x as f32, y as f32),
        };
        let event = PointerEvent {
            kind,
            position: Some(position),
        };
        self.engine.on_pointer(event, now_ms());
    }

    /// Retry canvas acquisition (after a failed mount or a DOM swap)
    fn reacquire_surface(&mut self) {
        if self.surface.is_some() {
            return;
        }
        let document = web_sys::window().and_then(|w| w.document());
        self.surface = document.and_then(|d| CanvasSurface::acquire(&d, &self.canvas_id));
        if self.surface.is_some() {
            log::info!("Acquired canvas '{}'", self.canvas_id);
        }
    }
}

type Slot = Rc<RefCell<Option<Host>>>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, kind: PointerKind, slot: &Slot) -> Option<Self> {
        let weak = Rc::downgrade(slot);
        let closure = Closure::<dyn FnMut(_)>::new(move |e: MouseEvent| {
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let Ok(mut guard) = slot.try_borrow_mut() else {
                return;
            };
            if let Some(host) = guard.as_mut() {
                host.pointer(kind, &e);
            }
        });
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::warn!("Failed to attach '{}' listener: {:?}", event, e);
                None
            }
        }
    }

    fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Cursor effects mounted on a page canvas
#[wasm_bindgen]
pub struct CursorEffects {
    slot: Slot,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl CursorEffects {
    /// Mount on the canvas with id `canvas_id`.
    ///
    /// `config_json` uses the camelCase keys of [`EffectConfig`]; an empty or
    /// invalid string falls back to defaults.
    pub fn mount(canvas_id: &str, config_json: &str) -> CursorEffects {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let slot: Slot = Rc::new(RefCell::new(None));
        let mut effects = CursorEffects {
            slot: slot.clone(),
            listeners: Vec::new(),
        };

        let Some(window) = web_sys::window() else {
            log::error!("No window; cursor effects disabled");
            return effects;
        };

        let weak = Rc::downgrade(&slot);
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let Ok(mut guard) = slot.try_borrow_mut() else {
                return;
            };
            if let Some(host) = guard.as_mut() {
                host.frame(time);
            }
        });

        let surface = window
            .document()
            .and_then(|d| CanvasSurface::acquire(&d, canvas_id));
        if surface.is_none() {
            log::warn!("Canvas '{}' unavailable; simulating without drawing", canvas_id);
        }

        let config = parse_config(config_json).unwrap_or_default();
        let seed = super::time_seed();
        let engine = Engine::new(
            Simulation::new(config, seed),
            RafScheduler {
                window: window.clone(),
                callback,
            },
        );
        *slot.borrow_mut() = Some(Host {
            engine,
            surface,
            canvas_id: canvas_id.to_string(),
        });

        let target: &EventTarget = window.as_ref();
        effects.listeners = POINTER_EVENTS
            .into_iter()
            .filter_map(|(event, kind)| Listener::attach(target, event, kind, &slot))
            .collect();

        if let Some(host) = slot.borrow_mut().as_mut() {
            host.engine.mount();
        }
        log::info!("Cursor effects mounted on '{}' (seed {})", canvas_id, seed);
        effects
    }

    /// Detach listeners and cancel the pending frame
    pub fn unmount(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        if let Ok(mut guard) = self.slot.try_borrow_mut() {
            if let Some(host) = guard.as_mut() {
                host.engine.unmount();
            }
        }
    }

    /// Replace the effect configuration (JSON); invalid JSON keeps the current one
    pub fn set_config(&self, config_json: &str) {
        let Some(config) = parse_config(config_json) else {
            return;
        };
        if let Ok(mut guard) = self.slot.try_borrow_mut() {
            if let Some(host) = guard.as_mut() {
                host.engine.set_config(config);
            }
        }
    }

    /// New surface size in pixels, applied before the next draw
    pub fn resize(&self, width: u32, height: u32) {
        if let Ok(mut guard) = self.slot.try_borrow_mut() {
            if let Some(host) = guard.as_mut() {
                host.reacquire_surface();
                host.engine.resize(width, height);
            }
        }
    }

    /// Live particle count (debug overlay)
    pub fn particle_count(&self) -> usize {
        self.slot
            .try_borrow()
            .ok()
            .and_then(|guard| guard.as_ref().map(|h| h.engine.simulation().particles().len()))
            .unwrap_or(0)
    }
}

impl Drop for CursorEffects {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn parse_config(json: &str) -> Option<EffectConfig> {
    if json.trim().is_empty() {
        return Some(EffectConfig::default());
    }
    match EffectConfig::from_json(json) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Invalid effect config: {}", e);
            None
        }
    }
}
