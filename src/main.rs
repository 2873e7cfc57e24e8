//! Cursor FX entry point
//!
//! The browser build is driven from JS through `CursorEffects`; natively this
//! runs a scripted headless session and logs what the engine produced.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cursor FX (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to see the effects");

    headless::run(headless::Script::default());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is CursorEffects::mount, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use cursor_fx::renderer::{DrawCall, RecordingSurface};
    use cursor_fx::sim::{PointerEvent, Simulation};
    use cursor_fx::{EffectConfig, Engine, IntensityTier, ManualScheduler, polar_to_cartesian};
    use glam::Vec2;

    /// Frame interval at 60 Hz (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Scripted pointer motion: circles around the center, clicking periodically
    pub struct Script {
        pub seconds: u32,
        pub size: (u32, u32),
        pub click_every: u32,
        pub config: EffectConfig,
    }

    impl Default for Script {
        fn default() -> Self {
            Self {
                seconds: 5,
                size: (800, 600),
                click_every: 45,
                config: EffectConfig {
                    intensity: IntensityTier::High,
                    ..EffectConfig::default()
                },
            }
        }
    }

    pub fn run(script: Script) {
        let seed = cursor_fx::platform::time_seed();
        let mut engine = Engine::new(Simulation::new(script.config, seed), ManualScheduler::default());
        let mut surface = RecordingSurface::new(script.size.0, script.size.1);
        let center = Vec2::new(script.size.0 as f32 / 2.0, script.size.1 as f32 / 2.0);

        log::info!("Seed: {}", seed);
        engine.mount();
        engine.resize(script.size.0, script.size.1);

        let frames = script.seconds * 60;
        for frame in 0..frames {
            let now = frame as f64 * FRAME_MS;
            let angle = frame as f32 * 0.05;
            let pos = center + polar_to_cartesian(150.0, angle);

            engine.on_pointer(PointerEvent::moved(pos.x, pos.y), now);
            if script.click_every > 0 && frame % script.click_every == 0 {
                engine.on_pointer(PointerEvent::click(pos.x, pos.y), now);
            }

            surface.reset();
            engine.on_frame(now, Some(&mut surface));

            if (frame + 1) % 60 == 0 {
                let sim = engine.simulation();
                let shapes = surface.count(|c| {
                    matches!(
                        c,
                        DrawCall::FillCircle { .. } | DrawCall::StrokeCircle { .. } | DrawCall::FillPolygon(_)
                    )
                });
                let lines = surface.count(|c| matches!(c, DrawCall::Line { .. }));
                log::info!(
                    "t={:.1}s particles={} trail={} shapes={} segments={} dropped={}",
                    (frame + 1) as f64 / 60.0,
                    sim.particles().len(),
                    sim.trail().len(),
                    shapes,
                    lines,
                    sim.dropped_spawns()
                );
            }
        }

        engine.unmount();
        println!(
            "Ran {} frames, {} particles still alive",
            frames,
            engine.simulation().particles().len()
        );
    }
}
