//! Platform abstraction layer
//!
//! Browser host wiring for the engine:
//! - Canvas surface acquisition
//! - Pointer listeners (attach on mount, detach on unmount)
//! - requestAnimationFrame scheduling

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::CursorEffects;

/// Seed derived from wall-clock time
#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
