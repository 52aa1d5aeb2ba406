//! Meadow Engine - density-dependent resource regrowth for grid worlds
//!
//! Dormant cells (eaten grass, felled trees, ...) regrow with a probability
//! picked by how many alive cells of the same kind surround them. Counts are
//! kept incrementally in one shared registry instead of being rescanned.
//!
//! Architecture:
//! - core/       - ids and positions
//! - spatial/    - layered grid and neighborhood queries
//! - domain/     - level bundle, configuration, state registry, errors
//! - systems/    - neighbor-count registry, regrowth cells, scheduler
//! - simulation/ - world orchestration and the wasm facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Thread pool initialization for the parallel audit in the browser
#[cfg(feature = "wasm-threads")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&format!("meadow engine {} initialized", version()).into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{ConfigError, ConsistencyError, DensityRegrowConfig, LevelBundle, WorldError};
pub use simulation::{CountMismatch, KindStats, PerfStats, World, WorldCore};
pub use systems::{DensityRegrow, Neighborhoods};
