use wasm_bindgen::prelude::*;

/// Counters for the last step. Zeros while perf metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) refresh_ms: f64,
    pub(super) regrow_ms: f64,
    pub(super) cells_refreshed: u32,
    pub(super) regrowth_trials: u32,
    pub(super) regrowth_successes: u32,
    pub(super) regrowth_blocked: u32,
    /// Neighbor entries incremented by cells becoming alive.
    pub(super) increments: u32,
    /// Neighbor entries decremented by cells ceasing to be alive.
    pub(super) decrements: u32,
    pub(super) piece_count: u32,
    pub(super) grid_size: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn refresh_ms(&self) -> f64 { self.refresh_ms }
    #[wasm_bindgen(getter)]
    pub fn regrow_ms(&self) -> f64 { self.regrow_ms }
    #[wasm_bindgen(getter)]
    pub fn cells_refreshed(&self) -> u32 { self.cells_refreshed }
    #[wasm_bindgen(getter)]
    pub fn regrowth_trials(&self) -> u32 { self.regrowth_trials }
    #[wasm_bindgen(getter)]
    pub fn regrowth_successes(&self) -> u32 { self.regrowth_successes }
    #[wasm_bindgen(getter)]
    pub fn regrowth_blocked(&self) -> u32 { self.regrowth_blocked }
    #[wasm_bindgen(getter)]
    pub fn increments(&self) -> u32 { self.increments }
    #[wasm_bindgen(getter)]
    pub fn decrements(&self) -> u32 { self.decrements }
    #[wasm_bindgen(getter)]
    pub fn piece_count(&self) -> u32 { self.piece_count }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
}
