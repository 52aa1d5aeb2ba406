use wasm_bindgen::prelude::*;

use crate::core::Position;

use super::perf_stats::PerfStats;
use super::WorldCore;

/// JS handle to a running world. Errors are thrown as `Error`.
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a world from level bundle JSON
    #[wasm_bindgen(constructor)]
    pub fn new(level_json: &str) -> Result<World, JsError> {
        Ok(Self {
            core: WorldCore::from_level_json(level_json)?,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter, js_name = pieceCount)]
    pub fn piece_count(&self) -> u32 { self.core.piece_count() as u32 }

    /// Start a new episode from the level layout
    pub fn reset(&mut self) -> Result<(), JsError> {
        self.core.reset()?;
        Ok(())
    }

    /// Step the simulation forward
    pub fn step(&mut self) -> Result<(), JsError> {
        self.core.step()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = aliveCount)]
    pub fn alive_count(&self, kind: &str) -> Result<u32, JsError> {
        self.core
            .alive_count(kind)
            .map(|n| n as u32)
            .ok_or_else(|| JsError::new(&format!("unknown regrowth kind {kind}")))
    }

    /// State name of the piece on `layer` at (x, y)
    #[wasm_bindgen(js_name = stateAt)]
    pub fn state_at(&self, x: u32, y: u32, layer: &str) -> Option<String> {
        let piece = self.core.piece_at(Position::new(x, y), layer)?;
        self.core.state_name(piece).map(str::to_string)
    }

    /// Cached neighbor count of the regrowing cell on `layer` at (x, y)
    #[wasm_bindgen(js_name = neighborCountAt)]
    pub fn neighbor_count_at(&self, x: u32, y: u32, layer: &str) -> Option<u32> {
        let piece = self.core.piece_at(Position::new(x, y), layer)?;
        self.core.neighbor_count(piece)
    }

    #[wasm_bindgen(js_name = setStateAt)]
    pub fn set_state_at(&mut self, x: u32, y: u32, layer: &str, state: &str) -> Result<(), JsError> {
        let piece = self
            .core
            .piece_at(Position::new(x, y), layer)
            .ok_or_else(|| JsError::new(&format!("no piece on {layer} at ({x}, {y})")))?;
        self.core.set_state_by_name(piece, state)?;
        Ok(())
    }

    /// Place a non-regrowing piece; returns its id
    #[wasm_bindgen(js_name = addPiece)]
    pub fn add_piece(&mut self, state: &str, x: u32, y: u32) -> Result<u32, JsError> {
        Ok(self.core.add_piece(state, Position::new(x, y))?)
    }

    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(&mut self, piece: u32, x: u32, y: u32) -> Result<(), JsError> {
        self.core.move_piece(piece, Position::new(x, y))?;
        Ok(())
    }

    /// Per-kind population as JSON
    #[wasm_bindgen(js_name = regrowStatsJson)]
    pub fn regrow_stats_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.regrow_stats())?)
    }

    /// Number of dormant cells whose cached count disagrees with a recount
    #[wasm_bindgen(js_name = auditMismatches)]
    pub fn audit_mismatches(&self) -> u32 {
        self.core.audit_neighbor_counts().len() as u32
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}
