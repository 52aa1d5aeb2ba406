//! World - density-dependent regrowth over a layered grid
//!
//! WorldCore owns the pieces, the layer grid, the shared neighbor counts and
//! one DensityRegrow per regrowing cell. It only orchestrates:
//! - init/        - build from a compiled level, episode reset
//! - commands/    - state changes and the notifications they trigger
//! - step/        - scheduled bucket refresh and regrowth passes
//! - diagnostics/ - neighbor-count audit, per-kind stats
//!
//! A consistency violation halts the world: every later mutation returns
//! `WorldError::Halted` until `reset()`.

use std::sync::Arc;

use rand::rngs::SmallRng;

use crate::core::{KindId, PieceId, Position, StateId};
use crate::domain::{CompiledLevel, ConsistencyError, LevelBundle, PieceStore, StateRegistry, WorldError};
use crate::spatial::LayerGrid;
use crate::systems::{DensityRegrow, Neighborhoods, RegrowKind, UpdaterRegistry};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/step.rs"]
mod step;
#[path = "step/refresh.rs"]
mod refresh;
#[path = "step/regrow.rs"]
mod regrow;
#[path = "diagnostics/audit.rs"]
mod audit;
#[path = "diagnostics/stats.rs"]
mod stats;
mod facade;

pub use audit::CountMismatch;
pub use facade::World;
pub use perf_stats::PerfStats;
pub use stats::KindStats;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    level: Arc<CompiledLevel>,
    grid: LayerGrid,
    pieces: PieceStore,
    /// Indexed by piece id; `None` for pieces that do not regrow.
    cells: Vec<Option<DensityRegrow>>,
    /// Regrowing pieces per kind, ascending.
    members: Vec<Vec<PieceId>>,
    neighborhoods: Neighborhoods,
    updaters: UpdaterRegistry,
    rng: SmallRng,
    frame: u64,
    fault: Option<ConsistencyError>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Build a world and run the first episode reset.
    pub fn from_level(level: CompiledLevel) -> Result<Self, WorldError> {
        init::create_world_core(level)
    }

    pub fn from_level_json(json: &str) -> Result<Self, WorldError> {
        let level = LevelBundle::from_json(json)?.compile()?;
        Self::from_level(level)
    }

    /// Rebuild the layout, clear the neighbor counts and reseed.
    pub fn reset(&mut self) -> Result<(), WorldError> {
        init::reset(self)
    }

    /// Run every registered updater once, highest priority first.
    pub fn step(&mut self) -> Result<(), WorldError> {
        step::step(self)
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn piece_count(&self) -> usize { self.pieces.len() }

    pub fn states(&self) -> &StateRegistry {
        &self.level.states
    }

    pub fn kinds(&self) -> &[Arc<RegrowKind>] {
        &self.level.kinds
    }

    pub fn kind_by_name(&self, name: &str) -> Option<&RegrowKind> {
        self.level.kinds.iter().find(|k| k.name() == name).map(|k| k.as_ref())
    }

    pub fn neighborhoods(&self) -> &Neighborhoods {
        &self.neighborhoods
    }

    pub fn updaters(&self) -> &UpdaterRegistry {
        &self.updaters
    }

    /// The regrowth component of `piece`, if it has one.
    pub fn cell(&self, piece: PieceId) -> Option<&DensityRegrow> {
        self.cells.get(piece as usize).and_then(Option::as_ref)
    }

    /// Regrowing pieces of one kind, ascending.
    pub fn members(&self, kind: KindId) -> &[PieceId] {
        self.members.get(kind as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The violation that halted the world, if any.
    pub fn fault(&self) -> Option<&ConsistencyError> {
        self.fault.as_ref()
    }

    pub fn state_of(&self, piece: PieceId) -> Option<StateId> {
        self.pieces.state(piece)
    }

    pub fn state_name(&self, piece: PieceId) -> Option<&str> {
        self.pieces.state(piece).and_then(|s| self.level.states.name(s))
    }

    pub fn position_of(&self, piece: PieceId) -> Option<Position> {
        self.pieces.position(piece)
    }

    /// Piece holding `layer` at `pos`.
    pub fn piece_at(&self, pos: Position, layer: &str) -> Option<PieceId> {
        let layer = self.level.states.layer_id(layer)?;
        self.grid.get(layer, pos)
    }

    /// Cached alive same-type neighbor count of a regrowing cell.
    pub fn neighbor_count(&self, piece: PieceId) -> Option<u32> {
        self.neighborhoods.count(piece)
    }

    pub fn set_state(&mut self, piece: PieceId, state: StateId) -> Result<(), WorldError> {
        commands::set_state(self, piece, state)
    }

    pub fn set_state_by_name(&mut self, piece: PieceId, state: &str) -> Result<(), WorldError> {
        let state = self
            .level
            .states
            .id_by_name(state)
            .ok_or_else(|| WorldError::UnknownState(state.to_string()))?;
        commands::set_state(self, piece, state)
    }

    /// Place a non-regrowing piece (avatar, occupant, decoration).
    pub fn add_piece(&mut self, state: &str, pos: Position) -> Result<PieceId, WorldError> {
        commands::add_piece(self, state, pos)
    }

    pub fn move_piece(&mut self, piece: PieceId, pos: Position) -> Result<(), WorldError> {
        commands::move_piece(self, piece, pos)
    }

    /// Dormant cells whose cached count differs from a fresh recount.
    pub fn audit_neighbor_counts(&self) -> Vec<CountMismatch> {
        audit::audit_neighbor_counts(self)
    }

    pub fn regrow_stats(&self) -> Vec<KindStats> {
        stats::regrow_stats(self)
    }

    pub fn alive_count(&self, kind: &str) -> Option<usize> {
        stats::alive_count(self, kind)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    fn ensure_running(&self) -> Result<(), WorldError> {
        match &self.fault {
            Some(fault) => Err(WorldError::Halted(fault.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
