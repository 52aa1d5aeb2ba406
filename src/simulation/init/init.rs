use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::domain::{CompiledLevel, ConfigError, PieceStore, WorldError};
use crate::spatial::LayerGrid;
use crate::systems::{DensityRegrow, Neighborhoods, RegrowContext, Updater, UpdaterRegistry};

use super::commands;
use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn create_world_core(level: CompiledLevel) -> Result<WorldCore, WorldError> {
    let level = Arc::new(level);
    let mut world = WorldCore {
        grid: LayerGrid::new(level.width, level.height, level.states.layer_count()),
        pieces: PieceStore::with_capacity(level.spawns.len()),
        cells: Vec::with_capacity(level.spawns.len()),
        members: Vec::with_capacity(level.kinds.len()),
        neighborhoods: Neighborhoods::new(&level.neighborhoods),
        updaters: UpdaterRegistry::new(),
        rng: SmallRng::seed_from_u64(level.seed),
        frame: 0,
        fault: None,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        level,
    };
    reset(&mut world)?;
    Ok(world)
}

/// Episode reset: layout, neighbor counts, scheduler and rng start over.
pub(super) fn reset(world: &mut WorldCore) -> Result<(), WorldError> {
    let level = Arc::clone(&world.level);

    world.grid.clear();
    world.pieces.clear();
    world.cells.clear();
    world.members = vec![Vec::new(); level.kinds.len()];
    world.updaters.clear();
    world.rng = SmallRng::seed_from_u64(level.seed);
    world.frame = 0;
    world.fault = None;
    world.perf_stats.reset();
    world.neighborhoods.reset();

    for spawn in &level.spawns {
        let layer = level
            .states
            .layer_of(spawn.state)
            .ok_or_else(|| WorldError::UnknownState(spawn.state.to_string()))?;
        let piece = world.pieces.push(spawn.position, spawn.state, spawn.kind);
        world.grid.place(layer, spawn.position, piece).map_err(|_| ConfigError::LayoutConflict {
            layer: level.states.layer_name(layer).unwrap_or_default().to_string(),
            x: spawn.position.x,
            y: spawn.position.y,
        })?;

        let kind = spawn.kind.and_then(|k| level.kinds.get(k as usize));
        if let Some(kind) = kind {
            world.members[kind.id() as usize].push(piece);
        }
        world.cells.push(kind.map(|kind| DensityRegrow::new(piece, Arc::clone(kind))));
    }

    // Every cell is registered before any of them can transition.
    for cell in world.cells.iter().flatten() {
        cell.start(&mut world.neighborhoods);
    }

    for index in 0..world.cells.len() {
        let outcome = match world.cells[index].as_mut() {
            Some(cell) => {
                let mut ctx = RegrowContext {
                    spatial: &world.grid,
                    pieces: &world.pieces,
                    counts: world.neighborhoods.map_mut(),
                };
                cell.after_start(&mut ctx).map(|t| cell.decoration_target(t))
            }
            None => continue,
        };
        let decoration = outcome.map_err(|e| commands::halt(world, e))?;
        if let Some((piece, state)) = decoration {
            commands::set_state(world, piece, state)?;
        }
    }

    for kind in &level.kinds {
        world.updaters.register(Updater::refresh(kind.id()));
        world.updaters.register(Updater::regrow(kind.id()));
    }

    info!(
        width = world.grid.width(),
        height = world.grid.height(),
        pieces = world.pieces.len(),
        kinds = level.kinds.len(),
        seed = level.seed,
        "episode reset"
    );
    Ok(())
}
