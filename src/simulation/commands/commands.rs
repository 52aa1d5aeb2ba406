use tracing::{error, warn};

use crate::core::{LayerId, PieceId, Position, StateId};
use crate::domain::{ConsistencyError, WorldError};
use crate::systems::{CellPhase, RegrowContext, Transition};

use super::WorldCore;

/// Change a piece's state, moving it between layers when needed, then let its
/// regrowth component react before returning.
pub(super) fn set_state(world: &mut WorldCore, piece: PieceId, state: StateId) -> Result<(), WorldError> {
    world.ensure_running()?;

    let previous = world.pieces.state(piece).ok_or(WorldError::UnknownPiece(piece))?;
    if previous == state {
        return Ok(());
    }
    let states = &world.level.states;
    let to_layer = states
        .layer_of(state)
        .ok_or_else(|| WorldError::UnknownState(state.to_string()))?;
    let from_layer = states
        .layer_of(previous)
        .ok_or_else(|| WorldError::UnknownState(previous.to_string()))?;
    let pos = world.pieces.position(piece).ok_or(WorldError::UnknownPiece(piece))?;

    if from_layer != to_layer {
        world
            .grid
            .place(to_layer, pos, piece)
            .map_err(|occupant| occupied(world, piece, to_layer, pos, occupant))?;
        world.grid.remove(from_layer, pos, piece);
    }
    world.pieces.set_state(piece, state);

    notify(world, piece, previous, state)
}

fn notify(world: &mut WorldCore, piece: PieceId, previous: StateId, current: StateId) -> Result<(), WorldError> {
    let outcome = {
        let Some(cell) = world.cells.get(piece as usize).and_then(Option::as_ref) else {
            return Ok(());
        };
        let mut ctx = RegrowContext {
            spatial: &world.grid,
            pieces: &world.pieces,
            counts: world.neighborhoods.map_mut(),
        };
        cell.on_state_change(previous, current, &mut ctx)
            .map(|t| (t, cell.decoration_target(t)))
    };
    let (transition, decoration) = outcome.map_err(|e| halt(world, e))?;

    if world.perf_enabled {
        match transition {
            Transition::BecameAlive { touched } => world.perf_stats.increments += touched as u32,
            Transition::CeasedAlive { touched } => world.perf_stats.decrements += touched as u32,
            Transition::Unchanged => {}
        }
    }

    let Some((deco, state)) = decoration else { return Ok(()) };
    match set_state(world, deco, state) {
        Err(err @ (WorldError::Consistency(_) | WorldError::Halted(_))) => Err(err),
        // The cell's own transition already happened; a decoration that
        // cannot follow stays as it is.
        Err(err) => {
            warn!(piece, decoration = deco, %err, "decoration out of sync");
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

fn occupied(world: &WorldCore, piece: PieceId, layer: LayerId, pos: Position, occupant: PieceId) -> WorldError {
    WorldError::LayerOccupied {
        piece,
        layer: world.level.states.layer_name(layer).unwrap_or_default().to_string(),
        x: pos.x,
        y: pos.y,
        occupant,
    }
}

/// Record a consistency violation; the world refuses to advance until reset.
pub(super) fn halt(world: &mut WorldCore, violation: ConsistencyError) -> WorldError {
    error!(%violation, frame = world.frame, "neighbor counts are inconsistent, halting");
    world.fault = Some(violation.clone());
    WorldError::Consistency(violation)
}

pub(super) fn add_piece(world: &mut WorldCore, state_name: &str, pos: Position) -> Result<PieceId, WorldError> {
    world.ensure_running()?;

    let states = &world.level.states;
    let state = states
        .id_by_name(state_name)
        .ok_or_else(|| WorldError::UnknownState(state_name.to_string()))?;
    if world.level.kinds.iter().any(|k| k.phase(state) != CellPhase::Other) {
        return Err(WorldError::RegrowPieceCommand(state_name.to_string()));
    }
    if !world.grid.in_bounds(pos) {
        return Err(WorldError::OutOfBounds { x: pos.x, y: pos.y });
    }
    let layer = states
        .layer_of(state)
        .ok_or_else(|| WorldError::UnknownState(state_name.to_string()))?;

    let piece = world.pieces.len() as PieceId;
    world
        .grid
        .place(layer, pos, piece)
        .map_err(|occupant| occupied(world, piece, layer, pos, occupant))?;
    world.pieces.push(pos, state, None);
    world.cells.push(None);
    Ok(piece)
}

pub(super) fn move_piece(world: &mut WorldCore, piece: PieceId, pos: Position) -> Result<(), WorldError> {
    world.ensure_running()?;

    let state = world.pieces.state(piece).ok_or(WorldError::UnknownPiece(piece))?;
    if world.cell(piece).is_some() {
        let name = world.level.states.name(state).unwrap_or_default();
        return Err(WorldError::RegrowPieceCommand(name.to_string()));
    }
    if !world.grid.in_bounds(pos) {
        return Err(WorldError::OutOfBounds { x: pos.x, y: pos.y });
    }
    let from = world.pieces.position(piece).ok_or(WorldError::UnknownPiece(piece))?;
    if from == pos {
        return Ok(());
    }
    let layer = world
        .level
        .states
        .layer_of(state)
        .ok_or_else(|| WorldError::UnknownState(state.to_string()))?;

    world
        .grid
        .place(layer, pos, piece)
        .map_err(|occupant| occupied(world, piece, layer, pos, occupant))?;
    world.grid.remove(layer, from, piece);
    world.pieces.set_position(piece, pos);
    Ok(())
}
