//! Bucket refresh: every dormant cell moves to the sub-state matching its
//! current neighbor count. Runs before regrowth so sampling sees fresh buckets.

use crate::core::{KindId, PieceId};
use crate::domain::WorldError;

use super::{commands, WorldCore};

/// Candidates of one kind, or of every kind, in ascending piece order.
pub(super) fn candidates(world: &WorldCore, group: Option<KindId>) -> Vec<PieceId> {
    match group {
        Some(kind) => world.members(kind).to_vec(),
        None => {
            let mut all: Vec<PieceId> = world.members.iter().flatten().copied().collect();
            all.sort_unstable();
            all
        }
    }
}

pub(super) fn refresh_buckets(world: &mut WorldCore, group: Option<KindId>) -> Result<(), WorldError> {
    for piece in candidates(world, group) {
        let Some(cell) = world.cells.get(piece as usize).and_then(Option::as_ref) else {
            continue;
        };
        let target = cell
            .per_step_update(&world.pieces, world.neighborhoods.map())
            .map_err(|e| commands::halt(world, e))?;

        let Some(target) = target else { continue };
        if world.pieces.state(piece) != Some(target) {
            commands::set_state(world, piece, target)?;
        }
        if world.perf_enabled {
            world.perf_stats.cells_refreshed += 1;
        }
    }
    Ok(())
}
