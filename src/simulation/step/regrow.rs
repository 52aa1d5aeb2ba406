//! Stochastic regrowth: each dormant cell turns alive with the probability of
//! its bucket, unless something blocks the spot.

use tracing::debug;

use crate::core::{KindId, PieceId};
use crate::domain::WorldError;
use crate::systems::{bernoulli, UpdateProbability};

use super::refresh::candidates;
use super::{commands, WorldCore};

pub(super) fn regrow(
    world: &mut WorldCore,
    group: Option<KindId>,
    probability: UpdateProbability,
) -> Result<(), WorldError> {
    for piece in candidates(world, group) {
        // Earlier candidates may have changed this one's state during the pass.
        let Some(state) = world.pieces.state(piece) else { continue };
        let Some(cell) = world.cells.get(piece as usize).and_then(Option::as_ref) else {
            continue;
        };
        let Some(bucket_p) = cell.regrowth_probability(state) else { continue };
        let p = match probability {
            UpdateProbability::Always => 1.0,
            UpdateProbability::PerBucket => bucket_p,
        };

        if world.perf_enabled {
            world.perf_stats.regrowth_trials += 1;
        }
        if !bernoulli(&mut world.rng, p) {
            continue;
        }

        if blocked(world, piece) {
            if world.perf_enabled {
                world.perf_stats.regrowth_blocked += 1;
            }
            continue;
        }

        let live = cell.kind().live_state();
        commands::set_state(world, piece, live)?;
        debug!(piece, frame = world.frame, "regrew");
        if world.perf_enabled {
            world.perf_stats.regrowth_successes += 1;
        }
    }
    Ok(())
}

/// An occupant on the occupancy layers (when the kind forbids it), or any
/// other piece holding the live layer.
fn blocked(world: &WorldCore, piece: PieceId) -> bool {
    let Some(cell) = world.cell(piece) else { return true };
    let kind = cell.kind();
    if !kind.can_regrow_if_occupied() && cell.is_occupied(&world.grid, &world.pieces) {
        return true;
    }
    let (Some(pos), Some(layer)) = (
        world.pieces.position(piece),
        world.level.states.layer_of(kind.live_state()),
    ) else {
        return true;
    };
    world.grid.get(layer, pos).is_some_and(|p| p != piece)
}
