//! Neighbor-count audit: recount every cell that is not alive from scratch
//! and report where the incremental bookkeeping disagrees.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::core::PieceId;
use crate::systems::{CellPhase, DensityRegrow};

use super::WorldCore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountMismatch {
    pub piece: PieceId,
    /// `None` when the cell has no entry at all.
    pub cached: Option<u32>,
    pub recounted: u32,
}

pub(super) fn audit_neighbor_counts(world: &WorldCore) -> Vec<CountMismatch> {
    let check = |cell: &DensityRegrow| -> Option<CountMismatch> {
        let piece = cell.piece();
        let state = world.pieces.state(piece)?;
        if cell.kind().phase(state) == CellPhase::Alive {
            return None;
        }
        let cached = world.neighborhoods.count(piece);
        let recounted = cell.recount_alive_neighbors(&world.grid, &world.pieces);
        (cached != Some(recounted)).then_some(CountMismatch { piece, cached, recounted })
    };

    #[cfg(feature = "parallel")]
    {
        world
            .cells
            .par_iter()
            .filter_map(Option::as_ref)
            .filter_map(check)
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        world.cells.iter().filter_map(Option::as_ref).filter_map(check).collect()
    }
}
