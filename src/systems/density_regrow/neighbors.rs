use crate::core::PieceId;
use crate::domain::PieceStore;
use crate::spatial::SpatialQuery;

use super::kind::{CellPhase, RegrowKind};

/// Same-type cells around a piece, split into alive and everything else.
/// A cell in a transitional state counts as not alive, the same as a dormant
/// one. The piece itself is never part of either list.
#[derive(Debug, Default)]
pub(super) struct SameTypeNeighbors {
    pub not_alive: Vec<PieceId>,
    pub alive: Vec<PieceId>,
}

pub(super) fn same_type_neighbors(
    piece: PieceId,
    kind: &RegrowKind,
    spatial: &dyn SpatialQuery,
    pieces: &PieceStore,
) -> SameTypeNeighbors {
    let mut out = SameTypeNeighbors::default();
    let (Some(radius), Some(center)) = (kind.radius(), pieces.position(piece)) else {
        return out;
    };

    for neighbor in spatial.query_disc(center, kind.query_layers(), radius) {
        if neighbor == piece || pieces.kind(neighbor) != Some(kind.id()) {
            continue;
        }
        let Some(state) = pieces.state(neighbor) else { continue };
        if kind.phase(state) == CellPhase::Alive {
            out.alive.push(neighbor);
        } else {
            out.not_alive.push(neighbor);
        }
    }
    out
}
