//! DensityRegrow - density-dependent regrowth of one cell
//!
//! A cell is alive, dormant in bucket `b` (state `<base>_<b>`), or in some
//! other (transitional) state the level defines. While dormant, its bucket is
//! its number of alive same-type neighbors, clamped to the probability table.
//!
//! Neighbor bookkeeping is asymmetric, and every cell that is not alive is
//! kept up to date, transitional ones included:
//! - becoming alive: +1 on every non-alive same-type neighbor
//! - ceasing to be alive: -1 on every non-alive same-type neighbor, and the
//!   cell's own entry is recounted from the alive neighbors of that same query
//!
//! A cell's own count goes stale while it is alive; nothing reads it then.

pub(crate) mod bucket;
mod kind;
mod neighbors;

pub use kind::{CellPhase, DecorationStates, RegrowKind};

use std::sync::Arc;

use crate::core::{KindId, PieceId, StateId};
use crate::domain::{ConsistencyError, PieceStore};
use crate::spatial::SpatialQuery;

use super::neighborhoods::{NeighborCountMap, Neighborhoods};
use neighbors::same_type_neighbors;

/// Borrowed view of the world handed to the regrowth handlers.
pub struct RegrowContext<'a> {
    pub spatial: &'a dyn SpatialQuery,
    pub pieces: &'a PieceStore,
    pub counts: &'a mut NeighborCountMap,
}

/// What a state change did to the neighbor counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    BecameAlive { touched: usize },
    CeasedAlive { touched: usize },
    Unchanged,
}

#[derive(Clone, Debug)]
pub struct DensityRegrow {
    piece: PieceId,
    kind: Arc<RegrowKind>,
    decoration: Option<PieceId>,
}

impl DensityRegrow {
    pub fn new(piece: PieceId, kind: Arc<RegrowKind>) -> Self {
        Self { piece, kind, decoration: None }
    }

    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    pub fn kind(&self) -> &RegrowKind {
        &self.kind
    }

    #[inline]
    pub fn kind_id(&self) -> KindId {
        self.kind.id()
    }

    pub fn alive_state_name(&self) -> &str {
        self.kind.live_state_name()
    }

    pub fn dormant_base_state_name(&self) -> &str {
        self.kind.dormant_base_name()
    }

    /// Cosmetic piece found under the cell during `after_start`.
    pub fn decoration(&self) -> Option<PieceId> {
        self.decoration
    }

    pub fn start(&self, neighborhoods: &mut Neighborhoods) {
        neighborhoods.map_mut().insert(self.piece, 0);
    }

    /// Runs once every cell has started. An initially alive cell announces
    /// itself to its non-alive neighbors here.
    pub fn after_start(&mut self, ctx: &mut RegrowContext) -> Result<Transition, ConsistencyError> {
        self.decoration = match (self.kind.decoration(), ctx.pieces.position(self.piece)) {
            (Some(deco), Some(pos)) => ctx
                .spatial
                .query_point(pos, &[deco.layer])
                .into_iter()
                .find(|&p| p != self.piece),
            _ => None,
        };

        match ctx.pieces.state(self.piece).map(|s| self.kind.phase(s)) {
            Some(CellPhase::Alive) => self.became_alive(ctx),
            _ => Ok(Transition::Unchanged),
        }
    }

    /// Called synchronously after the host changed this cell's state.
    pub fn on_state_change(
        &self,
        previous: StateId,
        current: StateId,
        ctx: &mut RegrowContext,
    ) -> Result<Transition, ConsistencyError> {
        let was_alive = self.kind.phase(previous) == CellPhase::Alive;
        let is_alive = self.kind.phase(current) == CellPhase::Alive;
        match (was_alive, is_alive) {
            (false, true) => self.became_alive(ctx),
            (true, false) => self.ceased_alive(ctx),
            _ => Ok(Transition::Unchanged),
        }
    }

    /// Dormant sub-state matching the current count, or `None` when the cell
    /// is not dormant.
    pub fn per_step_update(
        &self,
        pieces: &PieceStore,
        counts: &NeighborCountMap,
    ) -> Result<Option<StateId>, ConsistencyError> {
        let Some(state) = pieces.state(self.piece) else { return Ok(None) };
        if !matches!(self.kind.phase(state), CellPhase::Dormant(_)) {
            return Ok(None);
        }
        let count = counts
            .get(&self.piece)
            .copied()
            .ok_or(ConsistencyError::MissingEntry { piece: self.piece })?;
        Ok(Some(self.kind.dormant_state(self.kind.bucket_for(count))))
    }

    /// Regrowth chance while in `state`; `None` unless `state` is dormant.
    pub fn regrowth_probability(&self, state: StateId) -> Option<f64> {
        match self.kind.phase(state) {
            CellPhase::Dormant(bucket) => Some(self.kind.probability_for(bucket)),
            _ => None,
        }
    }

    /// Another piece sits on one of the occupancy layers at this cell.
    pub fn is_occupied(&self, spatial: &dyn SpatialQuery, pieces: &PieceStore) -> bool {
        let Some(pos) = pieces.position(self.piece) else { return false };
        spatial
            .query_point(pos, self.kind.occupancy_layers())
            .into_iter()
            .any(|p| p != self.piece)
    }

    /// Decoration state to apply after `transition`, if the kind has one.
    pub fn decoration_target(&self, transition: Transition) -> Option<(PieceId, StateId)> {
        let deco = self.kind.decoration()?;
        let piece = self.decoration?;
        match transition {
            Transition::BecameAlive { .. } => Some((piece, deco.alive)),
            Transition::CeasedAlive { .. } => Some((piece, deco.dormant)),
            Transition::Unchanged => None,
        }
    }

    /// Alive same-type neighbors counted from scratch.
    pub fn recount_alive_neighbors(&self, spatial: &dyn SpatialQuery, pieces: &PieceStore) -> u32 {
        same_type_neighbors(self.piece, &self.kind, spatial, pieces).alive.len() as u32
    }

    fn became_alive(&self, ctx: &mut RegrowContext) -> Result<Transition, ConsistencyError> {
        let neighbors = same_type_neighbors(self.piece, &self.kind, ctx.spatial, ctx.pieces);

        // Check first so a failure leaves the map untouched.
        if let Some(&piece) = neighbors.not_alive.iter().find(|p| !ctx.counts.contains_key(p)) {
            return Err(ConsistencyError::MissingEntry { piece });
        }
        for piece in &neighbors.not_alive {
            if let Some(count) = ctx.counts.get_mut(piece) {
                *count += 1;
            }
        }
        Ok(Transition::BecameAlive { touched: neighbors.not_alive.len() })
    }

    fn ceased_alive(&self, ctx: &mut RegrowContext) -> Result<Transition, ConsistencyError> {
        let neighbors = same_type_neighbors(self.piece, &self.kind, ctx.spatial, ctx.pieces);

        if !ctx.counts.contains_key(&self.piece) {
            return Err(ConsistencyError::MissingEntry { piece: self.piece });
        }
        for &piece in &neighbors.not_alive {
            match ctx.counts.get(&piece) {
                None => return Err(ConsistencyError::MissingEntry { piece }),
                Some(0) => return Err(ConsistencyError::NegativeCount { piece }),
                Some(_) => {}
            }
        }
        for piece in &neighbors.not_alive {
            if let Some(count) = ctx.counts.get_mut(piece) {
                *count -= 1;
            }
        }
        ctx.counts.insert(self.piece, neighbors.alive.len() as u32);
        Ok(Transition::CeasedAlive { touched: neighbors.not_alive.len() })
    }
}
