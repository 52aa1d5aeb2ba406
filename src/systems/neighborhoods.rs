//! Neighborhoods - the one neighbor-count map of an episode
//!
//! Every regrowing cell registers itself here with a count of 0 during start.
//! Cells then mutate the map in place as they become alive or stop being
//! alive; the registry itself holds no algorithm. The map is replaced
//! wholesale on reset, never pruned entry by entry.

use std::collections::HashMap;

use crate::core::PieceId;
use crate::domain::NeighborhoodsConfig;

use super::density_regrow::bucket::upper_bound_possible_neighbors;

/// Piece -> number of alive same-type neighbors within the cell's radius.
/// Only meaningful while the piece is dormant.
pub type NeighborCountMap = HashMap<PieceId, u32>;

#[derive(Debug)]
pub struct Neighborhoods {
    radius: Option<u32>,
    upper_bound: usize,
    piece_to_num_neighbors: NeighborCountMap,
}

impl Neighborhoods {
    pub fn new(config: &NeighborhoodsConfig) -> Self {
        let radius = config.radius();
        Self {
            radius,
            upper_bound: upper_bound_possible_neighbors(radius),
            piece_to_num_neighbors: NeighborCountMap::new(),
        }
    }

    pub fn reset(&mut self) {
        self.piece_to_num_neighbors = NeighborCountMap::new();
    }

    pub fn map(&self) -> &NeighborCountMap {
        &self.piece_to_num_neighbors
    }

    /// Live map; callers follow the increment/decrement protocol.
    pub fn map_mut(&mut self) -> &mut NeighborCountMap {
        &mut self.piece_to_num_neighbors
    }

    pub fn upper_bound_possible_neighbors(&self) -> usize {
        self.upper_bound
    }

    pub fn radius(&self) -> Option<u32> {
        self.radius
    }

    pub fn count(&self, piece: PieceId) -> Option<u32> {
        self.piece_to_num_neighbors.get(&piece).copied()
    }
}
