//! Spatial - layered occupancy grid and neighborhood queries
//!
//! Regrowth only needs three query shapes, all centered on a cell:
//! - disc:    dx² + dy² <= r²
//! - diamond: |dx| + |dy| <= r
//! - point:   the center cell itself

pub mod grid;

pub use grid::LayerGrid;

use crate::core::{LayerId, PieceId, Position};

/// Neighborhood queries over a set of layers.
///
/// Results come in row-major scan order of the query shape, then in the order
/// of `layers`. Whatever sits on the center cell is included.
pub trait SpatialQuery {
    fn query_disc(&self, center: Position, layers: &[LayerId], radius: u32) -> Vec<PieceId>;

    fn query_diamond(&self, center: Position, layers: &[LayerId], radius: u32) -> Vec<PieceId>;

    fn query_point(&self, center: Position, layers: &[LayerId]) -> Vec<PieceId> {
        self.query_disc(center, layers, 0)
    }
}
