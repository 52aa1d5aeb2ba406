use super::*;
use crate::spatial::SpatialQuery;

impl LayerGrid {
    /// Scan the bounding square of `radius` around `center` and collect every
    /// piece on `layers` whose offset satisfies `inside`.
    fn collect_shape<F>(&self, center: Position, layers: &[LayerId], radius: u32, inside: F) -> Vec<PieceId>
    where
        F: Fn(i64, i64) -> bool,
    {
        // Anything farther than the grid extent can never hit a cell.
        let r = radius.min(self.width.max(self.height)) as i32;
        let mut found = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if !inside(dx as i64, dy as i64) {
                    continue;
                }
                let Some(pos) = center.offset(dx, dy) else { continue };
                if !self.in_bounds(pos) {
                    continue;
                }
                for &layer in layers {
                    if let Some(piece) = self.get(layer, pos) {
                        found.push(piece);
                    }
                }
            }
        }
        found
    }
}

impl SpatialQuery for LayerGrid {
    fn query_disc(&self, center: Position, layers: &[LayerId], radius: u32) -> Vec<PieceId> {
        let r2 = (radius as i64) * (radius as i64);
        self.collect_shape(center, layers, radius, |dx, dy| dx * dx + dy * dy <= r2)
    }

    fn query_diamond(&self, center: Position, layers: &[LayerId], radius: u32) -> Vec<PieceId> {
        let r = radius as i64;
        self.collect_shape(center, layers, radius, |dx, dy| dx.abs() + dy.abs() <= r)
    }

    fn query_point(&self, center: Position, layers: &[LayerId]) -> Vec<PieceId> {
        layers.iter().filter_map(|&layer| self.get(layer, center)).collect()
    }
}
