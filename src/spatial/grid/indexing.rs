use super::*;

impl LayerGrid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        (pos.y as usize) * (self.width as usize) + pos.x as usize
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Flat slot of (layer, pos); callers guarantee both are valid.
    #[inline(always)]
    pub(super) fn slot(&self, layer: LayerId, pos: Position) -> usize {
        debug_assert!(
            self.in_bounds(pos) && (layer as usize) < self.layer_count,
            "slot: out of bounds layer {} ({}, {}) for {}x{}x{} grid",
            layer,
            pos.x,
            pos.y,
            self.width,
            self.height,
            self.layer_count
        );
        (layer as usize) * self.size + self.index(pos)
    }
}
