//! LayerGrid - one occupancy slot per (layer, cell)
//!
//! Flat layer-major storage instead of a map of positions:
//! slot = layer * size + y * width + x

use crate::core::{LayerId, PieceId, Position};

mod indexing;
mod queries;

pub struct LayerGrid {
    width: u32,
    height: u32,
    size: usize,
    layer_count: usize,
    slots: Vec<Option<PieceId>>,
}

impl LayerGrid {
    pub fn new(width: u32, height: u32, layer_count: usize) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            layer_count,
            slots: vec![None; size * layer_count],
        }
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Piece on `layer` at `pos`, if any. Unknown layers and out-of-bounds
    /// positions are simply empty.
    #[inline]
    pub fn get(&self, layer: LayerId, pos: Position) -> Option<PieceId> {
        if (layer as usize) >= self.layer_count || !self.in_bounds(pos) {
            return None;
        }
        self.slots[self.slot(layer, pos)]
    }

    /// Put `piece` on `layer` at `pos`.
    /// On conflict the slot is left untouched and the current occupant returned.
    pub fn place(&mut self, layer: LayerId, pos: Position, piece: PieceId) -> Result<(), PieceId> {
        let slot = self.slot(layer, pos);
        match self.slots[slot] {
            Some(occupant) if occupant != piece => Err(occupant),
            _ => {
                self.slots[slot] = Some(piece);
                Ok(())
            }
        }
    }

    /// Clear the slot, but only if `piece` is the one holding it.
    pub fn remove(&mut self, layer: LayerId, pos: Position, piece: PieceId) {
        let slot = self.slot(layer, pos);
        if self.slots[slot] == Some(piece) {
            self.slots[slot] = None;
        }
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
    }
}
