use serde::{Deserialize, Serialize};

/// Stable identity of a simulation object for the whole episode.
pub type PieceId = u32;
/// Interned state name (see `StateRegistry`).
pub type StateId = u16;
/// Interned layer name.
pub type LayerId = u8;
/// Index of a regrowth kind ("grass", "apple", ...) in the level.
pub type KindId = u16;

/// Grid coordinate, origin at the top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy); `None` when the result leaves the non-negative quadrant.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Position> {
        let x = self.x as i64 + dx as i64;
        let y = self.y as i64 + dy as i64;
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            return None;
        }
        Some(Position::new(x as u32, y as u32))
    }
}
