//! Core identifiers shared by every layer of the engine.

mod ids;

pub use ids::{KindId, LayerId, PieceId, Position, StateId};
