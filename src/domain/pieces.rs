//! PieceStore - Structure of Arrays for every object in the episode
//!
//! A `PieceId` is the index into each column, so ids are dense, stable for
//! the whole episode and never reused until the store is cleared on reset.

use crate::core::{KindId, PieceId, Position, StateId};

#[derive(Clone, Debug, Default)]
pub struct PieceStore {
    positions: Vec<Position>,
    states: Vec<StateId>,
    kinds: Vec<Option<KindId>>,
}

impl PieceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
            kinds: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, position: Position, state: StateId, kind: Option<KindId>) -> PieceId {
        let id = self.positions.len() as PieceId;
        self.positions.push(position);
        self.states.push(state);
        self.kinds.push(kind);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, id: PieceId) -> Option<Position> {
        self.positions.get(id as usize).copied()
    }

    #[inline]
    pub fn state(&self, id: PieceId) -> Option<StateId> {
        self.states.get(id as usize).copied()
    }

    /// Regrowth kind of the piece; `None` for plain pieces (avatars, decorations).
    #[inline]
    pub fn kind(&self, id: PieceId) -> Option<KindId> {
        self.kinds.get(id as usize).copied().flatten()
    }

    pub(crate) fn set_state(&mut self, id: PieceId, state: StateId) {
        self.states[id as usize] = state;
    }

    pub(crate) fn set_position(&mut self, id: PieceId, position: Position) {
        self.positions[id as usize] = position;
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.states.clear();
        self.kinds.clear();
    }
}
