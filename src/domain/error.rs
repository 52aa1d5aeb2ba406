use thiserror::Error;

use crate::core::PieceId;

/// Rejected level or component configuration. Raised before an episode starts.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("level json is malformed: {0}")]
    Json(String),
    #[error("regrowth kind {kind}: regrowthProbabilities must not be empty")]
    EmptyProbabilityTable { kind: String },
    #[error("regrowth kind {kind}: probability {value} at index {index} must be within [0, 1]")]
    InvalidProbability { kind: String, index: usize, value: f64 },
    #[error("regrowth kind {kind}: radius {radius} is negative (use -1 to disable neighbor counting)")]
    InvalidRadius { kind: String, radius: i32 },
    #[error("neighborhoods radius {0} is negative (use -1 to disable)")]
    InvalidNeighborhoodRadius(i32),
    #[error("regrowth kind name {0} is used twice")]
    DuplicateKind(String),
    #[error("state {0} is declared twice")]
    DuplicateState(String),
    #[error("state {state} is claimed by both regrowth kinds {first} and {second}")]
    SharedState { state: String, first: String, second: String },
    #[error("unknown state {0}")]
    UnknownState(String),
    #[error("unknown layer {0}")]
    UnknownLayer(String),
    #[error("too many {what}: limit is {limit}")]
    TooMany { what: &'static str, limit: usize },
    #[error("map is empty")]
    EmptyMap,
    #[error("map row {row} has width {actual}, expected {expected}")]
    RaggedMap { row: usize, expected: usize, actual: usize },
    #[error("legend key {0:?} must be a single character")]
    BadLegendKey(String),
    #[error("map character {ch:?} at ({x}, {y}) is not in the legend")]
    UnknownLegend { ch: char, x: u32, y: u32 },
    #[error("two pieces on layer {layer} at ({x}, {y})")]
    LayoutConflict { layer: String, x: u32, y: u32 },
}

/// Broken increment/decrement bookkeeping. Always fatal for the episode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("neighbor count missing for piece {piece}: cell never registered")]
    MissingEntry { piece: PieceId },
    #[error("neighbor count for piece {piece} would go negative")]
    NegativeCount { piece: PieceId },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("consistency violation: {0}")]
    Consistency(#[from] ConsistencyError),
    #[error("world halted after a consistency violation ({0}); reset the episode")]
    Halted(ConsistencyError),
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),
    #[error("unknown state {0}")]
    UnknownState(String),
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: u32, y: u32 },
    #[error("piece {piece} cannot enter layer {layer} at ({x}, {y}): held by piece {occupant}")]
    LayerOccupied { piece: PieceId, layer: String, x: u32, y: u32, occupant: PieceId },
    #[error("regrowing cells only come from the level layout (state {0})")]
    RegrowPieceCommand(String),
}
