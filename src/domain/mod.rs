//! Domain - everything a level describes before it becomes a running world
//!
//! - states:  interned layer/state names
//! - config:  regrowth and neighborhood configuration (serde, validated)
//! - level:   level bundle JSON (legend + ascii map)
//! - pieces:  per-piece SoA storage
//! - error:   error taxonomy

pub mod config;
pub mod error;
pub mod level;
pub mod pieces;
pub mod states;

pub use config::{DecorationConfig, DensityRegrowConfig, NeighborhoodsConfig, DISABLED_RADIUS};
pub use error::{ConfigError, ConsistencyError, WorldError};
pub use level::{CompiledLevel, LevelBundle, Spawn, StateDef};
pub use pieces::PieceStore;
pub use states::StateRegistry;
