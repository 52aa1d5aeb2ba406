//! Systems - per-cell components and the services they share
//!
//! - neighborhoods:  scene-wide neighbor-count registry
//! - density_regrow: density-dependent regrowth state machine
//! - updater:        priority-ordered periodic updaters (the step scheduler)

pub mod density_regrow;
pub mod neighborhoods;
pub mod updater;

pub use density_regrow::{CellPhase, DensityRegrow, RegrowContext, RegrowKind, Transition};
pub use neighborhoods::{NeighborCountMap, Neighborhoods};
pub use updater::{bernoulli, UpdateProbability, Updater, UpdaterKind, UpdaterRegistry, REFRESH_PRIORITY, REGROW_PRIORITY};
