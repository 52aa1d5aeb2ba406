//! Regrowth and neighborhood configuration
//!
//! JSON keys are camelCase, matching the level bundle. Everything is checked
//! once at load time; a running world never sees an invalid table or radius.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Radius sentinel meaning "no neighbor counting".
pub const DISABLED_RADIUS: i32 = -1;

pub const DEFAULT_OCCUPANCY_LAYER: &str = "upperPhysical";

fn disabled_radius() -> i32 {
    DISABLED_RADIUS
}

fn default_true() -> bool {
    true
}

fn default_occupancy_layers() -> Vec<String> {
    vec![DEFAULT_OCCUPANCY_LAYER.to_string()]
}

/// `-1` disables; any other negative value is a configuration error.
pub(crate) fn resolve_radius(radius: i32) -> Option<u32> {
    if radius < 0 { None } else { Some(radius as u32) }
}

/// Scene-level settings of the shared neighbor-count registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodsConfig {
    #[serde(default = "disabled_radius")]
    pub radius: i32,
}

impl Default for NeighborhoodsConfig {
    fn default() -> Self {
        Self { radius: DISABLED_RADIUS }
    }
}

impl NeighborhoodsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius < DISABLED_RADIUS {
            return Err(ConfigError::InvalidNeighborhoodRadius(self.radius));
        }
        Ok(())
    }

    pub fn radius(&self) -> Option<u32> {
        resolve_radius(self.radius)
    }
}

/// Cosmetic piece kept in sync with the cell (e.g. a ground tile under grass).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationConfig {
    pub layer: String,
    pub alive_state: String,
    pub dormant_state: String,
}

/// One regrowing resource kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityRegrowConfig {
    pub name: String,
    pub live_state: String,
    /// Base of the dormant family; sub-states are `<base>_<bucket>`.
    pub dormant_state: String,
    #[serde(default = "disabled_radius")]
    pub radius: i32,
    /// Indexed by neighbor count; the last entry covers every larger count.
    pub regrowth_probabilities: Vec<f64>,
    #[serde(default = "default_true")]
    pub can_regrow_if_occupied: bool,
    #[serde(default = "default_occupancy_layers")]
    pub occupancy_layers: Vec<String>,
    #[serde(default)]
    pub decoration: Option<DecorationConfig>,
}

impl DensityRegrowConfig {
    pub fn new(name: &str, live_state: &str, dormant_state: &str, radius: i32, regrowth_probabilities: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            live_state: live_state.to_string(),
            dormant_state: dormant_state.to_string(),
            radius,
            regrowth_probabilities,
            can_regrow_if_occupied: true,
            occupancy_layers: default_occupancy_layers(),
            decoration: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius < DISABLED_RADIUS {
            return Err(ConfigError::InvalidRadius { kind: self.name.clone(), radius: self.radius });
        }
        if self.regrowth_probabilities.is_empty() {
            return Err(ConfigError::EmptyProbabilityTable { kind: self.name.clone() });
        }
        for (index, &value) in self.regrowth_probabilities.iter().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { kind: self.name.clone(), index, value });
            }
        }
        Ok(())
    }

    pub fn radius(&self) -> Option<u32> {
        resolve_radius(self.radius)
    }

    /// Highest dormant bucket index.
    pub fn max_bucket(&self) -> usize {
        self.regrowth_probabilities.len().saturating_sub(1)
    }

    pub fn dormant_state_name(&self, bucket: usize) -> String {
        format!("{}_{}", self.dormant_state, bucket)
    }
}
