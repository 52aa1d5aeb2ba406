//! Level bundle - the JSON a world is built from
//!
//! ```json
//! {
//!   "seed": 7,
//!   "neighborhoods": { "radius": 2 },
//!   "states": [
//!     { "name": "grass", "layer": "lowerPhysical" },
//!     { "name": "grassWait", "layer": "logic" },
//!     { "name": "avatar", "layer": "upperPhysical" }
//!   ],
//!   "regrowth": [{
//!     "name": "grass", "liveState": "grass", "dormantState": "grassWait",
//!     "radius": 2, "regrowthProbabilities": [0.0, 0.001, 0.005, 0.025]
//!   }],
//!   "legend": { "G": ["grass"], "w": ["grassWait"], "A": ["grassWait", "avatar"] },
//!   "map": ["GwG", "wAw"]
//! }
//! ```
//!
//! A dormant base (`grassWait`) names a family: the level declares only its
//! layer, and `grassWait_0..=grassWait_N` are registered from the table length.
//! Placing the bare base in the legend spawns `grassWait_0`.
//! A space in the map is an empty cell unless the legend defines it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{KindId, Position, StateId};
use crate::systems::density_regrow::bucket::upper_bound_possible_neighbors;
use crate::systems::{CellPhase, RegrowKind};

use super::config::{DensityRegrowConfig, NeighborhoodsConfig};
use super::error::ConfigError;
use super::states::StateRegistry;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDef {
    pub name: String,
    pub layer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBundle {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub neighborhoods: NeighborhoodsConfig,
    pub states: Vec<StateDef>,
    #[serde(default)]
    pub regrowth: Vec<DensityRegrowConfig>,
    pub legend: BTreeMap<String, Vec<String>>,
    pub map: Vec<String>,
}

/// One piece the layout places at reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub position: Position,
    pub state: StateId,
    pub kind: Option<KindId>,
}

/// A validated level with every name resolved to an id.
#[derive(Debug)]
pub struct CompiledLevel {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub neighborhoods: NeighborhoodsConfig,
    pub states: StateRegistry,
    pub kinds: Vec<Arc<RegrowKind>>,
    pub spawns: Vec<Spawn>,
}

impl LevelBundle {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Map size as (width, height).
    pub fn dimensions(&self) -> Result<(u32, u32), ConfigError> {
        let expected = self.map.first().map(|row| row.chars().count()).unwrap_or(0);
        if expected == 0 {
            return Err(ConfigError::EmptyMap);
        }
        for (row, line) in self.map.iter().enumerate() {
            let actual = line.chars().count();
            if actual != expected {
                return Err(ConfigError::RaggedMap { row, expected, actual });
            }
        }
        Ok((expected as u32, self.map.len() as u32))
    }

    pub fn compile(&self) -> Result<CompiledLevel, ConfigError> {
        self.neighborhoods.validate()?;
        let (width, height) = self.dimensions()?;

        if self.regrowth.len() > KindId::MAX as usize + 1 {
            return Err(ConfigError::TooMany { what: "regrowth kinds", limit: KindId::MAX as usize + 1 });
        }
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (i, cfg) in self.regrowth.iter().enumerate() {
            cfg.validate()?;
            if self.regrowth[..i].iter().any(|c| c.name == cfg.name) {
                return Err(ConfigError::DuplicateKind(cfg.name.clone()));
            }
            for state in [cfg.live_state.as_str(), cfg.dormant_state.as_str()] {
                if let Some(first) = owners.insert(state, &cfg.name) {
                    return Err(ConfigError::SharedState {
                        state: state.to_string(),
                        first: first.to_string(),
                        second: cfg.name.clone(),
                    });
                }
            }
        }

        let mut states = StateRegistry::new();
        let mut dormant_layers: HashMap<&str, &str> = HashMap::new();
        for def in &self.states {
            if self.regrowth.iter().any(|c| c.dormant_state == def.name) {
                if dormant_layers.insert(&def.name, &def.layer).is_some() {
                    return Err(ConfigError::DuplicateState(def.name.clone()));
                }
            } else {
                states.register_state(&def.name, &def.layer)?;
            }
        }
        for cfg in &self.regrowth {
            let layer = dormant_layers
                .get(cfg.dormant_state.as_str())
                .ok_or_else(|| ConfigError::UnknownState(cfg.dormant_state.clone()))?;
            for bucket in 0..=cfg.max_bucket() {
                states.register_state(&cfg.dormant_state_name(bucket), layer)?;
            }
        }

        let kinds = self
            .regrowth
            .iter()
            .enumerate()
            .map(|(i, cfg)| RegrowKind::compile(i as KindId, cfg, &mut states).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        if self.neighborhoods.radius().is_some() {
            let bound = upper_bound_possible_neighbors(self.neighborhoods.radius());
            for kind in kinds.iter().filter(|k| k.bucket_count() > bound + 1) {
                warn!(
                    kind = kind.name(),
                    buckets = kind.bucket_count(),
                    upper_bound = bound,
                    "probability table has buckets no cell can reach"
                );
            }
        }

        let mut legend: HashMap<char, Vec<(StateId, Option<KindId>)>> = HashMap::new();
        for (key, names) in &self.legend {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::BadLegendKey(key.clone()));
            };
            let resolved = names
                .iter()
                .map(|name| resolve_spawn_state(name, &states, &kinds))
                .collect::<Result<Vec<_>, _>>()?;
            legend.insert(ch, resolved);
        }

        let mut spawns = Vec::new();
        for (y, row) in self.map.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let position = Position::new(x as u32, y as u32);
                match legend.get(&ch) {
                    Some(entries) => {
                        for &(state, kind) in entries {
                            spawns.push(Spawn { position, state, kind });
                        }
                    }
                    None if ch == ' ' => {}
                    None => {
                        return Err(ConfigError::UnknownLegend { ch, x: position.x, y: position.y });
                    }
                }
            }
        }

        Ok(CompiledLevel {
            width,
            height,
            seed: self.seed,
            neighborhoods: self.neighborhoods.clone(),
            states,
            kinds,
            spawns,
        })
    }
}

fn resolve_spawn_state(
    name: &str,
    states: &StateRegistry,
    kinds: &[Arc<RegrowKind>],
) -> Result<(StateId, Option<KindId>), ConfigError> {
    if let Some(kind) = kinds.iter().find(|k| k.dormant_base_name() == name) {
        return Ok((kind.dormant_state(0), Some(kind.id())));
    }
    let state = states
        .id_by_name(name)
        .ok_or_else(|| ConfigError::UnknownState(name.to_string()))?;
    let kind = kinds
        .iter()
        .find(|k| k.phase(state) != CellPhase::Other)
        .map(|k| k.id());
    Ok((state, kind))
}
