use crate::core::{KindId, LayerId, StateId};
use crate::domain::{ConfigError, DensityRegrowConfig, StateRegistry};

use super::bucket::{bucket_index, bucket_probability};

/// Where a state sits in a kind's state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellPhase {
    Alive,
    Dormant(usize),
    /// Neither alive nor in the dormant family (e.g. a transitional state).
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecorationStates {
    pub layer: LayerId,
    pub alive: StateId,
    pub dormant: StateId,
}

/// A regrowth kind resolved against the state registry. Shared by every cell
/// of the kind; immutable once the level is loaded.
#[derive(Clone, Debug)]
pub struct RegrowKind {
    id: KindId,
    name: String,
    live_state: StateId,
    live_state_name: String,
    dormant_base: String,
    dormant_states: Vec<StateId>,
    radius: Option<u32>,
    probabilities: Vec<f64>,
    can_regrow_if_occupied: bool,
    query_layers: Vec<LayerId>,
    occupancy_layers: Vec<LayerId>,
    decoration: Option<DecorationStates>,
}

impl RegrowKind {
    /// Resolve `config` against `registry`. The dormant sub-states
    /// `<base>_0..=<base>_N` must already be registered.
    pub fn compile(id: KindId, config: &DensityRegrowConfig, registry: &mut StateRegistry) -> Result<Self, ConfigError> {
        config.validate()?;

        let lookup = |registry: &StateRegistry, name: &str| {
            registry
                .id_by_name(name)
                .ok_or_else(|| ConfigError::UnknownState(name.to_string()))
        };

        let live_state = lookup(registry, &config.live_state)?;
        let dormant_states = (0..=config.max_bucket())
            .map(|bucket| lookup(registry, &config.dormant_state_name(bucket)))
            .collect::<Result<Vec<_>, _>>()?;

        // Alive and dormant layers first; a cell in a transitional state can
        // sit on any layer that holds a state.
        let mut query_layers = Vec::new();
        for state in [live_state, dormant_states[0]] {
            let layer = registry
                .layer_of(state)
                .ok_or_else(|| ConfigError::UnknownState(config.live_state.clone()))?;
            if !query_layers.contains(&layer) {
                query_layers.push(layer);
            }
        }
        for layer in registry.state_layers() {
            if !query_layers.contains(&layer) {
                query_layers.push(layer);
            }
        }

        let occupancy_layers = config
            .occupancy_layers
            .iter()
            .map(|layer| registry.intern_layer(layer))
            .collect::<Result<Vec<_>, _>>()?;

        let decoration = match &config.decoration {
            None => None,
            Some(deco) => Some(DecorationStates {
                layer: registry.intern_layer(&deco.layer)?,
                alive: lookup(registry, &deco.alive_state)?,
                dormant: lookup(registry, &deco.dormant_state)?,
            }),
        };

        Ok(Self {
            id,
            name: config.name.clone(),
            live_state,
            live_state_name: config.live_state.clone(),
            dormant_base: config.dormant_state.clone(),
            dormant_states,
            radius: config.radius(),
            probabilities: config.regrowth_probabilities.clone(),
            can_regrow_if_occupied: config.can_regrow_if_occupied,
            query_layers,
            occupancy_layers,
            decoration,
        })
    }

    #[inline]
    pub fn id(&self) -> KindId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn live_state(&self) -> StateId {
        self.live_state
    }

    pub fn live_state_name(&self) -> &str {
        &self.live_state_name
    }

    pub fn dormant_base_name(&self) -> &str {
        &self.dormant_base
    }

    /// Sub-state for `bucket`, clamped to the last one.
    pub fn dormant_state(&self, bucket: usize) -> StateId {
        self.dormant_states[bucket.min(self.dormant_states.len() - 1)]
    }

    pub fn bucket_count(&self) -> usize {
        self.dormant_states.len()
    }

    #[inline]
    pub fn radius(&self) -> Option<u32> {
        self.radius
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn can_regrow_if_occupied(&self) -> bool {
        self.can_regrow_if_occupied
    }

    /// Layers a cell of this kind can sit on, alive and dormant ones first.
    pub fn query_layers(&self) -> &[LayerId] {
        &self.query_layers
    }

    pub fn occupancy_layers(&self) -> &[LayerId] {
        &self.occupancy_layers
    }

    pub fn decoration(&self) -> Option<DecorationStates> {
        self.decoration
    }

    #[inline]
    pub fn phase(&self, state: StateId) -> CellPhase {
        if state == self.live_state {
            return CellPhase::Alive;
        }
        match self.dormant_states.iter().position(|&s| s == state) {
            Some(bucket) => CellPhase::Dormant(bucket),
            None => CellPhase::Other,
        }
    }

    #[inline]
    pub fn bucket_for(&self, count: u32) -> usize {
        bucket_index(count, self.probabilities.len())
    }

    #[inline]
    pub fn probability_for(&self, bucket: usize) -> f64 {
        bucket_probability(&self.probabilities, bucket)
    }
}
