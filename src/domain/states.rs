//! StateRegistry - interned state and layer names
//!
//! Pieces carry compact `StateId`s; names only matter at the edges
//! (level JSON, facade, diagnostics). Each state lives on exactly one layer.

use std::collections::HashMap;

use crate::core::{LayerId, StateId};

use super::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateProps {
    pub name: String,
    pub layer: LayerId,
}

#[derive(Clone, Debug, Default)]
pub struct StateRegistry {
    states: Vec<StateProps>,
    state_key_to_id: HashMap<String, StateId>,
    layers: Vec<String>,
    layer_key_to_id: HashMap<String, LayerId>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `name`, creating the layer on first sight.
    pub fn intern_layer(&mut self, name: &str) -> Result<LayerId, ConfigError> {
        if let Some(&id) = self.layer_key_to_id.get(name) {
            return Ok(id);
        }
        if self.layers.len() > LayerId::MAX as usize {
            return Err(ConfigError::TooMany { what: "layers", limit: LayerId::MAX as usize + 1 });
        }
        let id = self.layers.len() as LayerId;
        self.layers.push(name.to_string());
        self.layer_key_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn register_state(&mut self, name: &str, layer: &str) -> Result<StateId, ConfigError> {
        if self.state_key_to_id.contains_key(name) {
            return Err(ConfigError::DuplicateState(name.to_string()));
        }
        if self.states.len() > StateId::MAX as usize {
            return Err(ConfigError::TooMany { what: "states", limit: StateId::MAX as usize + 1 });
        }
        let layer = self.intern_layer(layer)?;
        let id = self.states.len() as StateId;
        self.states.push(StateProps { name: name.to_string(), layer });
        self.state_key_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    /// Layers holding at least one registered state, in id order.
    pub fn state_layers(&self) -> Vec<LayerId> {
        let mut layers: Vec<LayerId> = self.states.iter().map(|s| s.layer).collect();
        layers.sort_unstable();
        layers.dedup();
        layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn id_by_name(&self, name: &str) -> Option<StateId> {
        self.state_key_to_id.get(name).copied()
    }

    pub fn name(&self, id: StateId) -> Option<&str> {
        self.states.get(id as usize).map(|s| s.name.as_str())
    }

    pub fn layer_of(&self, id: StateId) -> Option<LayerId> {
        self.states.get(id as usize).map(|s| s.layer)
    }

    pub fn layer_id(&self, name: &str) -> Option<LayerId> {
        self.layer_key_to_id.get(name).copied()
    }

    pub fn layer_name(&self, id: LayerId) -> Option<&str> {
        self.layers.get(id as usize).map(String::as_str)
    }
}
