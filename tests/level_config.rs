use meadow_engine::domain::{ConfigError, LevelBundle};
use meadow_engine::{WorldCore, WorldError};
use serde_json::{json, Value};

fn base() -> Value {
    json!({
        "neighborhoods": { "radius": 1 },
        "states": [
            { "name": "grass", "layer": "lowerPhysical" },
            { "name": "grassWait", "layer": "logic" },
            { "name": "rock", "layer": "lowerPhysical" }
        ],
        "regrowth": [{
            "name": "grass",
            "liveState": "grass",
            "dormantState": "grassWait",
            "radius": 1,
            "regrowthProbabilities": [0.0, 0.5]
        }],
        "legend": { "G": ["grass"], "w": ["grassWait"], "R": ["rock"] },
        "map": ["GwR"]
    })
}

fn load(level: Value) -> Result<WorldCore, WorldError> {
    WorldCore::from_level_json(&level.to_string())
}

fn config_error(level: Value) -> ConfigError {
    match load(level) {
        Err(WorldError::Config(e)) => e,
        Err(other) => panic!("expected a config error, got {other}"),
        Ok(_) => panic!("expected a config error, level loaded"),
    }
}

#[test]
fn base_level_loads_with_defaults() {
    let world = load(base()).unwrap();
    assert_eq!((world.width(), world.height()), (3, 1));

    let kind = world.kind_by_name("grass").unwrap();
    assert!(kind.can_regrow_if_occupied());
    assert_eq!(kind.occupancy_layers().len(), 1);
    assert_eq!(world.states().layer_name(kind.occupancy_layers()[0]), Some("upperPhysical"));

    let bundle = LevelBundle::from_json(&base().to_string()).unwrap();
    assert_eq!(bundle.seed, 0);
    assert_eq!(bundle.regrowth[0].decoration, None);
}

#[test]
fn bare_dormant_base_in_the_legend_starts_in_bucket_zero() {
    let world = load(base()).unwrap();
    assert_eq!(world.state_name(1), Some("grassWait_0"));
}

#[test]
fn empty_table_is_rejected() {
    let mut level = base();
    level["regrowth"][0]["regrowthProbabilities"] = json!([]);
    assert_eq!(config_error(level), ConfigError::EmptyProbabilityTable { kind: "grass".to_string() });
}

#[test]
fn probability_outside_unit_interval_is_rejected() {
    let mut level = base();
    level["regrowth"][0]["regrowthProbabilities"] = json!([0.0, 1.5]);
    assert_eq!(
        config_error(level),
        ConfigError::InvalidProbability { kind: "grass".to_string(), index: 1, value: 1.5 }
    );
}

#[test]
fn negative_radius_other_than_disabled_is_rejected() {
    let mut level = base();
    level["regrowth"][0]["radius"] = json!(-2);
    assert_eq!(config_error(level), ConfigError::InvalidRadius { kind: "grass".to_string(), radius: -2 });

    let mut level = base();
    level["neighborhoods"]["radius"] = json!(-5);
    assert_eq!(config_error(level), ConfigError::InvalidNeighborhoodRadius(-5));
}

#[test]
fn duplicate_kinds_and_shared_states_are_rejected() {
    let mut level = base();
    let twin = level["regrowth"][0].clone();
    level["regrowth"].as_array_mut().unwrap().push(twin);
    assert_eq!(config_error(level), ConfigError::DuplicateKind("grass".to_string()));

    let mut level = base();
    let mut moss = level["regrowth"][0].clone();
    moss["name"] = json!("moss");
    moss["dormantState"] = json!("mossWait");
    level["regrowth"].as_array_mut().unwrap().push(moss);
    assert!(matches!(config_error(level), ConfigError::SharedState { .. }));
}

#[test]
fn unknown_names_are_rejected() {
    let mut level = base();
    level["legend"]["x"] = json!(["flower"]);
    assert_eq!(config_error(level), ConfigError::UnknownState("flower".to_string()));

    let mut level = base();
    level["regrowth"][0]["liveState"] = json!("clover");
    assert_eq!(config_error(level), ConfigError::UnknownState("clover".to_string()));
}

#[test]
fn map_shape_and_legend_are_checked() {
    let mut level = base();
    level["map"] = json!(["GwR", "Gw"]);
    assert_eq!(config_error(level), ConfigError::RaggedMap { row: 1, expected: 3, actual: 2 });

    let mut level = base();
    level["map"] = json!(["GwQ"]);
    assert_eq!(config_error(level), ConfigError::UnknownLegend { ch: 'Q', x: 2, y: 0 });

    let mut level = base();
    level["legend"]["ww"] = json!(["grassWait"]);
    assert_eq!(config_error(level), ConfigError::BadLegendKey("ww".to_string()));

    let mut level = base();
    level["map"] = json!([]);
    assert_eq!(config_error(level), ConfigError::EmptyMap);
}

#[test]
fn two_pieces_on_one_layer_cell_conflict() {
    let mut level = base();
    level["legend"]["X"] = json!(["grass", "rock"]);
    level["map"] = json!(["GXw"]);
    assert_eq!(
        config_error(level),
        ConfigError::LayoutConflict { layer: "lowerPhysical".to_string(), x: 1, y: 0 }
    );
}

#[test]
fn spaces_are_empty_unless_the_legend_says_otherwise() {
    let mut level = base();
    level["map"] = json!(["G w"]);
    assert_eq!(load(level.clone()).unwrap().piece_count(), 2);

    level["legend"][" "] = json!(["rock"]);
    assert_eq!(load(level).unwrap().piece_count(), 3);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        WorldCore::from_level_json("{\"states\": 3}"),
        Err(WorldError::Config(ConfigError::Json(_)))
    ));
}
