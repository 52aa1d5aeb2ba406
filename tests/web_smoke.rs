#![cfg(target_arch = "wasm32")]

use meadow_engine::{init, version, World};
use wasm_bindgen_test::*;

const LEVEL: &str = r#"{
    "seed": 1,
    "neighborhoods": { "radius": 1 },
    "states": [
        { "name": "grass", "layer": "lowerPhysical" },
        { "name": "grassWait", "layer": "logic" }
    ],
    "regrowth": [{
        "name": "grass",
        "liveState": "grass",
        "dormantState": "grassWait",
        "radius": 1,
        "regrowthProbabilities": [0.0, 0.5, 1.0]
    }],
    "legend": { "G": ["grass"], "w": ["grassWait"] },
    "map": ["wGw"]
}"#;

#[wasm_bindgen_test]
fn world_loads_and_steps_under_wasm() {
    init();
    assert!(!version().is_empty());

    let Ok(mut world) = World::new(LEVEL) else {
        panic!("level should load");
    };
    assert_eq!(world.width(), 3);
    assert_eq!(world.neighbor_count_at(0, 0, "logic"), Some(1));
    assert_eq!(world.state_at(1, 0, "lowerPhysical").as_deref(), Some("grass"));

    assert!(world.step().is_ok());
    assert_eq!(world.frame(), 1);
    assert_eq!(world.audit_mismatches(), 0);
}

#[wasm_bindgen_test]
fn bad_level_throws() {
    assert!(World::new("{}").is_err());
}
