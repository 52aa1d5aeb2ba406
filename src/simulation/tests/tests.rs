use serde_json::{json, Value};

use super::*;
use crate::domain::ConsistencyError;
use crate::systems::{UpdateProbability, Updater, UpdaterKind};

fn grass(radius: i32, table: &[f64]) -> Value {
    json!({
        "name": "grass",
        "liveState": "grass",
        "dormantState": "grassWait",
        "radius": radius,
        "regrowthProbabilities": table
    })
}

fn level(map: &[&str], regrowth: Value) -> String {
    json!({
        "seed": 11,
        "neighborhoods": { "radius": regrowth["radius"].clone() },
        "states": [
            { "name": "grass", "layer": "lowerPhysical" },
            { "name": "grassWait", "layer": "logic" },
            { "name": "rock", "layer": "lowerPhysical" },
            { "name": "soil", "layer": "background" },
            { "name": "bareSoil", "layer": "background" },
            { "name": "avatar", "layer": "upperPhysical" },
            { "name": "grassCut", "layer": "logic" },
            { "name": "grassBurnt", "layer": "scorch" },
            { "name": "puddle", "layer": "wet" },
            { "name": "ice", "layer": "wet" }
        ],
        "regrowth": [regrowth],
        "legend": {
            "G": ["grass"],
            "w": ["grassWait"],
            "A": ["grassWait", "avatar"],
            "S": ["grass", "soil"],
            "s": ["grassWait", "bareSoil"]
        },
        "map": map
    })
    .to_string()
}

fn world(map: &[&str], regrowth: Value) -> WorldCore {
    WorldCore::from_level_json(&level(map, regrowth)).unwrap()
}

fn name(world: &WorldCore, piece: PieceId) -> &str {
    world.state_name(piece).unwrap()
}

#[test]
fn reset_registers_every_cell_with_zero() {
    let world = world(&["www", "w w"], grass(1, &[0.0, 0.5, 1.0]));
    assert_eq!(world.piece_count(), 5);
    assert_eq!(world.members(0), &[0, 1, 2, 3, 4]);
    for piece in 0..5 {
        assert_eq!(world.neighbor_count(piece), Some(0));
    }
    assert_eq!(world.updaters().len(), 2);
    assert_eq!(world.updaters().updaters()[0].kind, UpdaterKind::RefreshBucket);
}

#[test]
fn initially_alive_cells_are_counted_after_start() {
    let world = world(&["wGw", "www"], grass(1, &[0.0, 0.5, 1.0]));
    // Disc of radius 1 around (1, 0): left, right and below.
    assert_eq!(world.neighbor_count(0), Some(1));
    assert_eq!(world.neighbor_count(2), Some(1));
    assert_eq!(world.neighbor_count(4), Some(1));
    assert_eq!(world.neighbor_count(3), Some(0));
    assert!(world.audit_neighbor_counts().is_empty());
}

#[test]
fn middle_cell_turning_alive_lifts_both_ends_to_bucket_one() {
    let mut world = world(&["www"], grass(1, &[0.0, 0.5, 1.0]));

    world.set_state_by_name(1, "grass").unwrap();
    assert_eq!(world.neighbor_count(0), Some(1));
    assert_eq!(world.neighbor_count(2), Some(1));
    assert_eq!(world.neighbor_count(1), Some(0));

    refresh::refresh_buckets(&mut world, None).unwrap();
    assert_eq!(name(&world, 0), "grassWait_1");
    assert_eq!(name(&world, 2), "grassWait_1");
    assert_eq!(name(&world, 1), "grass");

    let cell = world.cell(0).unwrap();
    assert_eq!(cell.regrowth_probability(world.state_of(0).unwrap()), Some(0.5));
}

#[test]
fn middle_cell_going_dormant_restores_both_ends() {
    let mut world = world(&["www"], grass(1, &[0.0, 0.5, 1.0]));
    world.set_state_by_name(1, "grass").unwrap();
    world.set_state_by_name(1, "grassWait_0").unwrap();

    assert_eq!(world.neighbor_count(0), Some(0));
    assert_eq!(world.neighbor_count(2), Some(0));
    assert_eq!(world.neighbor_count(1), Some(0));

    refresh::refresh_buckets(&mut world, None).unwrap();
    for piece in 0..3 {
        assert_eq!(name(&world, piece), "grassWait_0");
        let cell = world.cell(piece).unwrap();
        assert_eq!(cell.regrowth_probability(world.state_of(piece).unwrap()), Some(0.0));
    }
}

#[test]
fn going_dormant_recounts_own_entry_from_alive_neighbors() {
    let mut world = world(&["GwG"], grass(1, &[0.0, 0.5, 1.0]));
    assert_eq!(world.neighbor_count(1), Some(2));

    world.set_state_by_name(1, "grass").unwrap();
    world.set_state_by_name(0, "grassWait_0").unwrap();
    world.set_state_by_name(1, "grassWait_0").unwrap();

    // Only piece 2 is still alive next to piece 1.
    assert_eq!(world.neighbor_count(1), Some(1));
    assert_eq!(world.neighbor_count(0), Some(0));
    assert!(world.audit_neighbor_counts().is_empty());
}

#[test]
fn transitional_cell_keeps_counting_while_away_from_its_family() {
    let mut world = world(&["www"], grass(1, &[0.0, 0.5, 1.0]));

    world.set_state_by_name(0, "grassCut").unwrap();
    world.set_state_by_name(1, "grass").unwrap();
    world.set_state_by_name(0, "grassWait_0").unwrap();
    assert_eq!(world.neighbor_count(0), Some(1));
    assert!(world.audit_neighbor_counts().is_empty());

    world.set_state_by_name(1, "grassWait_0").unwrap();
    assert_eq!(world.neighbor_count(0), Some(0));
    assert!(world.fault().is_none());
    assert!(world.audit_neighbor_counts().is_empty());
}

#[test]
fn transitional_state_on_another_layer_is_counted() {
    let mut world = world(&["www"], grass(1, &[0.0, 0.5, 1.0]));

    world.set_state_by_name(0, "grassBurnt").unwrap();
    assert_eq!(world.piece_at(Position::new(0, 0), "scorch"), Some(0));
    world.set_state_by_name(1, "grass").unwrap();
    assert_eq!(world.neighbor_count(0), Some(1));
    // The transitional cell is audited too.
    assert!(world.audit_neighbor_counts().is_empty());

    world.set_state_by_name(1, "grassWait_0").unwrap();
    world.set_state_by_name(0, "grassWait_0").unwrap();
    assert_eq!(world.neighbor_count(0), Some(0));
    world.step().unwrap();
    assert_eq!(name(&world, 0), "grassWait_0");
}

#[test]
fn regrow_updater_with_certain_probability_ignores_the_table() {
    let mut world = world(&["www"], grass(1, &[0.0]));
    world.updaters.clear();
    world.updaters.register(Updater::refresh(0));
    world.updaters.register(Updater { probability: UpdateProbability::Always, ..Updater::regrow(0) });

    world.step().unwrap();
    for piece in 0..3 {
        assert_eq!(name(&world, piece), "grass");
    }
    assert!(world.audit_neighbor_counts().is_empty());
}

#[test]
fn occupant_blocks_regrowth_when_the_kind_forbids_it() {
    let mut regrowth = grass(-1, &[1.0]);
    regrowth["canRegrowIfOccupied"] = json!(false);
    let mut world = world(&["Aw"], regrowth);
    world.enable_perf_metrics(true);

    world.step().unwrap();

    assert_eq!(name(&world, 0), "grassWait_0");
    assert_eq!(name(&world, 2), "grass");
    let perf = world.get_perf_stats();
    assert_eq!(perf.regrowth_trials(), 2);
    assert_eq!(perf.regrowth_blocked(), 1);
    assert_eq!(perf.regrowth_successes(), 1);
}

#[test]
fn occupant_is_ignored_when_the_kind_allows_it() {
    let mut world = world(&["Aw"], grass(-1, &[1.0]));
    world.step().unwrap();
    assert_eq!(name(&world, 0), "grass");
    assert_eq!(name(&world, 2), "grass");
}

#[test]
fn foreign_piece_on_the_live_layer_blocks_regrowth() {
    let mut world = world(&["w"], grass(-1, &[1.0]));
    let rock = world.add_piece("rock", Position::new(0, 0)).unwrap();

    world.step().unwrap();
    assert_eq!(name(&world, 0), "grassWait_0");

    assert_eq!(
        world.set_state_by_name(0, "grass"),
        Err(WorldError::LayerOccupied {
            piece: 0,
            layer: "lowerPhysical".to_string(),
            x: 0,
            y: 0,
            occupant: rock,
        })
    );
    assert_eq!(name(&world, 0), "grassWait_0");
}

#[test]
fn zero_radius_keeps_every_cell_in_bucket_zero() {
    let mut world = world(&["GwG", "wGw"], grass(0, &[0.0]));
    assert_eq!(world.neighborhoods().upper_bound_possible_neighbors(), 0);

    world.set_state_by_name(1, "grass").unwrap();
    world.set_state_by_name(1, "grassWait_0").unwrap();
    for _ in 0..5 {
        world.step().unwrap();
    }
    for &piece in world.members(0) {
        if let Some(count) = world.neighbor_count(piece) {
            assert_eq!(count, 0);
        }
        assert_ne!(name(&world, piece), "grassWait_1");
    }
}

#[test]
fn missing_entry_halts_until_reset() {
    let mut world = world(&["www"], grass(1, &[0.0, 0.5, 1.0]));
    world.neighborhoods.map_mut().remove(&0);

    assert_eq!(
        world.set_state_by_name(1, "grass"),
        Err(WorldError::Consistency(ConsistencyError::MissingEntry { piece: 0 }))
    );
    assert_eq!(world.neighbor_count(2), Some(0));
    assert!(matches!(world.step(), Err(WorldError::Halted(_))));
    assert!(matches!(world.set_state_by_name(2, "grass"), Err(WorldError::Halted(_))));

    world.reset().unwrap();
    assert!(world.fault().is_none());
    assert_eq!(world.neighbor_count(0), Some(0));
    assert_eq!(name(&world, 1), "grassWait_0");
    world.step().unwrap();
}

#[test]
fn negative_count_is_fatal_and_leaves_counts_untouched() {
    let mut world = world(&["wGw"], grass(1, &[0.0, 0.5, 1.0]));
    *world.neighborhoods.map_mut().get_mut(&2).unwrap() = 0;

    assert_eq!(
        world.set_state_by_name(1, "grassWait_0"),
        Err(WorldError::Consistency(ConsistencyError::NegativeCount { piece: 2 }))
    );
    assert_eq!(world.neighbor_count(0), Some(1));
    assert_eq!(world.fault(), Some(&ConsistencyError::NegativeCount { piece: 2 }));
}

#[test]
fn reset_replays_the_same_episode() {
    let map = ["wwwww", "wGwGw", "wwwww"];
    let mut world = world(&map, grass(1, &[0.0, 0.3, 0.6, 0.9]));

    let run = |world: &mut WorldCore| {
        let mut frames = Vec::new();
        world.set_state_by_name(6, "grassWait_0").unwrap();
        for _ in 0..30 {
            world.step().unwrap();
            let snapshot: Vec<_> = (0..world.piece_count() as PieceId)
                .map(|p| (world.state_of(p), world.neighbor_count(p)))
                .collect();
            frames.push(snapshot);
        }
        frames
    };

    let first = run(&mut world);
    world.reset().unwrap();
    assert_eq!(world.frame(), 0);
    let second = run(&mut world);
    assert_eq!(first, second);
    assert!(world.audit_neighbor_counts().is_empty());
}

#[test]
fn decoration_follows_the_cell() {
    let mut regrowth = grass(1, &[0.0, 1.0]);
    regrowth["decoration"] = json!({
        "layer": "background",
        "aliveState": "soil",
        "dormantState": "bareSoil"
    });
    let mut world = world(&["Ss"], regrowth);
    assert_eq!(world.cell(2).unwrap().decoration(), Some(3));

    world.set_state_by_name(2, "grass").unwrap();
    assert_eq!(name(&world, 3), "soil");

    world.set_state_by_name(0, "grassWait_0").unwrap();
    assert_eq!(name(&world, 1), "bareSoil");
}

#[test]
fn decoration_that_cannot_follow_is_left_behind() {
    let mut regrowth = grass(1, &[0.0, 1.0]);
    regrowth["decoration"] = json!({
        "layer": "background",
        "aliveState": "soil",
        "dormantState": "puddle"
    });
    let mut world = world(&["Ss"], regrowth);
    assert_eq!(world.neighbor_count(2), Some(1));
    let ice = world.add_piece("ice", Position::new(0, 0)).unwrap();

    world.set_state_by_name(0, "grassWait_0").unwrap();
    assert_eq!(name(&world, 0), "grassWait_0");
    assert_eq!(name(&world, 1), "soil");
    assert_eq!(world.piece_at(Position::new(0, 0), "wet"), Some(ice));
    assert_eq!(world.neighbor_count(2), Some(0));
    assert!(world.fault().is_none());

    world.step().unwrap();
    assert!(world.audit_neighbor_counts().is_empty());
}

#[test]
fn occupied_spots_reject_new_and_moved_pieces() {
    let mut world = world(&["wA "], grass(1, &[0.0, 0.5, 1.0]));
    let count = world.piece_count();

    assert_eq!(
        world.add_piece("avatar", Position::new(1, 0)),
        Err(WorldError::LayerOccupied {
            piece: count as PieceId,
            layer: "upperPhysical".to_string(),
            x: 1,
            y: 0,
            occupant: 2,
        })
    );
    assert_eq!(world.piece_count(), count);

    let other = world.add_piece("avatar", Position::new(2, 0)).unwrap();
    assert!(matches!(
        world.move_piece(other, Position::new(1, 0)),
        Err(WorldError::LayerOccupied { occupant: 2, .. })
    ));
    assert_eq!(world.position_of(other), Some(Position::new(2, 0)));
    assert_eq!(world.piece_at(Position::new(2, 0), "upperPhysical"), Some(other));
    assert_eq!(world.piece_at(Position::new(1, 0), "upperPhysical"), Some(2));
}

#[test]
fn perf_counts_increments_and_decrements() {
    let mut world = world(&["www"], grass(1, &[0.0, 0.5, 1.0]));
    world.enable_perf_metrics(true);

    world.set_state_by_name(1, "grass").unwrap();
    world.set_state_by_name(1, "grassWait_0").unwrap();

    let perf = world.get_perf_stats();
    assert_eq!(perf.increments(), 2);
    assert_eq!(perf.decrements(), 2);

    world.enable_perf_metrics(false);
    assert_eq!(world.get_perf_stats(), PerfStats::default());
}

#[test]
fn regrowing_cells_cannot_be_added_or_moved() {
    let mut world = world(&["wA "], grass(1, &[0.0, 0.5, 1.0]));

    assert_eq!(
        world.add_piece("grass", Position::new(2, 0)),
        Err(WorldError::RegrowPieceCommand("grass".to_string()))
    );
    assert_eq!(
        world.add_piece("grassWait_1", Position::new(2, 0)),
        Err(WorldError::RegrowPieceCommand("grassWait_1".to_string()))
    );
    assert!(matches!(
        world.move_piece(0, Position::new(2, 0)),
        Err(WorldError::RegrowPieceCommand(_))
    ));

    let avatar = 2;
    assert_eq!(name(&world, avatar), "avatar");
    assert_eq!(
        world.move_piece(avatar, Position::new(3, 0)),
        Err(WorldError::OutOfBounds { x: 3, y: 0 })
    );
    world.move_piece(avatar, Position::new(2, 0)).unwrap();
    assert_eq!(world.piece_at(Position::new(2, 0), "upperPhysical"), Some(avatar));
    assert_eq!(world.piece_at(Position::new(1, 0), "upperPhysical"), None);
}

#[test]
fn stats_split_cells_by_bucket() {
    let mut world = world(&["wGw", "www"], grass(1, &[0.0, 0.5, 1.0]));
    refresh::refresh_buckets(&mut world, None).unwrap();

    let stats = world.regrow_stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].alive, 1);
    assert_eq!(stats[0].dormant_by_bucket, vec![2, 3, 0]);
    assert_eq!(stats[0].dormant(), 5);
    assert_eq!(world.alive_count("grass"), Some(1));
    assert_eq!(world.alive_count("moss"), None);
}
