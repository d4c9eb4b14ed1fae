use hull::builtins::{BATTERY_ROOM_ID, CAPTAINS_CABIN_ID, RADIO_ROOM_ID};
use hull::ladder::LADDER_SINGLE_ID;
use hull::{Catalog, Direction, HullConfig, HullError, PersistedLayout, World};

fn load(json: &str) -> World {
    let layout = PersistedLayout::from_json(json).expect("layout json");
    World::from_layout(Catalog::standard().unwrap(), HullConfig::default(), &layout).expect("world")
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn layout_round_trips_through_json() {
    let mut world = World::new(Catalog::standard().unwrap(), HullConfig::default()).unwrap();
    world.insert_module_at_join(1, LADDER_SINGLE_ID, 0).unwrap();
    world.add_ladder_level(Direction::Below, 2, 0).unwrap();
    world.insert_module_at_join(0, BATTERY_ROOM_ID, -1).unwrap();

    let json = world.layout().to_json_pretty().unwrap();
    assert!(json.contains("\"levelChainIds\""), "{json}");
    assert!(json.contains("\"ladderLevelOffsets\""), "{json}");
    assert!(!json.contains("moduleIds"), "{json}");

    let restored = load(&json);
    assert_eq!(restored.chains(), world.chains());
    assert_eq!(restored.ladders(), world.ladders());
    assert!(restored.battery_supply_present());
}

#[test]
fn missing_ground_level_falls_back_to_the_default_chain() {
    let world = load(r#"{ "levelChainIds": {}, "ladderLevelOffsets": [] }"#);
    assert_eq!(world.chains().get(0).unwrap(), ids(&[CAPTAINS_CABIN_ID, RADIO_ROOM_ID]).as_slice());

    let world = load("{}");
    assert_eq!(world.chains().get(0).unwrap(), ids(&[CAPTAINS_CABIN_ID, RADIO_ROOM_ID]).as_slice());
}

#[test]
fn legacy_flat_module_list_becomes_level_zero() {
    let world = load(
        r#"{
            "moduleIds": ["cockpit_mk1", "ladder_room_mk1", "battery_room_mk1", "cargo_mk1"],
            "ladderLevelOffsets": [0]
        }"#,
    );
    assert_eq!(world.chains().get(0).unwrap(), ids(&[LADDER_SINGLE_ID, BATTERY_ROOM_ID]).as_slice());
    assert!(world.battery_supply_present());
    assert_eq!(world.layout().module_ids, None);
}

#[test]
fn stale_entries_are_dropped_on_load() {
    let world = load(
        r#"{
            "levelChainIds": { "0": ["mystery_mk9", "radio_room_mk1", "cockpit_mk1"], "up": ["empty_room_mk1"] },
            "ladderLevelOffsets": [1.5, "x"]
        }"#,
    );
    assert_eq!(world.chains().levels().collect::<Vec<_>>(), vec![0]);
    assert_eq!(world.chains().get(0).unwrap(), ids(&[RADIO_ROOM_ID]).as_slice());
    assert!(world.ladders().is_empty());
}

#[test]
fn ladder_level_without_a_ladder_gets_one() {
    let world = load(r#"{ "levelChainIds": { "0": ["radio_room_mk1"] }, "ladderLevelOffsets": [0] }"#);
    assert_eq!(world.chains().get(0).unwrap(), ids(&[LADDER_SINGLE_ID, RADIO_ROOM_ID]).as_slice());
}

#[test]
fn disconnected_levels_are_kept_but_not_rendered() {
    let world = load(
        r#"{
            "levelChainIds": { "0": ["radio_room_mk1"], "2": ["ladder_room_single_mk1"] },
            "ladderLevelOffsets": [0, 2]
        }"#,
    );
    assert!(world.chains().contains_level(2));
    assert!(world.plan().level(2).is_none());
    assert_eq!(world.plan().levels.len(), 1);
}

#[test]
fn malformed_layout_is_a_parse_error() {
    assert!(matches!(PersistedLayout::from_json("{\"levelChainIds\": 4}"), Err(HullError::LayoutParse(_))));
}

#[test]
fn loaded_plan_matches_the_reconciled_chains() {
    let world = load(r#"{ "levelChainIds": { "0": ["radio_room_mk1"] }, "ladderLevelOffsets": [0] }"#);
    let modules = &world.plan().level(0).unwrap().modules;
    assert_eq!(modules.len(), world.chains().concrete_len(0).unwrap());
    assert_eq!(modules[1].template_id(), LADDER_SINGLE_ID);
    assert_eq!(modules[2].template_id(), RADIO_ROOM_ID);
}
