use hull::builtins::{BATTERY_ROOM_ID, CAPTAINS_CABIN_ID, CARGO_ID, COCKPIT_ID, EMPTY_ROOM_ID, RADIO_ROOM_ID};
use hull::ladder::LADDER_SINGLE_ID;
use hull::{
    AgentState, Catalog, HullConfig, HullError, JoinAction, ModuleType, Mutation, MutationRefusal, PersistedLayout,
    Recovery, Vec3f, World,
};
use proptest::prelude::*;

const EYE: f32 = 1.68;

fn default_world() -> World {
    World::new(Catalog::standard().unwrap(), HullConfig::default()).unwrap()
}

fn world_with_ground(ids: &[&str]) -> World {
    let json = format!(r#"{{ "levelChainIds": {{ "0": {:?} }}, "ladderLevelOffsets": [] }}"#, ids);
    let layout = PersistedLayout::from_json(&json).unwrap();
    World::from_layout(Catalog::standard().unwrap(), HullConfig::default(), &layout).unwrap()
}

fn ground_ids(world: &World) -> Vec<String> {
    world.chains().get(0).unwrap().to_vec()
}

fn refusal(result: Result<hull::MutationReport, HullError>) -> MutationRefusal {
    match result {
        Err(HullError::InvalidMutation(r)) => r,
        other => panic!("expected a refusal, got {other:?}"),
    }
}

#[test]
fn insert_then_remove_restores_layout_and_agent() {
    let mut world = default_world();
    let before_ids = ground_ids(&world);
    let before_pos = world.agent().position;

    let report = world.insert_module_at_join(1, EMPTY_ROOM_ID, 0).unwrap();
    assert_eq!(report.toast, format!("Inserted {EMPTY_ROOM_ID}"));
    assert_eq!(ground_ids(&world), vec![CAPTAINS_CABIN_ID, EMPTY_ROOM_ID, RADIO_ROOM_ID]);
    let cockpit = world.plan().placement(0, 0).unwrap();
    assert!((world.agent().position.z - cockpit.center_z).abs() < 1e-4, "agent stays in the cockpit");
    assert_eq!(world.plan().placement(0, 2).unwrap().template_id(), EMPTY_ROOM_ID);

    let report = world.remove_module_at_index(2, 0).unwrap();
    assert_eq!(report.toast, format!("Removed {EMPTY_ROOM_ID}"));
    assert_eq!(ground_ids(&world), before_ids);
    assert!(world.agent().position.distance(before_pos) < 1e-4);
}

#[test]
fn agent_keeps_its_local_offset_when_modules_shift() {
    let mut world = default_world();
    // Radio room, one metre aft of its centre.
    let spot = Vec3f::new(-0.5, EYE, 2.6);
    assert_eq!(world.set_agent(AgentState::new(spot)), Recovery::Unchanged);

    world.insert_module_at_join(0, BATTERY_ROOM_ID, 0).unwrap();
    let radio = world.plan().placement(0, 3).unwrap();
    assert_eq!(radio.template_id(), RADIO_ROOM_ID);
    let p = world.agent().position;
    assert!((p.z - (radio.center_z + 1.0)).abs() < 1e-4, "{p:?} vs {}", radio.center_z);
    assert!((p.x + 0.5).abs() < 1e-6);
}

#[test]
fn removing_the_occupied_module_recovers_the_agent() {
    let mut world = world_with_ground(&[CAPTAINS_CABIN_ID]);
    assert_eq!(world.set_agent(AgentState::new(Vec3f::new(0.0, EYE, 0.0))), Recovery::Unchanged);

    let report = world.remove_module_at_index(1, 0).unwrap();
    assert_ne!(report.recovery, Recovery::Unchanged);
    let p = world.agent().position;
    assert!(world.is_occupiable(p), "{p:?}");
    let inside = world
        .volumes()
        .passable()
        .any(|v| v.contains(p, 0.0) && matches!(v.key.template_id.as_str(), COCKPIT_ID | CARGO_ID));
    assert!(inside, "{p:?} should be in the cockpit or cargo");
}

#[test]
fn end_caps_cannot_be_removed() {
    let mut world = default_world();
    let before = world.layout();
    assert_eq!(refusal(world.remove_module_at_index(0, 0)), MutationRefusal::FixedModule { index: 0 });
    assert_eq!(refusal(world.remove_module_at_index(3, 0)), MutationRefusal::FixedModule { index: 3 });
    assert_eq!(
        refusal(world.remove_module_at_index(9, 0)),
        MutationRefusal::NoModuleAtIndex { index: 9, level: 0 }
    );
    assert_eq!(world.layout(), before);
}

#[test]
fn end_caps_cannot_be_inserted() {
    let mut world = default_world();
    let r = refusal(world.insert_module_at_join(0, COCKPIT_ID, 0));
    assert_eq!(r, MutationRefusal::NotInsertable { id: COCKPIT_ID.to_string() });
    assert_eq!(r.to_string(), "cockpit_mk1 cannot be inserted");
}

#[test]
fn joins_must_lie_between_two_modules() {
    let mut world = default_world();
    assert!(world.insert_module_at_join(2, EMPTY_ROOM_ID, 0).is_ok());
    let len = world.chains().concrete_len(0).unwrap();
    let r = refusal(world.insert_module_at_join(len - 1, EMPTY_ROOM_ID, 0));
    assert_eq!(r, MutationRefusal::JoinOutOfRange { join: len - 1, level: 0 });
    assert_eq!(refusal(world.remove_module_at_index(1, 4)), MutationRefusal::UnknownLevel { level: 4 });
}

#[test]
fn unknown_templates_are_fatal() {
    let mut world = default_world();
    let err = world.insert_module_at_join(0, "warp_core_mk1", 0).unwrap_err();
    assert!(!err.is_recoverable());
    assert!(matches!(err, HullError::UnknownTemplate { .. }));
}

#[test]
fn only_one_ladder_per_level() {
    let mut world = default_world();
    world.insert_module_at_join(1, LADDER_SINGLE_ID, 0).unwrap();
    let before = world.layout();
    assert_eq!(
        refusal(world.insert_module_at_join(0, LADDER_SINGLE_ID, 0)),
        MutationRefusal::SecondLadder { level: 0 }
    );
    assert_eq!(world.layout(), before);

    let ladder = world
        .insert_choices(0)
        .into_iter()
        .find(|c| c.id == LADDER_SINGLE_ID)
        .expect("ladder choice");
    assert_eq!(ladder.disabled_reason.as_deref(), Some("Already placed"));
}

#[test]
fn battery_supply_follows_the_battery_room() {
    let mut world = default_world();
    assert!(!world.battery_supply_present());

    let report = world.insert_module_at_join(0, BATTERY_ROOM_ID, 0).unwrap();
    assert!(report.battery_supply_present);
    let supplies = world.battery_supply_modules();
    assert_eq!(supplies.len(), 1);
    assert_eq!(supplies[0].module_index, 1);

    let report = world.remove_module_at_index(1, 0).unwrap();
    assert!(!report.battery_supply_present);
    assert!(world.battery_supply_modules().is_empty());
}

#[test]
fn join_controls_sit_on_the_seams() {
    let world = default_world();
    let controls = world.join_controls();
    let inserts: Vec<_> = controls.iter().filter(|c| matches!(c.action, JoinAction::Insert { .. })).collect();
    assert_eq!(inserts.len(), 3);
    assert_eq!(controls.len(), 7);

    let first = inserts[0];
    assert_eq!(first.action, JoinAction::Insert { join_index: 0, level: 0 });
    assert!((first.position.z + 3.2).abs() < 1e-4);
    assert!((first.position.x + 2.24).abs() < 1e-4);
    assert!((first.position.y - 1.35).abs() < 1e-4);
    assert!(!controls.iter().any(|c| matches!(c.action, JoinAction::RemoveLeft { index: 0, .. })));
}

#[test]
fn mutations_apply_through_the_serialized_form() {
    let mut world = default_world();
    let m: Mutation =
        serde_json::from_str(r#"{ "op": "insert", "join_index": 0, "template_id": "empty_room_mk1", "level": 0 }"#)
            .unwrap();
    world.apply_mutation(&m).unwrap();
    assert_eq!(ground_ids(&world)[0], EMPTY_ROOM_ID);
}

const MIDDLE_ROOMS: [&str; 4] = [CAPTAINS_CABIN_ID, RADIO_ROOM_ID, BATTERY_ROOM_ID, EMPTY_ROOM_ID];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_edits_keep_the_hull_consistent(ops in prop::collection::vec((any::<bool>(), 0usize..8, 0usize..4), 1..10)) {
        let mut world = default_world();
        for (insert, at, room) in ops {
            let result = if insert {
                world.insert_module_at_join(at, MIDDLE_ROOMS[room], 0)
            } else {
                world.remove_module_at_index(at, 0)
            };
            if let Err(err) = &result {
                prop_assert!(err.is_recoverable(), "fatal error {}", err);
            }

            let modules = &world.plan().level(0).unwrap().modules;
            prop_assert_eq!(modules.first().unwrap().template.module_type, ModuleType::Cockpit);
            prop_assert_eq!(modules.last().unwrap().template.module_type, ModuleType::Cargo);
            prop_assert_eq!(modules.len(), world.chains().concrete_len(0).unwrap());
            let p = world.agent().position;
            prop_assert!(world.is_occupiable(p), "agent left legal space at {:?}", p);
        }
    }
}

/// Ground `[cabin, ladder, radio]` with an upper deck `[ladder, battery]`.
fn stacked_world() -> World {
    let json = format!(
        r#"{{ "levelChainIds": {{ "0": {:?}, "1": {:?} }}, "ladderLevelOffsets": [0, 1] }}"#,
        [CAPTAINS_CABIN_ID, LADDER_SINGLE_ID, RADIO_ROOM_ID],
        [LADDER_SINGLE_ID, BATTERY_ROOM_ID],
    );
    let layout = PersistedLayout::from_json(&json).unwrap();
    World::from_layout(Catalog::standard().unwrap(), HullConfig::default(), &layout).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn insert_then_remove_round_trips_on_any_level(level in 0i32..2, join in 0usize..4, room in 0usize..4) {
        let mut world = stacked_world();
        let before_chains = world.chains().clone();
        let before_ladders = world.ladders().clone();
        let before_pos = world.agent().position;
        let join = join.min(world.chains().get(level).unwrap().len());

        world.insert_module_at_join(join, MIDDLE_ROOMS[room], level).unwrap();
        prop_assert_eq!(world.chains().get(level).unwrap()[join].as_str(), MIDDLE_ROOMS[room]);
        prop_assert_eq!(world.plan().placement(level, join + 1).unwrap().template_id(), MIDDLE_ROOMS[room]);

        world.remove_module_at_index(join + 1, level).unwrap();
        prop_assert_eq!(world.chains(), &before_chains);
        prop_assert_eq!(world.ladders(), &before_ladders);
        let p = world.agent().position;
        prop_assert!(p.distance(before_pos) < 1e-4, "agent moved from {:?} to {:?}", before_pos, p);
    }
}
