use hull::builtins::{BATTERY_ROOM_ID, CARGO_ID, COCKPIT_ID};
use hull::ladder::{LADDER_LEGACY_ID, LADDER_SINGLE_ID};
use hull::{Catalog, HullError, ModuleType, VolumeKind};

fn bare_module(id: &str, module_type: &str, length: f64) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "moduleType": "{module_type}",
            "size": {{ "lengthM": {length}, "widthM": 4.8, "heightM": 2.6 }},
            "volumes": {{
                "walkable": [{{ "id": "walk", "center": [0, 1.15, 0], "size": [4.0, 2.3, 3.0] }}]
            }}
        }}"#
    )
}

#[test]
fn standard_catalog_has_one_of_each_end_cap() {
    let catalog = Catalog::standard().expect("standard catalog");
    assert_eq!(catalog.iter().count(), 10);
    assert_eq!(catalog.cockpit().id, COCKPIT_ID);
    assert_eq!(catalog.cargo().id, CARGO_ID);
    assert!(catalog.cockpit().fixed && catalog.cargo().fixed);
    assert!(catalog.is_fixed_type(ModuleType::Cockpit));
    assert!(!catalog.is_fixed_type(ModuleType::Room));
}

#[test]
fn every_builtin_module_shares_the_hull_section() {
    let catalog = Catalog::standard().unwrap();
    for t in catalog.iter() {
        assert!((t.size.width_m - 4.8).abs() < 1e-4, "{} width {}", t.id, t.size.width_m);
        assert!((t.size.length_m - 3.2).abs() < 1e-4, "{} length {}", t.id, t.size.length_m);
        assert!((t.size.height_m - 2.6).abs() < 1e-4, "{} height {}", t.id, t.size.height_m);
        assert!(!t.volumes.of(VolumeKind::Walkable).is_empty(), "{} has no walkable volume", t.id);
    }
}

#[test]
fn only_ladder_rooms_carry_a_climb_column() {
    let catalog = Catalog::standard().unwrap();
    for t in catalog.iter() {
        let climb = t.volumes.of(VolumeKind::Climb);
        if t.is_ladder() {
            assert_eq!(climb.len(), 1, "{}", t.id);
            let column = &climb[0].shape;
            assert!((column.size.x - 0.78).abs() < 1e-4);
            assert!((column.size.z - 0.78).abs() < 1e-4);
        } else {
            assert!(climb.is_empty(), "{} should not be climbable", t.id);
        }
    }
}

#[test]
fn ladder_segments_overlap_their_neighbours() {
    let catalog = Catalog::standard().unwrap();
    let column = |id: &str| catalog.get(id).unwrap().volumes.of(VolumeKind::Climb)[0].shape;
    let single = column("ladder_room_single_mk1");
    let lowest = column("ladder_room_lowest_mk1");
    let middle = column("ladder_room_middle_mk1");
    let highest = column("ladder_room_highest_mk1");

    assert!((single.min().y - 0.0).abs() < 1e-4 && (single.max().y - 2.3).abs() < 1e-4);
    assert!((lowest.min().y - 0.0).abs() < 1e-4 && (lowest.max().y - 3.04).abs() < 1e-4);
    assert!((highest.min().y + 0.44).abs() < 1e-4 && (highest.max().y - 2.3).abs() < 1e-4);
    assert!((middle.min().y + 0.44).abs() < 1e-4 && (middle.max().y - 3.04).abs() < 1e-4);
}

#[test]
fn legacy_ladder_id_resolves_to_single_variant() {
    let catalog = Catalog::standard().unwrap();
    assert_eq!(catalog.canonical_id(LADDER_LEGACY_ID), LADDER_SINGLE_ID);
    assert!(catalog.contains(LADDER_LEGACY_ID));
    assert!(catalog.is_ladder(LADDER_LEGACY_ID));
    assert_eq!(catalog.get(LADDER_LEGACY_ID).unwrap().id, LADDER_SINGLE_ID);
}

#[test]
fn unknown_template_is_an_error() {
    let catalog = Catalog::standard().unwrap();
    match catalog.get("warp_core_mk1") {
        Err(HullError::UnknownTemplate { id }) => assert_eq!(id, "warp_core_mk1"),
        other => panic!("expected UnknownTemplate, got {other:?}"),
    }
}

#[test]
fn insert_menu_lists_insertable_templates_by_label() {
    let catalog = Catalog::standard().unwrap();
    let choices = catalog.insertable_choices();
    let ids: Vec<&str> = choices.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(choices.len(), 5, "{ids:?}");
    assert!(ids.contains(&LADDER_SINGLE_ID));
    assert!(!ids.contains(&COCKPIT_ID) && !ids.contains(&CARGO_ID));
    assert!(!ids.contains(&"ladder_room_middle_mk1"));
    assert!(choices.windows(2).all(|w| w[0].label <= w[1].label));
    assert!(choices.iter().all(|c| c.disabled_reason.is_none()));
}

#[test]
fn battery_room_supplies_power() {
    let catalog = Catalog::standard().unwrap();
    assert!(catalog.is_battery_supply(BATTERY_ROOM_ID));
    let suppliers: Vec<_> = catalog.iter().filter(|t| t.battery_supply).map(|t| t.id.clone()).collect();
    assert_eq!(suppliers, vec![BATTERY_ROOM_ID.to_string()]);
}

#[test]
fn json_catalog_loads_minimal_modules() {
    let json = format!("[{}, {}, {}]", bare_module("nose", "cockpit", 3.2), bare_module("hold", "cargo", 3.2), bare_module("bay", "open", 4.0));
    let catalog = Catalog::from_json(&json).expect("catalog");
    assert_eq!(catalog.cockpit().id, "nose");
    assert_eq!(catalog.cargo().id, "hold");
    let bay = catalog.get("bay").unwrap();
    assert!(!bay.fixed && bay.insertable);
    assert_eq!(bay.label, "bay");
    assert!((bay.size.length_m - 4.0).abs() < 1e-6);
}

#[test]
fn json_catalog_without_cargo_is_rejected() {
    let json = format!("[{}]", bare_module("nose", "cockpit", 3.2));
    match Catalog::from_json(&json) {
        Err(HullError::MissingEndCap { module_type }) => assert_eq!(module_type, ModuleType::Cargo),
        other => panic!("expected MissingEndCap, got {other:?}"),
    }
}

#[test]
fn json_catalog_with_two_cockpits_is_rejected() {
    let json = format!(
        "[{}, {}, {}]",
        bare_module("nose", "cockpit", 3.2),
        bare_module("nose2", "cockpit", 3.2),
        bare_module("hold", "cargo", 3.2)
    );
    assert!(matches!(Catalog::from_json(&json), Err(HullError::DuplicateEndCap { .. })));
}

#[test]
fn degenerate_volumes_are_rejected() {
    let flat = r#"{
        "id": "flat",
        "moduleType": "open",
        "size": { "lengthM": 3.2, "widthM": 4.8, "heightM": 2.6 },
        "volumes": { "blocked": [{ "id": "slab", "center": [0, 0, 0], "size": [1.0, 0.0, 1.0] }] }
    }"#;
    let json = format!("[{}, {}, {}]", bare_module("nose", "cockpit", 3.2), bare_module("hold", "cargo", 3.2), flat);
    match Catalog::from_json(&json) {
        Err(HullError::DegenerateGeometry { template, volume, .. }) => {
            assert_eq!(template, "flat");
            assert_eq!(volume, "slab");
        }
        other => panic!("expected DegenerateGeometry, got {other:?}"),
    }

    let short = r#"{
        "id": "short",
        "moduleType": "open",
        "size": { "lengthM": 3.2, "widthM": 4.8, "heightM": 2.6 },
        "volumes": { "walkable": [{ "id": "walk", "center": [0, 1], "size": [1, 1, 1] }] }
    }"#;
    let json = format!("[{}, {}, {}]", bare_module("nose", "cockpit", 3.2), bare_module("hold", "cargo", 3.2), short);
    assert!(matches!(Catalog::from_json(&json), Err(HullError::DegenerateGeometry { .. })));

    let zero_length = bare_module("stub", "open", 0.0);
    let json = format!("[{}, {}, {}]", bare_module("nose", "cockpit", 3.2), bare_module("hold", "cargo", 3.2), zero_length);
    assert!(matches!(Catalog::from_json(&json), Err(HullError::DegenerateGeometry { .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(Catalog::from_json("[{ not json"), Err(HullError::CatalogParse(_))));
}
